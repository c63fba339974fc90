//! Component source classification.
//!
//! Turns the raw string a user passes to `zen add` into a fetch-ready
//! [`SourceDescriptor`]: where the manifest lives, and which directory relative
//! `content_url` references resolve against.

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use crate::domain::AppError;

/// Manifest filename assumed when a repository tree or local directory is given.
pub const MANIFEST_FILE_NAME: &str = "component.json";

/// Which supported form the user-supplied source took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `file://` URL or an existing filesystem path.
    Local,
    /// Source-hosting repository URL, rewritten to the provider's raw host.
    Tree,
    /// Any other `http(s)` URL addressing a file directly.
    Direct,
}

impl SourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Local => "local",
            SourceKind::Tree => "tree",
            SourceKind::Direct => "direct",
        }
    }
}

/// A fetchable location: a remote URL or a local filesystem path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Remote(Url),
    Local(PathBuf),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Remote(url) => write!(f, "{}", url),
            Location::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Classified, fetch-ready representation of a component source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub kind: SourceKind,
    /// The string the user supplied, trimmed. Recorded as the component's source.
    pub original: String,
    /// Where the manifest itself is read from.
    pub manifest: Location,
    /// Directory that relative file references resolve against.
    pub base: Location,
}

impl SourceDescriptor {
    /// Resolve a file entry's `content_url` against this source.
    ///
    /// Absolute `http(s)` references are used as-is (repository blob URLs are
    /// rewritten to raw content); `file://` references and absolute paths read
    /// locally; everything else is joined onto [`SourceDescriptor::base`].
    pub fn resolve_reference(&self, reference: &str) -> Result<Location, AppError> {
        let reference = reference.trim();

        match Url::parse(reference) {
            Ok(url) => match url.scheme() {
                "http" | "https" => {
                    let url = match rewrite_repository_url(&url) {
                        Some(RepositoryTarget { raw, .. }) => raw,
                        None => url,
                    };
                    Ok(Location::Remote(url))
                }
                "file" => file_url_to_path(&url, reference).map(Location::Local),
                other => Err(AppError::InvalidSource {
                    input: reference.to_string(),
                    reason: format!("unsupported scheme '{}' in file reference", other),
                }),
            },
            Err(_) => match &self.base {
                Location::Remote(base) => base
                    .join(reference)
                    .map(Location::Remote)
                    .map_err(|e| AppError::InvalidSource {
                        input: reference.to_string(),
                        reason: format!("cannot resolve against {}: {}", base, e),
                    }),
                Location::Local(dir) => {
                    let path = Path::new(reference);
                    if path.is_absolute() {
                        Ok(Location::Local(path.to_path_buf()))
                    } else {
                        Ok(Location::Local(dir.join(path)))
                    }
                }
            },
        }
    }
}

/// What a local path probe found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalEntry {
    File,
    Directory,
}

/// Classify a raw source string, probing the local filesystem for bare paths.
///
/// Relative local paths are taken relative to `root`, the project being
/// installed into, not the process working directory.
pub fn classify(raw: &str, root: &Path) -> Result<SourceDescriptor, AppError> {
    let anchored =
        |path: &Path| -> PathBuf { if path.is_relative() { root.join(path) } else { path.to_path_buf() } };

    let mut descriptor = classify_with(raw, |path| probe_local_path(&anchored(path)))?;
    if let (Location::Local(manifest), Location::Local(base)) =
        (&mut descriptor.manifest, &mut descriptor.base)
    {
        *manifest = anchored(manifest);
        *base = anchored(base);
    }
    Ok(descriptor)
}

/// Classify a raw source string with an injected filesystem probe.
///
/// Rules apply in priority order: local (`file://` or an existing path),
/// repository tree/blob URL, direct `http(s)` file URL. Anything else is an
/// [`AppError::InvalidSource`].
pub fn classify_with<P>(raw: &str, probe: P) -> Result<SourceDescriptor, AppError>
where
    P: Fn(&Path) -> Option<LocalEntry>,
{
    let input = raw.trim();
    if input.is_empty() {
        return Err(invalid(input, "source is empty"));
    }

    if has_scheme(input, "file") {
        let url = Url::parse(input).map_err(|e| invalid(input, &e.to_string()))?;
        let path = file_url_to_path(&url, input)?;
        return Ok(local_descriptor(input, path, probe));
    }

    if !input.contains("://") && probe(Path::new(input)).is_some() {
        return Ok(local_descriptor(input, PathBuf::from(input), probe));
    }

    let url = Url::parse(input)
        .map_err(|_| invalid(input, "not an http(s) URL, file:// URL, or existing local path"))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(input, &format!("unsupported scheme '{}'", url.scheme())));
    }

    if let Some(target) = rewrite_repository_url(&url) {
        let manifest = if target.addresses_file {
            target.raw
        } else {
            append_segment(&target.raw, MANIFEST_FILE_NAME)
        };
        let base = directory_of(&manifest, input)?;
        return Ok(SourceDescriptor {
            kind: SourceKind::Tree,
            original: input.to_string(),
            manifest: Location::Remote(manifest),
            base: Location::Remote(base),
        });
    }

    if addresses_file(&url) {
        let base = directory_of(&url, input)?;
        return Ok(SourceDescriptor {
            kind: SourceKind::Direct,
            original: input.to_string(),
            manifest: Location::Remote(url),
            base: Location::Remote(base),
        });
    }

    if let Some(provider) = provider_for(&url) {
        return Err(invalid(
            input,
            &format!(
                "{} URLs must point at a tree/<ref>/<path> or blob/<ref>/<file> location",
                provider.host
            ),
        ));
    }

    Err(invalid(input, "URL does not address a manifest file (expected a path ending in .json)"))
}

fn probe_local_path(path: &Path) -> Option<LocalEntry> {
    let metadata = std::fs::metadata(path).ok()?;
    if metadata.is_dir() { Some(LocalEntry::Directory) } else { Some(LocalEntry::File) }
}

fn local_descriptor<P>(input: &str, path: PathBuf, probe: P) -> SourceDescriptor
where
    P: Fn(&Path) -> Option<LocalEntry>,
{
    let manifest = match probe(&path) {
        Some(LocalEntry::Directory) => path.join(MANIFEST_FILE_NAME),
        _ => path,
    };
    let base = match manifest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    SourceDescriptor {
        kind: SourceKind::Local,
        original: input.to_string(),
        manifest: Location::Local(manifest),
        base: Location::Local(base),
    }
}

fn has_scheme(input: &str, scheme: &str) -> bool {
    input.get(..scheme.len()).is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
        && input[scheme.len()..].starts_with("://")
}

fn file_url_to_path(url: &Url, input: &str) -> Result<PathBuf, AppError> {
    url.to_file_path().map_err(|_| invalid(input, "file:// URL does not name a local path"))
}

fn invalid(input: &str, reason: &str) -> AppError {
    AppError::InvalidSource { input: input.to_string(), reason: reason.to_string() }
}

// ── Repository providers ───────────────────────────────────────────────

/// How a provider lays out tree/blob URLs and their raw-content equivalents.
#[derive(Debug, Clone, Copy)]
enum RawLayout {
    /// `/<owner>/<repo>/(tree|blob)/<ref>/<path>` on a dedicated raw host.
    GitHub { raw_host: &'static str },
    /// `/<namespace...>/<repo>/-/(tree|blob)/<ref>/<path>` → `/-/raw/` on the same host.
    GitLab,
}

#[derive(Debug, Clone, Copy)]
struct HostingProvider {
    host: &'static str,
    layout: RawLayout,
}

const PROVIDERS: &[HostingProvider] = &[
    HostingProvider {
        host: "github.com",
        layout: RawLayout::GitHub { raw_host: "raw.githubusercontent.com" },
    },
    HostingProvider { host: "gitlab.com", layout: RawLayout::GitLab },
];

struct RepositoryTarget {
    raw: Url,
    /// A blob URL or a `.json` path already names the manifest file.
    addresses_file: bool,
}

fn provider_for(url: &Url) -> Option<&'static HostingProvider> {
    let host = url.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
    PROVIDERS.iter().find(|provider| provider.host == host)
}

/// Rewrite a repository tree/blob URL to its raw-content equivalent, preserving ref and subpath.
fn rewrite_repository_url(url: &Url) -> Option<RepositoryTarget> {
    let provider = provider_for(url)?;
    let segments: Vec<&str> =
        url.path_segments()?.filter(|segment| !segment.is_empty()).collect();

    let (marker, raw_path) = match provider.layout {
        RawLayout::GitHub { raw_host } => {
            let [owner, repo, marker, git_ref, rest @ ..] = segments.as_slice() else {
                return None;
            };
            if !matches!(*marker, "tree" | "blob") {
                return None;
            }
            let mut parts = vec![*owner, *repo, *git_ref];
            parts.extend_from_slice(rest);
            (*marker, (raw_host, parts.join("/")))
        }
        RawLayout::GitLab => {
            let dash = segments.iter().position(|segment| *segment == "-")?;
            if dash < 2 {
                return None;
            }
            let marker = segments.get(dash + 1)?;
            if !matches!(*marker, "tree" | "blob") {
                return None;
            }
            let git_ref = segments.get(dash + 2)?;
            let mut parts: Vec<&str> = segments[..dash].to_vec();
            parts.extend(["-", "raw", *git_ref]);
            parts.extend_from_slice(&segments[dash + 3..]);
            (*marker, (provider.host, parts.join("/")))
        }
    };

    let (host, path) = raw_path;
    let raw = Url::parse(&format!("https://{}/{}", host, path)).ok()?;
    let addresses_file = marker == "blob" || path.to_ascii_lowercase().ends_with(".json");
    Some(RepositoryTarget { raw, addresses_file })
}

fn append_segment(url: &Url, segment: &str) -> Url {
    let mut url = url.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(segment);
    }
    url
}

fn directory_of(url: &Url, input: &str) -> Result<Url, AppError> {
    url.join("./").map_err(|e| invalid(input, &e.to_string()))
}

fn addresses_file(url: &Url) -> bool {
    let Some(last) = url.path_segments().and_then(|mut segments| segments.next_back()) else {
        return false;
    };
    if last.to_ascii_lowercase().ends_with(".json") {
        return true;
    }
    match last.rsplit_once('.') {
        Some((stem, extension)) => {
            !stem.is_empty()
                && !extension.is_empty()
                && extension.chars().all(|c| c.is_ascii_alphanumeric())
                && !extension.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}
