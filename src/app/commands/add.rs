//! Add command: fetch a component manifest and install its files.
//!
//! Every fetch, resolution and conflict check finishes before the first
//! write. The configuration save is the last step, so a failure anywhere
//! earlier leaves `.zen/config.yaml` untouched.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::app::AppContext;
use crate::app::commands::init;
use crate::domain::paths::REQUIREMENTS_FILE;
use crate::domain::{
    AddOutcome, AppError, ComponentManifest, FileSource, InstallEvent, InstallPreview,
    InstallResult, InstalledComponent, ProjectConfig, SourceDescriptor, WritePlan, install_path,
    manifest, source, write_plan,
};
use crate::ports::{ConfigStore, ProgressReporter, ProjectFilesystem, ScaffoldStore, SourceFetcher};

const FALLBACK_PROJECT_NAME: &str = "zen-project";

#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    /// Manifest URL, repository URL, or local path as typed by the user.
    pub source: String,
    /// Place every file directly under this directory instead of the category directory.
    pub path: Option<PathBuf>,
    pub overwrite: bool,
    pub dry_run: bool,
    /// Initialize a minimal project first when none exists.
    pub yes: bool,
}

pub fn execute<P, C, T>(
    ctx: &AppContext<P, C, T>,
    fetcher: &impl SourceFetcher,
    reporter: &impl ProgressReporter,
    options: &AddOptions,
) -> Result<AddOutcome, AppError>
where
    P: ProjectFilesystem,
    C: ConfigStore,
    T: ScaffoldStore,
{
    let config = load_or_initialize(ctx, options)?;

    let descriptor = source::classify(&options.source, ctx.project().root())?;
    tracing::debug!(kind = descriptor.kind.label(), manifest = %descriptor.manifest, "classified source");
    reporter.report(&InstallEvent::SourceClassified {
        kind: descriptor.kind,
        manifest: descriptor.manifest.to_string(),
    });

    let manifest = manifest::parse(&fetcher.fetch(&descriptor.manifest)?)?;
    tracing::debug!(name = %manifest.name, version = %manifest.version, files = manifest.files.len(), "parsed manifest");
    reporter.report(&InstallEvent::ManifestFetched {
        name: manifest.name.clone(),
        version: manifest.version.clone(),
        files: manifest.files.len(),
    });

    let layout = install_path::resolve(
        &manifest,
        options.path.as_deref(),
        &config.category_table(),
        ctx.project().root(),
    )?;

    let mut destinations = Vec::with_capacity(layout.files.len());
    for resolved in &layout.files {
        let content = file_content(&manifest, resolved.index, &descriptor, fetcher, reporter)?;
        destinations.push((resolved.relative.clone(), content));
    }

    let plan = write_plan::plan(destinations, options.overwrite, |path| ctx.project().path_state(path))?;
    reporter.report(&InstallEvent::Planned {
        install_path: layout.install_path.clone(),
        files: plan.len(),
    });

    let new_dependencies = pending_dependencies(&config, &manifest.dependencies);

    if options.dry_run {
        tracing::debug!(files = plan.len(), "dry run, stopping before writes");
        return Ok(AddOutcome::Previewed(InstallPreview {
            manifest,
            install_path: layout.install_path,
            plan,
            new_dependencies,
        }));
    }

    apply_plan(ctx.project(), &plan, reporter)?;
    sync_requirements(ctx.project(), &new_dependencies)?;

    let merge = ctx.config().upsert_component(InstalledComponent {
        name: manifest.name.clone(),
        version: manifest.version.clone(),
        category: manifest.category.clone(),
        source: descriptor.original.clone(),
        dependencies: manifest.dependencies.clone(),
    })?;
    for collision in &merge.collisions {
        tracing::warn!(
            package = %collision.package,
            existing = %collision.existing,
            incoming = %collision.incoming,
            "conflicting version constraints kept side by side"
        );
    }
    reporter.report(&InstallEvent::DependenciesMerged { added: merge.added.clone() });
    reporter.report(&InstallEvent::ConfigSaved { component: manifest.name.clone() });

    Ok(AddOutcome::Installed(InstallResult {
        component_name: manifest.name,
        version: manifest.version,
        files_installed: plan.len(),
        dependencies_added: merge.added.len(),
        install_path: layout.install_path,
        constraint_collisions: merge.collisions,
        plan,
    }))
}

fn load_or_initialize<P, C, T>(
    ctx: &AppContext<P, C, T>,
    options: &AddOptions,
) -> Result<ProjectConfig, AppError>
where
    P: ProjectFilesystem,
    C: ConfigStore,
    T: ScaffoldStore,
{
    if ctx.config().exists() {
        return ctx.config().load();
    }
    if !options.yes {
        return Err(AppError::ProjectNotInitialized);
    }

    let project_name = ctx
        .project()
        .root()
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| FALLBACK_PROJECT_NAME.to_string());

    // A dry run must not touch disk, so it previews against an unsaved config.
    if options.dry_run {
        return Ok(ProjectConfig::new(project_name, "1.0.0"));
    }

    tracing::debug!(project = %project_name, "auto-initializing minimal project");
    init::initialize_minimal(ctx, &project_name)?;
    ctx.config().load()
}

fn file_content(
    manifest: &ComponentManifest,
    index: usize,
    descriptor: &SourceDescriptor,
    fetcher: &impl SourceFetcher,
    reporter: &impl ProgressReporter,
) -> Result<String, AppError> {
    let entry = &manifest.files[index];
    match &entry.source {
        FileSource::Inline(content) => Ok(content.clone()),
        FileSource::Remote(reference) => {
            let location = descriptor.resolve_reference(reference)?;
            let bytes = fetcher.fetch(&location)?;
            let content = String::from_utf8(bytes).map_err(|_| {
                AppError::fetch_error(location.to_string(), "content is not valid UTF-8", None)
            })?;
            reporter.report(&InstallEvent::FileFetched {
                name: entry.name.clone(),
                location: location.to_string(),
            });
            Ok(content)
        }
    }
}

/// Dependencies the project does not list yet, in manifest order.
fn pending_dependencies(config: &ProjectConfig, incoming: &[String]) -> Vec<String> {
    let mut preview = config.clone();
    preview.merge_dependencies(incoming).added
}

fn apply_plan(
    project: &impl ProjectFilesystem,
    plan: &WritePlan,
    reporter: &impl ProgressReporter,
) -> Result<(), AppError> {
    for directory in &plan.directories {
        project.create_dir_all(directory)?;
        reporter.report(&InstallEvent::DirectoryCreated { path: directory.clone() });
    }
    for step in &plan.steps {
        project.write_file(&step.path, &step.content)?;
        tracing::debug!(path = %step.path.display(), action = step.action.label(), "wrote file");
        reporter.report(&InstallEvent::FileWritten { path: step.path.clone(), action: step.action });
    }
    Ok(())
}

/// Append dependencies missing from `requirements.txt`, one per line.
fn sync_requirements(project: &impl ProjectFilesystem, dependencies: &[String]) -> Result<(), AppError> {
    if dependencies.is_empty() {
        return Ok(());
    }

    let path = Path::new(REQUIREMENTS_FILE);
    let mut content = if project.exists(path) { project.read_file(path)? } else { String::new() };
    let present: BTreeSet<String> = content.lines().map(|line| line.trim().to_string()).collect();

    let missing: Vec<&String> =
        dependencies.iter().filter(|dependency| !present.contains(dependency.trim())).collect();
    if missing.is_empty() {
        return Ok(());
    }

    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    for dependency in missing {
        content.push_str(dependency.trim());
        content.push('\n');
    }

    project.write_file(path, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConstraintCollision, ManifestError, WriteAction};
    use crate::ports::NoopReporter;
    use crate::testing::{FakeFetcher, RecordingReporter, TestProject};

    const MANIFEST_URL: &str = "https://example.com/components/email-validator/component.json";

    const EMAIL_VALIDATOR: &str = r#"{
        "name": "email-validator",
        "version": "1.0.0",
        "description": "Simple email validation utility",
        "category": "utils",
        "dependencies": ["validators"],
        "files": [
            {"name": "validator.py", "path": "validator.py", "content": "def validate(email):\n    return '@' in email\n"}
        ]
    }"#;

    fn add(source: &str) -> AddOptions {
        AddOptions { source: source.to_string(), ..Default::default() }
    }

    fn installed(outcome: AddOutcome) -> InstallResult {
        match outcome {
            AddOutcome::Installed(result) => result,
            AddOutcome::Previewed(_) => panic!("expected an install, got a preview"),
        }
    }

    #[test]
    fn installs_into_category_directory_and_records_component() {
        let project = TestProject::initialized();
        let fetcher = FakeFetcher::new().with_body(MANIFEST_URL, EMAIL_VALIDATOR);

        let result =
            installed(execute(&project.ctx, &fetcher, &NoopReporter, &add(MANIFEST_URL)).unwrap());

        assert_eq!(result.component_name, "email-validator");
        assert_eq!(result.files_installed, 1);
        assert_eq!(result.dependencies_added, 1);
        assert_eq!(result.install_path, PathBuf::from("src/utils"));
        assert!(project.read("src/utils/validator.py").starts_with("def validate"));
        assert_eq!(project.read("requirements.txt"), "validators\n");

        let config = project.config();
        assert_eq!(
            config.component("email-validator").unwrap(),
            &InstalledComponent {
                name: "email-validator".into(),
                version: "1.0.0".into(),
                category: "utils".into(),
                source: MANIFEST_URL.into(),
                dependencies: vec!["validators".into()],
            }
        );
        assert_eq!(config.dependencies, vec!["validators"]);
    }

    #[test]
    fn reinstall_with_overwrite_is_idempotent() {
        let project = TestProject::initialized();
        let fetcher = FakeFetcher::new().with_body(MANIFEST_URL, EMAIL_VALIDATOR);
        let options = AddOptions { overwrite: true, ..add(MANIFEST_URL) };

        execute(&project.ctx, &fetcher, &NoopReporter, &options).unwrap();
        let second = installed(execute(&project.ctx, &fetcher, &NoopReporter, &options).unwrap());

        assert_eq!(second.dependencies_added, 0);
        assert_eq!(second.plan.steps[0].action, WriteAction::Overwrite);
        let config = project.config();
        assert_eq!(config.components.len(), 1);
        assert_eq!(config.dependencies, vec!["validators"]);
        assert_eq!(project.read("requirements.txt"), "validators\n");
    }

    #[test]
    fn existing_file_without_overwrite_aborts_before_any_write() {
        let project = TestProject::initialized();
        project.write("src/utils/validator.py", "original");
        let manifest = r#"{"name":"pair","version":"1.0.0","category":"utils","files":[
            {"name":"fresh.py","path":"fresh.py","content":"new"},
            {"name":"validator.py","path":"validator.py","content":"replacement"}
        ]}"#;
        let fetcher = FakeFetcher::new().with_body(MANIFEST_URL, manifest);

        let result = execute(&project.ctx, &fetcher, &NoopReporter, &add(MANIFEST_URL));

        match result {
            Err(AppError::Conflict { existing_paths }) => {
                assert_eq!(existing_paths, vec![PathBuf::from("src/utils/validator.py")])
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(project.read("src/utils/validator.py"), "original");
        assert!(!project.exists("src/utils/fresh.py"));
        assert!(project.config().components.is_empty());
    }

    #[test]
    fn dry_run_plans_the_same_paths_without_mutating_anything() {
        let project = TestProject::initialized();
        let fetcher = FakeFetcher::new().with_body(MANIFEST_URL, EMAIL_VALIDATOR);
        let before = project.config();

        let preview = execute(
            &project.ctx,
            &fetcher,
            &NoopReporter,
            &AddOptions { dry_run: true, ..add(MANIFEST_URL) },
        )
        .unwrap();

        assert!(matches!(preview, AddOutcome::Previewed(_)));
        assert!(!project.exists("src"));
        assert!(!project.exists("requirements.txt"));
        assert_eq!(project.config(), before);

        let real = execute(&project.ctx, &fetcher, &NoopReporter, &add(MANIFEST_URL)).unwrap();
        let preview_paths: Vec<_> = preview.plan().paths().collect();
        let real_paths: Vec<_> = real.plan().paths().collect();
        assert_eq!(preview_paths, real_paths);
    }

    #[test]
    fn relative_content_urls_resolve_against_the_manifest() {
        let project = TestProject::initialized();
        let manifest = r#"{"name":"jwt-auth","version":"1.0.0","category":"auth","files":[
            {"name":"jwt_handler.py","path":"jwt_handler.py","content_url":"jwt_handler.py"},
            {"name":"middleware.py","path":"middleware.py","url":"https://cdn.example.org/mw.py"}
        ]}"#;
        let fetcher = FakeFetcher::new()
            .with_body(MANIFEST_URL, manifest)
            .with_body("https://example.com/components/email-validator/jwt_handler.py", "handler")
            .with_body("https://cdn.example.org/mw.py", "middleware");
        let reporter = RecordingReporter::new();

        execute(&project.ctx, &fetcher, &reporter, &add(MANIFEST_URL)).unwrap();

        assert_eq!(project.read("src/auth/jwt_handler.py"), "handler");
        assert_eq!(project.read("src/auth/middleware.py"), "middleware");
        assert_eq!(fetcher.requests().len(), 3);
        let fetched = reporter
            .events()
            .iter()
            .filter(|event| matches!(event, InstallEvent::FileFetched { .. }))
            .count();
        assert_eq!(fetched, 2);
    }

    #[test]
    fn failed_content_fetch_leaves_project_untouched() {
        let project = TestProject::initialized();
        let manifest = r#"{"name":"x","version":"1.0.0","files":[
            {"name":"a.py","path":"a.py","content":"a"},
            {"name":"b.py","path":"b.py","content_url":"b.py"}
        ]}"#;
        let fetcher = FakeFetcher::new()
            .with_body(MANIFEST_URL, manifest)
            .with_failure("https://example.com/components/email-validator/b.py", Some(500));

        let result = execute(&project.ctx, &fetcher, &NoopReporter, &add(MANIFEST_URL));

        assert!(matches!(result, Err(AppError::Fetch { status: Some(500), .. })));
        assert!(!project.exists("src"));
        assert!(project.config().components.is_empty());
    }

    #[test]
    fn tree_url_fetches_rewritten_manifest() {
        let project = TestProject::initialized();
        let raw = "https://raw.githubusercontent.com/acme/parts/main/email-validator/component.json";
        let fetcher = FakeFetcher::new().with_body(raw, EMAIL_VALIDATOR);
        let tree = "https://github.com/acme/parts/tree/main/email-validator";

        execute(&project.ctx, &fetcher, &NoopReporter, &add(tree)).unwrap();

        assert_eq!(fetcher.requests(), vec![raw.to_string()]);
        assert_eq!(project.config().component("email-validator").unwrap().source, tree);
    }

    #[test]
    fn override_path_places_files_flat() {
        let project = TestProject::initialized();
        let fetcher = FakeFetcher::new().with_body(MANIFEST_URL, EMAIL_VALIDATOR);

        let result = installed(
            execute(
                &project.ctx,
                &fetcher,
                &NoopReporter,
                &AddOptions { path: Some(PathBuf::from("lib/validation")), ..add(MANIFEST_URL) },
            )
            .unwrap(),
        );

        assert_eq!(result.install_path, PathBuf::from("lib/validation"));
        assert!(project.exists("lib/validation/validator.py"));
    }

    #[test]
    fn uninitialized_project_requires_yes() {
        let project = TestProject::new();
        let fetcher = FakeFetcher::new().with_body(MANIFEST_URL, EMAIL_VALIDATOR);

        let result = execute(&project.ctx, &fetcher, &NoopReporter, &add(MANIFEST_URL));
        assert!(matches!(result, Err(AppError::ProjectNotInitialized)));
        assert!(fetcher.requests().is_empty());

        execute(&project.ctx, &fetcher, &NoopReporter, &AddOptions { yes: true, ..add(MANIFEST_URL) })
            .unwrap();
        assert!(project.read(".gitignore").contains(".zen/cache/"));
        assert!(project.config().components.contains_key("email-validator"));
    }

    #[test]
    fn dry_run_with_yes_does_not_initialize() {
        let project = TestProject::new();
        let fetcher = FakeFetcher::new().with_body(MANIFEST_URL, EMAIL_VALIDATOR);

        execute(
            &project.ctx,
            &fetcher,
            &NoopReporter,
            &AddOptions { yes: true, dry_run: true, ..add(MANIFEST_URL) },
        )
        .unwrap();

        assert!(!project.exists(".zen"));
    }

    #[test]
    fn invalid_manifest_reports_offending_field() {
        let project = TestProject::initialized();
        let fetcher = FakeFetcher::new()
            .with_body(MANIFEST_URL, r#"{"name":"x","version":"1.0.0","files":[]}"#);

        match execute(&project.ctx, &fetcher, &NoopReporter, &add(MANIFEST_URL)) {
            Err(AppError::Manifest(err @ ManifestError::Invalid(_))) => {
                assert_eq!(err.field(), Some("files"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn constraint_collisions_are_kept_and_reported() {
        let project = TestProject::initialized();
        project.write("requirements.txt", "requests>=2.25");
        let mut config = project.config();
        config.merge_dependencies(&["requests>=2.25".to_string()]);
        project.ctx.config().save(&config).unwrap();

        let manifest = r#"{"name":"legacy","version":"1.0.0","dependencies":["requests<2.0"],
            "files":[{"name":"a.py","path":"a.py","content":"import requests\n"}]}"#;
        let fetcher = FakeFetcher::new().with_body(MANIFEST_URL, manifest);

        let result =
            installed(execute(&project.ctx, &fetcher, &NoopReporter, &add(MANIFEST_URL)).unwrap());

        assert_eq!(
            result.constraint_collisions,
            vec![ConstraintCollision {
                package: "requests".into(),
                existing: "requests>=2.25".into(),
                incoming: "requests<2.0".into(),
            }]
        );
        assert_eq!(project.read("requirements.txt"), "requests>=2.25\nrequests<2.0\n");
    }

    #[test]
    fn progress_events_follow_pipeline_order() {
        let project = TestProject::initialized();
        let fetcher = FakeFetcher::new().with_body(MANIFEST_URL, EMAIL_VALIDATOR);
        let reporter = RecordingReporter::new();

        execute(&project.ctx, &fetcher, &reporter, &add(MANIFEST_URL)).unwrap();

        let events = reporter.events();
        assert!(matches!(events.first(), Some(InstallEvent::SourceClassified { .. })));
        assert!(matches!(events.get(1), Some(InstallEvent::ManifestFetched { files: 1, .. })));
        assert!(events.iter().any(|e| matches!(e, InstallEvent::FileWritten { .. })));
        assert_eq!(
            events.last(),
            Some(&InstallEvent::ConfigSaved { component: "email-validator".into() })
        );
    }
}
