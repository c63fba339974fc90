mod config_store;
mod progress_reporter;
mod project_filesystem;
mod scaffold_store;
mod source_fetcher;

pub use config_store::ConfigStore;
pub use progress_reporter::{NoopReporter, ProgressReporter};
pub use project_filesystem::ProjectFilesystem;
pub use scaffold_store::{ScaffoldFile, ScaffoldStore};
pub use source_fetcher::SourceFetcher;
