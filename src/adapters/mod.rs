pub mod console_reporter;
pub mod embedded_scaffold_store;
pub mod filesystem;
pub mod http_fetcher;

pub use console_reporter::ConsoleReporter;
pub use embedded_scaffold_store::EmbeddedScaffoldStore;
pub use filesystem::FilesystemStore;
pub use http_fetcher::HttpSourceFetcher;
