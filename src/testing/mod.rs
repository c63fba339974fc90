mod fake_fetcher;
mod recording_reporter;
mod test_project;

pub use fake_fetcher::FakeFetcher;
pub use recording_reporter::RecordingReporter;
pub use test_project::TestProject;
