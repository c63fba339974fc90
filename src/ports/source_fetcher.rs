use crate::domain::{AppError, Location};

/// Port for retrieving manifest and file bytes.
pub trait SourceFetcher {
    /// Fetch raw bytes from `location` in a single attempt.
    ///
    /// Remote failures (transport error, timeout, non-success status) and
    /// missing local files surface as `AppError::Fetch`; implementations never
    /// retry.
    fn fetch(&self, location: &Location) -> Result<Vec<u8>, AppError>;
}
