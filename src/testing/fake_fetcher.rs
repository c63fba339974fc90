use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::{AppError, Location};
use crate::ports::SourceFetcher;

/// In-memory fetcher keyed by the location's display form.
///
/// Unknown locations fail like a 404 so tests notice unexpected fetches.
#[derive(Default)]
pub struct FakeFetcher {
    bodies: HashMap<String, Vec<u8>>,
    failures: HashMap<String, Option<u16>>,
    pub requested: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, location: &str, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(location.to_string(), body.into());
        self
    }

    pub fn with_failure(mut self, location: &str, status: Option<u16>) -> Self {
        self.failures.insert(location.to_string(), status);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl SourceFetcher for FakeFetcher {
    fn fetch(&self, location: &Location) -> Result<Vec<u8>, AppError> {
        let key = location.to_string();
        self.requested.lock().unwrap().push(key.clone());

        if let Some(status) = self.failures.get(&key) {
            return Err(AppError::fetch_error(key, "simulated failure", *status));
        }
        self.bodies
            .get(&key)
            .cloned()
            .ok_or_else(|| AppError::fetch_error(key, "Not Found", Some(404)))
    }
}
