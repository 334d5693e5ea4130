//! Application state shared across request handlers.

use crate::service::ChangeService;

/// Shared state, cloned per request.
///
/// Everything inside is read-only after startup: the pinned TLS connector
/// and the breach client are constructed once and never mutated, so
/// unsynchronized concurrent reads are safe.
#[derive(Clone)]
pub struct AppState {
    /// Orchestrates validation and the directory transaction.
    pub service: ChangeService,
}

impl AppState {
    #[must_use]
    pub fn new(service: ChangeService) -> Self {
        Self { service }
    }
}
