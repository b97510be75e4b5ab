//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Rendering is stateless, so the only shared data is the immutable
//! service configuration.

use std::sync::Arc;

use crate::config::ReturnConfig;

/// Clone is required by Axum; the config is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ReturnConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ReturnConfig) -> Self {
        Self { config: Arc::new(config) }
    }
}
