use std::sync::Arc;

use crate::config::Config;
use crate::matching::encoder::Encoder;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Sentence-embedding encoder. Loaded once at startup, read-only afterwards.
    pub encoder: Arc<dyn Encoder>,
}
