//! Application state and shared resources.

use std::sync::Arc;

use portcullis::Captcha;

use crate::config::AppConfig;

/// Shared application state
///
/// The captcha engine is stateless, so this is nothing more than the
/// configuration and one immutable engine instance shared by all
/// handlers. There is no session store to connect to and nothing to
/// clean up on shutdown.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Stateless captcha engine
    pub captcha: Arc<Captcha>,
}

impl AppState {
    /// Create new application state from configuration
    pub fn new(config: AppConfig) -> Self {
        let captcha = Arc::new(Captcha::new(config.captcha.engine_config()));
        Self { config, captcha }
    }
}
