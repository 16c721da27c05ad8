//! Shared application state injected into every handler.

use std::sync::Arc;

use mothersaid_api::ApiClient;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            api: ApiClient::new(config.api_base_url.clone()),
        }
    }
}

pub type SharedState = Arc<AppState>;
