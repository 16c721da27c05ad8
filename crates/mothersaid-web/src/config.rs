//! Environment-driven server configuration, loaded after `dotenvy`.

use std::env;

use mothersaid_common::error::{Result, SchoolError};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the server binds to (`BIND_ADDR`).
    pub bind_addr: String,
    /// Base URL of the school REST API (`SCHOOL_API_URL`).
    pub api_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| {
            tracing::info!("BIND_ADDR not set, using default: {DEFAULT_BIND_ADDR}");
            DEFAULT_BIND_ADDR.to_string()
        });
        let api_base_url = env::var(mothersaid_api::client::BASE_URL_ENV).map_err(|_| {
            SchoolError::Config(format!(
                "{} is not set; the portal cannot reach the school API",
                mothersaid_api::client::BASE_URL_ENV
            ))
        })?;
        Ok(Self {
            bind_addr,
            api_base_url,
        })
    }
}
