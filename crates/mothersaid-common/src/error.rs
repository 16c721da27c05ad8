use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchoolError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the school API. `detail` carries the
    /// server-supplied message when the body had one.
    #[error("API rejected the request ({status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    #[error("Not authenticated: {0}")]
    Auth(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SchoolError {
    /// True when the upstream told us the credential is missing or stale,
    /// in which case portal handlers bounce back to the login page.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_) | Self::Api { status: 401, .. })
    }

    /// Message suitable for a flash banner. Prefers the API `detail`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Validation(msg) => msg.clone(),
            _ => fallback.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SchoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_detail_wins_over_fallback() {
        let err = SchoolError::Api {
            status: 409,
            detail: Some("Admission number already registered".to_string()),
        };
        assert_eq!(
            err.user_message("Registration failed"),
            "Admission number already registered"
        );
    }

    #[test]
    fn fallback_used_without_detail() {
        let err = SchoolError::Api {
            status: 500,
            detail: None,
        };
        assert_eq!(err.user_message("Registration failed"), "Registration failed");
    }

    #[test]
    fn unauthorized_is_auth() {
        assert!(SchoolError::Api {
            status: 401,
            detail: None
        }
        .is_auth());
        assert!(!SchoolError::Api {
            status: 404,
            detail: None
        }
        .is_auth());
        assert!(SchoolError::Auth("missing token".to_string()).is_auth());
    }
}
