//! Endpoint composition for the two provider API variants.
//!
//! The key-authenticated API versions its order path; the
//! session-authenticated API hangs both the authentication and order paths
//! off one REST root. A client resolves its URLs once, at construction.

use url::Url;

use crate::auth::AuthMode;
use crate::error::{ApiError, Result};

/// Live REST root for the key-authenticated distribution API.
pub const DEFAULT_KEY_REST_URL: &str = "http://live.maxoptra.com:80/rest/distribution-api";

/// Live REST root for the session-authenticated API.
pub const DEFAULT_SESSION_REST_URL: &str = "http://live.maxoptra.com:80/rest";

/// Provider API version used in key-mode order paths.
pub const DEFAULT_API_VERSION: &str = "1";

/// Where the client sends its requests.
///
/// Values are supplied by the surrounding application; the defaults point at
/// the live provider, which has no sandbox.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// REST root, without a trailing path for a specific operation
    pub rest_url: String,
    /// Provider API version segment (key-authenticated API only)
    pub api_version: String,
}

impl ClientConfig {
    /// Config pointing at a custom REST root with the default API version.
    pub fn new(rest_url: impl Into<String>) -> Self {
        Self {
            rest_url: rest_url.into(),
            api_version: DEFAULT_API_VERSION.to_owned(),
        }
    }

    /// The live-provider config for the given authentication mode.
    pub fn default_for(mode: &AuthMode) -> Self {
        match mode {
            AuthMode::ApiKey(_) => Self::new(DEFAULT_KEY_REST_URL),
            AuthMode::Session { .. } => Self::new(DEFAULT_SESSION_REST_URL),
        }
    }
}

/// Resolved request URLs for one client instance.
#[derive(Debug, Clone)]
pub(crate) struct Endpoints {
    order_save_url: String,
    create_session_url: Option<String>,
}

impl Endpoints {
    pub(crate) fn resolve(config: &ClientConfig, mode: &AuthMode) -> Result<Self> {
        Url::parse(&config.rest_url).map_err(|e| {
            ApiError::Config(format!("invalid REST URL '{}': {}", config.rest_url, e))
        })?;
        let rest = config.rest_url.trim_end_matches('/');

        match mode {
            AuthMode::ApiKey(_) => {
                if config.api_version.trim().is_empty() {
                    return Err(ApiError::Config("API version must not be empty".to_owned()));
                }
                Ok(Endpoints {
                    order_save_url: format!("{rest}/{}/orders/save", config.api_version),
                    create_session_url: None,
                })
            }
            AuthMode::Session { .. } => Ok(Endpoints {
                order_save_url: format!("{rest}/distribution-api/orders/save"),
                create_session_url: Some(format!("{rest}/authentication/createSession")),
            }),
        }
    }

    pub(crate) fn order_save_url(&self) -> &str {
        &self.order_save_url
    }

    pub(crate) fn create_session_url(&self) -> Option<&str> {
        self.create_session_url.as_deref()
    }
}
