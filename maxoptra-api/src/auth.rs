//! Authentication modes and the session exchange.
//!
//! A client authenticates either with a static API key carried in every
//! envelope, or by exchanging account credentials for a session token once
//! at construction. The token is then used for the client's lifetime; the
//! wire format exposes no expiry signal, so there is no renewal.

use std::fmt;

use tracing::debug;
use url::Url;
use xml_codec::{from_xml, Value};

use crate::classify::{sanitize, top_level_error};
use crate::error::{ApiError, Result};
use crate::transport::Transport;

/// How a client authenticates with the provider. Fixed at construction;
/// the two modes are never mixed on one instance.
#[derive(Clone)]
pub enum AuthMode {
    /// Static API key carried in every request envelope
    ApiKey(String),
    /// Account credentials exchanged once for a session token
    Session {
        /// Provider account identifier
        account: String,
        /// User name within the account
        username: String,
        /// User password
        password: String,
    },
}

impl AuthMode {
    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            AuthMode::ApiKey(key) if key.trim().is_empty() => Err(ApiError::Config(
                "do not construct a client without an API key".to_owned(),
            )),
            AuthMode::Session {
                account,
                username,
                password,
            } if [account, username, password]
                .iter()
                .any(|value| value.trim().is_empty()) =>
            {
                Err(ApiError::Config(
                    "account, username and password are all required".to_owned(),
                ))
            }
            _ => Ok(()),
        }
    }
}

// Secrets stay out of Debug output.
impl fmt::Debug for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::ApiKey(_) => f.debug_tuple("ApiKey").field(&"<redacted>").finish(),
            AuthMode::Session {
                account, username, ..
            } => f
                .debug_struct("Session")
                .field("account", account)
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

const AUTH_HEADERS: [(&str, &str); 1] = [("Accept", "application/xml")];

/// Exchange credentials for a session token.
///
/// POSTs to `createSession` with the credentials as query parameters and an
/// empty body. Runs exactly once, during credential-mode construction.
pub(crate) fn create_session(
    transport: &dyn Transport,
    create_session_url: &str,
    account: &str,
    username: &str,
    password: &str,
) -> Result<String> {
    let mut request_url = Url::parse(create_session_url)
        .map_err(|e| ApiError::Config(format!("invalid session URL: {e}")))?;
    request_url
        .query_pairs_mut()
        .append_pair("accountID", account)
        .append_pair("user", username)
        .append_pair("password", password);

    // The full URL carries the password; log only the endpoint.
    debug!(endpoint = create_session_url, account, "creating Maxoptra session");

    let response = transport
        .post(request_url.as_str(), None, &AUTH_HEADERS)
        .map_err(|failure| {
            debug!(detail = %failure, "transport failure during session creation");
            ApiError::Transport
        })?;

    if response.status != 200 {
        return Err(ApiError::AuthHttp {
            status: response.status,
            reason: response.reason,
        });
    }

    let document = from_xml(&response.body)?;
    if let Some(message) = top_level_error(&document.root) {
        return Err(ApiError::AuthProvider(sanitize(&message)));
    }

    let session_id = if document.root_name == "authResponse" {
        document
            .root
            .get("sessionID")
            .and_then(Value::as_text)
            .filter(|token| !token.is_empty())
    } else {
        None
    };

    match session_id {
        Some(token) => {
            debug!("Maxoptra session established");
            Ok(token.to_owned())
        }
        None => Err(ApiError::AuthFormat),
    }
}
