//! The order client: one delivery submission per call.
//!
//! `submit_delivery` runs the whole translation pipeline: validate the
//! caller's tree, wrap it in the request envelope, encode to XML, POST,
//! then decode and classify the reply. Each call is one blocking HTTP
//! round trip; the only state a client carries between calls is its
//! authentication value, fixed at construction.

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};
use xml_codec::{from_xml, to_value, to_xml, Map, Value};

use crate::auth::{create_session, AuthMode};
use crate::classify::{classify, Classification};
use crate::endpoint::{ClientConfig, Endpoints};
use crate::error::{ApiError, Result};
use crate::transport::{Transport, UreqTransport};

const ORDER_HEADERS: [(&str, &str); 2] = [
    ("Accept", "application/xml"),
    ("Content-Type", "application/xml; charset=UTF-8"),
];

// The resolved authentication value carried in every envelope.
enum AuthValue {
    ApiKey(String),
    SessionId(String),
}

impl AuthValue {
    fn envelope_field(&self) -> (&'static str, &str) {
        match self {
            AuthValue::ApiKey(key) => ("apiKey", key),
            AuthValue::SessionId(token) => ("sessionID", token),
        }
    }
}

/// A client for creating delivery orders with Maxoptra.
///
/// Construct one instance per authentication context and reuse it
/// sequentially; concurrent calls on one instance are not supported.
pub struct MaxoptraClient {
    transport: Box<dyn Transport>,
    endpoints: Endpoints,
    auth: AuthValue,
}

impl MaxoptraClient {
    /// Client for the key-authenticated API, pointed at the live provider.
    pub fn with_api_key(key: impl Into<String>) -> Result<Self> {
        let mode = AuthMode::ApiKey(key.into());
        let config = ClientConfig::default_for(&mode);
        Self::configured(mode, config, Box::new(UreqTransport::new()))
    }

    /// Client for the session-authenticated API, pointed at the live
    /// provider. Exchanges the credentials for a session token before
    /// returning; the token is kept for the client's lifetime.
    pub fn with_credentials(
        account: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let mode = AuthMode::Session {
            account: account.into(),
            username: username.into(),
            password: password.into(),
        };
        let config = ClientConfig::default_for(&mode);
        Self::configured(mode, config, Box::new(UreqTransport::new()))
    }

    /// Fully parameterized construction: authentication mode, endpoint
    /// config, and transport. This is the injection point for tests and for
    /// applications that proxy or re-host the provider.
    pub fn configured(
        mode: AuthMode,
        config: ClientConfig,
        transport: Box<dyn Transport>,
    ) -> Result<Self> {
        mode.validate()?;
        let endpoints = Endpoints::resolve(&config, &mode)?;

        let auth = match mode {
            AuthMode::ApiKey(key) => AuthValue::ApiKey(key),
            AuthMode::Session {
                account,
                username,
                password,
            } => {
                let url = endpoints
                    .create_session_url()
                    .ok_or_else(|| ApiError::Config("no session endpoint resolved".to_owned()))?;
                let token =
                    create_session(transport.as_ref(), url, &account, &username, &password)?;
                AuthValue::SessionId(token)
            }
        };

        Ok(Self {
            transport,
            endpoints,
            auth,
        })
    }

    /// Create a delivery order.
    ///
    /// `order` must be a non-empty map of the provider's order fields. On
    /// success, returns the provider's `orders.order` subtree — status
    /// `"Created"` plus provider-assigned fields such as the order id.
    pub fn submit_delivery(&self, order: &Value) -> Result<Value> {
        match order.as_map() {
            None => {
                return Err(ApiError::InvalidRequest(
                    "order must be a map of request fields".to_owned(),
                ))
            }
            Some(map) if map.is_empty() => {
                return Err(ApiError::InvalidRequest(
                    "order must not be empty".to_owned(),
                ))
            }
            Some(_) => {}
        }

        let xml = to_xml("apiRequest", &Value::Map(self.envelope(order)))?;

        let url = self.endpoints.order_save_url();
        debug!(%url, "submitting delivery order");
        let response = self
            .transport
            .post(url, Some(&xml), &ORDER_HEADERS)
            .map_err(|failure| {
                debug!(detail = %failure, "transport failure during order submission");
                ApiError::Transport
            })?;

        if response.status != 200 {
            warn!(status = response.status, "order endpoint returned non-success status");
            return Err(ApiError::HttpStatus {
                status: response.status,
                reason: response.reason,
            });
        }

        let document = from_xml(&response.body)?;
        if document.root_name != "apiResponse" {
            return Err(ApiError::UnexpectedResponse);
        }

        match classify(&document.root) {
            Classification::Success(created) => {
                debug!("order created");
                Ok(created)
            }
            Classification::ProviderError(message) => Err(ApiError::Order(message)),
            Classification::Unrecognized => Err(ApiError::UnexpectedResponse),
        }
    }

    /// Convert a serializable order into a tree and submit it.
    pub fn submit_delivery_as<T: Serialize>(&self, order: &T) -> Result<Value> {
        let tree = to_value(order)?;
        self.submit_delivery(&tree)
    }

    // apiKey or sessionID first, then the single-order `orders` block.
    fn envelope(&self, order: &Value) -> Map {
        let mut body = Map::new();
        let (field, value) = self.auth.envelope_field();
        body.insert(field, value);

        let mut orders = Map::new();
        orders.insert("order", order.clone());
        body.insert("orders", orders);
        body
    }
}

impl fmt::Debug for MaxoptraClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let auth = match self.auth {
            AuthValue::ApiKey(_) => "apiKey",
            AuthValue::SessionId(_) => "sessionID",
        };
        f.debug_struct("MaxoptraClient")
            .field("endpoints", &self.endpoints)
            .field("auth", &auth)
            .finish_non_exhaustive()
    }
}
