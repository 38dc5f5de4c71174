//! Error taxonomy for Maxoptra API operations.
//!
//! Every failure surfaces to the caller as a distinct variant; nothing is
//! retried or swallowed internally. Provider-originated text is sanitized
//! before it lands in a variant, and transport-level detail is deliberately
//! replaced with a fixed message so socket internals never reach callers.

use thiserror::Error;
use xml_codec::CodecError;

/// Type alias for results that can return an [`ApiError`]
pub type Result<T> = std::result::Result<T, ApiError>;

/// Failures raised by client construction, authentication, and order submission
#[derive(Debug, Error)]
pub enum ApiError {
    /// Construction input was unusable (missing key or credentials, bad URL)
    #[error("configuration error: {0}")]
    Config(String),

    /// The request tree could not be encoded, or the response was not XML
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The authentication endpoint answered with a non-200 status
    #[error("authentication failed: HTTP {status} {reason}")]
    AuthHttp {
        /// Numeric HTTP status
        status: u16,
        /// Reason phrase from the status line
        reason: String,
    },

    /// The provider rejected the credentials; carries sanitized provider text
    #[error("authentication rejected: {0}")]
    AuthProvider(String),

    /// The authentication response had neither a session ID nor an error
    #[error("authentication response contained neither a session ID nor an error")]
    AuthFormat,

    /// The order endpoint answered with a non-200 status
    #[error("HTTP {status} {reason}")]
    HttpStatus {
        /// Numeric HTTP status
        status: u16,
        /// Reason phrase from the status line
        reason: String,
    },

    /// Network-level failure; the message is intentionally generic
    #[error("something went wrong communicating with Maxoptra")]
    Transport,

    /// The provider rejected the order; the display text is exactly the
    /// sanitized provider message
    #[error("{0}")]
    Order(String),

    /// The response matched neither the success shape nor any known error shape
    #[error("unable to create order; check credentials and connectivity")]
    UnexpectedResponse,

    /// The caller-supplied order was not a usable request
    #[error("invalid order request: {0}")]
    InvalidRequest(String),
}
