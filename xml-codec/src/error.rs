//! Error types for the XML codec

use thiserror::Error;

/// Errors that can occur while translating between trees and XML
#[derive(Debug, Error)]
pub enum CodecError {
    /// The tree cannot be represented in the tag-per-key dialect
    #[error("XML encode error: {0}")]
    Encode(String),

    /// The response text is not well-formed XML
    #[error("XML decode error: {0}")]
    Decode(String),
}

impl serde::ser::Error for CodecError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        CodecError::Encode(msg.to_string())
    }
}
