//! Generic tree to XML codec for the Maxoptra wire dialect.
//!
//! The provider's request and response bodies are "XML as a map": element
//! names are keys, repeated siblings are sequences, leaf text is the value.
//! This crate provides the [`Value`] tree, the [`to_xml`]/[`from_xml`]
//! transforms between trees and documents, and a serde bridge ([`to_value`])
//! for building trees from typed structs.

mod codec;
mod error;
mod ser;
mod value;

pub use codec::{from_xml, to_xml, Document};
pub use error::CodecError;
pub use ser::to_value;
pub use value::{Map, Value};
