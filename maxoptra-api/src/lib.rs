//! Blocking Rust client for the Maxoptra distribution API.
//!
//! Maxoptra speaks XML over HTTP: an `apiRequest` envelope carrying either
//! a static API key or a session token plus one delivery order, answered by
//! an `apiResponse` that is either a created order or one of a few error
//! shapes. This crate does the request/response translation and collapses
//! the provider's error shapes into one typed taxonomy; the low-level
//! tree↔XML work lives in the private `xml-codec` crate.
//!
//! ```no_run
//! use maxoptra_api::{Map, MaxoptraClient, Value};
//!
//! fn main() -> maxoptra_api::Result<()> {
//!     let client = MaxoptraClient::with_api_key("your-api-key")?;
//!
//!     let mut order = Map::new();
//!     order.insert("orderReference", "REF-001");
//!     order.insert("date", "2014-02-21");
//!
//!     let created = client.submit_delivery(&Value::Map(order))?;
//!     println!("order id: {:?}", created.get("id"));
//!     Ok(())
//! }
//! ```
//!
//! The session-authenticated variant exchanges account credentials for a
//! token once, at construction, and uses it for the client's lifetime:
//!
//! ```no_run
//! use maxoptra_api::MaxoptraClient;
//!
//! # fn main() -> maxoptra_api::Result<()> {
//! let client = MaxoptraClient::with_credentials("account", "user", "password")?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod transport;

mod classify;

pub use auth::AuthMode;
pub use client::MaxoptraClient;
pub use endpoint::{
    ClientConfig, DEFAULT_API_VERSION, DEFAULT_KEY_REST_URL, DEFAULT_SESSION_REST_URL,
};
pub use error::{ApiError, Result};
pub use transport::{HttpResponse, Transport, TransportFailure, UreqTransport};

pub use xml_codec::{to_value, CodecError, Map, Value};
