//! Async client for the roi.ru petition API.
//!
//! # Overview
//! `RoiClient` issues GET requests against the fixed set of read-only
//! endpoints, repairs the raw line breaks the service sometimes leaves inside
//! JSON strings, decodes the `{data, error}` envelope and returns typed
//! records. A populated `error` becomes `RoiError::Api`.
//!
//! # Design
//! - No retries, caching, pagination or authentication. Every failure is
//!   returned to the caller immediately.
//! - The network is reached through the `HttpTransport` trait so tests can
//!   point the client at a mock server or a stub.
//! - `build_request` / `parse_response` expose the pure halves of each call.
//! - Records are plain owned values; the client keeps no reference to them.

pub mod client;
pub mod config;
pub mod endpoint;
mod envelope;
pub mod error;
pub mod http;
pub mod sanitize;
pub mod types;

pub use client::{default_client, RoiClient};
pub use config::{ClientConfig, DEFAULT_API_ROOT};
pub use endpoint::Endpoint;
pub use error::{RoiError, TransportError};
pub use http::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportFuture};
pub use sanitize::sanitize;
pub use types::{Attachment, IdEntity, IdTitle, Identified, ListPetition, Petition, Titled, Vote};
