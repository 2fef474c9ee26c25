//! Async client for the petition API.
//!
//! # Design
//! `RoiClient` holds the API root and a shared `HttpTransport`; it keeps no
//! other state between calls. Every operation goes through the same routine:
//! `build_request` produces a plain `HttpRequest`, the transport executes it,
//! and `parse_response` sanitizes and decodes the body. Both halves are public
//! so callers with their own I/O can drive the client without a transport.
//!
//! HTTP status codes are not interpreted: the service reports failures in the
//! JSON envelope, which `parse_response` turns into `RoiError::Api`.

use std::fmt;
use std::sync::{Arc, LazyLock};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::{normalize_root, ClientConfig};
use crate::endpoint::Endpoint;
use crate::envelope::Envelope;
use crate::error::{snippet_at, RoiError};
use crate::http::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::sanitize::sanitize;
use crate::types::{IdTitle, ListPetition, Petition};

static DEFAULT_CLIENT: LazyLock<RoiClient> = LazyLock::new(RoiClient::new);

/// Process-wide client with default settings.
///
/// Built on first use and kept until the process exits. Prefer an explicit
/// `RoiClient` when the transport or API root needs to differ.
///
/// The underlying `reqwest::Client` keeps its connection pool on the tokio
/// runtime that first drives a request. Use this client from a single
/// long-lived runtime; code that creates several runtimes in one process
/// (such as separate `#[tokio::test]` functions) should build its own
/// `RoiClient` per runtime, or requests may fail with "dispatch task is gone".
pub fn default_client() -> &'static RoiClient {
    &DEFAULT_CLIENT
}

/// Client for the petition API.
///
/// Cloning is cheap and clones share the transport. The transport is released
/// when the last clone is dropped.
#[derive(Clone)]
pub struct RoiClient {
    api_root: String,
    transport: Arc<dyn HttpTransport>,
}

impl fmt::Debug for RoiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoiClient")
            .field("api_root", &self.api_root)
            .finish_non_exhaustive()
    }
}

impl Default for RoiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RoiClient {
    /// Client for the public API using a default `reqwest` transport.
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::new())
    }

    /// Client for the public API using the given transport.
    pub fn with_transport(transport: impl HttpTransport + 'static) -> Self {
        Self::from_config_with_transport(ClientConfig::default(), transport)
    }

    /// Client with a `reqwest` transport built from `config`.
    pub fn from_config(config: ClientConfig) -> Result<Self, RoiError> {
        let transport =
            ReqwestTransport::from_config(&config).map_err(|source| RoiError::Transport {
                url: config.api_root.clone(),
                source,
            })?;
        Ok(Self::from_config_with_transport(config, transport))
    }

    pub fn from_config_with_transport(
        config: ClientConfig,
        transport: impl HttpTransport + 'static,
    ) -> Self {
        Self {
            api_root: normalize_root(&config.api_root),
            transport: Arc::new(transport),
        }
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Petition statuses.
    pub async fn status(&self) -> Result<Vec<IdTitle>, RoiError> {
        self.execute(Endpoint::Status).await
    }

    /// Petition levels.
    pub async fn level(&self) -> Result<Vec<IdTitle>, RoiError> {
        self.execute(Endpoint::Level).await
    }

    /// Archived petitions.
    pub async fn archive(&self) -> Result<Vec<ListPetition>, RoiError> {
        self.execute(Endpoint::Archive).await
    }

    /// Petitions with a commission verdict.
    pub async fn complete(&self) -> Result<Vec<ListPetition>, RoiError> {
        self.execute(Endpoint::Complete).await
    }

    /// Petitions under advisement. May be empty.
    pub async fn advisement(&self) -> Result<Vec<ListPetition>, RoiError> {
        self.execute(Endpoint::Advisement).await
    }

    /// Petitions currently open for voting.
    pub async fn poll(&self) -> Result<Vec<ListPetition>, RoiError> {
        self.execute(Endpoint::Poll).await
    }

    /// Full record of one petition.
    ///
    /// An unknown id is reported by the service as an ordinary API error.
    pub async fn petition(&self, id: u64) -> Result<Petition, RoiError> {
        self.execute(Endpoint::Petition(id)).await
    }

    pub fn build_request(&self, endpoint: &Endpoint) -> HttpRequest {
        HttpRequest {
            url: format!("{}{}", self.api_root, endpoint.path()),
            headers: Vec::new(),
        }
    }

    /// Sanitize and decode a response for `endpoint`.
    pub fn parse_response<T>(
        &self,
        endpoint: &Endpoint,
        response: HttpResponse,
    ) -> Result<T, RoiError>
    where
        T: DeserializeOwned + Default,
    {
        if !response.is_success() {
            warn!(%endpoint, status = response.status, "unexpected status, decoding body anyway");
        }

        let body = sanitize(response.body);
        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|source| {
            debug!(%endpoint, error = %source, "failed to decode response");
            RoiError::Decode {
                path: endpoint.path(),
                snippet: snippet_at(&body, source.column()),
                source,
            }
        })?;

        envelope.into_result().inspect_err(|e| {
            debug!(%endpoint, error = %e, "service reported an error");
        })
    }

    async fn execute<T>(&self, endpoint: Endpoint) -> Result<T, RoiError>
    where
        T: DeserializeOwned + Default,
    {
        let request = self.build_request(&endpoint);
        let url = request.url.clone();
        debug!(%url, "sending request");

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|source| RoiError::Transport { url, source })?;

        self.parse_response(&endpoint, response)
    }
}
