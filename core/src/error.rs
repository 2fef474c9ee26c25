//! Error types for the petition API client.
//!
//! # Design
//! A call either returns its typed payload or fails with exactly one
//! `RoiError` kind. `Api` carries the service's own code and text untouched;
//! `Transport` and `Decode` keep the underlying error as their `source()`.

use thiserror::Error;

/// Characters of body context kept on each side of a decode failure.
const SNIPPET_RADIUS: usize = 40;

/// Errors returned by `RoiClient` operations.
#[derive(Debug, Error)]
pub enum RoiError {
    /// The HTTP exchange itself failed (connect, DNS, TLS, timeout, body read).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },

    /// The sanitized body is not valid JSON or does not match the expected shape.
    #[error("failed to decode {path}: {source} (near `{snippet}`)")]
    Decode {
        path: String,
        snippet: String,
        #[source]
        source: serde_json::Error,
    },

    /// The service answered with a populated `error` field.
    #[error("API error {code}: {text}")]
    Api { code: i64, text: String },
}

impl RoiError {
    /// Service error code, if this is an API error.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            RoiError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_api(&self) -> bool {
        matches!(self, RoiError::Api { .. })
    }
}

/// Failure reported by an `HttpTransport`.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Slice of `body` around the 1-based `column` reported by serde_json.
pub(crate) fn snippet_at(body: &str, column: usize) -> String {
    let at = column.saturating_sub(1).min(body.len());
    let mut start = at.saturating_sub(SNIPPET_RADIUS);
    while !body.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = at.saturating_add(SNIPPET_RADIUS).min(body.len());
    while !body.is_char_boundary(end) {
        end += 1;
    }
    body[start..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn snippet_is_centered_on_column() {
        let body = format!("{}X{}", "a".repeat(100), "b".repeat(100));
        let snippet = snippet_at(&body, 101);
        assert_eq!(snippet.len(), 2 * SNIPPET_RADIUS);
        assert!(snippet.contains('X'));
    }

    #[test]
    fn snippet_clamps_to_body() {
        assert_eq!(snippet_at("{}", 0), "{}");
        assert_eq!(snippet_at("{}", 500), "{}");
    }

    #[test]
    fn snippet_respects_char_boundaries() {
        let body = "ж".repeat(60);
        let snippet = snippet_at(&body, 41);
        assert!(snippet.chars().all(|c| c == 'ж'));
    }

    #[test]
    fn api_error_exposes_code() {
        let err = RoiError::Api {
            code: 404,
            text: "not found".to_string(),
        };
        assert_eq!(err.api_code(), Some(404));
        assert!(err.is_api());
        assert_eq!(err.to_string(), "API error 404: not found");
    }

    #[test]
    fn transport_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = RoiError::Transport {
            url: "http://localhost/api/".to_string(),
            source: TransportError::with_source("request failed", io),
        };
        assert_eq!(err.api_code(), None);
        let transport = err.source().unwrap();
        assert_eq!(transport.to_string(), "request failed");
        assert_eq!(transport.source().unwrap().to_string(), "refused");
    }
}
