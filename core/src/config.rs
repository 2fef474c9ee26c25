//! Client configuration.
//!
//! Configuration is programmatic only. The defaults reproduce the plain
//! client: the public API root, the transport's own user agent and no timeout.

use std::time::Duration;

/// Root of the public petition API.
pub const DEFAULT_API_ROOT: &str = "https://www.roi.ru/api/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix every endpoint path is appended to. Always ends with `/`.
    pub api_root: String,
    /// Overrides the transport's `User-Agent` header.
    pub user_agent: Option<String>,
    /// Total request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            user_agent: None,
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn with_api_root(mut self, api_root: &str) -> Self {
        self.api_root = normalize_root(api_root);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Collapse trailing slashes into exactly one.
pub(crate) fn normalize_root(api_root: &str) -> String {
    format!("{}/", api_root.trim_end_matches('/'))
}
