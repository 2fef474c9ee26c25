//! The `{data, error}` wrapper every endpoint responds with.

use serde::Deserialize;

use crate::error::RoiError;
use crate::types::null_as_default;

/// Wire-level response wrapper. Never exposed to callers.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: Option<T>,
    pub error: Option<ErrorBody>,
}

/// Error reported by the service inside the envelope.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorBody {
    pub code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
}

impl<T: Default> Envelope<T> {
    /// A populated `error` wins over any `data`; a missing `data` is the
    /// payload's default.
    pub fn into_result(self) -> Result<T, RoiError> {
        match self.error {
            Some(error) => Err(RoiError::Api {
                code: error.code,
                text: error.text,
            }),
            None => Ok(self.data.unwrap_or_default()),
        }
    }
}
