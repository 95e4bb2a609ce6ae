//! The `{code, message, isError, data}` wrapper around every API reply.

use serde::{Deserialize, Serialize};

/// Uniform response wrapper returned by every endpoint.
///
/// When `is_error` is true, `message` explains the failure and `data` holds
/// nothing meaningful. Operations in this crate never hand such an envelope
/// back to the caller; they turn it into an error instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Envelope<T> {
    pub code: i32,
    pub message: String,
    pub is_error: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn into_data(self) -> T {
        self.data
    }
}
