//! Error types for the Isbaşı client.
//!
//! # Design
//! Each variant names the stage that failed, so callers can branch on kind:
//! encoding the request, moving bytes over the network, decoding the reply, or
//! the server flagging the envelope as an error. A flagged login envelope gets
//! its own `Authentication` variant; any other flagged envelope is `Api`.
//! Nothing is retried or swallowed.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IsbasiError>;

#[derive(Debug, Error)]
pub enum IsbasiError {
    /// The request body could not be serialized to JSON.
    #[error("failed to encode request body: {0}")]
    Encoding(String),

    /// Connection, DNS or TLS failure, or any other I/O error on the wire.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The request deadline expired before the round trip completed.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The response body was not JSON or did not match the expected schema.
    #[error("failed to decode response: {0}")]
    Decoding(String),

    /// The login envelope came back with its error flag set.
    #[error("login failed: {message}")]
    Authentication { code: i32, message: String },

    /// A resource envelope came back with its error flag set.
    #[error("API error {code}: {message}")]
    Api { code: i32, message: String },

    /// Client configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl IsbasiError {
    /// Envelope code for errors reported by the server.
    pub fn code(&self) -> Option<i32> {
        match self {
            IsbasiError::Authentication { code, .. } | IsbasiError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Server-supplied failure message for errors reported by the server.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            IsbasiError::Authentication { message, .. } | IsbasiError::Api { message, .. } => {
                Some(message)
            }
            _ => None,
        }
    }
}
