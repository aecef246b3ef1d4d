//! Error taxonomy.
//!
//! Soft, per-command failures never appear here: they are encoded as
//! `ResultRecord { success: false }` and only influence the aggregate flag.
//! These types cover hard failures, which abort the remaining batch and are
//! converted into an error envelope at the dispatch boundary.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Failure reported by a host capability.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("{capability} capability failed: {message}")]
    Capability { capability: String, message: String },

    #[error("capability '{0}' is not available on this host")]
    Unavailable(String),
}

impl HostError {
    pub fn capability(capability: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Capability {
            capability: capability.into(),
            message: message.to_string(),
        }
    }
}

/// Hard failure during dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// An endpoint answered with a non-success status; `body` preserves the
    /// response payload for the top-level error field.
    #[error("endpoint returned status {status}")]
    Endpoint { status: u16, body: Value },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// Script compilation or execution threw.
    #[error("script execution failed: {0}")]
    Script(String),

    #[error(transparent)]
    Host(#[from] HostError),
}

impl DispatchError {
    pub fn transport(error: impl fmt::Display) -> Self {
        Self::Transport(error.to_string())
    }

    pub fn script(error: impl fmt::Display) -> Self {
        Self::Script(error.to_string())
    }

    /// The value surfaced as the envelope's top-level `error` field: the
    /// endpoint's response body when one exists, the error message otherwise.
    pub fn payload(&self) -> Value {
        match self {
            Self::Endpoint { body, .. } if !body.is_null() => body.clone(),
            other => Value::String(other.to_string()),
        }
    }
}
