//! Error types for the protocol client.

use std::io;

/// Result type alias used throughout the IRC layer.
pub type Result<T> = std::result::Result<T, IrcError>;

/// Errors surfaced synchronously to callers of the protocol client.
///
/// A remote `ERROR` line is not represented here: the read loop treats it as
/// a session event and reports it through the [`Observer`](super::Observer).
#[derive(Debug, thiserror::Error)]
pub enum IrcError {
    /// Address resolution or the TCP handshake failed.
    #[error("failed to connect to {address}: {source}")]
    Dial {
        address: String,
        #[source]
        source: io::Error,
    },

    /// A command argument violates a wire-format constraint.
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    /// The transport failed while a line was being written.
    #[error("write failed: {0}")]
    Write(#[source] io::Error),

    /// The connection was already closed.
    #[error("connection closed")]
    Closed,

    /// One step of the login sequence could not be sent.
    #[error("login failed while sending {step}: {source}")]
    Login {
        step: &'static str,
        #[source]
        source: Box<IrcError>,
    },
}

impl IrcError {
    pub(crate) fn validation(field: &'static str, reason: &'static str) -> Self {
        IrcError::Validation { field, reason }
    }

    pub(crate) fn login(step: &'static str, source: IrcError) -> Self {
        IrcError::Login {
            step,
            source: Box::new(source),
        }
    }
}
