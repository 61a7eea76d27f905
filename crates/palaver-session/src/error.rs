//! Error types for the session core.
//!
//! Remote-call failures are returned as values so the host decides whether
//! to surface them; nothing in this crate panics on a failed call.

use std::time::Duration;
use thiserror::Error;

/// An error reported by the external room transport.
///
/// Transports are external collaborators, so their failures arrive as
/// opaque messages rather than a taxonomy this crate would have to track.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors from a unary RPC to the agent.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The request payload could not be encoded.
    #[error("failed to encode rpc payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// The transport rejected or failed the call.
    #[error("rpc transport error: {0}")]
    Transport(#[from] TransportError),

    /// The call did not settle within the configured deadline.
    #[error("rpc timed out after {0:?}")]
    Timeout(Duration),

    /// The agent replied with something the caller could not decode.
    #[error("malformed rpc reply: {0}")]
    Reply(#[source] serde_json::Error),
}

/// Errors surfaced by the session controller.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The room-join operation failed; the session is back to disconnected
    /// and may be retried by the user.
    #[error("room connect failed: {0}")]
    Connect(#[source] TransportError),

    /// The agent metadata for this session could not be serialized.
    #[error("failed to serialize agent metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    /// An on-demand RPC (config push) failed.
    #[error(transparent)]
    Rpc(#[from] RpcError),
}
