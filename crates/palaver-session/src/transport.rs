//! The seam to the external real-time room.
//!
//! The actual WebRTC room — audio tracks, voice activity detection, the agent
//! worker — lives entirely outside this crate. A [`RoomTransport`] only has
//! to join, leave, and carry one unary RPC; incoming transcription and
//! participant changes are pumped into the controller as [`RoomEvent`]s by
//! whoever owns the platform's event stream.

use crate::error::TransportError;
use palaver_types::{SessionConfig, TranscriptionSegment};

/// Everything a transport needs to join the room for one session.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub config: SessionConfig,
    pub instructions: String,
    /// Serialized [`palaver_types::AgentMetadata`], published as the local
    /// participant's metadata so the agent can seed itself from it.
    pub metadata: String,
}

/// A unary request/response call addressed to one participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcRequest {
    pub destination_identity: String,
    pub method: String,
    pub payload: String,
}

/// Events the room delivers while a session is live.
#[derive(Debug, Clone)]
pub enum RoomEvent {
    /// The agent participant joined and is addressable under `identity`.
    AgentConnected { identity: String },
    /// The agent participant left.
    AgentDisconnected,
    /// A live transcription segment for some participant.
    Segment(TranscriptionSegment),
    /// The room connection ended remotely.
    Disconnected,
}

/// The external room/session transport.
pub trait RoomTransport: Send + Sync {
    /// Joins the room. Resolves once the local participant is connected.
    fn connect(
        &self,
        options: &ConnectOptions,
    ) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;

    /// Leaves the room.
    fn disconnect(&self) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;

    /// Issues one unary RPC and resolves with the raw response string.
    ///
    /// No retry and no deadline here; callers own the timeout policy.
    fn perform_rpc(
        &self,
        request: RpcRequest,
    ) -> impl std::future::Future<Output = Result<String, TransportError>> + Send;
}
