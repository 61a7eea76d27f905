//! Unary RPC calls to the agent: the summary request and the live config
//! push. Both are single-shot — no retry, no streaming — and run under the
//! caller's deadline so a stalled agent cannot hold up teardown forever.

use crate::error::RpcError;
use crate::transport::{RoomTransport, RpcRequest};
use palaver_types::{SummaryRequest, TranscriptionEntry, RPC_METHOD_GET_SUMMARY, RPC_METHOD_UPDATE_CONFIG};
use serde::Deserialize;
use std::time::Duration;

/// The agent's reply to a config push.
#[derive(Debug, Deserialize)]
struct UpdateConfigReply {
    changed: bool,
}

/// Sends the transcript and summary instruction to the agent and returns the
/// summary text verbatim.
///
/// Entries with blank text are excluded from the payload. The response is an
/// opaque string; no schema validation is performed on it.
pub async fn request_summary<T: RoomTransport>(
    transport: &T,
    agent_identity: &str,
    summary_instruction: &str,
    entries: &[TranscriptionEntry],
    timeout: Duration,
) -> Result<String, RpcError> {
    let request = SummaryRequest::from_transcript(summary_instruction, entries);
    let payload = serde_json::to_string(&request).map_err(RpcError::Encode)?;

    tracing::debug!(
        agent = agent_identity,
        entries = request.transcriptions_array.len(),
        "requesting conversation summary"
    );

    call(
        transport,
        RpcRequest {
            destination_identity: agent_identity.to_string(),
            method: RPC_METHOD_GET_SUMMARY.to_string(),
            payload,
        },
        timeout,
    )
    .await
}

/// Pushes updated agent metadata to a live session and reports whether the
/// agent applied a change.
pub async fn push_config<T: RoomTransport>(
    transport: &T,
    agent_identity: &str,
    metadata_json: String,
    timeout: Duration,
) -> Result<bool, RpcError> {
    let response = call(
        transport,
        RpcRequest {
            destination_identity: agent_identity.to_string(),
            method: RPC_METHOD_UPDATE_CONFIG.to_string(),
            payload: metadata_json,
        },
        timeout,
    )
    .await?;

    let reply: UpdateConfigReply = serde_json::from_str(&response).map_err(RpcError::Reply)?;
    Ok(reply.changed)
}

async fn call<T: RoomTransport>(
    transport: &T,
    request: RpcRequest,
    timeout: Duration,
) -> Result<String, RpcError> {
    match tokio::time::timeout(timeout, transport.perform_rpc(request)).await {
        Ok(Ok(response)) => Ok(response),
        Ok(Err(err)) => Err(RpcError::Transport(err)),
        Err(_) => Err(RpcError::Timeout(timeout)),
    }
}
