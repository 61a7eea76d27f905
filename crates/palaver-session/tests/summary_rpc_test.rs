//! Payload-shaping tests for the summary RPC.

use palaver_session::{
    rpc, Action, ConnectionState, DisconnectOutcome, RoomEvent, RoomTransport, RpcRequest,
    SessionController, SummaryOutcome, TransportError,
};
use palaver_types::{ParticipantRole, TranscriptionEntry, TranscriptionSegment, RPC_METHOD_GET_SUMMARY};
use std::sync::Mutex;
use std::time::Duration;

/// Captures the last RPC request and replies from a script.
struct CapturingTransport {
    last_rpc: Mutex<Option<RpcRequest>>,
    rpc_error: Option<String>,
}

impl CapturingTransport {
    fn new() -> Self {
        Self {
            last_rpc: Mutex::new(None),
            rpc_error: None,
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            last_rpc: Mutex::new(None),
            rpc_error: Some(message.to_string()),
        }
    }

    fn last_rpc(&self) -> Option<RpcRequest> {
        self.last_rpc.lock().unwrap().clone()
    }
}

impl RoomTransport for CapturingTransport {
    async fn connect(
        &self,
        _options: &palaver_session::ConnectOptions,
    ) -> Result<(), TransportError> {
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), TransportError> {
        Ok(())
    }

    async fn perform_rpc(&self, request: RpcRequest) -> Result<String, TransportError> {
        *self.last_rpc.lock().unwrap() = Some(request);
        match &self.rpc_error {
            Some(message) => Err(TransportError::new(message.clone())),
            None => Ok("özet".to_string()),
        }
    }
}

fn entry(role: ParticipantRole, time: u64, text: &str) -> TranscriptionEntry {
    TranscriptionEntry {
        role,
        first_received_time: time,
        text: text.to_string(),
    }
}

#[tokio::test]
async fn payload_drops_blank_entries_and_keeps_order() {
    let transport = CapturingTransport::new();
    let entries = vec![
        entry(ParticipantRole::Human, 10, "hi"),
        entry(ParticipantRole::Bot, 20, ""),
        entry(ParticipantRole::Bot, 30, "hello"),
    ];

    let summary = rpc::request_summary(
        &transport,
        "agent-1",
        "summarize the call",
        &entries,
        Duration::from_secs(1),
    )
    .await
    .unwrap();
    assert_eq!(summary, "özet");

    let request = transport.last_rpc().expect("rpc expected");
    assert_eq!(request.method, RPC_METHOD_GET_SUMMARY);
    assert_eq!(request.destination_identity, "agent-1");

    let payload: serde_json::Value = serde_json::from_str(&request.payload).unwrap();
    assert_eq!(payload["summaryInstruction"], "summarize the call");
    let array = payload["transcriptionsArray"].as_array().unwrap();
    assert_eq!(array.len(), 2);
    assert_eq!(array[0]["key"], "Human");
    assert_eq!(array[0]["value"]["text"], "hi");
    assert_eq!(array[0]["value"]["firstReceivedTime"], 10);
    assert_eq!(array[1]["key"], "Bot");
    assert_eq!(array[1]["value"]["text"], "hello");
}

/// Human "hi" plus a blank Bot entry; the Bot line is dropped
/// from the payload and the session ends disconnected whether the RPC
/// succeeds or rejects.
#[tokio::test]
async fn disconnect_scenario_with_mixed_transcript() {
    for transport in [CapturingTransport::new(), CapturingTransport::failing("boom")] {
        let failing = transport.rpc_error.is_some();
        let controller = SessionController::new(transport);
        let store = controller.store();
        store.dispatch(Action::SetApiKey(Some("sk".to_string())));
        store.dispatch(Action::SetInstructions("talk".to_string()));
        controller.connect().await.unwrap();
        controller.handle_event(RoomEvent::AgentConnected {
            identity: "agent-1".to_string(),
        });
        controller.handle_event(RoomEvent::Segment(TranscriptionSegment {
            id: "s1".to_string(),
            role: ParticipantRole::Human,
            first_received_time: 1,
            text: "hi".to_string(),
            is_final: true,
        }));
        controller.handle_event(RoomEvent::Segment(TranscriptionSegment {
            id: "s2".to_string(),
            role: ParticipantRole::Bot,
            first_received_time: 2,
            text: "".to_string(),
            is_final: true,
        }));

        let outcome = controller.disconnect().await;
        match outcome {
            DisconnectOutcome::Completed { summary } => {
                if failing {
                    assert!(matches!(summary, SummaryOutcome::Failed(_)));
                } else {
                    assert!(matches!(summary, SummaryOutcome::Stored));
                }
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(controller.state().connection, ConnectionState::Disconnected);

        let request = controller.transport().last_rpc().expect("rpc expected");
        let payload: serde_json::Value = serde_json::from_str(&request.payload).unwrap();
        let array = payload["transcriptionsArray"].as_array().unwrap();
        assert_eq!(array.len(), 1, "the blank Bot entry must be dropped");
        assert_eq!(array[0]["key"], "Human");
        assert_eq!(array[0]["value"]["text"], "hi");
    }
}
