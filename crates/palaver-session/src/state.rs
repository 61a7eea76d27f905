//! Session state snapshot and the single update path.
//!
//! [`SessionState`] is an immutable value: [`reduce`] consumes an [`Action`]
//! and produces the next snapshot without touching the previous one. No code
//! in the workspace writes a state field directly; the reducer is the one
//! place invariants are enforced.

use palaver_types::{SessionConfig, TranscriptionEntry, TranscriptionSegment};

/// Keys gating whether a connection may be initiated.
///
/// Created empty at session start, held in memory for the life of the
/// session, and cleared on logout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// The key required to connect. `None` forces the auth prompt.
    pub api_key: Option<String>,
    /// Bearer token for the process backend.
    pub jwt_token: Option<String>,
}

impl Credentials {
    /// Whether a usable (non-blank) API key is present.
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

/// The connection lifecycle:
/// `Disconnected → Connecting → Connected → Disconnecting → Disconnected`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Disconnecting,
}

impl ConnectionState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Disconnecting => "disconnecting",
        }
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One aggregated transcript line plus the segment id it is keyed by.
///
/// The id lets a later segment of the same utterance replace the text in
/// place while the line keeps its original position and receive time.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptLine {
    pub segment_id: String,
    pub entry: TranscriptionEntry,
}

/// The complete session snapshot.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub credentials: Credentials,
    pub config: SessionConfig,
    /// System instructions seeding the agent. Connecting requires these to
    /// be non-blank.
    pub instructions: String,
    /// Instruction used for the end-of-session summary request.
    pub instructions_summary: String,
    /// Name of the selected process template, if any.
    pub selected_process: Option<String>,
    /// Result of the most recent summary RPC; cleared when a new connection
    /// attempt starts.
    pub summary: Option<String>,
    /// Ordered transcript of the current session.
    pub transcript: Vec<TranscriptLine>,
    /// Identity of the remote agent participant, once known.
    pub agent_identity: Option<String>,
    pub connection: ConnectionState,
    /// Whether the host should show the auth prompt.
    pub auth_prompt: bool,
    /// A connect was refused for lack of a key and should be retried once
    /// after the prompt completes.
    pub pending_connect: bool,
}

impl SessionState {
    /// The transcript as plain entries, in arrival order.
    pub fn transcript_entries(&self) -> Vec<TranscriptionEntry> {
        self.transcript.iter().map(|line| line.entry.clone()).collect()
    }
}

/// Every mutation of the session state.
#[derive(Debug, Clone)]
pub enum Action {
    SetApiKey(Option<String>),
    SetJwtToken(Option<String>),
    SetInstructions(String),
    SetInstructionsSummary(String),
    SetSessionConfig(SessionConfig),
    /// Copy a process template's instruction pair into the session.
    SelectProcess {
        name: String,
        instruction: String,
        summary_instruction: String,
    },
    ClearProcessSelection,
    SetSummary(String),
    ClearSummary,
    /// Insert or update a transcript line by segment id.
    UpsertSegment(TranscriptionSegment),
    ResetTranscript,
    SetAgentIdentity(Option<String>),
    SetConnection(ConnectionState),
    ShowAuthPrompt(bool),
    SetPendingConnect(bool),
    /// Clear the API key and re-prompt.
    Logout,
}

/// Produces the next snapshot for an action. Pure: the previous snapshot is
/// never modified.
pub fn reduce(state: &SessionState, action: Action) -> SessionState {
    let mut next = state.clone();
    match action {
        Action::SetApiKey(key) => next.credentials.api_key = key,
        Action::SetJwtToken(token) => next.credentials.jwt_token = token,
        Action::SetInstructions(text) => next.instructions = text,
        Action::SetInstructionsSummary(text) => next.instructions_summary = text,
        Action::SetSessionConfig(config) => next.config = config,
        Action::SelectProcess {
            name,
            instruction,
            summary_instruction,
        } => {
            next.instructions = instruction;
            next.instructions_summary = summary_instruction;
            next.selected_process = Some(name);
        }
        Action::ClearProcessSelection => {
            next.instructions.clear();
            next.instructions_summary.clear();
            next.selected_process = None;
        }
        Action::SetSummary(text) => next.summary = Some(text),
        Action::ClearSummary => next.summary = None,
        Action::UpsertSegment(segment) => upsert_segment(&mut next.transcript, segment),
        Action::ResetTranscript => next.transcript.clear(),
        Action::SetAgentIdentity(identity) => next.agent_identity = identity,
        Action::SetConnection(connection) => next.connection = connection,
        Action::ShowAuthPrompt(visible) => next.auth_prompt = visible,
        Action::SetPendingConnect(pending) => next.pending_connect = pending,
        Action::Logout => {
            next.credentials.api_key = None;
            next.auth_prompt = true;
        }
    }
    next
}

fn upsert_segment(transcript: &mut Vec<TranscriptLine>, segment: TranscriptionSegment) {
    if let Some(line) = transcript
        .iter_mut()
        .find(|line| line.segment_id == segment.id)
    {
        // Keep the original receive time; only the text advances.
        line.entry.text = segment.text;
        return;
    }
    transcript.push(TranscriptLine {
        segment_id: segment.id.clone(),
        entry: TranscriptionEntry {
            role: segment.role,
            first_received_time: segment.first_received_time,
            text: segment.text,
        },
    });
}
