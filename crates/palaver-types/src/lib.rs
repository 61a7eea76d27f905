//! Shared types and wire formats for the Palaver speech-to-speech playground.
//!
//! This crate provides the foundational types used across all palaver crates:
//! session configuration (model, voice, turn detection, VAD tuning), the
//! participant metadata the remote agent reads at join time, transcription
//! segments and their aggregated entries, process templates fetched from the
//! backend catalog, and the summary RPC wire format.
//!
//! No crate in the workspace depends on anything *except* `palaver-types` for
//! cross-cutting type definitions. This keeps the dependency graph clean and
//! prevents circular dependencies.

pub mod process;
pub mod session;
pub mod summary;
pub mod transcript;

pub use process::{AiTalkConfig, ProcessConfigError, ProcessTemplate};
pub use session::{
    AgentMetadata, ConfigError, Modalities, ModelId, SessionConfig, TranscriptionModelId,
    TurnDetectionMode, VoiceId,
};
pub use summary::{SummaryEntry, SummaryEntryValue, SummaryRequest};
pub use transcript::{ParticipantRole, TranscriptionEntry, TranscriptionSegment};

/// RPC method the agent registers for conversation summaries.
pub const RPC_METHOD_GET_SUMMARY: &str = "pg.getSummary";

/// RPC method the agent registers for live session-config updates.
pub const RPC_METHOD_UPDATE_CONFIG: &str = "pg.updateConfig";
