//! Transcription segments and their aggregated entries.
//!
//! The transport streams [`TranscriptionSegment`]s keyed by participant; a
//! segment id is stable for the lifetime of one utterance, and later segments
//! with the same id carry the updated text. The session aggregates them into
//! ordered [`TranscriptionEntry`]s for display and for the summary payload.

use serde::{Deserialize, Serialize};

/// Who produced a transcription: the local human or the remote agent.
///
/// The wire spellings are exactly `"Human"` and `"Bot"` — they appear as the
/// `key` of every summary payload entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantRole {
    Human,
    Bot,
}

impl ParticipantRole {
    /// Returns the canonical wire label for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Human => "Human",
            Self::Bot => "Bot",
        }
    }
}

impl std::fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of live speech-to-text output, as delivered by the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionSegment {
    /// Stable id for the utterance this segment belongs to.
    pub id: String,
    /// Role of the participant the segment is attributed to.
    pub role: ParticipantRole,
    /// Milliseconds since Unix epoch when the first segment of this
    /// utterance was received.
    pub first_received_time: u64,
    /// Current text of the utterance (replaces earlier text for the same id).
    pub text: String,
    /// Whether the transcription of this utterance is final.
    pub is_final: bool,
}

/// An aggregated transcript line: the latest text for one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionEntry {
    pub role: ParticipantRole,
    pub first_received_time: u64,
    pub text: String,
}

impl TranscriptionEntry {
    /// Whether this entry carries any non-whitespace text.
    ///
    /// Blank entries are kept for display ordering but excluded from the
    /// summary payload.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}
