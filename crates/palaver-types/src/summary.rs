//! Wire format of the `pg.getSummary` RPC payload.
//!
//! The payload is a single JSON object:
//! `{"summaryInstruction": string, "transcriptionsArray":
//! [{"key": "Bot"|"Human", "value": {"firstReceivedTime": number,
//! "text": string}}]}`. The response is an opaque string stored verbatim.

use crate::transcript::{ParticipantRole, TranscriptionEntry};
use serde::{Deserialize, Serialize};

/// The unary summary request sent to the agent on teardown (or on demand).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    #[serde(rename = "summaryInstruction")]
    pub summary_instruction: String,
    #[serde(rename = "transcriptionsArray")]
    pub transcriptions_array: Vec<SummaryEntry>,
}

/// One transcript line of the summary payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub key: ParticipantRole,
    pub value: SummaryEntryValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryEntryValue {
    #[serde(rename = "firstReceivedTime")]
    pub first_received_time: u64,
    pub text: String,
}

impl SummaryRequest {
    /// Builds the payload from the summary instruction and the ordered
    /// transcript, dropping entries whose trimmed text is empty.
    pub fn from_transcript(instruction: &str, entries: &[TranscriptionEntry]) -> Self {
        let transcriptions_array = entries
            .iter()
            .filter(|entry| entry.has_text())
            .map(|entry| SummaryEntry {
                key: entry.role,
                value: SummaryEntryValue {
                    first_received_time: entry.first_received_time,
                    text: entry.text.clone(),
                },
            })
            .collect();

        Self {
            summary_instruction: instruction.to_string(),
            transcriptions_array,
        }
    }
}
