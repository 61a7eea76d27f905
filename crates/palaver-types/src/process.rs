//! Process templates: named, preconfigured agent instruction sets fetched
//! from the backend catalog. Immutable once fetched; selecting one copies its
//! instruction pair into the session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A published process template as returned by the backend.
///
/// `config` is serialized JSON; its `aiTalkConfig` object carries the
/// instruction pair used to seed a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessTemplate {
    pub name: String,
    pub config: String,
}

/// The instruction pair embedded in a process template's config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiTalkConfig {
    pub instruction: String,
    #[serde(rename = "summaryInstruction")]
    pub summary_instruction: String,
}

/// Errors parsing a process template's embedded config.
#[derive(Debug, Error)]
pub enum ProcessConfigError {
    #[error("process config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("process config has no aiTalkConfig object")]
    MissingAiTalkConfig,
}

impl ProcessTemplate {
    /// Extracts the `aiTalkConfig` instruction pair from the serialized
    /// config.
    pub fn parse_ai_talk_config(&self) -> Result<AiTalkConfig, ProcessConfigError> {
        let value: serde_json::Value = serde_json::from_str(&self.config)?;
        let talk = value
            .get("aiTalkConfig")
            .ok_or(ProcessConfigError::MissingAiTalkConfig)?;
        Ok(serde_json::from_value(talk.clone())?)
    }
}
