//! Session configuration and the participant metadata handed to the agent.
//!
//! Every closed set (model, voice, modalities, turn detection) is a Rust enum
//! with its wire spelling pinned by serde renames, so an out-of-enumeration
//! value cannot be constructed or deserialized. Numeric tuning values are
//! checked by [`SessionConfig::validate`].

use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Realtime model identifiers accepted by the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModelId {
    #[default]
    #[serde(rename = "gpt-4o-realtime-preview")]
    Gpt4oRealtime,
    #[serde(rename = "gpt-4o-mini-realtime-preview")]
    Gpt4oMiniRealtime,
}

/// Transcription model used for speech-to-text of the user's audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TranscriptionModelId {
    #[default]
    #[serde(rename = "whisper-1")]
    Whisper1,
}

/// How the remote side decides that the user finished a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnDetectionMode {
    /// Server-side voice activity detection (threshold/silence/padding below).
    #[default]
    ServerVad,
    /// No automatic turn detection; turns are committed manually.
    None,
}

/// Response modalities requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modalities {
    #[default]
    TextAndAudio,
    TextOnly,
}

/// Synthesis voice identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceId {
    #[default]
    Alloy,
    Ash,
    Ballad,
    Coral,
    Echo,
    Sage,
    Shimmer,
    Verse,
}

/// A session configuration record, edited by the user and read once when
/// connecting to seed the remote agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub model: ModelId,
    pub transcription_model: TranscriptionModelId,
    pub turn_detection: TurnDetectionMode,
    pub modalities: Modalities,
    pub voice: VoiceId,
    /// Sampling temperature. Valid range 0.6..=1.2.
    pub temperature: f32,
    /// Response token cap. `None` means unbounded (wire value `"inf"`).
    pub max_output_tokens: Option<u32>,
    /// VAD activation threshold. Valid range 0.0..=1.0.
    pub vad_threshold: f32,
    /// Silence duration (ms) that ends a turn under server VAD.
    pub vad_silence_duration_ms: u32,
    /// Audio (ms) kept before detected speech under server VAD.
    pub vad_prefix_padding_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model: ModelId::default(),
            transcription_model: TranscriptionModelId::default(),
            turn_detection: TurnDetectionMode::default(),
            modalities: Modalities::default(),
            voice: VoiceId::default(),
            temperature: 0.8,
            max_output_tokens: None,
            vad_threshold: 0.5,
            vad_silence_duration_ms: 200,
            vad_prefix_padding_ms: 300,
        }
    }
}

impl SessionConfig {
    /// Checks the numeric tuning values against their documented ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.6..=1.2).contains(&self.temperature) {
            return Err(ConfigError::TemperatureOutOfRange(self.temperature));
        }
        if !(0.0..=1.0).contains(&self.vad_threshold) {
            return Err(ConfigError::VadThresholdOutOfRange(self.vad_threshold));
        }
        Ok(())
    }
}

/// Errors produced by [`SessionConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("temperature {0} outside valid range 0.6..=1.2")]
    TemperatureOutOfRange(f32),

    #[error("VAD threshold {0} outside valid range 0.0..=1.0")]
    VadThresholdOutOfRange(f32),
}

/// Server VAD tuning as the agent expects it: a JSON object that is itself
/// JSON-encoded into a string field of the participant metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerVadOptions {
    pub threshold: f32,
    pub prefix_padding_ms: u32,
    pub silence_duration_ms: u32,
}

/// The participant metadata payload the remote agent parses at join time.
///
/// Field names and value shapes match the agent's session parser exactly:
/// `max_output_tokens` is a number or the literal string `"inf"`, and
/// `turn_detection` is a JSON-encoded string (not a nested object).
#[derive(Debug, Clone, Serialize)]
pub struct AgentMetadata {
    pub openai_api_key: String,
    pub instructions: String,
    pub voice: VoiceId,
    pub temperature: f32,
    #[serde(serialize_with = "serialize_token_cap")]
    pub max_output_tokens: Option<u32>,
    pub modalities: Modalities,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn_detection: Option<String>,
    #[serde(rename = "jwtToken")]
    pub jwt_token: String,
}

impl AgentMetadata {
    /// Builds the metadata for a session, JSON-encoding the VAD options into
    /// the string-valued `turn_detection` field when server VAD is active.
    pub fn from_config(
        config: &SessionConfig,
        api_key: &str,
        instructions: &str,
        jwt_token: &str,
    ) -> Result<Self, serde_json::Error> {
        let turn_detection = match config.turn_detection {
            TurnDetectionMode::ServerVad => Some(serde_json::to_string(&ServerVadOptions {
                threshold: config.vad_threshold,
                prefix_padding_ms: config.vad_prefix_padding_ms,
                silence_duration_ms: config.vad_silence_duration_ms,
            })?),
            TurnDetectionMode::None => None,
        };

        Ok(Self {
            openai_api_key: api_key.to_string(),
            instructions: instructions.to_string(),
            voice: config.voice,
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            modalities: config.modalities,
            turn_detection,
            jwt_token: jwt_token.to_string(),
        })
    }
}

fn serialize_token_cap<S: Serializer>(cap: &Option<u32>, ser: S) -> Result<S::Ok, S::Error> {
    match cap {
        Some(n) => ser.serialize_u32(*n),
        None => ser.serialize_str("inf"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.temperature, 0.8);
        assert_eq!(config.max_output_tokens, None);
        assert_eq!(config.vad_silence_duration_ms, 200);
        assert_eq!(config.vad_prefix_padding_ms, 300);
    }

    #[test]
    fn enum_wire_spellings() {
        assert_eq!(
            serde_json::to_string(&ModelId::Gpt4oRealtime).unwrap(),
            "\"gpt-4o-realtime-preview\""
        );
        assert_eq!(
            serde_json::to_string(&TranscriptionModelId::Whisper1).unwrap(),
            "\"whisper-1\""
        );
        assert_eq!(
            serde_json::to_string(&TurnDetectionMode::ServerVad).unwrap(),
            "\"server_vad\""
        );
        assert_eq!(
            serde_json::to_string(&Modalities::TextAndAudio).unwrap(),
            "\"text_and_audio\""
        );
        assert_eq!(serde_json::to_string(&VoiceId::Alloy).unwrap(), "\"alloy\"");
    }

    #[test]
    fn out_of_range_temperature_rejected() {
        let config = SessionConfig {
            temperature: 1.5,
            ..SessionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TemperatureOutOfRange(_))
        ));
    }

    #[test]
    fn metadata_matches_agent_parser() {
        let config = SessionConfig::default();
        let metadata = AgentMetadata::from_config(&config, "sk-test", "be friendly", "jwt-1")
            .expect("metadata should serialize");
        let value = serde_json::to_value(&metadata).unwrap();

        assert_eq!(value["openai_api_key"], "sk-test");
        assert_eq!(value["instructions"], "be friendly");
        assert_eq!(value["voice"], "alloy");
        assert_eq!(value["modalities"], "text_and_audio");
        assert_eq!(value["max_output_tokens"], "inf");
        assert_eq!(value["jwtToken"], "jwt-1");

        // turn_detection is a string holding JSON, not a nested object.
        let vad: ServerVadOptions =
            serde_json::from_str(value["turn_detection"].as_str().unwrap()).unwrap();
        assert_eq!(vad.threshold, 0.5);
        assert_eq!(vad.prefix_padding_ms, 300);
        assert_eq!(vad.silence_duration_ms, 200);
    }

    #[test]
    fn metadata_bounded_token_cap_is_numeric() {
        let config = SessionConfig {
            max_output_tokens: Some(2048),
            turn_detection: TurnDetectionMode::None,
            ..SessionConfig::default()
        };
        let metadata = AgentMetadata::from_config(&config, "k", "i", "").unwrap();
        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value["max_output_tokens"], 2048);
        assert!(value.get("turn_detection").is_none());
    }
}
