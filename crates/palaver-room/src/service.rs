use crate::config::RoomConfig;
use crate::error::RoomError;
use livekit_api::access_token::{AccessToken, VideoGrants};
use palaver_types::AgentMetadata;
use std::time::Duration;

#[derive(Debug)]
pub struct RoomService {
    config: RoomConfig,
}

impl RoomService {
    pub fn new(config: RoomConfig) -> Self {
        Self { config }
    }

    pub fn is_enabled(&self) -> bool {
        !self.config.url.is_empty()
    }

    pub fn get_url(&self) -> &str {
        &self.config.url
    }

    /// Mints a join token for one participant.
    ///
    /// When `metadata` is given it becomes the participant metadata claim —
    /// the agent worker parses it at join time to seed the session, so the
    /// caller passes the serialized [`AgentMetadata`] here.
    pub fn generate_join_token(
        &self,
        room_name: &str,
        participant_identity: &str,
        participant_name: &str,
        metadata: Option<&str>,
    ) -> Result<String, RoomError> {
        let mut token = AccessToken::with_api_key(&self.config.api_key, &self.config.api_secret)
            .with_identity(participant_identity)
            .with_name(participant_name)
            .with_grants(VideoGrants {
                room_join: true,
                room: room_name.to_string(),
                can_publish: true,
                can_subscribe: true,
                can_publish_data: true,
                ..Default::default()
            })
            .with_ttl(Duration::from_secs(self.config.token_ttl_seconds));

        if let Some(metadata) = metadata {
            token = token.with_metadata(metadata);
        }

        token.to_jwt().map_err(RoomError::LiveKit)
    }

    /// Convenience: serializes the metadata and mints a session join token
    /// in one step.
    pub fn generate_session_token(
        &self,
        room_name: &str,
        participant_identity: &str,
        participant_name: &str,
        metadata: &AgentMetadata,
    ) -> Result<String, RoomError> {
        let serialized = serde_json::to_string(metadata)?;
        self.generate_join_token(
            room_name,
            participant_identity,
            participant_name,
            Some(&serialized),
        )
    }
}
