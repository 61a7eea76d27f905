use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoomError {
    #[error("LiveKit API error: {0}")]
    LiveKit(#[from] livekit_api::access_token::AccessTokenError),

    #[error("Metadata serialization error: {0}")]
    Metadata(#[from] serde_json::Error),
}
