use palaver_room::{RoomConfig, RoomService};
use palaver_types::{AgentMetadata, SessionConfig};

const DEFAULT_URL: &str = "http://localhost:7880";
const DEFAULT_KEY: &str = "devkey";
const DEFAULT_SECRET: &str = "secret";

fn service() -> RoomService {
    RoomService::new(RoomConfig::new(DEFAULT_URL, DEFAULT_KEY, DEFAULT_SECRET))
}

#[tokio::test]
async fn test_generate_join_token() {
    let token = service()
        .generate_join_token("test-room", "user-123", "Test User", None)
        .expect("Failed to generate token");

    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_token_permissions_and_metadata() {
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
    use serde::Deserialize;

    let config = SessionConfig::default();
    let metadata =
        AgentMetadata::from_config(&config, "sk-test", "be a customer", "jwt-1").unwrap();
    let token = service()
        .generate_session_token("perm-room", "user-perm", "Perm User", &metadata)
        .expect("Failed to generate token");

    #[derive(Deserialize)]
    struct Claims {
        video: VideoClaims,
        metadata: String,
        sub: String,
    }

    #[derive(Deserialize)]
    struct VideoClaims {
        #[serde(rename = "canPublish")]
        can_publish: bool,
        #[serde(rename = "canSubscribe")]
        can_subscribe: bool,
        #[serde(rename = "roomJoin")]
        room_join: bool,
        room: String,
    }

    let validation = Validation::new(Algorithm::HS256);
    let key = DecodingKey::from_secret(DEFAULT_SECRET.as_bytes());
    let token_data = decode::<Claims>(&token, &key, &validation).expect("Failed to decode token");

    assert!(token_data.claims.video.can_publish, "canPublish should be true");
    assert!(
        token_data.claims.video.can_subscribe,
        "canSubscribe should be true"
    );
    assert!(token_data.claims.video.room_join, "roomJoin should be true");
    assert_eq!(token_data.claims.video.room, "perm-room");
    assert_eq!(token_data.claims.sub, "user-perm");

    // The metadata claim is the JSON the agent parses at join time.
    let parsed: serde_json::Value = serde_json::from_str(&token_data.claims.metadata).unwrap();
    assert_eq!(parsed["openai_api_key"], "sk-test");
    assert_eq!(parsed["instructions"], "be a customer");
    assert_eq!(parsed["jwtToken"], "jwt-1");
    assert_eq!(parsed["voice"], "alloy");
}

#[test]
fn test_disabled_without_url() {
    let service = RoomService::new(RoomConfig::default());
    assert!(!service.is_enabled());
    assert!(self::service().is_enabled());
}

#[test]
fn test_config_debug_redacts_secret() {
    let config = RoomConfig::new(DEFAULT_URL, DEFAULT_KEY, "hunter2-dont-log-me");
    let rendered = format!("{config:?}");
    assert!(rendered.contains("[REDACTED]"));
    assert!(!rendered.contains("hunter2-dont-log-me"));
}
