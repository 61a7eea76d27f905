//! Headless playground binary.
//!
//! Loads configuration (file + `PALAVER_*` environment overrides), reads an
//! optional launch link, fetches the published process catalog, and mints the
//! connection details (room name + join token) a client needs to start a
//! speech-to-speech session. The room itself — audio, agent, transcription —
//! is joined by the client holding these details, not by this binary.

mod config;
mod launch;

use launch::LaunchParams;
use palaver_catalog::CatalogClient;
use palaver_room::RoomService;
use palaver_session::{Action, SessionStore};
use palaver_types::AgentMetadata;
use serde_json::json;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("PALAVER_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

fn resolve_launch_link() -> Option<String> {
    std::env::args()
        .nth(2)
        .or_else(|| std::env::var("PALAVER_LAUNCH_URL").ok())
        .filter(|value| !value.trim().is_empty())
}

#[tokio::main]
async fn main() {
    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("config.toml"));

    // Load configuration
    let mut config = config::load_config(selected_config_path)
        .expect("failed to load configuration — cannot start without valid config");

    // Initialize tracing
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        "resolved startup configuration path"
    );

    // A launch link overrides the file configuration.
    let mut preset = None;
    if let Some(link) = resolve_launch_link() {
        match LaunchParams::from_link(&link) {
            Ok(params) => {
                if let Some(base_url) = params.backend_url {
                    config.backend.base_url = base_url;
                }
                if let Some(jwt) = params.jwt_token {
                    config.backend.jwt_token = jwt;
                }
                preset = params.preset;
            }
            Err(err) => {
                tracing::warn!(error = %err, link, "ignoring malformed launch link");
            }
        }
    }

    let store = SessionStore::default();
    store.dispatch(Action::SetJwtToken(Some(config.backend.jwt_token.clone())));
    if let Ok(api_key) = std::env::var("PALAVER_OPENAI_API_KEY") {
        store.dispatch(Action::SetApiKey(Some(api_key)));
    }

    // Fetch the published process catalog; on failure the catalog stays
    // empty and the session keeps whatever instructions it already has.
    let catalog = CatalogClient::new();
    match catalog
        .fetch_published(&config.backend.base_url, &config.backend.jwt_token)
        .await
    {
        Ok(Some(templates)) => {
            for template in &templates {
                match template.parse_ai_talk_config() {
                    Ok(talk) => tracing::info!(
                        name = %template.name,
                        instruction_len = talk.instruction.len(),
                        "process template available"
                    ),
                    Err(err) => tracing::warn!(
                        name = %template.name,
                        error = %err,
                        "process template has an unreadable config"
                    ),
                }
            }
            if let Some(wanted) = preset.as_deref() {
                match templates.iter().find(|t| t.name == wanted) {
                    Some(template) => match template.parse_ai_talk_config() {
                        Ok(talk) => {
                            store.dispatch(Action::SelectProcess {
                                name: template.name.clone(),
                                instruction: talk.instruction,
                                summary_instruction: talk.summary_instruction,
                            });
                            tracing::info!(name = wanted, "selected preset process");
                        }
                        Err(err) => {
                            tracing::warn!(name = wanted, error = %err, "preset config unreadable")
                        }
                    },
                    None => tracing::warn!(name = wanted, "preset not found in catalog"),
                }
            }
        }
        Ok(None) => tracing::info!("catalog not configured; continuing without processes"),
        Err(err) => tracing::error!(error = %err, "catalog fetch failed; catalog stays empty"),
    }

    // Mint connection details for one session.
    let rooms = RoomService::new(config.livekit.room_config());
    if !rooms.is_enabled() {
        tracing::info!("livekit not configured; no connection details to mint");
        return;
    }

    let state = store.snapshot();
    let metadata = AgentMetadata::from_config(
        &state.config,
        state.credentials.api_key.as_deref().unwrap_or_default(),
        &state.instructions,
        state.credentials.jwt_token.as_deref().unwrap_or_default(),
    )
    .expect("metadata serialization cannot fail for default config");

    let room_name = format!("palaver-{}", Uuid::new_v4());
    match rooms.generate_session_token(&room_name, "human-1", "Playground User", &metadata) {
        Ok(token) => {
            let details = json!({
                "ws_url": rooms.get_url(),
                "room_name": room_name,
                "token": token,
            });
            println!("{details}");
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to mint a join token");
            std::process::exit(1);
        }
    }
}
