//! The connection lifecycle controller.
//!
//! Owns the `Disconnected → Connecting → Connected → Disconnecting`
//! transitions, gated by the presence of an API key and non-blank
//! instructions. A refused connect is an outcome, not an error: the
//! controller raises the auth-prompt flag and retries exactly once when the
//! prompt completes. On disconnect it makes at most one summary request —
//! strictly before transport teardown — and never lets the request's failure
//! or timeout block the teardown. The same request is available on demand
//! while the session is live.

use crate::error::{RpcError, SessionError};
use crate::rpc;
use crate::state::{Action, ConnectionState, SessionState};
use crate::store::SessionStore;
use crate::transport::{ConnectOptions, RoomEvent, RoomTransport};
use palaver_types::AgentMetadata;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Tuning knobs for the controller.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Deadline for each unary RPC to the agent.
    pub rpc_timeout: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            rpc_timeout: Duration::from_secs(10),
        }
    }
}

/// Result of a connect attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// The room is joined and the session is live.
    Connected,
    /// Refused locally: no API key. The auth prompt is now visible and the
    /// connect will be retried once after [`SessionController::complete_auth`].
    AuthRequired,
    /// Refused locally: instructions are blank.
    MissingInstructions,
    /// A session is already connecting or connected; nothing was done.
    AlreadyActive,
}

/// What happened to the summary request during a disconnect.
#[derive(Debug)]
pub enum SummaryOutcome {
    /// The agent replied; the text is stored in the session state.
    Stored,
    /// No agent identity was known, so the request was skipped entirely.
    Skipped,
    /// The request failed or timed out; teardown proceeded regardless.
    Failed(RpcError),
}

/// Result of a disconnect.
#[derive(Debug)]
pub enum DisconnectOutcome {
    /// There was no connected session; nothing was done.
    NotConnected,
    /// The session was torn down and the state is `Disconnected` again.
    Completed { summary: SummaryOutcome },
}

/// Result of a live config push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPushOutcome {
    /// Not connected, or the agent is not addressable yet.
    Skipped,
    /// The agent accepted and applied the new configuration.
    Applied,
    /// The agent reported the configuration was already in effect.
    Unchanged,
}

pub struct SessionController<T: RoomTransport> {
    store: Arc<SessionStore>,
    transport: T,
    options: ControllerOptions,
    /// Serialises connect/disconnect. This is the programmatic equivalent of
    /// the disabled connect/disconnect button: lifecycle operations never
    /// interleave, while unrelated interaction stays responsive.
    lifecycle: Mutex<()>,
}

impl<T: RoomTransport> SessionController<T> {
    pub fn new(transport: T) -> Self {
        Self::with_options(transport, ControllerOptions::default())
    }

    pub fn with_options(transport: T, options: ControllerOptions) -> Self {
        Self {
            store: Arc::new(SessionStore::default()),
            transport,
            options,
            lifecycle: Mutex::new(()),
        }
    }

    /// The store backing this controller. Hosts dispatch their own edits
    /// (instructions, config, process selection) through it.
    pub fn store(&self) -> Arc<SessionStore> {
        self.store.clone()
    }

    /// The snapshot current right now.
    pub fn state(&self) -> Arc<SessionState> {
        self.store.snapshot()
    }

    /// The transport this controller drives.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Attempts to start a session.
    ///
    /// Preconditions are checked in order: an idle lifecycle, non-blank
    /// instructions, a present API key. A missing key is a refusal (the auth
    /// prompt is raised, the attempt is remembered), not an error. A
    /// transport failure reverts to `Disconnected` and is returned; it is
    /// never retried automatically.
    pub async fn connect(&self) -> Result<ConnectOutcome, SessionError> {
        let _gate = self.lifecycle.lock().await;

        let state = self.store.snapshot();
        if state.connection != ConnectionState::Disconnected {
            tracing::debug!(connection = %state.connection, "connect ignored; session already active");
            return Ok(ConnectOutcome::AlreadyActive);
        }
        if state.instructions.trim().is_empty() {
            tracing::debug!("connect refused: instructions are blank");
            return Ok(ConnectOutcome::MissingInstructions);
        }
        if !state.credentials.has_api_key() {
            tracing::info!("connect refused: no api key; raising auth prompt");
            self.store.dispatch(Action::ShowAuthPrompt(true));
            self.store.dispatch(Action::SetPendingConnect(true));
            return Ok(ConnectOutcome::AuthRequired);
        }

        let options = self.connect_options(&state)?;

        // A fresh attempt discards the previous session's artifacts.
        self.store.dispatch(Action::ClearSummary);
        self.store.dispatch(Action::ResetTranscript);
        self.store.dispatch(Action::SetAgentIdentity(None));
        self.store
            .dispatch(Action::SetConnection(ConnectionState::Connecting));

        match self.transport.connect(&options).await {
            Ok(()) => {
                self.store
                    .dispatch(Action::SetConnection(ConnectionState::Connected));
                tracing::info!("room connected");
                Ok(ConnectOutcome::Connected)
            }
            Err(err) => {
                self.store
                    .dispatch(Action::SetConnection(ConnectionState::Disconnected));
                tracing::warn!(error = %err, "room connect failed");
                Err(SessionError::Connect(err))
            }
        }
    }

    /// Completes the auth prompt with a key.
    ///
    /// If a connect was refused for lack of a key since the prompt was
    /// raised, it is retried exactly once; the retry's outcome is returned.
    /// Returns `None` when no connect was pending.
    pub async fn complete_auth(
        &self,
        api_key: impl Into<String>,
    ) -> Result<Option<ConnectOutcome>, SessionError> {
        let state = self.store.dispatch(Action::SetApiKey(Some(api_key.into())));
        self.store.dispatch(Action::ShowAuthPrompt(false));

        if !state.pending_connect {
            return Ok(None);
        }
        self.store.dispatch(Action::SetPendingConnect(false));
        Ok(Some(self.connect().await?))
    }

    /// Tears the session down.
    ///
    /// When the agent is addressable, exactly one summary request is made
    /// first; its failure or timeout is captured in the outcome and never
    /// blocks the teardown. When no agent identity is known the request is
    /// skipped entirely. The state always ends `Disconnected`.
    pub async fn disconnect(&self) -> DisconnectOutcome {
        let _gate = self.lifecycle.lock().await;

        let state = self.store.snapshot();
        if state.connection != ConnectionState::Connected {
            tracing::debug!(connection = %state.connection, "disconnect ignored; no connected session");
            return DisconnectOutcome::NotConnected;
        }

        self.store
            .dispatch(Action::SetConnection(ConnectionState::Disconnecting));

        let summary = match state.agent_identity.as_deref() {
            None => {
                tracing::info!("no agent identity known; skipping summary request");
                SummaryOutcome::Skipped
            }
            Some(identity) => {
                match rpc::request_summary(
                    &self.transport,
                    identity,
                    &state.instructions_summary,
                    &state.transcript_entries(),
                    self.options.rpc_timeout,
                )
                .await
                {
                    Ok(text) => {
                        self.store.dispatch(Action::SetSummary(text));
                        SummaryOutcome::Stored
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "summary request failed; proceeding with teardown");
                        SummaryOutcome::Failed(err)
                    }
                }
            }
        };

        if let Err(err) = self.transport.disconnect().await {
            tracing::warn!(error = %err, "room teardown reported an error");
        }
        self.store
            .dispatch(Action::SetConnection(ConnectionState::Disconnected));
        tracing::info!("room disconnected");

        DisconnectOutcome::Completed { summary }
    }

    /// Requests a conversation summary from a live agent on demand.
    ///
    /// Requires a connected session with a known agent identity; otherwise
    /// the request is skipped. A reply is stored as the new summary, exactly
    /// as on disconnect, but the session stays connected.
    pub async fn request_summary(&self) -> SummaryOutcome {
        let state = self.store.snapshot();
        if state.connection != ConnectionState::Connected {
            tracing::debug!(connection = %state.connection, "summary request skipped; no connected session");
            return SummaryOutcome::Skipped;
        }
        let Some(identity) = state.agent_identity.clone() else {
            tracing::debug!("summary request skipped; no agent identity known");
            return SummaryOutcome::Skipped;
        };

        match rpc::request_summary(
            &self.transport,
            &identity,
            &state.instructions_summary,
            &state.transcript_entries(),
            self.options.rpc_timeout,
        )
        .await
        {
            Ok(text) => {
                self.store.dispatch(Action::SetSummary(text));
                SummaryOutcome::Stored
            }
            Err(err) => {
                tracing::warn!(error = %err, "on-demand summary request failed");
                SummaryOutcome::Failed(err)
            }
        }
    }

    /// Pushes the current session configuration to a live agent.
    pub async fn push_config_update(&self) -> Result<ConfigPushOutcome, SessionError> {
        let state = self.store.snapshot();
        if state.connection != ConnectionState::Connected {
            return Ok(ConfigPushOutcome::Skipped);
        }
        let Some(identity) = state.agent_identity.clone() else {
            return Ok(ConfigPushOutcome::Skipped);
        };

        let metadata = self.agent_metadata(&state)?;
        let changed =
            rpc::push_config(&self.transport, &identity, metadata, self.options.rpc_timeout)
                .await?;
        Ok(if changed {
            ConfigPushOutcome::Applied
        } else {
            ConfigPushOutcome::Unchanged
        })
    }

    /// Ingests one transport event on the session's logical event loop.
    pub fn handle_event(&self, event: RoomEvent) {
        match event {
            RoomEvent::AgentConnected { identity } => {
                tracing::debug!(agent = %identity, "agent participant connected");
                self.store.dispatch(Action::SetAgentIdentity(Some(identity)));
            }
            RoomEvent::AgentDisconnected => {
                self.store.dispatch(Action::SetAgentIdentity(None));
            }
            RoomEvent::Segment(segment) => {
                // The transcript only accumulates while the session is live.
                if self.store.snapshot().connection == ConnectionState::Connected {
                    self.store.dispatch(Action::UpsertSegment(segment));
                }
            }
            RoomEvent::Disconnected => {
                tracing::info!("room connection ended remotely");
                self.store.dispatch(Action::SetAgentIdentity(None));
                self.store
                    .dispatch(Action::SetConnection(ConnectionState::Disconnected));
            }
        }
    }

    fn connect_options(&self, state: &SessionState) -> Result<ConnectOptions, SessionError> {
        Ok(ConnectOptions {
            config: state.config.clone(),
            instructions: state.instructions.clone(),
            metadata: self.agent_metadata(state)?,
        })
    }

    fn agent_metadata(&self, state: &SessionState) -> Result<String, SessionError> {
        let metadata = AgentMetadata::from_config(
            &state.config,
            state.credentials.api_key.as_deref().unwrap_or_default(),
            &state.instructions,
            state.credentials.jwt_token.as_deref().unwrap_or_default(),
        )?;
        Ok(serde_json::to_string(&metadata)?)
    }
}
