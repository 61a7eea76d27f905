//! Session core for the Palaver playground: connection lifecycle, state
//! dispatch, and the summary RPC client.
//!
//! The crate owns no transport. The real-time room (WebRTC audio, live
//! transcription, unary RPC) is an external collaborator reached through the
//! [`RoomTransport`] trait; everything here is the orchestration around it —
//! when a connect is allowed, how credentials gate it, how the transcript
//! accumulates, and how exactly one summary request is made before teardown.
//!
//! All session state lives in an immutable [`SessionState`] snapshot and every
//! mutation goes through [`SessionStore::dispatch`]. Hosts subscribe to the
//! store's watch channel to render whatever snapshot is current.

pub mod controller;
pub mod error;
pub mod rpc;
pub mod state;
pub mod store;
pub mod transport;

pub use controller::{
    ConfigPushOutcome, ConnectOutcome, ControllerOptions, DisconnectOutcome, SessionController,
    SummaryOutcome,
};
pub use error::{RpcError, SessionError, TransportError};
pub use state::{Action, ConnectionState, Credentials, SessionState, TranscriptLine};
pub use store::SessionStore;
pub use transport::{ConnectOptions, RoomEvent, RoomTransport, RpcRequest};
