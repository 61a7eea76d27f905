//! LiveKit room plumbing for the Palaver playground.
//!
//! The browser (or any other client) joins a room with a short-lived access
//! token minted here. The token's participant metadata carries the serialized
//! session configuration, which is how the agent worker learns its
//! instructions, voice, and VAD tuning at join time. Rooms themselves are
//! created by the LiveKit server on first join; this crate never talks to
//! the server directly.

pub mod config;
pub mod error;
pub mod service;

pub use config::RoomConfig;
pub use error::RoomError;
pub use service::RoomService;
