//! Steelfront multiplayer session server.
//!
//! Binds authoritative `steelfront-core` games to rosters of players and
//! their client channels: one cooperative tick task per session, broadcast
//! fan-out, reconnect handling, and a process-wide session registry with a
//! concurrency cap. Transport framing lives behind the `ClientChannel`
//! trait and stays out of this crate.

pub mod channel;
pub mod config;
pub mod protocol;
pub mod session;
pub mod session_manager;

pub use channel::{ChannelError, ClientChannel, LoopbackChannel};
pub use config::ServerConfig;
pub use protocol::*;
pub use session::{GameSession, ReconnectError, SessionPlayerInfo};
pub use session_manager::{LoadInfo, SessionError, SessionManager};
