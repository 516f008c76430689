//! Wire protocol for the Steelfront multiplayer core.
//!
//! Everything that crosses a client channel lives here: identifier newtypes,
//! the integer-tagged command format, server-to-client messages, resync
//! snapshots, and the JSON codec. The simulation crates depend on this one,
//! never the other way around.

mod command;
mod ids;
mod messages;
mod snapshot;
mod types;
pub mod wire;

pub use crate::command::*;
pub use crate::ids::*;
pub use crate::messages::*;
pub use crate::snapshot::*;
pub use crate::types::*;
