//! Deterministic lockstep simulation for Steelfront matches.
//!
//! The authoritative game owns every source of nondeterminism: a seeded
//! Mulberry32 RNG, insertion-ordered unit updates, and id-sorted checksums.
//! Nothing in this crate touches the wall clock, global randomness, or an
//! async runtime; the session layer drives `AuthoritativeGame::process_tick`
//! at a fixed rate and fans out whatever it returns.

mod buildings;
mod combat;
pub mod constants;
mod economy;
mod game;
mod map;
mod registry;
mod rng;
mod smoke;
mod transport;
mod unit;

pub use crate::buildings::*;
pub use crate::combat::*;
pub use crate::economy::*;
pub use crate::game::*;
pub use crate::map::*;
pub use crate::registry::*;
pub use crate::rng::*;
pub use crate::smoke::*;
pub use crate::transport::*;
pub use crate::unit::*;
