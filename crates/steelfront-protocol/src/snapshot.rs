use serde::{Deserialize, Serialize};

use crate::{GamePhase, PlayerId, Team, UnitId};

/// Full resync payload, addressed to one player.
///
/// Economy and score use the receiving player's perspective
/// (`player` = their own team, `enemy` = the other side), so a snapshot is
/// always built per viewer and never broadcast.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub tick: u64,
    pub units: Vec<UnitSnapshot>,
    pub economy: EconomySnapshot,
    pub score: ScoreSnapshot,
    pub phase: GamePhase,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitSnapshot {
    pub id: UnitId,
    pub unit_type: String,
    pub team: Team,
    pub owner_id: PlayerId,
    pub x: f32,
    /// Terrain elevation at the unit's position; derived, never simulated.
    pub y: f32,
    pub z: f32,
    pub health: f32,
    pub morale: f32,
    pub rotation_y: f32,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomySnapshot {
    pub player_credits: u32,
    pub enemy_credits: u32,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSnapshot {
    pub player: u32,
    pub enemy: u32,
}
