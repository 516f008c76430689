use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{BuildingId, PlayerId, UnitId};

/// Command discriminants as sent on the wire.
///
/// The integer values are stable across protocol versions; never renumber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandType {
    Move = 1,
    FastMove = 2,
    Reverse = 3,
    Attack = 4,
    AttackMove = 5,
    Stop = 6,
    Garrison = 7,
    Ungarrison = 8,
    SpawnUnit = 9,
    Mount = 10,
    Unload = 11,
    DigIn = 12,
    SetReturnFireOnly = 13,
}

impl CommandType {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn from_u8(raw: u8) -> Option<Self> {
        Some(match raw {
            1 => CommandType::Move,
            2 => CommandType::FastMove,
            3 => CommandType::Reverse,
            4 => CommandType::Attack,
            5 => CommandType::AttackMove,
            6 => CommandType::Stop,
            7 => CommandType::Garrison,
            8 => CommandType::Ungarrison,
            9 => CommandType::SpawnUnit,
            10 => CommandType::Mount,
            11 => CommandType::Unload,
            12 => CommandType::DigIn,
            13 => CommandType::SetReturnFireOnly,
            _ => return None,
        })
    }

    /// Whether the wire form must carry a non-empty `unitIds` list.
    pub fn addresses_units(self) -> bool {
        !matches!(self, CommandType::SpawnUnit)
    }

    /// Whether the wire form must carry `targetX`/`targetZ`.
    pub fn needs_target_point(self) -> bool {
        matches!(
            self,
            CommandType::Move
                | CommandType::FastMove
                | CommandType::Reverse
                | CommandType::AttackMove
                | CommandType::SpawnUnit
        )
    }
}

impl Serialize for CommandType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for CommandType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u8::deserialize(deserializer)?;
        CommandType::from_u8(raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown command type {raw}")))
    }
}

/// A player order in wire form.
///
/// `tick` is advisory: the server executes every accepted command on its own
/// next tick regardless of the value the client stamped.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCommand {
    #[serde(rename = "type")]
    pub command_type: CommandType,
    pub tick: u64,
    /// Stamped by the session from the sending channel; any client-supplied
    /// value is overwritten before the command reaches the simulation.
    #[serde(default)]
    pub player_id: Option<PlayerId>,
    #[serde(default)]
    pub unit_ids: Vec<UnitId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_z: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_unit_id: Option<UnitId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_id: Option<BuildingId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<bool>,
}

impl GameCommand {
    pub fn queued(&self) -> bool {
        self.queue.unwrap_or(false)
    }
}

/// Shape check applied before a command enters the session's stream.
///
/// Semantic validation (ownership, credits, liveness) happens later, inside
/// the authoritative tick; this only rejects frames that are structurally
/// unusable.
pub fn is_valid_command(cmd: &GameCommand) -> bool {
    if cmd.player_id.is_none() {
        return false;
    }
    if cmd.command_type.addresses_units() && cmd.unit_ids.is_empty() {
        return false;
    }
    if cmd.command_type.needs_target_point() {
        match (cmd.target_x, cmd.target_z) {
            (Some(x), Some(z)) if x.is_finite() && z.is_finite() => {}
            _ => return false,
        }
    }
    true
}
