use serde_json;
use thiserror::Error;

use crate::{GameCommand, ServerMessage, StateSnapshot};

#[derive(Debug, Error)]
pub enum WireError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn serialize_command(cmd: &GameCommand) -> Result<Vec<u8>, WireError> {
    Ok(serde_json::to_vec(cmd)?)
}

pub fn deserialize_command(bytes: &[u8]) -> Result<GameCommand, WireError> {
    Ok(serde_json::from_slice(bytes)?)
}

pub fn serialize_server_message(msg: &ServerMessage) -> Result<Vec<u8>, WireError> {
    Ok(serde_json::to_vec(msg)?)
}

pub fn deserialize_server_message(bytes: &[u8]) -> Result<ServerMessage, WireError> {
    Ok(serde_json::from_slice(bytes)?)
}

pub fn serialize_snapshot(snapshot: &StateSnapshot) -> Result<Vec<u8>, WireError> {
    Ok(serde_json::to_vec(snapshot)?)
}

pub fn deserialize_snapshot(bytes: &[u8]) -> Result<StateSnapshot, WireError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Rolling 32-bit state combiner used for per-tick checksums.
///
/// Each value folds in as `h ← h·31 + v` (the classic djb2 shift-subtract
/// form), with wrapping arithmetic throughout. Seeding with the RNG state
/// makes RNG divergence between nodes show up as a checksum mismatch.
#[derive(Clone, Copy, Debug)]
pub struct StateHasher {
    h: u32,
}

impl StateHasher {
    pub fn with_seed(seed: u32) -> Self {
        Self { h: seed }
    }

    pub fn write_u32(&mut self, v: u32) {
        self.h = (self.h << 5).wrapping_sub(self.h).wrapping_add(v);
    }

    pub fn write_i32(&mut self, v: i32) {
        self.write_u32(v as u32);
    }

    pub fn write_bool(&mut self, v: bool) {
        self.write_u32(v as u32);
    }

    pub fn write_str(&mut self, s: &str) {
        for b in s.bytes() {
            self.write_u32(u32::from(b));
        }
    }

    pub fn finish(self) -> u32 {
        self.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommandType, PlayerId, UnitId};

    #[test]
    fn command_roundtrip() {
        let cmd = GameCommand {
            command_type: CommandType::Attack,
            tick: 7,
            player_id: Some(PlayerId::from("p2")),
            unit_ids: vec![UnitId::from("u3"), UnitId::from("u4")],
            target_x: None,
            target_z: None,
            target_unit_id: Some(UnitId::from("u9")),
            queue: Some(true),
            unit_type: None,
            building_id: None,
            value: None,
        };
        let bytes = serialize_command(&cmd).unwrap();
        let decoded = deserialize_command(&bytes).unwrap();
        assert_eq!(decoded.command_type, CommandType::Attack);
        assert_eq!(decoded.tick, 7);
        assert_eq!(decoded.player_id, Some(PlayerId::from("p2")));
        assert_eq!(decoded.unit_ids, cmd.unit_ids);
        assert_eq!(decoded.target_unit_id, Some(UnitId::from("u9")));
        assert_eq!(decoded.queue, Some(true));
    }

    #[test]
    fn hasher_is_order_sensitive_and_seeded() {
        let mut a = StateHasher::with_seed(1);
        a.write_str("u0");
        a.write_i32(100);

        let mut b = StateHasher::with_seed(1);
        b.write_i32(100);
        b.write_str("u0");
        assert_ne!(a.finish(), b.finish());

        let mut c = StateHasher::with_seed(2);
        c.write_str("u0");
        c.write_i32(100);
        assert_ne!(a.finish(), c.finish());
    }
}
