//! Inbound message envelope.
//!
//! Server-to-client messages live in `steelfront-protocol` (the simulation
//! emits them directly); this module adds the client-to-server side of the
//! session stream.

use serde::{Deserialize, Serialize};

use steelfront_protocol::wire::WireError;
use steelfront_protocol::GameCommand;

/// Client-to-server messages.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A player order for the session's command stream.
    Command { command: GameCommand },
    /// Latency probe.
    Ping { timestamp: u64 },
}

pub fn serialize_client_message(msg: &ClientMessage) -> Result<Vec<u8>, WireError> {
    Ok(serde_json::to_vec(msg)?)
}

pub fn deserialize_client_message(data: &[u8]) -> Result<ClientMessage, WireError> {
    Ok(serde_json::from_slice(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use steelfront_protocol::{CommandType, PlayerId, UnitId};

    #[test]
    fn command_envelope_roundtrip() {
        let msg = ClientMessage::Command {
            command: GameCommand {
                command_type: CommandType::Stop,
                tick: 3,
                player_id: Some(PlayerId::from("p1")),
                unit_ids: vec![UnitId::from("u0")],
                target_x: None,
                target_z: None,
                target_unit_id: None,
                queue: None,
                unit_type: None,
                building_id: None,
                value: None,
            },
        };
        let data = serialize_client_message(&msg).unwrap();
        let decoded = deserialize_client_message(&data).unwrap();
        match decoded {
            ClientMessage::Command { command } => {
                assert_eq!(command.command_type, CommandType::Stop);
                assert_eq!(command.unit_ids, vec![UnitId::from("u0")]);
            }
            _ => panic!("wrong message type"),
        }
    }

    #[test]
    fn envelope_is_tagged_by_type() {
        let msg = ClientMessage::Ping { timestamp: 12345 };
        let json: serde_json::Value =
            serde_json::from_slice(&serialize_client_message(&msg).unwrap()).unwrap();
        assert_eq!(json["type"], "ping");
        assert_eq!(json["timestamp"], 12345);
    }

    #[test]
    fn garbage_frames_fail_to_decode() {
        assert!(deserialize_client_message(b"not json").is_err());
        assert!(deserialize_client_message(b"{\"type\":\"warp\"}").is_err());
    }
}
