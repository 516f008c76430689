use serde::{Deserialize, Serialize};

use crate::{GameCommand, GamePhase, StateSnapshot, Team, TeamScore, UnitId, ZoneId};

/// Server-to-client messages. Every frame is a JSON object tagged by `type`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Match phase transition. `deployment_duration` accompanies the
    /// transition into the deployment phase.
    PhaseChange {
        phase: GamePhase,
        #[serde(
            rename = "deploymentDuration",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        deployment_duration: Option<f32>,
    },
    /// Per-tick broadcast: the commands accepted this tick plus the state
    /// checksum all clients must agree on.
    TickUpdate {
        tick: u64,
        commands: Vec<GameCommand>,
        checksum: u32,
    },
    /// Full resync, unicast to one reconnecting player.
    StateSnapshot {
        #[serde(flatten)]
        snapshot: StateSnapshot,
    },
    /// Discrete simulation or lifecycle event, discriminated by `eventType`.
    GameEvent {
        #[serde(flatten)]
        event: GameEventBody,
    },
    /// Latency probe response, unicast.
    Pong {
        #[serde(rename = "clientTimestamp")]
        client_timestamp: u64,
        #[serde(rename = "serverTimestamp")]
        server_timestamp: u64,
    },
}

/// Body of a `game_event` frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "eventType", rename_all = "snake_case")]
pub enum GameEventBody {
    /// A team crossed the victory threshold; the simulation stops.
    Victory { winner: Team, score: TeamScore },
    /// The session ended (victory, abandonment, or an explicit end).
    GameEnded {
        winner: Team,
        score: TeamScore,
        /// Seconds of battle played.
        duration: f32,
    },
    /// A capture zone changed hands.
    ZoneCaptured { zone: ZoneId, team: Team },
    /// A unit boarded a transport and left the active world.
    UnitMounted { unit: UnitId, transport: UnitId },
    /// A transport dropped its passengers back into the world.
    UnitUnloaded {
        transport: UnitId,
        units: Vec<UnitId>,
    },
}
