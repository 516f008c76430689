//! One active match: an authoritative game bound to its player roster.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use rand::Rng;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use steelfront_core::{AuthoritativeGame, CommandBuffer, GameConfig, GameMap, UnitDataRegistry};
use steelfront_protocol::wire::serialize_server_message;
use steelfront_protocol::{
    is_valid_command, GameCommand, GameEventBody, PlayerId, ServerMessage, SessionCode, Team,
};

use crate::channel::ClientChannel;
use crate::config::ServerConfig;
use crate::protocol::{deserialize_client_message, ClientMessage};

/// Static facts about one seat in the session.
#[derive(Clone, Debug)]
pub struct SessionPlayerInfo {
    pub id: PlayerId,
    pub name: String,
    pub team: Team,
    pub deck_id: Option<String>,
}

struct PlayerSlot {
    info: SessionPlayerInfo,
    channel: Arc<dyn ClientChannel>,
    connected: bool,
    last_seen: Instant,
    reconnect_token: String,
}

#[derive(Clone, Debug, Error)]
pub enum ReconnectError {
    #[error("unknown player")]
    UnknownPlayer,
    #[error("invalid reconnect token")]
    InvalidToken,
}

type GameEndHook = Box<dyn Fn(&SessionCode) + Send + Sync>;

/// One session: the game, its players, and the tick task driving it.
///
/// Inbound command handling runs on whatever task the transport uses; the
/// only simulation entry point is the session's own tick. Commands reach
/// the game through the shared command buffer, never through the game lock.
pub struct GameSession {
    code: SessionCode,
    config: ServerConfig,
    game: Mutex<AuthoritativeGame>,
    commands: CommandBuffer,
    players: Mutex<HashMap<PlayerId, PlayerSlot>>,
    active: AtomicBool,
    started_at: Instant,
    ended_at: Mutex<Option<Instant>>,
    on_game_end: Mutex<Option<GameEndHook>>,
    tick_task: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession").field("code", &self.code).finish()
    }
}

impl GameSession {
    pub fn new(
        code: SessionCode,
        registry: Arc<dyn UnitDataRegistry>,
        config: ServerConfig,
        players: Vec<(SessionPlayerInfo, Arc<dyn ClientChannel>)>,
        seed: u32,
    ) -> Arc<Self> {
        let game_config = GameConfig {
            tick_rate: config.tick_rate,
            deployment_duration: config.deployment_duration,
            ..GameConfig::default()
        };
        let game = AuthoritativeGame::new(registry, game_config, seed);
        let commands = game.command_buffer();

        let now = Instant::now();
        let slots = players
            .into_iter()
            .map(|(info, channel)| {
                (
                    info.id.clone(),
                    PlayerSlot {
                        info,
                        channel,
                        connected: true,
                        last_seen: now,
                        reconnect_token: generate_token(),
                    },
                )
            })
            .collect();

        Arc::new(Self {
            code,
            config,
            game: Mutex::new(game),
            commands,
            players: Mutex::new(slots),
            active: AtomicBool::new(false),
            started_at: now,
            ended_at: Mutex::new(None),
            on_game_end: Mutex::new(None),
            tick_task: Mutex::new(None),
        })
    }

    pub fn code(&self) -> &SessionCode {
        &self.code
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn player_count(&self) -> usize {
        self.players.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn connected_count(&self) -> usize {
        self.players
            .lock()
            .map(|p| p.values().filter(|s| s.connected).count())
            .unwrap_or(0)
    }

    /// Called by the session manager to learn when the match ends.
    pub fn set_on_game_end(&self, hook: GameEndHook) {
        if let Ok(mut slot) = self.on_game_end.lock() {
            *slot = Some(hook);
        }
    }

    /// Initialize the game on the given map, announce the deployment
    /// phase, and start the tick task.
    pub fn start_game(self: &Arc<Self>, map: GameMap) {
        let roster: Vec<(PlayerId, Team)> = match self.players.lock() {
            Ok(players) => players
                .values()
                .map(|slot| (slot.info.id.clone(), slot.info.team))
                .collect(),
            Err(_) => return,
        };

        let initial = match self.game.lock() {
            Ok(mut game) => {
                game.initialize(map, &roster);
                game.take_pending_messages()
            }
            Err(_) => return,
        };

        self.active.store(true, Ordering::Relaxed);
        for message in &initial {
            self.broadcast(message);
        }
        info!(code = %self.code, "session started");

        let session = Arc::clone(self);
        let interval = self.config.tick_interval();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !session.tick_once() {
                    break;
                }
            }
        });
        if let Ok(mut slot) = self.tick_task.lock() {
            *slot = Some(task);
        }
    }

    /// Run exactly one simulation tick and fan out its broadcasts.
    ///
    /// Returns false once the session should stop ticking. Public so tests
    /// and alternative schedulers can drive the session deterministically.
    pub fn tick_once(self: &Arc<Self>) -> bool {
        if !self.is_active() {
            return false;
        }

        let result = match self.game.lock() {
            Ok(mut game) => game.process_tick(),
            Err(_) => {
                error!(code = %self.code, "game lock poisoned");
                self.end_game(Team::Team1);
                return false;
            }
        };

        match result {
            Ok(messages) => {
                for message in &messages {
                    self.broadcast(message);
                }
                let (stopped, winner) = match self.game.lock() {
                    Ok(game) => (game.is_stopped(), game.victory_winner()),
                    Err(_) => (true, None),
                };
                if stopped {
                    self.end_game(winner.unwrap_or(Team::Team1));
                    return false;
                }
                true
            }
            Err(err) => {
                // Simulation invariant violations are fatal to this session
                // only; other sessions never observe them.
                error!(code = %self.code, %err, "fatal simulation error");
                self.end_game(Team::Team1);
                false
            }
        }
    }

    /// Route one raw inbound frame from a client.
    pub fn handle_frame(&self, player_id: &PlayerId, data: &[u8]) {
        match deserialize_client_message(data) {
            Ok(ClientMessage::Command { command }) => {
                self.handle_command(player_id.clone(), command);
            }
            Ok(ClientMessage::Ping { timestamp }) => {
                self.handle_ping(player_id, timestamp);
            }
            Err(err) => {
                warn!(code = %self.code, player = %player_id, %err, "undecodable frame, closing channel");
                if let Ok(mut players) = self.players.lock() {
                    if let Some(slot) = players.get_mut(player_id) {
                        slot.channel.close();
                        slot.connected = false;
                    }
                }
            }
        }
    }

    /// Stamp and enqueue a player command for the next tick.
    pub fn handle_command(&self, player_id: PlayerId, mut cmd: GameCommand) {
        if !self.is_active() {
            warn!(code = %self.code, player = %player_id, "command on inactive session dropped");
            return;
        }

        // The sender's identity comes from the channel, never the payload.
        cmd.player_id = Some(player_id.clone());
        if !is_valid_command(&cmd) {
            warn!(code = %self.code, player = %player_id, "malformed command dropped");
            return;
        }

        if let Ok(mut players) = self.players.lock() {
            if let Some(slot) = players.get_mut(&player_id) {
                slot.last_seen = Instant::now();
            }
        }
        self.commands.push(cmd);
    }

    fn handle_ping(&self, player_id: &PlayerId, client_timestamp: u64) {
        let server_timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        self.send_to(
            player_id,
            &ServerMessage::Pong {
                client_timestamp,
                server_timestamp,
            },
        );
    }

    /// Mark a player disconnected. A session with nobody left ends
    /// immediately so it cannot stall the slot it occupies.
    pub fn handle_disconnect(&self, player_id: &PlayerId) {
        let all_gone = match self.players.lock() {
            Ok(mut players) => {
                if let Some(slot) = players.get_mut(player_id) {
                    slot.connected = false;
                    slot.last_seen = Instant::now();
                    info!(code = %self.code, player = %player_id, "player disconnected");
                }
                players.values().all(|slot| !slot.connected)
            }
            Err(_) => false,
        };

        if all_gone && self.is_active() {
            info!(code = %self.code, "all players disconnected, ending game");
            self.end_game(Team::Team1);
        }
    }

    /// Token handed to this player at session creation; the transport layer
    /// forwards it to the client for later reconnection.
    pub fn reconnect_token(&self, player_id: &PlayerId) -> Option<String> {
        self.players
            .lock()
            .ok()?
            .get(player_id)
            .map(|slot| slot.reconnect_token.clone())
    }

    /// Swap in a fresh channel for a returning player after validating
    /// their reconnect token. The first frame on the new channel is always
    /// a full state snapshot.
    pub fn handle_reconnect(
        &self,
        player_id: &PlayerId,
        token: &str,
        channel: Arc<dyn ClientChannel>,
    ) -> Result<(), ReconnectError> {
        let team = match self.players.lock() {
            Ok(mut players) => {
                let Some(slot) = players.get_mut(player_id) else {
                    warn!(code = %self.code, player = %player_id, "reconnect for unknown player");
                    return Err(ReconnectError::UnknownPlayer);
                };
                if slot.reconnect_token != token {
                    warn!(code = %self.code, player = %player_id, "reconnect with bad token");
                    return Err(ReconnectError::InvalidToken);
                }
                slot.channel = channel;
                slot.connected = true;
                slot.last_seen = Instant::now();
                slot.info.team
            }
            Err(_) => return Err(ReconnectError::UnknownPlayer),
        };

        let snapshot = match self.game.lock() {
            Ok(game) => game.state_snapshot(team),
            Err(_) => return Err(ReconnectError::UnknownPlayer),
        };
        info!(code = %self.code, player = %player_id, tick = snapshot.tick, "player reconnected");
        self.send_to(player_id, &ServerMessage::StateSnapshot { snapshot });
        Ok(())
    }

    /// Stop the simulation, announce the result, and notify the owner.
    /// Idempotent; later calls are no-ops.
    pub fn end_game(&self, winner: Team) {
        if !self.active.swap(false, Ordering::Relaxed) {
            return;
        }

        let (score, duration) = match self.game.lock() {
            Ok(mut game) => {
                game.stop();
                (game.score(), game.battle_duration())
            }
            Err(_) => (Default::default(), 0.0),
        };

        info!(code = %self.code, ?winner, "game ended");
        self.broadcast(&ServerMessage::GameEvent {
            event: GameEventBody::GameEnded {
                winner,
                score,
                duration,
            },
        });

        if let Ok(mut ended) = self.ended_at.lock() {
            *ended = Some(Instant::now());
        }
        if let Ok(hook) = self.on_game_end.lock() {
            if let Some(hook) = hook.as_ref() {
                hook(&self.code);
            }
        }
    }

    /// Serialize once and send to every connected channel. A per-channel
    /// send failure marks that player disconnected and nothing else.
    pub fn broadcast(&self, message: &ServerMessage) {
        let bytes = match serialize_server_message(message) {
            Ok(bytes) => bytes,
            Err(err) => {
                error!(code = %self.code, %err, "broadcast serialization failed");
                return;
            }
        };

        let Ok(mut players) = self.players.lock() else {
            return;
        };
        for slot in players.values_mut() {
            if !slot.connected {
                continue;
            }
            if !slot.channel.is_alive() || slot.channel.send(&bytes).is_err() {
                warn!(code = %self.code, player = %slot.info.id, "send failed, marking disconnected");
                slot.connected = false;
            }
        }
    }

    fn send_to(&self, player_id: &PlayerId, message: &ServerMessage) {
        let bytes = match serialize_server_message(message) {
            Ok(bytes) => bytes,
            Err(_) => return,
        };
        let Ok(mut players) = self.players.lock() else {
            return;
        };
        if let Some(slot) = players.get_mut(player_id) {
            if slot.channel.send(&bytes).is_err() {
                slot.connected = false;
            }
        }
    }
}

/// Opaque per-player reconnect credential. Generated with process
/// randomness, never the simulation RNG.
fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    (0..32)
        .map(|_| {
            let idx = rng.gen_range(0..36);
            if idx < 10 {
                (b'0' + idx) as char
            } else {
                (b'a' + idx - 10) as char
            }
        })
        .collect()
}
