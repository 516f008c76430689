//! Process-wide registry of active sessions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

use steelfront_core::UnitDataRegistry;
use steelfront_protocol::SessionCode;

use crate::channel::ClientChannel;
use crate::config::ServerConfig;
use crate::session::{GameSession, SessionPlayerInfo};

/// Current load, for matchmaking and health endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadInfo {
    pub active_games: usize,
    pub max_games: usize,
    pub active_players: usize,
}

#[derive(Clone, Debug, Error)]
pub enum SessionError {
    #[error("server is at capacity ({max} games)")]
    AtCapacity { max: usize },
    #[error("session code {0} already in use")]
    CodeInUse(SessionCode),
}

/// Owns every live session and enforces the concurrency cap. The only
/// process-wide mutable state in the server.
pub struct SessionManager {
    config: ServerConfig,
    registry: Arc<dyn UnitDataRegistry>,
    sessions: Mutex<HashMap<SessionCode, Arc<GameSession>>>,
}

impl SessionManager {
    pub fn new(config: ServerConfig, registry: Arc<dyn UnitDataRegistry>) -> Arc<Self> {
        Arc::new(Self {
            config,
            registry,
            sessions: Mutex::new(HashMap::new()),
        })
    }

    /// Register a new session. Fails when the cap is reached or the caller
    /// supplied a code that is already taken; with no code supplied a fresh
    /// one is generated.
    pub fn create_session(
        self: &Arc<Self>,
        code: Option<SessionCode>,
        players: Vec<(SessionPlayerInfo, Arc<dyn ClientChannel>)>,
        seed: u32,
    ) -> Result<Arc<GameSession>, SessionError> {
        let Ok(mut sessions) = self.sessions.lock() else {
            return Err(SessionError::AtCapacity {
                max: self.config.max_concurrent_games,
            });
        };

        if sessions.len() >= self.config.max_concurrent_games {
            warn!(max = self.config.max_concurrent_games, "session cap reached");
            return Err(SessionError::AtCapacity {
                max: self.config.max_concurrent_games,
            });
        }

        let code = match code {
            Some(code) => {
                if sessions.contains_key(&code) {
                    return Err(SessionError::CodeInUse(code));
                }
                code
            }
            None => loop {
                let candidate = generate_code();
                if !sessions.contains_key(&candidate) {
                    break candidate;
                }
            },
        };

        let session = GameSession::new(
            code.clone(),
            Arc::clone(&self.registry),
            self.config.clone(),
            players,
            seed,
        );

        // Dispose the session shortly after its game ends so final
        // broadcasts can drain first.
        let manager: Weak<SessionManager> = Arc::downgrade(self);
        let cleanup_delay = self.config.cleanup_delay;
        session.set_on_game_end(Box::new(move |ended_code| {
            let Some(manager) = manager.upgrade() else {
                return;
            };
            let ended_code = ended_code.clone();
            tokio::spawn(async move {
                tokio::time::sleep(cleanup_delay).await;
                manager.remove(&ended_code);
            });
        }));

        info!(code = %code, "session created");
        sessions.insert(code, Arc::clone(&session));
        Ok(session)
    }

    pub fn get(&self, code: &SessionCode) -> Option<Arc<GameSession>> {
        self.sessions.lock().ok()?.get(code).cloned()
    }

    pub fn remove(&self, code: &SessionCode) {
        if let Ok(mut sessions) = self.sessions.lock() {
            if sessions.remove(code).is_some() {
                info!(code = %code, "session disposed");
            }
        }
    }

    pub fn load_info(&self) -> LoadInfo {
        let (active_games, active_players) = match self.sessions.lock() {
            Ok(sessions) => (
                sessions.len(),
                sessions.values().map(|s| s.connected_count()).sum(),
            ),
            Err(_) => (0, 0),
        };
        LoadInfo {
            active_games,
            max_games: self.config.max_concurrent_games,
            active_players,
        }
    }
}

/// Six uppercase alphanumerics, generated outside the simulation RNG.
fn generate_code() -> SessionCode {
    let mut rng = rand::thread_rng();
    let code: String = (0..6)
        .map(|_| {
            let idx = rng.gen_range(0..36);
            if idx < 10 {
                (b'0' + idx) as char
            } else {
                (b'A' + idx - 10) as char
            }
        })
        .collect();
    SessionCode(code)
}
