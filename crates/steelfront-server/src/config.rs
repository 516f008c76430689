//! Server configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use steelfront_core::constants;

/// Process-level server configuration, read once at startup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Maximum concurrently running sessions.
    pub max_concurrent_games: usize,
    /// Simulation ticks per second per session.
    pub tick_rate: u32,
    /// Setup-phase timer in seconds.
    pub deployment_duration: f32,
    /// Delay before a finished session is disposed, letting final
    /// broadcasts drain.
    pub cleanup_delay: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_games: 20,
            tick_rate: constants::TICK_RATE,
            deployment_duration: constants::DEPLOYMENT_DURATION_SECS,
            cleanup_delay: Duration::from_secs(5),
        }
    }
}

impl ServerConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_rate))
    }
}
