//! Simulation constants and game-balance tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const TICK_DT: f32 = 1.0 / TICK_RATE as f32;

// --- Match flow ---

/// Setup-phase length before battle starts (seconds).
pub const DEPLOYMENT_DURATION_SECS: f32 = 60.0;

/// Victory points a team must reach to win.
pub const VICTORY_THRESHOLD: u32 = 2000;

// --- Economy ---

/// Seconds between economy ticks.
pub const ECONOMY_TICK_SECS: f32 = 4.0;

/// Flat credits each team earns per economy tick.
pub const INCOME_PER_TICK: u32 = 10;

/// Credits each team starts the match with.
pub const STARTING_CREDITS: u32 = 1500;

/// Capture progress gained per second of uncontested sole presence.
pub const CAPTURE_RATE_PER_SEC: f32 = 10.0;

// --- Commands ---

/// Maximum queued commands per unit; excess orders are dropped.
pub const COMMAND_QUEUE_CAP: usize = 16;

/// Distance at which a movement target counts as reached.
pub const ARRIVAL_EPSILON: f32 = 0.1;

// --- Movement ---

/// Speed multiplier for fast (road) movement.
pub const FAST_MOVE_FACTOR: f32 = 1.5;

/// Speed multiplier while reversing.
pub const REVERSE_SPEED_FACTOR: f32 = 0.5;

// --- Morale ---

/// Morale ceiling; units spawn at this value.
pub const MORALE_MAX: f32 = 100.0;

/// Morale regained per second while not under fire.
pub const MORALE_RECOVERY_PER_SEC: f32 = 2.0;

/// Suppression shed per second.
pub const SUPPRESSION_DECAY_PER_SEC: f32 = 4.0;

/// Morale lost per point of projected damage, applied even on ricochet.
pub const MORALE_HIT_FACTOR: f32 = 1.5;

/// Seconds a unit remembers who shot at it (return-fire targeting).
pub const RETURN_FIRE_MEMORY_SECS: f32 = 5.0;

// --- Damage mitigation ---

/// Damage reduction for a garrisoned defender.
pub const GARRISON_DAMAGE_REDUCTION: f32 = 0.5;

/// Maximum damage reduction from terrain cover (at cover = 1.0).
pub const MAX_TERRAIN_COVER_REDUCTION: f32 = 0.2;

/// Accuracy multiplier when the line of fire passes through smoke.
pub const SMOKE_ACCURACY_FACTOR: f32 = 0.5;

// --- Transports and buildings ---

/// Distance at which a unit can board a transport.
pub const MOUNT_RANGE: f32 = 2.0;

/// Distance at which a unit can enter a building.
pub const GARRISON_RANGE: f32 = 2.0;

/// Maximum scatter radius for unloaded passengers and garrison exits.
pub const UNLOAD_RADIUS: f32 = 3.0;

/// Occupant capacity of a spawned defensive structure.
pub const DEFENSIVE_STRUCTURE_CAPACITY: u32 = 2;
