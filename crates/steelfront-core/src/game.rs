use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{info, warn};

use steelfront_protocol::wire::StateHasher;
use steelfront_protocol::{
    CommandType, EconomySnapshot, GameCommand, GameEventBody, GamePhase, PlayerId, ScoreSnapshot,
    ServerMessage, StateSnapshot, Team, UnitId, UnitSnapshot, Vec2,
};

use crate::buildings::BuildingManager;
use crate::constants::{
    DEPLOYMENT_DURATION_SECS, ECONOMY_TICK_SECS, INCOME_PER_TICK, STARTING_CREDITS, TICK_RATE,
    VICTORY_THRESHOLD,
};
use crate::economy::{EconomyManager, ZoneSurvey};
use crate::map::GameMap;
use crate::registry::UnitDataRegistry;
use crate::rng::DeterministicRng;
use crate::smoke::SmokeManager;
use crate::transport::{SimIntegrityError, TransportManager};
use crate::unit::{SimUnit, TickCtx, UnitCommand, UnitIntent};

/// Per-match tuning; defaults come from the shared constants table.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub tick_rate: u32,
    pub deployment_duration: f32,
    pub starting_credits: u32,
    pub victory_threshold: u32,
    pub income_per_tick: u32,
    pub economy_tick_secs: f32,
    pub allow_mixed_garrison: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            deployment_duration: DEPLOYMENT_DURATION_SECS,
            starting_credits: STARTING_CREDITS,
            victory_threshold: VICTORY_THRESHOLD,
            income_per_tick: INCOME_PER_TICK,
            economy_tick_secs: ECONOMY_TICK_SECS,
            allow_mixed_garrison: false,
        }
    }
}

/// Shared handle onto a game's inbound command buffer.
///
/// Producers append under the mutex; the tick drains by swapping the whole
/// vector out, so the lock is held only for a push or a swap.
#[derive(Clone, Debug, Default)]
pub struct CommandBuffer {
    inner: Arc<Mutex<Vec<GameCommand>>>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, cmd: GameCommand) {
        if let Ok(mut buffer) = self.inner.lock() {
            buffer.push(cmd);
        }
    }

    pub fn drain(&self) -> Vec<GameCommand> {
        match self.inner.lock() {
            Ok(mut buffer) => std::mem::take(&mut *buffer),
            Err(_) => Vec::new(),
        }
    }
}

/// Why a command was rejected during the authoritative tick.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("missing player id")]
    MissingPlayer,
    #[error("unknown player")]
    UnknownPlayer,
    #[error("command addresses no units")]
    EmptyUnitSelection,
    #[error("unknown unit {0}")]
    UnknownUnit(UnitId),
    #[error("unit {0} belongs to the other team")]
    NotYourUnit(UnitId),
    #[error("missing or non-finite movement target")]
    InvalidTarget,
    #[error("missing target unit")]
    MissingTargetUnit,
    #[error("unknown or dead target unit")]
    InvalidTargetUnit,
    #[error("missing unit type")]
    MissingUnitType,
    #[error("unknown unit type {0}")]
    UnknownUnitType(String),
    #[error("insufficient credits: need {needed}, have {available}")]
    InsufficientCredits { needed: u32, available: u32 },
    #[error("missing building id")]
    MissingBuilding,
    #[error("unknown building")]
    UnknownBuilding,
    #[error("missing toggle value")]
    MissingValue,
    #[error("unit class cannot dig in")]
    CannotDigIn,
}

/// The authoritative per-match simulation.
///
/// Owns every piece of match state and the only RNG the simulation may
/// touch. `process_tick` is the sole mutation entry point once the match is
/// initialized; it returns the messages the session must broadcast, in
/// order.
pub struct AuthoritativeGame {
    registry: Arc<dyn UnitDataRegistry>,
    config: GameConfig,
    map: GameMap,
    rng: DeterministicRng,
    units: HashMap<UnitId, SimUnit>,
    /// Unit ids in spawn order; `fixed_update` iterates this.
    unit_order: Vec<UnitId>,
    units_by_team: HashMap<Team, Vec<UnitId>>,
    economy: EconomyManager,
    transport: TransportManager,
    buildings: BuildingManager,
    smoke: SmokeManager,
    buffer: CommandBuffer,
    player_teams: HashMap<PlayerId, Team>,
    tick: u64,
    phase: GamePhase,
    setup_started_tick: u64,
    battle_started_tick: u64,
    next_unit_serial: u64,
    stopped: AtomicBool,
    outbox: Vec<ServerMessage>,
}

impl AuthoritativeGame {
    pub fn new(registry: Arc<dyn UnitDataRegistry>, config: GameConfig, seed: u32) -> Self {
        let economy = EconomyManager::new(config.starting_credits, config.victory_threshold)
            .with_economy_tick(config.income_per_tick, config.economy_tick_secs);
        let buildings = BuildingManager::new(config.allow_mixed_garrison);
        Self {
            registry,
            config,
            map: GameMap::flat(0, 1.0, 1, 1),
            rng: DeterministicRng::seed_from_u32(seed),
            units: HashMap::new(),
            unit_order: Vec::new(),
            units_by_team: HashMap::from([(Team::Team1, Vec::new()), (Team::Team2, Vec::new())]),
            economy,
            transport: TransportManager::new(),
            buildings,
            smoke: SmokeManager::new(),
            buffer: CommandBuffer::new(),
            player_teams: HashMap::new(),
            tick: 0,
            phase: GamePhase::Loading,
            setup_started_tick: 0,
            battle_started_tick: 0,
            next_unit_serial: 0,
            stopped: AtomicBool::new(false),
            outbox: Vec::new(),
        }
    }

    /// Bind the map and roster, arm the deployment timer, and queue the
    /// `phase_change(deployment)` broadcast.
    pub fn initialize(&mut self, map: GameMap, players: &[(PlayerId, Team)]) {
        self.economy.configure_zones(map.capture_zones());
        self.buildings.register_sites(map.buildings());
        self.map = map;
        self.player_teams = players.iter().cloned().collect();
        self.phase = GamePhase::Setup;
        self.setup_started_tick = self.tick;
        self.outbox.push(ServerMessage::PhaseChange {
            phase: GamePhase::Setup,
            deployment_duration: Some(self.config.deployment_duration),
        });
        info!(players = players.len(), "game initialized, deployment phase");
    }

    /// Handle onto the inbound command buffer; sessions push through this
    /// without touching the game lock.
    pub fn command_buffer(&self) -> CommandBuffer {
        self.buffer.clone()
    }

    /// Append a command for the next tick. Never mutates simulation state.
    pub fn receive_command(&self, cmd: GameCommand) {
        if self.stopped.load(Ordering::Relaxed) {
            return;
        }
        self.buffer.push(cmd);
    }

    /// Halt the simulation; in-flight state stays readable for snapshots.
    pub fn stop(&mut self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    pub fn unit(&self, id: &UnitId) -> Option<&SimUnit> {
        self.units.get(id)
    }

    pub fn units_of_team(&self, team: Team) -> &[UnitId] {
        self.units_by_team
            .get(&team)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn credits(&self, team: Team) -> u32 {
        self.economy.credits(team)
    }

    pub fn team_of_player(&self, player: &PlayerId) -> Option<Team> {
        self.player_teams.get(player).copied()
    }

    /// Live units within `radius` of `center`. Mounted passengers are not
    /// part of the active world and never match.
    pub fn units_in_radius(&self, center: Vec2, radius: f32) -> Vec<&SimUnit> {
        self.unit_order
            .iter()
            .filter_map(|id| self.units.get(id))
            .filter(|u| u.is_alive() && !u.is_mounted())
            .filter(|u| u.position.distance(center) <= radius)
            .collect()
    }

    /// Advance the simulation by exactly one tick.
    ///
    /// Returns the broadcast messages for this tick in delivery order.
    /// An integrity error is fatal to the session; the caller must tear the
    /// session down without touching other sessions.
    pub fn process_tick(&mut self) -> Result<Vec<ServerMessage>, SimIntegrityError> {
        let dt = 1.0 / self.config.tick_rate as f32;
        self.tick += 1;

        // Drain and run this tick's commands; accepted ones are echoed in
        // the tick_update so clients replay them in the same order.
        let mut accepted = Vec::new();
        for cmd in self.buffer.drain() {
            match self.validate(&cmd) {
                Ok(()) => {
                    self.execute(&cmd);
                    accepted.push(cmd);
                }
                Err(reason) => {
                    warn!(tick = self.tick, %reason, "command rejected");
                }
            }
        }

        match self.phase {
            GamePhase::Setup => {
                // Tick-counted elapsed time; accumulating dt would drift.
                let elapsed = self.tick.saturating_sub(self.setup_started_tick) as f32 * dt;
                if elapsed >= self.config.deployment_duration {
                    self.transition_to_battle();
                }
            }
            GamePhase::Battle => {
                self.update_battle(dt)?;
            }
            GamePhase::Loading | GamePhase::Victory => {}
        }

        let checksum = self.checksum();
        let mut messages = std::mem::take(&mut self.outbox);
        messages.push(ServerMessage::TickUpdate {
            tick: self.tick,
            commands: accepted,
            checksum,
        });
        for event in self.economy.take_events() {
            messages.push(ServerMessage::GameEvent { event });
        }
        for event in self.transport.take_events() {
            messages.push(ServerMessage::GameEvent { event });
        }

        if self.phase == GamePhase::Battle {
            if let Some(winner) = self.economy.victory_winner() {
                self.phase = GamePhase::Victory;
                info!(?winner, tick = self.tick, "victory threshold reached");
                messages.push(ServerMessage::GameEvent {
                    event: GameEventBody::Victory {
                        winner,
                        score: self.economy.score(),
                    },
                });
                self.stop();
            }
        }

        Ok(messages)
    }

    fn transition_to_battle(&mut self) {
        self.phase = GamePhase::Battle;
        self.battle_started_tick = self.tick;
        for unit in self.units.values_mut() {
            unit.frozen = false;
        }
        self.outbox.push(ServerMessage::PhaseChange {
            phase: GamePhase::Battle,
            deployment_duration: None,
        });
        info!(tick = self.tick, "battle phase started");
    }

    fn update_battle(&mut self, dt: f32) -> Result<(), SimIntegrityError> {
        // Units update in spawn order; each sees every other unit.
        let order = self.unit_order.clone();
        for id in &order {
            let Some(mut unit) = self.units.remove(id) else {
                continue;
            };
            if !unit.is_alive() || unit.frozen || unit.is_mounted() {
                self.units.insert(id.clone(), unit);
                continue;
            }

            let intent = unit.fixed_update(
                dt,
                &mut TickCtx {
                    rng: &mut self.rng,
                    map: &self.map,
                    smoke: &self.smoke,
                    buildings: &self.buildings,
                    units: &mut self.units,
                    order: &self.unit_order,
                },
            );
            self.units.insert(id.clone(), unit);

            match intent {
                Some(UnitIntent::Mount { transport }) => self.resolve_mount(id, &transport),
                Some(UnitIntent::Garrison { building }) => self.resolve_garrison(id, &building),
                None => {}
            }
        }

        let zones_units: Vec<(UnitId, Team, Vec2)> = self
            .unit_order
            .iter()
            .filter_map(|id| self.units.get(id))
            .filter(|u| u.is_alive() && !u.is_mounted() && u.class.can_capture())
            .map(|u| (u.id.clone(), u.team, u.position))
            .collect();
        self.economy.update(dt, |zone| ZoneSurvey {
            entries: zones_units
                .iter()
                .filter(|(_, _, pos)| zone.contains(*pos))
                .map(|(id, team, _)| (id.clone(), *team))
                .collect(),
        });
        for (zone, team) in self.economy.zones_ready_to_flip() {
            self.economy.apply_zone_capture(&zone, team);
        }

        self.smoke.update(dt);
        self.transport.update(&self.units)?;

        // Dead units leave the world before the next tick; passengers go
        // down with their transport.
        let mut dead: Vec<UnitId> = Vec::new();
        for id in &self.unit_order {
            if let Some(unit) = self.units.get(id) {
                if !unit.is_alive() {
                    dead.push(id.clone());
                    dead.extend(unit.passengers.iter().cloned());
                }
            }
        }
        dead.dedup();
        for id in dead {
            self.destroy_unit(&id);
        }

        Ok(())
    }

    fn resolve_mount(&mut self, passenger: &UnitId, transport: &UnitId) {
        match self
            .transport
            .try_mount(&mut self.units, passenger, transport)
        {
            Ok(()) => {}
            Err(err) => {
                info!(unit = %passenger, %err, "mount failed");
                if let Some(unit) = self.units.get_mut(passenger) {
                    unit.clear_commands();
                }
            }
        }
    }

    fn resolve_garrison(&mut self, unit_id: &UnitId, building: &steelfront_protocol::BuildingId) {
        match self
            .buildings
            .try_garrison(&mut self.units, building, unit_id)
        {
            Ok(()) => {}
            Err(err) => {
                info!(unit = %unit_id, %err, "garrison failed");
                if let Some(unit) = self.units.get_mut(unit_id) {
                    unit.clear_commands();
                }
            }
        }
    }

    /// Validate a command against current authoritative state. Read-only:
    /// the RNG and every manager stay untouched.
    fn validate(&self, cmd: &GameCommand) -> Result<(), CommandError> {
        let player = cmd.player_id.as_ref().ok_or(CommandError::MissingPlayer)?;
        let team = *self
            .player_teams
            .get(player)
            .ok_or(CommandError::UnknownPlayer)?;

        if cmd.command_type.addresses_units() {
            if cmd.unit_ids.is_empty() {
                return Err(CommandError::EmptyUnitSelection);
            }
            for id in &cmd.unit_ids {
                let unit = self
                    .units
                    .get(id)
                    .filter(|u| u.is_alive())
                    .ok_or_else(|| CommandError::UnknownUnit(id.clone()))?;
                if unit.team != team {
                    return Err(CommandError::NotYourUnit(id.clone()));
                }
            }
        }

        if cmd.command_type.needs_target_point() {
            match (cmd.target_x, cmd.target_z) {
                (Some(x), Some(z)) if x.is_finite() && z.is_finite() => {}
                _ => return Err(CommandError::InvalidTarget),
            }
        }

        match cmd.command_type {
            CommandType::Attack | CommandType::Mount => {
                let target = cmd
                    .target_unit_id
                    .as_ref()
                    .ok_or(CommandError::MissingTargetUnit)?;
                if !self.units.get(target).is_some_and(|u| u.is_alive()) {
                    return Err(CommandError::InvalidTargetUnit);
                }
            }
            CommandType::SpawnUnit => {
                let unit_type = cmd
                    .unit_type
                    .as_deref()
                    .ok_or(CommandError::MissingUnitType)?;
                let spec = self
                    .registry
                    .unit_spec(unit_type)
                    .ok_or_else(|| CommandError::UnknownUnitType(unit_type.to_owned()))?;
                let available = self.economy.credits(team);
                if available < spec.cost {
                    return Err(CommandError::InsufficientCredits {
                        needed: spec.cost,
                        available,
                    });
                }
            }
            CommandType::Garrison => {
                let building = cmd
                    .building_id
                    .as_ref()
                    .ok_or(CommandError::MissingBuilding)?;
                if self.buildings.building(building).is_none() {
                    return Err(CommandError::UnknownBuilding);
                }
            }
            CommandType::DigIn => {
                for id in &cmd.unit_ids {
                    if !self
                        .units
                        .get(id)
                        .is_some_and(|u| u.class.can_dig_in())
                    {
                        return Err(CommandError::CannotDigIn);
                    }
                }
            }
            CommandType::SetReturnFireOnly => {
                if cmd.value.is_none() {
                    return Err(CommandError::MissingValue);
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Apply a validated command. Runs inside the tick, so manager and RNG
    /// access is legal here.
    fn execute(&mut self, cmd: &GameCommand) {
        let queue = cmd.queued();
        let target_point = match (cmd.target_x, cmd.target_z) {
            (Some(x), Some(z)) => Some(self.map.clamp(Vec2::new(x, z))),
            _ => None,
        };

        match cmd.command_type {
            CommandType::Move => {
                if let Some(target) = target_point {
                    self.order_each(&cmd.unit_ids, queue, |_| UnitCommand::Move { target });
                }
            }
            CommandType::FastMove => {
                if let Some(target) = target_point {
                    self.order_each(&cmd.unit_ids, queue, |_| UnitCommand::FastMove { target });
                }
            }
            CommandType::Reverse => {
                if let Some(target) = target_point {
                    self.order_each(&cmd.unit_ids, queue, |_| UnitCommand::Reverse { target });
                }
            }
            CommandType::AttackMove => {
                if let Some(target) = target_point {
                    self.order_each(&cmd.unit_ids, queue, |_| UnitCommand::AttackMove { target });
                }
            }
            CommandType::Attack => {
                if let Some(target) = cmd.target_unit_id.clone() {
                    self.order_each(&cmd.unit_ids, queue, |_| UnitCommand::Attack {
                        target: target.clone(),
                    });
                }
            }
            CommandType::Stop => {
                for id in &cmd.unit_ids {
                    if let Some(unit) = self.units.get_mut(id) {
                        unit.clear_commands();
                    }
                }
            }
            CommandType::Mount => {
                if let Some(transport) = cmd.target_unit_id.clone() {
                    self.order_each(&cmd.unit_ids, queue, |_| UnitCommand::Mount {
                        transport: transport.clone(),
                    });
                }
            }
            CommandType::Unload => {
                for id in &cmd.unit_ids {
                    self.transport
                        .unload_all(&mut self.units, id, &self.map, &mut self.rng);
                }
            }
            CommandType::Garrison => {
                if let Some(building) = cmd.building_id.clone() {
                    self.order_each(&cmd.unit_ids, queue, |_| UnitCommand::Garrison {
                        building: building.clone(),
                    });
                }
            }
            CommandType::Ungarrison => {
                for id in &cmd.unit_ids {
                    self.buildings
                        .ungarrison(&mut self.units, id, &self.map, &mut self.rng);
                }
            }
            CommandType::SpawnUnit => {
                self.execute_spawn(cmd);
            }
            CommandType::DigIn => {
                for id in &cmd.unit_ids {
                    let Some(position) = self.units.get(id).map(|u| u.position) else {
                        continue;
                    };
                    let building = self.buildings.spawn_defensive_structure(position);
                    if let Err(err) = self.buildings.try_garrison(&mut self.units, &building, id) {
                        info!(unit = %id, %err, "dig-in failed");
                    }
                }
            }
            CommandType::SetReturnFireOnly => {
                let value = cmd.value.unwrap_or(false);
                for id in &cmd.unit_ids {
                    if let Some(unit) = self.units.get_mut(id) {
                        unit.return_fire_only = value;
                    }
                }
            }
        }
    }

    fn order_each(
        &mut self,
        unit_ids: &[UnitId],
        queue: bool,
        mut make: impl FnMut(&UnitId) -> UnitCommand,
    ) {
        for id in unit_ids {
            if let Some(unit) = self.units.get_mut(id) {
                unit.give_command(make(id), queue);
            }
        }
    }

    fn execute_spawn(&mut self, cmd: &GameCommand) {
        let Some(player) = cmd.player_id.as_ref() else {
            return;
        };
        let Some(team) = self.player_teams.get(player).copied() else {
            return;
        };
        let Some(unit_type) = cmd.unit_type.as_deref() else {
            return;
        };
        let Some(spec) = self.registry.unit_spec(unit_type) else {
            return;
        };
        if !self.economy.try_spend(team, spec.cost) {
            return;
        }

        let requested = Vec2::new(
            cmd.target_x.unwrap_or_default(),
            cmd.target_z.unwrap_or_default(),
        );
        // During deployment, spawns are pinned inside the team's zone.
        let position = if self.phase == GamePhase::Setup {
            match self.map.deployment_zone(team) {
                Some(zone) => zone.clamp(requested),
                None => self.map.clamp(requested),
            }
        } else {
            self.map.clamp(requested)
        };

        let id = UnitId::new(format!("u{}", self.next_unit_serial));
        self.next_unit_serial += 1;

        let unit = SimUnit::from_spec(
            id.clone(),
            spec,
            team,
            player.clone(),
            position,
            0.0,
            self.phase == GamePhase::Setup,
        );
        self.unit_order.push(id.clone());
        self.units_by_team.entry(team).or_default().push(id.clone());
        self.units.insert(id.clone(), unit);
        info!(unit = %id, %unit_type, ?team, "unit spawned");
    }

    /// Remove a unit from every index: the world, its team list, building
    /// occupancy, transport relations, and other units' attack orders.
    pub fn destroy_unit(&mut self, id: &UnitId) {
        let stranded = self.transport.detach(&mut self.units, id);
        // Passengers of a destroyed transport are lost with it.
        for passenger in stranded {
            self.destroy_unit(&passenger);
        }

        let Some(unit) = self.units.remove(id) else {
            return;
        };
        self.unit_order.retain(|other| other != id);
        if let Some(team_list) = self.units_by_team.get_mut(&unit.team) {
            team_list.retain(|other| other != id);
        }
        self.buildings.remove_unit(id);
        for other in self.units.values_mut() {
            other.drop_attack_orders_on(id);
        }
        info!(unit = %id, "unit destroyed");
    }

    /// Deterministic state checksum for this tick.
    ///
    /// Units are visited in id-sorted order (iteration order must not leak
    /// into the hash) and float fields are projected to fixed point. The
    /// hash is seeded with the RNG state so RNG divergence shows up even
    /// when positions happen to agree.
    pub fn checksum(&self) -> u32 {
        let mut ids: Vec<&UnitId> = self.units.keys().collect();
        ids.sort();

        let mut hasher = StateHasher::with_seed(self.rng.state());
        for id in ids {
            let unit = &self.units[id];
            hasher.write_str(id.as_str());
            hasher.write_i32((unit.position.x * 100.0).floor() as i32);
            hasher.write_i32((unit.position.z * 100.0).floor() as i32);
            hasher.write_i32(unit.health.floor() as i32);
            hasher.write_i32(unit.morale.floor() as i32);
            hasher.write_i32(unit.suppression.floor() as i32);
            hasher.write_bool(unit.frozen);
            hasher.write_bool(unit.routing);
        }
        hasher.finish()
    }

    /// Full serializable state for resync, from one team's perspective.
    pub fn state_snapshot(&self, viewer: Team) -> StateSnapshot {
        let mut ids: Vec<&UnitId> = self.units.keys().collect();
        ids.sort();

        let units = ids
            .into_iter()
            .map(|id| {
                let unit = &self.units[id];
                UnitSnapshot {
                    id: unit.id.clone(),
                    unit_type: unit.unit_type.clone(),
                    team: unit.team,
                    owner_id: unit.owner.clone(),
                    x: unit.position.x,
                    y: self.map.elevation_at(unit.position),
                    z: unit.position.z,
                    health: unit.health,
                    morale: unit.morale,
                    rotation_y: unit.rotation_y,
                }
            })
            .collect();

        StateSnapshot {
            tick: self.tick,
            units,
            economy: EconomySnapshot {
                player_credits: self.economy.credits(viewer),
                enemy_credits: self.economy.credits(viewer.opponent()),
            },
            score: ScoreSnapshot {
                player: self.economy.score().get(viewer),
                enemy: self.economy.score().get(viewer.opponent()),
            },
            phase: self.phase,
        }
    }

    /// Drain messages queued outside `process_tick` (initialization).
    pub fn take_pending_messages(&mut self) -> Vec<ServerMessage> {
        std::mem::take(&mut self.outbox)
    }

    /// Seconds of battle played so far.
    pub fn battle_duration(&self) -> f32 {
        if self.phase == GamePhase::Setup || self.phase == GamePhase::Loading {
            return 0.0;
        }
        (self.tick.saturating_sub(self.battle_started_tick)) as f32
            / self.config.tick_rate as f32
    }

    pub fn score(&self) -> steelfront_protocol::TeamScore {
        self.economy.score()
    }

    pub fn victory_winner(&self) -> Option<Team> {
        self.economy.victory_winner()
    }
}
