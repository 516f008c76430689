use std::collections::{BTreeSet, HashMap, VecDeque};

use steelfront_protocol::{BuildingId, PlayerId, Team, UnitId, Vec2};

use crate::buildings::BuildingManager;
use crate::combat::{resolve_shot, ShotOutcome};
use crate::constants::{
    ARRIVAL_EPSILON, COMMAND_QUEUE_CAP, FAST_MOVE_FACTOR, MORALE_MAX, MORALE_RECOVERY_PER_SEC,
    RETURN_FIRE_MEMORY_SECS, REVERSE_SPEED_FACTOR, SUPPRESSION_DECAY_PER_SEC,
};
use crate::map::GameMap;
use crate::registry::{ArmorProfile, UnitClass, UnitSpec, WeaponSpec};
use crate::rng::DeterministicRng;
use crate::smoke::SmokeManager;

/// Persistent per-unit order. One of these is always the unit's current
/// state; the rest wait in a bounded FIFO queue.
///
/// Instantaneous orders (stop, unload, ungarrison, spawn, dig-in,
/// return-fire toggle) act in the command layer and never become a state.
#[derive(Clone, Debug, PartialEq)]
pub enum UnitCommand {
    Idle,
    Move { target: Vec2 },
    FastMove { target: Vec2 },
    Reverse { target: Vec2 },
    Attack { target: UnitId },
    AttackMove { target: Vec2 },
    Mount { transport: UnitId },
    Garrison { building: BuildingId },
}

/// Side effect a unit requests on arrival; resolved by the game against the
/// transport/building managers after the unit's update.
#[derive(Clone, Debug, PartialEq)]
pub enum UnitIntent {
    Mount { transport: UnitId },
    Garrison { building: BuildingId },
}

/// One weapon slot: the static spec plus its live cooldown.
#[derive(Clone, Debug)]
pub struct WeaponState {
    pub spec: WeaponSpec,
    pub cooldown: f32,
}

/// Borrowed view of the world handed to a unit for one tick.
///
/// The updating unit is temporarily absent from `units`; `order` is the
/// deterministic insertion-order id list that target acquisition iterates.
pub struct TickCtx<'a> {
    pub rng: &'a mut DeterministicRng,
    pub map: &'a GameMap,
    pub smoke: &'a SmokeManager,
    pub buildings: &'a BuildingManager,
    pub units: &'a mut HashMap<UnitId, SimUnit>,
    pub order: &'a [UnitId],
}

/// A simulated unit.
#[derive(Clone, Debug)]
pub struct SimUnit {
    // Immutable after spawn.
    pub id: UnitId,
    pub unit_type: String,
    pub class: UnitClass,
    pub team: Team,
    pub owner: PlayerId,
    pub max_health: f32,
    pub speed: f32,
    pub rotation_speed: f32,
    pub armor: ArmorProfile,
    pub transport_capacity: u32,

    // Mutable state.
    pub position: Vec2,
    pub rotation_y: f32,
    pub health: f32,
    pub morale: f32,
    pub suppression: f32,
    pub frozen: bool,
    pub routing: bool,
    pub garrisoned_in: Option<BuildingId>,
    pub transport: Option<UnitId>,
    pub passengers: BTreeSet<UnitId>,
    pub return_fire_only: bool,
    pub weapons: Vec<WeaponState>,

    /// Who shot at us recently, with seconds since the hit.
    recent_attackers: Vec<(UnitId, f32)>,
    current: UnitCommand,
    queue: VecDeque<UnitCommand>,
}

impl SimUnit {
    pub fn from_spec(
        id: UnitId,
        spec: &UnitSpec,
        team: Team,
        owner: PlayerId,
        position: Vec2,
        rotation_y: f32,
        frozen: bool,
    ) -> Self {
        Self {
            id,
            unit_type: spec.unit_type.clone(),
            class: spec.class,
            team,
            owner,
            max_health: spec.max_health,
            speed: spec.speed,
            rotation_speed: spec.rotation_speed,
            armor: spec.armor,
            transport_capacity: spec.transport_capacity,
            position,
            rotation_y,
            health: spec.max_health,
            morale: MORALE_MAX,
            suppression: 0.0,
            frozen,
            routing: false,
            garrisoned_in: None,
            transport: None,
            passengers: BTreeSet::new(),
            return_fire_only: false,
            weapons: spec
                .weapons
                .iter()
                .map(|w| WeaponState {
                    spec: w.clone(),
                    cooldown: 0.0,
                })
                .collect(),
            recent_attackers: Vec::new(),
            current: UnitCommand::Idle,
            queue: VecDeque::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Mounted units leave the active world: no spatial presence, no fire.
    pub fn is_mounted(&self) -> bool {
        self.transport.is_some()
    }

    pub fn current_command(&self) -> &UnitCommand {
        &self.current
    }

    pub fn queued_commands(&self) -> usize {
        self.queue.len()
    }

    /// Accept an order. Non-queued orders replace the current state and the
    /// whole queue; queued orders append, dropping past the cap.
    pub fn give_command(&mut self, cmd: UnitCommand, queue: bool) {
        if queue && self.current != UnitCommand::Idle {
            if self.queue.len() < COMMAND_QUEUE_CAP {
                self.queue.push_back(cmd);
            } else {
                tracing::warn!(unit = %self.id, "command queue full, order dropped");
            }
        } else {
            self.queue.clear();
            self.current = cmd;
        }
    }

    pub fn clear_commands(&mut self) {
        self.queue.clear();
        self.current = UnitCommand::Idle;
    }

    /// Forget a destroyed unit: clear it as an attack target, drop queued
    /// attacks on it, and purge it from the attacker memory.
    pub fn drop_attack_orders_on(&mut self, target: &UnitId) {
        if matches!(&self.current, UnitCommand::Attack { target: t } if t == target) {
            self.current = UnitCommand::Idle;
        }
        self.queue
            .retain(|c| !matches!(c, UnitCommand::Attack { target: t } if t == target));
        self.recent_attackers.retain(|(id, _)| id != target);
    }

    pub fn note_attacked_by(&mut self, attacker: UnitId) {
        if let Some(entry) = self.recent_attackers.iter_mut().find(|(id, _)| *id == attacker) {
            entry.1 = 0.0;
        } else {
            self.recent_attackers.push((attacker, 0.0));
        }
    }

    pub fn apply_hit(&mut self, damage: f32, morale_hit: f32) {
        self.health -= damage;
        self.morale = (self.morale - morale_hit).max(0.0);
        self.suppression += morale_hit;
    }

    fn max_weapon_range(&self) -> f32 {
        self.weapons
            .iter()
            .map(|w| w.spec.range)
            .fold(0.0, f32::max)
    }

    /// Advance to the next queued order, or go idle.
    fn advance_queue(&mut self) {
        self.current = self.queue.pop_front().unwrap_or(UnitCommand::Idle);
    }

    /// Per-tick update. The game only calls this for live, unfrozen,
    /// unmounted units; the fixed internal order (morale, command dispatch,
    /// movement, acquisition, weapons) is part of the lockstep contract.
    pub fn fixed_update(&mut self, dt: f32, ctx: &mut TickCtx<'_>) -> Option<UnitIntent> {
        self.update_morale(dt);

        if self.routing {
            // Routed troops ignore orders until morale recovers.
            self.tick_cooldowns(dt);
            return None;
        }

        let intent = self.dispatch_command(dt, ctx);

        let target = self.combat_target(ctx);
        self.update_weapons(dt, target, ctx);

        intent
    }

    fn update_morale(&mut self, dt: f32) {
        for entry in &mut self.recent_attackers {
            entry.1 += dt;
        }
        self.recent_attackers
            .retain(|(_, age)| *age < RETURN_FIRE_MEMORY_SECS);

        self.suppression = (self.suppression - SUPPRESSION_DECAY_PER_SEC * dt).max(0.0);
        if self.recent_attackers.is_empty() {
            self.morale = (self.morale + MORALE_RECOVERY_PER_SEC * dt).min(MORALE_MAX);
        }
        self.routing = self.morale <= 0.0;
    }

    fn dispatch_command(&mut self, dt: f32, ctx: &mut TickCtx<'_>) -> Option<UnitIntent> {
        // Garrisoned units hold inside their building; orders wait until an
        // explicit ungarrison puts them back on the field.
        if self.garrisoned_in.is_some() {
            return None;
        }
        match self.current.clone() {
            UnitCommand::Idle => {
                self.advance_queue();
                None
            }
            UnitCommand::Move { target } => {
                if self.integrate_move(target, dt, 1.0, false) {
                    self.advance_queue();
                }
                None
            }
            UnitCommand::FastMove { target } => {
                if self.integrate_move(target, dt, FAST_MOVE_FACTOR, false) {
                    self.advance_queue();
                }
                None
            }
            UnitCommand::Reverse { target } => {
                if self.integrate_move(target, dt, REVERSE_SPEED_FACTOR, true) {
                    self.advance_queue();
                }
                None
            }
            UnitCommand::Attack { target } => {
                match ctx.units.get(&target) {
                    Some(enemy) if enemy.is_alive() && !enemy.is_mounted() => {
                        let enemy_pos = enemy.position;
                        let dist = self.position.distance(enemy_pos);
                        if dist > self.max_weapon_range() {
                            self.integrate_move(enemy_pos, dt, 1.0, false);
                        } else {
                            self.turn_towards_point(enemy_pos, dt);
                        }
                    }
                    _ => {
                        // Target dead, mounted, or missing.
                        self.current = UnitCommand::Idle;
                        self.advance_queue();
                    }
                }
                None
            }
            UnitCommand::AttackMove { target } => {
                if let Some(enemy) = self.acquire_nearest_enemy(ctx, self.max_weapon_range()) {
                    // Engage, keeping the march order at the head of the
                    // queue to resume once the threat is gone.
                    self.queue.push_front(UnitCommand::AttackMove { target });
                    self.current = UnitCommand::Attack { target: enemy };
                } else if self.integrate_move(target, dt, 1.0, false) {
                    self.advance_queue();
                }
                None
            }
            UnitCommand::Mount { transport } => match ctx.units.get(&transport) {
                Some(t) if t.is_alive() && !t.is_mounted() => {
                    let pos = t.position;
                    if self.position.distance(pos) <= crate::constants::MOUNT_RANGE {
                        Some(UnitIntent::Mount { transport })
                    } else {
                        self.integrate_move(pos, dt, 1.0, false);
                        None
                    }
                }
                _ => {
                    self.current = UnitCommand::Idle;
                    self.advance_queue();
                    None
                }
            },
            UnitCommand::Garrison { building } => match ctx.buildings.building(&building) {
                Some(b) => {
                    let pos = b.position;
                    if self.position.distance(pos) <= crate::constants::GARRISON_RANGE {
                        Some(UnitIntent::Garrison { building })
                    } else {
                        self.integrate_move(pos, dt, 1.0, false);
                        None
                    }
                }
                None => {
                    self.current = UnitCommand::Idle;
                    self.advance_queue();
                    None
                }
            },
        }
    }

    /// Rotation-bounded turn toward the travel direction, then a straight
    /// translation capped by `speed * factor * dt`. Returns true on arrival.
    fn integrate_move(&mut self, target: Vec2, dt: f32, factor: f32, reverse: bool) -> bool {
        let to_target = target.sub(self.position);
        let dist = to_target.length();
        if dist <= ARRIVAL_EPSILON {
            return true;
        }

        let dir = to_target.scale(1.0 / dist);
        let face = if reverse { dir.scale(-1.0) } else { dir };
        let desired = face.x.atan2(face.z);
        self.rotation_y = turn_towards(self.rotation_y, desired, self.rotation_speed * dt);

        let step = (self.speed * factor * dt).min(dist);
        self.position = self.position.add(dir.scale(step));

        self.position.distance(target) <= ARRIVAL_EPSILON
    }

    fn turn_towards_point(&mut self, point: Vec2, dt: f32) {
        let dir = point.sub(self.position).normalized();
        if dir.length() > 0.0 {
            let desired = dir.x.atan2(dir.z);
            self.rotation_y = turn_towards(self.rotation_y, desired, self.rotation_speed * dt);
        }
    }

    /// Pick the target the weapon cycle fires at this tick.
    ///
    /// Priority: the explicit attack target, then (in return-fire mode) the
    /// nearest remembered attacker, then, for units holding position, the
    /// nearest enemy inside weapon range.
    fn combat_target(&self, ctx: &TickCtx<'_>) -> Option<UnitId> {
        if let UnitCommand::Attack { target } = &self.current {
            if ctx
                .units
                .get(target)
                .is_some_and(|u| u.is_alive() && !u.is_mounted())
            {
                return Some(target.clone());
            }
        }

        if self.return_fire_only {
            return self.nearest_recent_attacker(ctx);
        }

        if matches!(self.current, UnitCommand::Idle) {
            return self.acquire_nearest_enemy(ctx, self.max_weapon_range());
        }

        None
    }

    fn nearest_recent_attacker(&self, ctx: &TickCtx<'_>) -> Option<UnitId> {
        let range = self.max_weapon_range();
        let mut best: Option<(f32, &UnitId)> = None;
        for (id, _) in &self.recent_attackers {
            let Some(unit) = ctx.units.get(id) else {
                continue;
            };
            if !unit.is_alive() || unit.is_mounted() || unit.team == self.team {
                continue;
            }
            let dist = self.position.distance(unit.position);
            if dist > range {
                continue;
            }
            if best.is_none_or(|(d, _)| dist < d) {
                best = Some((dist, id));
            }
        }
        best.map(|(_, id)| id.clone())
    }

    /// Nearest live enemy within `range`, iterating in the deterministic
    /// insertion order so ties resolve identically on every node. Mounted
    /// passengers never appear in the scan.
    fn acquire_nearest_enemy(&self, ctx: &TickCtx<'_>, range: f32) -> Option<UnitId> {
        let mut best: Option<(f32, &UnitId)> = None;
        for id in ctx.order {
            if *id == self.id {
                continue;
            }
            let Some(unit) = ctx.units.get(id) else {
                continue;
            };
            if unit.team == self.team || !unit.is_alive() || unit.is_mounted() {
                continue;
            }
            let dist = self.position.distance(unit.position);
            if dist > range {
                continue;
            }
            if best.is_none_or(|(d, _)| dist < d) {
                best = Some((dist, id));
            }
        }
        best.map(|(_, id)| id.clone())
    }

    fn tick_cooldowns(&mut self, dt: f32) {
        for weapon in &mut self.weapons {
            weapon.cooldown = (weapon.cooldown - dt).max(0.0);
        }
    }

    fn update_weapons(&mut self, dt: f32, target: Option<UnitId>, ctx: &mut TickCtx<'_>) {
        self.tick_cooldowns(dt);

        let Some(target_id) = target else {
            return;
        };

        let attacker_pos = self.position;
        let attacker_id = self.id.clone();

        for weapon in &mut self.weapons {
            if weapon.cooldown > 0.0 {
                continue;
            }
            let Some(defender) = ctx.units.get(&target_id) else {
                return;
            };
            if !defender.is_alive() {
                return;
            }
            if attacker_pos.distance(defender.position) > weapon.spec.range {
                continue;
            }

            let outcome = resolve_shot(
                attacker_pos,
                &weapon.spec,
                defender,
                ctx.map,
                ctx.smoke,
                ctx.rng,
            );
            weapon.cooldown = weapon.spec.reload_secs;

            match outcome {
                ShotOutcome::Miss => {}
                ShotOutcome::Ricochet { morale_hit } => {
                    if let Some(defender) = ctx.units.get_mut(&target_id) {
                        defender.apply_hit(0.0, morale_hit);
                        defender.note_attacked_by(attacker_id.clone());
                    }
                }
                ShotOutcome::Hit { damage, morale_hit } => {
                    if let Some(defender) = ctx.units.get_mut(&target_id) {
                        defender.apply_hit(damage, morale_hit);
                        defender.note_attacked_by(attacker_id.clone());
                    }
                }
            }
        }
    }
}

/// Shortest-path turn toward `desired`, clamped to `max_step` radians.
fn turn_towards(current: f32, desired: f32, max_step: f32) -> f32 {
    let mut delta = desired - current;
    while delta > std::f32::consts::PI {
        delta -= std::f32::consts::TAU;
    }
    while delta < -std::f32::consts::PI {
        delta += std::f32::consts::TAU;
    }
    current + delta.clamp(-max_step, max_step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{StaticUnitRegistry, UnitDataRegistry};

    fn spawn(id: &str, unit_type: &str, team: Team, pos: Vec2) -> SimUnit {
        let registry = StaticUnitRegistry::embedded();
        let spec = registry.unit_spec(unit_type).expect("spec");
        SimUnit::from_spec(
            UnitId::from(id),
            spec,
            team,
            PlayerId::from(match team {
                Team::Team1 => "p1",
                Team::Team2 => "p2",
            }),
            pos,
            0.0,
            false,
        )
    }

    struct World {
        rng: DeterministicRng,
        map: GameMap,
        smoke: SmokeManager,
        buildings: BuildingManager,
        units: HashMap<UnitId, SimUnit>,
        order: Vec<UnitId>,
    }

    impl World {
        fn new() -> Self {
            Self {
                rng: DeterministicRng::seed_from_u32(1),
                map: GameMap::flat(1, 10.0, 20, 20),
                smoke: SmokeManager::new(),
                buildings: BuildingManager::new(false),
                units: HashMap::new(),
                order: Vec::new(),
            }
        }

        fn add(&mut self, unit: SimUnit) {
            self.order.push(unit.id.clone());
            self.units.insert(unit.id.clone(), unit);
        }

        fn step(&mut self, id: &str, dt: f32) -> Option<UnitIntent> {
            let uid = UnitId::from(id);
            let mut unit = self.units.remove(&uid).expect("unit");
            let intent = unit.fixed_update(
                dt,
                &mut TickCtx {
                    rng: &mut self.rng,
                    map: &self.map,
                    smoke: &self.smoke,
                    buildings: &self.buildings,
                    units: &mut self.units,
                    order: &self.order,
                },
            );
            self.units.insert(uid, unit);
            intent
        }
    }

    #[test]
    fn move_command_reaches_target_and_pops_queue() {
        let mut world = World::new();
        let mut unit = spawn("u0", "inf_a", Team::Team1, Vec2::new(10.0, 10.0));
        unit.give_command(
            UnitCommand::Move {
                target: Vec2::new(13.0, 10.0),
            },
            false,
        );
        unit.give_command(
            UnitCommand::Move {
                target: Vec2::new(13.0, 13.0),
            },
            true,
        );
        assert_eq!(unit.queued_commands(), 1);
        world.add(unit);

        // 3 world units at speed 3 → one second, plus slack for the epsilon.
        for _ in 0..62 {
            world.step("u0", 1.0 / 60.0);
        }
        let unit = &world.units[&UnitId::from("u0")];
        assert!(unit.position.distance(Vec2::new(13.0, 10.0)) < 0.5);
        // First leg done; the queued leg is now current.
        assert!(matches!(unit.current_command(), UnitCommand::Move { .. }));
        assert_eq!(unit.queued_commands(), 0);
    }

    #[test]
    fn non_queued_command_replaces_queue() {
        let mut unit = spawn("u0", "inf_a", Team::Team1, Vec2::ZERO);
        unit.give_command(
            UnitCommand::Move {
                target: Vec2::new(5.0, 0.0),
            },
            false,
        );
        unit.give_command(
            UnitCommand::Move {
                target: Vec2::new(9.0, 0.0),
            },
            true,
        );
        assert_eq!(unit.queued_commands(), 1);

        unit.give_command(
            UnitCommand::Move {
                target: Vec2::new(1.0, 1.0),
            },
            false,
        );
        assert_eq!(unit.queued_commands(), 0);
        assert_eq!(
            *unit.current_command(),
            UnitCommand::Move {
                target: Vec2::new(1.0, 1.0)
            }
        );
    }

    #[test]
    fn queue_is_bounded() {
        let mut unit = spawn("u0", "inf_a", Team::Team1, Vec2::ZERO);
        unit.give_command(
            UnitCommand::Move {
                target: Vec2::new(5.0, 0.0),
            },
            false,
        );
        for i in 0..COMMAND_QUEUE_CAP + 4 {
            unit.give_command(
                UnitCommand::Move {
                    target: Vec2::new(i as f32, 0.0),
                },
                true,
            );
        }
        assert_eq!(unit.queued_commands(), COMMAND_QUEUE_CAP);
    }

    #[test]
    fn attack_on_dead_target_degrades_to_idle() {
        let mut world = World::new();
        let mut attacker = spawn("u0", "tank_a", Team::Team1, Vec2::new(10.0, 10.0));
        attacker.give_command(
            UnitCommand::Attack {
                target: UnitId::from("ghost"),
            },
            false,
        );
        world.add(attacker);

        world.step("u0", 1.0 / 60.0);
        let unit = &world.units[&UnitId::from("u0")];
        assert_eq!(*unit.current_command(), UnitCommand::Idle);
    }

    #[test]
    fn idle_unit_engages_enemy_in_range() {
        let mut world = World::new();
        let mut attacker = spawn("u0", "tank_a", Team::Team1, Vec2::new(10.0, 10.0));
        // Guaranteed hits keep the test independent of the roll sequence.
        attacker.weapons[0].spec.accuracy = 1.0;
        let victim = spawn("u1", "inf_a", Team::Team2, Vec2::new(10.0, 20.0));
        world.add(attacker);
        world.add(victim);

        world.step("u0", 1.0 / 60.0);
        let victim = &world.units[&UnitId::from("u1")];
        assert!(
            victim.health < victim.max_health,
            "idle tank should auto-engage an enemy in range"
        );
    }

    #[test]
    fn return_fire_only_ignores_strangers() {
        let mut world = World::new();
        let mut gunner = spawn("u0", "tank_a", Team::Team1, Vec2::new(10.0, 10.0));
        gunner.return_fire_only = true;
        gunner.weapons[0].spec.accuracy = 1.0;
        let bystander = spawn("u1", "inf_a", Team::Team2, Vec2::new(10.0, 20.0));
        world.add(gunner);
        world.add(bystander);

        for _ in 0..300 {
            world.step("u0", 1.0 / 60.0);
        }
        let bystander = &world.units[&UnitId::from("u1")];
        assert_eq!(bystander.health, bystander.max_health);

        // Once shot at, the gunner answers.
        world
            .units
            .get_mut(&UnitId::from("u0"))
            .unwrap()
            .note_attacked_by(UnitId::from("u1"));
        world.step("u0", 1.0 / 60.0);
        let bystander = &world.units[&UnitId::from("u1")];
        assert!(bystander.health < bystander.max_health);
    }

    #[test]
    fn routing_unit_ignores_orders_and_recovers() {
        let mut world = World::new();
        let mut unit = spawn("u0", "inf_a", Team::Team1, Vec2::new(10.0, 10.0));
        unit.apply_hit(0.0, MORALE_MAX + 10.0);
        // Fresh attacker memory keeps morale from recovering immediately.
        unit.note_attacked_by(UnitId::from("ghost"));
        unit.give_command(
            UnitCommand::Move {
                target: Vec2::new(15.0, 10.0),
            },
            false,
        );
        world.add(unit);

        world.step("u0", 1.0 / 60.0);
        let unit = &world.units[&UnitId::from("u0")];
        assert!(unit.routing);
        assert_eq!(unit.position, Vec2::new(10.0, 10.0));

        // With no fresh fire, morale climbs back and the route state clears.
        for _ in 0..600 {
            world.step("u0", 1.0 / 60.0);
        }
        let unit = &world.units[&UnitId::from("u0")];
        assert!(!unit.routing);
        assert!(unit.position.x > 10.0, "recovered unit resumes its order");
    }

    #[test]
    fn reverse_keeps_nose_away_from_travel() {
        let mut world = World::new();
        let mut unit = spawn("u0", "tank_a", Team::Team1, Vec2::new(10.0, 10.0));
        // Facing +z, backing up toward -z keeps the front plate at +z.
        unit.give_command(
            UnitCommand::Reverse {
                target: Vec2::new(10.0, 5.0),
            },
            false,
        );
        world.add(unit);

        for _ in 0..60 {
            world.step("u0", 1.0 / 60.0);
        }
        let unit = &world.units[&UnitId::from("u0")];
        assert!(unit.position.z < 10.0);
        // Desired facing is the opposite of travel: +z, i.e. rotation 0.
        assert!(unit.rotation_y.abs() < 0.2);
    }

    #[test]
    fn mount_intent_emitted_in_range() {
        let mut world = World::new();
        let mut rider = spawn("u0", "inf_a", Team::Team1, Vec2::new(10.0, 10.0));
        let apc = spawn("u1", "apc_a", Team::Team1, Vec2::new(11.0, 10.0));
        rider.give_command(
            UnitCommand::Mount {
                transport: UnitId::from("u1"),
            },
            false,
        );
        world.add(rider);
        world.add(apc);

        let intent = world.step("u0", 1.0 / 60.0);
        assert_eq!(
            intent,
            Some(UnitIntent::Mount {
                transport: UnitId::from("u1")
            })
        );
    }
}
