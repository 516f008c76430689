use std::collections::{BTreeMap, BTreeSet, HashMap};

use thiserror::Error;
use tracing::debug;

use steelfront_protocol::{BuildingId, Team, UnitId, Vec2};

use crate::constants::{DEFENSIVE_STRUCTURE_CAPACITY, UNLOAD_RADIUS};
use crate::map::{BuildingSite, GameMap};
use crate::rng::DeterministicRng;
use crate::unit::SimUnit;

/// A garrisonable building.
#[derive(Clone, Debug)]
pub struct Building {
    pub id: BuildingId,
    pub position: Vec2,
    pub capacity: u32,
    pub occupants: BTreeSet<UnitId>,
    pub is_high_ground: bool,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GarrisonError {
    #[error("unknown building")]
    UnknownBuilding,
    #[error("unknown unit")]
    UnknownUnit,
    #[error("building is full")]
    CapacityExhausted,
    #[error("building is held by the other team")]
    EnemyOccupied,
    #[error("unit is already garrisoned")]
    AlreadyGarrisoned,
}

/// Owns every building of one match: the map's sites plus structures
/// spawned mid-game by entrenching heavy weapons.
#[derive(Debug)]
pub struct BuildingManager {
    buildings: BTreeMap<BuildingId, Building>,
    allow_mixed_teams: bool,
    next_structure: u32,
}

impl BuildingManager {
    pub fn new(allow_mixed_teams: bool) -> Self {
        Self {
            buildings: BTreeMap::new(),
            allow_mixed_teams,
            next_structure: 0,
        }
    }

    /// Register the map's initial building sites.
    pub fn register_sites(&mut self, sites: &[BuildingSite]) {
        for site in sites {
            self.buildings.insert(
                site.id.clone(),
                Building {
                    id: site.id.clone(),
                    position: site.position,
                    capacity: site.capacity,
                    occupants: BTreeSet::new(),
                    is_high_ground: site.is_high_ground,
                },
            );
        }
    }

    pub fn building(&self, id: &BuildingId) -> Option<&Building> {
        self.buildings.get(id)
    }

    pub fn buildings(&self) -> impl Iterator<Item = &Building> {
        self.buildings.values()
    }

    /// Place a unit into a building, enforcing capacity and the
    /// single-team occupancy policy.
    pub fn try_garrison(
        &mut self,
        units: &mut HashMap<UnitId, SimUnit>,
        building_id: &BuildingId,
        unit_id: &UnitId,
    ) -> Result<(), GarrisonError> {
        let unit_team = match units.get(unit_id) {
            Some(u) if u.garrisoned_in.is_some() => return Err(GarrisonError::AlreadyGarrisoned),
            Some(u) => u.team,
            None => return Err(GarrisonError::UnknownUnit),
        };

        let building = self
            .buildings
            .get_mut(building_id)
            .ok_or(GarrisonError::UnknownBuilding)?;

        if building.occupants.len() as u32 >= building.capacity {
            return Err(GarrisonError::CapacityExhausted);
        }
        if !self.allow_mixed_teams {
            let enemy_inside = building.occupants.iter().any(|id| {
                units
                    .get(id)
                    .is_some_and(|occupant| occupant.team != unit_team)
            });
            if enemy_inside {
                return Err(GarrisonError::EnemyOccupied);
            }
        }

        building.occupants.insert(unit_id.clone());
        if let Some(unit) = units.get_mut(unit_id) {
            unit.garrisoned_in = Some(building_id.clone());
            unit.position = building.position;
            unit.clear_commands();
        }
        debug!(unit = %unit_id, building = %building_id, "unit garrisoned");
        Ok(())
    }

    /// Remove a unit from its building and place it at a deterministic
    /// RNG-chosen exit around the footprint.
    pub fn ungarrison(
        &mut self,
        units: &mut HashMap<UnitId, SimUnit>,
        unit_id: &UnitId,
        map: &GameMap,
        rng: &mut DeterministicRng,
    ) -> Option<Vec2> {
        let building_id = units.get(unit_id)?.garrisoned_in.clone()?;
        let building = self.buildings.get_mut(&building_id)?;
        building.occupants.remove(unit_id);

        let angle = rng.next_float(0.0, std::f32::consts::TAU);
        let distance = rng.next_float(1.0, UNLOAD_RADIUS);
        let exit = map.clamp(
            building
                .position
                .add(Vec2::new(angle.sin() * distance, angle.cos() * distance)),
        );

        if let Some(unit) = units.get_mut(unit_id) {
            unit.garrisoned_in = None;
            unit.position = exit;
        }
        Some(exit)
    }

    /// Entrench a heavy-weapon unit: construct a defensive structure at the
    /// given position. Caller checks the unit class.
    pub fn spawn_defensive_structure(&mut self, position: Vec2) -> BuildingId {
        let id = BuildingId::new(format!("fort{}", self.next_structure));
        self.next_structure += 1;
        self.buildings.insert(
            id.clone(),
            Building {
                id: id.clone(),
                position,
                capacity: DEFENSIVE_STRUCTURE_CAPACITY,
                occupants: BTreeSet::new(),
                is_high_ground: false,
            },
        );
        id
    }

    /// Drop a destroyed unit from any occupancy list.
    pub fn remove_unit(&mut self, unit_id: &UnitId) {
        for building in self.buildings.values_mut() {
            building.occupants.remove(unit_id);
        }
    }

    /// Team holding a building, when occupancy is single-team.
    pub fn occupying_team(
        &self,
        units: &HashMap<UnitId, SimUnit>,
        building_id: &BuildingId,
    ) -> Option<Team> {
        let building = self.buildings.get(building_id)?;
        let mut team = None;
        for id in &building.occupants {
            let t = units.get(id)?.team;
            match team {
                None => team = Some(t),
                Some(existing) if existing != t => return None,
                Some(_) => {}
            }
        }
        team
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{StaticUnitRegistry, UnitDataRegistry};
    use steelfront_protocol::PlayerId;

    fn unit(id: &str, team: Team) -> SimUnit {
        let registry = StaticUnitRegistry::embedded();
        SimUnit::from_spec(
            UnitId::from(id),
            registry.unit_spec("inf_a").unwrap(),
            team,
            PlayerId::from("p"),
            Vec2::new(10.0, 10.0),
            0.0,
            false,
        )
    }

    fn manager_with_house() -> BuildingManager {
        let mut manager = BuildingManager::new(false);
        manager.register_sites(&[BuildingSite {
            id: BuildingId::from("house"),
            position: Vec2::new(12.0, 10.0),
            capacity: 2,
            is_high_ground: false,
        }]);
        manager
    }

    #[test]
    fn garrison_enforces_capacity_and_team() {
        let mut manager = manager_with_house();
        let mut units = HashMap::new();
        for (id, team) in [
            ("a", Team::Team1),
            ("b", Team::Team1),
            ("c", Team::Team1),
            ("e", Team::Team2),
        ] {
            units.insert(UnitId::from(id), unit(id, team));
        }
        let house = BuildingId::from("house");

        manager
            .try_garrison(&mut units, &house, &UnitId::from("a"))
            .unwrap();
        assert_eq!(
            manager.try_garrison(&mut units, &house, &UnitId::from("e")),
            Err(GarrisonError::EnemyOccupied)
        );
        manager
            .try_garrison(&mut units, &house, &UnitId::from("b"))
            .unwrap();
        assert_eq!(
            manager.try_garrison(&mut units, &house, &UnitId::from("c")),
            Err(GarrisonError::CapacityExhausted)
        );

        assert_eq!(
            manager.occupying_team(&units, &house),
            Some(Team::Team1)
        );
        assert_eq!(
            units[&UnitId::from("a")].garrisoned_in,
            Some(house.clone())
        );
    }

    #[test]
    fn ungarrison_exits_near_the_building() {
        let mut manager = manager_with_house();
        let map = GameMap::flat(1, 10.0, 10, 10);
        let mut units = HashMap::new();
        units.insert(UnitId::from("a"), unit("a", Team::Team1));
        let house = BuildingId::from("house");

        manager
            .try_garrison(&mut units, &house, &UnitId::from("a"))
            .unwrap();

        let mut rng = DeterministicRng::seed_from_u32(4);
        let exit = manager
            .ungarrison(&mut units, &UnitId::from("a"), &map, &mut rng)
            .unwrap();
        let unit = &units[&UnitId::from("a")];
        assert!(unit.garrisoned_in.is_none());
        assert_eq!(unit.position, exit);
        let dist = exit.distance(Vec2::new(12.0, 10.0));
        assert!(dist <= UNLOAD_RADIUS + 1e-3);
        assert!(manager.building(&house).unwrap().occupants.is_empty());
    }

    #[test]
    fn defensive_structures_get_fresh_ids() {
        let mut manager = manager_with_house();
        let a = manager.spawn_defensive_structure(Vec2::new(1.0, 1.0));
        let b = manager.spawn_defensive_structure(Vec2::new(2.0, 2.0));
        assert_ne!(a, b);
        assert!(manager.building(&a).is_some());
        assert_eq!(
            manager.building(&b).unwrap().capacity,
            DEFENSIVE_STRUCTURE_CAPACITY
        );
    }
}
