use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use steelfront_protocol::{BuildingId, CaptureZone, Team, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainKind {
    Plain,
    Forest,
    Road,
    Urban,
    Water,
}

/// One cell of the terrain grid.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TerrainCell {
    pub kind: TerrainKind,
    /// Elevation in world units; purely presentational for the sim.
    pub elevation: f32,
    /// Cover value in `[0, 1]` scaled into a damage reduction by the
    /// combat model.
    pub cover: f32,
}

impl TerrainCell {
    pub fn flat() -> Self {
        Self {
            kind: TerrainKind::Plain,
            elevation: 0.0,
            cover: 0.0,
        }
    }
}

/// A building present on the map at match start.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildingSite {
    pub id: BuildingId,
    pub position: Vec2,
    pub capacity: u32,
    pub is_high_ground: bool,
}

/// Axis-aligned region where a team may deploy during setup.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DeploymentZone {
    pub min: Vec2,
    pub max: Vec2,
}

impl DeploymentZone {
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.min.x, self.max.x),
            p.z.clamp(self.min.z, self.max.z),
        )
    }
}

/// Immutable battlefield description, produced by the (external) map
/// generator and treated as read-only by the simulation.
#[derive(Clone, Debug)]
pub struct GameMap {
    seed: u64,
    cell_size: f32,
    width: u32,
    height: u32,
    cells: Vec<TerrainCell>,
    capture_zones: Vec<CaptureZone>,
    buildings: Vec<BuildingSite>,
    deployment_zones: HashMap<Team, DeploymentZone>,
}

impl GameMap {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        seed: u64,
        cell_size: f32,
        width: u32,
        height: u32,
        cells: Vec<TerrainCell>,
        capture_zones: Vec<CaptureZone>,
        buildings: Vec<BuildingSite>,
        deployment_zones: HashMap<Team, DeploymentZone>,
    ) -> Self {
        debug_assert_eq!(cells.len(), (width as usize) * (height as usize));
        Self {
            seed,
            cell_size,
            width,
            height,
            cells,
            capture_zones,
            buildings,
            deployment_zones,
        }
    }

    /// Uniform flat map with no zones or buildings; the base for tests and
    /// for callers that add features onto it.
    pub fn flat(seed: u64, cell_size: f32, width: u32, height: u32) -> Self {
        let cells = vec![TerrainCell::flat(); (width as usize) * (height as usize)];
        Self::new(
            seed,
            cell_size,
            width,
            height,
            cells,
            Vec::new(),
            Vec::new(),
            HashMap::new(),
        )
    }

    pub fn with_capture_zones(mut self, zones: Vec<CaptureZone>) -> Self {
        self.capture_zones = zones;
        self
    }

    pub fn with_buildings(mut self, buildings: Vec<BuildingSite>) -> Self {
        self.buildings = buildings;
        self
    }

    pub fn with_deployment_zone(mut self, team: Team, zone: DeploymentZone) -> Self {
        self.deployment_zones.insert(team, zone);
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// World-space extents: `(max_x, max_z)` with the origin at `(0, 0)`.
    pub fn extents(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.cell_size,
            self.height as f32 * self.cell_size,
        )
    }

    /// Clamp a point onto the map.
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        let ext = self.extents();
        Vec2::new(p.x.clamp(0.0, ext.x), p.z.clamp(0.0, ext.z))
    }

    pub fn cell_at(&self, p: Vec2) -> Option<&TerrainCell> {
        if p.x < 0.0 || p.z < 0.0 {
            return None;
        }
        let cx = (p.x / self.cell_size) as u32;
        let cz = (p.z / self.cell_size) as u32;
        if cx >= self.width || cz >= self.height {
            return None;
        }
        self.cells.get((cz * self.width + cx) as usize)
    }

    /// Terrain cover at a point, 0 off-map.
    pub fn cover_at(&self, p: Vec2) -> f32 {
        self.cell_at(p).map_or(0.0, |c| c.cover)
    }

    /// Terrain elevation at a point, 0 off-map.
    pub fn elevation_at(&self, p: Vec2) -> f32 {
        self.cell_at(p).map_or(0.0, |c| c.elevation)
    }

    pub fn capture_zones(&self) -> &[CaptureZone] {
        &self.capture_zones
    }

    pub fn buildings(&self) -> &[BuildingSite] {
        &self.buildings
    }

    pub fn deployment_zone(&self, team: Team) -> Option<&DeploymentZone> {
        self.deployment_zones.get(&team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pins_to_extents() {
        let map = GameMap::flat(1, 10.0, 10, 8);
        assert_eq!(map.extents(), Vec2::new(100.0, 80.0));
        let clamped = map.clamp(Vec2::new(150.0, -5.0));
        assert_eq!(clamped, Vec2::new(100.0, 0.0));
        // A corner target clamps exactly to the corner.
        let corner = map.clamp(Vec2::new(100.0, 80.0));
        assert_eq!(corner, Vec2::new(100.0, 80.0));
    }

    #[test]
    fn cell_lookup_respects_bounds() {
        let map = GameMap::flat(1, 10.0, 4, 4);
        assert!(map.cell_at(Vec2::new(5.0, 5.0)).is_some());
        assert!(map.cell_at(Vec2::new(-1.0, 5.0)).is_none());
        assert!(map.cell_at(Vec2::new(40.0, 5.0)).is_none());
        assert_eq!(map.cover_at(Vec2::new(400.0, 400.0)), 0.0);
    }

    #[test]
    fn deployment_zone_clamps() {
        let zone = DeploymentZone {
            min: Vec2::new(0.0, 0.0),
            max: Vec2::new(20.0, 30.0),
        };
        assert_eq!(zone.clamp(Vec2::new(25.0, 10.0)), Vec2::new(20.0, 10.0));
    }
}
