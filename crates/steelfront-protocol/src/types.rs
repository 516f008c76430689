use serde::{Deserialize, Serialize};

use crate::ZoneId;

/// World-space position on the battlefield plane.
///
/// Elevation (`y`) is derived from terrain and is not part of simulation
/// identity, so it never appears here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub z: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, z: 0.0 };

    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.z + other.z)
    }

    pub fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.z - other.z)
    }

    pub fn scale(self, factor: f32) -> Vec2 {
        Vec2::new(self.x * factor, self.z * factor)
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        self.sub(other).length()
    }

    /// Unit-length copy, or zero when the vector is degenerate.
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        if len <= f32::EPSILON {
            Vec2::ZERO
        } else {
            self.scale(1.0 / len)
        }
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.z * other.z
    }

    pub fn midpoint(self, other: Vec2) -> Vec2 {
        self.add(other).scale(0.5)
    }
}

/// One of the two sides of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Team1,
    Team2,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Team1 => Team::Team2,
            Team::Team2 => Team::Team1,
        }
    }

    /// Accumulation order for economy ticks; doubles as the victory
    /// tie-break (team1 is credited first).
    pub const IN_ORDER: [Team; 2] = [Team::Team1, Team::Team2];
}

/// Match phase. `Setup` is presented to clients as "deployment".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Loading,
    #[serde(rename = "deployment")]
    Setup,
    Battle,
    Victory,
}

/// Accumulated victory points per team.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScore {
    pub team1: u32,
    pub team2: u32,
}

impl TeamScore {
    pub fn get(&self, team: Team) -> u32 {
        match team {
            Team::Team1 => self.team1,
            Team::Team2 => self.team2,
        }
    }

    pub fn add(&mut self, team: Team, points: u32) {
        match team {
            Team::Team1 => self.team1 += points,
            Team::Team2 => self.team2 += points,
        }
    }
}

/// Wire form of a capture zone, as rendered by clients.
///
/// `capture_progress` is carried for presentation only; ownership changes
/// are authoritative-server decisions.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureZone {
    pub id: ZoneId,
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    /// `None` is neutral.
    pub owner: Option<Team>,
    pub capture_progress: f32,
    pub points_per_tick: u32,
}

impl CaptureZone {
    pub fn contains(&self, point: Vec2) -> bool {
        (point.x - self.center.x).abs() <= self.width * 0.5
            && (point.z - self.center.z).abs() <= self.height * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Team::Team1).unwrap(), "\"team1\"");
        assert_eq!(serde_json::to_string(&Team::Team2).unwrap(), "\"team2\"");
    }

    #[test]
    fn setup_phase_is_deployment_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&GamePhase::Setup).unwrap(),
            "\"deployment\""
        );
        assert_eq!(
            serde_json::from_str::<GamePhase>("\"battle\"").unwrap(),
            GamePhase::Battle
        );
    }

    #[test]
    fn zone_containment_uses_half_extents() {
        let zone = CaptureZone {
            id: ZoneId::from("alpha"),
            center: Vec2::new(10.0, 10.0),
            width: 4.0,
            height: 6.0,
            owner: None,
            capture_progress: 0.0,
            points_per_tick: 5,
        };
        assert!(zone.contains(Vec2::new(12.0, 13.0)));
        assert!(!zone.contains(Vec2::new(12.1, 10.0)));
        assert!(!zone.contains(Vec2::new(10.0, 13.1)));
    }
}
