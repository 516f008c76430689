use steelfront_protocol::Vec2;

use crate::constants::{
    GARRISON_DAMAGE_REDUCTION, MAX_TERRAIN_COVER_REDUCTION, MORALE_HIT_FACTOR,
    SMOKE_ACCURACY_FACTOR,
};
use crate::map::GameMap;
use crate::registry::{ArmorProfile, WeaponSpec};
use crate::rng::DeterministicRng;
use crate::smoke::SmokeManager;
use crate::unit::SimUnit;

/// Which armor plate a hit lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArmorFacing {
    Front,
    Side,
    Rear,
}

/// Armor-facing forward vector for a rotation.
///
/// The armor check treats `rotation_y = 0` as facing `+z`; incoming fire
/// from `+z` therefore strikes front armor (renderer conventions differ and
/// are irrelevant here).
fn facing_forward(rotation_y: f32) -> Vec2 {
    Vec2::new(rotation_y.sin(), rotation_y.cos())
}

/// Classify the plate struck by fire from `attacker_pos`.
///
/// Front within a 45° half-angle of the defender's facing, rear within 45°
/// of directly behind, side otherwise.
pub fn armor_facing(defender_pos: Vec2, defender_rotation_y: f32, attacker_pos: Vec2) -> ArmorFacing {
    let to_source = attacker_pos.sub(defender_pos).normalized();
    let alignment = facing_forward(defender_rotation_y).dot(to_source);
    let cos_45 = std::f32::consts::FRAC_1_SQRT_2;
    if alignment > cos_45 {
        ArmorFacing::Front
    } else if alignment < -cos_45 {
        ArmorFacing::Rear
    } else {
        ArmorFacing::Side
    }
}

pub fn armor_value(profile: &ArmorProfile, facing: ArmorFacing) -> u32 {
    match facing {
        ArmorFacing::Front => profile.front,
        ArmorFacing::Side => profile.side,
        ArmorFacing::Rear => profile.rear,
    }
}

/// Raw penetration margin before mitigation. Non-positive means a ricochet.
pub fn penetration(ap: u32, armor: u32) -> i32 {
    (ap as i32 - armor as i32).div_euclid(2) + 1
}

/// Outcome of one resolved shot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShotOutcome {
    Miss,
    /// Bounced without damage; the near miss still suppresses.
    Ricochet { morale_hit: f32 },
    Hit { damage: f32, morale_hit: f32 },
}

/// Resolve one shot from `attacker` at `defender`.
///
/// Consumes exactly one RNG sample for the accuracy roll, so call order is
/// part of the lockstep contract.
pub fn resolve_shot(
    attacker_pos: Vec2,
    weapon: &WeaponSpec,
    defender: &SimUnit,
    map: &GameMap,
    smoke: &SmokeManager,
    rng: &mut DeterministicRng,
) -> ShotOutcome {
    let mut accuracy = weapon.accuracy;
    if smoke.is_line_obscured(attacker_pos, defender.position) {
        accuracy *= f64::from(SMOKE_ACCURACY_FACTOR);
    }
    if !rng.next_bool(accuracy) {
        return ShotOutcome::Miss;
    }

    let facing = armor_facing(defender.position, defender.rotation_y, attacker_pos);
    let armor = armor_value(&defender.armor, facing);
    let pen = penetration(weapon.ap, armor);

    // Near misses and bounces still rattle the crew.
    let morale_hit = MORALE_HIT_FACTOR * pen.max(1) as f32 * weapon.damage_multiplier;

    if pen <= 0 {
        return ShotOutcome::Ricochet { morale_hit };
    }

    let mut damage = pen as f32 * weapon.damage_multiplier;
    damage *= 1.0 - map.cover_at(defender.position) * MAX_TERRAIN_COVER_REDUCTION;
    if defender.garrisoned_in.is_some() {
        damage *= GARRISON_DAMAGE_REDUCTION;
    }

    ShotOutcome::Hit { damage, morale_hit }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StaticUnitRegistry;
    use crate::registry::UnitDataRegistry;
    use crate::unit::SimUnit;
    use steelfront_protocol::{PlayerId, Team, UnitId};

    fn defender_at_origin(rotation_y: f32) -> SimUnit {
        let registry = StaticUnitRegistry::embedded();
        let spec = registry.unit_spec("tank_a").unwrap();
        let mut unit = SimUnit::from_spec(
            UnitId::from("d0"),
            spec,
            Team::Team2,
            PlayerId::from("p2"),
            Vec2::ZERO,
            rotation_y,
            false,
        );
        unit.garrisoned_in = None;
        unit
    }

    #[test]
    fn fire_from_positive_z_strikes_front_armor() {
        // Attacker at (0, 10), defender facing rotation 0.
        let facing = armor_facing(Vec2::ZERO, 0.0, Vec2::new(0.0, 10.0));
        assert_eq!(facing, ArmorFacing::Front);

        // Rotating the defender half a turn exposes the rear plate.
        let facing = armor_facing(Vec2::ZERO, std::f32::consts::PI, Vec2::new(0.0, 10.0));
        assert_eq!(facing, ArmorFacing::Rear);

        // Perpendicular fire lands on the side.
        let facing = armor_facing(Vec2::ZERO, 0.0, Vec2::new(10.0, 0.0));
        assert_eq!(facing, ArmorFacing::Side);
    }

    #[test]
    fn penetration_formula() {
        assert_eq!(penetration(16, 8), 5);
        assert_eq!(penetration(8, 8), 1);
        assert_eq!(penetration(4, 8), -1);
        assert_eq!(penetration(0, 0), 1);
    }

    #[test]
    fn ricochet_still_suppresses() {
        let map = GameMap::flat(1, 10.0, 10, 10);
        let smoke = SmokeManager::new();
        let mut rng = DeterministicRng::seed_from_u32(1);
        let defender = defender_at_origin(0.0);

        // AP 4 against front armor 14 can never penetrate.
        let weapon = WeaponSpec {
            name: "peashooter".into(),
            ap: 4,
            range: 20.0,
            reload_secs: 1.0,
            accuracy: 1.0,
            damage_multiplier: 1.0,
        };

        match resolve_shot(Vec2::new(0.0, 10.0), &weapon, &defender, &map, &smoke, &mut rng) {
            ShotOutcome::Ricochet { morale_hit } => {
                assert!(morale_hit > 0.0);
            }
            other => panic!("expected ricochet, got {other:?}"),
        }
    }

    #[test]
    fn garrison_halves_damage() {
        let map = GameMap::flat(1, 10.0, 10, 10);
        let smoke = SmokeManager::new();
        let weapon = WeaponSpec {
            name: "cannon".into(),
            ap: 20,
            range: 30.0,
            reload_secs: 1.0,
            accuracy: 1.0,
            damage_multiplier: 1.0,
        };

        let mut rng = DeterministicRng::seed_from_u32(1);
        let open = defender_at_origin(0.0);
        let open_damage = match resolve_shot(
            Vec2::new(0.0, 10.0),
            &weapon,
            &open,
            &map,
            &smoke,
            &mut rng,
        ) {
            ShotOutcome::Hit { damage, .. } => damage,
            other => panic!("expected hit, got {other:?}"),
        };

        let mut rng = DeterministicRng::seed_from_u32(1);
        let mut housed = defender_at_origin(0.0);
        housed.garrisoned_in = Some(steelfront_protocol::BuildingId::from("b0"));
        let housed_damage = match resolve_shot(
            Vec2::new(0.0, 10.0),
            &weapon,
            &housed,
            &map,
            &smoke,
            &mut rng,
        ) {
            ShotOutcome::Hit { damage, .. } => damage,
            other => panic!("expected hit, got {other:?}"),
        };

        assert!((housed_damage - open_damage * 0.5).abs() < 1e-5);
    }
}
