use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Broad role of a unit; drives capture rights, dig-in rights, and
/// transport behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitClass {
    Infantry,
    Armor,
    Recon,
    Transport,
    Commander,
    Logistics,
    HeavyWeapon,
}

impl UnitClass {
    /// Only command and supply elements take ground.
    pub fn can_capture(self) -> bool {
        matches!(self, UnitClass::Commander | UnitClass::Logistics)
    }

    /// Only crew-served heavy weapons entrench into a structure.
    pub fn can_dig_in(self) -> bool {
        matches!(self, UnitClass::HeavyWeapon)
    }
}

/// Armor thickness by facing.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ArmorProfile {
    pub front: u32,
    pub side: u32,
    pub rear: u32,
}

/// Static description of one weapon slot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeaponSpec {
    pub name: String,
    /// Armor penetration.
    pub ap: u32,
    pub range: f32,
    pub reload_secs: f32,
    /// Base hit probability per shot, before modifiers.
    pub accuracy: f64,
    pub damage_multiplier: f32,
}

/// Static description of one unit type, as provided by the external unit
/// data source. Copied onto units at spawn; never consulted per tick.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnitSpec {
    pub unit_type: String,
    pub name: String,
    pub class: UnitClass,
    pub cost: u32,
    pub max_health: f32,
    pub speed: f32,
    pub rotation_speed: f32,
    pub armor: ArmorProfile,
    pub weapons: Vec<WeaponSpec>,
    /// Passenger seats; 0 for non-transports.
    pub transport_capacity: u32,
}

/// Read-only lookup of unit specs by type id.
///
/// Implementations are shared across sessions without synchronization; the
/// simulation never mutates through this interface.
pub trait UnitDataRegistry: Send + Sync {
    fn unit_spec(&self, unit_type: &str) -> Option<&UnitSpec>;
}

/// In-memory registry backed by a plain map.
#[derive(Clone, Debug, Default)]
pub struct StaticUnitRegistry {
    specs: HashMap<String, UnitSpec>,
}

impl StaticUnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, spec: UnitSpec) {
        self.specs.insert(spec.unit_type.clone(), spec);
    }

    pub fn from_specs(specs: impl IntoIterator<Item = UnitSpec>) -> Self {
        let mut registry = Self::new();
        for spec in specs {
            registry.insert(spec);
        }
        registry
    }

    /// Small balanced roster for tests and embedders without an external
    /// unit data source.
    pub fn embedded() -> Self {
        fn rifle() -> WeaponSpec {
            WeaponSpec {
                name: "rifle".into(),
                ap: 4,
                range: 12.0,
                reload_secs: 1.5,
                accuracy: 0.4,
                damage_multiplier: 1.0,
            }
        }

        Self::from_specs([
            UnitSpec {
                unit_type: "inf_a".into(),
                name: "Rifle Squad".into(),
                class: UnitClass::Infantry,
                cost: 50,
                max_health: 100.0,
                speed: 3.0,
                rotation_speed: 6.0,
                armor: ArmorProfile {
                    front: 0,
                    side: 0,
                    rear: 0,
                },
                weapons: vec![rifle()],
                transport_capacity: 0,
            },
            UnitSpec {
                unit_type: "inf_command".into(),
                name: "Command Squad".into(),
                class: UnitClass::Commander,
                cost: 120,
                max_health: 100.0,
                speed: 3.0,
                rotation_speed: 6.0,
                armor: ArmorProfile {
                    front: 0,
                    side: 0,
                    rear: 0,
                },
                weapons: vec![rifle()],
                transport_capacity: 0,
            },
            UnitSpec {
                unit_type: "tank_a".into(),
                name: "Main Battle Tank".into(),
                class: UnitClass::Armor,
                cost: 180,
                max_health: 200.0,
                speed: 5.0,
                rotation_speed: 2.0,
                armor: ArmorProfile {
                    front: 14,
                    side: 8,
                    rear: 4,
                },
                weapons: vec![WeaponSpec {
                    name: "cannon".into(),
                    ap: 16,
                    range: 30.0,
                    reload_secs: 6.0,
                    accuracy: 0.55,
                    damage_multiplier: 8.0,
                }],
                transport_capacity: 0,
            },
            UnitSpec {
                unit_type: "apc_a".into(),
                name: "Armored Carrier".into(),
                class: UnitClass::Transport,
                cost: 60,
                max_health: 120.0,
                speed: 6.0,
                rotation_speed: 3.0,
                armor: ArmorProfile {
                    front: 4,
                    side: 2,
                    rear: 1,
                },
                weapons: vec![WeaponSpec {
                    name: "mg".into(),
                    ap: 6,
                    range: 15.0,
                    reload_secs: 2.0,
                    accuracy: 0.45,
                    damage_multiplier: 2.0,
                }],
                transport_capacity: 2,
            },
            UnitSpec {
                unit_type: "at_gun".into(),
                name: "AT Gun".into(),
                class: UnitClass::HeavyWeapon,
                cost: 90,
                max_health: 80.0,
                speed: 1.0,
                rotation_speed: 1.5,
                armor: ArmorProfile {
                    front: 1,
                    side: 0,
                    rear: 0,
                },
                weapons: vec![WeaponSpec {
                    name: "at_cannon".into(),
                    ap: 18,
                    range: 28.0,
                    reload_secs: 5.0,
                    accuracy: 0.6,
                    damage_multiplier: 7.0,
                }],
                transport_capacity: 0,
            },
            UnitSpec {
                unit_type: "supply_truck".into(),
                name: "Supply Truck".into(),
                class: UnitClass::Logistics,
                cost: 40,
                max_health: 90.0,
                speed: 5.5,
                rotation_speed: 3.0,
                armor: ArmorProfile {
                    front: 0,
                    side: 0,
                    rear: 0,
                },
                weapons: Vec::new(),
                transport_capacity: 0,
            },
        ])
    }
}

impl UnitDataRegistry for StaticUnitRegistry {
    fn unit_spec(&self, unit_type: &str) -> Option<&UnitSpec> {
        self.specs.get(unit_type)
    }
}
