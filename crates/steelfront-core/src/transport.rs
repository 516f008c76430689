use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use steelfront_protocol::{GameEventBody, UnitId, Vec2};

use crate::constants::UNLOAD_RADIUS;
use crate::map::GameMap;
use crate::rng::DeterministicRng;
use crate::unit::SimUnit;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MountError {
    #[error("unknown unit")]
    UnknownUnit,
    #[error("unit cannot mount itself")]
    SelfMount,
    #[error("transport belongs to the other team")]
    CrossTeam,
    #[error("no passenger capacity left")]
    CapacityExhausted,
    #[error("unit is already mounted")]
    AlreadyMounted,
    #[error("target has no passenger seats")]
    NotATransport,
}

/// Passenger/transport relation violations; fatal to the session.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SimIntegrityError {
    #[error("passenger {passenger} points at missing transport {transport}")]
    DanglingTransport { passenger: UnitId, transport: UnitId },
    #[error("transport {transport} lists absent passenger {passenger}")]
    DanglingPassenger { transport: UnitId, passenger: UnitId },
    #[error("passenger {passenger} not listed by its transport {transport}")]
    OneSidedRelation { passenger: UnitId, transport: UnitId },
}

/// Maintains the mount/dismount relation.
///
/// Both sides of the relation are stored as ids on the units themselves
/// (`unit.transport` / `unit.passengers`); the manager mutates the two ends
/// together and emits the broadcastable events.
#[derive(Debug, Default)]
pub struct TransportManager {
    pending_events: Vec<GameEventBody>,
}

impl TransportManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board `passenger` onto `transport`. On success the passenger leaves
    /// the active world: invisible to spatial queries, unable to fire.
    pub fn try_mount(
        &mut self,
        units: &mut HashMap<UnitId, SimUnit>,
        passenger: &UnitId,
        transport: &UnitId,
    ) -> Result<(), MountError> {
        if passenger == transport {
            return Err(MountError::SelfMount);
        }
        let rider = units.get(passenger).ok_or(MountError::UnknownUnit)?;
        if rider.is_mounted() {
            return Err(MountError::AlreadyMounted);
        }
        let rider_team = rider.team;

        let carrier = units.get(transport).ok_or(MountError::UnknownUnit)?;
        if carrier.team != rider_team {
            return Err(MountError::CrossTeam);
        }
        if carrier.transport_capacity == 0 {
            return Err(MountError::NotATransport);
        }
        if carrier.passengers.len() as u32 >= carrier.transport_capacity {
            return Err(MountError::CapacityExhausted);
        }

        if let Some(rider) = units.get_mut(passenger) {
            rider.transport = Some(transport.clone());
            rider.clear_commands();
        }
        if let Some(carrier) = units.get_mut(transport) {
            carrier.passengers.insert(passenger.clone());
        }

        debug!(unit = %passenger, transport = %transport, "unit mounted");
        self.pending_events.push(GameEventBody::UnitMounted {
            unit: passenger.clone(),
            transport: transport.clone(),
        });
        Ok(())
    }

    /// Drop every passenger at a deterministic scatter around the
    /// transport, drawn from the game RNG (never a local one). Returns the
    /// unloaded ids in the order they were seated.
    pub fn unload_all(
        &mut self,
        units: &mut HashMap<UnitId, SimUnit>,
        transport: &UnitId,
        map: &GameMap,
        rng: &mut DeterministicRng,
    ) -> Vec<UnitId> {
        let Some(carrier) = units.get_mut(transport) else {
            return Vec::new();
        };
        let base = carrier.position;
        let passengers: Vec<UnitId> = std::mem::take(&mut carrier.passengers)
            .into_iter()
            .collect();

        for passenger_id in &passengers {
            let angle = rng.next_float(0.0, std::f32::consts::TAU);
            let distance = rng.next_float(1.0, UNLOAD_RADIUS);
            let offset = Vec2::new(angle.sin() * distance, angle.cos() * distance);

            if let Some(passenger) = units.get_mut(passenger_id) {
                passenger.transport = None;
                passenger.position = map.clamp(base.add(offset));
                passenger.clear_commands();
            }
        }

        if !passengers.is_empty() {
            debug!(transport = %transport, count = passengers.len(), "transport unloaded");
            self.pending_events.push(GameEventBody::UnitUnloaded {
                transport: transport.clone(),
                units: passengers.clone(),
            });
        }
        passengers
    }

    /// Detach a unit from the relation on both sides (used on destroy).
    /// Returns the passenger ids stranded by a destroyed transport.
    pub fn detach(&mut self, units: &mut HashMap<UnitId, SimUnit>, unit: &UnitId) -> Vec<UnitId> {
        let (carried_by, passengers) = match units.get(unit) {
            Some(u) => (
                u.transport.clone(),
                u.passengers.iter().cloned().collect::<Vec<_>>(),
            ),
            None => return Vec::new(),
        };

        if let Some(transport_id) = carried_by {
            if let Some(carrier) = units.get_mut(&transport_id) {
                carrier.passengers.remove(unit);
            }
        }
        for passenger_id in &passengers {
            if let Some(passenger) = units.get_mut(passenger_id) {
                passenger.transport = None;
            }
        }
        passengers
    }

    /// Per-tick integrity sweep over the relation. Any violation is fatal
    /// to the session.
    pub fn update(&self, units: &HashMap<UnitId, SimUnit>) -> Result<(), SimIntegrityError> {
        for (id, unit) in units {
            if let Some(transport_id) = &unit.transport {
                match units.get(transport_id) {
                    None => {
                        return Err(SimIntegrityError::DanglingTransport {
                            passenger: id.clone(),
                            transport: transport_id.clone(),
                        })
                    }
                    Some(carrier) if !carrier.passengers.contains(id) => {
                        return Err(SimIntegrityError::OneSidedRelation {
                            passenger: id.clone(),
                            transport: transport_id.clone(),
                        })
                    }
                    Some(_) => {}
                }
            }
            for passenger_id in &unit.passengers {
                if !units.contains_key(passenger_id) {
                    return Err(SimIntegrityError::DanglingPassenger {
                        transport: id.clone(),
                        passenger: passenger_id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn take_events(&mut self) -> Vec<GameEventBody> {
        std::mem::take(&mut self.pending_events)
    }
}
