//! Shared intersection state and the pure updates that replace it
//!
//! Every function here reads one snapshot and returns a new one. Nothing is
//! mutated in place, so all vehicles in a tick see the same pre-tick world.

use log::trace;

use super::config::SimConfig;
use super::geometry;
use super::lights::Lights;
use super::types::{Direction, VehicleColor, VehicleId};
use super::vehicle::{SimVehicle, VehicleUpdateResult};

/// Snapshot of everything the renderer needs
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionState {
    pub lights: Lights,
    /// Vehicles in spawn order
    pub vehicles: Vec<SimVehicle>,
}

impl IntersectionState {
    pub fn new(lights: Lights) -> Self {
        Self {
            lights,
            vehicles: Vec::new(),
        }
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&SimVehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn with_lights(&self, lights: Lights) -> Self {
        Self {
            lights,
            vehicles: self.vehicles.clone(),
        }
    }

    /// Whether a new vehicle on `direction` would overlap one already there
    pub fn is_spawn_blocked(&self, direction: Direction, config: &SimConfig) -> bool {
        let spawn = config.spawn_position(direction);
        self.vehicles.iter().any(|vehicle| {
            vehicle.direction == direction
                && geometry::same_lane(direction, spawn, vehicle.position, config)
                && geometry::axis_distance(direction, spawn, vehicle.position)
                    < config.passed_spacing()
        })
    }

    /// Try to add a vehicle at the spawn point of `direction`
    pub fn spawn(
        &self,
        id: VehicleId,
        direction: Direction,
        color: VehicleColor,
        config: &SimConfig,
    ) -> SpawnOutcome {
        if self.is_spawn_blocked(direction, config) {
            trace!("Spawn on {:?} rejected, lane entrance occupied", direction);
            return SpawnOutcome::Rejected;
        }

        let vehicle = SimVehicle::new(id, direction, color, config.spawn_position(direction));
        let mut vehicles = self.vehicles.clone();
        vehicles.push(vehicle);
        SpawnOutcome::Spawned(Self {
            lights: self.lights,
            vehicles,
        })
    }

    /// Advance every vehicle by one movement tick
    pub fn step(&self, config: &SimConfig) -> TickOutcome {
        let mut vehicles = Vec::with_capacity(self.vehicles.len());
        let mut moved = 0;
        let mut exited = Vec::new();

        for vehicle in &self.vehicles {
            match vehicle.plan(self, config) {
                VehicleUpdateResult::Moved(next) => {
                    moved += 1;
                    vehicles.push(next);
                }
                VehicleUpdateResult::Held => vehicles.push(vehicle.clone()),
                VehicleUpdateResult::Exited => exited.push(vehicle.id),
            }
        }

        TickOutcome {
            state: Self {
                lights: self.lights,
                vehicles,
            },
            moved,
            exited,
        }
    }
}

/// Result of a spawn attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnOutcome {
    Spawned(IntersectionState),
    /// Same-lane traffic too close to the entrance; nothing was added
    Rejected,
}

/// Result of one movement tick
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub state: IntersectionState,
    pub moved: usize,
    /// Vehicles removed this tick
    pub exited: Vec<VehicleId>,
}
