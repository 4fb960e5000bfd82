//! Vehicle movement logic for the intersection simulation

use super::config::SimConfig;
use super::geometry;
use super::types::{Direction, LightColor, Position, VehicleColor, VehicleId};
use super::state::IntersectionState;

/// Result of planning one tick for a vehicle
#[derive(Debug, Clone, PartialEq)]
pub enum VehicleUpdateResult {
    /// Vehicle advances to the contained state
    Moved(SimVehicle),
    /// Vehicle keeps its current position this tick
    Held,
    /// Vehicle left the arena and should be removed
    Exited,
}

/// A vehicle in the intersection simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimVehicle {
    pub id: VehicleId,
    pub direction: Direction,
    pub color: VehicleColor,
    pub position: Position,
    /// Set once the vehicle crosses the arena centerline, never cleared
    pub has_passed_intersection: bool,
}

impl SimVehicle {
    pub fn new(id: VehicleId, direction: Direction, color: VehicleColor, position: Position) -> Self {
        Self {
            id,
            direction,
            color,
            position,
            has_passed_intersection: false,
        }
    }

    /// Leading edge already beyond the stop line; the light no longer applies
    pub fn is_committed(&self, config: &SimConfig) -> bool {
        geometry::has_passed_stop_line(self.direction, self.position, config)
    }

    /// Whether the light lets this vehicle advance at all
    pub fn can_move(&self, light: LightColor, config: &SimConfig) -> bool {
        if light == LightColor::Green || self.is_committed(config) {
            return true;
        }
        match light {
            LightColor::Yellow => {
                geometry::yellow_clearance(self.direction, self.position, config)
                    > config.safe_distance()
            }
            _ => geometry::short_of_stop_line(self.direction, self.position, config),
        }
    }

    /// Where the vehicle would be after this tick, ignoring other traffic
    pub fn candidate_position(&self, light: LightColor, config: &SimConfig) -> Position {
        let next = geometry::advance(self.direction, self.position, config.speed);
        if light != LightColor::Green && !self.is_committed(config) {
            geometry::clamp_to_stop_line(self.direction, next, config)
        } else {
            next
        }
    }

    /// Whether moving to `candidate` would bring this vehicle too close to
    /// another same-lane vehicle in `snapshot`
    ///
    /// The lenient post-crossing spacing only applies once both vehicles
    /// are across; the mover's flag is taken at the candidate position so
    /// the spacing in force after the move is the one checked.
    pub fn is_too_close(&self, candidate: Position, snapshot: &IntersectionState, config: &SimConfig) -> bool {
        let passed_after = self.has_passed_intersection
            || geometry::has_crossed_center(self.direction, candidate, config);

        snapshot.vehicles.iter().any(|other| {
            if other.id == self.id || other.direction != self.direction {
                return false;
            }
            if !geometry::same_lane(self.direction, self.position, other.position, config) {
                return false;
            }

            let distance = geometry::axis_distance(self.direction, candidate, other.position);
            if passed_after && other.has_passed_intersection {
                distance < config.passed_spacing()
            } else {
                distance < config.car_boundary
            }
        })
    }

    /// Plan this vehicle's tick against the shared pre-tick snapshot
    pub fn plan(&self, snapshot: &IntersectionState, config: &SimConfig) -> VehicleUpdateResult {
        let light = snapshot.lights.get(self.direction);
        if !self.can_move(light, config) {
            return VehicleUpdateResult::Held;
        }

        let candidate = self.candidate_position(light, config);
        if geometry::is_out_of_bounds(candidate, config) {
            return VehicleUpdateResult::Exited;
        }

        if self.is_too_close(candidate, snapshot, config) {
            return VehicleUpdateResult::Held;
        }

        VehicleUpdateResult::Moved(Self {
            position: candidate,
            has_passed_intersection: self.has_passed_intersection
                || geometry::has_crossed_center(self.direction, candidate, config),
            ..self.clone()
        })
    }
}
