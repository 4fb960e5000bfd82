//! Standalone intersection simulation module
//!
//! This module contains all the core simulation logic: the light state
//! machine, spawning, and per-tick vehicle movement. It runs on virtual
//! time and can be tested without any runtime or front end.

mod config;
mod geometry;
mod lights;
mod map;
mod random;
mod state;
mod types;
mod vehicle;
mod world;

// Re-export public types for external use
pub use config::{SimConfig, StopLines, CAR_LENGTH, SAFE_FOLLOWING_MULTIPLIER};
pub use geometry::{
    advance, axis_distance, clamp_to_stop_line, has_crossed_center, has_passed_stop_line,
    is_out_of_bounds, same_lane, short_of_stop_line, yellow_clearance,
};
pub use lights::{LightController, LightPhase, Lights};
pub use map::{draw_map, MAX_MAP_CELLS};
pub use random::{RngSource, ScriptedSource, SpawnSource};
pub use state::{IntersectionState, SpawnOutcome, TickOutcome};
pub use types::{Axis, Direction, LightColor, Position, VehicleColor, VehicleId};
pub use vehicle::{SimVehicle, VehicleUpdateResult};
pub use world::{Simulation, SimulationStats};
