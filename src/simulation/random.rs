//! Randomness used when spawning vehicles
//!
//! The simulation only asks for a direction and a paint colour, so tests can
//! swap in a scripted source instead of a seeded RNG.

use rand::seq::IndexedRandom;
use rand::Rng;

use super::types::{Direction, VehicleColor};

/// Supplies the random choices made at spawn time
pub trait SpawnSource: Send {
    fn choose_direction(&mut self) -> Direction;
    fn choose_color(&mut self) -> VehicleColor;
}

/// [`SpawnSource`] backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng + Send> SpawnSource for RngSource<R> {
    fn choose_direction(&mut self) -> Direction {
        // ALL is non-empty, choose only fails on empty slices
        *Direction::ALL.choose(&mut self.0).unwrap_or(&Direction::North)
    }

    fn choose_color(&mut self) -> VehicleColor {
        *VehicleColor::ALL.choose(&mut self.0).unwrap_or(&VehicleColor::Slate)
    }
}

/// Replays a fixed list of directions, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    directions: Vec<Direction>,
    next: usize,
}

impl ScriptedSource {
    pub fn new(directions: Vec<Direction>) -> Self {
        Self {
            directions,
            next: 0,
        }
    }
}

impl SpawnSource for ScriptedSource {
    fn choose_direction(&mut self) -> Direction {
        if self.directions.is_empty() {
            return Direction::North;
        }
        let direction = self.directions[self.next % self.directions.len()];
        self.next += 1;
        direction
    }

    fn choose_color(&mut self) -> VehicleColor {
        VehicleColor::ALL[self.next % VehicleColor::ALL.len()]
    }
}
