//! Traffic light state machine
//!
//! Two phases alternate: the active axis shows green for `green_ms`, then
//! yellow for `yellow_ms`, after which the red axis takes over.

use super::types::{Axis, Direction, LightColor};

/// Light colour for every approach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lights {
    pub north: LightColor,
    pub south: LightColor,
    pub east: LightColor,
    pub west: LightColor,
}

impl Lights {
    /// `axis` green, the other axis red
    pub fn green_on(axis: Axis) -> Self {
        let (ns, ew) = match axis {
            Axis::NorthSouth => (LightColor::Green, LightColor::Red),
            Axis::EastWest => (LightColor::Red, LightColor::Green),
        };
        Self {
            north: ns,
            south: ns,
            east: ew,
            west: ew,
        }
    }

    pub fn get(&self, direction: Direction) -> LightColor {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    /// Colour shown on an axis pair, or `None` if the pair disagrees
    pub fn axis_color(&self, axis: Axis) -> Option<LightColor> {
        let (a, b) = match axis {
            Axis::NorthSouth => (self.north, self.south),
            Axis::EastWest => (self.east, self.west),
        };
        (a == b).then_some(a)
    }

    /// Paired approaches agree and at most one axis is showing non-red
    pub fn is_consistent(&self) -> bool {
        match (
            self.axis_color(Axis::NorthSouth),
            self.axis_color(Axis::EastWest),
        ) {
            (Some(ns), Some(ew)) => ns == LightColor::Red || ew == LightColor::Red,
            _ => false,
        }
    }

    /// Every green light turns yellow, everything else is left alone
    pub fn begin_yellow(&self) -> Self {
        let fade = |color: LightColor| match color {
            LightColor::Green => LightColor::Yellow,
            other => other,
        };
        Self {
            north: fade(self.north),
            south: fade(self.south),
            east: fade(self.east),
            west: fade(self.west),
        }
    }

    /// Hand the right of way to whichever axis is currently red
    ///
    /// Only north is inspected, so a perturbed state still lands on a
    /// consistent assignment.
    pub fn hand_over(&self) -> Self {
        if self.north == LightColor::Red {
            Self::green_on(Axis::NorthSouth)
        } else {
            Self::green_on(Axis::EastWest)
        }
    }
}

/// Which half of the cycle the controller is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightPhase {
    Green,
    Yellow,
}

/// Drives [`Lights`] through green, yellow and the axis handover
#[derive(Debug, Clone)]
pub struct LightController {
    pub phase: LightPhase,
    green_ms: u64,
    yellow_ms: u64,
}

impl LightController {
    pub fn new(green_ms: u64, yellow_ms: u64) -> Self {
        Self {
            phase: LightPhase::Green,
            green_ms,
            yellow_ms,
        }
    }

    /// Milliseconds the current phase lasts before the next transition
    pub fn phase_duration_ms(&self) -> u64 {
        match self.phase {
            LightPhase::Green => self.green_ms,
            LightPhase::Yellow => self.yellow_ms,
        }
    }

    /// Apply the transition that ends the current phase
    pub fn transition(&mut self, lights: &Lights) -> Lights {
        match self.phase {
            LightPhase::Green => {
                self.phase = LightPhase::Yellow;
                lights.begin_yellow()
            }
            LightPhase::Yellow => {
                self.phase = LightPhase::Green;
                lights.hand_over()
            }
        }
    }
}
