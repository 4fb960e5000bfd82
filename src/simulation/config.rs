//! Tunable parameters for the intersection simulation
//!
//! Defaults reproduce the reference 400x400 intersection. All geometry is
//! fixed for the lifetime of a [`Simulation`](super::Simulation); it is
//! validated once when the simulation is created.

use anyhow::{ensure, Result};

use super::types::{Axis, Direction, Position};

/// Length of a vehicle in arena units
pub const CAR_LENGTH: f32 = 24.0;

/// Minimum spacing multiplier for CAR_LENGTH
pub const SAFE_FOLLOWING_MULTIPLIER: f32 = 1.5;

/// Stop-line coordinate for each approach
///
/// North and south lines are y coordinates, east and west lines are x
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopLines {
    pub north: f32,
    pub south: f32,
    pub east: f32,
    pub west: f32,
}

impl StopLines {
    pub fn get(&self, direction: Direction) -> f32 {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }
}

impl Default for StopLines {
    fn default() -> Self {
        Self {
            north: 240.0,
            south: 160.0,
            east: 240.0,
            west: 200.0,
        }
    }
}

/// Simulation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Side length of the square arena
    pub arena_size: f32,
    /// Milliseconds between spawn attempts
    pub spawn_period_ms: u64,
    /// Distance travelled per movement tick
    pub speed: f32,
    pub green_ms: u64,
    pub yellow_ms: u64,
    pub car_length: f32,
    /// Minimum gap between same-lane vehicles before the intersection
    pub car_boundary: f32,
    pub stop_lines: StopLines,
    /// Milliseconds between movement ticks
    pub tick_ms: u64,
    /// Cross-axis distance of each lane from the centerline
    pub lane_offset: f32,
    /// How far outside the arena edge vehicles appear
    pub spawn_margin: f32,
    /// Distance past the arena edge at which vehicles are removed
    pub out_of_bounds_buffer: f32,
    /// Cross-axis tolerance for two vehicles to count as sharing a lane
    pub lane_tolerance: f32,
    /// Axis that starts green
    pub initial_green: Axis,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_size: 400.0,
            spawn_period_ms: 3000,
            speed: 2.0,
            green_ms: 10_000,
            yellow_ms: 3000,
            car_length: CAR_LENGTH,
            car_boundary: CAR_LENGTH * SAFE_FOLLOWING_MULTIPLIER,
            stop_lines: StopLines::default(),
            tick_ms: 50,
            lane_offset: 10.0,
            spawn_margin: 20.0,
            out_of_bounds_buffer: 50.0,
            lane_tolerance: 1.0,
            initial_green: Axis::EastWest,
        }
    }
}

impl SimConfig {
    /// Arena centerline coordinate (same on both axes)
    pub fn center(&self) -> f32 {
        self.arena_size / 2.0
    }

    /// Distance covered while the light is yellow
    pub fn safe_distance(&self) -> f32 {
        (self.yellow_ms as f32 / self.tick_ms as f32) * self.speed
    }

    /// Gap required at spawn and between two vehicles that have both crossed
    pub fn passed_spacing(&self) -> f32 {
        self.car_boundary + self.car_length / 2.0
    }

    /// Length of one full light cycle
    pub fn light_period_ms(&self) -> u64 {
        self.green_ms + self.yellow_ms
    }

    /// Where a new vehicle on `direction` appears
    pub fn spawn_position(&self, direction: Direction) -> Position {
        let center = self.center();
        let far = self.arena_size + self.spawn_margin;
        let near = -self.spawn_margin;
        match direction {
            Direction::North => Position::new(center + self.lane_offset, far),
            Direction::South => Position::new(center - self.lane_offset, near),
            Direction::East => Position::new(far, center + self.lane_offset),
            Direction::West => Position::new(near, center - self.lane_offset),
        }
    }

    /// Check that the parameters describe a consistent intersection
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("arena_size", self.arena_size),
            ("speed", self.speed),
            ("car_length", self.car_length),
            ("car_boundary", self.car_boundary),
            ("lane_offset", self.lane_offset),
            ("spawn_margin", self.spawn_margin),
            ("out_of_bounds_buffer", self.out_of_bounds_buffer),
            ("lane_tolerance", self.lane_tolerance),
            ("north stop line", self.stop_lines.north),
            ("south stop line", self.stop_lines.south),
            ("east stop line", self.stop_lines.east),
            ("west stop line", self.stop_lines.west),
        ];
        for (name, value) in lengths {
            ensure!(value.is_finite(), "{} must be finite, got {}", name, value);
        }

        ensure!(self.arena_size > 0.0, "arena_size must be positive");
        ensure!(self.tick_ms > 0, "tick_ms must be positive");
        ensure!(self.spawn_period_ms > 0, "spawn_period_ms must be positive");
        ensure!(self.green_ms > 0, "green_ms must be positive");
        ensure!(self.yellow_ms > 0, "yellow_ms must be positive");
        ensure!(self.speed > 0.0, "speed must be positive");
        ensure!(self.car_length > 0.0, "car_length must be positive");
        ensure!(self.car_boundary > 0.0, "car_boundary must be positive");
        ensure!(self.spawn_margin >= 0.0, "spawn_margin must not be negative");
        ensure!(self.lane_tolerance >= 0.0, "lane_tolerance must not be negative");
        ensure!(
            self.speed < self.car_boundary,
            "speed {} would let a vehicle skip the {} following boundary in one tick",
            self.speed,
            self.car_boundary
        );
        ensure!(
            self.safe_distance() < self.arena_size,
            "safe distance {} exceeds arena size {}",
            self.safe_distance(),
            self.arena_size
        );
        ensure!(
            self.lane_offset * 2.0 > self.lane_tolerance,
            "lane_tolerance {} cannot separate lanes {} apart",
            self.lane_tolerance,
            self.lane_offset * 2.0
        );
        ensure!(
            self.spawn_margin < self.out_of_bounds_buffer,
            "spawn_margin {} must be inside out_of_bounds_buffer {}",
            self.spawn_margin,
            self.out_of_bounds_buffer
        );

        for direction in Direction::ALL {
            let stop = self.stop_lines.get(direction);
            ensure!(
                (0.0..=self.arena_size).contains(&stop),
                "{:?} stop line {} lies outside the arena",
                direction,
                stop
            );

            // A vehicle must start short of its stop line or the clamp
            // would drag it backwards.
            let spawn = self.spawn_position(direction);
            let half = self.car_length / 2.0;
            let before_line = match direction {
                Direction::North => spawn.y - half > stop,
                Direction::South => spawn.y + half < stop,
                Direction::East => spawn.x - half > stop,
                Direction::West => spawn.x + half < stop,
            };
            ensure!(
                before_line,
                "{:?} vehicles would spawn past their stop line",
                direction
            );
        }

        Ok(())
    }
}
