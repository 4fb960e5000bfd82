//! Core types for the intersection simulation
//!
//! These are plain data types shared by the light controller and the
//! traffic engine.

/// A unique identifier for a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub u64);

/// Compass approach a vehicle travels along
///
/// North-bound traffic moves toward decreasing y, south-bound toward
/// increasing y, east-bound toward decreasing x and west-bound toward
/// increasing x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The axis pair whose light governs this approach
    pub fn axis(self) -> Axis {
        match self {
            Direction::North | Direction::South => Axis::NorthSouth,
            Direction::East | Direction::West => Axis::EastWest,
        }
    }
}

/// One of the two axis pairs that share a light colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    NorthSouth,
    EastWest,
}

/// Signal state shown to one approach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightColor {
    Red,
    Yellow,
    Green,
}

/// Paint colour of a vehicle. Has no effect on movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleColor {
    Slate,
    Zinc,
    White,
    Red,
    Blue,
    Gray,
    Emerald,
}

impl VehicleColor {
    pub const ALL: [VehicleColor; 7] = [
        VehicleColor::Slate,
        VehicleColor::Zinc,
        VehicleColor::White,
        VehicleColor::Red,
        VehicleColor::Blue,
        VehicleColor::Gray,
        VehicleColor::Emerald,
    ];
}

/// A 2D position in arena coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
