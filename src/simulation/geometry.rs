//! Per-direction geometry predicates
//!
//! Each approach compares against its stop line with its own inequality.
//! The four arms are kept explicit rather than folded into a signed formula
//! because they are not symmetric: the yellow clearance for east and west
//! is measured the other way round from north and south.

use super::config::SimConfig;
use super::types::{Direction, Position};

/// Position after one step of `speed` along `direction`
pub fn advance(direction: Direction, position: Position, speed: f32) -> Position {
    let mut next = position;
    match direction {
        Direction::North => next.y -= speed,
        Direction::South => next.y += speed,
        Direction::East => next.x -= speed,
        Direction::West => next.x += speed,
    }
    next
}

/// Yellow-light clearance; the vehicle may keep going only while this
/// exceeds `safe_distance`
///
/// North and south measure the gap still ahead of the leading edge. East and
/// west measure from the line to the leading edge, which is negative while
/// the vehicle is short of the line, so uncommitted east-west traffic always
/// stops on yellow.
pub fn yellow_clearance(direction: Direction, position: Position, config: &SimConfig) -> f32 {
    let stop = config.stop_lines.get(direction);
    let half = config.car_length / 2.0;
    match direction {
        Direction::North => position.y - half - stop,
        Direction::South => stop - (position.y + half),
        Direction::East => stop - (position.x - half),
        Direction::West => (position.x + half) - stop,
    }
}

/// True once the leading edge is strictly beyond the stop line
pub fn has_passed_stop_line(direction: Direction, position: Position, config: &SimConfig) -> bool {
    let stop = config.stop_lines.get(direction);
    let half = config.car_length / 2.0;
    match direction {
        Direction::North => position.y - half < stop,
        Direction::South => position.y + half > stop,
        Direction::East => position.x - half < stop,
        Direction::West => position.x + half > stop,
    }
}

/// Red-light predicate: the leading edge has not yet reached the line
pub fn short_of_stop_line(direction: Direction, position: Position, config: &SimConfig) -> bool {
    let stop = config.stop_lines.get(direction);
    let half = config.car_length / 2.0;
    match direction {
        Direction::North => position.y - half > stop,
        Direction::South => position.y + half < stop,
        Direction::East => position.x - half > stop,
        Direction::West => position.x + half < stop,
    }
}

/// Pull `candidate` back so its leading edge rests on the stop line
pub fn clamp_to_stop_line(direction: Direction, candidate: Position, config: &SimConfig) -> Position {
    let stop = config.stop_lines.get(direction);
    let half = config.car_length / 2.0;
    let mut clamped = candidate;
    match direction {
        Direction::South => {
            if clamped.y + half > stop {
                clamped.y = stop - half;
            }
        }
        Direction::North => {
            if clamped.y - half < stop {
                clamped.y = stop + half;
            }
        }
        Direction::East => {
            if clamped.x - half < stop {
                clamped.x = stop + half;
            }
        }
        Direction::West => {
            if clamped.x + half > stop {
                clamped.x = stop - half;
            }
        }
    }
    clamped
}

/// True once `position` is past the arena centerline in the direction of travel
pub fn has_crossed_center(direction: Direction, position: Position, config: &SimConfig) -> bool {
    let center = config.center();
    match direction {
        Direction::North => position.y < center,
        Direction::South => position.y > center,
        Direction::East => position.x < center,
        Direction::West => position.x > center,
    }
}

pub fn is_out_of_bounds(position: Position, config: &SimConfig) -> bool {
    let buffer = config.out_of_bounds_buffer;
    let limit = config.arena_size + buffer;
    position.x < -buffer || position.x > limit || position.y < -buffer || position.y > limit
}

/// Whether two positions on `direction` share a lane
pub fn same_lane(direction: Direction, a: Position, b: Position, config: &SimConfig) -> bool {
    let cross = match direction {
        Direction::North | Direction::South => (a.x - b.x).abs(),
        Direction::East | Direction::West => (a.y - b.y).abs(),
    };
    cross <= config.lane_tolerance
}

/// Distance between two positions measured along the direction's axis
pub fn axis_distance(direction: Direction, a: Position, b: Position) -> f32 {
    match direction {
        Direction::North | Direction::South => (a.y - b.y).abs(),
        Direction::East | Direction::West => (a.x - b.x).abs(),
    }
}
