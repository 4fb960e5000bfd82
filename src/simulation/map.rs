//! Terminal view of an intersection snapshot
//!
//! Read-only; used by the headless binary to show what the simulation is
//! doing without a graphical front end.

use super::config::SimConfig;
use super::state::IntersectionState;
use super::types::{Direction, LightColor};

/// Arena units per character cell
const CELL: f32 = 10.0;

/// Widest grid drawn; larger arenas get coarser cells
pub const MAX_MAP_CELLS: usize = 120;

fn light_char(color: LightColor) -> char {
    match color {
        LightColor::Red => 'R',
        LightColor::Yellow => 'Y',
        LightColor::Green => 'G',
    }
}

/// Render `state` as a character grid
pub fn draw_map(state: &IntersectionState, config: &SimConfig) -> String {
    let size = ((config.arena_size / CELL).ceil() as usize).min(MAX_MAP_CELLS);
    if size == 0 {
        return String::new();
    }
    let cell = config.arena_size / size as f32;
    let mut grid = vec![vec![' '; size]; size];

    // Helper to convert arena coords to grid coords, None when off-grid
    let to_grid = |x: f32, y: f32| -> Option<(usize, usize)> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let (row, col) = ((y / cell) as usize, (x / cell) as usize);
        (row < size && col < size).then_some((row, col))
    };

    // Draw roads: two lanes either side of each centerline
    let center = config.center();
    let lane = config.lane_offset;
    for i in 0..size {
        let along = i as f32 * cell + cell / 2.0;
        for offset in [-lane, lane] {
            if let Some((row, col)) = to_grid(center + offset, along) {
                grid[row][col] = '.';
            }
            if let Some((row, col)) = to_grid(along, center + offset) {
                grid[row][col] = '.';
            }
        }
    }

    // Draw stop lines on each approach lane, tinted by the light colour
    for direction in Direction::ALL {
        let stop = config.stop_lines.get(direction);
        let lane_pos = config.spawn_position(direction);
        let cell = match direction {
            Direction::North | Direction::South => to_grid(lane_pos.x, stop),
            Direction::East | Direction::West => to_grid(stop, lane_pos.y),
        };
        if let Some((row, col)) = cell {
            grid[row][col] = light_char(state.lights.get(direction));
        }
    }

    // Draw vehicles
    for vehicle in &state.vehicles {
        if let Some((row, col)) = to_grid(vehicle.position.x, vehicle.position.y) {
            grid[row][col] = match vehicle.direction {
                Direction::North => '^',
                Direction::South => 'v',
                Direction::East => '<',
                Direction::West => '>',
            };
        }
    }

    let mut out = String::with_capacity(size * (size + 1));
    for row in &grid {
        out.extend(row.iter());
        out.push('\n');
    }
    out
}
