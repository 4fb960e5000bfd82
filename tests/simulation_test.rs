//! Whole-simulation tests: invariants over long seeded runs and the CLI

use std::collections::HashMap;
use std::process::Command;

use intersection_sim::simulation::{
    axis_distance, draw_map, has_passed_stop_line, same_lane, Axis, Direction, IntersectionState,
    LightColor, Lights, Position, ScriptedSource, SimConfig, SimVehicle, Simulation,
    VehicleColor, VehicleId, MAX_MAP_CELLS,
};

const EPSILON: f32 = 1e-3;

/// Every same-lane pair keeps the spacing that applies to it
fn assert_spacing(state: &IntersectionState, config: &SimConfig, at_ms: u64) {
    for (i, a) in state.vehicles.iter().enumerate() {
        for b in &state.vehicles[i + 1..] {
            if a.direction != b.direction || !same_lane(a.direction, a.position, b.position, config) {
                continue;
            }
            let required = if a.has_passed_intersection && b.has_passed_intersection {
                config.passed_spacing()
            } else {
                config.car_boundary
            };
            let distance = axis_distance(a.direction, a.position, b.position);
            assert!(
                distance + EPSILON >= required,
                "Vehicles {:?} and {:?} only {} apart at {}ms (need {})",
                a.id,
                b.id,
                distance,
                at_ms,
                required
            );
        }
    }
}

fn run_invariants(seed: u64, config: SimConfig, duration_ms: u64) -> Simulation {
    let mut sim = Simulation::with_seed(config.clone(), seed).unwrap();

    while sim.stats.elapsed_ms < duration_ms {
        let before: HashMap<VehicleId, SimVehicle> = sim
            .state()
            .vehicles
            .iter()
            .map(|v| (v.id, v.clone()))
            .collect();

        sim.advance_by(config.tick_ms);
        let now = sim.stats.elapsed_ms;
        let state = sim.state();

        assert!(state.lights.is_consistent(), "Bad lights at {}ms", now);
        assert_spacing(state, &config, now);

        for vehicle in &state.vehicles {
            assert!(vehicle.position.is_finite());

            let Some(previous) = before.get(&vehicle.id) else {
                continue;
            };
            assert!(
                !previous.has_passed_intersection || vehicle.has_passed_intersection,
                "Vehicle {:?} lost its crossing flag at {}ms",
                vehicle.id,
                now
            );

            // Lights change before the move in the same millisecond, so the
            // post-tick colour is the one the move saw
            let light = state.lights.get(vehicle.direction);
            if light != LightColor::Green && !previous.is_committed(&config) {
                assert!(
                    !has_passed_stop_line(vehicle.direction, vehicle.position, &config),
                    "Vehicle {:?} ran a {:?} light at {}ms",
                    vehicle.id,
                    light,
                    now
                );
            }
        }
    }

    sim
}

#[test]
fn test_invariants_hold_over_long_run() {
    let sim = run_invariants(42, SimConfig::default(), 180_000);
    assert!(sim.stats.vehicles_spawned > 0);
    assert!(sim.stats.vehicles_exited > 0);
    assert_eq!(sim.stats.ticks, 180_000 / 50);
}

#[test]
fn test_invariants_hold_under_heavy_traffic() {
    let config = SimConfig {
        spawn_period_ms: 250,
        initial_green: Axis::NorthSouth,
        ..SimConfig::default()
    };
    for seed in 0..3 {
        let sim = run_invariants(seed, config.clone(), 90_000);
        assert!(sim.stats.spawns_rejected > 0, "Heavy traffic never filled a lane");
    }
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let mut a = Simulation::with_seed(SimConfig::default(), 9).unwrap();
    let mut b = Simulation::with_seed(SimConfig::default(), 9).unwrap();
    a.advance_to(60_000);
    b.advance_to(60_000);
    assert_eq!(a.state(), b.state());
    assert_eq!(a.stats, b.stats);
}

#[test]
fn test_new_vehicle_never_overlaps_lane_traffic() {
    let config = SimConfig::default();
    let required = config.passed_spacing();
    let source = ScriptedSource::new(vec![Direction::North]);
    let mut sim = Simulation::with_source(config.clone(), Box::new(source)).unwrap();

    // North is red from the start so the lane backs up toward the entrance
    for _ in 0..400 {
        let before = sim.state().clone();
        match sim.spawn_vehicle() {
            Some(id) => {
                let spawned = sim.state().vehicle(id).unwrap();
                for other in &before.vehicles {
                    if other.direction == spawned.direction
                        && same_lane(spawned.direction, spawned.position, other.position, &config)
                    {
                        assert!(axis_distance(spawned.direction, spawned.position, other.position) >= required);
                    }
                }
            }
            None => assert_eq!(sim.state().vehicles.len(), before.vehicles.len()),
        }
        sim.move_vehicles();
    }

    assert!(sim.stats.spawns_rejected > 0);
    assert_eq!(
        sim.stats.vehicles_spawned + sim.stats.spawns_rejected,
        400
    );
}

#[test]
fn test_green_north_south_never_holds_lone_vehicle() {
    let config = SimConfig {
        initial_green: Axis::NorthSouth,
        ..SimConfig::default()
    };
    let mut sim = Simulation::with_seed(config, 3).unwrap();
    sim.set_state(IntersectionState {
        lights: Lights::green_on(Axis::NorthSouth),
        vehicles: vec![SimVehicle::new(
            VehicleId(1000),
            Direction::North,
            VehicleColor::Gray,
            Position::new(210.0, 300.0),
        )],
    });

    // 20 ticks in the first second, no spawns before 3000ms
    sim.advance_to(1000);
    let vehicle = sim.state().vehicle(VehicleId(1000)).unwrap();
    assert_eq!(vehicle.position.y, 260.0);

    // Still green until 10s: 300 - 2 * 199 = -98 is past the buffer
    sim.advance_to(9_950);
    assert!(sim.state().vehicle(VehicleId(1000)).is_none());
    assert_eq!(sim.state().lights.north, LightColor::Green);

    sim.advance_to(13_000);
    assert_eq!(sim.state().lights, Lights::green_on(Axis::EastWest));
}

#[test]
fn test_map_shows_lights_and_vehicles() {
    let config = SimConfig::default();
    let snapshot = IntersectionState {
        lights: Lights::green_on(Axis::EastWest),
        vehicles: vec![SimVehicle::new(
            VehicleId(0),
            Direction::North,
            VehicleColor::Blue,
            Position::new(210.0, 300.0),
        )],
    };

    let map = draw_map(&snapshot, &config);
    let rows: Vec<&str> = map.lines().collect();
    assert_eq!(rows.len(), 40);
    // North stop line at (210, 240), the vehicle at (210, 300)
    assert_eq!(rows[24].chars().nth(21), Some('R'));
    assert_eq!(rows[30].chars().nth(21), Some('^'));
    assert!(map.contains('G'));
}

#[test]
fn test_map_grid_is_capped_for_huge_arena() {
    let config = SimConfig {
        arena_size: 1.0e9,
        ..SimConfig::default()
    };
    let snapshot = IntersectionState::new(Lights::green_on(Axis::NorthSouth));

    let map = draw_map(&snapshot, &config);
    let rows: Vec<&str> = map.lines().collect();
    assert_eq!(rows.len(), MAX_MAP_CELLS);
    assert!(rows.iter().all(|row| row.chars().count() == MAX_MAP_CELLS));
}

#[test]
fn test_headless_binary_reports_summary() {
    let output = Command::new(env!("CARGO_BIN_EXE_intersection_sim"))
        .args(["--duration-ms", "30000", "--seed", "7"])
        .env("RUST_LOG", "warn,intersection_sim=info")
        .output()
        .expect("Failed to execute simulation");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "Simulation failed to run in headless mode. stderr: {}",
        stderr
    );
    assert!(
        stderr.contains("=== SIMULATION COMPLETE ==="),
        "Simulation did not complete properly. stderr: {}",
        stderr
    );

    let spawned_line = stderr
        .lines()
        .find(|line| line.contains("Total vehicles spawned:"))
        .expect("Could not find 'Total vehicles spawned' line");
    let spawned: u64 = spawned_line
        .split("Total vehicles spawned:")
        .nth(1)
        .and_then(|s| s.trim().parse().ok())
        .expect("Could not parse spawned count");
    assert!(spawned > 0, "No vehicles were spawned during simulation");

    for label in ["Spawns rejected:", "Vehicles exited:", "Active vehicles:", "Light changes:"] {
        assert!(stderr.contains(label), "Missing '{}' statistic", label);
    }
}

#[test]
fn test_binary_rejects_inconsistent_config() {
    let output = Command::new(env!("CARGO_BIN_EXE_intersection_sim"))
        .args(["--speed", "50"])
        .output()
        .expect("Failed to execute simulation");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("following boundary"), "stderr: {}", stderr);
}
