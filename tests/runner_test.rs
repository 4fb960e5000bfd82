//! Real-time runner tests on a paused tokio clock

#![cfg(feature = "realtime")]

use std::time::Duration;

use intersection_sim::runner;
use intersection_sim::simulation::{Axis, LightColor, Lights, SimConfig, Simulation};

fn north_south_first() -> SimConfig {
    SimConfig {
        initial_green: Axis::NorthSouth,
        ..SimConfig::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_runner_drives_all_three_triggers() {
    let sim = Simulation::with_seed(north_south_first(), 3).unwrap();
    let handle = runner::spawn(sim);

    tokio::time::sleep(Duration::from_millis(10_500)).await;

    let state = handle.state();
    assert_eq!(state.lights.north, LightColor::Yellow);
    assert_eq!(state.lights.east, LightColor::Red);
    assert!(!state.vehicles.is_empty(), "No vehicles spawned in 10s");

    let sim = handle.stop().await.unwrap();
    assert_eq!(sim.stats.light_changes, 1);
    assert!(sim.stats.vehicles_spawned >= 1);
    assert!(sim.stats.ticks >= 200, "Only {} movement ticks", sim.stats.ticks);
}

#[tokio::test(start_paused = true)]
async fn test_runner_swaps_axes_after_full_period() {
    let sim = Simulation::with_seed(north_south_first(), 4).unwrap();
    let handle = runner::spawn(sim);

    tokio::time::sleep(Duration::from_millis(13_100)).await;
    assert_eq!(handle.state().lights, Lights::green_on(Axis::EastWest));

    let sim = handle.stop().await.unwrap();
    assert_eq!(sim.stats.light_changes, 2);
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_committed_updates() {
    let sim = Simulation::with_seed(SimConfig::default(), 5).unwrap();
    let handle = runner::spawn(sim);
    let mut snapshots = handle.subscribe();

    snapshots.changed().await.unwrap();
    assert!(snapshots.borrow_and_update().lights.is_consistent());

    handle.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_stop_leaves_state_consistent() {
    let sim = Simulation::with_seed(SimConfig::default(), 6).unwrap();
    let handle = runner::spawn(sim);

    tokio::time::sleep(Duration::from_millis(11_234)).await;
    let sim = handle.stop().await.unwrap();
    assert!(sim.state().lights.is_consistent());

    // Stopped simulations can still be driven by hand
    let mut sim = sim;
    sim.move_vehicles();
    assert!(sim.state().lights.is_consistent());
}
