//! Real-time driver for a [`Simulation`]
//!
//! One task owns the simulation and serializes the three periodic triggers
//! (lights, spawn, move) through a single `select!` loop. Every committed
//! update is published as a snapshot on a watch channel.

use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::simulation::{IntersectionState, Simulation};

/// Handle to a simulation running on its own task
pub struct SimulationHandle {
    snapshots: watch::Receiver<IntersectionState>,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<Simulation>,
}

impl SimulationHandle {
    /// Latest committed snapshot
    pub fn state(&self) -> IntersectionState {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified after every committed update
    pub fn subscribe(&self) -> watch::Receiver<IntersectionState> {
        self.snapshots.clone()
    }

    /// Stop scheduling triggers and hand the simulation back
    pub async fn stop(self) -> Result<Simulation> {
        // The task may already have exited; the join below reports why
        let _ = self.shutdown.send(());
        self.task.await.context("Simulation task failed")
    }
}

/// Move `sim` onto a new task and start its timers
pub fn spawn(sim: Simulation) -> SimulationHandle {
    let (snapshot_tx, snapshots) = watch::channel(sim.state().clone());
    let (shutdown, shutdown_rx) = oneshot::channel();
    let task = tokio::spawn(run(sim, snapshot_tx, shutdown_rx));

    SimulationHandle {
        snapshots,
        shutdown,
        task,
    }
}

async fn run(
    mut sim: Simulation,
    snapshot_tx: watch::Sender<IntersectionState>,
    mut shutdown_rx: oneshot::Receiver<()>,
) -> Simulation {
    let start = Instant::now();
    let config = sim.config().clone();

    let spawn_period = Duration::from_millis(config.spawn_period_ms);
    let tick_period = Duration::from_millis(config.tick_ms);
    let mut spawn_timer = time::interval_at(start + spawn_period, spawn_period);
    let mut move_timer = time::interval_at(start + tick_period, tick_period);
    spawn_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    move_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let first_change = Duration::from_millis(sim.controller().phase_duration_ms());
    let lights_timer = time::sleep_until(start + first_change);
    tokio::pin!(lights_timer);

    info!("Simulation started");

    loop {
        tokio::select! {
            biased;

            result = &mut shutdown_rx => {
                if result.is_err() {
                    warn!("Simulation handle dropped without stop, shutting down");
                }
                break;
            }
            () = &mut lights_timer => {
                let delay = sim.change_lights();
                let next = lights_timer.deadline() + Duration::from_millis(delay);
                lights_timer.as_mut().reset(next);
            }
            _ = spawn_timer.tick() => {
                sim.spawn_vehicle();
            }
            _ = move_timer.tick() => {
                sim.move_vehicles();
            }
        }

        sim.stats.elapsed_ms = start.elapsed().as_millis() as u64;
        snapshot_tx.send_replace(sim.state().clone());
    }

    info!("Simulation stopped after {} ticks", sim.stats.ticks);
    sim
}
