//! Main simulation world that ties everything together
//!
//! `Simulation` is the single owner of the intersection state. The light,
//! spawn and move triggers each replace the state with a new snapshot; they
//! are never interleaved. Time can be driven virtually with
//! [`Simulation::advance_to`] or in real time by the runner.

use anyhow::Result;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::SimConfig;
use super::lights::{LightController, Lights};
use super::random::{RngSource, SpawnSource};
use super::state::{IntersectionState, SpawnOutcome};
use super::types::{Direction, VehicleId};

/// Running counters for a simulation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationStats {
    pub ticks: u64,
    pub vehicles_spawned: u64,
    pub spawns_rejected: u64,
    pub vehicles_exited: u64,
    pub light_changes: u64,
    /// Virtual time reached by `advance_to`
    pub elapsed_ms: u64,
}

/// Next due time of each periodic trigger, in virtual milliseconds
#[derive(Debug, Clone, Copy)]
struct Schedule {
    lights_at: u64,
    spawn_at: u64,
    move_at: u64,
}

/// The intersection simulation
pub struct Simulation {
    config: SimConfig,
    state: IntersectionState,
    controller: LightController,
    source: Box<dyn SpawnSource>,
    schedule: Schedule,
    next_id: u64,
    pub stats: SimulationStats,
}

impl Simulation {
    /// Create a simulation with an OS-seeded RNG
    pub fn new(config: SimConfig) -> Result<Self> {
        Self::with_source(config, Box::new(RngSource(StdRng::from_os_rng())))
    }

    /// Create a simulation with a seeded RNG for reproducible runs
    pub fn with_seed(config: SimConfig, seed: u64) -> Result<Self> {
        Self::with_source(config, Box::new(RngSource(StdRng::seed_from_u64(seed))))
    }

    pub fn with_source(config: SimConfig, source: Box<dyn SpawnSource>) -> Result<Self> {
        config.validate()?;

        let controller = LightController::new(config.green_ms, config.yellow_ms);
        let schedule = Schedule {
            lights_at: controller.phase_duration_ms(),
            spawn_at: config.spawn_period_ms,
            move_at: config.tick_ms,
        };

        Ok(Self {
            state: IntersectionState::new(Lights::green_on(config.initial_green)),
            config,
            controller,
            source,
            schedule,
            next_id: 0,
            stats: SimulationStats::default(),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Current snapshot
    pub fn state(&self) -> &IntersectionState {
        &self.state
    }

    /// Replace the whole state, e.g. to set up a scenario
    pub fn set_state(&mut self, state: IntersectionState) {
        self.state = state;
    }

    pub fn controller(&self) -> &LightController {
        &self.controller
    }

    /// End the current light phase. Returns the delay until the next one.
    pub fn change_lights(&mut self) -> u64 {
        let lights = self.controller.transition(&self.state.lights);
        self.state = self.state.with_lights(lights);
        self.stats.light_changes += 1;
        info!(
            "Lights: north/south {:?}, east/west {:?}",
            lights.north, lights.east
        );
        self.controller.phase_duration_ms()
    }

    /// Attempt one spawn with a randomly chosen approach
    pub fn spawn_vehicle(&mut self) -> Option<VehicleId> {
        let direction = self.source.choose_direction();
        self.spawn_on(direction)
    }

    /// Attempt one spawn on `direction`
    pub fn spawn_on(&mut self, direction: Direction) -> Option<VehicleId> {
        let color = self.source.choose_color();
        let id = VehicleId(self.next_id);

        match self.state.spawn(id, direction, color, &self.config) {
            SpawnOutcome::Spawned(state) => {
                self.next_id += 1;
                self.state = state;
                self.stats.vehicles_spawned += 1;
                debug!("Spawned vehicle {:?} heading {:?}", id.0, direction);
                Some(id)
            }
            SpawnOutcome::Rejected => {
                self.stats.spawns_rejected += 1;
                None
            }
        }
    }

    /// Run one movement tick over every vehicle
    pub fn move_vehicles(&mut self) {
        let outcome = self.state.step(&self.config);
        for id in &outcome.exited {
            debug!("Vehicle {:?} left the arena", id.0);
        }
        self.stats.ticks += 1;
        self.stats.vehicles_exited += outcome.exited.len() as u64;
        self.state = outcome.state;
    }

    /// Run every trigger due up to and including `target_ms` of virtual time
    ///
    /// Triggers due at the same instant fire lights first, then spawn, then
    /// move.
    pub fn advance_to(&mut self, target_ms: u64) {
        loop {
            let Schedule {
                lights_at,
                spawn_at,
                move_at,
            } = self.schedule;
            let due = lights_at.min(spawn_at).min(move_at);
            if due > target_ms {
                break;
            }

            if lights_at == due {
                let delay = self.change_lights();
                self.schedule.lights_at = due + delay;
            }
            if spawn_at == due {
                self.spawn_vehicle();
                self.schedule.spawn_at = due + self.config.spawn_period_ms;
            }
            if move_at == due {
                self.move_vehicles();
                self.schedule.move_at = due + self.config.tick_ms;
            }
        }
        self.stats.elapsed_ms = self.stats.elapsed_ms.max(target_ms);
    }

    pub fn advance_by(&mut self, delta_ms: u64) {
        self.advance_to(self.stats.elapsed_ms + delta_ms);
    }

    /// Log the end-of-run statistics
    pub fn log_summary(&self) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Elapsed time: {:.2}s", self.stats.elapsed_ms as f32 / 1000.0);
        info!("Total vehicles spawned: {}", self.stats.vehicles_spawned);
        info!("Spawns rejected: {}", self.stats.spawns_rejected);
        info!("Vehicles exited: {}", self.stats.vehicles_exited);
        info!("Active vehicles: {}", self.state.vehicles.len());
        info!("Light changes: {}", self.stats.light_changes);
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Intersection Summary ===");
        println!("Time: {:.2}s", self.stats.elapsed_ms as f32 / 1000.0);
        println!(
            "Lights: N={:?} S={:?} E={:?} W={:?}",
            self.state.lights.north,
            self.state.lights.south,
            self.state.lights.east,
            self.state.lights.west
        );
        println!("Vehicles: {}", self.state.vehicles.len());

        if !self.state.vehicles.is_empty() {
            println!("--- Active Vehicles ---");
            for vehicle in &self.state.vehicles {
                println!(
                    "  Vehicle {:?}: {:?} {:?}, position=({:.1}, {:.1}), passed={}",
                    vehicle.id.0,
                    vehicle.direction,
                    vehicle.color,
                    vehicle.position.x,
                    vehicle.position.y,
                    vehicle.has_passed_intersection
                );
            }
        }
    }
}
