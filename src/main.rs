use anyhow::Result;
use clap::Parser;
use log::info;

use intersection_sim::simulation::{draw_map, SimConfig, Simulation};

#[derive(Parser)]
#[command(name = "intersection_sim")]
#[command(about = "Four-way signaled intersection simulation")]
struct Cli {
    /// Run on wall-clock timers instead of virtual time
    #[arg(long)]
    realtime: bool,

    /// Simulated (or, with --realtime, wall-clock) run length in milliseconds
    #[arg(long, default_value = "60000")]
    duration_ms: u64,

    /// Seed for reproducible spawns
    #[arg(long)]
    seed: Option<u64>,

    /// Distance travelled per movement tick
    #[arg(long)]
    speed: Option<f32>,

    #[arg(long)]
    spawn_period_ms: Option<u64>,

    #[arg(long)]
    green_ms: Option<u64>,

    #[arg(long)]
    yellow_ms: Option<u64>,

    /// Milliseconds between movement ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Print the intersection map every simulated second
    #[arg(long)]
    map: bool,
}

impl Cli {
    fn config(&self) -> SimConfig {
        let mut config = SimConfig::default();
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(period) = self.spawn_period_ms {
            config.spawn_period_ms = period;
        }
        if let Some(green) = self.green_ms {
            config.green_ms = green;
        }
        if let Some(yellow) = self.yellow_ms {
            config.yellow_ms = yellow;
        }
        if let Some(tick) = self.tick_ms {
            config.tick_ms = tick;
        }
        config
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.config();
    let sim = match cli.seed {
        Some(seed) => Simulation::with_seed(config, seed)?,
        None => Simulation::new(config)?,
    };

    let sim = if cli.realtime {
        run_realtime(sim, cli.duration_ms)?
    } else {
        run_headless(sim, cli.duration_ms, cli.map)
    };

    sim.print_summary();
    sim.log_summary();
    Ok(())
}

/// Run the simulation in headless mode on virtual time
fn run_headless(mut sim: Simulation, duration_ms: u64, show_map: bool) -> Simulation {
    info!("Running intersection simulation for {}ms of virtual time", duration_ms);

    let mut now = 0;
    while now < duration_ms {
        // Step one simulated second (or whatever remains) at a time
        now = (now + 1000).min(duration_ms);
        sim.advance_to(now);

        if show_map {
            println!("--- t = {:.1}s ---", now as f32 / 1000.0);
            print!("{}", draw_map(sim.state(), sim.config()));
        }
    }

    sim
}

#[cfg(feature = "realtime")]
fn run_realtime(sim: Simulation, duration_ms: u64) -> Result<Simulation> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        info!("Running intersection simulation for {}ms of wall-clock time", duration_ms);
        let handle = intersection_sim::runner::spawn(sim);
        tokio::time::sleep(std::time::Duration::from_millis(duration_ms)).await;
        handle.stop().await
    })
}

#[cfg(not(feature = "realtime"))]
fn run_realtime(_sim: Simulation, _duration_ms: u64) -> Result<Simulation> {
    anyhow::bail!("Realtime feature is not enabled. Rebuild with --features realtime")
}
