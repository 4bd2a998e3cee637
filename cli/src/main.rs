//! Benchmark front-end for the opinion simulator
//!
//! Drives the core's `run` and `sweep` entry points from the command line.
//! Run statistics print as JSON on stdout; sweep timing lines print as one
//! integer of milliseconds per run, which is what the shell harnesses
//! scrape.

use clap::{Parser, Subcommand};

use opinion_simulator_core_rs::orchestrator::{sweep, SchedulerKind, SimConfig, Simulation};

#[derive(Parser)]
#[command(name = "opinion-sim", about = "Deterministic opinion-dynamics benchmark")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one simulation and print the statistics as JSON
    Run {
        /// Population size
        #[arg(long, default_value_t = 10)]
        agents: i64,

        /// Number of simulation ticks
        #[arg(long, default_value_t = 1)]
        ticks: i64,

        /// RNG seed
        #[arg(long, default_value_t = 12345)]
        seed: i64,

        /// Pairs per work item in the batched scheduler
        #[arg(long, default_value_t = 256)]
        chunk: i64,

        /// Partners per agent for random k-matching (default: all-pairs)
        #[arg(long)]
        matching: Option<i64>,

        /// Use the actor scheduler instead of the batched one
        #[arg(long)]
        actor: bool,
    },

    /// Time one run per population size and print milliseconds per line
    Sweep {
        /// Smallest population size (at least 2)
        #[arg(long)]
        min: i64,

        /// Largest population size
        #[arg(long)]
        max: i64,

        /// Number of simulation ticks
        #[arg(long, default_value_t = 1)]
        ticks: i64,

        /// RNG seed
        #[arg(long, default_value_t = 12345)]
        seed: i64,

        /// Pairs per work item in the batched scheduler
        #[arg(long, default_value_t = 256)]
        chunk: i64,

        /// Partners per agent for random k-matching (default: all-pairs)
        #[arg(long)]
        matching: Option<i64>,
    },
}

fn main() {
    env_logger::init();
    if let Err(error) = dispatch(Cli::parse()) {
        eprintln!("error: {}", error);
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Run {
            agents,
            ticks,
            seed,
            chunk,
            matching,
            actor,
        } => {
            let mut config = SimConfig::from_raw(agents, ticks, seed, chunk, matching)?;
            if actor {
                config.scheduler = SchedulerKind::Actor;
            }
            let stats = Simulation::new(config)?.run()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Sweep {
            min,
            max,
            ticks,
            seed,
            chunk,
            matching,
        } => {
            if min < 2 || max < min {
                return Err(format!(
                    "invalid range: sweep requires 2 <= min <= max, got [{}, {}]",
                    min, max
                )
                .into());
            }
            let config = SimConfig::from_raw(min, ticks, seed, chunk, matching)?;
            sweep(
                min as usize,
                max as usize,
                config.ticks,
                seed,
                config.chunk,
                config.topology,
            )?;
        }
    }
    Ok(())
}
