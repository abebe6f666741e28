//! skygrid-sim — headless drone mission simulator.
//!
//! Flies a mission over a randomly generated grid of environmental zones,
//! prints the mission statistics, and appends the completed mission to a
//! JSON history file.

mod state;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use skygrid_core::{Mission, MissionType};
use skygrid_store::MissionStore;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::state::{parse_moves, SimState};

#[derive(Parser)]
#[command(
    name = "skygrid-sim",
    about = "Drone mission simulator over a random environmental grid"
)]
struct Cli {
    /// Mission history file
    #[arg(long, default_value = "missions.json")]
    history_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fly one mission and append it to the history
    Run {
        /// Mission type to fly
        #[arg(long, value_enum, default_value_t = MissionArg::Monitoring)]
        mission: MissionArg,
        /// Sweep the grid automatically instead of following --moves
        #[arg(long, conflicts_with = "moves")]
        auto: bool,
        /// Number of cells to visit in --auto mode
        #[arg(long, default_value_t = 60)]
        steps: usize,
        /// Comma-separated move script, e.g. "R,R,U,L,D"
        #[arg(long)]
        moves: Option<String>,
        /// RNG seed for a reproducible map and drone
        #[arg(long)]
        seed: Option<u64>,
        /// Grid width in cells
        #[arg(long, default_value_t = 25)]
        width: usize,
        /// Grid height in cells
        #[arg(long, default_value_t = 20)]
        height: usize,
    },
    /// Print the stored mission history
    History,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MissionArg {
    Monitoring,
    Delivery,
    Surveillance,
}

impl From<MissionArg> for MissionType {
    fn from(arg: MissionArg) -> Self {
        match arg {
            MissionArg::Monitoring => MissionType::Monitoring,
            MissionArg::Delivery => MissionType::Delivery,
            MissionArg::Surveillance => MissionType::Surveillance,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let store = MissionStore::new(&cli.history_file);

    match cli.command {
        Command::Run {
            mission,
            auto,
            steps,
            moves,
            seed,
            width,
            height,
        } => run_mission(&store, mission, auto, steps, moves, seed, width, height),
        Command::History => {
            print_history(&store);
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_mission(
    store: &MissionStore,
    mission: MissionArg,
    auto: bool,
    steps: usize,
    moves: Option<String>,
    seed: Option<u64>,
    width: usize,
    height: usize,
) -> Result<()> {
    if width == 0 || height == 0 {
        bail!("grid must be at least 1x1");
    }
    if !auto && moves.is_none() {
        bail!("pass --auto or --moves to fly the mission");
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut sim = SimState::new(width, height, mission.into(), &mut rng);
    sim.begin()?;

    if auto {
        sim.run_sweep(steps)?;
    } else if let Some(script) = moves {
        for dir in parse_moves(&script)? {
            sim.step(dir)?;
        }
    }

    let mission = sim.finish()?;
    print_mission(None, &mission);

    // A failed save is reported but never discards the in-memory mission
    let mut history = store.load();
    history.append(mission);
    if let Err(err) = store.save(&history) {
        tracing::error!("Could not save mission history: {err}");
    }
    Ok(())
}

fn print_history(store: &MissionStore) {
    let missions = store.load();
    if missions.is_empty() {
        println!("No missions in history.");
        return;
    }
    for (index, mission) in missions.iter().enumerate() {
        print_mission(Some(index + 1), mission);
        println!();
    }
}

fn print_mission(index: Option<usize>, mission: &Mission) {
    match index {
        Some(n) => println!("Mission {n}: {:?} [{:?}]", mission.mission_type(), mission.status()),
        None => println!("Mission: {:?} [{:?}]", mission.mission_type(), mission.status()),
    }
    println!("  Flight points: {}", mission.flight_path().len());
    let final_battery = mission
        .final_battery()
        .map(|b| format!("{b:.2}%"))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "  Battery:       {:.2}% -> {}",
        mission.initial_battery(),
        final_battery
    );
    match mission.statistics() {
        Some(stats) => {
            for line in stats.to_string().lines() {
                println!("  {line}");
            }
        }
        None => println!("  No statistics (mission incomplete or too short)"),
    }
}
