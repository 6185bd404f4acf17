#![warn(clippy::pedantic)]

mod config;

use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use beginner_solver::{Solution, SolveRecord, Solver, refine, spawn_solve};
use clap::{ArgAction, Args, Parser, Subcommand};
use color_eyre::eyre::{WrapErr, eyre};
use config::CliConfig;
use cube_core::{CubeState, Face, format_moves, parse_moves, scramble};
use env_logger::TimestampPrecision;
use itertools::{Itertools, MinMaxResult};
use log::{LevelFilter, info, warn};
use owo_colors::OwoColorize;

/// Scrambles and solves 3×3×3 cubes with the beginner's method
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file in TOML format. Defaults to
    /// `cubesolve/config.toml` in the user configuration directory.
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a random scramble and the facelets it produces
    Scramble {
        /// Seed for the random moves; random when left out
        #[arg(long)]
        seed: Option<u64>,
        /// Number of quarter turns
        #[arg(long)]
        length: Option<usize>,
    },
    /// Solve a cube and print the moves phase by phase
    Solve {
        #[command(flatten)]
        input: CubeInput,
    },
    /// Solve many seeded scrambles and report move counts
    Bench {
        /// How many scrambles to solve
        #[arg(long, default_value_t = 100)]
        count: u64,
        /// Seed of the first scramble; the rest count up from it
        #[arg(long, default_value_t = 0)]
        first_seed: u64,
    },
    /// Cancel and collapse redundant moves in a sequence, e.g. "U U U R R'"
    Refine { sequence: String },
    /// Print a colored net of a cube
    Show {
        #[command(flatten)]
        input: CubeInput,
    },
}

/// Where the cube comes from. Without any of these the cube is solved.
#[derive(Args)]
#[group(multiple = false)]
struct CubeInput {
    /// 54 facelets in URFDLB order, each written as the letter of its face
    #[arg(long)]
    facelets: Option<String>,
    /// A move sequence applied to the solved cube, e.g. "R U' F2"
    #[arg(long)]
    scramble: Option<String>,
    /// Seed of a random scramble of the configured length
    #[arg(long)]
    seed: Option<u64>,
}

impl CubeInput {
    fn cube(&self, config: &CliConfig) -> color_eyre::Result<CubeState> {
        let mut state = CubeState::solved();
        if let Some(facelets) = &self.facelets {
            state = CubeState::from_facelets(facelets).wrap_err("Invalid facelets")?;
        } else if let Some(sequence) = &self.scramble {
            state.apply_all(&parse_moves(sequence)?);
        } else if let Some(seed) = self.seed {
            scramble(&mut state, config.scramble_length, seed);
        }
        Ok(state)
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Scramble { seed, length } => {
            let seed = seed.unwrap_or_else(|| fastrand::u64(..));
            let mut state = CubeState::solved();
            let moves = scramble(&mut state, length.unwrap_or(config.scramble_length), seed);
            println!("Seed: {seed}");
            println!("{}", format_moves(&moves));
            println!("{}", state.to_facelets());
        }
        Commands::Solve { input } => {
            let state = input.cube(&config)?;
            let started = Instant::now();
            let solution = spawn_solve(state.clone(), config.solver.clone())
                .recv()
                .map_err(|_| eyre!("The solver stopped without an answer"))??;
            let elapsed = started.elapsed();
            print_solution(&solution);
            if let Some(path) = &config.stats_log {
                append_record(path, &SolveRecord::new(&state, &solution, elapsed))?;
            }
        }
        Commands::Bench { count, first_seed } => bench(&config, count, first_seed)?,
        Commands::Refine { sequence } => {
            let moves = parse_moves(&sequence)?;
            println!("{}", format_moves(&refine(&moves)));
        }
        Commands::Show { input } => print_net(&input.cube(&config)?),
    }

    Ok(())
}

fn print_solution(solution: &Solution) {
    let mut line = Vec::new();
    for step in solution.steps() {
        if let Some(message) = step.message {
            if !line.is_empty() {
                println!("  {}", line.iter().join(" "));
                line.clear();
            }
            println!("{}", message.bold());
        }
        line.push(step.move_);
    }
    if !line.is_empty() {
        println!("  {}", line.iter().join(" "));
    }
    println!("{} moves", solution.len().green());
}

fn append_record(path: &Path, record: &SolveRecord) -> color_eyre::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("Failed to open {}", path.display()))?;
    writeln!(file, "{}", serde_json::to_string(record)?)?;
    info!("Appended solve statistics to {}", path.display());
    Ok(())
}

fn bench(config: &CliConfig, count: u64, first_seed: u64) -> color_eyre::Result<()> {
    let solver = Solver::new(config.solver.clone());
    let mut lengths = Vec::new();
    let mut total = Duration::ZERO;
    for seed in first_seed..first_seed + count {
        let mut state = CubeState::solved();
        scramble(&mut state, config.scramble_length, seed);
        let started = Instant::now();
        match solver.solve(&state) {
            Ok(solution) => {
                total += started.elapsed();
                lengths.push(solution.len());
            }
            Err(e) => warn!("Seed {seed} failed: {e}"),
        }
    }

    let failures = count - lengths.len() as u64;
    let (min, max) = match lengths.iter().minmax() {
        MinMaxResult::NoElements => return Err(eyre!("Every solve failed")),
        MinMaxResult::OneElement(&only) => (only, only),
        MinMaxResult::MinMax(&min, &max) => (min, max),
    };
    #[allow(clippy::cast_precision_loss)]
    let mean = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;
    println!(
        "{} solves, {} failures: min {min}, mean {mean:.1}, max {max} moves in {:.3}s",
        lengths.len(),
        failures,
        total.as_secs_f64()
    );
    if failures > 0 {
        return Err(eyre!("{failures} scrambles could not be solved"));
    }
    Ok(())
}

fn paint(face: Face) -> String {
    const STICKER: &str = "■";
    match face {
        Face::U => STICKER.white().to_string(),
        Face::D => STICKER.yellow().to_string(),
        Face::F => STICKER.green().to_string(),
        Face::B => STICKER.blue().to_string(),
        Face::R => STICKER.red().to_string(),
        Face::L => STICKER.truecolor(255, 140, 0).to_string(),
    }
}

/// The cube unfolded with U on top, L F R B across the middle and D below.
fn print_net(state: &CubeState) {
    let row = |face: Face, r: usize| state.face_colors(face)[r].iter().map(|c| paint(*c)).join(" ");
    let indent = " ".repeat(6);
    for r in 0..3 {
        println!("{indent}{}", row(Face::U, r));
    }
    for r in 0..3 {
        println!(
            "{}",
            [Face::L, Face::F, Face::R, Face::B]
                .into_iter()
                .map(|face| row(face, r))
                .join(" ")
        );
    }
    for r in 0..3 {
        println!("{indent}{}", row(Face::D, r));
    }
    println!("{}", state.to_facelets());
}
