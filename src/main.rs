//! Rubik's Cube Solver
//!
//! Solves a 3x3x3 cube from a sticker layout, a move sequence or a random
//! scramble with one of several search engines, and prints the solution as
//! moves and as plain-language steps.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{bail, WrapErr};
use log::info;

use cubesolve::moves::{format_sequence, parse_sequence};
use cubesolve::progress::DEFAULT_YIELD_INTERVAL;
use cubesolve::scramble::{self, Scramble};
use cubesolve::solver::DEFAULT_BEAM_WIDTH;
use cubesolve::{Algorithm, CubeState, Heuristic, Limits, Move, Progress, SolverConfig};

/// Length of the scramble solved when no input is given.
const DEFAULT_RANDOM_LENGTH: usize = 5;

/// Finds move sequences that solve a 3x3x3 Rubik's Cube.
#[derive(Parser)]
#[command(name = "cubesolve")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a cube state.
    Solve(SolveArgs),
    /// Print a random scramble and the resulting cube.
    Scramble {
        #[arg(long, default_value_t = 20)]
        length: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List every move with its description.
    Moves,
}

#[derive(Args)]
struct SolveArgs {
    /// A printed net, or 54 color letters (W R G Y O B) in face order U R F D L B.
    #[arg(long, conflicts_with_all = ["scramble", "random"])]
    state: Option<String>,
    /// Moves to apply to a solved cube, e.g. "R U R' U'".
    #[arg(long, conflicts_with = "random")]
    scramble: Option<String>,
    /// Length of a random scramble to solve.
    #[arg(long)]
    random: Option<usize>,
    /// Seed for the random scramble.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t)]
    algorithm: Algorithm,
    /// Move bound (defaults depend on the algorithm).
    #[arg(long)]
    max_depth: Option<u32>,
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
    /// Node expansions between progress reports.
    #[arg(long, default_value_t = DEFAULT_YIELD_INTERVAL)]
    yield_interval: u64,
    #[arg(long)]
    node_limit: Option<u64>,
    #[arg(long, default_value_t = DEFAULT_BEAM_WIDTH)]
    beam_width: usize,
    #[arg(long, value_enum, default_value_t)]
    heuristic: Heuristic,
    /// Log progress snapshots while searching.
    #[arg(long)]
    progress: bool,
}

impl SolveArgs {
    fn config(&self) -> SolverConfig {
        SolverConfig {
            algorithm: self.algorithm,
            max_depth: self.max_depth,
            limits: Limits {
                time_limit: Duration::from_secs(self.timeout_secs),
                yield_interval: self.yield_interval,
                node_limit: self.node_limit,
                ..Limits::default()
            },
            beam_width: self.beam_width,
            heuristic: self.heuristic,
            ..SolverConfig::default()
        }
    }

    /// The starting state, plus the scramble moves when they are known.
    fn start(&self) -> color_eyre::Result<(CubeState, Option<Vec<Move>>)> {
        if let Some(state) = &self.state {
            let cube: CubeState = state.parse().wrap_err("invalid --state")?;
            return Ok((cube, None));
        }
        if let Some(text) = &self.scramble {
            let moves = parse_sequence(text).wrap_err("invalid --scramble")?;
            let scramble = Scramble::from_moves(moves);
            return Ok((scramble.cube, Some(scramble.moves)));
        }
        let length = self.random.unwrap_or(DEFAULT_RANDOM_LENGTH);
        let scramble = scramble::random(length, &mut rng(self.seed));
        Ok((scramble.cube, Some(scramble.moves)))
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Solve(args)) => run_solve(&args),
        Some(Command::Scramble { length, seed }) => {
            run_scramble(length, seed);
            Ok(())
        }
        Some(Command::Moves) => {
            run_moves();
            Ok(())
        }
        None => {
            // default: solve a short random scramble with IDA*
            let args = SolveArgs {
                state: None,
                scramble: None,
                random: Some(DEFAULT_RANDOM_LENGTH),
                seed: None,
                algorithm: Algorithm::IdaStar,
                max_depth: None,
                timeout_secs: 30,
                yield_interval: DEFAULT_YIELD_INTERVAL,
                node_limit: None,
                beam_width: DEFAULT_BEAM_WIDTH,
                heuristic: Heuristic::default(),
                progress: false,
            };
            run_solve(&args)
        }
    }
}

fn rng(seed: Option<u64>) -> fastrand::Rng {
    seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)
}

/// Solves the requested state and prints the outcome.
fn run_solve(args: &SolveArgs) -> color_eyre::Result<()> {
    let (cube, scramble) = args.start()?;
    if let Some(moves) = &scramble {
        println!("Scramble: {}", format_sequence(moves));
    }
    println!("{cube}");

    let config = args.config();
    let solver = config.solver();
    let bound = config.depth();
    println!("Solving with {} (bound {bound})", solver.name());

    let mut report = |p: &Progress| match p.phase() {
        Some(phase) => info!(
            "phase {phase}: depth {}, {} nodes, {} ms",
            p.depth(),
            p.nodes(),
            p.elapsed_ms()
        ),
        None => info!("depth {}, {} nodes, {} ms", p.depth(), p.nodes(), p.elapsed_ms()),
    };
    let on_progress: Option<&mut dyn FnMut(&Progress)> = if args.progress {
        Some(&mut report)
    } else {
        None
    };
    let result = solver.solve(&cube, bound, on_progress);

    if result.found {
        if !result.solves(&cube) {
            bail!(
                "{} returned {} which does not solve the cube",
                solver.name(),
                format_sequence(&result.solution)
            );
        }
        println!(
            "Solution ({} moves): {}",
            result.solution.len(),
            format_sequence(&result.solution)
        );
        println!("{}", format_steps(&result.solution));
    } else {
        println!("No solution found ({:?})", result.status);
        if !result.solution.is_empty() {
            println!("Partial: {}", format_sequence(&result.solution));
        }
    }
    println!("Nodes explored: {}", result.nodes_explored);
    println!("Time: {} ms", result.time_elapsed_ms());
    Ok(())
}

/// Prints a random scramble and its cube.
fn run_scramble(length: usize, seed: Option<u64>) {
    let scramble = scramble::random(length, &mut rng(seed));
    println!("{}", format_sequence(&scramble.moves));
    println!("{}", scramble.cube);
    println!("{}", scramble.cube.to_facelet_string());
}

/// Prints all 18 moves with their descriptions.
fn run_moves() {
    for mv in Move::ALL {
        println!("{:<3} {}", mv.to_string(), mv.describe());
    }
}

/// Numbered plain-language steps, one per line.
fn format_steps(solution: &[Move]) -> String {
    solution
        .iter()
        .enumerate()
        .map(|(i, mv)| format!("{}. {}", i + 1, mv.describe()))
        .collect::<Vec<_>>()
        .join("\n")
}
