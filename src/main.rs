//! CLI entry point for the cube solver.
//!
//! Usage:
//!   cube-solver solve --scramble "U R' F" [options]
//!   cube-solver solve --random <n> [--seed <s>] [options]
//!   cube-solver scramble [--length <n>] [--seed <s>]
//!
//! Options:
//!   --strategy <s>    bfs, best-first or parallel (default: best-first)
//!   --max-depth <n>   Longest solution to look for (default: 16)
//!   --timeout <secs>  Maximum search time for best-first strategies (default: 5)
//!   --divisor <n>     Heuristic normalizing divisor (default: 8)
//!   --early-stop      Stop parallel branches once any one succeeds
//!   --show            Print the scrambled and solved cube nets to stderr
//!   --verbose         Log search progress to stderr

use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use cube_solver::{
    random_scramble, solve, CubeState, MisplacedStickers, MoveSequence, SolverConfig, Strategy,
};

#[derive(Parser)]
#[command(name = "cube-solver")]
#[command(about = "Bounded breadth-first and best-first solver for the 3x3x3 cube")]
#[command(version)]
struct Cli {
    /// Log search progress to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scramble a solved cube and search for a solution
    Solve {
        /// Scramble to apply, as space-separated moves (e.g. "U R' F")
        #[arg(long, conflicts_with = "random")]
        scramble: Option<String>,

        /// Apply this many random moves instead of an explicit scramble
        #[arg(long)]
        random: Option<usize>,

        /// Seed for --random
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Search strategy
        #[arg(long, value_enum, default_value = "best-first")]
        strategy: StrategyArg,

        /// Longest solution to look for
        #[arg(long, default_value = "16")]
        max_depth: usize,

        /// Maximum search time in seconds
        #[arg(long, default_value = "5")]
        timeout: u64,

        /// Heuristic normalizing divisor
        #[arg(long, default_value = "8")]
        divisor: u32,

        /// Stop parallel branches once any one succeeds
        #[arg(long)]
        early_stop: bool,

        /// Print the scrambled and solved cube nets to stderr
        #[arg(long)]
        show: bool,
    },
    /// Print a random scramble
    Scramble {
        /// Number of moves
        #[arg(long, default_value = "8")]
        length: usize,

        /// RNG seed
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Bfs,
    BestFirst,
    Parallel,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Bfs => Strategy::BreadthFirst,
            StrategyArg::BestFirst => Strategy::BestFirst,
            StrategyArg::Parallel => Strategy::Parallel,
        }
    }
}

/// Output format for a solve run
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    scramble: MoveSequence,
    solved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<MoveSequence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    move_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    nodes_expanded: usize,
    time_elapsed_ms: u64,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    match cli.command {
        Commands::Solve {
            scramble,
            random,
            seed,
            strategy,
            max_depth,
            timeout,
            divisor,
            early_stop,
            show,
        } => {
            // Build the scramble
            let scramble = match (scramble, random) {
                (Some(text), _) => match text.parse::<MoveSequence>() {
                    Ok(moves) => moves,
                    Err(e) => {
                        eprintln!("Error parsing scramble: {}", e);
                        process::exit(2);
                    }
                },
                (None, Some(length)) => random_scramble(&mut StdRng::seed_from_u64(seed), length),
                (None, None) => {
                    eprintln!("Error: Must provide either --scramble or --random");
                    process::exit(2);
                }
            };

            let cube = CubeState::solved().apply_all(&scramble);
            if show {
                eprintln!("Scramble applied: {}\n{}", scramble, cube);
            }

            let config = SolverConfig {
                max_depth,
                timeout: Duration::from_secs(timeout),
                heuristic: MisplacedStickers::with_divisor(divisor),
                early_stop,
            };

            let output = match solve(&cube, strategy.into(), &config) {
                Ok(solution) => {
                    if show {
                        eprintln!(
                            "After solution ({}):\n{}",
                            solution.moves,
                            cube.apply_all(&solution.moves)
                        );
                    }
                    SolveOutput {
                        scramble,
                        solved: true,
                        move_count: Some(solution.moves.len()),
                        solution: Some(solution.moves),
                        reason: None,
                        nodes_expanded: solution.nodes_expanded,
                        time_elapsed_ms: solution.time_elapsed_ms,
                    }
                }
                Err(e) => {
                    let (nodes_expanded, time_elapsed_ms) = match e {
                        cube_solver::Error::SearchExhausted {
                            elapsed_ms,
                            nodes_expanded,
                        }
                        | cube_solver::Error::SearchTimedOut {
                            elapsed_ms,
                            nodes_expanded,
                        } => (nodes_expanded, elapsed_ms),
                        _ => (0, 0),
                    };
                    SolveOutput {
                        scramble,
                        solved: false,
                        solution: None,
                        move_count: None,
                        reason: Some(e.reason().to_string()),
                        nodes_expanded,
                        time_elapsed_ms,
                    }
                }
            };

            match serde_json::to_string_pretty(&output) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error formatting output: {}", e);
                    process::exit(2);
                }
            }

            // Exit with appropriate code
            if output.solved {
                process::exit(0);
            } else {
                process::exit(1);
            }
        }
        Commands::Scramble { length, seed } => {
            let scramble = random_scramble(&mut StdRng::seed_from_u64(seed), length);
            println!("{}", scramble);
        }
    }
}
