use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    process::ExitCode,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};
use rand::{rngs::SmallRng, SeedableRng};

use puzzle_search::{
    board::{self, Board, SlidingPuzzle},
    generator,
    register::{self, Register},
    search::{solve, Outcome, SearchConfig, SearchReport},
    verify, Strategy,
};

#[derive(Parser)]
#[command(name = "puzzle-search")]
#[command(about = "Solve sliding-tile and register puzzles with uninformed or heuristic search")]
#[command(version)]
struct Cli {
    /// Give up after this many seconds
    #[arg(long, global = true, default_value = "60")]
    timeout: u64,

    /// Abort once the search tree holds this many nodes
    #[arg(long, global = true)]
    max_nodes: Option<usize>,

    /// Log every expansion step
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an N×N sliding-tile board read from a file
    Tiles {
        /// depth, breadth, best or astar
        strategy: Strategy,
        input: PathBuf,
        output: PathBuf,
    },
    /// Turn INITIAL into TARGET with increase, decrease, double, half, square and root
    Register {
        strategy: Strategy,
        #[arg(allow_negative_numbers = true)]
        initial: String,
        #[arg(allow_negative_numbers = true)]
        target: String,
        output: PathBuf,
    },
    /// Write random solvable boards to <PREFIX><ID>.txt for every ID in FIRST..=LAST
    Generate {
        prefix: String,
        first: u32,
        last: u32,
        /// Board edge
        #[arg(long, default_value = "3")]
        size: usize,
        /// Seed for reproducible boards
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Check a sliding-tile solution file against its board
    Verify { puzzle: PathBuf, solution: PathBuf },
    /// Check a register solution file
    VerifyRegister {
        #[arg(allow_negative_numbers = true)]
        initial: String,
        #[arg(allow_negative_numbers = true)]
        target: String,
        solution: PathBuf,
    },
}

fn init_logger(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn write_file(path: &Path, write: impl FnOnce(&mut BufWriter<File>) -> std::io::Result<()>) -> Result<()> {
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write(&mut out)
        .and_then(|()| out.flush())
        .with_context(|| format!("cannot write {}", path.display()))
}

/// Print the outcome and, on success, hand the solution to `save`.
fn announce<S, O>(
    result: SearchReport<S, O>,
    save: impl FnOnce(&puzzle_search::Solution<S, O>) -> Result<()>,
) -> Result<()> {
    debug!("{:?}", result.stats);
    match &result.outcome {
        Outcome::Solved(solution) => {
            println!("Solution found! ({} steps)", solution.len());
            println!("Time spent: {:.3} secs", result.stats.elapsed.as_secs_f64());
            save(solution)
        }
        Outcome::Exhausted => {
            println!("No solution found.");
            Ok(())
        }
        Outcome::TimedOut => {
            println!("Timeout");
            Ok(())
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let timeout = Duration::from_secs(cli.timeout);
    let max_nodes = cli.max_nodes;
    let search_config = |strategy: Strategy| {
        let config = SearchConfig::new(strategy).with_timeout(timeout);
        match max_nodes {
            Some(max) => config.with_node_limit(max),
            None => config,
        }
    };

    match cli.command {
        Commands::Tiles { strategy, input, output } => {
            let text = fs::read_to_string(&input).with_context(|| format!("cannot read {}", input.display()))?;
            let board: Board = text
                .parse()
                .with_context(|| format!("{} does not hold a valid board", input.display()))?;
            info!("solving {}x{} board with {}", board.size(), board.size(), strategy);

            let config = search_config(strategy);
            let result = solve(&SlidingPuzzle::for_board(&board), board, &config)?;
            announce(result, |solution| {
                write_file(&output, |out| board::write_solution(out, solution))
            })?;
        }
        Commands::Register {
            strategy,
            initial,
            target,
            output,
        } => {
            let initial = register::parse_value(&initial).context("invalid initial value")?;
            let target = register::parse_value(&target).context("invalid target value")?;
            let problem = Register::new(target)?;
            info!("solving {} -> {} with {}", initial, target, strategy);

            let config = search_config(strategy);
            let result = solve(&problem, initial, &config)?;
            announce(result, |solution| {
                write_file(&output, |out| register::write_solution(out, solution))
            })?;
        }
        Commands::Generate {
            prefix,
            first,
            last,
            size,
            seed,
        } => {
            let mut rng = match seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_entropy(),
            };
            let written = generator::write_instances(&prefix, first, last, size, &mut rng)?;
            println!("{} boards written", written.len());
        }
        Commands::Verify { puzzle, solution } => {
            let board: Board = fs::read_to_string(&puzzle)
                .with_context(|| format!("cannot read {}", puzzle.display()))?
                .parse()
                .with_context(|| format!("{} does not hold a valid board", puzzle.display()))?;
            let text = fs::read_to_string(&solution).with_context(|| format!("cannot read {}", solution.display()))?;
            return Ok(verdict(verify::verify_tiles(&board, &text)));
        }
        Commands::VerifyRegister {
            initial,
            target,
            solution,
        } => {
            let initial = register::parse_value(&initial).context("invalid initial value")?;
            let target = register::parse_value(&target).context("invalid target value")?;
            let text = fs::read_to_string(&solution).with_context(|| format!("cannot read {}", solution.display()))?;
            return Ok(verdict(verify::verify_register(initial, target, &text).map(|_| ())));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn verdict(result: std::result::Result<(), verify::VerifyError>) -> ExitCode {
    match result {
        Ok(()) => {
            println!("OK!");
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.debug);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
