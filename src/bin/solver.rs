use clap::{Parser, ValueEnum};
use log::info;
use slider_solver::engine::Board;
use slider_solver::heuristics::Priority;
use slider_solver::solver::{Solver, SolverConfig};
use slider_solver::utils::board_from_str;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PriorityArg {
    Manhattan,
    Hamming,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Manhattan => Priority::Manhattan,
            PriorityArg::Hamming => Priority::Hamming,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the board file (dimension followed by n*n tiles, 0 for the blank)
    board_file: PathBuf,

    /// Priority function ordering the search
    #[clap(short, long, value_enum, default_value_t = PriorityArg::Manhattan)]
    priority: PriorityArg,

    /// Give up after this many node expansions
    #[clap(long)]
    max_expansions: Option<u64>,

    /// Give up after this many milliseconds
    #[clap(long)]
    time_limit_ms: Option<u64>,

    /// Also print the blank's moves
    #[clap(short, long)]
    moves: bool,

    /// Print search statistics
    #[clap(short, long)]
    stats: bool,
}

fn read_board_file(path: &PathBuf) -> Result<Board, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    board_from_str(&content).map_err(|e| format!("Invalid board format: {}", e))
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let initial = match read_board_file(&args.board_file) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("{}: {}", args.board_file.display(), e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "loaded {}x{} board from {}",
        initial.dimension(),
        initial.dimension(),
        args.board_file.display()
    );

    let mut config = SolverConfig::new().with_priority(args.priority.into());
    if let Some(limit) = args.max_expansions {
        config = config.with_max_expansions(limit);
    }
    if let Some(ms) = args.time_limit_ms {
        config = config.with_time_limit(Duration::from_millis(ms));
    }

    let solver = match Solver::with_config(initial, config) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "search finished in {:.3}s",
        solver.stats().elapsed.as_secs_f64()
    );

    match solver.solution() {
        None => println!("No solution possible"),
        Some(path) => {
            println!("Minimum number of moves = {}", solver.moves());
            for board in path {
                println!("{}", board);
            }
            if args.moves {
                let directions: Vec<String> = path
                    .windows(2)
                    .filter_map(|pair| pair[0].move_between(&pair[1]))
                    .map(|dir| dir.to_string())
                    .collect();
                println!("Moves: {}", directions.join(" "));
            }
        }
    }

    if args.stats {
        print!("{}", solver.stats());
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_accept_every_flag() {
        let args = Args::try_parse_from([
            "solver",
            "puzzle04.txt",
            "--priority",
            "hamming",
            "--max-expansions",
            "500",
            "--time-limit-ms",
            "250",
            "--moves",
            "--stats",
        ])
        .unwrap();
        assert_eq!(args.board_file, PathBuf::from("puzzle04.txt"));
        assert_eq!(args.priority, PriorityArg::Hamming);
        assert_eq!(args.max_expansions, Some(500));
        assert_eq!(args.time_limit_ms, Some(250));
        assert!(args.moves);
        assert!(args.stats);

        let defaults = Args::try_parse_from(["solver", "puzzle04.txt"]).unwrap();
        assert_eq!(defaults.priority, PriorityArg::Manhattan);
        assert!(!defaults.stats);
    }
}
