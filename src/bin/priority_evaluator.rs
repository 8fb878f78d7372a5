use clap::Parser;
use log::{info, warn};
use slider_solver::engine::Board;
use slider_solver::heuristics::{is_solvable_by_parity, Priority};
use slider_solver::solver::{Solver, SolverConfig};
use std::collections::HashMap;

const PRIORITIES: [Priority; 2] = [Priority::Manhattan, Priority::Hamming];

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare search priority functions on seeded scrambles", long_about = None)]
struct Args {
    /// Board dimension
    #[clap(short = 'n', long, default_value_t = 3)]
    dimension: usize,

    /// Number of scrambled boards to solve
    #[clap(short, long, default_value_t = 20)]
    boards: u64,

    /// Length of the random walk used to scramble each board
    #[clap(short, long, default_value_t = 20)]
    walk: usize,

    /// Seed of the first board; board i uses seed + i
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Per-board expansion budget for each priority
    #[clap(long, default_value_t = 2_000_000)]
    max_expansions: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut expansions: HashMap<Priority, Vec<u64>> = HashMap::new();
    let mut disagreements = 0;
    let mut aborted = 0;

    println!(
        "Evaluating {} {}x{} boards scrambled by {}-step walks...",
        args.boards, args.dimension, args.dimension, args.walk
    );

    for board_idx in 0..args.boards {
        let seed = args.seed + board_idx;
        let initial = match Board::new_random_with_seed(args.dimension, seed, args.walk) {
            Ok(board) => board,
            Err(e) => {
                eprintln!("Cannot build board: {}", e);
                return;
            }
        };

        println!("\nBoard {} (Seed: {})", board_idx, seed);

        let mut move_counts = Vec::new();
        for priority in PRIORITIES {
            let config = SolverConfig::new()
                .with_priority(priority)
                .with_max_expansions(args.max_expansions);
            match Solver::with_config(initial.clone(), config) {
                Ok(solver) => {
                    let stats = solver.stats();
                    println!(
                        "  Priority: {:<10}, Moves: {:<4}, Expanded: {:<9}, Secs: {:.3}",
                        priority,
                        solver.moves(),
                        stats.total_expanded(),
                        stats.elapsed.as_secs_f64()
                    );
                    expansions
                        .entry(priority)
                        .or_default()
                        .push(stats.total_expanded());
                    move_counts.push(solver.moves());
                }
                Err(e) => {
                    println!("  Priority: {:<10}, {}", priority, e);
                    aborted += 1;
                }
            }
        }

        if move_counts.windows(2).any(|pair| pair[0] != pair[1]) {
            warn!("priorities disagree on board {}: {:?}", seed, move_counts);
            disagreements += 1;
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Boards evaluated: {}", args.boards);
    println!("Searches aborted by the expansion budget: {}", aborted);
    println!("Boards where move counts disagree: {}", disagreements);
    println!("\n--- Average Expansions ---");

    let mut averages: Vec<(Priority, f64)> = expansions
        .iter()
        .filter(|(_, counts)| !counts.is_empty())
        .map(|(priority, counts)| {
            let total: u64 = counts.iter().sum();
            (*priority, total as f64 / counts.len() as f64)
        })
        .collect();
    averages.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    for (priority, avg) in averages {
        println!("Priority {:<10}: Average Expanded = {:.1}", priority, avg);
    }

    parity_cross_check(&args);
}

/// Solves random permutations (about half unsolvable) and checks the twin-search
/// verdict against the inversion-parity formula.
fn parity_cross_check(args: &Args) {
    if args.dimension > 3 {
        info!("skipping parity cross-check for {}x{} boards", args.dimension, args.dimension);
        return;
    }

    let mut agreed = 0;
    let mut checked = 0;
    for offset in 0..args.boards {
        let board = match Board::random_permutation_with_seed(args.dimension, args.seed + offset) {
            Ok(board) => board,
            Err(e) => {
                eprintln!("Cannot build board: {}", e);
                return;
            }
        };
        let config = SolverConfig::new().with_max_expansions(args.max_expansions);
        let Ok(solver) = Solver::with_config(board.clone(), config) else {
            continue;
        };
        checked += 1;
        if solver.is_solvable() == is_solvable_by_parity(&board) {
            agreed += 1;
        } else {
            warn!("verdict mismatch on permutation seed {}", args.seed + offset);
        }
    }

    println!("\n--- Parity Cross-Check ---");
    println!("Permutations checked: {}, agreeing with parity: {}", checked, agreed);
}
