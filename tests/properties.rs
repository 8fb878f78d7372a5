//! Property-based tests for boards and the solver.

use proptest::prelude::*;

use slider_solver::engine::Board;
use slider_solver::heuristics::is_solvable_by_parity;
use slider_solver::solver::Solver;

/// Strategy: a solvable board reached by a short random walk from the goal.
fn walked_board() -> impl Strategy<Value = Board> {
    (2usize..=4, any::<u64>(), 0usize..14)
        .prop_map(|(n, seed, walk)| Board::new_random_with_seed(n, seed, walk).unwrap())
}

/// Strategy: an arbitrary arrangement, solvable or not.
fn permuted_board() -> impl Strategy<Value = Board> {
    (2usize..=5, any::<u64>())
        .prop_map(|(n, seed)| Board::random_permutation_with_seed(n, seed).unwrap())
}

fn grid_distance(a: (usize, usize), b: (usize, usize)) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

proptest! {
    // 1. Hamming and Manhattan vanish exactly on the goal
    #[test]
    fn scores_zero_iff_goal(board in permuted_board()) {
        prop_assert_eq!(board.hamming() == 0, board.is_goal());
        prop_assert_eq!(board.manhattan() == 0, board.is_goal());
    }

    // 2. Neighbors: two to four, each one blank step away
    #[test]
    fn neighbors_are_adjacent(board in permuted_board()) {
        let neighbors = board.neighbors();
        prop_assert!((2..=4).contains(&neighbors.len()));
        for next in &neighbors {
            prop_assert_eq!(grid_distance(board.blank_position(), next.blank_position()), 1);
            prop_assert!(board.move_between(next).is_some());
        }
    }

    // 3. Twin keeps the blank and transposes exactly two tiles
    #[test]
    fn twin_is_a_transposition(board in permuted_board()) {
        let twin = board.twin();
        prop_assert_eq!(twin.blank_position(), board.blank_position());
        let diffs: Vec<usize> = board
            .tiles()
            .iter()
            .zip(twin.tiles())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(idx, _)| idx)
            .collect();
        prop_assert_eq!(diffs.len(), 2);
        prop_assert_eq!(board.tiles()[diffs[0]], twin.tiles()[diffs[1]]);
        prop_assert_eq!(board.tiles()[diffs[1]], twin.tiles()[diffs[0]]);
        prop_assert_ne!(is_solvable_by_parity(&board), is_solvable_by_parity(&twin));
    }

    // 4. Manhattan never exceeds the walk that produced the board
    #[test]
    fn manhattan_bounded_by_walk(n in 2usize..=4, seed in any::<u64>(), walk in 0usize..30) {
        let board = Board::new_random_with_seed(n, seed, walk).unwrap();
        prop_assert!(board.manhattan() as usize <= walk);
        prop_assert!(is_solvable_by_parity(&board));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // 5. A solution replays from the initial board to the goal in moves() steps
    #[test]
    fn solution_replays_to_goal(board in walked_board()) {
        let solver = Solver::new(board.clone());
        prop_assert!(solver.is_solvable());
        let path = solver.solution().unwrap();
        prop_assert_eq!(&path[0], &board);
        prop_assert!(path.last().unwrap().is_goal());
        prop_assert_eq!(path.len() as i32 - 1, solver.moves());
        prop_assert!(solver.moves() as u32 >= board.manhattan());

        let mut current = board.clone();
        for next in &path[1..] {
            let dir = current.move_between(next);
            prop_assert!(dir.is_some());
            current = current.slide(dir.unwrap()).unwrap();
        }
        prop_assert!(current.is_goal());
    }

    // 6. Exactly one of a board and its twin is solvable
    #[test]
    fn board_or_twin_solvable(board in walked_board()) {
        let solver = Solver::new(board.clone());
        let twin_solver = Solver::new(board.twin());
        prop_assert_ne!(solver.is_solvable(), twin_solver.is_solvable());
        prop_assert_eq!(twin_solver.moves(), -1);
        prop_assert!(twin_solver.solution().is_none());
    }

    // 7. On 2x2 boards the search verdict matches the parity formula
    #[test]
    fn verdict_matches_parity_2x2(seed in any::<u64>()) {
        let board = Board::random_permutation_with_seed(2, seed).unwrap();
        let solver = Solver::new(board.clone());
        prop_assert_eq!(solver.is_solvable(), is_solvable_by_parity(&board));
    }
}
