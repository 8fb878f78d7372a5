//! A* search for a shortest solution, with unsolvability detected by a twin search.
//!
//! Two searches run in lockstep: one from the initial board and one from its
//! twin (the same board with two tiles swapped). Exactly one of the two can reach
//! the goal, so whichever reaches it first settles the verdict.
//!
//! Only the immediate backtrack (a successor equal to the grandparent) is pruned.
//! There is no visited set, so the same board can be enqueued many times along
//! different paths, and frontier memory grows quickly on boards that need many
//! moves. Expect 4×4 boards beyond roughly 40 moves to be expensive.
use crate::engine::Board;
use crate::error::SolveError;
use crate::heuristics::Priority;
use log::{debug, trace};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use std::time::{Duration, Instant};

/// Index of a node in a frontier's arena.
type NodeId = usize;

/// Check the clock once every 1024 expansions.
const CLOCK_CHECK_MASK: u64 = 0x3FF;

/// Log frontier sizes every this many expansions.
const PROGRESS_INTERVAL: u64 = 100_000;

/// Limits and ordering for one search. The default is unbounded with Manhattan priority.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Node ordering.
    pub priority: Priority,
    /// Expand at most this many nodes, counted over both searches.
    pub max_expansions: Option<u64>,
    /// Stop once this much wall-clock time has passed.
    pub time_limit: Option<Duration>,
}

impl SolverConfig {
    /// Same as `SolverConfig::default()`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the priority function.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the expansion limit.
    pub fn with_max_expansions(mut self, max_expansions: u64) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    /// Sets the wall-clock limit.
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }
}

/// Counters collected while solving.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes dequeued and expanded by the search from the initial board.
    pub expanded: u64,
    /// Nodes enqueued by the search from the initial board, root included.
    pub enqueued: u64,
    /// Nodes expanded by the twin search.
    pub twin_expanded: u64,
    /// Nodes enqueued by the twin search, root included.
    pub twin_enqueued: u64,
    /// Wall-clock time spent in the search.
    pub elapsed: Duration,
}

impl SearchStats {
    /// Expansions over both searches.
    pub fn total_expanded(&self) -> u64 {
        self.expanded + self.twin_expanded
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Expanded: {}", self.expanded)?;
        writeln!(f, "  Enqueued: {}", self.enqueued)?;
        writeln!(f, "  Twin Expanded: {}", self.twin_expanded)?;
        writeln!(f, "  Twin Enqueued: {}", self.twin_enqueued)?;
        writeln!(f, "  Elapsed (secs): {:.3}", self.elapsed.as_secs_f64())
    }
}

/// A board together with how it was reached.
#[derive(Clone, Debug)]
struct SearchNode {
    board: Board,
    moves: u32,
    parent: Option<NodeId>,
}

/// Result of advancing a frontier by one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StepOutcome {
    /// The dequeued node holds the goal board.
    Goal(NodeId),
    /// The dequeued node was expanded.
    Expanded,
    /// Nothing left to dequeue.
    Exhausted,
}

/// One best-first search: an arena of nodes and a min-queue of handles into it.
///
/// Queue entries are `(priority, insertion sequence, node)`, so equal priorities
/// come out in insertion order.
struct Frontier {
    nodes: Vec<SearchNode>,
    queue: BinaryHeap<Reverse<(u32, u64, NodeId)>>,
    sequence: u64,
    priority: Priority,
    expanded: u64,
}

impl Frontier {
    fn new(root: Board, priority: Priority) -> Self {
        let mut frontier = Frontier {
            nodes: Vec::new(),
            queue: BinaryHeap::new(),
            sequence: 0,
            priority,
            expanded: 0,
        };
        frontier.push(SearchNode {
            board: root,
            moves: 0,
            parent: None,
        });
        frontier
    }

    fn push(&mut self, node: SearchNode) {
        if let Some(parent) = node.parent {
            debug_assert_eq!(node.moves, self.nodes[parent].moves + 1);
        }
        let id = self.nodes.len();
        let key = self.priority.score(&node.board, node.moves);
        self.nodes.push(node);
        self.queue.push(Reverse((key, self.sequence, id)));
        self.sequence += 1;
    }

    fn step(&mut self) -> StepOutcome {
        let Some(Reverse((key, _, id))) = self.queue.pop() else {
            return StepOutcome::Exhausted;
        };

        let node = &self.nodes[id];
        if node.board.is_goal() {
            return StepOutcome::Goal(id);
        }
        trace!("expanding node {} (priority {}, moves {})", id, key, node.moves);

        let moves = node.moves + 1;
        let grandparent = node.parent.map(|p| self.nodes[p].board.clone());
        let successors = node.board.neighbors();
        self.expanded += 1;

        for board in successors {
            if grandparent.as_ref() == Some(&board) {
                continue;
            }
            self.push(SearchNode {
                board,
                moves,
                parent: Some(id),
            });
        }
        StepOutcome::Expanded
    }

    fn enqueued(&self) -> u64 {
        self.nodes.len() as u64
    }

    /// Boards from the root to `id`, inclusive.
    fn path_to(&self, id: NodeId) -> Vec<Board> {
        let mut path = Vec::with_capacity(self.nodes[id].moves as usize + 1);
        let mut current = Some(id);
        while let Some(idx) = current {
            let node = &self.nodes[idx];
            path.push(node.board.clone());
            current = node.parent;
        }
        path.reverse();
        path
    }
}

/// Fails once more than the configured number of nodes has been expanded. A
/// goal dequeued after exactly `limit` expansions is still accepted.
fn check_expansions(config: &SolverConfig, expansions: u64) -> Result<(), SolveError> {
    match config.max_expansions {
        Some(limit) if expansions > limit => {
            debug!("expansion limit {} exceeded", limit);
            Err(SolveError::ExpansionLimit { limit })
        }
        _ => Ok(()),
    }
}

/// Outcome of the lockstep loop.
enum Verdict {
    Solved(Vec<Board>),
    Unsolvable,
}

/// Solves a board on construction and answers queries about the result.
///
/// # Examples
/// ```
/// use slider_solver::engine::Board;
/// use slider_solver::solver::Solver;
///
/// let board = Board::new(&[[0, 1, 3], [4, 2, 5], [7, 8, 6]]).unwrap();
/// let solver = Solver::new(board);
/// assert!(solver.is_solvable());
/// assert_eq!(solver.moves(), 4);
/// assert_eq!(solver.solution().unwrap().len(), 5);
///
/// let unsolvable = Board::new(&[[1, 2, 3], [4, 5, 6], [8, 7, 0]]).unwrap();
/// let solver = Solver::new(unsolvable);
/// assert!(!solver.is_solvable());
/// assert_eq!(solver.moves(), -1);
/// assert!(solver.solution().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Solver {
    solution: Option<Vec<Board>>,
    stats: SearchStats,
}

impl Solver {
    /// Runs an unbounded search with Manhattan priority.
    pub fn new(initial: Board) -> Self {
        match Self::with_config(initial, SolverConfig::default()) {
            Ok(solver) => solver,
            Err(err) => unreachable!("unbounded search stopped early: {}", err),
        }
    }

    /// Runs a search under `config`.
    ///
    /// # Errors
    /// Returns [`SolveError::ExpansionLimit`] or [`SolveError::TimeLimit`] if a limit
    /// stops the search before either side reaches the goal. An unsolvable board is
    /// a successful result, not an error.
    pub fn with_config(initial: Board, config: SolverConfig) -> Result<Self, SolveError> {
        let start = Instant::now();
        debug!(
            "solving {}x{} board, {} priority, initial estimate {}",
            initial.dimension(),
            initial.dimension(),
            config.priority,
            config.priority.estimate(&initial)
        );

        if initial.is_goal() {
            let stats = SearchStats {
                enqueued: 1,
                elapsed: start.elapsed(),
                ..SearchStats::default()
            };
            return Ok(Solver {
                solution: Some(vec![initial]),
                stats,
            });
        }

        let twin = initial.twin();
        let mut original = Frontier::new(initial, config.priority);
        let mut shadow = Frontier::new(twin, config.priority);
        let mut shadow_done = false;

        let verdict = loop {
            let expansions = original.expanded + shadow.expanded;
            if let Some(limit) = config.time_limit {
                if expansions & CLOCK_CHECK_MASK == 0 && start.elapsed() >= limit {
                    debug!("time limit {:?} reached after {} expansions", limit, expansions);
                    return Err(SolveError::TimeLimit { limit });
                }
            }
            if expansions > 0 && expansions % PROGRESS_INTERVAL == 0 {
                debug!(
                    "{} expansions, frontier sizes {} / {}",
                    expansions,
                    original.queue.len(),
                    shadow.queue.len()
                );
            }

            match original.step() {
                StepOutcome::Goal(id) => break Verdict::Solved(original.path_to(id)),
                StepOutcome::Exhausted => break Verdict::Unsolvable,
                StepOutcome::Expanded => {}
            }
            check_expansions(&config, original.expanded + shadow.expanded)?;

            if !shadow_done {
                match shadow.step() {
                    StepOutcome::Goal(_) => break Verdict::Unsolvable,
                    StepOutcome::Exhausted => shadow_done = true,
                    StepOutcome::Expanded => {}
                }
                check_expansions(&config, original.expanded + shadow.expanded)?;
            }
        };

        let stats = SearchStats {
            expanded: original.expanded,
            enqueued: original.enqueued(),
            twin_expanded: shadow.expanded,
            twin_enqueued: shadow.enqueued(),
            elapsed: start.elapsed(),
        };

        let solution = match verdict {
            Verdict::Solved(path) => {
                debug!(
                    "solved in {} moves after {} expansions",
                    path.len() - 1,
                    stats.total_expanded()
                );
                Some(path)
            }
            Verdict::Unsolvable => {
                debug!(
                    "twin reached the goal after {} expansions, board is unsolvable",
                    stats.total_expanded()
                );
                None
            }
        };

        Ok(Solver { solution, stats })
    }

    /// Whether the initial board can reach the goal.
    pub fn is_solvable(&self) -> bool {
        self.solution.is_some()
    }

    /// Minimum number of moves to the goal, or `-1` if the board is unsolvable.
    pub fn moves(&self) -> i32 {
        self.solution
            .as_ref()
            .map_or(-1, |path| path.len() as i32 - 1)
    }

    /// Boards of a shortest solution from the initial board to the goal, both
    /// included, or `None` if the board is unsolvable.
    pub fn solution(&self) -> Option<&[Board]> {
        self.solution.as_deref()
    }

    /// Counters from the search that produced this result.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
