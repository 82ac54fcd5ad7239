//! Constants for board geometry, search budgets, and evaluation tables.
//!
//! All weight tables are plain constant data owned by the strategy that uses
//! them; nothing here is mutable at runtime.

use std::time::Duration;

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). Reversi is always played on 8x8.
pub const N: usize = 8;

/// Number of cells on the board.
pub const CELLS: usize = N * N;

/// Offsets to the eight neighboring cells as (dx, dy).
/// Order: West, SW, South, SE, East, NE, North, NW
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// The four corners, in row-major order.
pub const CORNERS: [(usize, usize); 4] = [(0, 0), (7, 0), (0, 7), (7, 7)];

// =============================================================================
// Time Budget
// =============================================================================

/// Per-move thinking time granted to a time-limited agent.
pub const TIME_LIMIT: Duration = Duration::from_secs(5);

/// Fraction of the time budget after which a search abandons its current ply.
pub const TIME_FRACTION: f64 = 0.95;

/// The runner waits this multiple of the agent's budget before declaring a timeout.
pub const JOIN_FACTOR: f64 = 1.1;

/// Budget checks only happen at nodes with at least this much depth remaining.
pub const CHECK_MIN_DEPTH: u32 = 4;

// =============================================================================
// Search Parameters
// =============================================================================

/// Deepest iteration the iterative-deepening agent will attempt.
pub const MAX_ITERATIVE_DEPTH: u32 = 15;

/// Fixed depth of the weighted alpha-beta agent.
pub const ALPHA_BETA_DEPTH: u32 = 8;

/// Score boost per remaining ply for a decided game at a terminal node.
pub const TERMINAL_BONUS: i32 = 1000;

// =============================================================================
// Evaluation Tables
// =============================================================================

/// Positional weights used by the phased evaluator. Corners are prized,
/// the X- and C-squares next to them are penalized.
pub const PHASED_WEIGHTS: [[i32; N]; N] = [
    [30, -20, 0, -1, -1, 0, -20, 30],
    [-20, -30, -3, -3, -3, -3, -30, -20],
    [0, -3, 0, -1, -1, 0, -3, 0],
    [-1, -3, -1, -1, -1, -1, -3, -1],
    [-1, -3, -1, -1, -1, -1, -3, -1],
    [0, -3, 0, -1, -1, 0, -3, 0],
    [-20, -30, -3, -3, -3, -3, -30, -20],
    [30, -20, 0, -1, -1, 0, -20, 30],
];

/// Corner-heavy weights used by the fixed-depth alpha-beta agent.
pub const CORNER_WEIGHTS: [[i32; N]; N] = [
    [100, -20, 10, 5, 5, 10, -20, 100],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [10, -2, -1, -1, -1, -1, -2, 10],
    [5, -2, -1, -1, -1, -1, -2, 5],
    [5, -2, -1, -1, -1, -1, -2, 5],
    [10, -2, -1, -1, -1, -1, -2, 10],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [100, -20, 10, 5, 5, 10, -20, 100],
];

/// Signal weights for one game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseWeights {
    pub position: i32,
    pub mobility: i32,
    pub frontier: i32,
    pub stones: i32,
}

/// Phase buckets as (max discs on board, weights), checked in order.
/// The last bucket covers everything above the previous bound.
pub const PHASES: [(usize, PhaseWeights); 4] = [
    (
        20,
        PhaseWeights {
            position: 1,
            mobility: 15,
            frontier: 12,
            stones: 0,
        },
    ),
    (
        48,
        PhaseWeights {
            position: 2,
            mobility: 12,
            frontier: 22,
            stones: 2,
        },
    ),
    (
        56,
        PhaseWeights {
            position: 1,
            mobility: 3,
            frontier: 0,
            stones: 20,
        },
    ),
    (
        CELLS,
        PhaseWeights {
            position: 0,
            mobility: 0,
            frontier: 0,
            stones: 50,
        },
    ),
];
