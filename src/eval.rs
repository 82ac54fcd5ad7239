//! Static evaluation of Reversi positions.
//!
//! An [`Evaluator`] maps a board and a perspective color to an integer score,
//! higher being better for the perspective. Search leaves call
//! [`Evaluator::evaluate`]; nodes where neither side can move call
//! [`Evaluator::evaluate_end`], which scales with the remaining depth so a
//! decided game always outranks a heuristic guess.

use crate::board::{Board, Color};
use crate::constants::{
    CORNER_WEIGHTS, DIRECTIONS, N, PHASED_WEIGHTS, PHASES, PhaseWeights, TERMINAL_BONUS,
};

/// The heuristic families used by the search agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluator {
    /// Own disc count only.
    Pieces,
    /// Positional table plus mobility, with no phase blending.
    Positional,
    /// Phase-blended positional, mobility, frontier, and stone signals.
    Phased,
}

impl Evaluator {
    pub fn evaluate(self, board: &Board, color: Color) -> i32 {
        match self {
            Evaluator::Pieces => board.count(color) as i32,
            Evaluator::Positional => {
                positional_score(board, color, &CORNER_WEIGHTS) + mobility_score(board, color)
            }
            Evaluator::Phased => phased_score(board, color),
        }
    }

    /// Score a position where the game is over (or both sides are blocked).
    ///
    /// Wins get `+TERMINAL_BONUS` per remaining ply. Losses and draws get the
    /// negative, so a forced draw is avoided like a loss.
    pub fn evaluate_end(self, board: &Board, color: Color, remaining: u32) -> i32 {
        terminal_score(board, color, remaining)
    }
}

pub fn terminal_score(board: &Board, color: Color, remaining: u32) -> i32 {
    let own = board.count(color) as i32;
    let diff = own - board.count(color.opponent()) as i32;
    let bonus = TERMINAL_BONUS * remaining as i32;
    if diff > 0 {
        own + bonus
    } else {
        own - bonus
    }
}

/// Weights for the phase the board is in, bucketed by discs on the board.
pub fn phase_weights(board: &Board) -> PhaseWeights {
    let discs = board.disc_count();
    PHASES
        .iter()
        .find(|(limit, _)| discs <= *limit)
        .map(|(_, w)| *w)
        .unwrap_or(PHASES[PHASES.len() - 1].1)
}

pub fn phased_score(board: &Board, color: Color) -> i32 {
    let w = phase_weights(board);
    let mut score = 0;
    if w.position != 0 {
        score += w.position * positional_score(board, color, &PHASED_WEIGHTS);
    }
    if w.mobility != 0 {
        score += w.mobility * mobility_score(board, color);
    }
    if w.frontier != 0 {
        score += w.frontier * frontier_score(board, color);
    }
    score + w.stones * stone_difference(board, color)
}

/// Sum of table weights under own discs minus those under opponent discs.
pub fn positional_score(board: &Board, color: Color, table: &[[i32; N]; N]) -> i32 {
    table
        .iter()
        .enumerate()
        .flat_map(|(x, column)| column.iter().enumerate().map(move |(y, &w)| (x, y, w)))
        .map(|(x, y, w)| match board.get(x, y) {
            Some(c) if c == color => w,
            Some(_) => -w,
            None => 0,
        })
        .sum()
}

/// Own legal-move count minus the opponent's.
pub fn mobility_score(board: &Board, color: Color) -> i32 {
    board.legal_moves_for(color).len() as i32
        - board.legal_moves_for(color.opponent()).len() as i32
}

/// Opponent frontier discs minus own frontier discs.
///
/// A frontier disc touches at least one empty cell in its 8-neighborhood.
pub fn frontier_score(board: &Board, color: Color) -> i32 {
    let mut own = 0;
    let mut opp = 0;
    for y in 0..N {
        for x in 0..N {
            let Some(c) = board.get(x, y) else {
                continue;
            };
            if is_frontier(board, x, y) {
                if c == color {
                    own += 1;
                } else {
                    opp += 1;
                }
            }
        }
    }
    opp - own
}

fn is_frontier(board: &Board, x: usize, y: usize) -> bool {
    DIRECTIONS.iter().any(|&(dx, dy)| {
        let nx = x as isize + dx;
        let ny = y as isize + dy;
        (0..N as isize).contains(&nx)
            && (0..N as isize).contains(&ny)
            && board.get(nx as usize, ny as usize).is_none()
    })
}

pub fn stone_difference(board: &Board, color: Color) -> i32 {
    board.count(color) as i32 - board.count(color.opponent()) as i32
}
