//! One-ply agents that need no search tree.
//!
//! Each collects the moves that tie for its criterion and picks one of them
//! uniformly at random.

use std::time::Duration;

use crate::agent::{Agent, AgentConfig};
use crate::board::{Board, Color, Location};
use crate::constants::CORNERS;
use crate::random::SharedRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    /// Any legal move.
    Random,
    /// A legal corner if there is one, else any legal move.
    Corner,
    /// Most own discs after the move.
    MostDiscs,
    /// Most own replies after the move, as if the opponent passed.
    MostReplies,
}

impl Criterion {
    fn label(self) -> &'static str {
        match self {
            Criterion::Random => "random",
            Criterion::Corner => "corner",
            Criterion::MostDiscs => "piece-max",
            Criterion::MostReplies => "choice-max",
        }
    }

    /// The moves this criterion considers equally good.
    pub fn candidates(self, board: &Board) -> Vec<Location> {
        let mover = board.current_color();
        match self {
            Criterion::Random => board.legal_moves(),
            Criterion::Corner => {
                let corners: Vec<Location> = CORNERS
                    .iter()
                    .map(|&(x, y)| Location::new(x, y))
                    .filter(|&loc| board.is_legal(loc))
                    .collect();
                if corners.is_empty() {
                    board.legal_moves()
                } else {
                    corners
                }
            }
            Criterion::MostDiscs => best_by(board, |probe| probe.count(mover)),
            Criterion::MostReplies => best_by(board, |probe| probe.legal_moves_for(mover).len()),
        }
    }
}

/// Pick uniformly from `moves`, or `None` if empty.
pub fn random_choice(moves: &[Location], rng: &mut fastrand::Rng) -> Option<Location> {
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.usize(..moves.len())])
}

/// All legal moves sharing the highest `score` of the position they lead to.
fn best_by<F>(board: &Board, score: F) -> Vec<Location>
where
    F: Fn(&Board) -> usize,
{
    let mut probe = board.snapshot();
    let mut best = Vec::new();
    let mut max = 0;
    for loc in board.legal_moves() {
        if probe.apply(loc).is_err() {
            continue;
        }
        let s = score(&probe);
        if probe.undo().is_err() {
            break;
        }
        if best.is_empty() || s > max {
            max = s;
            best.clear();
            best.push(loc);
        } else if s == max {
            best.push(loc);
        }
    }
    best
}

pub struct OnePlyAgent {
    criterion: Criterion,
    config: AgentConfig,
    rng: SharedRng,
}

impl OnePlyAgent {
    pub fn new(criterion: Criterion, config: AgentConfig) -> Self {
        Self {
            criterion,
            rng: SharedRng::new(config.seed),
            config,
        }
    }
}

impl Agent for OnePlyAgent {
    fn name(&self) -> &str {
        self.criterion.label()
    }

    fn color(&self) -> Color {
        self.config.color
    }

    fn time_limited(&self) -> bool {
        self.config.time_limited
    }

    fn time_limit(&self) -> Duration {
        self.config.time_limit
    }

    fn new_game(&self, game: u64) {
        self.rng.start_game(game);
    }

    fn compute(&self, board: &Board) -> Option<Location> {
        let candidates = self.criterion.candidates(board);
        random_choice(&candidates, &mut self.rng.fork())
    }
}
