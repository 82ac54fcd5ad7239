//! Minimax search with alpha-beta pruning and iterative deepening.
//!
//! A [`Searcher`] owns one private board for the whole computation. Every
//! recursion applies a move, recurses, and undoes the move before looking at
//! the result, so the board is back in its root state whenever control
//! returns to the caller, including after a pruning cutoff or a budget break.
//!
//! Nodes where the searching color is to move maximize; the others minimize.
//! A pass flips that role like any other ply.

use std::time::{Duration, Instant};

use log::{debug, error, warn};

use crate::agent::{Agent, AgentConfig};
use crate::board::{Board, BoardError, Color, Location};
use crate::constants::{CHECK_MIN_DEPTH, TIME_FRACTION};
use crate::eval::Evaluator;
use crate::ordering::{MoveOrder, scored_moves, shuffled_moves};
use crate::random::SharedRng;

/// How deep a search goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthMode {
    /// One pass at exactly this depth.
    Fixed(u32),
    /// Depth 1, 2, ... up to `max` or the number of empty cells.
    Iterative { max: u32 },
}

/// Everything that distinguishes one search strategy from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchProfile {
    pub evaluator: Evaluator,
    pub order: MoveOrder,
    pub pruning: bool,
    pub depth: DepthMode,
}

/// Budgets checked at nodes with at least [`CHECK_MIN_DEPTH`] plies left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Wall-clock budget; the search stops at `TIME_FRACTION` of it.
    pub time: Option<Duration>,
    /// Node budget, for reproducible cutoffs.
    pub nodes: Option<u64>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn is_unlimited(&self) -> bool {
        self.time.is_none() && self.nodes.is_none()
    }
}

/// Result of one [`Searcher::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best: Option<Location>,
    /// Root score of the depth that produced `best`, if a search ran.
    pub score: Option<i32>,
    /// Deepest depth whose result was adopted.
    pub depth: u32,
    pub nodes: u64,
    /// True if a budget ran out during the search.
    pub timed_out: bool,
}

pub struct Searcher {
    color: Color,
    profile: SearchProfile,
    limits: SearchLimits,
    rng: fastrand::Rng,
    start: Instant,
    depth_limit: u32,
    root_best: Option<Location>,
    prev_best: Option<Location>,
    time_up: bool,
    nodes: u64,
}

impl Searcher {
    pub fn new(
        color: Color,
        profile: SearchProfile,
        limits: SearchLimits,
        rng: fastrand::Rng,
    ) -> Self {
        Self {
            color,
            profile,
            limits,
            rng,
            start: Instant::now(),
            depth_limit: 0,
            root_best: None,
            prev_best: None,
            time_up: false,
            nodes: 0,
        }
    }

    /// Search `board` for the searching color's move.
    ///
    /// The board must have the searching color to move. It is left exactly as
    /// it was passed in.
    pub fn run(&mut self, board: &mut Board) -> Result<SearchOutcome, BoardError> {
        self.start = Instant::now();
        self.time_up = false;
        self.prev_best = None;
        self.nodes = 0;

        let mut outcome = SearchOutcome::default();
        let moves = self.ordered_moves(board)?;
        match moves.as_slice() {
            [] => return Ok(outcome),
            [only] => {
                outcome.best = Some(*only);
                return Ok(outcome);
            }
            [first, ..] => outcome.best = Some(*first),
        }

        match self.profile.depth {
            DepthMode::Fixed(depth) => {
                let (score, found) = self.search_root(board, depth)?;
                if found.is_some() {
                    outcome.best = found;
                    outcome.score = Some(score);
                    outcome.depth = depth;
                }
            }
            DepthMode::Iterative { max } => {
                for depth in 1..=max {
                    if depth as usize > board.empty_count() {
                        break;
                    }
                    let (score, found) = self.search_root(board, depth)?;
                    if self.time_up {
                        debug!("depth {depth} abandoned after {} nodes", self.nodes);
                        break;
                    }
                    if let Some(m) = found {
                        self.prev_best = Some(m);
                        outcome.best = Some(m);
                        outcome.score = Some(score);
                        outcome.depth = depth;
                    }
                    debug!(
                        "depth {depth} done: best {} score {score} nodes {}",
                        found.map(|m| m.to_string()).unwrap_or_else(|| "-".into()),
                        self.nodes
                    );
                }
            }
        }
        outcome.nodes = self.nodes;
        outcome.timed_out = self.time_up;
        Ok(outcome)
    }

    /// One full search to `depth`, returning the root score and the root move
    /// that first achieved it.
    pub fn search_root(
        &mut self,
        board: &mut Board,
        depth: u32,
    ) -> Result<(i32, Option<Location>), BoardError> {
        self.depth_limit = depth;
        self.root_best = None;
        let score = self.alpha_beta(board, depth, i32::MIN, i32::MAX)?;
        Ok((score, self.root_best))
    }

    fn alpha_beta(
        &mut self,
        board: &mut Board,
        remaining: u32,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<i32, BoardError> {
        self.nodes += 1;
        if remaining == 0 {
            return Ok(self.profile.evaluator.evaluate(board, self.color));
        }

        let moves = self.ordered_moves(board)?;
        if moves.is_empty() {
            board.pass();
            let score = if board.has_legal_move() {
                self.alpha_beta(board, remaining - 1, alpha, beta)?
            } else {
                self.profile.evaluator.evaluate_end(board, self.color, remaining)
            };
            board.undo()?;
            return Ok(score);
        }

        let maximizing = board.current_color() == self.color;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for loc in moves {
            board.apply(loc)?;
            let score = self.alpha_beta(board, remaining - 1, alpha, beta)?;
            board.undo()?;

            if maximizing {
                if score > best {
                    best = score;
                    if remaining == self.depth_limit {
                        self.root_best = Some(loc);
                    }
                }
                if self.profile.pruning {
                    if best >= beta {
                        return Ok(best);
                    }
                    alpha = alpha.max(best);
                }
            } else {
                best = best.min(score);
                if self.profile.pruning {
                    if best <= alpha {
                        return Ok(best);
                    }
                    beta = beta.min(best);
                }
            }

            if self.budget_exhausted(remaining) {
                break;
            }
        }
        Ok(best)
    }

    fn ordered_moves(&mut self, board: &mut Board) -> Result<Vec<Location>, BoardError> {
        Ok(match self.profile.order {
            MoveOrder::Scan => board.legal_moves(),
            MoveOrder::Shuffled => shuffled_moves(board, &mut self.rng),
            MoveOrder::Scored => scored_moves(board, self.profile.evaluator, self.prev_best)?,
        })
    }

    /// Raise the time-up flag once a budget is spent. Only nodes with enough
    /// depth left consult the clock; once raised, every loop breaks.
    fn budget_exhausted(&mut self, remaining: u32) -> bool {
        if self.time_up {
            return true;
        }
        if remaining < CHECK_MIN_DEPTH || self.limits.is_unlimited() {
            return false;
        }
        let over_time = self
            .limits
            .time
            .is_some_and(|t| self.start.elapsed() > t.mul_f64(TIME_FRACTION));
        let over_nodes = self.limits.nodes.is_some_and(|n| self.nodes > n);
        if over_time || over_nodes {
            self.time_up = true;
        }
        self.time_up
    }
}

/// An agent that picks moves with a [`Searcher`].
pub struct SearchAgent {
    name: String,
    config: AgentConfig,
    profile: SearchProfile,
    rng: SharedRng,
}

impl SearchAgent {
    pub fn new(name: impl Into<String>, config: AgentConfig, profile: SearchProfile) -> Self {
        Self {
            name: name.into(),
            rng: SharedRng::new(config.seed),
            config,
            profile,
        }
    }

    fn limits(&self) -> SearchLimits {
        SearchLimits {
            time: self.config.time_limited.then_some(self.config.time_limit),
            nodes: self.config.node_limit,
        }
    }

    /// Run a full search on a private copy of `board` and report the details.
    pub fn analyze(&self, board: &Board) -> Result<SearchOutcome, BoardError> {
        let mut private = board.snapshot();
        let mut searcher =
            Searcher::new(self.config.color, self.profile, self.limits(), self.rng.fork());
        searcher.run(&mut private)
    }
}

impl Agent for SearchAgent {
    fn name(&self) -> &str {
        &self.name
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
        if board.current_color() != self.config.color {
            warn!("{} asked to move for {}", self.name, board.current_color());
            return None;
        }
        match self.analyze(board) {
            Ok(outcome) => {
                debug!(
                    "{} chose {:?} at depth {} ({} nodes{})",
                    self.name,
                    outcome.best,
                    outcome.depth,
                    outcome.nodes,
                    if outcome.timed_out { ", timed out" } else { "" }
                );
                outcome.best
            }
            Err(e) => {
                error!("{} aborted its search: {e}", self.name);
                None
            }
        }
    }
}
