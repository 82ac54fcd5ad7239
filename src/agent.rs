//! The agent capability and the factory that builds every strategy.
//!
//! ## Strategies
//!
//! | code | name        | behavior                                          |
//! |------|-------------|---------------------------------------------------|
//! | 1    | `random`    | uniformly random legal move                       |
//! | 2    | `corner`    | a legal corner if any, else random                |
//! | 3    | `piece-max` | most own discs after one ply                      |
//! | 4    | `choice-max`| most own replies after one ply                    |
//! | 5    | `minimax4`  | depth-4 minimax on disc count                     |
//! | 6    | `minimax6`  | depth-6 minimax on disc count                     |
//! | 7    | `deepening` | iterative-deepening alpha-beta, phased evaluation |
//! | 8    | `alphabeta` | depth-8 alpha-beta, corner-weighted evaluation    |

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::board::{Board, Color, Location};
use crate::constants::{ALPHA_BETA_DEPTH, MAX_ITERATIVE_DEPTH, TIME_LIMIT};
use crate::eval::Evaluator;
use crate::ordering::MoveOrder;
use crate::random::SeedPolicy;
use crate::search::{DepthMode, SearchAgent, SearchProfile};
use crate::strategies::{Criterion, OnePlyAgent};

/// A Reversi player.
///
/// Agents are shared with computation units through `Arc`, so `compute`
/// takes `&self`; any scratch state lives inside the call.
pub trait Agent: Send + Sync {
    fn name(&self) -> &str;

    fn color(&self) -> Color;

    fn time_limited(&self) -> bool;

    /// Search budget per move; only binding when `time_limited` is true.
    fn time_limit(&self) -> Duration;

    /// Called before game `game` (0-based) of a series starts.
    fn new_game(&self, _game: u64) {}

    /// Choose a move for the side to move on `board`.
    ///
    /// Must not rely on mutating `board`; work happens on private copies.
    /// Returns `None` when there is nothing to play.
    fn compute(&self, board: &Board) -> Option<Location>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("unknown agent kind '{0}'")]
    UnknownKind(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Random,
    CornerTaking,
    PieceMaximizing,
    ChoiceMaximizing,
    PieceMinimax4,
    PieceMinimax6,
    Deepening,
    AlphaBeta,
}

impl AgentKind {
    pub const ALL: [AgentKind; 8] = [
        AgentKind::Random,
        AgentKind::CornerTaking,
        AgentKind::PieceMaximizing,
        AgentKind::ChoiceMaximizing,
        AgentKind::PieceMinimax4,
        AgentKind::PieceMinimax6,
        AgentKind::Deepening,
        AgentKind::AlphaBeta,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AgentKind::Random => "random",
            AgentKind::CornerTaking => "corner",
            AgentKind::PieceMaximizing => "piece-max",
            AgentKind::ChoiceMaximizing => "choice-max",
            AgentKind::PieceMinimax4 => "minimax4",
            AgentKind::PieceMinimax6 => "minimax6",
            AgentKind::Deepening => "deepening",
            AgentKind::AlphaBeta => "alphabeta",
        }
    }

    /// Numeric code, starting at 1.
    pub fn code(self) -> usize {
        Self::ALL.iter().position(|&k| k == self).unwrap_or(0) + 1
    }

    /// How this kind chooses its moves.
    pub fn strategy(self) -> Strategy {
        let minimax = |depth| SearchProfile {
            evaluator: Evaluator::Pieces,
            order: MoveOrder::Shuffled,
            pruning: false,
            depth: DepthMode::Fixed(depth),
        };
        match self {
            AgentKind::Random => Strategy::OnePly(Criterion::Random),
            AgentKind::CornerTaking => Strategy::OnePly(Criterion::Corner),
            AgentKind::PieceMaximizing => Strategy::OnePly(Criterion::MostDiscs),
            AgentKind::ChoiceMaximizing => Strategy::OnePly(Criterion::MostReplies),
            AgentKind::PieceMinimax4 => Strategy::Search(minimax(4)),
            AgentKind::PieceMinimax6 => Strategy::Search(minimax(6)),
            AgentKind::Deepening => Strategy::Search(SearchProfile {
                evaluator: Evaluator::Phased,
                order: MoveOrder::Scored,
                pruning: true,
                depth: DepthMode::Iterative {
                    max: MAX_ITERATIVE_DEPTH,
                },
            }),
            AgentKind::AlphaBeta => Strategy::Search(SearchProfile {
                evaluator: Evaluator::Positional,
                order: MoveOrder::Shuffled,
                pruning: true,
                depth: DepthMode::Fixed(ALPHA_BETA_DEPTH),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    OnePly(Criterion),
    Search(SearchProfile),
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the kind's name (case-insensitive) or its numeric code.
impl FromStr for AgentKind {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        if let Ok(code) = key.parse::<usize>() {
            return code
                .checked_sub(1)
                .and_then(|i| Self::ALL.get(i).copied())
                .ok_or_else(|| AgentError::UnknownKind(s.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|k| k.name() == key)
            .ok_or_else(|| AgentError::UnknownKind(s.to_string()))
    }
}

/// Per-agent settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentConfig {
    pub color: Color,
    pub time_limited: bool,
    pub time_limit: Duration,
    pub seed: SeedPolicy,
    /// Optional deterministic node budget for search agents.
    pub node_limit: Option<u64>,
}

impl AgentConfig {
    pub fn new(color: Color, time_limited: bool) -> Self {
        Self {
            color,
            time_limited,
            time_limit: TIME_LIMIT,
            seed: SeedPolicy::default(),
            node_limit: None,
        }
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn with_seed(mut self, seed: SeedPolicy) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.node_limit = Some(nodes);
        self
    }
}

/// Build an agent of the given kind.
pub fn create_agent(kind: AgentKind, config: AgentConfig) -> Arc<dyn Agent> {
    match kind.strategy() {
        Strategy::OnePly(criterion) => Arc::new(OnePlyAgent::new(criterion, config)),
        Strategy::Search(profile) => Arc::new(SearchAgent::new(kind.name(), config, profile)),
    }
}

/// Build an agent from a kind name or code.
///
/// # Errors
/// [`AgentError::UnknownKind`] if `kind` names no strategy.
pub fn create_agent_named(kind: &str, config: AgentConfig) -> Result<Arc<dyn Agent>, AgentError> {
    Ok(create_agent(kind.parse()?, config))
}
