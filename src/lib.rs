//! Reversi-Rust: an 8x8 Reversi engine with search agents and a tournament
//! harness.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, budgets and evaluation tables
//! - [`board`] - Game state with legal-move generation, apply and undo
//! - [`eval`] - Static evaluators and terminal scoring
//! - [`ordering`] - Move ordering for alpha-beta search
//! - [`search`] - Alpha-beta with iterative deepening and budget cutoff
//! - [`strategies`] - One-ply agents (random, corner, piece and choice maximizing)
//! - [`agent`] - The `Agent` trait and the strategy factory
//! - [`random`] - Seeding policies for randomized agents
//! - [`runner`] - One agent turn on its own thread with a bounded wait
//! - [`tournament`] - Series of games and aggregate results
//!
//! ## Example
//!
//! ```
//! use reversi_rust::agent::{AgentConfig, AgentKind, create_agent};
//! use reversi_rust::board::{Board, Color};
//!
//! let board = Board::new();
//! let agent = create_agent(AgentKind::CornerTaking, AgentConfig::new(Color::Black, false));
//! let mv = agent.compute(&board).expect("the opening has legal moves");
//! assert!(board.is_legal(mv));
//! println!("{} plays {mv}", agent.name());
//! ```

pub mod agent;
pub mod board;
pub mod constants;
pub mod eval;
pub mod ordering;
pub mod random;
pub mod runner;
pub mod search;
pub mod strategies;
pub mod tournament;
