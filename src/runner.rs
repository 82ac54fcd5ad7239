//! Runs one agent turn as a separate unit of work with a bounded wait.
//!
//! The unit gets its own board snapshot and reports back over a channel. If
//! the wait times out the caller moves on and the unit is left to finish in
//! the background; its late answer lands in a channel nobody reads, so it can
//! never reach the authoritative board.

use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crate::agent::Agent;
use crate::board::{Board, Location};

/// Why a turn was forfeited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForfeitReason {
    /// No answer within the join timeout.
    Timeout,
    /// The agent answered with no move.
    NoMove,
    /// The agent answered with a move the board rejects.
    IllegalMove(Location),
    /// The unit died without answering.
    AgentFailed,
}

impl fmt::Display for ForfeitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForfeitReason::Timeout => write!(f, "time limit exceeded"),
            ForfeitReason::NoMove => write!(f, "no move returned"),
            ForfeitReason::IllegalMove(loc) => write!(f, "illegal move {loc}"),
            ForfeitReason::AgentFailed => write!(f, "agent failed"),
        }
    }
}

/// Outcome of one bounded turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Move(Location),
    Forfeit(ForfeitReason),
}

/// How long to wait for an agent whose search budget is `time_limit`.
pub fn join_timeout(time_limit: Duration) -> Duration {
    time_limit.mul_f64(crate::constants::JOIN_FACTOR)
}

/// Ask `agent` for a move on a private copy of `board`.
///
/// Waits at most `timeout`. With `None` the wait is unbounded: callers pass
/// `None` for agents configured without a time limit, which are allowed to
/// think as long as their search takes. The returned move has been checked
/// against `board` itself.
pub fn run_turn(
    agent: &Arc<dyn Agent>,
    board: &Board,
    timeout: Option<Duration>,
) -> (Turn, Duration) {
    let start = Instant::now();
    let (tx, rx) = mpsc::channel();
    let unit_agent = Arc::clone(agent);
    let snapshot = board.snapshot();
    thread::spawn(move || {
        let mv = unit_agent.compute(&snapshot);
        let _ = tx.send(mv);
    });

    let answer = match timeout {
        Some(t) => rx.recv_timeout(t),
        None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
    };
    let turn = match answer {
        Ok(Some(loc)) if board.is_legal(loc) => Turn::Move(loc),
        Ok(Some(loc)) => Turn::Forfeit(ForfeitReason::IllegalMove(loc)),
        Ok(None) => Turn::Forfeit(ForfeitReason::NoMove),
        Err(RecvTimeoutError::Timeout) => Turn::Forfeit(ForfeitReason::Timeout),
        Err(RecvTimeoutError::Disconnected) => Turn::Forfeit(ForfeitReason::AgentFailed),
    };
    (turn, start.elapsed())
}
