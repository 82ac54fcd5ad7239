//! Plays series of games between two fixed agents and tallies the results.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{info, warn};

use crate::agent::{Agent, AgentConfig, AgentKind, create_agent};
use crate::board::{Board, Color};
use crate::constants::TIME_LIMIT;
use crate::random::SeedPolicy;
use crate::runner::{ForfeitReason, Turn, join_timeout, run_turn};

/// Settings for a series of games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentConfig {
    pub black: AgentKind,
    pub white: AgentKind,
    pub games: u64,
    pub time_limited: bool,
    pub time_limit: Duration,
    pub seed: SeedPolicy,
}

impl TournamentConfig {
    pub fn new(black: AgentKind, white: AgentKind, games: u64) -> Self {
        Self {
            black,
            white,
            games,
            time_limited: true,
            time_limit: TIME_LIMIT,
            seed: SeedPolicy::default(),
        }
    }

    fn agent_config(&self, color: Color) -> AgentConfig {
        // Derive distinct streams for the two sides from one seed.
        let seed = match (self.seed, color) {
            (SeedPolicy::Fixed(s), Color::White) => SeedPolicy::Fixed(s.rotate_left(32) ^ 1),
            (SeedPolicy::PerGame(s), Color::White) => SeedPolicy::PerGame(s.rotate_left(32) ^ 1),
            (policy, _) => policy,
        };
        AgentConfig::new(color, self.time_limited)
            .with_time_limit(self.time_limit)
            .with_seed(seed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win(Color),
    Draw,
    Forfeit { loser: Color, reason: ForfeitReason },
}

impl GameOutcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            GameOutcome::Win(color) => Some(color),
            GameOutcome::Draw => None,
            GameOutcome::Forfeit { loser, .. } => Some(loser.opponent()),
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Win(color) => write!(f, "{color} wins"),
            GameOutcome::Draw => write!(f, "draw"),
            GameOutcome::Forfeit { loser, reason } => write!(f, "{loser} forfeits ({reason})"),
        }
    }
}

/// Result of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRecord {
    pub outcome: GameOutcome,
    pub black_count: usize,
    pub white_count: usize,
    /// Entries in the game's history, passes included.
    pub plies: usize,
    pub duration: Duration,
}

/// Decide a finished position by disc count.
///
/// Returns `None` while either side can still move.
pub fn final_outcome(board: &Board) -> Option<GameOutcome> {
    if board.has_legal_move_for(Color::Black) || board.has_legal_move_for(Color::White) {
        return None;
    }
    let (black, white) = (board.count(Color::Black), board.count(Color::White));
    Some(match black.cmp(&white) {
        std::cmp::Ordering::Greater => GameOutcome::Win(Color::Black),
        std::cmp::Ordering::Less => GameOutcome::Win(Color::White),
        std::cmp::Ordering::Equal => GameOutcome::Draw,
    })
}

/// Aggregate counts over a series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TournamentReport {
    pub black_name: String,
    pub white_name: String,
    pub games: u64,
    pub black_wins: u64,
    pub white_wins: u64,
    pub draws: u64,
    /// Forfeited games; not counted as wins for either side.
    pub forfeits: u64,
    forfeits_by: [u64; 2],
    pub total_time: Duration,
}

impl TournamentReport {
    pub fn new(black_name: impl Into<String>, white_name: impl Into<String>) -> Self {
        Self {
            black_name: black_name.into(),
            white_name: white_name.into(),
            ..Self::default()
        }
    }

    pub fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        self.total_time += game.duration;
        match game.outcome {
            GameOutcome::Win(Color::Black) => self.black_wins += 1,
            GameOutcome::Win(Color::White) => self.white_wins += 1,
            GameOutcome::Draw => self.draws += 1,
            GameOutcome::Forfeit { loser, .. } => {
                self.forfeits += 1;
                self.forfeits_by[loser.index()] += 1;
            }
        }
    }

    pub fn wins(&self, color: Color) -> u64 {
        match color {
            Color::Black => self.black_wins,
            Color::White => self.white_wins,
        }
    }

    /// Games `color` lost by forfeit.
    pub fn forfeits_by(&self, color: Color) -> u64 {
        self.forfeits_by[color.index()]
    }

    /// Wins over decided-on-the-board games; `None` if there were none.
    pub fn win_rate(&self, color: Color) -> Option<f64> {
        let decided = self.black_wins + self.white_wins + self.draws;
        (decided > 0).then(|| self.wins(color) as f64 / decided as f64)
    }

    pub fn mean_time(&self) -> Duration {
        match u32::try_from(self.games) {
            Ok(n) if n > 0 => self.total_time / n,
            _ => Duration::ZERO,
        }
    }
}

impl fmt::Display for TournamentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rate = |color| match self.win_rate(color) {
            Some(r) => format!("{:.1}%", r * 100.0),
            None => "n/a".to_string(),
        };
        writeln!(
            f,
            "{} games: {} (black) vs {} (white)",
            self.games, self.black_name, self.white_name
        )?;
        writeln!(
            f,
            "black wins {}  white wins {}  draws {}  forfeits {} (black {}, white {})",
            self.black_wins,
            self.white_wins,
            self.draws,
            self.forfeits,
            self.forfeits_by(Color::Black),
            self.forfeits_by(Color::White)
        )?;
        writeln!(
            f,
            "win rate: black {}  white {}",
            rate(Color::Black),
            rate(Color::White)
        )?;
        write!(
            f,
            "time: {:.2?} total, {:.2?} per game",
            self.total_time,
            self.mean_time()
        )
    }
}

/// Two agents with fixed colors and the number of games they play.
pub struct Tournament {
    black: Arc<dyn Agent>,
    white: Arc<dyn Agent>,
    games: u64,
}

impl Tournament {
    pub fn new(config: &TournamentConfig) -> Self {
        Self {
            black: create_agent(config.black, config.agent_config(Color::Black)),
            white: create_agent(config.white, config.agent_config(Color::White)),
            games: config.games,
        }
    }

    /// A series between prebuilt agents, which must play the colors given.
    pub fn with_agents(black: Arc<dyn Agent>, white: Arc<dyn Agent>, games: u64) -> Self {
        Self {
            black,
            white,
            games,
        }
    }

    fn agent(&self, color: Color) -> &Arc<dyn Agent> {
        match color {
            Color::Black => &self.black,
            Color::White => &self.white,
        }
    }

    /// Each agent is waited on for its own budget plus slack.
    fn wait_limit(agent: &Arc<dyn Agent>) -> Option<Duration> {
        agent.time_limited().then(|| join_timeout(agent.time_limit()))
    }

    /// Play one game from the opening position.
    pub fn play_game(&self, game: u64) -> GameRecord {
        self.play_game_with(game, |_| {})
    }

    /// Play one game, calling `on_move` with the board after every ply.
    pub fn play_game_with<F>(&self, game: u64, mut on_move: F) -> GameRecord
    where
        F: FnMut(&Board),
    {
        self.black.new_game(game);
        self.white.new_game(game);

        let start = Instant::now();
        let mut board = Board::new();
        let outcome = loop {
            if let Some(outcome) = final_outcome(&board) {
                break outcome;
            }
            if !board.has_legal_move() {
                board.pass();
                on_move(&board);
                continue;
            }

            let mover = board.current_color();
            let agent = self.agent(mover);
            let (turn, elapsed) = run_turn(agent, &board, Self::wait_limit(agent));
            let reason = match turn {
                Turn::Move(loc) => match board.apply(loc) {
                    Ok(()) => {
                        on_move(&board);
                        continue;
                    }
                    Err(_) => ForfeitReason::IllegalMove(loc),
                },
                Turn::Forfeit(reason) => reason,
            };
            warn!(
                "game {game}: {} ({mover}) forfeits after {elapsed:.2?}: {reason}",
                agent.name()
            );
            break GameOutcome::Forfeit {
                loser: mover,
                reason,
            };
        };

        let record = GameRecord {
            outcome,
            black_count: board.count(Color::Black),
            white_count: board.count(Color::White),
            plies: board.history_len(),
            duration: start.elapsed(),
        };
        info!(
            "game {game}: {outcome}, {}-{} in {} plies ({:.2?})",
            record.black_count, record.white_count, record.plies, record.duration
        );
        record
    }

    /// Play the whole series.
    pub fn run(&self) -> TournamentReport {
        let mut report = TournamentReport::new(self.black.name(), self.white.name());
        for game in 0..self.games {
            report.record(&self.play_game(game));
        }
        report
    }
}
