//! End-to-end tests: whole games through the bounded runner.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use reversi_rust::agent::{Agent, AgentConfig, AgentKind, create_agent};
use reversi_rust::board::{Board, Color, Location};
use reversi_rust::random::SeedPolicy;
use reversi_rust::runner::{ForfeitReason, Turn, join_timeout, run_turn};
use reversi_rust::tournament::{GameOutcome, Tournament, TournamentConfig};

/// Always answers with an occupied cell.
struct Cheater(Color);

impl Agent for Cheater {
    fn name(&self) -> &str {
        "cheater"
    }
    fn color(&self) -> Color {
        self.0
    }
    fn time_limited(&self) -> bool {
        false
    }
    fn time_limit(&self) -> Duration {
        Duration::from_secs(1)
    }
    fn compute(&self, _board: &Board) -> Option<Location> {
        Some(Location::new(3, 3))
    }
}

/// Plays the first legal move, but only after thinking far past its budget.
struct Sleeper(Color);

impl Agent for Sleeper {
    fn name(&self) -> &str {
        "sleeper"
    }
    fn color(&self) -> Color {
        self.0
    }
    fn time_limited(&self) -> bool {
        true
    }
    fn time_limit(&self) -> Duration {
        Duration::from_millis(20)
    }
    fn compute(&self, board: &Board) -> Option<Location> {
        thread::sleep(Duration::from_millis(400));
        board.legal_moves().first().copied()
    }
}

fn untimed(kind: AgentKind, color: Color, seed: u64) -> Arc<dyn Agent> {
    create_agent(
        kind,
        AgentConfig::new(color, false).with_seed(SeedPolicy::Fixed(seed)),
    )
}

#[test]
fn test_seeded_series_is_reproducible() {
    let mut config = TournamentConfig::new(AgentKind::PieceMaximizing, AgentKind::PieceMaximizing, 100);
    config.time_limited = false;
    config.seed = SeedPolicy::Fixed(2024);

    let first = Tournament::new(&config).run();
    let second = Tournament::new(&config).run();
    assert_eq!(first.games, 100);
    assert_eq!(first.forfeits, 0);
    assert_eq!(first.black_wins + first.white_wins + first.draws, 100);
    assert_eq!(
        (first.black_wins, first.white_wins, first.draws),
        (second.black_wins, second.white_wins, second.draws)
    );
}

#[test]
fn test_per_game_seed_replays_each_game() {
    let mut config = TournamentConfig::new(AgentKind::Random, AgentKind::CornerTaking, 3);
    config.time_limited = false;
    config.seed = SeedPolicy::PerGame(11);
    let a = Tournament::new(&config);
    let b = Tournament::new(&config);
    // Game 2 is the same no matter which games were played before it.
    let first = a.play_game(2);
    b.play_game(0);
    let second = b.play_game(2);
    assert_eq!(first.outcome, second.outcome);
    assert_eq!(
        (first.black_count, first.white_count, first.plies),
        (second.black_count, second.white_count, second.plies)
    );
}

#[test]
fn test_cheater_loses_every_game() {
    let tournament = Tournament::with_agents(
        Arc::new(Cheater(Color::Black)),
        untimed(AgentKind::Random, Color::White, 1),
        5,
    );
    let report = tournament.run();
    assert_eq!(report.forfeits_by(Color::Black), 5);
    assert_eq!(report.black_wins, 0);
    assert_eq!(report.win_rate(Color::Black), None);

    let tournament = Tournament::with_agents(
        untimed(AgentKind::CornerTaking, Color::Black, 1),
        Arc::new(Cheater(Color::White)),
        5,
    );
    for game in 0..5 {
        let record = tournament.play_game(game);
        assert_eq!(
            record.outcome,
            GameOutcome::Forfeit {
                loser: Color::White,
                reason: ForfeitReason::IllegalMove(Location::new(3, 3)),
            }
        );
        assert_eq!(record.outcome.winner(), Some(Color::Black));
        assert_eq!(record.plies, 1);
    }
}

#[test]
fn test_slow_agent_forfeits_on_time() {
    let tournament = Tournament::with_agents(
        Arc::new(Sleeper(Color::Black)),
        untimed(AgentKind::Random, Color::White, 1),
        1,
    );
    let record = tournament.play_game(0);
    assert_eq!(
        record.outcome,
        GameOutcome::Forfeit {
            loser: Color::Black,
            reason: ForfeitReason::Timeout,
        }
    );
    assert_eq!(record.plies, 0);
    assert!(record.duration < Duration::from_millis(400));
}

#[test]
fn test_prebuilt_agent_gets_its_own_budget() {
    // Black searches for its full 800 ms; White then forfeits at once.
    let black = create_agent(
        AgentKind::Deepening,
        AgentConfig::new(Color::Black, true).with_time_limit(Duration::from_millis(800)),
    );
    let tournament = Tournament::with_agents(black, Arc::new(Cheater(Color::White)), 1);
    let record = tournament.play_game(0);
    assert_eq!(
        record.outcome,
        GameOutcome::Forfeit {
            loser: Color::White,
            reason: ForfeitReason::IllegalMove(Location::new(3, 3)),
        }
    );
    assert_eq!(record.plies, 1);
}

#[test]
fn test_time_limited_search_answers_in_time() {
    let limit = Duration::from_secs(1);
    let agent = create_agent(
        AgentKind::Deepening,
        AgentConfig::new(Color::Black, true).with_time_limit(limit),
    );
    let board = Board::new();
    let (turn, _) = run_turn(&agent, &board, Some(join_timeout(limit)));
    match turn {
        Turn::Move(mv) => assert!(board.is_legal(mv)),
        Turn::Forfeit(reason) => panic!("forfeited: {reason}"),
    }
}

#[test]
fn test_full_game_between_search_agents() {
    let mut config = TournamentConfig::new(AgentKind::PieceMinimax4, AgentKind::CornerTaking, 1);
    config.time_limited = false;
    config.seed = SeedPolicy::Fixed(5);
    let record = Tournament::new(&config).play_game(0);
    assert!(!matches!(record.outcome, GameOutcome::Forfeit { .. }));
    assert!(record.black_count + record.white_count <= 64);
    assert!(record.plies >= 9);
}
