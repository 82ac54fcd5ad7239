//! Integration tests for reversi-rust
//!
//! Board invariants are checked over seeded random playouts rather than
//! hand-built positions, so every test sees a spread of openings, middle
//! games and endings.

use reversi_rust::board::{Board, BoardError, Color, Location};
use reversi_rust::constants::N;
use reversi_rust::eval::Evaluator;
use reversi_rust::ordering::MoveOrder;
use reversi_rust::search::{DepthMode, SearchLimits, SearchProfile, Searcher};

// =============================================================================
// Helpers
// =============================================================================

/// Play `plies` random plies (passing when forced) and return the board.
fn random_board(seed: u64, plies: usize) -> Board {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut board = Board::new();
    for _ in 0..plies {
        let moves = board.legal_moves();
        if moves.is_empty() {
            if !board.has_legal_move_for(board.current_color().opponent()) {
                break;
            }
            board.pass();
            continue;
        }
        board.apply(moves[rng.usize(..moves.len())]).unwrap();
    }
    board
}

/// Legality computed straight from the cell accessors.
fn brute_force_legal(board: &Board, x: usize, y: usize) -> bool {
    if board.get(x, y).is_some() {
        return false;
    }
    let me = board.current_color();
    for dx in -1isize..=1 {
        for dy in -1isize..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let (mut cx, mut cy) = (x as isize + dx, y as isize + dy);
            let mut seen_opponent = false;
            while (0..N as isize).contains(&cx) && (0..N as isize).contains(&cy) {
                match board.get(cx as usize, cy as usize) {
                    Some(c) if c == me.opponent() => seen_opponent = true,
                    Some(_) => {
                        if seen_opponent {
                            return true;
                        }
                        break;
                    }
                    None => break,
                }
                cx += dx;
                cy += dy;
            }
        }
    }
    false
}

// =============================================================================
// Board
// =============================================================================

#[test]
fn test_opening_layout() {
    let board = Board::new();
    assert_eq!(board.get(3, 3), Some(Color::White));
    assert_eq!(board.get(4, 4), Some(Color::White));
    assert_eq!(board.get(3, 4), Some(Color::Black));
    assert_eq!(board.get(4, 3), Some(Color::Black));
    assert_eq!(board.disc_count(), 4);
    assert_eq!(board.current_color(), Color::Black);
    assert!(board.last_move().is_none());
}

#[test]
fn test_first_move_flips_one_disc() {
    let mut board = Board::new();
    board.apply(Location::new(2, 3)).unwrap();
    let rec = board.last_move().unwrap();
    assert_eq!(rec.flipped, vec![Location::new(3, 3)]);
    assert_eq!(board.count(Color::Black), 4);
    assert_eq!(board.count(Color::White), 1);
    assert_eq!(board.current_color(), Color::White);
}

#[test]
fn test_apply_undo_restores_every_position() {
    for seed in 0..30 {
        let mut board = Board::new();
        let mut rng = fastrand::Rng::with_seed(seed);
        loop {
            for mv in board.legal_moves() {
                let before = board.clone();
                board.apply(mv).unwrap();
                board.undo().unwrap();
                assert!(board.same_position(&before), "seed {seed} move {mv}");
                assert_eq!(board.current_color(), before.current_color());
                assert_eq!(board.history_len(), before.history_len());
            }
            let moves = board.legal_moves();
            if moves.is_empty() {
                if !board.has_legal_move_for(board.current_color().opponent()) {
                    break;
                }
                board.pass();
            } else {
                board.apply(moves[rng.usize(..moves.len())]).unwrap();
            }
        }

        // Unwind the whole game back to the opening.
        while board.history_len() > 0 {
            board.undo().unwrap();
        }
        assert!(board.same_position(&Board::new()), "seed {seed}");
        assert_eq!(board.undo(), Err(BoardError::EmptyHistory));
    }
}

#[test]
fn test_legal_moves_match_brute_force() {
    for seed in 0..20 {
        for plies in [0, 7, 20, 35, 50] {
            let board = random_board(seed, plies);
            let moves = board.legal_moves();
            for y in 0..N {
                for x in 0..N {
                    let loc = Location::new(x, y);
                    let expected = brute_force_legal(&board, x, y);
                    assert_eq!(board.is_legal(loc), expected, "seed {seed} ply {plies} {loc}");
                    assert_eq!(moves.contains(&loc), expected, "seed {seed} ply {plies} {loc}");
                }
            }
        }
    }
}

#[test]
fn test_counts_track_cells() {
    for seed in 0..10 {
        let board = random_board(seed, 40);
        let mut black = 0;
        let mut white = 0;
        for y in 0..N {
            for x in 0..N {
                match board.get(x, y) {
                    Some(Color::Black) => black += 1,
                    Some(Color::White) => white += 1,
                    None => {}
                }
            }
        }
        assert_eq!(board.count(Color::Black), black);
        assert_eq!(board.count(Color::White), white);
        assert_eq!(board.empty_count(), N * N - black - white);
    }
}

#[test]
fn test_illegal_apply_leaves_board_alone() {
    let mut board = random_board(3, 12);
    let before = board.clone();
    let occupied = Location::new(3, 3);
    assert_eq!(board.apply(occupied), Err(BoardError::IllegalMove(occupied)));
    assert!(board.same_position(&before));
    assert_eq!(board.history_len(), before.history_len());
}

// =============================================================================
// Search
// =============================================================================

fn root_result(
    board: &mut Board,
    evaluator: Evaluator,
    order: MoveOrder,
    pruning: bool,
    depth: u32,
) -> (i32, Option<Location>) {
    let profile = SearchProfile {
        evaluator,
        order,
        pruning,
        depth: DepthMode::Fixed(depth),
    };
    let mut searcher = Searcher::new(
        board.current_color(),
        profile,
        SearchLimits::unlimited(),
        fastrand::Rng::with_seed(0),
    );
    searcher.search_root(board, depth).unwrap()
}

#[test]
fn test_alpha_beta_agrees_with_minimax_mid_game() {
    for seed in 0..6 {
        let mut board = random_board(100 + seed, 16 + seed as usize);
        if !board.has_legal_move() {
            continue;
        }
        let before = board.clone();
        for evaluator in [Evaluator::Pieces, Evaluator::Phased, Evaluator::Positional] {
            for order in [MoveOrder::Scan, MoveOrder::Scored, MoveOrder::Shuffled] {
                for depth in 1..=3 {
                    let plain = root_result(&mut board, evaluator, order, false, depth);
                    let pruned = root_result(&mut board, evaluator, order, true, depth);
                    assert_eq!(plain, pruned, "seed {seed} {evaluator:?} {order:?} depth {depth}");
                    assert!(board.same_position(&before));
                }
            }
        }
    }
}

#[test]
fn test_alpha_beta_agrees_with_minimax_deeper() {
    let mut board = random_board(7, 24);
    if board.has_legal_move() {
        let plain = root_result(&mut board, Evaluator::Phased, MoveOrder::Scored, false, 4);
        let pruned = root_result(&mut board, Evaluator::Phased, MoveOrder::Scored, true, 4);
        assert_eq!(plain, pruned);
    }
}

#[test]
fn test_alpha_beta_agrees_with_minimax_seeded_shuffle() {
    // Both searches shuffle from the same seed, so the root order matches.
    for (seed, plies) in [(200, 36), (201, 42), (202, 48)] {
        let mut board = random_board(seed, plies);
        if !board.has_legal_move() {
            continue;
        }
        let order = MoveOrder::Shuffled;
        for depth in [5, 6] {
            let plain = root_result(&mut board, Evaluator::Pieces, order, false, depth);
            let pruned = root_result(&mut board, Evaluator::Pieces, order, true, depth);
            assert_eq!(plain, pruned, "seed {seed} depth {depth}");
        }
    }
}

#[test]
fn test_endgame_search_finds_a_wipeout() {
    // After e6 f4 e3 f6 g5 d6 e7 f5, Black's c5 takes White's last discs.
    let mut board = Board::new();
    for mv in ["e6", "f4", "e3", "f6", "g5", "d6", "e7", "f5"] {
        board.apply(mv.parse().unwrap()).unwrap();
    }
    let (score, best) = root_result(&mut board, Evaluator::Pieces, MoveOrder::Scan, true, 2);
    assert_eq!(best, Some("c5".parse().unwrap()));
    assert!(score > 1000, "a won ending must outscore any heuristic value");
}
