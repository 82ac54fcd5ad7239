//! Move ordering for alpha-beta search.
//!
//! Good moves searched first tighten the window early and prune more.

use std::cmp::Reverse;

use crate::board::{Board, BoardError, Location};
use crate::eval::Evaluator;

/// How a search orders the legal moves at each node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOrder {
    /// Row-major scan order, as `Board::legal_moves` returns it.
    Scan,
    /// Uniformly shuffled.
    Shuffled,
    /// Sorted by one-ply evaluation, previous best pinned first.
    Scored,
}

/// Legal moves sorted by the mover's one-ply evaluation, best first.
///
/// Each candidate is applied, scored from the mover's perspective, and undone.
/// The sort is stable, so equal scores keep scan order. If `pinned` is among
/// the candidates it is moved to the front regardless of its score.
pub fn scored_moves(
    board: &mut Board,
    evaluator: Evaluator,
    pinned: Option<Location>,
) -> Result<Vec<Location>, BoardError> {
    let mover = board.current_color();
    let mut scored = Vec::new();
    for loc in board.legal_moves() {
        board.apply(loc)?;
        let score = evaluator.evaluate(board, mover);
        board.undo()?;
        scored.push((loc, score));
    }
    scored.sort_by_key(|&(_, score)| Reverse(score));

    let mut moves: Vec<Location> = scored.into_iter().map(|(loc, _)| loc).collect();
    if let Some(best) = pinned {
        pin_first(&mut moves, best);
    }
    Ok(moves)
}

/// Move `loc` to index 0 if present; otherwise leave `moves` unchanged.
pub fn pin_first(moves: &mut Vec<Location>, loc: Location) {
    if let Some(pos) = moves.iter().position(|&m| m == loc) {
        let m = moves.remove(pos);
        moves.insert(0, m);
    }
}

/// Legal moves in a uniformly random order.
pub fn shuffled_moves(board: &Board, rng: &mut fastrand::Rng) -> Vec<Location> {
    let mut moves = board.legal_moves();
    rng.shuffle(&mut moves);
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scored_moves_is_permutation() {
        let mut board = Board::new();
        board.apply(Location::new(2, 3)).unwrap();
        let mut legal = board.legal_moves();
        let mut ordered = scored_moves(&mut board, Evaluator::Phased, None).unwrap();
        assert_eq!(board.history_len(), 1, "ordering must undo its probes");
        legal.sort_by_key(|l| (l.y, l.x));
        ordered.sort_by_key(|l| (l.y, l.x));
        assert_eq!(legal, ordered);
    }

    #[test]
    fn test_scored_moves_sorted_descending() {
        let mut board = Board::new();
        for mv in [(2, 3), (2, 2), (3, 2)] {
            board.apply(Location::new(mv.0, mv.1)).unwrap();
        }
        let mover = board.current_color();
        let ordered = scored_moves(&mut board, Evaluator::Pieces, None).unwrap();
        let scores: Vec<i32> = ordered
            .iter()
            .map(|&loc| {
                let mut probe = board.snapshot();
                probe.apply(loc).unwrap();
                Evaluator::Pieces.evaluate(&probe, mover)
            })
            .collect();
        assert!(
            scores.windows(2).all(|w| w[0] >= w[1]),
            "scores not descending: {scores:?}"
        );
    }

    #[test]
    fn test_pinned_move_goes_first() {
        let mut board = Board::new();
        let last = *board.legal_moves().last().unwrap();
        let ordered = scored_moves(&mut board, Evaluator::Phased, Some(last)).unwrap();
        assert_eq!(ordered[0], last);
        assert_eq!(ordered.len(), 4);
    }

    #[test]
    fn test_pin_absent_move_is_ignored() {
        let mut board = Board::new();
        let plain = scored_moves(&mut board, Evaluator::Phased, None).unwrap();
        let pinned = scored_moves(&mut board, Evaluator::Phased, Some(Location::new(0, 0))).unwrap();
        assert_eq!(plain, pinned);
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let board = Board::new();
        let a = shuffled_moves(&board, &mut fastrand::Rng::with_seed(42));
        let b = shuffled_moves(&board, &mut fastrand::Rng::with_seed(42));
        assert_eq!(a, b);
        assert_eq!(a.len(), 4);
    }
}
