//! Reversi board state, legality rules, and reversible move application.
//!
//! The board is a flat array of 64 cells indexed `y * 8 + x`. Every placement
//! pushes a [`MoveRecord`] holding exactly the discs it flipped, so
//! [`Board::undo`] can restore the previous grid, counts, and side to move
//! bit for bit. Search code relies on that: it mutates one private board in
//! place and unwinds every change before returning.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{CELLS, DIRECTIONS, N};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Black is 0, White is 1.
    pub fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// A cell coordinate. `x` is the column, `y` the row, both in `0..8`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    pub x: usize,
    pub y: usize,
}

impl Location {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn in_range(self) -> bool {
        self.x < N && self.y < N
    }

    fn idx(self) -> usize {
        self.y * N + self.x
    }

    /// Step `dist` cells along `(dx, dy)`, or `None` if that leaves the board.
    fn step(self, (dx, dy): (isize, isize), dist: isize) -> Option<Location> {
        let x = self.x as isize + dx * dist;
        let y = self.y as isize + dy * dist;
        if (0..N as isize).contains(&x) && (0..N as isize).contains(&y) {
            Some(Location::new(x as usize, y as usize))
        } else {
            None
        }
    }
}

/// Algebraic notation: column letter from `x`, row number from `y + 1`.
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col = (b'a' + self.x as u8) as char;
        write!(f, "{}{}", col, self.y + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid coordinate '{0}', expected a1..h8")]
pub struct ParseLocationError(String);

impl FromStr for Location {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let bytes = lower.as_bytes();
        if bytes.len() != 2 {
            return Err(ParseLocationError(s.to_string()));
        }
        let x = bytes[0].wrapping_sub(b'a') as usize;
        let y = bytes[1].wrapping_sub(b'1') as usize;
        let loc = Location::new(x, y);
        if loc.in_range() {
            Ok(loc)
        } else {
            Err(ParseLocationError(s.to_string()))
        }
    }
}

/// Invariant violations inside the board engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("illegal move at {0}")]
    IllegalMove(Location),
    #[error("undo called with an empty history")]
    EmptyHistory,
}

/// One entry of the undo history.
///
/// A pass has no placed cell and no flips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub color: Color,
    pub placed: Option<Location>,
    pub flipped: Vec<Location>,
}

impl MoveRecord {
    pub fn pass(color: Color) -> Self {
        Self {
            color,
            placed: None,
            flipped: Vec::new(),
        }
    }

    pub fn is_pass(&self) -> bool {
        self.placed.is_none()
    }
}

/// A Reversi position plus the history needed to unwind it.
#[derive(Clone, Debug)]
pub struct Board {
    cells: [Option<Color>; CELLS],
    counts: [usize; 2],
    current: Color,
    history: Vec<MoveRecord>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard opening: White on d4/e5, Black on e4/d5, Black to move.
    pub fn new() -> Self {
        let mut cells = [None; CELLS];
        cells[Location::new(3, 3).idx()] = Some(Color::White);
        cells[Location::new(4, 4).idx()] = Some(Color::White);
        cells[Location::new(4, 3).idx()] = Some(Color::Black);
        cells[Location::new(3, 4).idx()] = Some(Color::Black);
        Self {
            cells,
            counts: [2, 2],
            current: Color::Black,
            history: Vec::new(),
        }
    }

    /// Copy of the grid, counts, and side to move, with an empty history.
    pub fn snapshot(&self) -> Board {
        Board {
            cells: self.cells,
            counts: self.counts,
            current: self.current,
            history: Vec::new(),
        }
    }

    /// True if grid, counts, and side to move match. History is ignored.
    pub fn same_position(&self, other: &Board) -> bool {
        self.cells == other.cells && self.counts == other.counts && self.current == other.current
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x >= N || y >= N {
            return None;
        }
        self.cells[y * N + x]
    }

    pub fn at(&self, loc: Location) -> Option<Color> {
        self.get(loc.x, loc.y)
    }

    pub fn count(&self, color: Color) -> usize {
        self.counts[color.index()]
    }

    pub fn disc_count(&self) -> usize {
        self.counts[0] + self.counts[1]
    }

    pub fn empty_count(&self) -> usize {
        CELLS - self.disc_count()
    }

    pub fn current_color(&self) -> Color {
        self.current
    }

    /// The most recent move, including passes.
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Length of the flip run from `loc` along `dir` for `color`, or 0 if the
    /// run is not closed by a `color` disc.
    fn run_length(&self, loc: Location, dir: (isize, isize), color: Color) -> usize {
        let opp = color.opponent();
        let mut dist = 1;
        while let Some(l) = loc.step(dir, dist) {
            match self.cells[l.idx()] {
                Some(c) if c == opp => dist += 1,
                Some(_) => return (dist - 1) as usize,
                None => return 0,
            }
        }
        0
    }

    fn is_legal_for(&self, loc: Location, color: Color) -> bool {
        if !loc.in_range() || self.cells[loc.idx()].is_some() {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&dir| self.run_length(loc, dir, color) > 0)
    }

    /// True if the side to move may place a disc at `loc`.
    pub fn is_legal(&self, loc: Location) -> bool {
        self.is_legal_for(loc, self.current)
    }

    /// Every legal cell for `color`, in row-major order.
    pub fn legal_moves_for(&self, color: Color) -> Vec<Location> {
        let mut moves = Vec::new();
        for y in 0..N {
            for x in 0..N {
                let loc = Location::new(x, y);
                if self.is_legal_for(loc, color) {
                    moves.push(loc);
                }
            }
        }
        moves
    }

    pub fn legal_moves(&self) -> Vec<Location> {
        self.legal_moves_for(self.current)
    }

    pub fn has_legal_move_for(&self, color: Color) -> bool {
        (0..CELLS).any(|i| self.is_legal_for(Location::new(i % N, i / N), color))
    }

    /// True if the side to move has any legal placement.
    pub fn has_legal_move(&self) -> bool {
        self.has_legal_move_for(self.current)
    }

    /// Place a disc for the side to move and flip every closed run.
    ///
    /// # Errors
    /// [`BoardError::IllegalMove`] if the cell is occupied, off the board, or
    /// flips nothing. The board is untouched in that case.
    pub fn apply(&mut self, loc: Location) -> Result<(), BoardError> {
        if !loc.in_range() || self.cells[loc.idx()].is_some() {
            return Err(BoardError::IllegalMove(loc));
        }
        let color = self.current;
        let mut flipped = Vec::new();
        for &dir in &DIRECTIONS {
            let run = self.run_length(loc, dir, color);
            flipped.extend((1..=run as isize).filter_map(|d| loc.step(dir, d)));
        }
        if flipped.is_empty() {
            return Err(BoardError::IllegalMove(loc));
        }

        self.cells[loc.idx()] = Some(color);
        for l in &flipped {
            self.cells[l.idx()] = Some(color);
        }
        self.counts[color.index()] += 1 + flipped.len();
        self.counts[color.opponent().index()] -= flipped.len();
        self.history.push(MoveRecord {
            color,
            placed: Some(loc),
            flipped,
        });
        self.current = color.opponent();
        Ok(())
    }

    /// Hand the turn to the opponent without placing a disc.
    ///
    /// Callers must only pass when the side to move has no legal move; the
    /// board does not check.
    pub fn pass(&mut self) {
        self.history.push(MoveRecord::pass(self.current));
        self.current = self.current.opponent();
    }

    /// Revert the most recent move or pass and return its record.
    ///
    /// # Errors
    /// [`BoardError::EmptyHistory`] if there is nothing to undo.
    pub fn undo(&mut self) -> Result<MoveRecord, BoardError> {
        let rec = self.history.pop().ok_or(BoardError::EmptyHistory)?;
        if let Some(placed) = rec.placed {
            let opp = rec.color.opponent();
            self.cells[placed.idx()] = None;
            for l in &rec.flipped {
                self.cells[l.idx()] = Some(opp);
            }
            self.counts[rec.color.index()] -= 1 + rec.flipped.len();
            self.counts[opp.index()] += rec.flipped.len();
        }
        self.current = rec.color;
        Ok(rec)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for y in 0..N {
            write!(f, "{} ", y + 1)?;
            for x in 0..N {
                let ch = match self.get(x, y) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "X {}  O {}  {} to move",
            self.count(Color::Black),
            self.count(Color::White),
            self.current
        )
    }
}
