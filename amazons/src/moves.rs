//! Moves and their text representation

use crate::types::{Square, SquareParseError};

use std::fmt;
use std::str::FromStr;

use arrayvec::ArrayVec;
use thiserror::Error;

/// Error parsing a move from string
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ParseError {
    /// One of the squares cannot be parsed
    #[error("bad square #{}: {}", .pos + 1, .source)]
    Square {
        pos: usize,
        source: SquareParseError,
    },
    /// Move doesn't consist of one, two or three squares
    #[error("move must consist of 1 to 3 squares, got {0}")]
    BadLength(usize),
}

/// Move, or a part of move
///
/// A full move in the Game of the Amazons consists of two parts: first, a queen moves, then it shoots
/// an arrow from its new square. The parts can be applied one by one ([`Move::Queen`], then
/// [`Move::Shot`]), or both at once ([`Move::Full`]).
///
/// Moves are written as their squares joined by `-`, e.g. `d1-d7-g7` for a full move, `d1-d7` for a queen
/// move and `g7` for a shot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Move {
    /// Queen moves from `from` to `to`, and must shoot afterwards
    Queen { from: Square, to: Square },
    /// Queen that has just moved shoots an arrow to `at`
    Shot { at: Square },
    /// Queen moves from `from` to `to`, then shoots an arrow to `at`
    Full { from: Square, to: Square, at: Square },
}

impl Move {
    /// Creates a move from its squares
    ///
    /// Returns `None` unless there are one, two or three squares.
    pub fn from_squares(squares: &[Square]) -> Option<Move> {
        match *squares {
            [at] => Some(Move::Shot { at }),
            [from, to] => Some(Move::Queen { from, to }),
            [from, to, at] => Some(Move::Full { from, to, at }),
            _ => None,
        }
    }

    /// Returns the squares of this move, in the order they are written
    pub fn squares(&self) -> ArrayVec<Square, 3> {
        let mut res = ArrayVec::new();
        match *self {
            Move::Queen { from, to } => res.extend([from, to]),
            Move::Shot { at } => res.push(at),
            Move::Full { from, to, at } => res.extend([from, to, at]),
        }
        res
    }

    /// Returns the number of squares in this move
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Move::Shot { .. } => 1,
            Move::Queen { .. } => 2,
            Move::Full { .. } => 3,
        }
    }

    /// Returns the queen move part, if any
    #[inline]
    pub fn queen_part(&self) -> Option<Move> {
        match *self {
            Move::Queen { from, to } | Move::Full { from, to, .. } => Some(Move::Queen { from, to }),
            Move::Shot { .. } => None,
        }
    }

    /// Returns the arrow shot part, if any
    #[inline]
    pub fn shot_part(&self) -> Option<Move> {
        match *self {
            Move::Shot { at } | Move::Full { at, .. } => Some(Move::Shot { at }),
            Move::Queen { .. } => None,
        }
    }

    /// Appends the shot to the queen move, making a full move
    ///
    /// Returns `None` if this move is not a queen move.
    #[inline]
    pub fn with_shot(&self, at: Square) -> Option<Move> {
        match *self {
            Move::Queen { from, to } => Some(Move::Full { from, to, at }),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (i, sq) in self.squares().iter().enumerate() {
            if i != 0 {
                write!(f, "-")?;
            }
            write!(f, "{}", sq)?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Move, Self::Err> {
        let count = s.split('-').count();
        if count > 3 {
            return Err(ParseError::BadLength(count));
        }
        let squares = s
            .split('-')
            .enumerate()
            .map(|(pos, part)| {
                Square::from_str(part).map_err(|source| ParseError::Square { pos, source })
            })
            .collect::<Result<ArrayVec<Square, 3>, _>>()?;
        Move::from_squares(&squares).ok_or(ParseError::BadLength(count))
    }
}
