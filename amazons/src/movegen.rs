//! Vision and move generation

use crate::board::Board;
use crate::geometry::{Direction, MAX_VISION};
use crate::moves::Move;
use crate::types::{Color, Square};

use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

/// Iterator over the empty squares along one direction
///
/// Walks outward from the starting square and stops before the first occupied square or at
/// the edge of the board. The starting square itself is never yielded.
pub struct Ray<'a> {
    board: &'a Board,
    cur: Square,
    dir: Direction,
    done: bool,
}

impl<'a> Ray<'a> {
    pub fn new(board: &'a Board, start: Square, dir: Direction) -> Self {
        Ray {
            board,
            cur: start,
            dir,
            done: false,
        }
    }
}

impl<'a> Iterator for Ray<'a> {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.done {
            return None;
        }
        let (delta_file, delta_rank) = self.dir.delta();
        let next = self
            .cur
            .try_shift(delta_file, delta_rank)
            .filter(|&sq| self.board.try_get(sq).map_or(false, |c| c.is_empty()));
        match next {
            Some(sq) => {
                self.cur = sq;
                Some(sq)
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

/// Set of squares visible from a single square
///
/// Squares are grouped by direction in the order of [`Direction::ALL`], and ordered by the
/// distance from the source within each direction.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Vision(ArrayVec<Square, MAX_VISION>);

impl Deref for Vision {
    type Target = ArrayVec<Square, MAX_VISION>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Vision {
    type Item = &'a Square;
    type IntoIter = slice::Iter<'a, Square>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Vision {
    type Item = Square;
    type IntoIter = arrayvec::IntoIter<Square, MAX_VISION>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Returns all the empty squares visible from `sq`
///
/// Casts a ray in each of the eight directions and collects the empty squares up to
/// (but not including) the first obstruction or the edge of the board. Whatever stands on `sq`
/// itself is irrelevant.
pub fn vision(b: &Board, sq: Square) -> Vision {
    let mut res = ArrayVec::new();
    for dir in Direction::ALL {
        res.extend(Ray::new(b, sq, dir));
    }
    Vision(res)
}

/// List of generated moves
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(Vec<Move>);

impl Deref for MoveList {
    type Target = Vec<Move>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(Vec::new())
    }
}

/// Generates all the queen moves for side `c`
///
/// Queens are visited in grid order (top row first), and destinations of each queen in the
/// order of [`vision()`]. So the result depends only on the board contents, not on the way
/// the position was reached.
pub fn gen_queen_moves(b: &Board, c: Color) -> MoveList {
    let size = b.size();
    let mut queens = b.queens(c).to_vec();
    queens.sort_unstable_by_key(|&sq| size.index_of(sq));

    let mut res = MoveList::new();
    for from in queens {
        res.extend(vision(b, from).into_iter().map(|to| Move::Queen { from, to }));
    }
    res
}

/// Generates all the arrow shots for the queen standing on `from`
pub fn gen_shots(b: &Board, from: Square) -> MoveList {
    MoveList(vision(b, from).into_iter().map(|at| Move::Shot { at }).collect())
}

/// Generates all the legal moves in the given state
///
/// If `shooting` is set, only shots from this square are returned. Otherwise, queen moves of
/// side `c` are returned. Full moves are never generated.
pub fn gen_moves(b: &Board, c: Color, shooting: Option<Square>) -> MoveList {
    match shooting {
        Some(from) => gen_shots(b, from),
        None => gen_queen_moves(b, c),
    }
}

/// Returns `true` if side `c` has at least one queen move
pub fn has_queen_moves(b: &Board, c: Color) -> bool {
    b.queens(c)
        .iter()
        .any(|&from| Direction::ALL.iter().any(|&dir| Ray::new(b, from, dir).next().is_some()))
}
