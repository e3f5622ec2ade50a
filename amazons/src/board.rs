//! Board and related things

use crate::movegen::{self, Vision};
use crate::types::{Cell, Color, Size, Square};

use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use thiserror::Error;

/// Error parsing the layout field of the notation (i.e. the positions of pieces on the board)
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum LayoutParseError {
    /// Row contains something other than digits, `w`, `b` or `x`
    #[error("row #{row}: unexpected char {ch:?}")]
    UnexpectedChar { row: usize, ch: char },
    /// Row has no squares
    #[error("row #{0} is empty")]
    EmptyRow(usize),
    /// Row width differs from the width of the first row
    #[error("row #{row} should have {expected} columns, but has {actual}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// Too many rows
    #[error("board must have at most {max} rows", max = Size::MAX)]
    TooManyRows,
    /// Too many columns
    #[error("board must have at most {max} columns", max = Size::MAX)]
    TooManyCols,
}

/// Board of the Game of the Amazons
///
/// The board only stores the cells and performs no legality checks. All the mutating functions
/// (i.e. [`Board::put()`], [`Board::remove()`] and [`Board::move_queen()`]) blindly trust the caller.
///
/// Alongside the grid, the board keeps the list of squares for each non-empty cell kind, so the queens
/// of one side can be found without scanning the whole grid. The grid is the source of truth, and
/// the lists are always kept equal to it. The order of squares in a list is stable: moving a queen
/// replaces its entry in place, so the same queen keeps its position in the list.
#[derive(Debug, Clone)]
pub struct Board {
    size: Size,
    cells: Vec<Cell>,
    pieces: [Vec<Square>; Cell::OCCUPIED_COUNT],
}

#[inline]
fn list_index(c: Cell) -> Option<usize> {
    match c {
        Cell::Empty => None,
        _ => Some(c as usize - 1),
    }
}

impl Board {
    /// Creates an empty board of the given size
    pub fn from_size(size: Size) -> Board {
        Board {
            size,
            cells: vec![Cell::Empty; size.area()],
            pieces: Default::default(),
        }
    }

    /// Parses a board from the layout field of the notation
    ///
    /// Does the same as [`Board::from_str`]. It is recommended to use this function instead of
    /// `from_str()` for better readability.
    pub fn from_layout(layout: &str) -> Result<Board, LayoutParseError> {
        Board::from_str(layout)
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.size.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.size.cols()
    }

    /// Returns `true` if the square lies on this board
    #[inline]
    pub fn contains(&self, sq: Square) -> bool {
        self.size.contains(sq)
    }

    /// Returns the top right square of the board
    #[inline]
    pub fn max_square(&self) -> Square {
        self.size.max_square()
    }

    /// Iterates over all the squares of the board, top row first
    pub fn squares(&self) -> impl Iterator<Item = Square> {
        self.size.squares()
    }

    /// Returns the contents of the square `sq`
    ///
    /// The square must lie on the board.
    #[inline]
    pub fn get(&self, sq: Square) -> Cell {
        debug_assert!(self.contains(sq), "square {} is outside of the board", sq);
        self.cells[self.size.index_of(sq)]
    }

    /// Returns the contents of the square `sq`, or `None` if it is outside of the board
    #[inline]
    pub fn try_get(&self, sq: Square) -> Option<Cell> {
        self.contains(sq).then(|| self.get(sq))
    }

    /// Returns all the squares which contain `c`, in a stable order
    ///
    /// **Note**: when `c` is an empty cell, the function just returns an empty slice,
    /// not the list of all the empty cells.
    #[inline]
    pub fn pieces(&self, c: Cell) -> &[Square] {
        match list_index(c) {
            Some(idx) => &self.pieces[idx],
            None => &[],
        }
    }

    /// Returns the squares of all the queens of color `c`
    #[inline]
    pub fn queens(&self, c: Color) -> &[Square] {
        self.pieces(Cell::queen(c))
    }

    /// Returns the squares of all the arrows
    #[inline]
    pub fn arrows(&self) -> &[Square] {
        self.pieces(Cell::Arrow)
    }

    fn unlist(&mut self, sq: Square, c: Cell) {
        if let Some(idx) = list_index(c) {
            let list = &mut self.pieces[idx];
            if let Some(pos) = list.iter().position(|&s| s == sq) {
                list.remove(pos);
            }
        }
    }

    /// Puts `cell` to the square `sq` and returns the previous contents of this square
    pub fn put(&mut self, sq: Square, cell: Cell) -> Cell {
        let idx = self.size.index_of(sq);
        let old = self.cells[idx];
        if old != cell {
            self.unlist(sq, old);
            self.cells[idx] = cell;
            if let Some(list) = list_index(cell) {
                self.pieces[list].push(sq);
            }
        }
        self.self_check();
        old
    }

    /// Clears the square `sq` and returns its previous contents
    #[inline]
    pub fn remove(&mut self, sq: Square) -> Cell {
        self.put(sq, Cell::Empty)
    }

    /// Moves the piece from `src` to `dst`, leaving `src` empty
    ///
    /// `dst` is expected to be empty. The moved piece keeps its place in the position list.
    pub fn move_queen(&mut self, src: Square, dst: Square) {
        let src_idx = self.size.index_of(src);
        let dst_idx = self.size.index_of(dst);
        let cell = self.cells[src_idx];
        debug_assert!(self.cells[dst_idx].is_empty(), "moving onto occupied square {}", dst);
        self.cells[src_idx] = Cell::Empty;
        self.cells[dst_idx] = cell;
        if let Some(list) = list_index(cell) {
            if let Some(entry) = self.pieces[list].iter_mut().find(|s| **s == src) {
                *entry = dst;
            }
        }
        self.self_check();
    }

    /// Returns all the empty squares visible from `sq` along the eight straight lines
    ///
    /// See [`movegen::vision()`] for details.
    #[inline]
    pub fn vision(&self, sq: Square) -> Vision {
        movegen::vision(self, sq)
    }

    /// Converts the board into the layout field of the notation
    ///
    /// Does the same as `Board::to_string()`.
    #[inline]
    pub fn layout(&self) -> String {
        self.to_string()
    }

    #[cfg(feature = "selftest")]
    fn self_check(&self) {
        for c in [Cell::White, Cell::Black, Cell::Arrow] {
            let mut expected: Vec<_> = self.squares().filter(|&sq| self.get(sq) == c).collect();
            let mut actual = self.pieces(c).to_vec();
            expected.sort();
            actual.sort();
            assert_eq!(expected, actual, "position list for {:?} diverged from the grid", c);
        }
    }

    #[cfg(not(feature = "selftest"))]
    #[inline]
    fn self_check(&self) {}
}

impl PartialEq for Board {
    #[inline]
    fn eq(&self, other: &Board) -> bool {
        self.size == other.size && self.cells == other.cells
    }
}

impl Eq for Board {}

impl Hash for Board {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        self.cells.hash(state);
    }
}

fn parse_row(row_idx: usize, row: &str, cells: &mut Vec<Cell>) -> Result<usize, LayoutParseError> {
    let mut width = 0_usize;
    let mut run = 0_usize;
    for ch in row.chars() {
        if let Some(digit) = ch.to_digit(10) {
            run = run.saturating_mul(10).saturating_add(digit as usize);
            continue;
        }
        let cell = match ch {
            'w' | 'b' | 'x' => Cell::from_char(ch),
            _ => None,
        }
        .ok_or(LayoutParseError::UnexpectedChar { row: row_idx, ch })?;
        width = width.saturating_add(run).saturating_add(1);
        if width > Size::MAX {
            return Err(LayoutParseError::TooManyCols);
        }
        cells.extend(std::iter::repeat(Cell::Empty).take(run));
        cells.push(cell);
        run = 0;
    }
    width = width.saturating_add(run);
    if width > Size::MAX {
        return Err(LayoutParseError::TooManyCols);
    }
    cells.extend(std::iter::repeat(Cell::Empty).take(run));
    if width == 0 {
        return Err(LayoutParseError::EmptyRow(row_idx));
    }
    Ok(width)
}

impl FromStr for Board {
    type Err = LayoutParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        type Error = LayoutParseError;

        let mut cells = Vec::new();
        let mut cols = 0;
        let mut rows = 0;
        for (row_idx, row) in s.split('/').enumerate() {
            if row_idx >= Size::MAX {
                return Err(Error::TooManyRows);
            }
            let width = parse_row(row_idx, row, &mut cells)?;
            if row_idx == 0 {
                cols = width;
            } else if width != cols {
                return Err(Error::RowWidthMismatch {
                    row: row_idx,
                    expected: cols,
                    actual: width,
                });
            }
            rows += 1;
        }

        // Both dimensions were checked above, so this cannot fail
        let size = Size::new(rows, cols).map_err(|_| Error::TooManyRows)?;
        let mut board = Board::from_size(size);
        for (idx, cell) in cells.into_iter().enumerate() {
            if cell.is_occupied() {
                board.put(size.square_at(idx), cell);
            }
        }
        Ok(board)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (row_idx, row) in self.cells.chunks(self.cols()).enumerate() {
            if row_idx != 0 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for cell in row {
                if cell.is_empty() {
                    empty += 1;
                    continue;
                }
                if empty != 0 {
                    write!(f, "{}", empty)?;
                    empty = 0;
                }
                write!(f, "{}", cell)?;
            }
            if empty != 0 {
                write!(f, "{}", empty)?;
            }
        }
        Ok(())
    }
}
