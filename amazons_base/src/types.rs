use derive_more::Display;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SquareParseError {
    #[error("unexpected file char {0:?}")]
    UnexpectedFileChar(char),
    #[error("unexpected rank char {0:?}")]
    UnexpectedRankChar(char),
    #[error("rank {0} is out of range")]
    RankOutOfRange(u32),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellParseError {
    #[error("unexpected cell char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("unexpected color char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SizeError {
    #[error("board must have at least one row and one column")]
    Empty,
    #[error("board must have at most {max} rows", max = Size::MAX)]
    TooManyRows,
    #[error("board must have at most {max} columns", max = Size::MAX)]
    TooManyCols,
}

/// Board column, from `a` (leftmost) to `t`
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct File(u8);

impl File {
    pub const COUNT: usize = Size::MAX;

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < Self::COUNT, "file index must be between 0 and 19");
        File(val as u8)
    }

    pub const fn try_from_index(val: usize) -> Option<Self> {
        if val < Self::COUNT {
            Some(File(val as u8))
        } else {
            None
        }
    }

    /// Iterates over the first `count` files, from left to right
    pub fn iter(count: usize) -> impl Iterator<Item = Self> {
        (0..count.min(Self::COUNT)).map(|x| File(x as u8))
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='t' => Some(File((u32::from(c) - u32::from('a')) as u8)),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'a' + self.0) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Board row, numbered from `1` at the bottom up to `20`
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Rank(u8);

impl Rank {
    pub const COUNT: usize = Size::MAX;

    /// Returns the row number as written in notation (i.e. `1` for the bottom row)
    pub const fn number(&self) -> usize {
        self.0 as usize
    }

    pub const fn from_number(val: usize) -> Self {
        assert!(val >= 1 && val <= Self::COUNT, "rank must be between 1 and 20");
        Rank(val as u8)
    }

    pub const fn try_from_number(val: usize) -> Option<Self> {
        if val >= 1 && val <= Self::COUNT {
            Some(Rank(val as u8))
        } else {
            None
        }
    }

    /// Iterates over the first `count` ranks, from the top one (i.e. `count`) down to `1`
    pub fn iter_top_down(count: usize) -> impl Iterator<Item = Self> {
        (1..=count.min(Self::COUNT)).rev().map(|x| Rank(x as u8))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// Color of a square, as on a checkered board
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SquareColor {
    /// `b1` and `a2` are light squares
    #[display(fmt = "light")]
    Light,
    /// `a1` and `b2` are dark squares
    #[display(fmt = "dark")]
    Dark,
}

/// Square reference, such as `a1` or `t20`
///
/// A square does not know the size of the board it belongs to. Checking whether
/// it fits into a particular board is done with [`Size::contains()`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub struct Square {
    file: File,
    rank: Rank,
}

impl Square {
    pub const fn from_parts(file: File, rank: Rank) -> Square {
        Square { file, rank }
    }

    pub const fn file(&self) -> File {
        self.file
    }

    pub const fn rank(&self) -> Rank {
        self.rank
    }

    pub const fn color(&self) -> SquareColor {
        if (self.file.index() + self.rank.number()) % 2 == 1 {
            SquareColor::Dark
        } else {
            SquareColor::Light
        }
    }

    /// Returns the square shifted by `delta_file` columns to the right and `delta_rank` rows up
    ///
    /// Only the absolute limits of notation are checked here, so the returned square may still
    /// lie outside of a smaller board.
    pub fn try_shift(self, delta_file: isize, delta_rank: isize) -> Option<Square> {
        let file = self.file.index().wrapping_add(delta_file as usize);
        let rank = self.rank.number().wrapping_add(delta_rank as usize);
        Some(Square::from_parts(
            File::try_from_index(file)?,
            Rank::try_from_number(rank)?,
        ))
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Square({})", self)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.file, self.rank)
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !(2..=3).contains(&s.len()) || !s.is_ascii() {
            return Err(SquareParseError::BadLength);
        }
        let bytes = s.as_bytes();
        let file_ch = bytes[0] as char;
        let file = File::from_char(file_ch).ok_or(SquareParseError::UnexpectedFileChar(file_ch))?;
        if bytes[1] == b'0' {
            return Err(SquareParseError::UnexpectedRankChar('0'));
        }
        let mut rank = 0_u32;
        for &b in &bytes[1..] {
            if !b.is_ascii_digit() {
                return Err(SquareParseError::UnexpectedRankChar(b as char));
            }
            rank = rank * 10 + u32::from(b - b'0');
        }
        let rank = Rank::try_from_number(rank as usize).ok_or(SquareParseError::RankOutOfRange(rank))?;
        Ok(Square::from_parts(file, rank))
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> String {
        sq.to_string()
    }
}

impl TryFrom<String> for Square {
    type Error = SquareParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Square::from_str(&s)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    #[cfg_attr(feature = "serde", serde(rename = "w"))]
    White = 0,
    #[cfg_attr(feature = "serde", serde(rename = "b"))]
    Black = 1,
}

impl Color {
    pub const fn inv(&self) -> Color {
        match *self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn as_char(&self) -> char {
        match *self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Color::from_char(ch).ok_or(ColorParseError::UnexpectedChar(ch)),
            _ => Err(ColorParseError::BadLength),
        }
    }
}

/// Contents of a single square
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    /// White queen
    White = 1,
    /// Black queen
    Black = 2,
    /// Square destroyed by an arrow
    Arrow = 3,
}

impl Cell {
    /// Number of non-empty cell kinds
    pub const OCCUPIED_COUNT: usize = 3;

    pub const fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub const fn is_occupied(&self) -> bool {
        !self.is_empty()
    }

    pub const fn queen(c: Color) -> Cell {
        match c {
            Color::White => Cell::White,
            Color::Black => Cell::Black,
        }
    }

    /// Returns the owner of the queen in this cell, or `None` for empty cells and arrows
    pub const fn color(&self) -> Option<Color> {
        match self {
            Cell::White => Some(Color::White),
            Cell::Black => Some(Color::Black),
            Cell::Empty | Cell::Arrow => None,
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        [Cell::Empty, Cell::White, Cell::Black, Cell::Arrow].into_iter()
    }

    /// Returns the character used for this cell in the layout field
    ///
    /// Empty cells are run-length encoded in layouts, so `.` is returned for them.
    pub fn as_char(&self) -> char {
        b".wbx"[*self as usize] as char
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Cell::Empty),
            'w' => Some(Cell::White),
            'b' => Some(Cell::Black),
            'x' => Some(Cell::Arrow),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Cell {
    type Err = CellParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Cell::from_char(ch).ok_or(CellParseError::UnexpectedChar(ch)),
            _ => Err(CellParseError::BadLength),
        }
    }
}

/// Board dimensions
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash)]
#[display(fmt = "{}x{}", rows, cols)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSize"))]
pub struct Size {
    rows: u8,
    cols: u8,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawSize {
    rows: usize,
    cols: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSize> for Size {
    type Error = SizeError;

    fn try_from(raw: RawSize) -> Result<Self, Self::Error> {
        Size::new(raw.rows, raw.cols)
    }
}

impl Size {
    /// Maximum number of rows and columns
    pub const MAX: usize = 20;

    pub fn new(rows: usize, cols: usize) -> Result<Size, SizeError> {
        if rows == 0 || cols == 0 {
            return Err(SizeError::Empty);
        }
        if rows > Self::MAX {
            return Err(SizeError::TooManyRows);
        }
        if cols > Self::MAX {
            return Err(SizeError::TooManyCols);
        }
        Ok(Size {
            rows: rows as u8,
            cols: cols as u8,
        })
    }

    pub const fn square(side: usize) -> Size {
        assert!(side >= 1 && side <= Self::MAX, "board side must be between 1 and 20");
        Size {
            rows: side as u8,
            cols: side as u8,
        }
    }

    pub const fn rows(&self) -> usize {
        self.rows as usize
    }

    pub const fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Total number of squares
    pub const fn area(&self) -> usize {
        self.rows() * self.cols()
    }

    pub const fn contains(&self, sq: Square) -> bool {
        sq.file().index() < self.cols() && sq.rank().number() <= self.rows()
    }

    /// Top right square of the board
    pub const fn max_square(&self) -> Square {
        Square::from_parts(File::from_index(self.cols() - 1), Rank::from_number(self.rows()))
    }

    /// Converts the square into its grid index
    ///
    /// Grid rows are stored top row first, so the square with rank `n` lies in grid row `rows - n`.
    /// The square must be inside the board.
    pub const fn index_of(&self, sq: Square) -> usize {
        (self.rows() - sq.rank().number()) * self.cols() + sq.file().index()
    }

    /// Inverse of [`Size::index_of()`]
    pub const fn square_at(&self, idx: usize) -> Square {
        let row = idx / self.cols();
        let col = idx % self.cols();
        Square::from_parts(File::from_index(col), Rank::from_number(self.rows() - row))
    }

    /// Iterates over all the squares, row by row from the top one, left to right within a row
    pub fn squares(&self) -> impl Iterator<Item = Square> {
        let size = *self;
        (0..size.area()).map(move |idx| size.square_at(idx))
    }
}
