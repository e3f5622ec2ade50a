//! Game state, move history and position notation

use crate::board::{Board, LayoutParseError};
use crate::movegen::{self, MoveList};
use crate::moves::{self, Move};
use crate::types::{Cell, Color, ColorParseError, Square, SquareParseError};

use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

/// Initial position on the 10x10 board
pub const DEFAULT_10: &str = "3b2b3/10/10/b8b/10/10/w8w/10/10/3w2w3 w - 1";
/// Initial position on the 8x8 board
pub const DEFAULT_8: &str = "2b2b2/8/b6b/8/8/w6w/8/2w2w2 w - 1";
/// Initial position on the 6x6 board
pub const DEFAULT_6: &str = "1b2b1/6/b4b/w4w/6/1w2w1 w - 1";

/// Error parsing [`Engine`] from notation
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum FenParseError {
    /// Notation doesn't have layout part
    #[error("layout not specified")]
    NoLayout,
    /// Error parsing layout
    #[error("bad layout: {0}")]
    Layout(#[from] LayoutParseError),
    /// Notation doesn't have turn part
    #[error("no turn")]
    NoTurn,
    /// Error parsing turn
    #[error("bad turn: {0}")]
    Turn(#[from] ColorParseError),
    /// Notation doesn't have shooting part
    #[error("no shooting square")]
    NoShooting,
    /// Error parsing shooting square
    #[error("bad shooting square: {0}")]
    Shooting(#[from] SquareParseError),
    /// Shooting square doesn't fit into the board
    #[error("shooting square {0} is outside of the board")]
    ShootingOutOfRange(Square),
    /// Shooting square doesn't contain a queen of the side to move
    #[error("shooting square {0} does not point to a queen of the side to move")]
    InvalidShootingSquare(Square),
    /// Notation doesn't have move number part
    #[error("no move number")]
    NoMoveNumber,
    /// Error parsing move number
    #[error("bad move number: {0}")]
    MoveNumber(ParseIntError),
    /// Move number is zero
    #[error("move number must be positive")]
    ZeroMoveNumber,
    /// Notation contains extra data
    #[error("extra data in notation")]
    ExtraData,
}

/// Error indicating that the move cannot be made in the current state
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// Move is not legal
    #[error("move {0} is not legal")]
    IllegalMove(Move),
}

/// Error parsing and making a move from string
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum MoveError {
    /// Move cannot be parsed
    #[error("cannot parse move: {0}")]
    Parse(#[from] moves::ParseError),
    /// Move is not legal
    #[error("{0}")]
    Validate(#[from] ValidateError),
}

/// Error indicating that the engine state is inconsistent
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum StateError {
    /// Shooting square doesn't fit into the board
    #[error("shooting square {0} is outside of the board")]
    ShootingOutOfRange(Square),
    /// Shooting square doesn't contain a queen of the side to move
    #[error("shooting square {0} does not point to a queen of the side to move")]
    InvalidShootingSquare(Square),
    /// Move number is zero
    #[error("move number must be positive")]
    ZeroMoveNumber,
}

/// Information required to revert a move
///
/// Contains the state fields just before the move was made.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct RawUndo {
    turn: Color,
    shooting: Option<Square>,
    move_num: u32,
}

/// Game engine
///
/// Owns the board and the rest of the game state, i.e. the side to move, the pending shot and
/// the move number. Also keeps the history of moves made, which allows to undo them.
///
/// The engine is a two-state machine. When no shot is pending, the side to move must make a
/// queen move ([`Move::Queen`] or [`Move::Full`]). After [`Move::Queen`], the moved queen must
/// shoot ([`Move::Shot`]), and only then the turn passes to the opponent.
///
/// Legal moves are regenerated once after every state change, so [`Engine::moves()`] is cheap.
#[derive(Debug, Clone)]
pub struct Engine {
    board: Board,
    turn: Color,
    shooting: Option<Square>,
    move_num: u32,
    history: Vec<(Move, RawUndo)>,
    moves: MoveList,
}

impl Engine {
    /// Creates an engine from its parts, checking that the parts are consistent
    pub fn new(
        board: Board,
        turn: Color,
        shooting: Option<Square>,
        move_num: u32,
    ) -> Result<Engine, StateError> {
        if move_num == 0 {
            return Err(StateError::ZeroMoveNumber);
        }
        if let Some(sq) = shooting {
            if !board.contains(sq) {
                return Err(StateError::ShootingOutOfRange(sq));
            }
            if board.get(sq) != Cell::queen(turn) {
                return Err(StateError::InvalidShootingSquare(sq));
            }
        }
        let mut res = Engine {
            board,
            turn,
            shooting,
            move_num,
            history: Vec::new(),
            moves: MoveList::new(),
        };
        res.regen_moves();
        Ok(res)
    }

    /// Returns the engine with the default position for the board of `side`x`side`
    ///
    /// Default positions exist for sizes 6, 8 and 10.
    pub fn initial(side: usize) -> Option<Engine> {
        let fen = match side {
            6 => DEFAULT_6,
            8 => DEFAULT_8,
            10 => DEFAULT_10,
            _ => return None,
        };
        Engine::from_fen(fen).ok()
    }

    /// Parses the engine state from notation
    ///
    /// Does the same as [`Engine::from_str`]. It is recommended to use this function instead of
    /// `from_str()` for better readability.
    pub fn from_fen(fen: &str) -> Result<Engine, FenParseError> {
        Engine::from_str(fen)
    }

    /// Returns the board
    ///
    /// Call `clone()` on the result to obtain a snapshot that outlives further moves.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the contents of the square `sq`
    #[inline]
    pub fn get(&self, sq: Square) -> Cell {
        self.board.get(sq)
    }

    /// Returns side to move
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the square of the queen which must shoot now, or `None` if a queen move is expected
    #[inline]
    pub fn shooting(&self) -> Option<Square> {
        self.shooting
    }

    /// Returns the move number
    ///
    /// Note that this is move number, not half-move number. It is incremented after each
    /// shot by Black, and never goes past `u32::MAX`.
    #[inline]
    pub fn move_num(&self) -> u32 {
        self.move_num
    }

    /// Returns all the legal moves
    ///
    /// If a shot is pending, only [`Move::Shot`]s are returned, otherwise only [`Move::Queen`]s.
    /// [`Move::Full`] moves are never returned, though they are accepted by [`Engine::push()`].
    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Returns `true` if the side to move has no legal moves, i.e. has lost
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns the winner if the game is over
    #[inline]
    pub fn winner(&self) -> Option<Color> {
        self.is_game_over().then(|| self.turn.inv())
    }

    /// Returns the moves made so far, oldest first
    pub fn history(&self) -> Vec<Move> {
        self.history.iter().map(|(m, _)| *m).collect()
    }

    /// Returns the number of entries in the move history
    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Returns the last entry of the move history
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|(m, _)| *m)
    }

    fn regen_moves(&mut self) {
        self.moves = movegen::gen_moves(&self.board, self.turn, self.shooting);
    }

    fn raw_undo(&self) -> RawUndo {
        RawUndo {
            turn: self.turn,
            shooting: self.shooting,
            move_num: self.move_num,
        }
    }

    fn do_queen(&mut self, from: Square, to: Square) {
        self.board.move_queen(from, to);
        self.shooting = Some(to);
    }

    fn do_shot(&mut self, at: Square) {
        self.board.put(at, Cell::Arrow);
        self.shooting = None;
        self.turn = self.turn.inv();
        if self.turn == Color::White {
            // Stays at the maximum, so the notation remains parseable
            self.move_num = self.move_num.saturating_add(1);
        }
    }

    /// Makes the move `mv` without checking its legality
    ///
    /// The move must be either one of [`Engine::moves()`], or a [`Move::Full`] whose both parts
    /// would be legal one after another. Otherwise, the state becomes inconsistent.
    ///
    /// The move is recorded in history as it was given, so a queen move followed by a shot
    /// makes two history entries, while the same [`Move::Full`] makes one.
    pub fn make_move(&mut self, mv: Move) {
        let undo = self.raw_undo();
        match mv {
            Move::Queen { from, to } => self.do_queen(from, to),
            Move::Shot { at } => self.do_shot(at),
            Move::Full { from, to, at } => {
                self.do_queen(from, to);
                self.do_shot(at);
            }
        }
        self.history.push((mv, undo));
        self.regen_moves();
    }

    /// Returns `Ok(())` if `mv` is legal in the current state
    pub fn validate(&self, mv: Move) -> Result<(), ValidateError> {
        let legal = match mv {
            Move::Queen { .. } | Move::Shot { .. } => self.moves.contains(&mv),
            Move::Full { from, to, at } => {
                self.moves.contains(&Move::Queen { from, to }) && {
                    let mut board = self.board.clone();
                    board.move_queen(from, to);
                    board.vision(to).contains(&at)
                }
            }
        };
        match legal {
            true => Ok(()),
            false => Err(ValidateError::IllegalMove(mv)),
        }
    }

    /// Checks that `mv` is legal and makes it
    pub fn push(&mut self, mv: Move) -> Result<(), ValidateError> {
        self.validate(mv)?;
        self.make_move(mv);
        Ok(())
    }

    /// Parses the move from string, checks that it's legal and makes it
    pub fn push_str(&mut self, s: &str) -> Result<(), MoveError> {
        let mv = Move::from_str(s)?;
        self.push(mv)?;
        Ok(())
    }

    fn unmake(&mut self, mv: Move, u: RawUndo) {
        match mv {
            Move::Queen { from, to } => self.board.move_queen(to, from),
            Move::Shot { at } => {
                self.board.remove(at);
            }
            Move::Full { from, to, at } => {
                self.board.remove(at);
                self.board.move_queen(to, from);
            }
        }
        self.turn = u.turn;
        self.shooting = u.shooting;
        self.move_num = u.move_num;
    }

    /// Reverts the last history entry and returns it
    ///
    /// Returns `None` if the history is empty. Entries made before the engine was created cannot
    /// be undone.
    pub fn undo(&mut self) -> Option<Move> {
        let (mv, u) = self.history.pop()?;
        self.unmake(mv, u);
        self.regen_moves();
        Some(mv)
    }

    /// Reverts the last half of the last history entry and returns the reverted part
    ///
    /// For a [`Move::Full`], only the shot is reverted: the queen stays on its new square and must
    /// shoot again, while the queen move remains in history. Other entries have no smaller part,
    /// so they are reverted completely, as with [`Engine::undo()`].
    pub fn half_undo(&mut self) -> Option<Move> {
        match self.history.pop()? {
            (Move::Full { from, to, at }, u) => {
                self.board.remove(at);
                self.turn = u.turn;
                self.move_num = u.move_num;
                self.shooting = Some(to);
                self.history.push((Move::Queen { from, to }, u));
                self.regen_moves();
                Some(Move::Shot { at })
            }
            (mv, u) => {
                self.unmake(mv, u);
                self.regen_moves();
                Some(mv)
            }
        }
    }

    /// Converts the state into notation
    ///
    /// Does the same as `Engine::to_string()`. It is recommended to use this function instead of
    /// `to_string()` for better readability.
    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::from_fen(DEFAULT_10).expect("default position is valid")
    }
}

impl PartialEq for Engine {
    fn eq(&self, other: &Engine) -> bool {
        self.board == other.board
            && self.turn == other.turn
            && self.shooting == other.shooting
            && self.move_num == other.move_num
            && self.history == other.history
    }
}

impl Eq for Engine {}

impl FromStr for Engine {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Engine, Self::Err> {
        type Error = FenParseError;

        let mut iter = s.split_ascii_whitespace().fuse();

        let board = Board::from_layout(iter.next().ok_or(Error::NoLayout)?)?;
        let turn = Color::from_str(iter.next().ok_or(Error::NoTurn)?)?;
        let shooting = match iter.next().ok_or(Error::NoShooting)? {
            "-" => None,
            s => Some(Square::from_str(s)?),
        };
        let move_num = u32::from_str(iter.next().ok_or(Error::NoMoveNumber)?)
            .map_err(Error::MoveNumber)?;

        if iter.next().is_some() {
            return Err(Error::ExtraData);
        }

        Engine::new(board, turn, shooting, move_num).map_err(|e| match e {
            StateError::ShootingOutOfRange(sq) => Error::ShootingOutOfRange(sq),
            StateError::InvalidShootingSquare(sq) => Error::InvalidShootingSquare(sq),
            StateError::ZeroMoveNumber => Error::ZeroMoveNumber,
        })
    }
}

impl Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} {}", self.board, self.turn)?;
        match self.shooting {
            Some(sq) => write!(f, " {}", sq)?,
            None => write!(f, " -")?,
        };
        write!(f, " {}", self.move_num)
    }
}
