//! Structured game state
//!
//! [`GameState`] is an alternative to notation for callers which keep the game state in their own
//! structures, e.g. a UI holding lists of piece positions.

use crate::board::Board;
use crate::engine::{self, Engine};
use crate::types::{Cell, Color, Size, Square};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error converting [`GameState`] into [`Engine`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum GameStateError {
    /// Square doesn't fit into the board
    #[error("square {0} is outside of the board")]
    SquareOutOfRange(Square),
    /// Square is listed more than once
    #[error("square {0} is occupied more than once")]
    DuplicateSquare(Square),
    /// Invalid state
    #[error("invalid state: {0}")]
    Engine(#[from] engine::StateError),
}

/// Positions of all the pieces on the board
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pieces {
    /// White queens
    #[cfg_attr(feature = "serde", serde(rename = "w"))]
    pub white: Vec<Square>,
    /// Black queens
    #[cfg_attr(feature = "serde", serde(rename = "b"))]
    pub black: Vec<Square>,
    /// Arrows
    #[cfg_attr(feature = "serde", serde(rename = "x"))]
    pub arrows: Vec<Square>,
}

impl Pieces {
    fn iter(&self) -> impl Iterator<Item = (Square, Cell)> + '_ {
        self.white
            .iter()
            .map(|&sq| (sq, Cell::White))
            .chain(self.black.iter().map(|&sq| (sq, Cell::Black)))
            .chain(self.arrows.iter().map(|&sq| (sq, Cell::Arrow)))
    }
}

/// Full game state in structured form
///
/// Can be converted into [`Engine`] via [`Engine::from_state()`] or `TryFrom`, and obtained back via
/// [`Engine::state()`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameState {
    /// Board size
    pub size: Size,
    /// Positions of pieces
    pub pieces: Pieces,
    /// Side to move
    pub turn: Color,
    /// Square of the queen which must shoot, if any
    #[cfg_attr(feature = "serde", serde(rename = "shooting_sq"))]
    pub shooting: Option<Square>,
    /// Move number
    #[cfg_attr(feature = "serde", serde(default = "default_move_num"))]
    pub move_num: u32,
}

#[cfg(feature = "serde")]
fn default_move_num() -> u32 {
    1
}

impl Board {
    /// Creates a board of size `size` with the given pieces
    pub fn from_pieces(size: Size, pieces: &Pieces) -> Result<Board, GameStateError> {
        let mut board = Board::from_size(size);
        for (sq, cell) in pieces.iter() {
            if !size.contains(sq) {
                return Err(GameStateError::SquareOutOfRange(sq));
            }
            if board.put(sq, cell).is_occupied() {
                return Err(GameStateError::DuplicateSquare(sq));
            }
        }
        Ok(board)
    }

    /// Returns the positions of all the pieces on the board
    pub fn to_pieces(&self) -> Pieces {
        Pieces {
            white: self.queens(Color::White).to_vec(),
            black: self.queens(Color::Black).to_vec(),
            arrows: self.arrows().to_vec(),
        }
    }
}

impl Engine {
    /// Creates an engine from the structured state
    pub fn from_state(state: &GameState) -> Result<Engine, GameStateError> {
        let board = Board::from_pieces(state.size, &state.pieces)?;
        Ok(Engine::new(board, state.turn, state.shooting, state.move_num)?)
    }

    /// Returns the current state in structured form
    ///
    /// The history is not included.
    pub fn state(&self) -> GameState {
        GameState {
            size: self.board().size(),
            pieces: self.board().to_pieces(),
            turn: self.turn(),
            shooting: self.shooting(),
            move_num: self.move_num(),
        }
    }
}

impl TryFrom<GameState> for Engine {
    type Error = GameStateError;

    fn try_from(state: GameState) -> Result<Engine, GameStateError> {
        Engine::from_state(&state)
    }
}

impl TryFrom<&GameState> for Engine {
    type Error = GameStateError;

    fn try_from(state: &GameState) -> Result<Engine, GameStateError> {
        Engine::from_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sq(s: &str) -> Square {
        Square::from_str(s).unwrap()
    }

    fn squares(list: &[&str]) -> Vec<Square> {
        list.iter().map(|s| sq(s)).collect()
    }

    fn sample() -> GameState {
        GameState {
            size: Size::new(8, 10).unwrap(),
            pieces: Pieces {
                white: squares(&["a1"]),
                black: squares(&["b3"]),
                arrows: squares(&["c5"]),
            },
            turn: Color::Black,
            shooting: Some(sq("b3")),
            move_num: 5,
        }
    }

    #[test]
    fn test_valid() {
        let engine = Engine::from_state(&sample()).unwrap();
        assert_eq!(engine.as_fen(), "10/10/10/2x7/10/1b8/10/w9 b b3 5");
        assert_eq!(engine.state(), sample());

        let mut state = sample();
        state.shooting = None;
        let engine: Engine = state.clone().try_into().unwrap();
        assert_eq!(engine.shooting(), None);
        assert_eq!(engine.state(), state);
    }

    #[test]
    fn test_bad_squares() {
        let mut state = sample();
        state.pieces.black = squares(&["a2", "k1"]);
        assert_eq!(
            Engine::from_state(&state),
            Err(GameStateError::SquareOutOfRange(sq("k1")))
        );

        let mut state = sample();
        state.pieces.black = squares(&["a2", "b3"]);
        state.pieces.arrows = squares(&["c2", "b3"]);
        assert_eq!(
            Engine::from_state(&state),
            Err(GameStateError::DuplicateSquare(sq("b3")))
        );

        let mut state = sample();
        state.pieces.arrows = squares(&["a3", "a3"]);
        assert_eq!(
            Engine::from_state(&state),
            Err(GameStateError::DuplicateSquare(sq("a3")))
        );
    }

    #[test]
    fn test_bad_shooting() {
        let mut state = sample();
        state.shooting = Some(sq("a2"));
        assert_eq!(
            Engine::from_state(&state),
            Err(GameStateError::Engine(engine::StateError::InvalidShootingSquare(sq("a2"))))
        );

        state.shooting = Some(sq("a1"));
        assert_eq!(
            Engine::from_state(&state),
            Err(GameStateError::Engine(engine::StateError::InvalidShootingSquare(sq("a1"))))
        );

        state.shooting = Some(sq("a9"));
        assert_eq!(
            Engine::from_state(&state),
            Err(GameStateError::Engine(engine::StateError::ShootingOutOfRange(sq("a9"))))
        );
    }

    #[test]
    fn test_bad_move_num() {
        let mut state = sample();
        state.move_num = 0;
        assert_eq!(
            Engine::from_state(&state),
            Err(GameStateError::Engine(engine::StateError::ZeroMoveNumber))
        );
    }

    #[test]
    fn test_from_fen_matches() {
        let engine = Engine::from_fen("w1/1b w - 1").unwrap();
        let state = engine.state();
        assert_eq!(state.size, Size::new(2, 2).unwrap());
        assert_eq!(state.pieces.white, squares(&["a2"]));
        assert_eq!(state.pieces.black, squares(&["b1"]));
        assert!(state.pieces.arrows.is_empty());
        assert_eq!(Engine::from_state(&state).unwrap(), engine);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() {
        let json = r#"{
            "size": {"rows": 8, "cols": 10},
            "pieces": {"w": ["a1"], "b": ["b3"], "x": ["c5"]},
            "turn": "b",
            "shooting_sq": "b3",
            "move_num": 5
        }"#;
        let state: GameState = serde_json::from_str(json).unwrap();
        assert_eq!(state, sample());
        let back: GameState = serde_json::from_str(&serde_json::to_string(&state).unwrap()).unwrap();
        assert_eq!(back, state);

        let bad = r#"{"size": {"rows": 21, "cols": 10}, "pieces": {"w": [], "b": [], "x": []}, "turn": "w", "shooting_sq": null}"#;
        assert!(serde_json::from_str::<GameState>(bad).is_err());

        let bad = r#"{"size": {"rows": 8, "cols": 10}, "pieces": {"w": ["a0"], "b": [], "x": []}, "turn": "w", "shooting_sq": null}"#;
        assert!(serde_json::from_str::<GameState>(bad).is_err());
        let bad = r#"{"size": {"rows": 8, "cols": 10}, "pieces": {"w": [{"file": 0, "rank": 0}], "b": [], "x": []}, "turn": "w", "shooting_sq": null}"#;
        assert!(serde_json::from_str::<GameState>(bad).is_err());
    }
}
