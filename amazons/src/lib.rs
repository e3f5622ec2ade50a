//! # Game of the Amazons
//!
//! State engine for the Game of the Amazons on rectangular boards up to 20x20. It keeps the board,
//! the side to move and the move history, generates legal moves, and reads and writes positions
//! in a compact text notation.
//!
//! ```
//! use amazons::{Color, Engine};
//!
//! let mut engine = Engine::initial(10).unwrap();
//! engine.push_str("d1-d7-g7").unwrap();
//! assert_eq!(engine.turn(), Color::Black);
//! assert_eq!(engine.undo().unwrap().to_string(), "d1-d7-g7");
//! assert_eq!(engine.as_fen(), amazons::engine::DEFAULT_10);
//! ```

pub mod board;
pub mod engine;
pub mod movegen;
pub mod moves;
pub mod state;

pub use amazons_base::{geometry, types};

pub use board::Board;
pub use engine::Engine;
pub use geometry::Direction;
pub use movegen::{MoveList, Vision};
pub use moves::Move;
pub use state::{GameState, Pieces};
pub use types::{Cell, Color, File, Rank, Size, Square, SquareColor};
