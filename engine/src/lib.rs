pub mod board;
pub mod error;
pub mod game;
pub mod grid;

pub use board::{Board, Mark, Move, Moves, Outcome, StateKey, BOARD_SIZE, CELL_COUNT, CENTER};
pub use error::GameError;
pub use game::{GameState, TicTacToe};

pub type GameResult<T> = Result<T, GameError>;
