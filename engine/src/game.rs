use log::debug;

use crate::board::{Board, Mark, Move, Outcome};
use crate::error::GameError;
use crate::GameResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Turn(Mark),
    Finished(Outcome),
}

/// A board together with the turn order.
#[derive(Clone, Debug)]
pub struct TicTacToe {
    board: Board,
    state: GameState,
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new(Mark::X)
    }
}

impl TicTacToe {
    pub fn new(first: Mark) -> Self {
        Self {
            board: Board::new(),
            state: GameState::Turn(first),
        }
    }

    /// Clears the board and gives the turn to `first`.
    pub fn reset(&mut self, first: Mark) {
        self.board.reset();
        self.state = GameState::Turn(first);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, GameState::Finished(_))
    }

    /// Mark whose turn it is, `None` once the game is finished.
    pub fn current(&self) -> Option<Mark> {
        match self.state {
            GameState::Turn(mark) => Some(mark),
            GameState::Finished(_) => None,
        }
    }

    pub fn update(&mut self, mark: Mark, mv: Move) -> GameResult<GameState> {
        let current = match self.state {
            GameState::Finished(_) => return Err(GameError::GameIsFinished),
            GameState::Turn(current) => current,
        };
        if mark != current {
            return Err(GameError::not_your_turn(current, mark));
        }
        if self.board.get(mv).is_some() {
            return Err(GameError::cell_is_occupied(mv.row(), mv.col()));
        }
        self.board.make_move(mv, mark);
        debug!("{} played {}", mark, mv);

        self.update_state(mark)
    }

    fn update_state(&mut self, last: Mark) -> GameResult<GameState> {
        self.state = match self.board.check_winner() {
            Some(outcome) => GameState::Finished(outcome),
            None => GameState::Turn(last.opponent()),
        };
        Ok(self.state)
    }
}
