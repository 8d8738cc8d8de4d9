use crate::Mark;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum GameError {
    #[error("cell ({row}, {col}) is occupied")]
    CellIsOccupied { row: usize, col: usize },
    #[error("can't make turn on a finished game")]
    GameIsFinished,
    #[error("other player's turn (expected: {expected}, found: {found})")]
    NotYourTurn { expected: Mark, found: Mark },
    #[error("invalid row (expected: 0-{max_expected}, found: {found})")]
    InvalidRow { max_expected: usize, found: usize },
    #[error("invalid column (expected: 0-{max_expected}, found: {found})")]
    InvalidCol { max_expected: usize, found: usize },
    #[error("invalid cell value {0} (expected: -1, 0 or 1)")]
    InvalidCellValue(i8),
}

impl GameError {
    pub fn cell_is_occupied(row: usize, col: usize) -> Self {
        Self::CellIsOccupied { row, col }
    }

    pub fn not_your_turn(expected: Mark, found: Mark) -> Self {
        Self::NotYourTurn { expected, found }
    }
}
