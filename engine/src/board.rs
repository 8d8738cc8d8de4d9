use std::fmt::{Display, Formatter};

use generic_array::typenum::U3;
use smallvec::SmallVec;

use crate::error::GameError;
use crate::grid::{Grid, GridIndex};
use crate::GameResult;

pub const BOARD_SIZE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Cell coordinates, `(row, col)`.
pub type Move = GridIndex;
pub type Moves = SmallVec<[Move; CELL_COUNT]>;

pub const CENTER: Move = Move::new(1, 1);

/// Rows, columns, main diagonal, anti-diagonal.
const LINES: [[Move; 3]; 8] = [
    [Move::new(0, 0), Move::new(0, 1), Move::new(0, 2)],
    [Move::new(1, 0), Move::new(1, 1), Move::new(1, 2)],
    [Move::new(2, 0), Move::new(2, 1), Move::new(2, 2)],
    [Move::new(0, 0), Move::new(1, 0), Move::new(2, 0)],
    [Move::new(0, 1), Move::new(1, 1), Move::new(2, 1)],
    [Move::new(0, 2), Move::new(1, 2), Move::new(2, 2)],
    [Move::new(0, 0), Move::new(1, 1), Move::new(2, 2)],
    [Move::new(0, 2), Move::new(1, 1), Move::new(2, 0)],
];

fn index_to_move(index: usize) -> Move {
    Move::new(index / BOARD_SIZE, index % BOARD_SIZE)
}

impl TryFrom<(usize, usize)> for GridIndex {
    type Error = GameError;

    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        let index = Self::new(row, col);
        if Cells::contains(index) {
            return Ok(index);
        }
        if row >= Cells::rows() {
            return Err(GameError::InvalidRow {
                max_expected: Cells::rows() - 1,
                found: row,
            });
        }
        Err(GameError::InvalidCol {
            max_expected: Cells::cols() - 1,
            found: col,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// `+1` for X, `-1` for O.
    pub fn value(self) -> i8 {
        match self {
            Mark::X => 1,
            Mark::O => -1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Maps a raw cell value to a mark, `0` being an empty cell.
    pub fn from_value(value: i8) -> GameResult<Option<Self>> {
        match value {
            1 => Ok(Some(Mark::X)),
            -1 => Ok(Some(Mark::O)),
            0 => Ok(None),
            _ => Err(GameError::InvalidCellValue(value)),
        }
    }
}

impl Display for Mark {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win(Mark),
    Draw,
}

impl Outcome {
    /// `+1` or `-1` for the winner's mark, `0` for a draw.
    pub fn value(self) -> i8 {
        match self {
            Outcome::Win(mark) => mark.value(),
            Outcome::Draw => 0,
        }
    }

    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::Win(mark) => Some(mark),
            Outcome::Draw => None,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win(mark) => write!(f, "{} wins", mark),
            Outcome::Draw => f.write_str("Draw"),
        }
    }
}

/// Immutable row-major snapshot of the board, used as a lookup key for learned values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateKey([i8; CELL_COUNT]);

impl StateKey {
    pub fn values(&self) -> &[i8; CELL_COUNT] {
        &self.0
    }

    /// Empty cells of this state in row-major order.
    pub fn available_moves(&self) -> Moves {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, value)| **value == 0)
            .map(|(index, _)| index_to_move(index))
            .collect()
    }
}

impl TryFrom<[i8; CELL_COUNT]> for StateKey {
    type Error = GameError;

    fn try_from(values: [i8; CELL_COUNT]) -> Result<Self, Self::Error> {
        for value in values {
            Mark::from_value(value)?;
        }
        Ok(Self(values))
    }
}

impl From<&Board> for StateKey {
    fn from(board: &Board) -> Self {
        let mut values = [0; CELL_COUNT];
        for ((_, cell), value) in board.cells.all_indexed().zip(values.iter_mut()) {
            *value = cell.map_or(0, Mark::value);
        }
        Self(values)
    }
}

type Cells = Grid<Option<Mark>, U3, U3>;

/// 3x3 tic-tac-toe board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: Cells,
}

impl From<StateKey> for Board {
    fn from(key: StateKey) -> Self {
        let mut board = Board::new();
        for (index, value) in key.0.into_iter().enumerate() {
            // values were validated when the key was built
            if let Ok(Some(mark)) = Mark::from_value(value) {
                board.make_move(index_to_move(index), mark);
            }
        }
        board
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board out of raw `{-1, 0, 1}` values given row by row.
    pub fn from_values(values: [[i8; BOARD_SIZE]; BOARD_SIZE]) -> GameResult<Self> {
        let mut board = Board::new();
        for (row, cols) in values.into_iter().enumerate() {
            for (col, value) in cols.into_iter().enumerate() {
                if let Some(mark) = Mark::from_value(value)? {
                    board.make_move(Move::new(row, col), mark);
                }
            }
        }
        Ok(board)
    }

    /// Clears all cells.
    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    pub fn get(&self, mv: Move) -> Option<Mark> {
        self.cells[mv]
    }

    /// Returns empty cells scanning rows top-to-bottom, then columns left-to-right.
    pub fn available_moves(&self) -> Moves {
        self.cells
            .all_indexed()
            .filter_map(|(index, cell)| if cell.is_none() { Some(index) } else { None })
            .collect()
    }

    /// Puts `mark` into the cell at `mv`.
    ///
    /// The cell must be empty. Occupancy is only asserted in debug builds,
    /// use [`crate::TicTacToe::update`] for a checked turn.
    pub fn make_move(&mut self, mv: Move, mark: Mark) {
        debug_assert!(self.cells[mv].is_none(), "cell {} is occupied", mv);
        self.cells[mv] = Some(mark);
    }

    /// Empties the cell at `mv`.
    pub fn clear(&mut self, mv: Move) {
        self.cells[mv] = None;
    }

    /// Returns the winner if any line is complete, [`Outcome::Draw`] if the board is full
    /// and `None` while the game goes on.
    pub fn check_winner(&self) -> Option<Outcome> {
        if let Some(mark) = LINES.iter().find_map(|line| self.line_owner(line)) {
            return Some(Outcome::Win(mark));
        }
        if self.is_full() {
            return Some(Outcome::Draw);
        }
        None
    }

    /// Returns `true` if `mark` holds any complete line.
    pub fn is_winner(&self, mark: Mark) -> bool {
        LINES
            .iter()
            .any(|line| self.line_owner(line) == Some(mark))
    }

    /// Number of lines where `mark` holds two cells and the third one is empty.
    pub fn count_threats(&self, mark: Mark) -> usize {
        LINES
            .iter()
            .filter(|line| {
                let owned = line.iter().filter(|&&mv| self.get(mv) == Some(mark)).count();
                let empty = line.iter().filter(|&&mv| self.get(mv).is_none()).count();
                owned == 2 && empty == 1
            })
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.all_indexed().all(|(_, cell)| cell.is_some())
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .all_indexed()
            .filter(|(_, cell)| **cell == Some(mark))
            .count()
    }

    pub fn state_key(&self) -> StateKey {
        StateKey::from(self)
    }

    fn line_owner(&self, line: &[Move; 3]) -> Option<Mark> {
        let first = self.get(line[0])?;
        if line[1..].iter().all(|&mv| self.get(mv) == Some(first)) {
            Some(first)
        } else {
            None
        }
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, cell) in self.cells.all_indexed() {
            if index.col() > 0 {
                f.write_str(" ")?;
            } else if index.row() > 0 {
                f.write_str("\n")?;
            }
            match cell {
                Some(mark) => write!(f, "{}", mark)?,
                None => f.write_str(".")?,
            }
        }
        Ok(())
    }
}
