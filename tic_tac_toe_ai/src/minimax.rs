use engine::{Board, Mark, Move, Outcome};
use log::trace;

/// Score of a win found right after the root move.
const WIN_SCORE: i32 = 10;

/// Exhaustive minimax search. X is the maximizing side, O the minimizing one.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinimaxAgent;

impl MinimaxAgent {
    pub fn new() -> Self {
        Self
    }

    /// Best move for X. `None` if the board is already decided.
    pub fn best_move(&self, board: &Board) -> Option<Move> {
        self.best_move_for(board, Mark::X)
    }

    /// Best move for `mark`: the highest scoring child for X, the lowest for O.
    /// Ties keep the first move in [`Board::available_moves`] order.
    pub fn best_move_for(&self, board: &Board, mark: Mark) -> Option<Move> {
        if board.check_winner().is_some() {
            return None;
        }
        let maximizing = mark == Mark::X;
        let mut scratch = board.clone();
        let mut nodes = 0usize;
        let mut best: Option<(Move, i32)> = None;
        for mv in board.available_moves() {
            scratch.make_move(mv, mark);
            let score = minimax(&mut scratch, 0, !maximizing, &mut nodes);
            scratch.clear(mv);

            let improves = match best {
                None => true,
                Some((_, best_score)) if maximizing => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if improves {
                best = Some((mv, score));
            }
        }
        trace!("minimax for {} visited {} nodes, best: {:?}", mark, nodes, best);
        best.map(|(mv, _)| mv)
    }
}

fn minimax(board: &mut Board, depth: i32, is_max: bool, nodes: &mut usize) -> i32 {
    *nodes += 1;
    match board.check_winner() {
        Some(Outcome::Win(Mark::X)) => return WIN_SCORE - depth,
        Some(Outcome::Win(Mark::O)) => return depth - WIN_SCORE,
        Some(Outcome::Draw) => return 0,
        None => {}
    }

    let mark = if is_max { Mark::X } else { Mark::O };
    let mut best_score = if is_max { i32::MIN } else { i32::MAX };
    for mv in board.available_moves() {
        board.make_move(mv, mark);
        let score = minimax(board, depth + 1, !is_max, nodes);
        board.clear(mv);
        best_score = if is_max {
            best_score.max(score)
        } else {
            best_score.min(score)
        };
    }
    best_score
}

#[cfg(test)]
mod test {
    use super::*;
    use engine::CENTER;

    fn corners() -> [Move; 4] {
        [
            Move::new(0, 0),
            Move::new(0, 2),
            Move::new(2, 0),
            Move::new(2, 2),
        ]
    }

    #[test]
    fn test_opening_is_corner_or_center() {
        let mv = MinimaxAgent::new().best_move(&Board::new()).unwrap();
        assert!(mv == CENTER || corners().contains(&mv), "unexpected opening {}", mv);
    }

    #[test]
    fn test_terminal_board_has_no_move() {
        let won = Board::from_values([[1, 1, 1], [-1, -1, 0], [0, 0, 0]]).unwrap();
        assert_eq!(MinimaxAgent::new().best_move(&won), None);
        let drawn = Board::from_values([[1, -1, 1], [1, -1, -1], [-1, 1, 1]]).unwrap();
        assert_eq!(MinimaxAgent::new().best_move(&drawn), None);
    }

    #[test]
    fn test_takes_immediate_win() {
        let board = Board::from_values([[1, 1, 0], [-1, -1, 0], [0, 0, 0]]).unwrap();
        assert_eq!(MinimaxAgent::new().best_move(&board), Some(Move::new(0, 2)));
    }

    #[test]
    fn test_equal_wins_keep_first_move() {
        // both (1, 2) and (2, 0) win at once
        let board = Board::from_values([[1, -1, -1], [1, 1, 0], [0, 0, -1]]).unwrap();
        assert_eq!(MinimaxAgent::new().best_move(&board), Some(Move::new(1, 2)));
    }

    #[test]
    fn test_prefers_faster_win() {
        // (2, 2) wins at once, the moves scanned before it score lower
        let board = Board::from_values([[1, -1, 0], [0, 1, -1], [0, 0, 0]]).unwrap();
        let mv = MinimaxAgent::new().best_move(&board);
        assert_eq!(mv, Some(Move::new(2, 2)));
    }

    #[test]
    fn test_o_blocks() {
        let board = Board::from_values([[1, 0, 0], [0, 1, 0], [0, 0, 0]]).unwrap();
        let mv = MinimaxAgent::new().best_move_for(&board, Mark::O);
        assert_eq!(mv, Some(Move::new(2, 2)));
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let board = Board::from_values([[1, 0, 0], [0, -1, 0], [0, 0, 0]]).unwrap();
        let copy = board.clone();
        MinimaxAgent::new().best_move(&board);
        assert_eq!(board, copy);
    }
}
