extern crate tic_tac_toe_engine;

use tic_tac_toe_engine::{Mark, Move, TicTacToe};

fn main() {
    let mut ttt = TicTacToe::new(Mark::X);

    for (row, col) in [(1, 1), (1, 2), (2, 2), (0, 0), (2, 1), (0, 1), (2, 0)] {
        let Some(mark) = ttt.current() else {
            break;
        };
        let state = ttt.update(mark, Move::new(row, col)).unwrap();
        println!("{}\n{:?}\n", ttt.board(), state);
    }
}
