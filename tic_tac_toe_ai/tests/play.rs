extern crate tic_tac_toe_ai;

use std::collections::HashSet;

use engine::{Board, Mark, Outcome, StateKey};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tic_tac_toe_ai::{AgentConfig, AgentKind, HybridAgent, MinimaxAgent};

/// Plays a full game and returns the outcome. `x` moves first.
fn play<X, O>(mut x: X, mut o: O) -> Outcome
where
    X: FnMut(&Board) -> engine::Move,
    O: FnMut(&Board) -> engine::Move,
{
    let mut board = Board::new();
    let mut mark = Mark::X;
    loop {
        if let Some(outcome) = board.check_winner() {
            return outcome;
        }
        let mv = match mark {
            Mark::X => x(&board),
            Mark::O => o(&board),
        };
        assert!(board.get(mv).is_none(), "{} played on occupied {}", mark, mv);
        board.make_move(mv, mark);
        mark = mark.opponent();
    }
}

fn random_player(seed: u64) -> impl FnMut(&Board) -> engine::Move {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    move |board: &Board| *board.available_moves().choose(&mut rng).unwrap()
}

/// Lets minimax play X and tries every O reply, counting finished games.
fn walk_o_replies(minimax: &MinimaxAgent, board: &mut Board, games: &mut usize) {
    let mv = minimax.best_move(board).unwrap();
    board.make_move(mv, Mark::X);
    match board.check_winner() {
        Some(outcome) => {
            assert_ne!(outcome, Outcome::Win(Mark::O), "\n{}", board);
            *games += 1;
        }
        None => {
            for reply in board.available_moves() {
                board.make_move(reply, Mark::O);
                match board.check_winner() {
                    Some(outcome) => {
                        assert_ne!(outcome, Outcome::Win(Mark::O), "\n{}", board);
                        *games += 1;
                    }
                    None => walk_o_replies(minimax, board, games),
                }
                board.clear(reply);
            }
        }
    }
    board.clear(mv);
}

#[test_log::test]
fn test_minimax_never_loses_as_x() {
    let mut games = 0;
    walk_o_replies(&MinimaxAgent::new(), &mut Board::new(), &mut games);
    assert!(games > 0);
}

#[test_log::test]
fn test_minimax_against_itself_is_a_draw() {
    let minimax = MinimaxAgent::new();
    let outcome = play(
        |b| minimax.best_move(b).unwrap(),
        |b| minimax.best_move_for(b, Mark::O).unwrap(),
    );
    assert_eq!(outcome, Outcome::Draw);
}

#[test_log::test]
fn test_greedy_hybrid_never_loses_to_random_play_as_o() {
    let config = AgentConfig::new(0.1, 0.9, 0.0).unwrap();
    for seed in 0..10 {
        let mut hybrid = HybridAgent::with_seed(config, seed);
        let outcome = play(random_player(seed + 100), |b| {
            let state = b.state_key();
            hybrid
                .best_action(&state, &state.available_moves(), Mark::O)
                .unwrap()
        });
        assert_ne!(outcome, Outcome::Win(Mark::X), "lost with seed {}", seed);
    }
}

#[test]
fn test_every_agent_finishes_a_game() {
    for kind in [
        AgentKind::Random,
        AgentKind::Minimax,
        AgentKind::QLearning,
        AgentKind::Hybrid,
    ] {
        let mut x = kind.build(AgentConfig::default(), Some(9));
        let mut o = kind.build(AgentConfig::default(), Some(10));
        play(
            |b| x.select_move(b, Mark::X).unwrap(),
            |b| o.select_move(b, Mark::O).unwrap(),
        );
    }
}

fn line_winner(values: &[i8; 9]) -> Option<i8> {
    const LINES: [[usize; 3]; 8] = [
        [0, 1, 2],
        [3, 4, 5],
        [6, 7, 8],
        [0, 3, 6],
        [1, 4, 7],
        [2, 5, 8],
        [0, 4, 8],
        [2, 4, 6],
    ];
    LINES.iter().find_map(|&[a, b, c]| {
        (values[a] != 0 && values[a] == values[b] && values[b] == values[c]).then_some(values[a])
    })
}

fn collect_reachable(board: &mut Board, mark: Mark, seen: &mut HashSet<StateKey>) {
    if !seen.insert(board.state_key()) || board.check_winner().is_some() {
        return;
    }
    for mv in board.available_moves() {
        board.make_move(mv, mark);
        collect_reachable(board, mark.opponent(), seen);
        board.clear(mv);
    }
}

#[test]
fn test_check_winner_on_all_reachable_boards() {
    let mut seen = HashSet::new();
    collect_reachable(&mut Board::new(), Mark::X, &mut seen);
    assert_eq!(seen.len(), 5478);

    for key in seen {
        let board = Board::from(key);
        let values = key.values();
        let has_empty = values.contains(&0);
        let expected = match line_winner(values) {
            Some(value) => Some(value),
            None if !has_empty => Some(0),
            None => None,
        };
        assert_eq!(board.check_winner().map(Outcome::value), expected, "\n{}", board);

        let x = board.count(Mark::X);
        let o = board.count(Mark::O);
        assert!(x == o || x == o + 1);
    }
}
