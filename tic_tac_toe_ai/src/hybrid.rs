use engine::{Board, Mark, Move, StateKey, CENTER};
use log::debug;

use crate::config::AgentConfig;
use crate::minimax::MinimaxAgent;
use crate::q_learning::{QLearningAgent, Reward};

/// Q-learning agent guarded by fixed heuristics.
///
/// Decision order: exploration, immediate win, block, center, fork,
/// best stored value, and minimax when the table knows nothing about the state.
#[derive(Clone, Debug)]
pub struct HybridAgent {
    learner: QLearningAgent,
    minimax: MinimaxAgent,
}

impl HybridAgent {
    pub fn new(config: AgentConfig) -> Self {
        Self::from_learner(QLearningAgent::new(config))
    }

    pub fn with_seed(config: AgentConfig, seed: u64) -> Self {
        Self::from_learner(QLearningAgent::with_seed(config, seed))
    }

    fn from_learner(learner: QLearningAgent) -> Self {
        Self {
            learner,
            minimax: MinimaxAgent::new(),
        }
    }

    pub fn learner(&self) -> &QLearningAgent {
        &self.learner
    }

    pub fn best_action(&mut self, state: &StateKey, moves: &[Move], mark: Mark) -> Option<Move> {
        if self.learner.explores() {
            let action = self.learner.random_action(moves);
            debug!("{} explores: {:?}", mark, action);
            return action;
        }

        let board = Board::from(*state);
        if let Some(mv) = completing_move(&board, moves, mark) {
            debug!("{} wins on {}", mark, mv);
            return Some(mv);
        }
        if let Some(mv) = completing_move(&board, moves, mark.opponent()) {
            debug!("{} blocks {}", mark, mv);
            return Some(mv);
        }
        if moves.contains(&CENTER) {
            debug!("{} takes the center", mark);
            return Some(CENTER);
        }
        if let Some(mv) = fork_move(&board, moves, mark) {
            debug!("{} forks on {}", mark, mv);
            return Some(mv);
        }

        let table = self.learner.q_table();
        if table.is_unexplored(state, moves) {
            let mv = self.minimax.best_move_for(&board, mark);
            debug!("{} has no stored values, minimax picks {:?}", mark, mv);
            return mv;
        }
        table.get_best_action(state, moves)
    }

    pub fn update_q_value(
        &mut self,
        state: &StateKey,
        action: Move,
        reward: Reward,
        next_state: &StateKey,
    ) {
        self.learner.update_q_value(state, action, reward, next_state);
    }
}

/// First move that completes a line for `mark`.
fn completing_move(board: &Board, moves: &[Move], mark: Mark) -> Option<Move> {
    let mut scratch = board.clone();
    moves.iter().copied().find(|&mv| {
        scratch.make_move(mv, mark);
        let wins = scratch.is_winner(mark);
        scratch.clear(mv);
        wins
    })
}

/// First move that leaves `mark` with at least two open lines.
fn fork_move(board: &Board, moves: &[Move], mark: Mark) -> Option<Move> {
    let mut scratch = board.clone();
    moves.iter().copied().find(|&mv| {
        scratch.make_move(mv, mark);
        let threats = scratch.count_threats(mark);
        scratch.clear(mv);
        threats > 1
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn agent() -> HybridAgent {
        HybridAgent::with_seed(AgentConfig::new(0.1, 0.9, 0.0).unwrap(), 3)
    }

    fn choose(agent: &mut HybridAgent, values: [[i8; 3]; 3], mark: Mark) -> Option<Move> {
        let state = Board::from_values(values).unwrap().state_key();
        agent.best_action(&state, &state.available_moves(), mark)
    }

    #[test]
    fn test_win_before_block() {
        // O can complete the middle row, X the top row
        let values = [[1, 1, 0], [-1, -1, 0], [1, 0, -1]];
        assert_eq!(choose(&mut agent(), values, Mark::O), Some(Move::new(1, 2)));
        assert_eq!(choose(&mut agent(), values, Mark::X), Some(Move::new(0, 2)));
    }

    #[test]
    fn test_block_before_center() {
        let values = [[1, 1, 0], [0, 0, 0], [-1, 0, 0]];
        assert_eq!(choose(&mut agent(), values, Mark::O), Some(Move::new(0, 2)));
    }

    #[test]
    fn test_takes_center() {
        let values = [[1, 0, 0], [0, 0, 0], [0, 0, 0]];
        assert_eq!(choose(&mut agent(), values, Mark::O), Some(CENTER));
    }

    #[test]
    fn test_creates_fork() {
        // (0, 2) opens both the top row and the right column
        let values = [[1, 0, 0], [0, -1, 0], [0, 0, 1]];
        let board = Board::from_values(values).unwrap();
        let moves = board.available_moves();
        let expected = fork_move(&board, &moves, Mark::X);
        assert_eq!(expected, Some(Move::new(0, 2)));
        assert_eq!(choose(&mut agent(), values, Mark::X), expected);
    }

    #[test]
    fn test_minimax_fallback_on_empty_table() {
        // no win, block, center or fork available for O
        let values = [[1, 0, 0], [0, -1, 0], [0, 0, 1]];
        let board = Board::from_values(values).unwrap();
        let expected = MinimaxAgent::new().best_move_for(&board, Mark::O);
        assert_eq!(fork_move(&board, &board.available_moves(), Mark::O), None);
        assert_eq!(choose(&mut agent(), values, Mark::O), expected);
    }

    #[test]
    fn test_stored_values_override_minimax() {
        let values = [[1, 0, 0], [0, -1, 0], [0, 0, 1]];
        let state = Board::from_values(values).unwrap().state_key();
        let mut agent = agent();
        agent.update_q_value(&state, Move::new(2, 0), 2.5, &state);
        let value = agent.learner().q_value(&state, Move::new(2, 0));
        assert!((value - 0.25).abs() < 1e-12, "got {}", value);
        assert_eq!(
            agent.best_action(&state, &state.available_moves(), Mark::O),
            Some(Move::new(2, 0))
        );
    }

    #[test]
    fn test_zero_stored_values_still_use_minimax() {
        let values = [[1, 0, 0], [0, -1, 0], [0, 0, 1]];
        let board = Board::from_values(values).unwrap();
        let state = board.state_key();
        let mut agent = agent();
        agent.update_q_value(&state, Move::new(2, 0), 0.0, &state);
        assert_eq!(agent.learner().q_table().len(), 1);
        assert_eq!(
            agent.best_action(&state, &state.available_moves(), Mark::O),
            MinimaxAgent::new().best_move_for(&board, Mark::O)
        );
    }

    #[test]
    fn test_negative_value_skips_minimax() {
        let values = [[1, 0, 0], [0, -1, 0], [0, 0, 1]];
        let board = Board::from_values(values).unwrap();
        let state = board.state_key();
        let moves = state.available_moves();
        let minimax_move = MinimaxAgent::new().best_move_for(&board, Mark::O);
        assert_eq!(minimax_move, Some(Move::new(0, 1)));

        // the remaining zeros beat the negative entry, first zero wins
        let mut agent = agent();
        agent.update_q_value(&state, Move::new(0, 1), -1.0, &state);
        assert!(agent.learner().q_value(&state, Move::new(0, 1)) < 0.0);
        assert_eq!(agent.best_action(&state, &moves, Mark::O), Some(Move::new(0, 2)));
    }

    #[test]
    fn test_no_moves() {
        let values = [[1, -1, 1], [1, -1, -1], [-1, 1, 1]];
        assert_eq!(choose(&mut agent(), values, Mark::X), None);
    }
}
