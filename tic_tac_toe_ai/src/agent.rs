use std::fmt::{Display, Formatter};

use engine::{Board, Mark, Move, StateKey};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::AgentConfig;
use crate::hybrid::HybridAgent;
use crate::minimax::MinimaxAgent;
use crate::q_learning::{QLearningAgent, Reward};

/// Picks any free cell.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn get_move(&mut self, board: &Board) -> Option<Move> {
        board.available_moves().choose(&mut self.rng).copied()
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentKind {
    Random,
    Minimax,
    QLearning,
    Hybrid,
}

impl AgentKind {
    /// Builds the agent. `seed` makes random choices reproducible.
    pub fn build(self, config: AgentConfig, seed: Option<u64>) -> Agent {
        match (self, seed) {
            (AgentKind::Random, Some(seed)) => Agent::Random(RandomAgent::with_seed(seed)),
            (AgentKind::Random, None) => Agent::Random(RandomAgent::new()),
            (AgentKind::Minimax, _) => Agent::Minimax(MinimaxAgent::new()),
            (AgentKind::QLearning, Some(seed)) => {
                Agent::QLearning(QLearningAgent::with_seed(config, seed))
            }
            (AgentKind::QLearning, None) => Agent::QLearning(QLearningAgent::new(config)),
            (AgentKind::Hybrid, Some(seed)) => Agent::Hybrid(HybridAgent::with_seed(config, seed)),
            (AgentKind::Hybrid, None) => Agent::Hybrid(HybridAgent::new(config)),
        }
    }
}

impl Display for AgentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AgentKind::Random => "random",
            AgentKind::Minimax => "minimax",
            AgentKind::QLearning => "q-learning",
            AgentKind::Hybrid => "hybrid",
        };
        f.write_str(name)
    }
}

/// Every move-selection strategy behind one interface.
#[derive(Clone, Debug)]
pub enum Agent {
    Random(RandomAgent),
    Minimax(MinimaxAgent),
    QLearning(QLearningAgent),
    Hybrid(HybridAgent),
}

impl Agent {
    pub fn kind(&self) -> AgentKind {
        match self {
            Agent::Random(_) => AgentKind::Random,
            Agent::Minimax(_) => AgentKind::Minimax,
            Agent::QLearning(_) => AgentKind::QLearning,
            Agent::Hybrid(_) => AgentKind::Hybrid,
        }
    }

    /// Move for `mark` on `board`, `None` when no move is left.
    pub fn select_move(&mut self, board: &Board, mark: Mark) -> Option<Move> {
        match self {
            Agent::Random(agent) => agent.get_move(board),
            Agent::Minimax(agent) => agent.best_move_for(board, mark),
            Agent::QLearning(agent) => {
                agent.best_action(&board.state_key(), &board.available_moves())
            }
            Agent::Hybrid(agent) => {
                agent.best_action(&board.state_key(), &board.available_moves(), mark)
            }
        }
    }

    /// Returns `true` if [`Agent::observe`] changes the agent.
    pub fn is_learning(&self) -> bool {
        matches!(self, Agent::QLearning(_) | Agent::Hybrid(_))
    }

    /// Feeds a transition to the Q-table of learning agents.
    pub fn observe(&mut self, state: &StateKey, action: Move, reward: Reward, next_state: &StateKey) {
        match self {
            Agent::QLearning(agent) => agent.update_q_value(state, action, reward, next_state),
            Agent::Hybrid(agent) => agent.update_q_value(state, action, reward, next_state),
            Agent::Random(_) | Agent::Minimax(_) => {}
        }
    }
}
