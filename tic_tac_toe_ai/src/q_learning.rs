use std::collections::HashMap;

use engine::{Move, StateKey};
use log::trace;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::AgentConfig;

pub type QValue = f64;
pub type Reward = f64;

fn calculate_q(old: QValue, max_q_next: QValue, reward: Reward, alpha: f64, gamma: f64) -> QValue {
    (1.0 - alpha) * old + alpha * (reward + gamma * max_q_next)
}

/// Expected values of `(state, move)` pairs. Unseen pairs are worth `0.0`.
#[derive(Clone, Debug, Default)]
pub struct QTable(HashMap<(StateKey, Move), QValue>);

impl QTable {
    pub fn get_value(&self, state: &StateKey, action: Move) -> QValue {
        self.0.get(&(*state, action)).copied().unwrap_or_default()
    }

    pub fn set_value(&mut self, state: StateKey, action: Move, new_val: QValue) {
        self.0.insert((state, action), new_val);
    }

    /// Highest value among `actions`, `0.0` if there are none.
    pub fn get_max_value(&self, state: &StateKey, actions: &[Move]) -> QValue {
        if actions.is_empty() {
            return 0.0;
        }
        actions
            .iter()
            .map(|&action| self.get_value(state, action))
            .fold(QValue::NEG_INFINITY, QValue::max)
    }

    /// Action with the highest value, the first one scanned wins a tie.
    pub fn get_best_action(&self, state: &StateKey, actions: &[Move]) -> Option<Move> {
        let mut best: Option<(Move, QValue)> = None;
        for &action in actions {
            let q_value = self.get_value(state, action);
            match best {
                Some((_, max_q)) if q_value <= max_q => {}
                _ => best = Some((action, q_value)),
            }
        }
        best.map(|(action, _)| action)
    }

    /// Returns `true` if every action of `state` is still worth exactly `0.0`.
    pub fn is_unexplored(&self, state: &StateKey, actions: &[Move]) -> bool {
        actions
            .iter()
            .all(|&action| self.get_value(state, action) == 0.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Tabular Q-learning agent with an epsilon-greedy policy.
#[derive(Clone, Debug)]
pub struct QLearningAgent {
    config: AgentConfig,
    q_table: QTable,
    rng: StdRng,
}

impl QLearningAgent {
    pub fn new(config: AgentConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Agent with a reproducible exploration sequence.
    pub fn with_seed(config: AgentConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: AgentConfig, rng: StdRng) -> Self {
        Self {
            config,
            q_table: QTable::default(),
            rng,
        }
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn q_value(&self, state: &StateKey, action: Move) -> QValue {
        self.q_table.get_value(state, action)
    }

    /// Rolls the exploration dice.
    pub fn explores(&mut self) -> bool {
        self.rng.gen::<f64>() < self.config.epsilon()
    }

    /// Uniformly random move out of `moves`.
    pub fn random_action(&mut self, moves: &[Move]) -> Option<Move> {
        moves.choose(&mut self.rng).copied()
    }

    /// Epsilon-greedy choice among `moves`. `None` if there is nothing to play.
    pub fn best_action(&mut self, state: &StateKey, moves: &[Move]) -> Option<Move> {
        if self.explores() {
            let action = self.random_action(moves);
            trace!("exploring: {:?}", action);
            return action;
        }
        self.q_table.get_best_action(state, moves)
    }

    /// Temporal-difference update of `(state, action)`.
    /// The future value is the best value over the legal moves of `next_state`.
    pub fn update_q_value(
        &mut self,
        state: &StateKey,
        action: Move,
        reward: Reward,
        next_state: &StateKey,
    ) {
        let max_q_next = self
            .q_table
            .get_max_value(next_state, &next_state.available_moves());
        let q_prev = self.q_table.get_value(state, action);
        let new_q = calculate_q(
            q_prev,
            max_q_next,
            reward,
            self.config.alpha(),
            self.config.gamma(),
        );
        trace!("q{:?} {} -> {}", action, q_prev, new_q);
        self.q_table.set_value(*state, action, new_q);
    }
}
