pub mod agent;
pub mod config;
pub mod error;
pub mod hybrid;
pub mod minimax;
pub mod q_learning;

pub use agent::{Agent, AgentKind, RandomAgent};
pub use config::AgentConfig;
pub use error::ConfigError;
pub use hybrid::HybridAgent;
pub use minimax::MinimaxAgent;
pub use q_learning::{QLearningAgent, QTable, QValue, Reward};
