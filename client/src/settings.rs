use clap::{Parser, ValueEnum};
use tic_tac_toe_ai::config::{
    DEFAULT_DISCOUNT_FACTOR, DEFAULT_EXPLORATION_RATE, DEFAULT_LEARNING_RATE,
};
use tic_tac_toe_ai::{AgentConfig, AgentKind, ConfigError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    /// Moves typed on stdin
    Human,
    Random,
    Minimax,
    QLearning,
    Hybrid,
}

impl PlayerKind {
    /// `None` for a human player.
    pub fn agent_kind(self) -> Option<AgentKind> {
        match self {
            PlayerKind::Human => None,
            PlayerKind::Random => Some(AgentKind::Random),
            PlayerKind::Minimax => Some(AgentKind::Minimax),
            PlayerKind::QLearning => Some(AgentKind::QLearning),
            PlayerKind::Hybrid => Some(AgentKind::Hybrid),
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Play tic-tac-toe against search and learning agents")]
pub struct Settings {
    /// Who plays X
    #[arg(long, value_enum, default_value_t = PlayerKind::Human, env = "TTT_X")]
    pub x: PlayerKind,

    /// Who plays O
    #[arg(long, value_enum, default_value_t = PlayerKind::Minimax, env = "TTT_O")]
    pub o: PlayerKind,

    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 1, env = "TTT_GAMES")]
    pub games: usize,

    /// Pause before every automated move, in milliseconds
    #[arg(long, default_value_t = 500, env = "TTT_DELAY_MS")]
    pub delay_ms: u64,

    /// Pick the first player at random; X then opens on a random cell
    #[arg(long)]
    pub random_start: bool,

    /// Let learning agents update their Q-table after every game
    #[arg(long)]
    pub learn: bool,

    /// Learning rate
    #[arg(long, default_value_t = DEFAULT_LEARNING_RATE, env = "TTT_ALPHA")]
    pub alpha: f64,

    /// Discount factor
    #[arg(long, default_value_t = DEFAULT_DISCOUNT_FACTOR, env = "TTT_GAMMA")]
    pub gamma: f64,

    /// Exploration rate
    #[arg(long, default_value_t = DEFAULT_EXPLORATION_RATE, env = "TTT_EPSILON")]
    pub epsilon: f64,

    /// Random seed for reproducible games
    #[arg(long, env = "TTT_SEED")]
    pub seed: Option<u64>,
}

impl Settings {
    pub fn agent_config(&self) -> Result<AgentConfig, ConfigError> {
        AgentConfig::new(self.alpha, self.gamma, self.epsilon)
    }
}
