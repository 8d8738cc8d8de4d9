use engine::{GameError, Mark};
use tic_tac_toe_ai::ConfigError;

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("expected \"row col\", found {input:?}")]
    InvalidInput { input: String },
    #[error("input ended before the game was over")]
    EndOfInput,
    #[error("{0} has no move to play")]
    NoMove(Mark),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub fn invalid_input(input: &str) -> Self {
        Self::InvalidInput {
            input: input.trim().to_string(),
        }
    }
}
