use crate::error::ConfigError;

pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
pub const DEFAULT_DISCOUNT_FACTOR: f64 = 0.9;
pub const DEFAULT_EXPLORATION_RATE: f64 = 0.1;

/// Parameters of the learning agents. Fixed once the agent is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentConfig {
    alpha: f64,
    gamma: f64,
    epsilon: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_LEARNING_RATE,
            gamma: DEFAULT_DISCOUNT_FACTOR,
            epsilon: DEFAULT_EXPLORATION_RATE,
        }
    }
}

impl AgentConfig {
    /// Every parameter has to be a finite number in `[0, 1]`.
    pub fn new(alpha: f64, gamma: f64, epsilon: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            alpha: check_unit("alpha", alpha)?,
            gamma: check_unit("gamma", gamma)?,
            epsilon: check_unit("epsilon", epsilon)?,
        })
    }

    /// Learning rate.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Discount factor.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Exploration rate.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

fn check_unit(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::invalid_parameter(name, value))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AgentConfig::default();
        assert_eq!(config.alpha(), 0.1);
        assert_eq!(config.gamma(), 0.9);
        assert_eq!(config.epsilon(), 0.1);
    }

    #[test]
    fn test_bounds() {
        assert!(AgentConfig::new(0.0, 1.0, 0.5).is_ok());
        assert_eq!(
            AgentConfig::new(1.5, 0.9, 0.1),
            Err(ConfigError::invalid_parameter("alpha", 1.5))
        );
        assert_eq!(
            AgentConfig::new(0.1, -0.1, 0.1),
            Err(ConfigError::invalid_parameter("gamma", -0.1))
        );
        assert!(AgentConfig::new(0.1, 0.9, f64::NAN).is_err());
    }
}
