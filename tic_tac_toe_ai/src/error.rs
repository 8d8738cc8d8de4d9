#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid {name} value {value} (expected a number in 0..=1)")]
    InvalidParameter { name: &'static str, value: f64 },
}

impl ConfigError {
    pub fn invalid_parameter(name: &'static str, value: f64) -> Self {
        Self::InvalidParameter { name, value }
    }
}
