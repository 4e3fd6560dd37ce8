use thiserror::Error;

/// Rejected pilot command. The session state is untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("vertical burn {value} lb/s outside 0 to {max} lb/s")]
    VerticalBurnOutOfRange { value: f64, max: f64 },
    #[error("horizontal burn {value} lb/s outside -{max} to {max} lb/s")]
    HorizontalBurnOutOfRange { value: f64, max: f64 },
    #[error("{field} must be a finite number")]
    NonFiniteInput { field: &'static str },
    #[error("simulation has already ended")]
    SessionFinished,
}

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
