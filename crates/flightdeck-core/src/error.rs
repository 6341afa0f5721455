use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlightdeckError {
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("Save data error: {0}")]
    Save(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FlightdeckError>;
