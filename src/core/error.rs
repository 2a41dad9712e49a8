use thiserror::Error;

#[derive(Error, Debug)]
pub enum HavenError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Pathfinder service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HavenError>;
