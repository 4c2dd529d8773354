use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid prevent-default exception pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid input script: {0}")]
    Script(String),
}

pub type Result<T> = std::result::Result<T, Error>;
