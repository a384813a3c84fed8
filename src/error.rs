use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load replay {}: {message}", path.display())]
    Replay { path: PathBuf, message: String },

    #[error("Summary store {} is unreadable: {message}", path.display())]
    CorruptStore { path: PathBuf, message: String },

    #[error("Summaries mix self races {0} and {1}; vectorize one race at a time")]
    MixedRaces(String, String),

    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl Error {
    /// Create a replay error for the given source file
    pub fn replay<E: std::fmt::Display>(path: impl Into<PathBuf>, err: E) -> Self {
        Self::Replay {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Create a configuration error
    pub fn config<E: std::fmt::Display>(msg: E) -> Self {
        Self::Config(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
