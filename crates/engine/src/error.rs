use thiserror::Error;

/// Errors raised while loading engine inputs
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
