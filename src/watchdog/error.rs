use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchdogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid log file pattern: {0}")]
    Pattern(String),
}

#[derive(Debug, Error)]
pub enum ActuatorError {
    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}
