use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot connect to gpsd at {addr}: {source}")]
    Connect {
        addr: String,
        source: std::io::Error,
    },
    #[error("gpsd I/O error: {0}")]
    Io(#[from] std::io::Error),
}
