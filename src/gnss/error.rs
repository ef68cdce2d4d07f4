use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed report: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("range for {name} is inverted ({first} > {last})")]
    InvertedRange { name: String, first: u32, last: u32 },
}
