mod error;
mod gpsd;
mod ingestor;

pub use gpsd::{GpsdSource, DEFAULT_PORT};
pub use ingestor::{IngestExit, Ingestor};
