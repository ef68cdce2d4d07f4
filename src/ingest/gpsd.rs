use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};

use super::error::SourceError;

pub const DEFAULT_PORT: u16 = 2947;

const WATCH_COMMAND: &[u8] = b"?WATCH={\"enable\":true,\"json\":true};\n";

/// Streams gpsd JSON lines into the ingestion channel.
///
/// Returning drops the sender, which the ingestion loop reads as the end of
/// the report stream.
pub struct GpsdSource {
    addr: String,
    tx: mpsc::Sender<String>,
    shutdown: watch::Receiver<bool>,
}

impl GpsdSource {
    pub fn new(addr: String, tx: mpsc::Sender<String>, shutdown: watch::Receiver<bool>) -> Self {
        Self { addr, tx, shutdown }
    }

    pub async fn run(mut self) -> Result<(), SourceError> {
        let stream = tokio::select! {
            biased;
            _ = self.shutdown.changed() => {
                debug!("Shutdown before gpsd at {} answered", self.addr);
                return Ok(());
            }
            stream = TcpStream::connect(&self.addr) => {
                stream.map_err(|e| SourceError::Connect {
                    addr: self.addr.clone(),
                    source: e,
                })?
            }
        };
        info!("Connected to gpsd at {}", self.addr);

        // The write half stays open for the whole session, gpsd drops
        // watchers that half-close.
        let (reader, mut writer) = stream.into_split();
        tokio::select! {
            biased;
            _ = self.shutdown.changed() => return Ok(()),
            written = writer.write_all(WATCH_COMMAND) => written?,
        }

        let mut lines = BufReader::new(reader).lines();
        loop {
            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = self.shutdown.changed() => {
                    debug!("gpsd session closed on shutdown");
                    return Ok(());
                }
            };

            let Some(line) = line else {
                warn!("gpsd at {} closed the connection", self.addr);
                return Ok(());
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if self.tx.send(line.to_string()).await.is_err() {
                debug!("Ingestion channel closed, leaving gpsd session");
                return Ok(());
            }
        }
    }
}
