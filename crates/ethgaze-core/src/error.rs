//! Shared error type across ethgaze crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, EthGazeError>;

/// Unified error type used by core and the exporter daemon.
#[derive(Debug, Error)]
pub enum EthGazeError {
    /// Startup configuration problem (missing endpoint/port, zero targets).
    #[error("config: {0}")]
    Config(String),
    /// Initial chain endpoint probe failed.
    #[error("connect: {0}")]
    Connect(String),
    /// A single chain read failed or timed out during a sweep.
    #[error("fetch: {0}")]
    Fetch(String),
    /// Engine malfunction (lost task, closed semaphore).
    #[error("internal: {0}")]
    Internal(String),
}

impl EthGazeError {
    /// Whether the error must abort the process.
    ///
    /// `Config` and `Connect` only occur before serving begins and are
    /// fatal; `Fetch` is absorbed by the sweep task that raised it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EthGazeError::Config(_) | EthGazeError::Connect(_))
    }
}
