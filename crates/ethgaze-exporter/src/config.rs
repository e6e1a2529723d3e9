//! Exporter config loader (process environment).
//!
//! The configuration source is a flat key/value listing: `RPC` and `PORT`
//! are required and fatal when absent, `PREFIX` defaults to the empty
//! string, and `SLEEP_SECONDS` falls back to its default on non-numeric or
//! non-positive values rather than failing.

use std::time::Duration;

use ethgaze_core::{EthGazeError, Result};

/// Default pause between sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct ExporterConfig {
    /// Chain endpoint URL.
    pub rpc_url: String,
    /// HTTP listen port for the exposition surface.
    pub port: u16,
    /// Literal prefix prepended to every metric name.
    pub prefix: String,
    /// Pause between sweeps.
    pub sweep_interval: Duration,
}

impl ExporterConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Load from any key/value listing (tests inject their own).
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut rpc_url = None;
        let mut port = None;
        let mut prefix = None;
        let mut sleep_seconds = None;

        for (key, value) in vars {
            match key.as_ref() {
                "RPC" => rpc_url = Some(value.as_ref().to_string()),
                "PORT" => port = Some(value.as_ref().to_string()),
                "PREFIX" => prefix = Some(value.as_ref().to_string()),
                "SLEEP_SECONDS" => sleep_seconds = Some(value.as_ref().to_string()),
                _ => {}
            }
        }

        let rpc_url = rpc_url
            .filter(|v| !v.is_empty())
            .ok_or_else(|| EthGazeError::Config("missing required env RPC".into()))?;

        let port = port
            .filter(|v| !v.is_empty())
            .ok_or_else(|| EthGazeError::Config("missing required env PORT".into()))?;
        let port: u16 = port
            .parse()
            .map_err(|_| EthGazeError::Config(format!("PORT must be a valid port, got {port:?}")))?;

        let sweep_interval = sleep_seconds
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|n| *n > 0)
            .map(|n| Duration::from_secs(n as u64))
            .unwrap_or(DEFAULT_SWEEP_INTERVAL);

        Ok(Self {
            rpc_url,
            port,
            prefix: prefix.unwrap_or_default(),
            sweep_interval,
        })
    }
}
