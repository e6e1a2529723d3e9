//! Per-target observation model.
//!
//! One `Observation` per watch target, held at the same ordinal position as
//! the registry for the whole process lifetime. A sweep produces one
//! `AccountReading` per target and overwrites the observation's fields as a
//! set; fields whose fetch failed carry the zero/empty placeholder rather
//! than the previous value, so a stale metric goes blank until the endpoint
//! recovers.

/// Latest fetched state for one watch target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Confirmed balance as an exact decimal ether string. Empty when the
    /// last fetch failed; renders as `0`.
    pub balance: String,
    /// Balance including mempool transactions. Same placeholder rule.
    pub balance_pending: String,
    /// Confirmed transaction count.
    pub nonce: u64,
    /// Transaction count including mempool.
    pub nonce_pending: u64,
    /// Whether the address carries code.
    pub is_contract: bool,
    /// Code length in bytes (0 for EOAs).
    pub code_size: usize,
    /// Unix seconds of the last completed write for this target.
    pub last_updated: i64,
}

impl Default for Observation {
    fn default() -> Self {
        Self {
            balance: "0".to_string(),
            balance_pending: "0".to_string(),
            nonce: 0,
            nonce_pending: 0,
            is_contract: false,
            code_size: 0,
            last_updated: 0,
        }
    }
}

/// Field set produced by one sweep task, before the timestamp is stamped.
///
/// Defaults are the failure placeholders: a task starts from `default()` and
/// fills in whichever fetches succeeded.
#[derive(Debug, Clone, Default)]
pub struct AccountReading {
    pub balance: String,
    pub balance_pending: String,
    pub nonce: u64,
    pub nonce_pending: u64,
    pub is_contract: bool,
    pub code_size: usize,
}

/// Aggregate stats for the most recent completed sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SweepStats {
    /// Wall time of the last sweep, in seconds.
    pub load_seconds: f64,
    /// Number of targets processed by the last sweep.
    pub loaded: i64,
}
