//! Observation store.
//!
//! One coarse read/write lock over the whole table: sweep tasks hold it only
//! while copying one field set in, the render path holds it for one linear
//! clone with no I/O. Cross-field consistency during an in-flight sweep is
//! deliberately relaxed (a reader may pair a new balance with an old nonce);
//! each field is independently meaningful.

use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::RwLock;

use ethgaze_core::observation::{AccountReading, Observation, SweepStats};

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

struct Inner {
    observations: Vec<Observation>,
    stats: SweepStats,
}

/// Latest observation per watch target plus sweep-level stats.
///
/// Constructed once at startup with one slot per registry entry; ordinal `i`
/// refers to the same target for the process lifetime.
pub struct ObservationStore {
    inner: RwLock<Inner>,
}

impl ObservationStore {
    pub fn new(len: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                observations: vec![Observation::default(); len],
                stats: SweepStats::default(),
            }),
        }
    }

    /// Consistent snapshot of all observations and the sweep stats.
    pub async fn snapshot(&self) -> (Vec<Observation>, SweepStats) {
        let guard = self.inner.read().await;
        (guard.observations.clone(), guard.stats)
    }

    /// Overwrite one target's field set and stamp its update time.
    ///
    /// The reading is written as produced, failure placeholders included.
    pub async fn record(&self, index: usize, reading: AccountReading) {
        let now = unix_now();
        let mut guard = self.inner.write().await;
        match guard.observations.get_mut(index) {
            Some(obs) => {
                obs.balance = reading.balance;
                obs.balance_pending = reading.balance_pending;
                obs.nonce = reading.nonce;
                obs.nonce_pending = reading.nonce_pending;
                obs.is_contract = reading.is_contract;
                obs.code_size = reading.code_size;
                obs.last_updated = now;
            }
            None => {
                tracing::error!(index, "observation index out of range, dropping reading");
            }
        }
    }

    /// Replace the sweep-level stats, once per completed sweep.
    pub async fn record_sweep(&self, stats: SweepStats) {
        self.inner.write().await.stats = stats;
    }
}
