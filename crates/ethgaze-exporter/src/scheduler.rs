//! Refresh scheduler.
//!
//! Drives the sweep engine forever on its own task: sweep, record stats,
//! sleep, repeat. Each iteration fully awaits the sweep before sleeping, so
//! sweeps are strictly serialized. Production never cancels the token; tests
//! do, and cancellation is only observed between sweeps so it cannot tear an
//! in-flight pass.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use ethgaze_core::registry::WatchTarget;

use crate::chain::ChainClient;
use crate::store::ObservationStore;
use crate::sweep::{self, MAX_IN_FLIGHT};

pub async fn run(
    registry: Arc<Vec<WatchTarget>>,
    client: Arc<dyn ChainClient>,
    store: Arc<ObservationStore>,
    interval: Duration,
    cancel: CancellationToken,
) {
    loop {
        tracing::info!(targets = registry.len(), "checking wallets");

        match sweep::run_sweep(
            Arc::clone(&registry),
            Arc::clone(&client),
            Arc::clone(&store),
            MAX_IN_FLIGHT,
        )
        .await
        {
            Ok(stats) => {
                tracing::info!(
                    targets = stats.loaded,
                    load_seconds = stats.load_seconds,
                    sleep_seconds = interval.as_secs(),
                    "finished checking wallets"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "sweep engine malfunction, refresh loop stopping");
                return;
            }
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => return,
            () = tokio::time::sleep(interval) => {}
        }
    }
}
