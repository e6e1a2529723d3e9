//! Bounded sweep engine.
//!
//! One sweep fans out one fetch task per registry entry, at most
//! [`MAX_IN_FLIGHT`] executing their chain reads concurrently. Permits are
//! acquired in registry order before spawning; the engine joins every task
//! before reporting stats, so a caller returning means the fan-out has fully
//! drained. Per-field failures are absorbed into placeholders and logged;
//! the only sweep-level failure is a lost task, which is engine malfunction.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::time::Instant;

use ethgaze_core::observation::{AccountReading, SweepStats};
use ethgaze_core::registry::WatchTarget;
use ethgaze_core::units::wei_to_eth;
use ethgaze_core::{EthGazeError, Result};

use crate::chain::{BlockTag, ChainClient, CALL_DEADLINE};
use crate::store::ObservationStore;

/// Concurrency ceiling for in-flight fetch tasks.
pub const MAX_IN_FLIGHT: usize = 8;

/// Run one full refresh pass over the registry.
///
/// Takes its own handle on the (immutable) registry so nothing can race the
/// pass, waits for every task, then writes the sweep stats.
pub async fn run_sweep(
    registry: Arc<Vec<WatchTarget>>,
    client: Arc<dyn ChainClient>,
    store: Arc<ObservationStore>,
    limit: usize,
) -> Result<SweepStats> {
    let started = Instant::now();
    let semaphore = Arc::new(Semaphore::new(limit));
    let mut tasks = Vec::with_capacity(registry.len());

    for index in 0..registry.len() {
        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .map_err(|_| EthGazeError::Internal("sweep semaphore closed".into()))?;
        let registry = Arc::clone(&registry);
        let client = Arc::clone(&client);
        let store = Arc::clone(&store);
        tasks.push(tokio::spawn(async move {
            let _permit = permit;
            let reading = fetch_account(client.as_ref(), &registry[index]).await;
            store.record(index, reading).await;
        }));
    }

    for task in tasks {
        task.await
            .map_err(|e| EthGazeError::Internal(format!("sweep task failed: {e}")))?;
    }

    let stats = SweepStats {
        load_seconds: started.elapsed().as_secs_f64(),
        loaded: registry.len() as i64,
    };
    store.record_sweep(stats).await;
    Ok(stats)
}

/// Fetch one target's field set under a single shared deadline.
///
/// All five reads share one [`CALL_DEADLINE`] budget; each is attempted
/// independently and a failed or expired read leaves its placeholder in the
/// reading instead of aborting the rest.
async fn fetch_account(client: &dyn ChainClient, target: &WatchTarget) -> AccountReading {
    let deadline = Instant::now() + CALL_DEADLINE;
    let mut reading = AccountReading::default();

    if let Some(wei) = guarded(deadline, target, "balance", client.balance_at(target.address, BlockTag::Latest)).await {
        reading.balance = wei_to_eth(wei);
    }
    if let Some(wei) = guarded(deadline, target, "pending_balance", client.pending_balance_at(target.address)).await {
        reading.balance_pending = wei_to_eth(wei);
    }
    if let Some(nonce) = guarded(deadline, target, "nonce", client.nonce_at(target.address, BlockTag::Latest)).await {
        reading.nonce = nonce;
    }
    if let Some(nonce) = guarded(deadline, target, "pending_nonce", client.pending_nonce_at(target.address)).await {
        reading.nonce_pending = nonce;
    }
    if let Some(code) = guarded(deadline, target, "code", client.code_at(target.address, BlockTag::Latest)).await {
        reading.code_size = code.len();
        reading.is_contract = !code.is_empty();
    }

    reading
}

/// Await one chain read against the task deadline; failures become `None`
/// with a warn diagnostic, never an error to the caller.
async fn guarded<T>(
    deadline: Instant,
    target: &WatchTarget,
    call: &'static str,
    fut: impl Future<Output = Result<T>>,
) -> Option<T> {
    match tokio::time::timeout_at(deadline, fut).await {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            tracing::warn!(target = %target.name, call, error = %e, "chain read failed");
            None
        }
        Err(_) => {
            tracing::warn!(target = %target.name, call, "chain read deadline exceeded");
            None
        }
    }
}
