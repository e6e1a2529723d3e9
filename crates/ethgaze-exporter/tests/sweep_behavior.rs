//! Sweep engine and scheduler behavior against a stub chain client.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use ethgaze_core::registry::WatchTarget;
use ethgaze_core::{EthGazeError, Result};
use ethgaze_exporter::chain::{BlockTag, ChainClient};
use ethgaze_exporter::store::ObservationStore;
use ethgaze_exporter::{scheduler, sweep};

fn targets(n: usize) -> Arc<Vec<WatchTarget>> {
    Arc::new(
        (0..n)
            .map(|i| {
                let mut raw = [0u8; 20];
                raw[18] = (i >> 8) as u8;
                raw[19] = i as u8;
                WatchTarget {
                    name: format!("t{i}"),
                    address: Address::from(raw),
                    address_text: format!("0x{}", hex::encode(raw)),
                }
            })
            .collect(),
    )
}

/// Stub chain client tracking how many calls are in flight.
///
/// Optionally gates every call on a watch channel (so saturation can be
/// observed deterministically), delays every call, fails `nonce_at` for one
/// address, or hangs `pending_nonce_at` forever.
#[derive(Default)]
struct StubClient {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    total_calls: AtomicUsize,
    gate: Option<watch::Receiver<bool>>,
    call_delay: Duration,
    fail_nonce_for: Option<Address>,
    hang_pending_nonce: bool,
}

impl StubClient {
    fn gated(gate: watch::Receiver<bool>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    fn with_delay(call_delay: Duration) -> Self {
        Self {
            call_delay,
            ..Self::default()
        }
    }

    fn max_seen(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            let mut rx = gate.clone();
            let _ = rx.wait_for(|released| *released).await;
        }
        if !self.call_delay.is_zero() {
            tokio::time::sleep(self.call_delay).await;
        }
    }

    fn exit(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ChainClient for StubClient {
    async fn balance_at(&self, _address: Address, _block: BlockTag) -> Result<U256> {
        self.enter().await;
        self.exit();
        // 1.5 ether in wei.
        Ok(U256::from(1_500_000_000_000_000_000u64))
    }

    async fn nonce_at(&self, address: Address, _block: BlockTag) -> Result<u64> {
        self.enter().await;
        self.exit();
        if self.fail_nonce_for == Some(address) {
            return Err(EthGazeError::Fetch("nonce unavailable".into()));
        }
        Ok(7)
    }

    async fn pending_nonce_at(&self, _address: Address) -> Result<u64> {
        if self.hang_pending_nonce {
            std::future::pending::<()>().await;
        }
        self.enter().await;
        self.exit();
        Ok(8)
    }

    async fn code_at(&self, _address: Address, _block: BlockTag) -> Result<Bytes> {
        self.enter().await;
        self.exit();
        Ok(Bytes::from_static(&[0x60, 0x60]))
    }
}

#[tokio::test]
async fn in_flight_never_exceeds_the_ceiling() {
    let (release, gate) = watch::channel(false);
    let client = Arc::new(StubClient::gated(gate));
    let registry = targets(32);
    let store = Arc::new(ObservationStore::new(registry.len()));

    let running = tokio::spawn(sweep::run_sweep(
        Arc::clone(&registry),
        client.clone(),
        Arc::clone(&store),
        8,
    ));

    // Let the fan-out saturate the semaphore, every admitted task blocked
    // inside its first chain read.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(client.in_flight.load(Ordering::SeqCst), 8);

    release.send(true).unwrap();
    let stats = running.await.unwrap().unwrap();

    assert_eq!(stats.loaded, 32);
    assert!(client.max_seen() <= 8, "ceiling broken: {}", client.max_seen());
    assert_eq!(client.in_flight.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn nonce_failure_does_not_block_other_fields() {
    let registry = targets(2);
    let client = Arc::new(StubClient {
        fail_nonce_for: Some(registry[1].address),
        ..StubClient::default()
    });
    let store = Arc::new(ObservationStore::new(registry.len()));

    sweep::run_sweep(Arc::clone(&registry), client, Arc::clone(&store), 8)
        .await
        .unwrap();

    let (observations, stats) = store.snapshot().await;
    assert_eq!(stats.loaded, 2);

    // Unaffected target: everything fetched.
    assert_eq!(observations[0].balance, "1.5");
    assert_eq!(observations[0].nonce, 7);

    // Affected target: nonce blanked to the placeholder, everything else
    // fresh, including the update stamp.
    let obs = &observations[1];
    assert_eq!(obs.balance, "1.5");
    assert_eq!(obs.balance_pending, "1.5");
    assert_eq!(obs.nonce, 0);
    assert_eq!(obs.nonce_pending, 8);
    assert!(obs.is_contract);
    assert_eq!(obs.code_size, 2);
    assert!(obs.last_updated > 0);
}

#[tokio::test(start_paused = true)]
async fn deadline_expiry_blanks_the_field() {
    let registry = targets(1);
    let client = Arc::new(StubClient {
        hang_pending_nonce: true,
        ..StubClient::default()
    });
    let store = Arc::new(ObservationStore::new(1));

    sweep::run_sweep(Arc::clone(&registry), client, Arc::clone(&store), 8)
        .await
        .unwrap();

    let (observations, _) = store.snapshot().await;
    let obs = &observations[0];

    // Reads before the hang completed.
    assert_eq!(obs.balance, "1.5");
    assert_eq!(obs.balance_pending, "1.5");
    assert_eq!(obs.nonce, 7);
    // The hung read expired and left its placeholder.
    assert_eq!(obs.nonce_pending, 0);
    // The code read after the expiry still lands: the stub answers on the
    // first poll, and the timeout only fires on a pending future.
    assert!(obs.is_contract);
    assert_eq!(obs.code_size, 2);
    assert!(obs.last_updated > 0);
}

#[tokio::test]
async fn zero_interval_sweeps_never_overlap() {
    let registry = targets(4);
    let client = Arc::new(StubClient::with_delay(Duration::from_millis(5)));
    let store = Arc::new(ObservationStore::new(registry.len()));
    let cancel = CancellationToken::new();

    let running = tokio::spawn(scheduler::run(
        Arc::clone(&registry),
        client.clone(),
        Arc::clone(&store),
        Duration::ZERO,
        cancel.clone(),
    ));

    tokio::time::sleep(Duration::from_millis(300)).await;
    cancel.cancel();
    running.await.unwrap();

    // Serialized sweeps can never have more tasks in flight than one sweep's
    // registry; overlap would let the second sweep's fan-out stack on top.
    assert!(client.max_seen() <= 4, "sweeps overlapped: {}", client.max_seen());

    // The loop actually repeated (5 calls per target per sweep).
    assert!(client.total_calls.load(Ordering::SeqCst) >= 40);

    let (_, stats) = store.snapshot().await;
    assert_eq!(stats.loaded, 4);
    assert!(stats.load_seconds > 0.0);
}
