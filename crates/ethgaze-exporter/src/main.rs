//! ethgaze exporter daemon.
//!
//! Startup order:
//! - env config (RPC/PORT/PREFIX/SLEEP_SECONDS) and watch-target registry
//! - chain endpoint probe (fatal on failure, no startup retry)
//! - refresh scheduler on its own task
//! - HTTP listener serving `/metrics`

use std::net::SocketAddr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

use ethgaze_core::registry::{self, DEFAULT_ENV_PREFIX};
use ethgaze_exporter::{
    app_state::AppState,
    chain::{ChainClient, HttpChainClient},
    config::ExporterConfig,
    router, scheduler,
    store::ObservationStore,
};

fn die(context: &str, e: ethgaze_core::EthGazeError) -> ! {
    tracing::error!(error = %e, "{}", context);
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let vars: Vec<(String, String)> = std::env::vars().collect();

    let cfg = ExporterConfig::from_vars(vars.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .unwrap_or_else(|e| die("configuration failed", e));

    let registry = registry::load_from_vars(
        vars.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        DEFAULT_ENV_PREFIX,
    )
    .unwrap_or_else(|e| die("registry load failed", e));
    let registry = Arc::new(registry);

    let client: Arc<dyn ChainClient> = Arc::new(
        HttpChainClient::connect(&cfg.rpc_url)
            .await
            .unwrap_or_else(|e| die("chain endpoint unreachable", e)),
    );

    let store = Arc::new(ObservationStore::new(registry.len()));

    let cancel = CancellationToken::new();
    tokio::spawn(scheduler::run(
        Arc::clone(&registry),
        client,
        Arc::clone(&store),
        cfg.sweep_interval,
        cancel.clone(),
    ));

    let state = AppState::new(cfg.prefix.clone(), Arc::clone(&registry), store);
    let app = router::build_router(state);

    let listen: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    tracing::info!(%listen, rpc = %cfg.rpc_url, targets = registry.len(), "ethgaze exporter starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
    cancel.cancel();
}
