//! Chain client seam and its JSON-RPC implementation.
//!
//! `ChainClient` is the trait the sweep engine fans out against; tests stub
//! it, production uses `HttpChainClient` speaking Ethereum JSON-RPC over
//! reqwest. Every read is independent: one failing call never aborts the
//! others, and the caller bounds each task's reads with [`CALL_DEADLINE`].

use std::time::Duration;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use serde_json::{json, Value};

use ethgaze_core::{EthGazeError, Result};

/// Per-task deadline covering all chain reads of one sweep task.
pub const CALL_DEADLINE: Duration = Duration::from_secs(5);

/// Block reference for state reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    /// Latest confirmed state.
    Latest,
    /// Mempool view.
    Pending,
}

impl BlockTag {
    fn as_str(self) -> &'static str {
        match self {
            BlockTag::Latest => "latest",
            BlockTag::Pending => "pending",
        }
    }
}

/// Per-address state reads against a remote chain endpoint.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Balance in wei at the given block reference.
    async fn balance_at(&self, address: Address, block: BlockTag) -> Result<U256>;

    /// Balance in wei including mempool transactions.
    async fn pending_balance_at(&self, address: Address) -> Result<U256> {
        self.balance_at(address, BlockTag::Pending).await
    }

    /// Transaction count at the given block reference.
    async fn nonce_at(&self, address: Address, block: BlockTag) -> Result<u64>;

    /// Transaction count including mempool transactions.
    async fn pending_nonce_at(&self, address: Address) -> Result<u64> {
        self.nonce_at(address, BlockTag::Pending).await
    }

    /// Contract code at the given block reference (empty for EOAs).
    async fn code_at(&self, address: Address, block: BlockTag) -> Result<Bytes>;
}

// --------------------
// JSON-RPC wire types
// --------------------

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

fn addr_param(address: Address) -> String {
    format!("0x{}", hex::encode(address.as_slice()))
}

fn expect_str(value: Value, method: &str) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(EthGazeError::Fetch(format!(
            "{method}: expected hex string result, got {other}"
        ))),
    }
}

fn parse_quantity(s: &str, method: &str) -> Result<U256> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| EthGazeError::Fetch(format!("{method}: quantity without 0x: {s:?}")))?;
    U256::from_str_radix(digits, 16)
        .map_err(|e| EthGazeError::Fetch(format!("{method}: bad quantity {s:?}: {e}")))
}

fn parse_quantity_u64(s: &str, method: &str) -> Result<u64> {
    let wide = parse_quantity(s, method)?;
    wide.try_into()
        .map_err(|_| EthGazeError::Fetch(format!("{method}: quantity overflows u64: {s:?}")))
}

fn parse_code(s: &str, method: &str) -> Result<Bytes> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| EthGazeError::Fetch(format!("{method}: code without 0x: {s:?}")))?;
    let raw = hex::decode(digits)
        .map_err(|e| EthGazeError::Fetch(format!("{method}: bad code hex: {e}")))?;
    Ok(Bytes::from(raw))
}

/// JSON-RPC chain client over HTTP.
pub struct HttpChainClient {
    http: reqwest::Client,
    url: String,
}

impl HttpChainClient {
    /// Build the client and probe the endpoint once (`eth_chainId`).
    ///
    /// A failed probe is a fatal connect error: the process must not start
    /// serving against an endpoint it has never reached.
    pub async fn connect(url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(CALL_DEADLINE)
            .build()
            .map_err(|e| EthGazeError::Connect(format!("http client build failed: {e}")))?;

        let client = Self {
            http,
            url: url.to_string(),
        };

        let chain_id = client
            .call("eth_chainId", json!([]))
            .await
            .and_then(|v| expect_str(v, "eth_chainId"))
            .map_err(|e| EthGazeError::Connect(format!("endpoint probe failed: {e}")))?;
        tracing::info!(chain_id = %chain_id, url = %client.url, "chain endpoint reachable");

        Ok(client)
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let resp = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| EthGazeError::Fetch(format!("{method}: {e}")))?;
        let resp: RpcResponse = resp
            .json()
            .await
            .map_err(|e| EthGazeError::Fetch(format!("{method}: bad response body: {e}")))?;

        if let Some(err) = resp.error {
            return Err(EthGazeError::Fetch(format!(
                "{method}: {} (code {})",
                err.message, err.code
            )));
        }
        resp.result
            .ok_or_else(|| EthGazeError::Fetch(format!("{method}: missing result")))
    }
}

#[async_trait]
impl ChainClient for HttpChainClient {
    async fn balance_at(&self, address: Address, block: BlockTag) -> Result<U256> {
        let result = self
            .call("eth_getBalance", json!([addr_param(address), block.as_str()]))
            .await?;
        parse_quantity(&expect_str(result, "eth_getBalance")?, "eth_getBalance")
    }

    async fn nonce_at(&self, address: Address, block: BlockTag) -> Result<u64> {
        let result = self
            .call(
                "eth_getTransactionCount",
                json!([addr_param(address), block.as_str()]),
            )
            .await?;
        parse_quantity_u64(
            &expect_str(result, "eth_getTransactionCount")?,
            "eth_getTransactionCount",
        )
    }

    async fn code_at(&self, address: Address, block: BlockTag) -> Result<Bytes> {
        let result = self
            .call("eth_getCode", json!([addr_param(address), block.as_str()]))
            .await?;
        parse_code(&expect_str(result, "eth_getCode")?, "eth_getCode")
    }
}
