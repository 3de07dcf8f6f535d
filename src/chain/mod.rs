//! Ledger access: an RPC wrapper with per-attempt timeouts and bounded
//! retry, plus the wire encoding of built transactions.

use std::future::Future;
use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::Retry;

use crate::config::settings;

/// The three ledger queries the builders need. Kept as a trait so builders
/// can run against a fake node in tests.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn balance(&self, account: &Pubkey) -> anyhow::Result<u64>;
    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> anyhow::Result<u64>;
    async fn latest_blockhash(&self) -> anyhow::Result<Hash>;
}

pub struct ChainClient {
    rpc: RpcClient,
    timeout: Duration,
    retries: usize,
}

impl ChainClient {
    pub fn new(rpc_url: &str, timeout: Duration, retries: usize) -> Self {
        ChainClient {
            rpc: RpcClient::new(rpc_url.to_string()),
            timeout,
            retries,
        }
    }

    pub fn from_settings() -> Self {
        let s = settings();
        Self::new(&s.rpc_url, s.rpc_timeout, s.rpc_retries)
    }

    /// Run one RPC call with a deadline per attempt and exponential backoff
    /// between attempts.
    async fn with_retry<T, E, Fut, F>(&self, mut op: F) -> anyhow::Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let strategy = ExponentialBackoff::from_millis(100)
            .map(jitter)
            .take(self.retries);
        let timeout = self.timeout;

        Retry::spawn(strategy, || {
            let attempt = op();
            async move {
                match tokio::time::timeout(timeout, attempt).await {
                    Ok(Ok(value)) => Ok(value),
                    Ok(Err(err)) => Err(anyhow::Error::new(err)),
                    Err(_) => Err(anyhow!("rpc call timed out after {timeout:?}")),
                }
            }
        })
        .await
    }
}

#[async_trait]
impl Ledger for ChainClient {
    async fn balance(&self, account: &Pubkey) -> anyhow::Result<u64> {
        self.with_retry(|| self.rpc.get_balance(account))
            .await
            .context("get_balance")
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> anyhow::Result<u64> {
        self.with_retry(|| self.rpc.get_minimum_balance_for_rent_exemption(data_len))
            .await
            .context("get_minimum_balance_for_rent_exemption")
    }

    async fn latest_blockhash(&self) -> anyhow::Result<Hash> {
        self.with_retry(|| self.rpc.get_latest_blockhash())
            .await
            .context("get_latest_blockhash")
    }
}

/// Serialize a transaction into the base64 blob carried by the envelope.
pub fn encode_transaction(tx: &Transaction) -> anyhow::Result<String> {
    let bytes = bincode::serialize(tx).context("serialize transaction")?;
    Ok(base64::encode(bytes))
}
