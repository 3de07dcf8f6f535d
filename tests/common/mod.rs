//! Shared fake ledger for builder tests. Counts every call so tests can
//! assert which RPC paths a handler did (or did not) take.
#![allow(dead_code)]

use async_trait::async_trait;
use blink_server::chain::Ledger;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct MockLedger {
    balances: Vec<(Pubkey, u64)>,
    rent_minimum: u64,
    pub balance_calls: AtomicUsize,
    pub rent_calls: AtomicUsize,
    pub blockhash_calls: AtomicUsize,
}

impl MockLedger {
    pub fn new(rent_minimum: u64) -> Self {
        MockLedger {
            balances: Vec::new(),
            rent_minimum,
            balance_calls: AtomicUsize::new(0),
            rent_calls: AtomicUsize::new(0),
            blockhash_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_balance(mut self, account: Pubkey, lamports: u64) -> Self {
        self.balances.push((account, lamports));
        self
    }

    pub fn blockhash_count(&self) -> usize {
        self.blockhash_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn balance(&self, account: &Pubkey) -> anyhow::Result<u64> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .balances
            .iter()
            .find(|(key, _)| key == account)
            .map(|(_, lamports)| *lamports)
            .unwrap_or(0))
    }

    async fn minimum_balance_for_rent_exemption(&self, _data_len: usize) -> anyhow::Result<u64> {
        self.rent_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rent_minimum)
    }

    async fn latest_blockhash(&self) -> anyhow::Result<Hash> {
        self.blockhash_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Hash::new_unique())
    }
}
