//! Runtime configuration for the Blink actions server.

use once_cell::sync::Lazy;
use solana_sdk::native_token::sol_to_lamports;
use solana_sdk::pubkey::Pubkey;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default devnet fee collector; override per cluster.
const DEFAULT_COLLECTOR: &str = "JCSTecnYRdTTeFTGxQuoPJzJGHpsmv6PQkPnKMz9isvi";

/// Devnet genesis-hash prefix for the `X-Blockchain-Ids` header.
const DEFAULT_BLOCKCHAIN_IDS: &str = "solana:EtWTRABZaYq6iMfeYKouRu166VU2xqa1";

#[derive(Debug)]
pub struct Settings {
    /// JSON-RPC endpoint of the target cluster.
    pub rpc_url: String,
    /// Per-attempt deadline applied to every RPC call.
    pub rpc_timeout: Duration,
    /// Additional attempts after a failed RPC call.
    pub rpc_retries: usize,
    /// Origin used when rendering action hrefs and icon URLs.
    pub base_url: String,
    /// `X-Action-Version` response header value.
    pub action_version: String,
    /// `X-Blockchain-Ids` response header value.
    pub blockchain_ids: String,
    /// Recipient of donations.
    pub donation_address: Pubkey,
    /// Recipient of lost game entry fees.
    pub fee_collector: Pubkey,
    /// Game entry fee, lamports.
    pub entry_fee: u64,
    /// Win payout is the entry fee times this.
    pub prize_multiplier: u64,
    /// Inclusive guessing range.
    pub min_number: u8,
    pub max_number: u8,
    /// Lamports paid out per airdrop claim.
    pub claim_amount: u64,
    /// Minimum balance a claimant must already hold to be eligible, lamports.
    pub claim_min_balance: u64,
}

impl Settings {
    fn from_env() -> Self {
        Settings {
            rpc_url: env::var("SOLANA_RPC_URL")
                .unwrap_or_else(|_| "https://api.devnet.solana.com".into()),
            rpc_timeout: Duration::from_secs(env_parse("RPC_TIMEOUT_SECS").unwrap_or(10)),
            rpc_retries: env_parse("RPC_RETRIES").unwrap_or(2),
            base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".into()),
            action_version: env::var("ACTION_VERSION").unwrap_or_else(|_| "2.1.3".into()),
            blockchain_ids: env::var("BLOCKCHAIN_IDS")
                .unwrap_or_else(|_| DEFAULT_BLOCKCHAIN_IDS.into()),
            donation_address: env_pubkey("DONATION_ADDRESS", DEFAULT_COLLECTOR),
            fee_collector: env_pubkey("FEE_COLLECTOR", DEFAULT_COLLECTOR),
            entry_fee: sol_to_lamports(env_parse("GAME_ENTRY_FEE_SOL").unwrap_or(10.0)),
            prize_multiplier: env_parse("GAME_PRIZE_MULTIPLIER").unwrap_or(2),
            min_number: env_parse("GAME_MIN_NUMBER").unwrap_or(1),
            max_number: env_parse("GAME_MAX_NUMBER").unwrap_or(12),
            claim_amount: sol_to_lamports(env_parse("CLAIM_AMOUNT_SOL").unwrap_or(0.1)),
            claim_min_balance: sol_to_lamports(env_parse("CLAIM_MIN_BALANCE_SOL").unwrap_or(0.1)),
        }
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

fn env_pubkey(key: &str, default: &str) -> Pubkey {
    env::var(key)
        .ok()
        .and_then(|v| Pubkey::from_str(&v).ok())
        .unwrap_or_else(|| Pubkey::from_str(default).expect("default pubkey"))
}

static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);

pub fn settings() -> &'static Settings {
    &SETTINGS
}
