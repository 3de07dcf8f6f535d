//! Per-action parameter validation and transaction builders.

pub mod claim;
pub mod donate;
pub mod game;
pub mod token;

use solana_sdk::transaction::Transaction;

/// Flat fee headroom for a single-signature transaction, lamports.
pub const FEE_HEADROOM_LAMPORTS: u64 = 5_000;

/// A fully assembled (possibly partially signed) transaction plus the
/// human-readable line shown in the wallet.
#[derive(Debug)]
pub struct BuiltAction {
    pub transaction: Transaction,
    pub message: String,
}
