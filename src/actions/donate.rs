//! Donation action: a plain SOL transfer to the configured address.

use serde::Deserialize;
use solana_sdk::native_token::{lamports_to_sol, sol_to_lamports};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_instruction;
use solana_sdk::transaction::Transaction;

use crate::actions::{BuiltAction, FEE_HEADROOM_LAMPORTS};
use crate::chain::Ledger;
use crate::config::settings;
use crate::error::ActionError;

/// Amounts offered as one-click links in the descriptor, SOL.
pub const PRESET_AMOUNTS_SOL: [f64; 3] = [0.1, 1.0, 5.0];

/// Sanity ceiling on a single donation, SOL.
pub const MAX_AMOUNT_SOL: f64 = 1000.0;

#[derive(Debug, Default, Deserialize)]
pub struct DonateQuery {
    pub amount: Option<String>,
}

pub fn amount_pattern() -> String {
    "^[0-9]+(\\.[0-9]+)?$".into()
}

/// Parse and bound the requested amount, returning lamports.
pub fn validate(query: &DonateQuery) -> Result<u64, ActionError> {
    let mut violations = Vec::new();
    let raw = query.amount.as_deref().map(str::trim).unwrap_or_default();
    let mut lamports = 0;

    if raw.is_empty() {
        violations.push("amount is required".to_string());
    } else {
        match raw.parse::<f64>() {
            Ok(sol) if sol.is_finite() && sol > 0.0 && sol <= MAX_AMOUNT_SOL => {
                lamports = sol_to_lamports(sol);
                if lamports == 0 {
                    violations.push("amount is below the minimum transferable".to_string());
                }
            }
            _ => violations.push(format!(
                "amount must be a number between 0 and {MAX_AMOUNT_SOL} SOL"
            )),
        }
    }

    if violations.is_empty() {
        Ok(lamports)
    } else {
        Err(ActionError::Validation(violations))
    }
}

pub async fn build_donation<L: Ledger + ?Sized>(
    ledger: &L,
    sender: &Pubkey,
    lamports: u64,
) -> Result<BuiltAction, ActionError> {
    let required = lamports.saturating_add(FEE_HEADROOM_LAMPORTS);
    let actual = ledger.balance(sender).await.map_err(ActionError::Upstream)?;
    if actual < required {
        return Err(ActionError::InsufficientFunds { required, actual });
    }

    let instruction = system_instruction::transfer(sender, &settings().donation_address, lamports);
    let blockhash = ledger
        .latest_blockhash()
        .await
        .map_err(ActionError::Upstream)?;
    let mut transaction = Transaction::new_with_payer(&[instruction], Some(sender));
    transaction.message.recent_blockhash = blockhash;

    Ok(BuiltAction {
        transaction,
        message: format!("Donating {} SOL", lamports_to_sol(lamports)),
    })
}
