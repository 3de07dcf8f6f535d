//! Airdrop-claim action, signed by a key injected at startup.

use serde::Deserialize;
use solana_sdk::native_token::lamports_to_sol;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair_file, Keypair, Signer};
use solana_sdk::system_instruction;
use solana_sdk::transaction::Transaction;
use std::env;

use crate::actions::{BuiltAction, FEE_HEADROOM_LAMPORTS};
use crate::chain::Ledger;
use crate::config::settings;
use crate::error::ActionError;

/// The airdrop account's signing key, loaded once at startup and handed to
/// the claim route as shared state.
pub struct ClaimSigner {
    keypair: Keypair,
}

impl ClaimSigner {
    /// Load from `AIRDROP_KEYPAIR` (a keypair file path). Without one, an
    /// ephemeral key is generated so devnet instances come up unconfigured.
    pub fn load() -> Self {
        match env::var("AIRDROP_KEYPAIR") {
            Ok(path) => match read_keypair_file(&path) {
                Ok(keypair) => {
                    log::info!("airdrop signer loaded from {path}");
                    ClaimSigner { keypair }
                }
                Err(err) => panic!("unreadable AIRDROP_KEYPAIR {path}: {err}"),
            },
            Err(_) => {
                log::warn!("AIRDROP_KEYPAIR not set; using an ephemeral keypair");
                ClaimSigner {
                    keypair: Keypair::new(),
                }
            }
        }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ClaimQuery {
    pub action: Option<String>,
}

/// The route only serves the literal `claim` action.
pub fn validate(query: &ClaimQuery) -> Result<(), ActionError> {
    match query.action.as_deref() {
        Some("claim") => Ok(()),
        _ => Err(ActionError::Validation(vec![
            "action must be \"claim\"".to_string(),
        ])),
    }
}

pub async fn build_claim<L: Ledger + ?Sized>(
    ledger: &L,
    signer: &ClaimSigner,
    recipient: &Pubkey,
) -> Result<BuiltAction, ActionError> {
    let s = settings();

    // Eligibility gate first: claimants must already hold a minimum balance.
    let held = ledger
        .balance(recipient)
        .await
        .map_err(ActionError::Upstream)?;
    if held < s.claim_min_balance {
        return Err(ActionError::NotEligible);
    }

    let pot = ledger
        .balance(&signer.pubkey())
        .await
        .map_err(ActionError::Upstream)?;
    let required = s.claim_amount.saturating_add(FEE_HEADROOM_LAMPORTS);
    if pot < required {
        return Err(ActionError::InsufficientFunds {
            required,
            actual: pot,
        });
    }

    let instruction = system_instruction::transfer(&signer.pubkey(), recipient, s.claim_amount);
    let blockhash = ledger
        .latest_blockhash()
        .await
        .map_err(ActionError::Upstream)?;
    // The airdrop account both pays the fee and funds the transfer, so the
    // transaction leaves here fully signed.
    let mut transaction = Transaction::new_with_payer(&[instruction], Some(&signer.pubkey()));
    transaction
        .try_sign(&[&signer.keypair], blockhash)
        .map_err(|err| ActionError::Internal(anyhow::Error::new(err)))?;

    Ok(BuiltAction {
        transaction,
        message: format!(
            "Airdrop claim transaction created for {} SOL",
            lamports_to_sol(s.claim_amount)
        ),
    })
}
