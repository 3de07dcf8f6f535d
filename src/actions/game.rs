//! Number-guessing game: round resolution and the settling transfer.

use rand::Rng;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_instruction;
use solana_sdk::transaction::Transaction;

use crate::actions::{BuiltAction, FEE_HEADROOM_LAMPORTS};
use crate::chain::Ledger;
use crate::config::settings;
use crate::error::ActionError;

/// Game parameters snapshot used by one round.
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub entry_fee: u64,
    pub prize_multiplier: u64,
    pub min_number: u8,
    pub max_number: u8,
    pub fee_collector: Pubkey,
}

impl GameConfig {
    pub fn from_settings() -> Self {
        let s = settings();
        GameConfig {
            entry_fee: s.entry_fee,
            prize_multiplier: s.prize_multiplier,
            min_number: s.min_number,
            max_number: s.max_number,
            fee_collector: s.fee_collector,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GameQuery {
    #[serde(rename = "selectedNumber")]
    pub selected_number: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
}

/// A validated bet. No winning number exists yet.
#[derive(Debug)]
pub struct PendingRound {
    selected: u8,
}

impl PendingRound {
    /// Reject out-of-range selections before any random draw or network call.
    pub fn place(query: &GameQuery, cfg: &GameConfig) -> Result<PendingRound, ActionError> {
        let selected: i64 = query
            .selected_number
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0);
        if selected < cfg.min_number as i64 || selected > cfg.max_number as i64 {
            return Err(ActionError::Validation(vec![format!(
                "Select a number between {} and {}",
                cfg.min_number, cfg.max_number
            )]));
        }
        Ok(PendingRound {
            selected: selected as u8,
        })
    }

    pub fn selected(&self) -> u8 {
        self.selected
    }

    /// Draw the winning number and settle the outcome. The draw is an
    /// unseeded process-local PRNG with no verifiable-fairness mechanism,
    /// which rules this out for real-value wagering.
    pub fn resolve(self, rng: &mut impl Rng, cfg: &GameConfig) -> ResolvedRound {
        let winning = rng.random_range(cfg.min_number..=cfg.max_number);
        let outcome = if winning == self.selected {
            Outcome::Win
        } else {
            Outcome::Lose
        };
        ResolvedRound {
            selected: self.selected,
            winning,
            outcome,
        }
    }
}

/// A settled round; transfer amount and beneficiary derive from it.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedRound {
    pub selected: u8,
    pub winning: u8,
    pub outcome: Outcome,
}

impl ResolvedRound {
    /// Lamports moved by the round's settling transfer.
    pub fn transfer_lamports(&self, cfg: &GameConfig) -> u64 {
        match self.outcome {
            Outcome::Win => cfg.entry_fee.saturating_mul(cfg.prize_multiplier),
            Outcome::Lose => cfg.entry_fee,
        }
    }

    /// Wins pay back to the player (there is no funded escrow to draw from);
    /// losses forward the entry fee to the collector.
    pub fn beneficiary(&self, player: &Pubkey, cfg: &GameConfig) -> Pubkey {
        match self.outcome {
            Outcome::Win => *player,
            Outcome::Lose => cfg.fee_collector,
        }
    }

    pub fn message(&self) -> String {
        match self.outcome {
            Outcome::Win => format!(
                "Villainous victory! You cracked the code: the number was {}.",
                self.winning
            ),
            Outcome::Lose => format!(
                "Foiled again! You picked {} but the number was {}. Better luck next time.",
                self.selected, self.winning
            ),
        }
    }
}

pub async fn build_round<L: Ledger + ?Sized>(
    ledger: &L,
    player: &Pubkey,
    round: &ResolvedRound,
    cfg: &GameConfig,
) -> Result<BuiltAction, ActionError> {
    let lamports = round.transfer_lamports(cfg);
    let required = lamports.saturating_add(FEE_HEADROOM_LAMPORTS);
    let actual = ledger.balance(player).await.map_err(ActionError::Upstream)?;
    if actual < required {
        return Err(ActionError::InsufficientFunds { required, actual });
    }

    let beneficiary = round.beneficiary(player, cfg);
    let instruction = system_instruction::transfer(player, &beneficiary, lamports);
    let blockhash = ledger
        .latest_blockhash()
        .await
        .map_err(ActionError::Upstream)?;
    let mut transaction = Transaction::new_with_payer(&[instruction], Some(player));
    transaction.message.recent_blockhash = blockhash;

    Ok(BuiltAction {
        transaction,
        message: round.message(),
    })
}
