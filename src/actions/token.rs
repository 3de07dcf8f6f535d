//! Token-creation builder, parameterized by token standard. The legacy and
//! Token-2022 routes share this module; only the standard tag and the
//! metadata flag differ.

use anyhow::anyhow;
use serde::Deserialize;
use solana_sdk::instruction::Instruction;
use solana_sdk::program_pack::Pack;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::system_instruction;
use solana_sdk::transaction::Transaction;
use spl_token_2022::extension::metadata_pointer;
use spl_token_2022::extension::ExtensionType;
use spl_token_metadata_interface::state::{Field, TokenMetadata};
use url::Url;

use crate::actions::BuiltAction;
use crate::chain::Ledger;
use crate::error::ActionError;

pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 32;
pub const TICKER_MIN: usize = 2;
pub const TICKER_MAX: usize = 10;
pub const DESCRIPTION_MAX: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStandard {
    Legacy,
    Token2022,
}

impl TokenStandard {
    pub fn program_id(self) -> Pubkey {
        match self {
            TokenStandard::Legacy => spl_token::id(),
            TokenStandard::Token2022 => spl_token_2022::id(),
        }
    }

    pub fn max_decimals(self) -> u8 {
        match self {
            TokenStandard::Legacy => 9,
            TokenStandard::Token2022 => 18,
        }
    }
}

/// Per-route builder configuration.
#[derive(Debug, Clone, Copy)]
pub struct TokenActionSpec {
    pub standard: TokenStandard,
    pub default_decimals: u8,
    pub default_supply: u64,
    pub with_metadata: bool,
}

impl TokenActionSpec {
    pub fn legacy() -> Self {
        TokenActionSpec {
            standard: TokenStandard::Legacy,
            default_decimals: 9,
            default_supply: 1_000_000,
            with_metadata: false,
        }
    }

    pub fn token_2022() -> Self {
        TokenActionSpec {
            standard: TokenStandard::Token2022,
            default_decimals: 9,
            default_supply: 1_000_000,
            with_metadata: true,
        }
    }
}

/// Raw query string, straight off the request.
#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    pub name: Option<String>,
    pub ticker: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub decimals: Option<String>,
    pub supply: Option<String>,
}

/// Validated token parameters. `supply` is in whole tokens.
#[derive(Debug, Clone)]
pub struct TokenParams {
    pub name: String,
    pub ticker: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub decimals: u8,
    pub supply: u64,
}

/// Whole-token supply scaled to base units, `None` on overflow.
pub fn base_units(supply: u64, decimals: u8) -> Option<u64> {
    10u64
        .checked_pow(decimals as u32)
        .and_then(|scale| supply.checked_mul(scale))
}

// Patterns advertised in descriptors; kept next to the rules they mirror so
// the two cannot drift apart silently.

pub fn name_pattern() -> String {
    format!("^.{{{NAME_MIN},{NAME_MAX}}}$")
}

pub fn ticker_pattern() -> String {
    format!("^.{{{TICKER_MIN},{TICKER_MAX}}}$")
}

pub fn decimals_pattern(max: u8) -> String {
    if max <= 9 {
        format!("^[0-{max}]$")
    } else {
        format!("^([0-9]|1[0-{}])$", max - 10)
    }
}

pub fn supply_pattern() -> String {
    "^[1-9][0-9]*$".into()
}

/// Check every field and report all violations together, not just the first.
pub fn validate(query: &TokenQuery, spec: &TokenActionSpec) -> Result<TokenParams, ActionError> {
    let mut violations = Vec::new();
    let max_decimals = spec.standard.max_decimals();

    let name = query
        .name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    let name_len = name.chars().count();
    if name_len < NAME_MIN || name_len > NAME_MAX {
        violations.push(format!("name must be {NAME_MIN}-{NAME_MAX} characters"));
    }

    let ticker = query
        .ticker
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    let ticker_len = ticker.chars().count();
    if ticker_len < TICKER_MIN || ticker_len > TICKER_MAX {
        violations.push(format!("ticker must be {TICKER_MIN}-{TICKER_MAX} characters"));
    }

    let decimals = match query.decimals.as_deref().map(str::trim) {
        None | Some("") => spec.default_decimals,
        Some(raw) => match raw.parse::<u8>() {
            Ok(d) if d <= max_decimals => d,
            _ => {
                violations.push(format!(
                    "decimals must be an integer between 0 and {max_decimals}"
                ));
                spec.default_decimals
            }
        },
    };

    let supply = match query.supply.as_deref().map(str::trim) {
        None | Some("") => spec.default_supply,
        Some(raw) => match raw.parse::<u64>() {
            Ok(s) if s > 0 => s,
            _ => {
                violations.push("initial supply must be a positive integer".to_string());
                spec.default_supply
            }
        },
    };

    if base_units(supply, decimals).is_none() {
        violations.push(format!(
            "initial supply exceeds the representable range at {decimals} decimals"
        ));
    }

    let image = match query.image.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => None,
        Some(raw) => match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Some(raw.to_string()),
            _ => {
                violations.push("image must be a valid http(s) URL".to_string());
                None
            }
        },
    };

    let description = query
        .description
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    if let Some(d) = &description {
        if d.chars().count() > DESCRIPTION_MAX {
            violations.push(format!("description must be at most {DESCRIPTION_MAX} characters"));
        }
    }

    if !violations.is_empty() {
        return Err(ActionError::Validation(violations));
    }

    Ok(TokenParams {
        name,
        ticker,
        description,
        image,
        decimals,
        supply,
    })
}

/// Assemble the create-token transaction. All ledger reads happen before any
/// instruction exists; a failed funds check never burns a blockhash.
pub async fn build_create_token<L: Ledger + ?Sized>(
    ledger: &L,
    payer: &Pubkey,
    params: &TokenParams,
    spec: &TokenActionSpec,
) -> Result<BuiltAction, ActionError> {
    let mint = Keypair::new();
    let mint_pubkey = mint.pubkey();
    let program_id = spec.standard.program_id();
    let with_metadata = spec.with_metadata && spec.standard == TokenStandard::Token2022;

    let mint_space = match spec.standard {
        TokenStandard::Legacy => spl_token::state::Mint::LEN,
        TokenStandard::Token2022 => {
            let extensions: &[ExtensionType] = if with_metadata {
                &[ExtensionType::MetadataPointer]
            } else {
                &[]
            };
            ExtensionType::try_calculate_account_len::<spl_token_2022::state::Mint>(extensions)
                .map_err(internal)?
        }
    };

    // Metadata lands in the mint's TLV space after initialization, so rent
    // must cover it even though create_account only allocates the mint space.
    let metadata_space = if with_metadata {
        token_metadata(params, &mint_pubkey, payer)?
            .tlv_size_of()
            .map_err(internal)?
    } else {
        0
    };

    let required = ledger
        .minimum_balance_for_rent_exemption(mint_space + metadata_space)
        .await
        .map_err(ActionError::Upstream)?;
    let actual = ledger.balance(payer).await.map_err(ActionError::Upstream)?;
    if actual < required {
        return Err(ActionError::InsufficientFunds { required, actual });
    }

    let mut instructions = vec![system_instruction::create_account(
        payer,
        &mint_pubkey,
        required,
        mint_space as u64,
        &program_id,
    )];

    // Extension state must be initialized before the mint itself.
    if with_metadata {
        instructions.push(
            metadata_pointer::instruction::initialize(
                &program_id,
                &mint_pubkey,
                Some(*payer),
                Some(mint_pubkey),
            )
            .map_err(internal)?,
        );
    }

    instructions.push(initialize_mint(spec.standard, &mint_pubkey, payer, params.decimals)?);

    if with_metadata {
        instructions.push(spl_token_metadata_interface::instruction::initialize(
            &program_id,
            &mint_pubkey,
            payer,
            &mint_pubkey,
            payer,
            params.name.clone(),
            params.ticker.clone(),
            params.image.clone().unwrap_or_default(),
        ));
        if let Some(description) = &params.description {
            instructions.push(spl_token_metadata_interface::instruction::update_field(
                &program_id,
                &mint_pubkey,
                payer,
                Field::Key("description".to_string()),
                description.clone(),
            ));
        }
    }

    let ata = spl_associated_token_account::get_associated_token_address_with_program_id(
        payer,
        &mint_pubkey,
        &program_id,
    );
    instructions.push(
        spl_associated_token_account::instruction::create_associated_token_account(
            payer,
            payer,
            &mint_pubkey,
            &program_id,
        ),
    );

    let amount = base_units(params.supply, params.decimals)
        .ok_or_else(|| ActionError::Internal(anyhow!("supply overflow past validation")))?;
    instructions.push(mint_to(spec.standard, &mint_pubkey, &ata, payer, amount)?);

    let blockhash = ledger
        .latest_blockhash()
        .await
        .map_err(ActionError::Upstream)?;
    let mut transaction = Transaction::new_with_payer(&instructions, Some(payer));
    // The fresh mint is a required signer of its own creation; the payer
    // signature is added client-side by the wallet.
    transaction.partial_sign(&[&mint], blockhash);

    Ok(BuiltAction {
        transaction,
        message: format!(
            "Creating {} ({}) with an initial supply of {}",
            params.name, params.ticker, params.supply
        ),
    })
}

fn token_metadata(
    params: &TokenParams,
    mint: &Pubkey,
    authority: &Pubkey,
) -> Result<TokenMetadata, ActionError> {
    Ok(TokenMetadata {
        update_authority: Some(*authority).try_into().map_err(internal)?,
        mint: *mint,
        name: params.name.clone(),
        symbol: params.ticker.clone(),
        uri: params.image.clone().unwrap_or_default(),
        additional_metadata: Vec::new(),
    })
}

fn initialize_mint(
    standard: TokenStandard,
    mint: &Pubkey,
    authority: &Pubkey,
    decimals: u8,
) -> Result<Instruction, ActionError> {
    match standard {
        TokenStandard::Legacy => spl_token::instruction::initialize_mint(
            &spl_token::id(),
            mint,
            authority,
            Some(authority),
            decimals,
        ),
        TokenStandard::Token2022 => spl_token_2022::instruction::initialize_mint(
            &spl_token_2022::id(),
            mint,
            authority,
            Some(authority),
            decimals,
        ),
    }
    .map_err(internal)
}

fn mint_to(
    standard: TokenStandard,
    mint: &Pubkey,
    destination: &Pubkey,
    authority: &Pubkey,
    amount: u64,
) -> Result<Instruction, ActionError> {
    match standard {
        TokenStandard::Legacy => spl_token::instruction::mint_to(
            &spl_token::id(),
            mint,
            destination,
            authority,
            &[],
            amount,
        ),
        TokenStandard::Token2022 => spl_token_2022::instruction::mint_to(
            &spl_token_2022::id(),
            mint,
            destination,
            authority,
            &[],
            amount,
        ),
    }
    .map_err(internal)
}

fn internal<E: std::error::Error + Send + Sync + 'static>(err: E) -> ActionError {
    ActionError::Internal(anyhow::Error::new(err))
}
