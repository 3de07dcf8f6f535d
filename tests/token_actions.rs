//! Validation boundaries and builder invariants for the token actions.

mod common;

use blink_server::actions::token::{
    self, TokenActionSpec, TokenQuery, NAME_MAX, NAME_MIN, TICKER_MAX, TICKER_MIN,
};
use blink_server::error::ActionError;
use common::MockLedger;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::system_program;

fn query(name: &str, ticker: &str) -> TokenQuery {
    TokenQuery {
        name: Some(name.to_string()),
        ticker: Some(ticker.to_string()),
        ..TokenQuery::default()
    }
}

fn violations(err: ActionError) -> Vec<String> {
    match err {
        ActionError::Validation(list) => list,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn name_length_boundaries() {
    let spec = TokenActionSpec::legacy();

    let min = "a".repeat(NAME_MIN);
    let max = "a".repeat(NAME_MAX);
    assert!(token::validate(&query(&min, "SOL"), &spec).is_ok());
    assert!(token::validate(&query(&max, "SOL"), &spec).is_ok());

    let short = "a".repeat(NAME_MIN - 1);
    let long = "a".repeat(NAME_MAX + 1);
    assert!(token::validate(&query(&short, "SOL"), &spec).is_err());
    assert!(token::validate(&query(&long, "SOL"), &spec).is_err());
}

#[test]
fn ticker_length_boundaries() {
    let spec = TokenActionSpec::legacy();

    assert!(token::validate(&query("Doge", &"s".repeat(TICKER_MIN)), &spec).is_ok());
    assert!(token::validate(&query("Doge", &"s".repeat(TICKER_MAX)), &spec).is_ok());
    assert!(token::validate(&query("Doge", &"s".repeat(TICKER_MIN - 1)), &spec).is_err());
    assert!(token::validate(&query("Doge", &"s".repeat(TICKER_MAX + 1)), &spec).is_err());
}

#[test]
fn every_violation_is_reported_together() {
    let spec = TokenActionSpec::legacy();
    let list = violations(token::validate(&query("a", "x"), &spec).unwrap_err());

    assert_eq!(list.len(), 2);
    assert!(list.iter().any(|v| v.contains("name")));
    assert!(list.iter().any(|v| v.contains("ticker")));
}

#[test]
fn decimals_boundaries_per_standard() {
    let legacy = TokenActionSpec::legacy();
    let t22 = TokenActionSpec::token_2022();

    let with_decimals = |raw: &str| TokenQuery {
        decimals: Some(raw.to_string()),
        ..query("Doge", "DOGE")
    };

    assert!(token::validate(&with_decimals("0"), &legacy).is_ok());
    assert!(token::validate(&with_decimals("9"), &legacy).is_ok());
    assert!(token::validate(&with_decimals("10"), &legacy).is_err());
    assert!(token::validate(&with_decimals("-1"), &legacy).is_err());

    assert!(token::validate(&with_decimals("18"), &t22).is_ok());
    assert!(token::validate(&with_decimals("19"), &t22).is_err());
}

#[test]
fn supply_must_be_positive_and_representable() {
    let spec = TokenActionSpec::legacy();

    let with_supply = |raw: &str| TokenQuery {
        supply: Some(raw.to_string()),
        ..query("Doge", "DOGE")
    };

    assert!(token::validate(&with_supply("1"), &spec).is_ok());
    assert!(token::validate(&with_supply("0"), &spec).is_err());
    assert!(token::validate(&with_supply("lots"), &spec).is_err());

    // u64::MAX whole tokens cannot be scaled by 10^9 base units.
    let list = violations(token::validate(&with_supply(&u64::MAX.to_string()), &spec).unwrap_err());
    assert!(list.iter().any(|v| v.contains("representable")));
}

#[test]
fn image_must_be_http_url() {
    let spec = TokenActionSpec::legacy();

    let with_image = |raw: &str| TokenQuery {
        image: Some(raw.to_string()),
        ..query("Doge", "DOGE")
    };

    assert!(token::validate(&with_image("https://example.com/i.png"), &spec).is_ok());
    assert!(token::validate(&with_image("not a url"), &spec).is_err());
    assert!(token::validate(&with_image("ftp://example.com/i.png"), &spec).is_err());
}

#[actix_rt::test]
async fn insufficient_balance_fails_before_any_blockhash() {
    let spec = TokenActionSpec::legacy();
    let payer = Pubkey::new_unique();
    let ledger = MockLedger::new(2_000_000).with_balance(payer, 1_000_000);

    let params = token::validate(&query("Doge", "DOGE"), &spec).unwrap();
    let err = token::build_create_token(&ledger, &payer, &params, &spec)
        .await
        .unwrap_err();

    match err {
        ActionError::InsufficientFunds { required, actual } => {
            assert_eq!(required, 2_000_000);
            assert_eq!(actual, 1_000_000);
        }
        other => panic!("expected insufficient funds, got {other:?}"),
    }
    assert_eq!(ledger.blockhash_count(), 0);
}

#[actix_rt::test]
async fn legacy_instructions_are_ordered_and_mint_cosigned() {
    let spec = TokenActionSpec::legacy();
    let payer = Pubkey::new_unique();
    let ledger = MockLedger::new(2_000_000).with_balance(payer, 10_000_000_000);

    let params = token::validate(&query("Doge", "DOGE"), &spec).unwrap();
    let built = token::build_create_token(&ledger, &payer, &params, &spec)
        .await
        .unwrap();

    let message = &built.transaction.message;
    assert_eq!(message.account_keys[0], payer, "payer is the fee payer");

    let programs: Vec<Pubkey> = message
        .instructions
        .iter()
        .map(|ix| *ix.program_id(&message.account_keys))
        .collect();
    assert_eq!(
        programs,
        vec![
            system_program::id(),
            spl_token::id(),
            spl_associated_token_account::id(),
            spl_token::id(),
        ]
    );

    // Tags: InitializeMint = 0 (with requested decimals), MintTo = 7.
    assert_eq!(message.instructions[1].data[0], 0);
    assert_eq!(message.instructions[1].data[1], params.decimals);
    assert_eq!(message.instructions[3].data[0], 7);

    // Payer plus the fresh mint sign; only the mint has signed so far.
    assert_eq!(message.header.num_required_signatures, 2);
    assert_eq!(built.transaction.signatures[0], Signature::default());
    assert_ne!(built.transaction.signatures[1], Signature::default());
}

#[actix_rt::test]
async fn token_2022_orders_metadata_before_mint_use() {
    let spec = TokenActionSpec::token_2022();
    let payer = Pubkey::new_unique();
    let ledger = MockLedger::new(3_000_000).with_balance(payer, 10_000_000_000);

    let q = TokenQuery {
        description: Some("a meme with a plan".to_string()),
        image: Some("https://example.com/i.png".to_string()),
        ..query("Doge", "DOGE")
    };
    let params = token::validate(&q, &spec).unwrap();
    let built = token::build_create_token(&ledger, &payer, &params, &spec)
        .await
        .unwrap();

    let message = &built.transaction.message;
    let programs: Vec<Pubkey> = message
        .instructions
        .iter()
        .map(|ix| *ix.program_id(&message.account_keys))
        .collect();
    assert_eq!(
        programs,
        vec![
            system_program::id(),
            spl_token_2022::id(), // metadata pointer
            spl_token_2022::id(), // initialize mint
            spl_token_2022::id(), // metadata initialize
            spl_token_2022::id(), // description field
            spl_associated_token_account::id(),
            spl_token_2022::id(), // mint to
        ]
    );

    // The pointer extension precedes InitializeMint (tag 0); minting is last.
    assert_eq!(message.instructions[1].data[0], 39);
    assert_eq!(message.instructions[2].data[0], 0);
    assert_eq!(message.instructions[6].data[0], 7);
}

#[actix_rt::test]
async fn token_2022_skips_description_field_when_absent() {
    let spec = TokenActionSpec::token_2022();
    let payer = Pubkey::new_unique();
    let ledger = MockLedger::new(3_000_000).with_balance(payer, 10_000_000_000);

    let params = token::validate(&query("Doge", "DOGE"), &spec).unwrap();
    let built = token::build_create_token(&ledger, &payer, &params, &spec)
        .await
        .unwrap();

    assert_eq!(built.transaction.message.instructions.len(), 6);
}
