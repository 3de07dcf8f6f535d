//! Wire-schema invariants: descriptors and the transaction envelope.

use blink_server::actions::BuiltAction;
use blink_server::http;
use blink_server::protocol::{self, ActionDescriptor};
use solana_sdk::transaction::Transaction;

fn assert_placeholders_declared(descriptor: &ActionDescriptor) {
    for link in &descriptor.links.actions {
        for parameter in &link.parameters {
            let placeholder = format!("{{{}}}", parameter.name);
            assert!(
                link.href.contains(&placeholder),
                "href {} is missing {}",
                link.href,
                placeholder
            );
        }
    }
}

#[test]
fn every_descriptor_declares_its_placeholders() {
    assert_placeholders_declared(&http::create_token::legacy_descriptor());
    assert_placeholders_declared(&http::create_token::token_2022_descriptor());
    assert_placeholders_declared(&http::donate::descriptor());
    assert_placeholders_declared(&http::claim::descriptor());
    assert_placeholders_declared(&http::game::descriptor());
}

#[test]
fn descriptor_serializes_to_the_actions_schema() {
    let json = serde_json::to_value(http::create_token::legacy_descriptor()).unwrap();

    assert!(json["icon"].is_string());
    assert!(json["title"].is_string());
    let actions = json["links"]["actions"].as_array().unwrap();
    assert!(!actions.is_empty());
    assert_eq!(actions[0]["type"], "transaction");
    assert!(actions[0]["parameters"].as_array().unwrap().len() >= 2);
}

#[test]
fn parameterless_links_omit_the_parameters_key() {
    let json = serde_json::to_value(http::claim::descriptor()).unwrap();
    let link = &json["links"]["actions"][0];

    assert_eq!(link["type"], "transaction");
    assert!(link.get("parameters").is_none());
}

#[test]
fn envelope_carries_an_encoded_transaction() {
    let built = BuiltAction {
        transaction: Transaction::default(),
        message: "hello".to_string(),
    };
    let envelope = protocol::transaction_response(&built).unwrap();
    let json = serde_json::to_value(&envelope).unwrap();

    assert_eq!(json["type"], "transaction");
    assert_eq!(json["message"], "hello");
    let blob = json["transaction"].as_str().unwrap();
    assert!(!blob.is_empty());
    assert!(base64::decode(blob).is_ok());
}

#[test]
fn malformed_accounts_are_rejected_locally() {
    assert!(protocol::parse_account("not-a-key").is_err());
    assert!(protocol::parse_account("").is_err());

    let key = solana_sdk::pubkey::Pubkey::new_unique();
    assert_eq!(protocol::parse_account(&key.to_string()).unwrap(), key);
}

#[test]
fn cors_set_allows_any_origin() {
    let origin = protocol::CORS_HEADERS
        .iter()
        .find(|(name, _)| *name == "Access-Control-Allow-Origin")
        .map(|(_, value)| *value);
    assert_eq!(origin, Some("*"));
}
