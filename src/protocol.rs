//! Solana Actions wire schema and the response header set shared by every
//! route module.

use actix_web::{HttpResponse, HttpResponseBuilder};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::actions::BuiltAction;
use crate::chain;
use crate::config::settings;
use crate::error::ActionError;

/// CORS set carried by every Actions response, success and error alike.
pub const CORS_HEADERS: [(&str, &str); 4] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET,POST,PUT,OPTIONS"),
    (
        "Access-Control-Allow-Headers",
        "Content-Type, Authorization, Content-Encoding, Accept-Encoding",
    ),
    (
        "Access-Control-Expose-Headers",
        "X-Action-Version, X-Blockchain-Ids",
    ),
];

/// Decorate a response with the CORS set plus the two versioning headers.
pub fn apply_action_headers(builder: &mut HttpResponseBuilder) {
    for (name, value) in CORS_HEADERS {
        builder.insert_header((name, value));
    }
    builder.insert_header(("X-Action-Version", settings().action_version.as_str()));
    builder.insert_header(("X-Blockchain-Ids", settings().blockchain_ids.as_str()));
}

/// 200 response with the full Actions header set.
pub fn ok_json<T: Serialize>(payload: &T) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    apply_action_headers(&mut builder);
    builder.json(payload)
}

// ---------- GET (metadata discovery) ----------

#[derive(Debug, Serialize)]
pub struct ActionDescriptor {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub label: String,
    pub links: ActionLinks,
}

#[derive(Debug, Serialize)]
pub struct ActionLinks {
    pub actions: Vec<ActionLink>,
}

#[derive(Debug, Serialize)]
pub struct ActionLink {
    pub label: String,
    pub href: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterSpec>,
}

impl ActionLink {
    pub fn transaction(label: impl Into<String>, href: impl Into<String>) -> Self {
        ActionLink {
            label: label.into(),
            href: href.into(),
            kind: "transaction",
            parameters: Vec::new(),
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<ParameterSpec>) -> Self {
        self.parameters = parameters;
        self
    }
}

/// One user-supplied input. `name` must appear as a `{name}` placeholder in
/// the owning link's href.
#[derive(Debug, Serialize)]
pub struct ParameterSpec {
    pub name: String,
    pub label: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl ParameterSpec {
    pub fn required(name: impl Into<String>, label: impl Into<String>) -> Self {
        ParameterSpec {
            name: name.into(),
            label: label.into(),
            required: true,
            pattern: None,
        }
    }

    pub fn optional(name: impl Into<String>, label: impl Into<String>) -> Self {
        ParameterSpec {
            required: false,
            ..Self::required(name, label)
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }
}

// ---------- POST (transaction construction) ----------

#[derive(Debug, Deserialize)]
pub struct ActionPostRequest {
    pub account: String,
}

/// The outbound envelope: an encoded transaction blob plus the line the
/// wallet shows next to the signing prompt.
#[derive(Debug, Serialize)]
pub struct ActionTransaction {
    pub transaction: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// Decode the submitting account before anything else touches the network.
pub fn parse_account(raw: &str) -> Result<Pubkey, ActionError> {
    Pubkey::from_str(raw.trim()).map_err(|err| ActionError::InvalidAccount(err.to_string()))
}

pub fn transaction_response(built: &BuiltAction) -> Result<ActionTransaction, ActionError> {
    Ok(ActionTransaction {
        transaction: chain::encode_transaction(&built.transaction)
            .map_err(ActionError::Internal)?,
        message: built.message.clone(),
        kind: "transaction",
    })
}
