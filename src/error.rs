//! Error taxonomy and the single boundary translating it to HTTP responses.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use solana_sdk::native_token::lamports_to_sol;
use thiserror::Error;

use crate::protocol;

#[derive(Debug, Error)]
pub enum ActionError {
    /// The `account` field did not decode to a public key.
    #[error("invalid account: {0}")]
    InvalidAccount(String),

    /// Every field-validation violation found in the request, together.
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    /// The paying account cannot cover the transaction, lamports.
    #[error("insufficient funds: {required} lamports required, {actual} held")]
    InsufficientFunds { required: u64, actual: u64 },

    /// Claimant does not meet the airdrop criteria.
    #[error("account is not eligible for this airdrop")]
    NotEligible,

    /// RPC failure or timeout talking to the ledger node.
    #[error("upstream rpc failure: {0}")]
    Upstream(anyhow::Error),

    /// Instruction or transaction encoding failed server-side.
    #[error("internal construction failure: {0}")]
    Internal(anyhow::Error),
}

impl ResponseError for ActionError {
    fn status_code(&self) -> StatusCode {
        match self {
            ActionError::Upstream(_) | ActionError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ActionError::Validation(violations) => json!({ "errors": violations }),
            ActionError::InsufficientFunds { required, actual } => json!({
                "error": format!(
                    "Insufficient funds: {} SOL required, {} SOL available",
                    lamports_to_sol(*required),
                    lamports_to_sol(*actual),
                )
            }),
            // Internal detail stays in the log; the client gets a fixed line.
            ActionError::Upstream(err) | ActionError::Internal(err) => {
                log::error!("transaction construction failed: {err:#}");
                json!({ "error": "transaction construction failed" })
            }
            other => json!({ "error": other.to_string() }),
        };

        let mut builder = HttpResponse::build(self.status_code());
        protocol::apply_action_headers(&mut builder);
        builder.json(body)
    }
}
