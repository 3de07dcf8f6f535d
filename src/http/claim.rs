//! Airdrop-claim routes. The signing key is injected as shared state by
//! `main`, never read from ambient module scope.

use actix_web::{post, route, web, HttpResponse};
use solana_sdk::native_token::lamports_to_sol;

use crate::actions::claim::{self, ClaimQuery, ClaimSigner};
use crate::chain::ChainClient;
use crate::config::settings;
use crate::error::ActionError;
use crate::metrics;
use crate::protocol::{self, ActionDescriptor, ActionLink, ActionLinks, ActionPostRequest};

/// GET /api/actions/claim?action=claim (OPTIONS mirrors GET for preflight)
#[route("/claim", method = "GET", method = "OPTIONS")]
async fn metadata(query: web::Query<ClaimQuery>) -> Result<HttpResponse, ActionError> {
    claim::validate(&query)?;
    Ok(protocol::ok_json(&descriptor()))
}

/// POST /api/actions/claim?action=claim
#[post("/claim")]
async fn submit(
    chain: web::Data<ChainClient>,
    signer: web::Data<ClaimSigner>,
    body: web::Json<ActionPostRequest>,
    query: web::Query<ClaimQuery>,
) -> Result<HttpResponse, ActionError> {
    let account = protocol::parse_account(&body.account)?;
    claim::validate(&query)?;
    let built = claim::build_claim(chain.get_ref(), &signer, &account).await?;
    metrics::TX_BUILT.with_label_values(&["claim"]).inc();
    Ok(protocol::ok_json(&protocol::transaction_response(&built)?))
}

pub fn descriptor() -> ActionDescriptor {
    let base = &settings().base_url;
    let amount = lamports_to_sol(settings().claim_amount);

    ActionDescriptor {
        icon: format!("{base}/airdrop-icon.png"),
        title: "Claim Solana Airdrop".to_string(),
        description: format!(
            "Claim a {amount} SOL airdrop if your wallet meets the eligibility criteria."
        ),
        label: "Claim Airdrop".to_string(),
        links: ActionLinks {
            actions: vec![ActionLink::transaction(
                "Claim Airdrop",
                format!("{base}/api/actions/claim?action=claim"),
            )],
        },
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(metadata).service(submit);
}
