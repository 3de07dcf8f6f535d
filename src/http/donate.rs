//! Donation action routes.

use actix_web::{post, route, web, HttpResponse, Responder};

use crate::actions::donate::{self, DonateQuery};
use crate::chain::ChainClient;
use crate::config::settings;
use crate::error::ActionError;
use crate::metrics;
use crate::protocol::{
    self, ActionDescriptor, ActionLink, ActionLinks, ActionPostRequest, ParameterSpec,
};

/// GET /api/actions/donate (OPTIONS mirrors GET for preflight)
#[route("/donate", method = "GET", method = "OPTIONS")]
async fn metadata() -> impl Responder {
    protocol::ok_json(&descriptor())
}

/// POST /api/actions/donate
#[post("/donate")]
async fn submit(
    chain: web::Data<ChainClient>,
    body: web::Json<ActionPostRequest>,
    query: web::Query<DonateQuery>,
) -> Result<HttpResponse, ActionError> {
    let account = protocol::parse_account(&body.account)?;
    let lamports = donate::validate(&query)?;
    let built = donate::build_donation(chain.get_ref(), &account, lamports).await?;
    metrics::TX_BUILT.with_label_values(&["donate"]).inc();
    Ok(protocol::ok_json(&protocol::transaction_response(&built)?))
}

pub fn descriptor() -> ActionDescriptor {
    let base = &settings().base_url;
    let path = format!("{base}/api/actions/donate");

    let mut actions: Vec<ActionLink> = donate::PRESET_AMOUNTS_SOL
        .iter()
        .map(|amount| {
            ActionLink::transaction(
                format!("Donate {amount} SOL"),
                format!("{path}?amount={amount}"),
            )
        })
        .collect();
    actions.push(
        ActionLink::transaction("Donate a custom amount", format!("{path}?amount={{amount}}"))
            .with_parameters(vec![ParameterSpec::required("amount", "Amount (SOL)")
                .with_pattern(donate::amount_pattern())]),
    );

    ActionDescriptor {
        icon: format!("{base}/donate-icon.png"),
        title: "Donate SOL".to_string(),
        description: format!(
            "Support development with a one-time SOL donation to {}.",
            settings().donation_address
        ),
        label: "Donate".to_string(),
        links: ActionLinks { actions },
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(metadata).service(submit);
}
