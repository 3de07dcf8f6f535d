//! Token-creation actions, one route per token standard. Both delegate to
//! the shared builder in [`crate::actions::token`].

use actix_web::{post, route, web, HttpResponse, Responder};

use crate::actions::token::{self, TokenActionSpec, TokenQuery};
use crate::chain::ChainClient;
use crate::config::settings;
use crate::error::ActionError;
use crate::metrics;
use crate::protocol::{
    self, ActionDescriptor, ActionLink, ActionLinks, ActionPostRequest, ParameterSpec,
};

/// GET /api/actions/create-token (OPTIONS mirrors GET for preflight)
#[route("/create-token", method = "GET", method = "OPTIONS")]
async fn legacy_metadata() -> impl Responder {
    protocol::ok_json(&legacy_descriptor())
}

/// POST /api/actions/create-token
#[post("/create-token")]
async fn legacy_submit(
    chain: web::Data<ChainClient>,
    body: web::Json<ActionPostRequest>,
    query: web::Query<TokenQuery>,
) -> Result<HttpResponse, ActionError> {
    submit(&chain, &body, &query, &TokenActionSpec::legacy(), "create-token").await
}

/// GET /api/actions/create-token-2022 (OPTIONS mirrors GET for preflight)
#[route("/create-token-2022", method = "GET", method = "OPTIONS")]
async fn token_2022_metadata() -> impl Responder {
    protocol::ok_json(&token_2022_descriptor())
}

/// POST /api/actions/create-token-2022
#[post("/create-token-2022")]
async fn token_2022_submit(
    chain: web::Data<ChainClient>,
    body: web::Json<ActionPostRequest>,
    query: web::Query<TokenQuery>,
) -> Result<HttpResponse, ActionError> {
    submit(
        &chain,
        &body,
        &query,
        &TokenActionSpec::token_2022(),
        "create-token-2022",
    )
    .await
}

async fn submit(
    chain: &ChainClient,
    body: &ActionPostRequest,
    query: &TokenQuery,
    spec: &TokenActionSpec,
    metric: &str,
) -> Result<HttpResponse, ActionError> {
    let account = protocol::parse_account(&body.account)?;
    let params = token::validate(query, spec)?;
    let built = token::build_create_token(chain, &account, &params, spec).await?;
    metrics::TX_BUILT.with_label_values(&[metric]).inc();
    Ok(protocol::ok_json(&protocol::transaction_response(&built)?))
}

pub fn legacy_descriptor() -> ActionDescriptor {
    descriptor(
        "create-token",
        "Create Your Meme Coin",
        "Fill in the details to create your own meme coin on Solana.",
        "Create Meme Coin",
        &TokenActionSpec::legacy(),
    )
}

pub fn token_2022_descriptor() -> ActionDescriptor {
    descriptor(
        "create-token-2022",
        "Create a Token-2022 Mint",
        "Launch a token with on-chain metadata via the Token-2022 program.",
        "Create Token",
        &TokenActionSpec::token_2022(),
    )
}

fn descriptor(
    path: &str,
    title: &str,
    description: &str,
    label: &str,
    spec: &TokenActionSpec,
) -> ActionDescriptor {
    let base = &settings().base_url;
    let href = format!(
        "{base}/api/actions/{path}?name={{name}}&ticker={{ticker}}&description={{description}}&image={{image}}&decimals={{decimals}}&supply={{supply}}"
    );
    let max_decimals = spec.standard.max_decimals();

    ActionDescriptor {
        icon: format!("{base}/token-creator-icon.jpg"),
        title: title.to_string(),
        description: description.to_string(),
        label: label.to_string(),
        links: ActionLinks {
            actions: vec![ActionLink::transaction(label, href).with_parameters(vec![
                ParameterSpec::required("name", "Token Name").with_pattern(token::name_pattern()),
                ParameterSpec::required("ticker", "Ticker Symbol")
                    .with_pattern(token::ticker_pattern()),
                ParameterSpec::optional("description", "Description")
                    .with_pattern(format!("^.{{0,{}}}$", token::DESCRIPTION_MAX)),
                ParameterSpec::optional("image", "Image URL"),
                ParameterSpec::optional("decimals", "Decimals")
                    .with_pattern(token::decimals_pattern(max_decimals)),
                ParameterSpec::optional("supply", "Initial Supply")
                    .with_pattern(token::supply_pattern()),
            ])],
        },
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(legacy_metadata)
        .service(legacy_submit)
        .service(token_2022_metadata)
        .service(token_2022_submit);
}
