//! Number-guessing game routes.

use actix_web::{post, route, web, HttpResponse, Responder};
use solana_sdk::native_token::lamports_to_sol;

use crate::actions::game::{self, GameConfig, GameQuery, PendingRound};
use crate::chain::ChainClient;
use crate::config::settings;
use crate::error::ActionError;
use crate::metrics;
use crate::protocol::{
    self, ActionDescriptor, ActionLink, ActionLinks, ActionPostRequest, ParameterSpec,
};

/// GET /api/actions/game (OPTIONS mirrors GET for preflight)
#[route("/game", method = "GET", method = "OPTIONS")]
async fn metadata() -> impl Responder {
    protocol::ok_json(&descriptor())
}

/// POST /api/actions/game?selectedNumber=N
#[post("/game")]
async fn submit(
    chain: web::Data<ChainClient>,
    body: web::Json<ActionPostRequest>,
    query: web::Query<GameQuery>,
) -> Result<HttpResponse, ActionError> {
    let account = protocol::parse_account(&body.account)?;
    let cfg = GameConfig::from_settings();
    let pending = PendingRound::place(&query, &cfg)?;
    let round = pending.resolve(&mut rand::rng(), &cfg);
    let built = game::build_round(chain.get_ref(), &account, &round, &cfg).await?;
    metrics::TX_BUILT.with_label_values(&["game"]).inc();
    Ok(protocol::ok_json(&protocol::transaction_response(&built)?))
}

pub fn descriptor() -> ActionDescriptor {
    let base = &settings().base_url;
    let cfg = GameConfig::from_settings();
    let entry_sol = lamports_to_sol(cfg.entry_fee);

    ActionDescriptor {
        icon: format!("{base}/game-icon.png"),
        title: "Villain's Number Roulette".to_string(),
        description: format!("Entry Fee: {entry_sol} SOL | Guess the Villain's Number!"),
        label: "Challenge the Villain".to_string(),
        links: ActionLinks {
            actions: vec![ActionLink::transaction(
                format!("Bet {entry_sol} SOL"),
                format!("{base}/api/actions/game?selectedNumber={{selectedNumber}}"),
            )
            .with_parameters(vec![ParameterSpec::required(
                "selectedNumber",
                format!("Your number ({}-{})", cfg.min_number, cfg.max_number),
            )])],
        },
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(metadata).service(submit);
}
