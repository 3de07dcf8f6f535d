use actix_web::{middleware::Logger, web, App, HttpServer};
use blink_server::{actions::claim::ClaimSigner, chain::ChainClient, config::settings, http, metrics};
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".into());

    // Shared per-process state: the RPC client and the injected airdrop key.
    let chain = web::Data::new(ChainClient::from_settings());
    let claim_signer = web::Data::new(ClaimSigner::load());

    log::info!(
        "serving actions on {} against {}",
        server_addr,
        settings().rpc_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(metrics::METRICS.clone())
            .app_data(chain.clone())
            .app_data(claim_signer.clone())
            .configure(http::routes::init_routes)
    })
    .bind(&server_addr)?
    .run()
    .await
}
