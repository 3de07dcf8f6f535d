//! Simple liveness / readiness probe

use actix_web::{get, web, HttpResponse, Responder};

use crate::chain::{ChainClient, Ledger};

#[get("/healthz")]
pub async fn healthz(chain: web::Data<ChainClient>) -> impl Responder {
    // The one external dependency is the RPC node.
    match chain.latest_blockhash().await {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(err) => {
            log::warn!("healthz rpc probe failed: {err:#}");
            HttpResponse::ServiceUnavailable().body("rpc")
        }
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(healthz);
}
