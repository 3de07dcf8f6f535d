use crate::http;
use actix_web::web;

/// Mount every HTTP sub-module under `/api`.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(http::health::init_routes)
            .service(
                web::scope("/actions")
                    .configure(http::create_token::init_routes)
                    .configure(http::donate::init_routes)
                    .configure(http::claim::init_routes)
                    .configure(http::game::init_routes),
            ),
    );
}
