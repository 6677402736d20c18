use crate::http;
use actix_web::web;

/// Mount every HTTP sub-module under `/api`.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(http::users::init_routes)
            .configure(http::account::init_routes)
            .configure(http::games::init_routes)
            .configure(http::scores::init_routes)
            .configure(http::admin::init_routes)
            .configure(http::feedback::init_routes)
            .configure(http::health::init_routes),
    );
}
