use crate::error::json_error_handler;
use actix_web::web;

pub mod health;
pub mod market_research;
pub mod status;

/// Registers every route under `/api`, plus the JSON extractor config that
/// turns body errors into 422 responses.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api")
                .route("", web::get().to(health::root))
                .route("/", web::get().to(health::root))
                .route("/health", web::get().to(health::health_check))
                .route("/version", web::get().to(health::version_info))
                .service(market_research::submit_market_research)
                .service(market_research::list_market_research)
                .service(status::create_status_check)
                .service(status::list_status_checks),
        );
}
