//! Frontend route configuration module.

use super::{payment, server};
use ntex::web;
use ntex_cors::Cors;

/// CORS policy accepting `origins`, see [cors_origins](crate::config::AppConfig::cors_origins)
pub fn cors(origins: &[String]) -> Cors {
    origins.iter().fold(
        Cors::new().allowed_methods(vec!["GET", "POST", "OPTIONS"]),
        |cors, origin| cors.allowed_origin(origin),
    )
}

/// Configures the html and health check routes.
///
/// # Routes
/// - `GET /` - Payment form
/// - `GET /health` - Liveness check
pub fn pages(cfg: &mut web::ServiceConfig) {
    cfg.service((server::index, server::health));
}

/// Configures the payment api routes.
///
/// # Routes
/// - `POST /api/payment` - Validate, tokenize and audit a card
pub fn payment(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").service((payment::process_payment,)));
}
