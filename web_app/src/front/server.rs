//! Handlers not linked to the payment api

use ntex::web;
use serde_json::json;

use crate::front::{AppState, errors, templates};

/// Return a [UrlNotFound](errors::UserError::UrlNotFound) error for urls not defined
pub async fn serve_not_found() -> Result<web::HttpResponse, web::Error> {
    Err(errors::UserError::UrlNotFound.into())
}

/// Endpoint to render the payment form
#[web::get("/")]
async fn index(app_state: web::types::State<AppState>) -> Result<impl web::Responder, web::Error> {
    let content = templates::render_payment_form(&app_state.payment_endpoint).map_err(|e| {
        errors::ServerError::TemplateError(format!(
            "at / endpoint the template couldnt be rendered: {e}"
        ))
    })?;

    Ok(web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(content))
}

/// Liveness check
#[web::get("/health")]
async fn health() -> impl web::Responder {
    web::HttpResponse::Ok().json(&json!({"status": "ok"}))
}
