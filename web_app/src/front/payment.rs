use chrono::Utc;
use log::warn;
use ntex::{util::Bytes, web};

use crate::{
    api::{self, payment::PaymentError},
    front::{AppState, utils},
    models,
};

/// Validates, tokenizes and audits the card posted by the payment form.
///
/// The body is parsed by hand so malformed JSON answers with the same
/// `{"error": "Invalid payload"}` body as missing fields.
#[web::post("/payment")]
async fn process_payment(
    req: web::HttpRequest,
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let client_addr = utils::client_addr(&req);

    let payment_request = serde_json::from_slice::<models::payment::PaymentRequest>(&body)
        .map_err(|e| {
            warn!("payment rejected from {client_addr}: unreadable body: {e}");
            PaymentError::InvalidPayload
        })?;

    let receipt = api::payment::process_payment(
        &app_state.tokenizer,
        &payment_request,
        &client_addr,
        Utc::now().date_naive(),
    )?;

    Ok(web::HttpResponse::Ok().json(&models::payment::PaymentResponse::from(receipt)))
}
