use chrono::NaiveDate;
use derive_more::{Display, Error};
use log::{info, warn};

use crate::{
    consts,
    models::{self, card::CardDetails},
    services,
};

#[derive(Debug, Display, Error, PartialEq)]
pub enum PaymentError {
    #[display("{}", consts::INVALID_PAYLOAD_MSG)]
    InvalidPayload,
    #[display("{}", consts::INVALID_CARD_DETAILS_MSG)]
    InvalidCardDetails,
}

/// Field value when present and not empty
fn required_field(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Validates and tokenizes the card in `request`, recording an audit entry.
///
/// Neither the raw card number nor the CVV are logged: records only carry the
/// masked card, the token and `client_addr`.
pub fn process_payment(
    tokenizer: &services::ImplCardTokenizer,
    request: &models::payment::PaymentRequest,
    client_addr: &str,
    today: NaiveDate,
) -> Result<models::payment::PaymentReceipt, PaymentError> {
    let (Some(card_number), Some(cvv), Some(expiry)) = (
        required_field(&request.card_number),
        required_field(&request.cvv),
        required_field(&request.expiry),
    ) else {
        warn!("payment rejected from {client_addr}: incomplete payload {request:?}");
        return Err(PaymentError::InvalidPayload);
    };

    let card = CardDetails::parse(card_number, cvv, expiry, today).map_err(|e| {
        warn!("payment rejected from {client_addr}: {e}");
        PaymentError::InvalidCardDetails
    })?;

    let receipt = models::payment::PaymentReceipt {
        masked_card: card.number.masked(),
        token: tokenizer.tokenize(card.number.digits()),
    };

    info!(
        "Payment processed for card {masked_card}, token={token}, client={client_addr}",
        masked_card = receipt.masked_card,
        token = receipt.token,
    );

    Ok(receipt)
}
