use serde::{Deserialize, Serialize};
use std::fmt;

/// Body posted by the payment form.
///
/// Fields are optional so a missing field is reported as an invalid payload
/// instead of a deserialization failure.
#[derive(Deserialize, Serialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub card_number: Option<String>,
    pub cvv: Option<String>,
    pub expiry: Option<String>,
}

// Never print raw card data, even from a `{:?}` in an error path
impl fmt::Debug for PaymentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let presence = |field: &Option<String>| match field.as_deref() {
            Some(v) if !v.is_empty() => "<redacted>",
            Some(_) => "<empty>",
            None => "<missing>",
        };

        f.debug_struct("PaymentRequest")
            .field("card_number", &presence(&self.card_number))
            .field("cvv", &presence(&self.cvv))
            .field("expiry", &self.expiry)
            .finish()
    }
}

/// Outcome of a processed payment, the card is only known by its token
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub masked_card: String,
    pub token: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PaymentResponse {
    pub status: String,
    pub token: String,
}

impl From<PaymentReceipt> for PaymentResponse {
    fn from(receipt: PaymentReceipt) -> Self {
        Self {
            status: crate::consts::PAYMENT_PROCESSED_STATUS.to_string(),
            token: receipt.token,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
