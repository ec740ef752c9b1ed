pub mod errors;
pub mod payment;
pub mod routes;
pub mod server;
pub mod templates;
pub mod utils;

use crate::services;

pub struct AppState {
    pub tokenizer: services::ImplCardTokenizer,
    /// URL the rendered payment form posts to
    pub payment_endpoint: String,
}
