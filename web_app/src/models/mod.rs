pub mod card;
pub mod payment;
