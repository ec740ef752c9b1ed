pub const PAYMENT_PROCESSED_STATUS: &str = "Payment processed securely";
pub const INVALID_PAYLOAD_MSG: &str = "Invalid payload";
pub const INVALID_CARD_DETAILS_MSG: &str = "Invalid card details";
pub const NOT_FOUND_MSG: &str = "Not found";

pub const MASKED_CARD_PREFIX: &str = "**** **** **** ";
pub const CARD_MIN_DIGITS: usize = 12;
pub const CARD_MAX_DIGITS: usize = 19;

pub const EXPIRY_CENTURY: i32 = 2000;

pub const UNKNOWN_CLIENT_ADDR: &str = "unknown";
