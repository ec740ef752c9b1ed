pub mod tokenizer;

/// Turns a card number into an irreversible token that can be logged and
/// returned to the client in place of the card number
#[cfg_attr(test, mockall::automock)]
pub trait CardTokenizer {
    fn tokenize(&self, card_number: &str) -> String;
}

pub type ImplCardTokenizer = Box<dyn CardTokenizer>;
