use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Hex SHA-256 tokens, keyed with HMAC when a tokenization key is configured
#[derive(Clone)]
pub struct TokenizerHandler {
    keyed_mac: Option<HmacSha256>,
}

impl TokenizerHandler {
    pub fn new(tokenization_key: Option<&str>) -> anyhow::Result<Self> {
        let keyed_mac = tokenization_key
            .map(|key| HmacSha256::new_from_slice(key.as_bytes()))
            .transpose()
            .map_err(|e| anyhow::anyhow!("tokenization key couldn't be used: {e}"))?;

        Ok(Self { keyed_mac })
    }
}

impl crate::services::CardTokenizer for TokenizerHandler {
    fn tokenize(&self, card_number: &str) -> String {
        match &self.keyed_mac {
            Some(mac) => {
                let mut mac = mac.clone();
                mac.update(card_number.as_bytes());
                hex::encode(mac.finalize().into_bytes())
            }
            None => hex::encode(Sha256::digest(card_number.as_bytes())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CardTokenizer;

    #[test]
    fn test_unkeyed_token_is_sha256_hex() {
        let tokenizer = TokenizerHandler::new(None).unwrap();

        assert_eq!(
            tokenizer.tokenize("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_tokens_are_deterministic() {
        let tokenizer = TokenizerHandler::new(None).unwrap();

        assert_eq!(
            tokenizer.tokenize("4111111111111111"),
            tokenizer.tokenize("4111111111111111")
        );
        assert_ne!(
            tokenizer.tokenize("4111111111111111"),
            tokenizer.tokenize("5555555555554444")
        );
    }

    #[test]
    fn test_keyed_token_depends_on_key() {
        let plain = TokenizerHandler::new(None).unwrap();
        let keyed = TokenizerHandler::new(Some("first-key")).unwrap();
        let rotated = TokenizerHandler::new(Some("second-key")).unwrap();
        let card = "4111111111111111";

        assert_eq!(keyed.tokenize(card), keyed.tokenize(card));
        assert_eq!(keyed.tokenize(card).len(), 64);
        assert_ne!(keyed.tokenize(card), plain.tokenize(card));
        assert_ne!(keyed.tokenize(card), rotated.tokenize(card));
    }

    #[test]
    fn test_keyed_token_matches_hmac_sha256() {
        let tokenizer = TokenizerHandler::new(Some("key")).unwrap();

        assert_eq!(
            tokenizer.tokenize("The quick brown fox jumps over the lazy dog"),
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }
}
