//! Validated card data.
//!
//! Raw card values only live inside these types; `Debug` and `Display`
//! render the masked number and never the CVV.

use chrono::{Datelike, NaiveDate};
use derive_more::{Display, Error};
use std::fmt;

use crate::consts;

#[derive(Debug, Display, Error, PartialEq, Eq, Clone, Copy)]
pub enum CardError {
    #[display("card number must only contain digits, spaces or dashes")]
    NonDigitCardNumber,
    #[display("card number must have between 12 and 19 digits")]
    CardNumberLength,
    #[display("card number fails the luhn checksum")]
    ChecksumMismatch,
    #[display("cvv must be 3 or 4 digits")]
    InvalidCvv,
    #[display("expiry must follow the MM/YY format")]
    InvalidExpiryFormat,
    #[display("card is expired")]
    Expired,
}

/// Primary account number with separators stripped
#[derive(Clone, PartialEq, Eq)]
pub struct CardNumber(String);

impl CardNumber {
    pub fn parse(value: &str) -> Result<Self, CardError> {
        let mut digits = String::with_capacity(value.len());
        for c in value.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' => {}
                _ => return Err(CardError::NonDigitCardNumber),
            }
        }

        if !(consts::CARD_MIN_DIGITS..=consts::CARD_MAX_DIGITS).contains(&digits.len()) {
            return Err(CardError::CardNumberLength);
        }

        if !luhn_checksum_is_valid(&digits) {
            return Err(CardError::ChecksumMismatch);
        }

        Ok(Self(digits))
    }

    pub fn digits(&self) -> &str {
        &self.0
    }

    pub fn last_four(&self) -> &str {
        &self.0[self.0.len().saturating_sub(4)..]
    }

    /// Masked representation, safe to log
    pub fn masked(&self) -> String {
        format!("{}{}", consts::MASKED_CARD_PREFIX, self.last_four())
    }
}

impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CardNumber").field(&self.masked()).finish()
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

/// Luhn (mod 10) check over an ASCII digit string.
///
/// Every second digit from the right is doubled, and 9 is subtracted when the
/// doubled value exceeds 9.
pub fn luhn_checksum_is_valid(digits: &str) -> bool {
    let mut checksum = 0u32;
    for (position, byte) in digits.bytes().rev().enumerate() {
        if !byte.is_ascii_digit() {
            return false;
        }

        let mut digit = u32::from(byte - b'0');
        if position % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        checksum += digit;
    }

    checksum % 10 == 0
}

#[derive(Clone, PartialEq, Eq)]
pub struct Cvv(String);

impl Cvv {
    pub fn parse(value: &str) -> Result<Self, CardError> {
        if !(3..=4).contains(&value.len()) || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CardError::InvalidCvv);
        }

        Ok(Self(value.to_string()))
    }
}

impl fmt::Debug for Cvv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Cvv(***)")
    }
}

/// Card expiration month, valid through the last day of that month
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[display("{month:02}/{:02}", year % 100)]
pub struct CardExpiry {
    pub year: i32,
    pub month: u32,
}

impl CardExpiry {
    /// Parses `MM/YY`, two digits on each side
    pub fn parse(value: &str) -> Result<Self, CardError> {
        let (month, year) = value
            .split_once('/')
            .ok_or(CardError::InvalidExpiryFormat)?;

        let two_digits = |part: &str| -> Result<u32, CardError> {
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(CardError::InvalidExpiryFormat);
            }
            part.parse::<u32>()
                .map_err(|_| CardError::InvalidExpiryFormat)
        };

        let month = two_digits(month)?;
        let year = two_digits(year)?;
        if !(1..=12).contains(&month) {
            return Err(CardError::InvalidExpiryFormat);
        }

        Ok(Self {
            year: consts::EXPIRY_CENTURY + year as i32,
            month,
        })
    }

    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        (self.year, self.month) < (today.year(), today.month())
    }
}

/// Card data that passed every check
#[derive(Debug, Clone)]
pub struct CardDetails {
    pub number: CardNumber,
    pub cvv: Cvv,
    pub expiry: CardExpiry,
}

impl CardDetails {
    pub fn parse(
        card_number: &str,
        cvv: &str,
        expiry: &str,
        today: NaiveDate,
    ) -> Result<Self, CardError> {
        let number = CardNumber::parse(card_number)?;
        let cvv = Cvv::parse(cvv)?;
        let expiry = CardExpiry::parse(expiry)?;

        if expiry.is_expired_on(today) {
            return Err(CardError::Expired);
        }

        Ok(Self {
            number,
            cvv,
            expiry,
        })
    }
}
