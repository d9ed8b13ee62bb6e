//! Parsing and serde support for big-integer quantities as they appear in network profiles.
//!
//! Two textual forms are accepted:
//! * strict hex quantities (`0x` prefix required), used for stake and faucet amounts;
//! * hex-or-decimal quantities, used for consensus parameters and fork heights, which may
//!   also be given as plain JSON numbers.

use {
    crate::primitives::U256,
    serde::{Deserialize, Deserializer, Serializer},
    thiserror::Error,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuantityError {
    #[error("hex quantity must start with 0x: {0}")]
    MissingPrefix(String),
    #[error("hex quantity has no digits: {0}")]
    Empty(String),
    #[error("failed to parse number ({0})")]
    Invalid(String),
    #[error("quantity does not fit in 64 bits: {0}")]
    Overflow(String),
}

/// Parses a `0x` prefixed hexadecimal quantity of at most 256 bits.
pub fn parse_hex(value: &str) -> Result<U256, QuantityError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or_else(|| QuantityError::MissingPrefix(value.into()))?;
    if digits.is_empty() {
        return Err(QuantityError::Empty(value.into()));
    }
    U256::from_str_radix(digits, 16).map_err(|_| QuantityError::Invalid(value.into()))
}

/// Parses either a `0x` prefixed hexadecimal or a plain decimal quantity.
pub fn parse_hex_or_decimal(value: &str) -> Result<U256, QuantityError> {
    if value.starts_with("0x") || value.starts_with("0X") {
        return parse_hex(value);
    }
    U256::from_str_radix(value, 10).map_err(|_| QuantityError::Invalid(value.into()))
}

/// Narrows a quantity to `u64`, failing instead of truncating.
pub fn to_u64(value: &U256) -> Result<u64, QuantityError> {
    match value.into_limbs() {
        [value, 0, 0, 0] => Ok(value),
        _ => Err(QuantityError::Overflow(to_hex(value))),
    }
}

/// Canonical hex representation: lowercase, `0x` prefixed, no leading zeros.
pub fn to_hex(value: &U256) -> String {
    format!("{value:#x}")
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuantity {
    Text(String),
    Number(u64),
}

impl RawQuantity {
    fn parse(self) -> Result<U256, QuantityError> {
        match self {
            Self::Text(text) => parse_hex_or_decimal(&text),
            Self::Number(number) => Ok(U256::from(number)),
        }
    }
}

/// `#[serde(with = "...")]` adapter for required hex-or-decimal fields.
pub mod hex_or_decimal {
    use super::*;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_hex(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        RawQuantity::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

/// `#[serde(with = "...")]` adapter for optional hex-or-decimal fields.
pub mod opt_hex_or_decimal {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<U256>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_some(&to_hex(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<U256>, D::Error> {
        Option::<RawQuantity>::deserialize(deserializer)?
            .map(RawQuantity::parse)
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}
