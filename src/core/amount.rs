//! Arbitrary-precision token amounts
//!
//! Balances, transfer amounts, fees and gas prices are wei-scale values
//! that overflow every native integer type, so they travel as decimal
//! strings on the wire and live in a 256-bit unsigned integer in memory.
//! Floating point is never involved.

use primitive_types::U256;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Amount parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("malformed amount: {0}")]
    MalformedInput(String),
}

/// A non-negative, arbitrary-precision token amount (in the token's base unit)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount(U256);

impl TokenAmount {
    /// The zero amount
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition; `None` on 256-bit overflow
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Underlying 256-bit value
    pub fn as_u256(&self) -> U256 {
        self.0
    }
}

impl From<u64> for TokenAmount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for TokenAmount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl FromStr for TokenAmount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(AmountError::MalformedInput("empty string".to_string()));
        }
        // U256::from_dec_str rejects signs and non-digits, but the error
        // message should name the offending input
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::MalformedInput(format!(
                "'{}' is not a non-negative decimal integer",
                s
            )));
        }
        U256::from_dec_str(s)
            .map(Self)
            .map_err(|_| AmountError::MalformedInput(format!("'{}' exceeds 256 bits", s)))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // U256 displays in decimal
        write!(f, "{}", self.0)
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

struct TokenAmountVisitor;

impl<'de> Visitor<'de> for TokenAmountVisitor {
    type Value = TokenAmount;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal string or non-negative integer")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(TokenAmount::from(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        u64::try_from(value)
            .map(TokenAmount::from)
            .map_err(|_| E::custom("amount cannot be negative"))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        value.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TokenAmountVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_string() {
        let amount: TokenAmount = "1000000000000000000".parse().unwrap();
        assert_eq!(amount.to_string(), "1000000000000000000");
        assert_eq!("0".parse::<TokenAmount>().unwrap(), TokenAmount::zero());
    }

    #[test]
    fn test_rejects_negative_and_garbage() {
        assert!("-1".parse::<TokenAmount>().is_err());
        assert!("+1".parse::<TokenAmount>().is_err());
        assert!("1.5".parse::<TokenAmount>().is_err());
        assert!("".parse::<TokenAmount>().is_err());
        assert!("0x10".parse::<TokenAmount>().is_err());
    }

    #[test]
    fn test_rejects_overflow() {
        // 2^256 in decimal
        let too_big =
            "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert!(too_big.parse::<TokenAmount>().is_err());
        // 2^256 - 1 is the largest representable value
        let max =
            "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        assert!(max.parse::<TokenAmount>().is_ok());
    }

    #[test]
    fn test_checked_add() {
        let a = TokenAmount::from(7u64);
        let b = TokenAmount::from(5u64);
        assert_eq!(a.checked_add(&b), Some(TokenAmount::from(12u64)));

        let max: TokenAmount =
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
                .parse()
                .unwrap();
        assert_eq!(max.checked_add(&TokenAmount::from(1u64)), None);
    }

    #[test]
    fn test_serde_decimal_string() {
        let amount = TokenAmount::from(42u64);
        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"42\"");
        // Both wire forms deserialize
        assert_eq!(serde_json::from_str::<TokenAmount>("\"42\"").unwrap(), amount);
        assert_eq!(serde_json::from_str::<TokenAmount>("42").unwrap(), amount);
        // Negative forms do not
        assert!(serde_json::from_str::<TokenAmount>("\"-42\"").is_err());
        assert!(serde_json::from_str::<TokenAmount>("-42").is_err());
    }
}
