//! Token registry and token reference resolution
//!
//! The network assigns every supported token a small numeric id; clients
//! refer to tokens by symbol or by layer-1 contract address and resolve
//! either form against a registry fetched from the network. "ETH" is a
//! reserved alias for the native token at the zero address.

use crate::core::address::Address;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Reserved symbol for the native token
pub const ETH_SYMBOL: &str = "ETH";

/// Token id of the native token (at the zero address)
pub const ETH_TOKEN_ID: u16 = 0;

// =============================================================================
// Error Types
// =============================================================================

/// Token registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("unknown token: {0}")]
    UnknownToken(String),
    #[error("duplicate token id {id} for symbols {first} and {second}")]
    DuplicateTokenId { id: u16, first: String, second: String },
    #[error("registry key '{key}' does not match entry symbol '{symbol}'")]
    SymbolMismatch { key: String, symbol: String },
}

// =============================================================================
// Token Reference
// =============================================================================

/// A token reference as given by a caller: a symbol or a contract address
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenLike {
    Address(Address),
    Symbol(String),
}

impl FromStr for TokenLike {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Anything that parses as an address is an address reference;
        // everything else is treated as a symbol
        Ok(match s.parse::<Address>() {
            Ok(address) => TokenLike::Address(address),
            Err(_) => TokenLike::Symbol(s.to_string()),
        })
    }
}

impl fmt::Display for TokenLike {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenLike::Address(address) => write!(f, "{}", address),
            TokenLike::Symbol(symbol) => f.write_str(symbol),
        }
    }
}

// =============================================================================
// Token Registry
// =============================================================================

/// Metadata for one supported token
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Layer-1 contract address (zero address for the native token)
    pub address: Address,
    /// Network-assigned numeric id
    pub id: u16,
    pub symbol: String,
    /// Decimal places of the token's base unit
    pub decimals: u8,
}

/// Registry of supported tokens, keyed by symbol
///
/// Construction enforces the registry invariants: map keys match entry
/// symbols and no id appears twice.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<String, TokenInfo>", into = "HashMap<String, TokenInfo>")]
pub struct TokenRegistry {
    tokens: HashMap<String, TokenInfo>,
}

impl TokenRegistry {
    /// Build a registry, rejecting duplicate ids and key/symbol mismatches
    pub fn new(tokens: HashMap<String, TokenInfo>) -> Result<Self, TokenError> {
        let mut seen_ids: HashMap<u16, &str> = HashMap::new();
        for (key, info) in &tokens {
            if key != &info.symbol {
                return Err(TokenError::SymbolMismatch {
                    key: key.clone(),
                    symbol: info.symbol.clone(),
                });
            }
            if let Some(first) = seen_ids.insert(info.id, key.as_str()) {
                return Err(TokenError::DuplicateTokenId {
                    id: info.id,
                    first: first.to_string(),
                    second: key.clone(),
                });
            }
        }
        Ok(Self { tokens })
    }

    /// Number of registered tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Look up a token by symbol
    pub fn by_symbol(&self, symbol: &str) -> Option<&TokenInfo> {
        self.tokens.get(symbol)
    }

    /// Look up a token by its layer-1 contract address
    pub fn by_address(&self, address: &Address) -> Option<&TokenInfo> {
        self.tokens.values().find(|info| &info.address == address)
    }

    /// Resolve a token reference to its network id
    ///
    /// The "ETH" symbol and the zero address always resolve to
    /// [`ETH_TOKEN_ID`], whatever the registry contains.
    pub fn resolve(&self, token: &TokenLike) -> Result<u16, TokenError> {
        match token {
            TokenLike::Symbol(symbol) => {
                if symbol == ETH_SYMBOL {
                    return Ok(ETH_TOKEN_ID);
                }
                self.by_symbol(symbol)
                    .map(|info| info.id)
                    .ok_or_else(|| TokenError::UnknownToken(symbol.clone()))
            }
            TokenLike::Address(address) => {
                if address.is_zero() {
                    return Ok(ETH_TOKEN_ID);
                }
                self.by_address(address)
                    .map(|info| info.id)
                    .ok_or_else(|| TokenError::UnknownToken(address.to_string()))
            }
        }
    }

    /// Symbols present in the registry, for diagnostics
    pub fn symbols(&self) -> HashSet<&str> {
        self.tokens.keys().map(String::as_str).collect()
    }
}

impl TryFrom<HashMap<String, TokenInfo>> for TokenRegistry {
    type Error = TokenError;

    fn try_from(tokens: HashMap<String, TokenInfo>) -> Result<Self, Self::Error> {
        Self::new(tokens)
    }
}

impl From<TokenRegistry> for HashMap<String, TokenInfo> {
    fn from(registry: TokenRegistry) -> Self {
        registry.tokens
    }
}

// =============================================================================
// Contract Addresses
// =============================================================================

/// Layer-1 addresses of the network's contracts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractAddress {
    /// The main rollup contract
    pub main_contract: Address,
    /// The governance contract holding the token list
    pub gov_contract: Address,
}
