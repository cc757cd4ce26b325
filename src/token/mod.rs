//! Token registry and resolution
//!
//! Maps the token references callers use (symbols, contract addresses) to
//! the numeric ids the network understands, against a registry fetched
//! from the network's governance contract.

pub mod registry;

pub use registry::{
    ContractAddress, TokenError, TokenInfo, TokenLike, TokenRegistry, ETH_SYMBOL, ETH_TOKEN_ID,
};
