//! Account state snapshots
//!
//! The network reports one account across three finality tiers:
//! `depositing` (layer-1 funds on their way in), `committed` (included in a
//! network-side block) and `verified` (proven on the underlying chain).
//! Balance maps are keyed by token symbol. The committed and verified
//! nonces are reported independently; no ordering between the tiers is
//! assumed, since verification lags commitment.

use crate::core::address::{Address, PubKeyHash};
use crate::core::amount::TokenAmount;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Funds deposited from layer 1 but not yet usable in the rollup
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositingFunds {
    /// Sum of pending deposits for the token
    pub amount: TokenAmount,
    /// Layer-1 block number at which the funds are expected to land
    pub expected_accept_block: u64,
}

/// Pending-deposit balances, keyed by token symbol
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositingBalances {
    pub balances: HashMap<String, DepositingFunds>,
}

/// One finality tier of an account: balances, nonce and signing key hash
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateTier {
    /// Balances keyed by token symbol (e.g. "ETH")
    pub balances: HashMap<String, TokenAmount>,
    pub nonce: u32,
    pub pub_key_hash: PubKeyHash,
}

impl StateTier {
    /// Balance for a token symbol; absent entries mean zero
    pub fn balance(&self, symbol: &str) -> TokenAmount {
        self.balances.get(symbol).copied().unwrap_or_default()
    }
}

/// Snapshot of one account across all three finality tiers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountState {
    pub address: Address,
    /// Numeric account id; absent until the first deposit is committed
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<u32>,
    pub depositing: DepositingBalances,
    pub committed: StateTier,
    pub verified: StateTier,
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATE_JSON: &str = r#"{
        "address": "0xc354d97642faa06781b76ffb6786f72cd7746c97",
        "id": 19,
        "depositing": {
            "balances": {
                "FAU": {"amount": "9000000000000000000", "expectedAcceptBlock": 438929}
            }
        },
        "committed": {
            "balances": {"ETH": "100000000000000000", "FAU": "0"},
            "nonce": 4,
            "pubKeyHash": "sync:de03a0b5963f75f1c8485b355ff6d30f3093bde7"
        },
        "verified": {
            "balances": {"ETH": "100000000000000000"},
            "nonce": 3,
            "pubKeyHash": "sync:de03a0b5963f75f1c8485b355ff6d30f3093bde7"
        }
    }"#;

    #[test]
    fn test_account_state_parses() {
        let state: AccountState = serde_json::from_str(STATE_JSON).unwrap();
        assert_eq!(state.id, Some(19));
        assert_eq!(state.committed.nonce, 4);
        assert_eq!(state.verified.nonce, 3);
        assert_eq!(
            state.committed.balance("ETH"),
            "100000000000000000".parse().unwrap()
        );
        assert!(state.committed.balance("FAU").is_zero());
        // Absent symbol reads as zero
        assert!(state.verified.balance("FAU").is_zero());
        assert_eq!(
            state.depositing.balances["FAU"].expected_accept_block,
            438929
        );
    }

    #[test]
    fn test_account_state_roundtrip() {
        let state: AccountState = serde_json::from_str(STATE_JSON).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let back: AccountState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }

    #[test]
    fn test_missing_id_is_none() {
        let state: AccountState = serde_json::from_str(STATE_JSON).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(STATE_JSON).unwrap();
        value.as_object_mut().unwrap().remove("id");
        let no_id: AccountState = serde_json::from_value(value).unwrap();
        assert_eq!(no_id.id, None);
        assert_eq!(no_id.address, state.address);
        // And it serializes without an id key rather than with null
        assert!(!serde_json::to_string(&no_id).unwrap().contains("\"id\""));
    }

    #[test]
    fn test_nonce_tiers_are_independent() {
        // verified.nonce lagging committed.nonce is the normal case, but
        // the reverse must parse too
        let mut value: serde_json::Value = serde_json::from_str(STATE_JSON).unwrap();
        value["verified"]["nonce"] = serde_json::json!(9);
        let state: AccountState = serde_json::from_value(value).unwrap();
        assert!(state.verified.nonce > state.committed.nonce);
    }
}
