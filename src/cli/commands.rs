//! CLI command handlers
//!
//! Each handler reads JSON from a file, runs the corresponding validator
//! and prints the outcome. Validation failures propagate as errors so the
//! binary exits nonzero.

use crate::core::{
    AccountState, Fee, PriorityOperationReceipt, SignedTransaction, Transaction,
    TransactionReceipt,
};
use crate::token::{TokenLike, TokenRegistry};
use std::fs;
use std::path::Path;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Validate a transaction file
///
/// Accepts either a `SignedTransaction` (`{"tx": ..., "ethereumSignature": ...}`)
/// or a bare tagged transaction object.
pub fn cmd_validate_tx(path: &Path) -> CliResult<()> {
    let raw = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;

    let signed = if value.get("tx").is_some() {
        serde_json::from_value::<SignedTransaction>(value)?
    } else {
        SignedTransaction {
            tx: serde_json::from_value::<Transaction>(value)?,
            ethereum_signature: None,
        }
    };

    signed.validate()?;
    log::debug!("validated {} transaction from {:?}", signed.tx.type_tag(), path);

    println!("✅ Valid {} transaction", signed.tx.type_tag());
    if let Some(eth_signature) = &signed.ethereum_signature {
        println!("   Ethereum signature scheme: {}", eth_signature.scheme);
    }
    Ok(())
}

/// Derive and print the status of a receipt file
pub fn cmd_receipt_status(path: &Path, priority: bool) -> CliResult<()> {
    let raw = fs::read_to_string(path)?;

    let status = if priority {
        let receipt: PriorityOperationReceipt = serde_json::from_str(&raw)?;
        receipt.status()?
    } else {
        let receipt: TransactionReceipt = serde_json::from_str(&raw)?;
        receipt.status()?
    };

    println!("{}", status);
    Ok(())
}

/// Resolve a token symbol or address against a registry file
pub fn cmd_resolve_token(token: &str, registry_path: &Path) -> CliResult<()> {
    let raw = fs::read_to_string(registry_path)?;
    let registry: TokenRegistry = serde_json::from_str(&raw)?;
    log::debug!("loaded registry with {} token(s)", registry.len());

    // TokenLike parsing is infallible: non-address strings are symbols
    let token: TokenLike = token.parse()?;
    let id = registry.resolve(&token)?;

    println!("✅ Token {} resolves to id {}", token, id);
    Ok(())
}

/// Check the internal consistency of a fee file
pub fn cmd_check_fee(path: &Path) -> CliResult<()> {
    let raw = fs::read_to_string(path)?;
    let fee: Fee = serde_json::from_str(&raw)?;
    fee.validate()?;

    println!("✅ Consistent {:?} fee", fee.fee_type);
    println!("   Gas fee:   {} wei", fee.gas_fee);
    println!("   Proof fee: {} wei", fee.zkp_fee);
    println!("   Total:     {} wei", fee.total_fee);
    Ok(())
}

/// Parse an account state file and print a summary
pub fn cmd_account_state(path: &Path) -> CliResult<()> {
    let raw = fs::read_to_string(path)?;
    let state: AccountState = serde_json::from_str(&raw)?;

    println!("Account {}", state.address);
    match state.id {
        Some(id) => println!("   Id: {}", id),
        None => println!("   Id: not assigned yet"),
    }
    println!(
        "   Committed: nonce {}, {} token balance(s)",
        state.committed.nonce,
        state.committed.balances.len()
    );
    println!(
        "   Verified:  nonce {}, {} token balance(s)",
        state.verified.nonce,
        state.verified.balances.len()
    );
    if !state.depositing.balances.is_empty() {
        println!(
            "   Depositing: {} token(s) pending",
            state.depositing.balances.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn close_tx_json() -> String {
        format!(
            r#"{{
                "type": "Close",
                "account": "0x{}",
                "nonce": 0,
                "signature": {{"pubKey": "{}", "signature": "{}"}}
            }}"#,
            "aa".repeat(20),
            "ab".repeat(32),
            "cd".repeat(64),
        )
    }

    #[test]
    fn test_validate_tx_accepts_bare_and_signed() {
        let bare = write_json(&close_tx_json());
        assert!(cmd_validate_tx(bare.path()).is_ok());

        let signed = write_json(&format!(
            r#"{{"tx": {}, "ethereumSignature": {{"type": "EthereumSignature", "signature": "0xff"}}}}"#,
            close_tx_json()
        ));
        assert!(cmd_validate_tx(signed.path()).is_ok());
    }

    #[test]
    fn test_validate_tx_rejects_unknown_tag() {
        let file = write_json(&close_tx_json().replace("\"Close\"", "\"Burn\""));
        assert!(cmd_validate_tx(file.path()).is_err());
    }

    #[test]
    fn test_receipt_status_command() {
        let file = write_json(r#"{"executed": false}"#);
        assert!(cmd_receipt_status(file.path(), false).is_ok());
        assert!(cmd_receipt_status(file.path(), true).is_ok());

        // Inconsistent receipt surfaces as an error
        let file = write_json(r#"{"executed": true}"#);
        assert!(cmd_receipt_status(file.path(), false).is_err());
    }

    #[test]
    fn test_resolve_token_command() {
        let registry = write_json(&format!(
            r#"{{"FAU": {{"address": "0x{}", "id": 1, "symbol": "FAU", "decimals": 18}}}}"#,
            "aa".repeat(20)
        ));
        assert!(cmd_resolve_token("FAU", registry.path()).is_ok());
        assert!(cmd_resolve_token("ETH", registry.path()).is_ok());
        assert!(cmd_resolve_token("MKR", registry.path()).is_err());
    }

    #[test]
    fn test_check_fee_command() {
        let good = write_json(
            r#"{"feeType": "Transfer", "gasTxAmount": "350", "gasPriceWei": "1",
                "gasFee": "350", "zkpFee": "150", "totalFee": "500"}"#,
        );
        assert!(cmd_check_fee(good.path()).is_ok());

        let bad = write_json(
            r#"{"feeType": "Transfer", "gasTxAmount": "350", "gasPriceWei": "1",
                "gasFee": "350", "zkpFee": "150", "totalFee": "501"}"#,
        );
        assert!(cmd_check_fee(bad.path()).is_err());
    }

    #[test]
    fn test_account_state_command() {
        let file = write_json(&format!(
            r#"{{
                "address": "0x{}",
                "depositing": {{"balances": {{}}}},
                "committed": {{"balances": {{"ETH": "10"}}, "nonce": 1, "pubKeyHash": "sync:{}"}},
                "verified": {{"balances": {{}}, "nonce": 0, "pubKeyHash": "sync:{}"}}
            }}"#,
            "aa".repeat(20),
            "bb".repeat(20),
            "bb".repeat(20),
        ));
        assert!(cmd_account_state(file.path()).is_ok());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(cmd_validate_tx(Path::new("/nonexistent/tx.json")).is_err());
    }
}
