//! Command-line interface
//!
//! Thin wrappers exposing the schema validators over JSON files.

pub mod commands;

pub use commands::{
    cmd_account_state, cmd_check_fee, cmd_receipt_status, cmd_resolve_token, cmd_validate_tx,
    CliResult,
};
