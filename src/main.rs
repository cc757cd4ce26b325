//! Rollup Schema CLI
//!
//! A command-line interface for validating rollup data-contract files:
//! transactions, receipts, fees, token registries and account states.

use clap::{Parser, Subcommand};
use rollup_schema::cli::{
    cmd_account_state, cmd_check_fee, cmd_receipt_status, cmd_resolve_token, cmd_validate_tx,
    CliResult,
};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "rollup-schema")]
#[command(version = "0.1.0")]
#[command(about = "Validate rollup data-contract files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a transaction (signed or bare) from a JSON file
    ValidateTx {
        /// Path to the transaction JSON
        file: PathBuf,
    },

    /// Derive the finality status of a receipt
    ReceiptStatus {
        /// Path to the receipt JSON
        file: PathBuf,

        /// Treat the file as a priority operation receipt
        #[arg(long)]
        priority: bool,
    },

    /// Resolve a token symbol or address to its network id
    ResolveToken {
        /// Token symbol (e.g. "ETH") or 0x-prefixed contract address
        token: String,

        /// Path to the token registry JSON
        #[arg(short, long)]
        registry: PathBuf,
    },

    /// Check that a fee breakdown sums exactly
    CheckFee {
        /// Path to the fee JSON
        file: PathBuf,
    },

    /// Summarize an account state file
    AccountState {
        /// Path to the account state JSON
        file: PathBuf,
    },
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::ValidateTx { file } => cmd_validate_tx(&file),
        Commands::ReceiptStatus { file, priority } => cmd_receipt_status(&file, priority),
        Commands::ResolveToken { token, registry } => cmd_resolve_token(&token, &registry),
        Commands::CheckFee { file } => cmd_check_fee(&file),
        Commands::AccountState { file } => cmd_account_state(&file),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("❌ {}", e);
        process::exit(1);
    }
}
