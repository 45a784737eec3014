//! Balance checker and donation CLI.
//!
//! Reads on-chain balances through `RPC_URL` and asks the wallet behind
//! `WALLET_RPC_URL` for signatures. Every transfer is printed in full and needs a
//! typed `yes` before the wallet is asked to sign.
//!
//! ```bash
//! balance-checker check
//! balance-checker donate-native
//! balance-checker donate-token
//! ```

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use blockchain::{EvmChainWriter, EvmClient, RemoteWallet};
use clap::{Parser, Subcommand};
use shared::config::Config;
use shared::logging::init_logging;
use shared::{BalanceEntry, WorkflowStatus};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use workflow::{TransferApproval, TransferPreview, WorkflowSession};

#[derive(Parser, Debug)]
#[command(name = "balance-checker")]
#[command(about = "Check wallet balances and send donations")]
#[command(version)]
struct Cli {
    /// Skip the RPC reachability check on startup.
    #[arg(long)]
    skip_health_check: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Check balances; offers to transfer the gated token balance if there is one.
    Check,
    /// Donate the configured amount of the native coin.
    DonateNative,
    /// Donate the entire balance of the donation token.
    DonateToken,
}

/// Approval prompt on the controlling terminal.
struct TerminalApproval;

fn is_approval(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

#[async_trait]
impl TransferApproval for TerminalApproval {
    async fn approve(&self, preview: &TransferPreview) -> bool {
        println!("\n{}", preview.summary());
        print!("Type 'yes' to approve this transfer: ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        match lines.next_line().await {
            Ok(Some(answer)) => is_approval(&answer),
            _ => false,
        }
    }
}

fn print_balances(balances: &[BalanceEntry]) {
    for entry in balances {
        println!(
            "  {:>16} {:<8} {}",
            entry.display_amount, entry.asset.symbol, entry.asset.display_name
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    init_logging(config.logging.format)?;
    let workflow_config = config.workflow_config()?;

    let client = Arc::new(EvmClient::new(config.rpc.url.clone(), config.rpc.chain_id));
    if !cli.skip_health_check {
        let block = client
            .health_check()
            .await
            .context("RPC endpoint is not reachable")?;
        info!(block, "RPC endpoint reachable");
    }

    let wallet = Arc::new(RemoteWallet::new(config.wallet.rpc_url.clone()));
    let writer = Arc::new(EvmChainWriter::new(
        client.clone(),
        wallet.clone(),
        config.rpc.chain_id,
        Duration::from_millis(config.rpc.confirmation_poll_interval_ms),
    ));
    let session = WorkflowSession::new(
        wallet,
        client,
        writer,
        Arc::new(TerminalApproval),
        workflow_config,
    );

    let mut updates = session.subscribe();
    let progress = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            if let WorkflowStatus::InProgress(stage) = &*updates.borrow_and_update() {
                println!("... {}", stage.label());
            }
        }
    });

    let result = match cli.command {
        Command::Check => session.run_balance_check_workflow().await,
        Command::DonateNative => session.run_fixed_native_donation().await,
        Command::DonateToken => session.run_full_token_donation().await,
    };
    progress.abort();

    match result {
        WorkflowStatus::Success {
            message, balances, ..
        } => {
            println!("{}", message);
            if let Some(balances) = balances {
                print_balances(&balances);
            }
            Ok(())
        }
        WorkflowStatus::Failure { reason, message } => bail!("{:?}: {}", reason, message),
        other => bail!("Action ended without a result: {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["balance-checker", "donate-token"]).unwrap();
        assert_eq!(cli.command, Command::DonateToken);
        assert!(!cli.skip_health_check);

        let cli =
            Cli::try_parse_from(["balance-checker", "--skip-health-check", "check"]).unwrap();
        assert_eq!(cli.command, Command::Check);
        assert!(cli.skip_health_check);
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["balance-checker"]).is_err());
    }

    #[test]
    fn test_only_yes_approves() {
        assert!(is_approval("yes\n"));
        assert!(is_approval(" YES "));
        assert!(!is_approval("y"));
        assert!(!is_approval(""));
        assert!(!is_approval("no"));
    }
}
