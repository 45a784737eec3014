use blockchain::{ChainReader, ChainWriter, WalletConnection};
use shared::address::short_address;
use shared::config::WorkflowConfig;
use shared::units::format_units;
use shared::{
    FailureReason, Stage, SuccessOutcome, TransferAmount, TransferIntent, WorkflowStatus,
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::aggregator::BalanceAggregator;
use crate::approval::{TransferApproval, TransferPurpose};
use crate::classify::{Phase, PhaseExt, StepError};
use crate::status::StatusPublisher;
use crate::transfer::{connected_account, TransferExecutor, TransferOutcome};

/// The balance-check workflow.
///
/// Validating -> read gated token balance -> (offer transfer of the full gated balance, only on
/// explicit approval) -> aggregate balances -> Completed, or Failed from any step.
/// A run is strictly sequential and is not re-entrant; `WorkflowSession` rejects
/// overlapping runs.
pub struct TransferOrchestrator {
    wallet: Arc<dyn WalletConnection>,
    reader: Arc<dyn ChainReader>,
    executor: TransferExecutor,
    aggregator: BalanceAggregator,
    config: Arc<WorkflowConfig>,
}

impl TransferOrchestrator {
    pub fn new(
        wallet: Arc<dyn WalletConnection>,
        reader: Arc<dyn ChainReader>,
        writer: Arc<dyn ChainWriter>,
        approval: Arc<dyn TransferApproval>,
        config: Arc<WorkflowConfig>,
    ) -> Self {
        Self {
            executor: TransferExecutor::new(reader.clone(), writer, approval),
            aggregator: BalanceAggregator::new(reader.clone(), config.display_decimals),
            wallet,
            reader,
            config,
        }
    }

    /// Run to a terminal status, publishing every transition.
    pub async fn run(&self, status: &StatusPublisher) -> WorkflowStatus {
        let terminal = self
            .execute(status)
            .await
            .unwrap_or_else(StepError::into_status);
        status.publish(terminal.clone());
        terminal
    }

    async fn execute(&self, status: &StatusPublisher) -> Result<WorkflowStatus, StepError> {
        status.stage(Stage::Validating);
        let account = connected_account(self.wallet.as_ref(), self.config.expected_chain_id)
            .await
            .during(Phase::Query)?;

        status.stage(Stage::CheckingBalance);
        let gated = &self.config.gated_asset;
        let gated_balance = self
            .reader
            .get_token_balance(gated, &account)
            .await
            .during(Phase::Query)?;
        info!(address = %account.address, asset = %gated.symbol, balance = %gated_balance, "Gated balance read");

        let transferred = if gated_balance.is_zero() {
            None
        } else {
            let intent = TransferIntent {
                asset: gated.clone(),
                recipient: self.config.recipient.clone(),
                amount: TransferAmount::Fixed(gated_balance),
            };
            match self
                .executor
                .execute(&account, intent, TransferPurpose::GatedAssetTransfer, status)
                .await
                .during(Phase::Submission)?
            {
                TransferOutcome::Sent { receipt, amount } => Some((receipt, amount)),
                TransferOutcome::NothingToTransfer => None,
            }
        };

        if let Some((receipt, _)) = &transferred {
            if self.wallet.account().await.as_ref() != Some(&account) {
                warn!(tx_hash = %receipt.tx_hash, "Wallet disconnected after confirmed transfer");
                return Ok(WorkflowStatus::Failure {
                    reason: FailureReason::NotConnected,
                    message: format!(
                        "Transaction {} was confirmed, then the wallet disconnected. \
                         Reconnect to see your balances.",
                        receipt.tx_hash
                    ),
                });
            }
        }

        status.stage(Stage::AggregatingBalances);
        let balances = self
            .aggregator
            .collect(&account, &self.config.assets)
            .await
            .during(Phase::Query)?;

        let (outcome, message) = match transferred {
            Some((receipt, amount)) => (
                SuccessOutcome::Transferred {
                    tx_hash: receipt.tx_hash.clone(),
                },
                format!(
                    "Transferred {} {} to {} in transaction {}. Balances refreshed.",
                    format_units(amount, gated.decimals),
                    gated.symbol,
                    short_address(&self.config.recipient),
                    receipt.tx_hash
                ),
            ),
            None => (
                SuccessOutcome::BalanceCheckComplete,
                "Balance check complete.".to_string(),
            ),
        };

        info!(address = %account.address, ?outcome, "Balance check finished");
        Ok(WorkflowStatus::Success {
            outcome,
            message,
            balances: Some(balances),
        })
    }
}
