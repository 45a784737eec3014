use blockchain::{ChainReader, ChainWriter, WalletConnection};
use shared::address::short_address;
use shared::config::WorkflowConfig;
use shared::units::format_units;
use shared::{
    AssetDescriptor, Stage, SuccessOutcome, TransferAmount, TransferIntent, WorkflowStatus,
};
use std::sync::Arc;
use tracing::info;

use crate::approval::{TransferApproval, TransferPurpose};
use crate::classify::{Phase, PhaseExt, StepError};
use crate::status::StatusPublisher;
use crate::transfer::{connected_account, TransferExecutor, TransferOutcome};

/// Fixed native donation and full-balance token donation.
pub struct DonationActions {
    wallet: Arc<dyn WalletConnection>,
    executor: TransferExecutor,
    config: Arc<WorkflowConfig>,
}

impl DonationActions {
    pub fn new(
        wallet: Arc<dyn WalletConnection>,
        reader: Arc<dyn ChainReader>,
        writer: Arc<dyn ChainWriter>,
        approval: Arc<dyn TransferApproval>,
        config: Arc<WorkflowConfig>,
    ) -> Self {
        Self {
            wallet,
            executor: TransferExecutor::new(reader, writer, approval),
            config,
        }
    }

    pub async fn donate_native(&self, status: &StatusPublisher) -> WorkflowStatus {
        let asset = self.config.assets.native().clone();
        let amount = TransferAmount::Fixed(self.config.native_donation_amount);
        self.donate(asset, amount, TransferPurpose::NativeDonation, status)
            .await
    }

    pub async fn donate_full_token(&self, status: &StatusPublisher) -> WorkflowStatus {
        let asset = self.config.donation_token.clone();
        self.donate(
            asset,
            TransferAmount::EntireBalance,
            TransferPurpose::TokenDonation,
            status,
        )
        .await
    }

    async fn donate(
        &self,
        asset: AssetDescriptor,
        amount: TransferAmount,
        purpose: TransferPurpose,
        status: &StatusPublisher,
    ) -> WorkflowStatus {
        let terminal = self
            .execute(asset, amount, purpose, status)
            .await
            .unwrap_or_else(StepError::into_status);
        status.publish(terminal.clone());
        terminal
    }

    async fn execute(
        &self,
        asset: AssetDescriptor,
        amount: TransferAmount,
        purpose: TransferPurpose,
        status: &StatusPublisher,
    ) -> Result<WorkflowStatus, StepError> {
        status.stage(Stage::Validating);
        let account = connected_account(self.wallet.as_ref(), self.config.expected_chain_id)
            .await
            .during(Phase::Query)?;

        let symbol = asset.symbol.clone();
        let decimals = asset.decimals;
        let intent = TransferIntent {
            asset,
            recipient: self.config.recipient.clone(),
            amount,
        };

        let outcome = self
            .executor
            .execute(&account, intent, purpose, status)
            .await
            .during(Phase::Submission)?;

        let status = match outcome {
            TransferOutcome::Sent { receipt, amount } => WorkflowStatus::Success {
                message: format!(
                    "Donated {} {} to {} in transaction {}. Thank you!",
                    format_units(amount, decimals),
                    symbol,
                    short_address(&self.config.recipient),
                    receipt.tx_hash
                ),
                outcome: SuccessOutcome::Transferred {
                    tx_hash: receipt.tx_hash,
                },
                balances: None,
            },
            TransferOutcome::NothingToTransfer => WorkflowStatus::Success {
                outcome: SuccessOutcome::NothingToTransfer,
                message: format!("No {} balance to send.", symbol),
                balances: None,
            },
        };
        info!(address = %account.address, ?purpose, "Donation finished");
        Ok(status)
    }
}
