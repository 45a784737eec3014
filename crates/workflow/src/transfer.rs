use alloy_primitives::U256;
use blockchain::{ChainReader, ChainWriter, WalletConnection};
use shared::address::validate_address;
use shared::{Account, Error, Result, Stage, TransferAmount, TransferIntent, TransferReceipt};
use std::sync::Arc;
use tracing::{info, warn};

use crate::approval::{TransferApproval, TransferPreview, TransferPurpose};
use crate::status::StatusPublisher;

/// Resolve the connected account, or fail before any chain call is made.
pub async fn connected_account(wallet: &dyn WalletConnection, expected_chain_id: u64) -> Result<Account> {
    let account = wallet.account().await.ok_or(Error::NotConnected)?;
    if validate_address(&account.address).is_err() {
        warn!(address = %account.address, "Wallet reported an invalid address");
        return Err(Error::NotConnected);
    }
    if account.chain_id != expected_chain_id {
        return Err(Error::WrongNetwork {
            expected: expected_chain_id,
            actual: account.chain_id,
        });
    }
    Ok(account)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    Sent { receipt: TransferReceipt, amount: U256 },
    NothingToTransfer,
}

/// Runs one `TransferIntent`: resolve the amount, get explicit approval, then submit once.
pub struct TransferExecutor {
    reader: Arc<dyn ChainReader>,
    writer: Arc<dyn ChainWriter>,
    approval: Arc<dyn TransferApproval>,
}

impl TransferExecutor {
    pub fn new(
        reader: Arc<dyn ChainReader>,
        writer: Arc<dyn ChainWriter>,
        approval: Arc<dyn TransferApproval>,
    ) -> Self {
        Self {
            reader,
            writer,
            approval,
        }
    }

    pub async fn execute(
        &self,
        account: &Account,
        intent: TransferIntent,
        purpose: TransferPurpose,
        status: &StatusPublisher,
    ) -> Result<TransferOutcome> {
        let TransferIntent {
            asset,
            recipient,
            amount,
        } = intent;

        let amount = match amount {
            TransferAmount::Fixed(amount) => amount,
            TransferAmount::EntireBalance if asset.is_native() => {
                return Err(Error::Validation(format!(
                    "cannot send the entire {} balance, it also pays for gas",
                    asset.symbol
                )));
            }
            TransferAmount::EntireBalance => {
                status.stage(Stage::CheckingBalance);
                self.reader.get_token_balance(&asset, account).await?
            }
        };

        if amount.is_zero() {
            info!(asset = %asset.symbol, "Nothing to transfer");
            return Ok(TransferOutcome::NothingToTransfer);
        }

        let preview = TransferPreview::new(purpose, &asset, amount, &account.address, &recipient);
        status.stage(Stage::AwaitingApproval);
        if !self.approval.approve(&preview).await {
            info!(asset = %asset.symbol, "Transfer not approved by user");
            return Err(Error::UserDeclined);
        }

        status.stage(Stage::Submitting);
        info!(asset = %asset.symbol, amount = %amount, recipient = %recipient, "Submitting approved transfer");
        let receipt = if asset.is_native() {
            self.writer
                .submit_native_transfer(account, &recipient, amount)
                .await?
        } else {
            self.writer
                .submit_token_transfer(&asset, account, &recipient, amount)
                .await?
        };

        Ok(TransferOutcome::Sent { receipt, amount })
    }
}
