use alloy_primitives::U256;
use async_trait::async_trait;
use shared::{Account, AssetDescriptor, Error, Result, TransferReceipt};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::erc20;
use crate::traits::{ChainWriter, TransactionBroadcaster, TransferSigner};
use crate::types::UnsignedTransfer;

/// `ChainWriter` that signs through the connected wallet and settles on an EVM chain.
///
/// Confirmation polling has no deadline: it ends on inclusion, on revert, or when the
/// provider fails, in which case the outcome is reported as unknown.
pub struct EvmChainWriter {
    broadcaster: Arc<dyn TransactionBroadcaster>,
    signer: Arc<dyn TransferSigner>,
    chain_id: u64,
    poll_interval: Duration,
}

impl EvmChainWriter {
    pub fn new(
        broadcaster: Arc<dyn TransactionBroadcaster>,
        signer: Arc<dyn TransferSigner>,
        chain_id: u64,
        poll_interval: Duration,
    ) -> Self {
        Self {
            broadcaster,
            signer,
            chain_id,
            poll_interval,
        }
    }

    async fn submit(&self, request: UnsignedTransfer) -> Result<TransferReceipt> {
        info!(from = %request.from, to = %request.to, "Requesting signature for transfer");
        let raw_tx = match self.signer.sign_transfer(&request).await {
            Ok(raw_tx) => raw_tx,
            Err(Error::UserDeclined) => {
                info!(from = %request.from, "Signature request declined by user");
                return Err(Error::UserDeclined);
            }
            Err(e) => {
                warn!("Signing failed: {}", e);
                return Err(e);
            }
        };

        let tx_hash = self
            .broadcaster
            .send_raw_transaction(&raw_tx)
            .await
            .map_err(|e| {
                error!("Broadcast rejected: {}", e);
                Error::Broadcast(e.to_string())
            })?;

        self.wait_for_confirmation(&tx_hash).await
    }

    async fn wait_for_confirmation(&self, tx_hash: &str) -> Result<TransferReceipt> {
        info!(tx_hash, "Waiting for confirmation");
        loop {
            match self.broadcaster.transaction_receipt(tx_hash).await {
                Ok(Some(receipt)) if receipt.success => {
                    info!(tx_hash, block = ?receipt.block_number, "Transaction confirmed");
                    return Ok(TransferReceipt {
                        tx_hash: receipt.tx_hash,
                        block_number: receipt.block_number,
                    });
                }
                Ok(Some(_)) => {
                    error!(tx_hash, "Transaction reverted");
                    return Err(Error::Reverted {
                        tx_hash: tx_hash.to_string(),
                    });
                }
                Ok(None) => {
                    debug!(tx_hash, "Not yet mined, polling again in {:?}", self.poll_interval);
                    sleep(self.poll_interval).await;
                }
                Err(e) => {
                    error!(tx_hash, "Lost track of transaction: {}", e);
                    return Err(Error::ConfirmationLost {
                        tx_hash: tx_hash.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }
    }
}

#[async_trait]
impl ChainWriter for EvmChainWriter {
    async fn submit_native_transfer(
        &self,
        account: &Account,
        recipient: &str,
        amount: U256,
    ) -> Result<TransferReceipt> {
        self.submit(UnsignedTransfer {
            from: account.address.clone(),
            to: recipient.to_string(),
            value: amount,
            data: None,
            chain_id: self.chain_id,
        })
        .await
    }

    async fn submit_token_transfer(
        &self,
        asset: &AssetDescriptor,
        account: &Account,
        recipient: &str,
        amount: U256,
    ) -> Result<TransferReceipt> {
        let contract = asset.contract_address.as_deref().ok_or_else(|| {
            Error::Validation(format!("{} has no contract address", asset.symbol))
        })?;
        self.submit(UnsignedTransfer {
            from: account.address.clone(),
            to: contract.to_string(),
            value: U256::ZERO,
            data: Some(erc20::encode_transfer(recipient, amount)?),
            chain_id: self.chain_id,
        })
        .await
    }
}
