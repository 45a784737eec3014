use alloy_primitives::U256;
use async_trait::async_trait;
use shared::{Account, AssetDescriptor, Result, TransferReceipt};

use crate::types::{ReceiptStatus, UnsignedTransfer};

/// Read-only balance queries. Never retries; a zero balance is a valid result.
#[mockall::automock]
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn get_native_balance(&self, account: &Account) -> Result<U256>;
    async fn get_token_balance(&self, asset: &AssetDescriptor, account: &Account) -> Result<U256>;
}

/// Sign, broadcast and wait for inclusion of a value transfer.
///
/// A failed submission is reported, never resent. `Error::UserDeclined` is kept
/// apart from every other failure.
#[mockall::automock]
#[async_trait]
pub trait ChainWriter: Send + Sync {
    async fn submit_native_transfer(
        &self,
        account: &Account,
        recipient: &str,
        amount: U256,
    ) -> Result<TransferReceipt>;

    async fn submit_token_transfer(
        &self,
        asset: &AssetDescriptor,
        account: &Account,
        recipient: &str,
        amount: U256,
    ) -> Result<TransferReceipt>;
}

/// Signing capability of the connected wallet. Returns the raw signed transaction.
#[mockall::automock]
#[async_trait]
pub trait TransferSigner: Send + Sync {
    async fn sign_transfer(&self, request: &UnsignedTransfer) -> Result<String>;
}

/// Network side of a submission: broadcast and receipt lookup.
#[mockall::automock]
#[async_trait]
pub trait TransactionBroadcaster: Send + Sync {
    async fn send_raw_transaction(&self, raw_tx: &str) -> Result<String>;
    async fn transaction_receipt(&self, tx_hash: &str) -> Result<Option<ReceiptStatus>>;
}

/// The externally managed wallet connection; `None` when disconnected.
#[mockall::automock]
#[async_trait]
pub trait WalletConnection: Send + Sync {
    async fn account(&self) -> Option<Account>;
}
