use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// A transfer handed to the wallet for signing. Nonce and gas are the wallet's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedTransfer {
    pub from: String,
    pub to: String,
    pub value: U256,
    pub data: Option<String>,
    pub chain_id: u64,
}

/// Settlement state of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptStatus {
    pub tx_hash: String,
    pub success: bool,
    pub block_number: Option<u64>,
}
