use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Wallet not connected")]
    NotConnected,

    #[error("Wrong network: expected chain {expected}, wallet is on chain {actual}")]
    WrongNetwork { expected: u64, actual: u64 },

    #[error("User declined the request")]
    UserDeclined,

    #[error("Balance query failed: {0}")]
    Query(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Broadcast rejected: {0}")]
    Broadcast(String),

    #[error("Transaction {tx_hash} reverted")]
    Reverted { tx_hash: String },

    #[error("Lost confirmation for transaction {tx_hash}: {reason}")]
    ConfirmationLost { tx_hash: String, reason: String },

    #[error("EVM RPC error: {0}")]
    EvmRpc(String),

    #[error("Invalid wallet address: {0}")]
    InvalidWalletAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Transaction hash of a transfer that was broadcast but whose outcome is unknown.
    pub fn pending_tx_hash(&self) -> Option<&str> {
        match self {
            Error::ConfirmationLost { tx_hash, .. } => Some(tx_hash),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
