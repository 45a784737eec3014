use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

// Wallet models
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: String,
    pub chain_id: u64,
}

impl Account {
    pub fn new(address: impl Into<String>, chain_id: u64) -> Self {
        Self {
            address: address.into(),
            chain_id,
        }
    }
}

// Asset models
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    pub symbol: String,
    pub display_name: String,
    /// Absent for the chain's native asset.
    pub contract_address: Option<String>,
    pub decimals: u8,
}

impl AssetDescriptor {
    pub fn native(symbol: impl Into<String>, display_name: impl Into<String>, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            display_name: display_name.into(),
            contract_address: None,
            decimals,
        }
    }

    pub fn token(
        symbol: impl Into<String>,
        display_name: impl Into<String>,
        contract_address: impl Into<String>,
        decimals: u8,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            display_name: display_name.into(),
            contract_address: Some(contract_address.into()),
            decimals,
        }
    }

    pub fn is_native(&self) -> bool {
        self.contract_address.is_none()
    }
}

/// The native asset followed by the configured tokens, in configuration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetList {
    native: AssetDescriptor,
    tokens: Vec<AssetDescriptor>,
}

impl AssetList {
    pub fn new(native: AssetDescriptor, tokens: Vec<AssetDescriptor>) -> crate::Result<Self> {
        if !native.is_native() {
            return Err(crate::Error::Validation(format!(
                "{} has a contract address and cannot be the native asset",
                native.symbol
            )));
        }
        if let Some(token) = tokens.iter().find(|t| t.is_native()) {
            return Err(crate::Error::Validation(format!(
                "token {} is missing a contract address",
                token.symbol
            )));
        }
        Ok(Self { native, tokens })
    }

    pub fn native(&self) -> &AssetDescriptor {
        &self.native
    }

    pub fn tokens(&self) -> &[AssetDescriptor] {
        &self.tokens
    }

    pub fn token_by_symbol(&self, symbol: &str) -> Option<&AssetDescriptor> {
        self.tokens
            .iter()
            .find(|t| t.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Number of entries a balance report over this list contains.
    pub fn len(&self) -> usize {
        1 + self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub asset: AssetDescriptor,
    pub raw_amount: U256,
    /// Full precision decimal string.
    pub formatted_amount: String,
    /// Decimal string truncated to the configured display precision.
    pub display_amount: String,
}

// Transfer models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferAmount {
    Fixed(U256),
    /// Resolved by reading the balance right before submission.
    EntireBalance,
}

/// Single-use description of one transfer; consumed by one submission attempt.
#[derive(Debug, PartialEq, Eq)]
pub struct TransferIntent {
    pub asset: AssetDescriptor,
    pub recipient: String,
    pub amount: TransferAmount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub tx_hash: String,
    pub block_number: Option<u64>,
}

// Workflow status models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Validating,
    CheckingBalance,
    AwaitingApproval,
    Submitting,
    AggregatingBalances,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Validating => "Checking wallet connection",
            Stage::CheckingBalance => "Checking balance",
            Stage::AwaitingApproval => "Awaiting your approval",
            Stage::Submitting => "Waiting for signature and confirmation",
            Stage::AggregatingBalances => "Refreshing balances",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    NotConnected,
    WrongNetwork,
    UserDeclined,
    QueryError,
    SubmissionError,
    /// Broadcast happened but settlement could not be observed.
    OutcomeUnknown,
    AlreadyRunning,
    InvalidConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuccessOutcome {
    BalanceCheckComplete,
    Transferred { tx_hash: String },
    NothingToTransfer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowStatus {
    Idle,
    InProgress(Stage),
    Success {
        outcome: SuccessOutcome,
        message: String,
        balances: Option<Vec<BalanceEntry>>,
    },
    Failure {
        reason: FailureReason,
        message: String,
    },
}

impl WorkflowStatus {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, WorkflowStatus::InProgress(_))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WorkflowStatus::Success { .. } | WorkflowStatus::Failure { .. }
        )
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            WorkflowStatus::Failure { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            WorkflowStatus::Success { message, .. } | WorkflowStatus::Failure { message, .. } => {
                Some(message)
            }
            _ => None,
        }
    }

    pub fn balances(&self) -> Option<&[BalanceEntry]> {
        match self {
            WorkflowStatus::Success {
                balances: Some(balances),
                ..
            } => Some(balances),
            _ => None,
        }
    }
}
