use alloy_primitives::U256;
use async_trait::async_trait;
use serde::Serialize;
use shared::units::format_units;
use shared::AssetDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransferPurpose {
    /// The gated token's full balance, offered during a balance check.
    GatedAssetTransfer,
    NativeDonation,
    TokenDonation,
}

/// What the user is asked to approve before any signature is requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferPreview {
    pub purpose: TransferPurpose,
    pub asset: AssetDescriptor,
    pub amount: U256,
    pub formatted_amount: String,
    pub from: String,
    pub recipient: String,
}

impl TransferPreview {
    pub fn new(
        purpose: TransferPurpose,
        asset: &AssetDescriptor,
        amount: U256,
        from: &str,
        recipient: &str,
    ) -> Self {
        Self {
            purpose,
            asset: asset.clone(),
            amount,
            formatted_amount: format_units(amount, asset.decimals),
            from: from.to_string(),
            recipient: recipient.to_string(),
        }
    }

    pub fn title(&self) -> String {
        match self.purpose {
            TransferPurpose::GatedAssetTransfer => {
                format!("Transfer your entire {} balance", self.asset.symbol)
            }
            TransferPurpose::NativeDonation => format!("Donate {}", self.asset.symbol),
            TransferPurpose::TokenDonation => {
                format!("Donate your entire {} balance", self.asset.symbol)
            }
        }
    }

    /// Plain statement of the effect, shown verbatim to the user.
    pub fn summary(&self) -> String {
        format!(
            "{}: send {} {} from {} to {}. The funds leave your wallet and the transfer cannot be undone.",
            self.title(),
            self.formatted_amount,
            self.asset.symbol,
            self.from,
            self.recipient
        )
    }
}

/// Explicit user consent for one transfer. `false` means nothing is signed or sent.
#[mockall::automock]
#[async_trait]
pub trait TransferApproval: Send + Sync {
    async fn approve(&self, preview: &TransferPreview) -> bool;
}
