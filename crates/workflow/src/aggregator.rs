use alloy_primitives::U256;
use blockchain::ChainReader;
use shared::units::{format_display, format_units};
use shared::{Account, AssetDescriptor, AssetList, BalanceEntry, Error, Result};
use std::sync::Arc;
use tracing::{debug, warn};

/// Builds the ordered balance report: native asset first, then tokens in configuration order.
///
/// Queries run one after another. Any failed query fails the whole batch; a balance is
/// never zero-filled.
pub struct BalanceAggregator {
    reader: Arc<dyn ChainReader>,
    display_decimals: u8,
}

impl BalanceAggregator {
    pub fn new(reader: Arc<dyn ChainReader>, display_decimals: u8) -> Self {
        Self {
            reader,
            display_decimals,
        }
    }

    pub async fn collect(&self, account: &Account, assets: &AssetList) -> Result<Vec<BalanceEntry>> {
        let mut entries = Vec::with_capacity(assets.len());

        let native = assets.native();
        let raw = self
            .reader
            .get_native_balance(account)
            .await
            .map_err(|e| as_query_error(native, e))?;
        entries.push(self.entry(native, raw));

        for token in assets.tokens() {
            let raw = self
                .reader
                .get_token_balance(token, account)
                .await
                .map_err(|e| as_query_error(token, e))?;
            entries.push(self.entry(token, raw));
        }

        debug!(address = %account.address, count = entries.len(), "Balances collected");
        Ok(entries)
    }

    fn entry(&self, asset: &AssetDescriptor, raw_amount: U256) -> BalanceEntry {
        BalanceEntry {
            asset: asset.clone(),
            raw_amount,
            formatted_amount: format_units(raw_amount, asset.decimals),
            display_amount: format_display(raw_amount, asset.decimals, self.display_decimals),
        }
    }
}

fn as_query_error(asset: &AssetDescriptor, error: Error) -> Error {
    warn!(asset = %asset.symbol, "Balance aggregation aborted: {}", error);
    match error {
        Error::Query(_) => error,
        other => Error::Query(format!("{}: {}", asset.symbol, other)),
    }
}
