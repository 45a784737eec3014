use alloy_primitives::U256;
use serde::Deserialize;
use std::env;

use crate::address::validate_address;
use crate::models::{AssetDescriptor, AssetList};
use crate::units::parse_units;

/// BEP-20 USDT on BNB Smart Chain.
const DEFAULT_TOKENS: &str = "USDT:USDT Coin:0x55d398326f99059fF775485246999027B3197955:18";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub rpc: RpcConfig,
    pub wallet: WalletConfig,
    pub assets: AssetConfig,
    pub donation: DonationConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcConfig {
    pub url: String,
    pub chain_id: u64,
    pub confirmation_poll_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalletConfig {
    /// JSON-RPC endpoint of the wallet that owns the signing keys.
    pub rpc_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    pub native: AssetDescriptor,
    pub tokens: Vec<AssetDescriptor>,
    /// Symbol of the token whose balance decides whether a transfer is offered.
    pub gated_asset: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DonationConfig {
    pub recipient: String,
    pub native_amount: String,
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    pub decimals: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

/// Validated settings injected into the workflows at construction.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    pub recipient: String,
    pub assets: AssetList,
    pub gated_asset: AssetDescriptor,
    pub donation_token: AssetDescriptor,
    pub native_donation_amount: U256,
    pub display_decimals: u8,
    pub expected_chain_id: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| anyhow::anyhow!("missing required setting {}", key))
        };
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let tokens = parse_tokens(&or_default("TOKENS", DEFAULT_TOKENS))?;
        let first_token = tokens
            .first()
            .map(|t| t.symbol.clone())
            .unwrap_or_default();

        Ok(Config {
            rpc: RpcConfig {
                url: required("RPC_URL")?,
                chain_id: or_default("CHAIN_ID", "56").parse()?,
                confirmation_poll_interval_ms: or_default("CONFIRMATION_POLL_INTERVAL_MS", "3000")
                    .parse()?,
            },
            wallet: WalletConfig {
                rpc_url: or_default("WALLET_RPC_URL", "http://127.0.0.1:1248"),
            },
            assets: AssetConfig {
                native: AssetDescriptor::native(
                    or_default("NATIVE_SYMBOL", "BNB"),
                    or_default("NATIVE_NAME", "BNB"),
                    or_default("NATIVE_DECIMALS", "18").parse()?,
                ),
                tokens,
                gated_asset: or_default("GATED_ASSET", &first_token),
            },
            donation: DonationConfig {
                recipient: required("RECIPIENT_ADDRESS")?,
                native_amount: or_default("NATIVE_DONATION_AMOUNT", "0.1"),
                token: or_default("DONATION_TOKEN", &first_token),
            },
            display: DisplayConfig {
                decimals: or_default("DISPLAY_DECIMALS", "4").parse()?,
            },
            logging: LoggingConfig {
                format: match or_default("LOG_FORMAT", "json").to_ascii_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    other => anyhow::bail!("unknown LOG_FORMAT {}", other),
                },
            },
        })
    }

    pub fn workflow_config(&self) -> anyhow::Result<WorkflowConfig> {
        let recipient = validate_address(&self.donation.recipient)?;
        let assets = AssetList::new(self.assets.native.clone(), self.assets.tokens.clone())?;

        let gated_asset = assets
            .token_by_symbol(&self.assets.gated_asset)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("GATED_ASSET {} is not a configured token", self.assets.gated_asset))?;
        let donation_token = assets
            .token_by_symbol(&self.donation.token)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("DONATION_TOKEN {} is not a configured token", self.donation.token))?;
        let native_donation_amount =
            parse_units(&self.donation.native_amount, assets.native().decimals)?;

        Ok(WorkflowConfig {
            recipient,
            assets,
            gated_asset,
            donation_token,
            native_donation_amount,
            display_decimals: self.display.decimals,
            expected_chain_id: self.rpc.chain_id,
        })
    }
}

/// Parse `SYMBOL:Name:0xcontract:decimals` entries separated by commas.
pub fn parse_tokens(raw: &str) -> anyhow::Result<Vec<AssetDescriptor>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> anyhow::Result<AssetDescriptor> {
            let parts: Vec<&str> = entry.split(':').map(str::trim).collect();
            match parts.as_slice() {
                [symbol, name, contract, decimals] => {
                    let contract = validate_address(contract)?;
                    Ok(AssetDescriptor::token(*symbol, *name, contract, decimals.parse()?))
                }
                _ => anyhow::bail!(
                    "token entry '{}' must look like SYMBOL:Name:0xcontract:decimals",
                    entry
                ),
            }
        })
        .collect()
}
