use alloy_primitives::U256;
use async_trait::async_trait;
use serde_json::{json, Value};
use shared::{Account, AssetDescriptor, Error, Result};
use tracing::{debug, info, warn};

use crate::erc20;
use crate::rpc::{parse_quantity, JsonRpcClient, RpcFailure};
use crate::traits::{ChainReader, TransactionBroadcaster};
use crate::types::ReceiptStatus;

/// JSON-RPC client for an EVM chain (BNB Smart Chain by default).
pub struct EvmClient {
    rpc: JsonRpcClient,
    chain_id: u64,
}

impl EvmClient {
    pub fn new(rpc_url: String, chain_id: u64) -> Self {
        info!(chain_id, "Initializing EVM client with RPC: {}", rpc_url);
        Self {
            rpc: JsonRpcClient::new(rpc_url),
            chain_id,
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Native balance in wei via `eth_getBalance`.
    pub async fn native_balance(&self, address: &str) -> Result<U256> {
        let address = shared::address::validate_address(address)?;
        let result = self
            .rpc
            .call("eth_getBalance", json!([address, "latest"]))
            .await
            .map_err(rpc_error)?;
        parse_quantity(&result).map_err(rpc_error)
    }

    /// ERC-20 `balanceOf` via `eth_call`.
    pub async fn erc20_balance(&self, contract: &str, holder: &str) -> Result<U256> {
        let data = erc20::encode_balance_of(holder)?;
        let result = self
            .rpc
            .call(
                "eth_call",
                json!([{ "to": contract, "data": data }, "latest"]),
            )
            .await
            .map_err(rpc_error)?;
        let result_hex = result
            .as_str()
            .ok_or_else(|| Error::EvmRpc("Missing eth_call result".to_string()))?;
        erc20::decode_uint256(result_hex)
    }

    /// Health check via `eth_blockNumber`.
    pub async fn health_check(&self) -> Result<u64> {
        let result = self
            .rpc
            .call("eth_blockNumber", json!([]))
            .await
            .map_err(rpc_error)?;
        let block = parse_quantity(&result).map_err(rpc_error)?;
        u64::try_from(block).map_err(|_| Error::EvmRpc("block number out of range".to_string()))
    }
}

fn rpc_error(failure: RpcFailure) -> Error {
    Error::EvmRpc(failure.to_string())
}

/// Parse an `eth_getTransactionReceipt` result; `null` means not yet mined.
pub fn parse_receipt(tx_hash: &str, value: &Value) -> Result<Option<ReceiptStatus>> {
    if value.is_null() {
        return Ok(None);
    }

    let status = value
        .get("status")
        .map(parse_quantity)
        .transpose()
        .map_err(rpc_error)?;
    let block_number = value
        .get("blockNumber")
        .filter(|v| !v.is_null())
        .map(parse_quantity)
        .transpose()
        .map_err(rpc_error)?
        .and_then(|n| u64::try_from(n).ok());

    Ok(Some(ReceiptStatus {
        tx_hash: tx_hash.to_string(),
        success: status == Some(U256::from(1u64)),
        block_number,
    }))
}

#[async_trait]
impl ChainReader for EvmClient {
    async fn get_native_balance(&self, account: &Account) -> Result<U256> {
        debug!(address = %account.address, "Querying native balance");
        self.native_balance(&account.address).await.map_err(|e| {
            warn!(address = %account.address, "Native balance query failed: {}", e);
            Error::Query(e.to_string())
        })
    }

    async fn get_token_balance(&self, asset: &AssetDescriptor, account: &Account) -> Result<U256> {
        let contract = asset.contract_address.as_deref().ok_or_else(|| {
            Error::Query(format!("{} has no contract address", asset.symbol))
        })?;
        debug!(address = %account.address, token = %asset.symbol, "Querying token balance");
        self.erc20_balance(contract, &account.address)
            .await
            .map_err(|e| {
                warn!(token = %asset.symbol, "Token balance query failed: {}", e);
                Error::Query(format!("{}: {}", asset.symbol, e))
            })
    }
}

#[async_trait]
impl TransactionBroadcaster for EvmClient {
    async fn send_raw_transaction(&self, raw_tx: &str) -> Result<String> {
        debug!(chain_id = self.chain_id, "Submitting raw transaction");
        let result = self
            .rpc
            .call("eth_sendRawTransaction", json!([raw_tx]))
            .await
            .map_err(rpc_error)?;
        let tx_hash = result
            .as_str()
            .ok_or_else(|| Error::EvmRpc("Missing transaction hash in response".to_string()))?;
        info!(chain_id = self.chain_id, "Transaction submitted: {}", tx_hash);
        Ok(tx_hash.to_string())
    }

    async fn transaction_receipt(&self, tx_hash: &str) -> Result<Option<ReceiptStatus>> {
        let result = self
            .rpc
            .call("eth_getTransactionReceipt", json!([tx_hash]))
            .await
            .map_err(rpc_error)?;
        parse_receipt(tx_hash, &result)
    }
}
