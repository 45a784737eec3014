use async_trait::async_trait;
use serde_json::{json, Value};
use shared::{Account, Error, Result};
use tracing::{debug, info, warn};

use crate::rpc::{parse_quantity, to_quantity, JsonRpcClient, RpcFailure};
use crate::traits::{TransferSigner, WalletConnection};
use crate::types::UnsignedTransfer;

/// A wallet reached over JSON-RPC (a desktop wallet or signer daemon holding the keys).
///
/// The wallet prompts its user for every signature; rejections come back as the
/// EIP-1193 code 4001.
pub struct RemoteWallet {
    rpc: JsonRpcClient,
}

impl RemoteWallet {
    pub fn new(rpc_url: String) -> Self {
        info!("Using wallet endpoint: {}", rpc_url);
        Self {
            rpc: JsonRpcClient::new(rpc_url),
        }
    }

    async fn try_account(&self) -> std::result::Result<Option<Account>, RpcFailure> {
        let accounts = self.rpc.call("eth_accounts", json!([])).await?;
        let address = match accounts
            .as_array()
            .and_then(|list| list.first())
            .and_then(Value::as_str)
        {
            Some(address) => address.to_string(),
            None => return Ok(None),
        };

        let chain_id = parse_quantity(&self.rpc.call("eth_chainId", json!([])).await?)?;
        let chain_id = u64::try_from(chain_id)
            .map_err(|_| RpcFailure::Malformed("chain id out of range".to_string()))?;

        Ok(Some(Account::new(address, chain_id)))
    }
}

/// Map a wallet signing failure onto the error taxonomy by its code, not its text.
pub fn classify_signing_failure(failure: RpcFailure) -> Error {
    if failure.is_user_rejection() {
        Error::UserDeclined
    } else {
        Error::Signing(failure.to_string())
    }
}

/// Wallets answer `eth_signTransaction` with either the raw hex or `{ raw, tx }`.
fn extract_raw_transaction(result: &Value) -> Result<String> {
    result
        .as_str()
        .or_else(|| result.get("raw").and_then(Value::as_str))
        .map(str::to_string)
        .ok_or_else(|| Error::Signing("wallet returned no signed transaction".to_string()))
}

#[async_trait]
impl WalletConnection for RemoteWallet {
    async fn account(&self) -> Option<Account> {
        match self.try_account().await {
            Ok(account) => account,
            Err(e) => {
                warn!("Wallet unavailable, treating as disconnected: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl TransferSigner for RemoteWallet {
    async fn sign_transfer(&self, request: &UnsignedTransfer) -> Result<String> {
        let mut tx = json!({
            "from": request.from,
            "to": request.to,
            "value": to_quantity(request.value),
            "chainId": format!("0x{:x}", request.chain_id),
        });
        if let Some(data) = &request.data {
            tx["data"] = json!(data);
        }

        debug!(from = %request.from, to = %request.to, "Sending eth_signTransaction");
        let result = self
            .rpc
            .call("eth_signTransaction", json!([tx]))
            .await
            .map_err(classify_signing_failure)?;
        extract_raw_transaction(&result)
    }
}
