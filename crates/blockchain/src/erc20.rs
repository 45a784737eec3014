use alloy_primitives::{hex, keccak256, Address, U256};
use shared::{Error, Result};
use std::str::FromStr;

pub const BALANCE_OF: &str = "balanceOf(address)";
pub const TRANSFER: &str = "transfer(address,uint256)";

pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash.as_slice()[..4]);
    out
}

fn address_word(address: &str) -> Result<[u8; 32]> {
    let parsed = Address::from_str(address)
        .map_err(|e| Error::InvalidWalletAddress(format!("{}: {}", address, e)))?;
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(parsed.as_slice());
    Ok(word)
}

pub fn encode_balance_of(holder: &str) -> Result<String> {
    let mut out = Vec::with_capacity(4 + 32);
    out.extend_from_slice(&selector(BALANCE_OF));
    out.extend_from_slice(&address_word(holder)?);
    Ok(format!("0x{}", hex::encode(out)))
}

pub fn encode_transfer(recipient: &str, amount: U256) -> Result<String> {
    let mut out = Vec::with_capacity(4 + 64);
    out.extend_from_slice(&selector(TRANSFER));
    out.extend_from_slice(&address_word(recipient)?);
    out.extend_from_slice(&amount.to_be_bytes::<32>());
    Ok(format!("0x{}", hex::encode(out)))
}

/// Decode the first ABI word of an `eth_call` result as a uint256.
pub fn decode_uint256(result_hex: &str) -> Result<U256> {
    let bytes = hex::decode(result_hex.trim())
        .map_err(|_| Error::EvmRpc("Invalid eth_call hex result".to_string()))?;
    if bytes.len() < 32 {
        return Err(Error::EvmRpc(format!(
            "Invalid eth_call ABI result length: {}",
            bytes.len()
        )));
    }
    Ok(U256::from_be_slice(&bytes[..32]))
}
