#![allow(dead_code)]

use alloy_primitives::U256;
use blockchain::{MockChainReader, MockChainWriter, MockWalletConnection};
use shared::config::WorkflowConfig;
use shared::units::parse_units;
use shared::{Account, AssetDescriptor, AssetList, TransferReceipt};
use workflow::MockTransferApproval;

pub const HOLDER: &str = "0x742d35cc6634c0532925a3b844bc9e7595f0beb0";
pub const RECIPIENT: &str = "0x6e43a6b55b3abbf0a98cc41025f5be44a7afb423";
pub const TX_HASH: &str = "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";

pub fn account() -> Account {
    Account::new(HOLDER, 56)
}

pub fn bnb() -> AssetDescriptor {
    AssetDescriptor::native("BNB", "BNB", 18)
}

pub fn usdt() -> AssetDescriptor {
    AssetDescriptor::token(
        "USDT",
        "USDT Coin",
        "0x55d398326f99059ff775485246999027b3197955",
        18,
    )
}

pub fn config() -> WorkflowConfig {
    WorkflowConfig {
        recipient: RECIPIENT.to_string(),
        assets: AssetList::new(bnb(), vec![usdt()]).unwrap(),
        gated_asset: usdt(),
        donation_token: usdt(),
        native_donation_amount: parse_units("0.1", 18).unwrap(),
        display_decimals: 4,
        expected_chain_id: 56,
    }
}

pub fn receipt() -> TransferReceipt {
    TransferReceipt {
        tx_hash: TX_HASH.to_string(),
        block_number: Some(40_000_000),
    }
}

pub fn connected_wallet() -> MockWalletConnection {
    let mut wallet = MockWalletConnection::new();
    wallet.expect_account().returning(|| Some(account()));
    wallet
}

pub fn disconnected_wallet() -> MockWalletConnection {
    let mut wallet = MockWalletConnection::new();
    wallet.expect_account().returning(|| None);
    wallet
}

/// Reader, writer and approval that fail the test if touched at all.
pub fn untouched() -> (MockChainReader, MockChainWriter, MockTransferApproval) {
    let mut reader = MockChainReader::new();
    reader.expect_get_native_balance().times(0);
    reader.expect_get_token_balance().times(0);
    let mut writer = MockChainWriter::new();
    writer.expect_submit_native_transfer().times(0);
    writer.expect_submit_token_transfer().times(0);
    let mut approval = MockTransferApproval::new();
    approval.expect_approve().times(0);
    (reader, writer, approval)
}

pub fn units(value: u64) -> U256 {
    U256::from(value)
}
