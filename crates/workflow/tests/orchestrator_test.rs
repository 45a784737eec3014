mod common;

use blockchain::{MockChainReader, MockChainWriter, MockWalletConnection};
use common::*;
use mockall::Sequence;
use shared::{Error, FailureReason, SuccessOutcome, WorkflowStatus};
use std::sync::Arc;
use workflow::{
    MockTransferApproval, StatusPublisher, TransferOrchestrator, TransferPurpose,
};

fn orchestrator(
    wallet: MockWalletConnection,
    reader: MockChainReader,
    writer: MockChainWriter,
    approval: MockTransferApproval,
) -> TransferOrchestrator {
    TransferOrchestrator::new(
        Arc::new(wallet),
        Arc::new(reader),
        Arc::new(writer),
        Arc::new(approval),
        Arc::new(config()),
    )
}

/// First token read (the gated balance) returns `first`, later reads return `after`.
fn token_reads(reader: &mut MockChainReader, first: u64, after: u64) {
    let mut seq = Sequence::new();
    reader
        .expect_get_token_balance()
        .times(1)
        .in_sequence(&mut seq)
        .returning(move |_, _| Ok(units(first)));
    reader
        .expect_get_token_balance()
        .returning(move |_, _| Ok(units(after)));
}

#[tokio::test]
async fn test_disconnected_wallet_makes_no_chain_calls() {
    let (reader, writer, approval) = untouched();
    let status = StatusPublisher::new();

    let result = orchestrator(disconnected_wallet(), reader, writer, approval)
        .run(&status)
        .await;

    assert_eq!(result.failure_reason(), Some(FailureReason::NotConnected));
    assert_eq!(result.message(), Some("Please connect your wallet first."));
    assert_eq!(status.current(), result);
}

#[tokio::test]
async fn test_wrong_network_makes_no_chain_calls() {
    let (reader, writer, approval) = untouched();
    let mut wallet = MockWalletConnection::new();
    wallet
        .expect_account()
        .returning(|| Some(shared::Account::new(HOLDER, 1)));

    let result = orchestrator(wallet, reader, writer, approval)
        .run(&StatusPublisher::new())
        .await;
    assert_eq!(result.failure_reason(), Some(FailureReason::WrongNetwork));
}

#[tokio::test]
async fn test_zero_gated_balance_skips_transfer() {
    let mut writer = MockChainWriter::new();
    writer.expect_submit_native_transfer().times(0);
    writer.expect_submit_token_transfer().times(0);
    let mut approval = MockTransferApproval::new();
    approval.expect_approve().times(0);

    let mut reader = MockChainReader::new();
    reader
        .expect_get_token_balance()
        .times(2)
        .returning(|_, _| Ok(units(0)));
    reader
        .expect_get_native_balance()
        .times(1)
        .returning(|_| Ok(units(250_000_000_000_000_000)));

    let result = orchestrator(connected_wallet(), reader, writer, approval)
        .run(&StatusPublisher::new())
        .await;

    match result {
        WorkflowStatus::Success {
            outcome,
            message,
            balances: Some(balances),
        } => {
            assert_eq!(outcome, SuccessOutcome::BalanceCheckComplete);
            assert_eq!(message, "Balance check complete.");
            assert_eq!(balances.len(), 1 + config().assets.tokens().len());
            assert_eq!(balances[0].asset.symbol, "BNB");
            assert_eq!(balances[0].display_amount, "0.2500");
            assert_eq!(balances[1].asset.symbol, "USDT");
        }
        other => panic!("unexpected status {:?}", other),
    }
}

#[tokio::test]
async fn test_approved_transfer_sends_gated_balance_then_aggregates() {
    let mut reader = MockChainReader::new();
    token_reads(&mut reader, 1_000_000, 0);
    reader
        .expect_get_native_balance()
        .times(1)
        .returning(|_| Ok(units(0)));

    let mut approval = MockTransferApproval::new();
    approval
        .expect_approve()
        .withf(|preview| {
            preview.purpose == TransferPurpose::GatedAssetTransfer
                && preview.amount == units(1_000_000)
                && preview.recipient == RECIPIENT
                && preview.from == HOLDER
        })
        .times(1)
        .returning(|_| true);

    let mut writer = MockChainWriter::new();
    writer.expect_submit_native_transfer().times(0);
    writer
        .expect_submit_token_transfer()
        .withf(|asset, account, recipient, amount| {
            asset.symbol == "USDT"
                && account.address == HOLDER
                && recipient == RECIPIENT
                && *amount == units(1_000_000)
        })
        .times(1)
        .returning(|_, _, _, _| Ok(receipt()));

    let result = orchestrator(connected_wallet(), reader, writer, approval)
        .run(&StatusPublisher::new())
        .await;

    match result {
        WorkflowStatus::Success {
            outcome,
            message,
            balances: Some(balances),
        } => {
            assert_eq!(
                outcome,
                SuccessOutcome::Transferred {
                    tx_hash: TX_HASH.to_string()
                }
            );
            assert!(message.starts_with("Transferred 0.000000000001 USDT to 0x6e43…b423"));
            assert!(message.contains(TX_HASH));
            let shown: Vec<(&str, &str)> = balances
                .iter()
                .map(|b| (b.asset.symbol.as_str(), b.display_amount.as_str()))
                .collect();
            assert_eq!(shown, vec![("BNB", "0.0000"), ("USDT", "0.0000")]);
        }
        other => panic!("unexpected status {:?}", other),
    }
}

#[tokio::test]
async fn test_unapproved_transfer_sends_nothing_and_skips_aggregation() {
    let mut reader = MockChainReader::new();
    reader
        .expect_get_token_balance()
        .times(1)
        .returning(|_, _| Ok(units(1_000_000)));
    reader.expect_get_native_balance().times(0);

    let mut approval = MockTransferApproval::new();
    approval.expect_approve().times(1).returning(|_| false);

    let mut writer = MockChainWriter::new();
    writer.expect_submit_token_transfer().times(0);
    writer.expect_submit_native_transfer().times(0);

    let result = orchestrator(connected_wallet(), reader, writer, approval)
        .run(&StatusPublisher::new())
        .await;
    assert_eq!(result.failure_reason(), Some(FailureReason::UserDeclined));
    assert!(result.balances().is_none());
}

#[tokio::test]
async fn test_declined_signature_skips_aggregation() {
    let mut reader = MockChainReader::new();
    reader
        .expect_get_token_balance()
        .times(1)
        .returning(|_, _| Ok(units(1_000_000)));
    reader.expect_get_native_balance().times(0);

    let mut approval = MockTransferApproval::new();
    approval.expect_approve().returning(|_| true);

    let mut writer = MockChainWriter::new();
    writer
        .expect_submit_token_transfer()
        .times(1)
        .returning(|_, _, _, _| Err(Error::UserDeclined));

    let result = orchestrator(connected_wallet(), reader, writer, approval)
        .run(&StatusPublisher::new())
        .await;
    assert_eq!(result.failure_reason(), Some(FailureReason::UserDeclined));
    assert_eq!(result.message(), Some("Request declined. Nothing was sent."));
}

#[tokio::test]
async fn test_failed_aggregation_query_fails_workflow() {
    let mut reader = MockChainReader::new();
    reader
        .expect_get_token_balance()
        .returning(|_, _| Ok(units(0)));
    reader
        .expect_get_native_balance()
        .returning(|_| Err(Error::Query("connection refused".to_string())));
    let (_, writer, approval) = untouched();

    let result = orchestrator(connected_wallet(), reader, writer, approval)
        .run(&StatusPublisher::new())
        .await;
    assert_eq!(result.failure_reason(), Some(FailureReason::QueryError));
    assert!(result.balances().is_none());
}

#[tokio::test]
async fn test_failed_gated_read_fails_before_any_transfer() {
    let mut reader = MockChainReader::new();
    reader
        .expect_get_token_balance()
        .times(1)
        .returning(|_, _| Err(Error::Query("USDT: execution reverted".to_string())));
    reader.expect_get_native_balance().times(0);
    let (_, writer, approval) = untouched();

    let result = orchestrator(connected_wallet(), reader, writer, approval)
        .run(&StatusPublisher::new())
        .await;
    assert_eq!(result.failure_reason(), Some(FailureReason::QueryError));
}

#[tokio::test]
async fn test_broadcast_failure_is_submission_error() {
    let mut reader = MockChainReader::new();
    reader
        .expect_get_token_balance()
        .times(1)
        .returning(|_, _| Ok(units(5)));
    reader.expect_get_native_balance().times(0);
    let mut approval = MockTransferApproval::new();
    approval.expect_approve().returning(|_| true);
    let mut writer = MockChainWriter::new();
    writer
        .expect_submit_token_transfer()
        .times(1)
        .returning(|_, _, _, _| Err(Error::Broadcast("insufficient funds for gas".to_string())));

    let result = orchestrator(connected_wallet(), reader, writer, approval)
        .run(&StatusPublisher::new())
        .await;
    assert_eq!(result.failure_reason(), Some(FailureReason::SubmissionError));
    assert!(result.message().unwrap().contains("insufficient funds for gas"));
}

#[tokio::test]
async fn test_lost_confirmation_reports_unknown_outcome() {
    let mut reader = MockChainReader::new();
    reader
        .expect_get_token_balance()
        .times(1)
        .returning(|_, _| Ok(units(5)));
    reader.expect_get_native_balance().times(0);
    let mut approval = MockTransferApproval::new();
    approval.expect_approve().returning(|_| true);
    let mut writer = MockChainWriter::new();
    writer
        .expect_submit_token_transfer()
        .times(1)
        .returning(|_, _, _, _| {
            Err(Error::ConfirmationLost {
                tx_hash: TX_HASH.to_string(),
                reason: "provider disconnected".to_string(),
            })
        });

    let result = orchestrator(connected_wallet(), reader, writer, approval)
        .run(&StatusPublisher::new())
        .await;
    assert_eq!(result.failure_reason(), Some(FailureReason::OutcomeUnknown));
    assert!(result.message().unwrap().contains(TX_HASH));
}

#[tokio::test]
async fn test_disconnect_after_confirmed_transfer() {
    let mut seq = Sequence::new();
    let mut wallet = MockWalletConnection::new();
    wallet
        .expect_account()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Some(account()));
    wallet
        .expect_account()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| None);

    let mut reader = MockChainReader::new();
    reader
        .expect_get_token_balance()
        .times(1)
        .returning(|_, _| Ok(units(5)));
    reader.expect_get_native_balance().times(0);
    let mut approval = MockTransferApproval::new();
    approval.expect_approve().returning(|_| true);
    let mut writer = MockChainWriter::new();
    writer
        .expect_submit_token_transfer()
        .times(1)
        .returning(|_, _, _, _| Ok(receipt()));

    let result = orchestrator(wallet, reader, writer, approval)
        .run(&StatusPublisher::new())
        .await;
    assert_eq!(result.failure_reason(), Some(FailureReason::NotConnected));
    assert!(result.message().unwrap().contains(TX_HASH));
}
