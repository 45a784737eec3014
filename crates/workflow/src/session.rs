use blockchain::{ChainReader, ChainWriter, WalletConnection};
use shared::config::WorkflowConfig;
use shared::{FailureReason, WorkflowStatus};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;

use crate::approval::TransferApproval;
use crate::donation::DonationActions;
use crate::orchestrator::TransferOrchestrator;
use crate::status::StatusPublisher;

/// The three user-facing actions of one UI session, sharing a single status stream.
///
/// At most one action runs at a time; an overlapping call is rejected with
/// `AlreadyRunning` and leaves the published status untouched.
pub struct WorkflowSession {
    orchestrator: TransferOrchestrator,
    donations: DonationActions,
    status: StatusPublisher,
    running: AtomicBool,
}

struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl WorkflowSession {
    pub fn new(
        wallet: Arc<dyn WalletConnection>,
        reader: Arc<dyn ChainReader>,
        writer: Arc<dyn ChainWriter>,
        approval: Arc<dyn TransferApproval>,
        config: WorkflowConfig,
    ) -> Self {
        let config = Arc::new(config);
        Self {
            orchestrator: TransferOrchestrator::new(
                wallet.clone(),
                reader.clone(),
                writer.clone(),
                approval.clone(),
                config.clone(),
            ),
            donations: DonationActions::new(wallet, reader, writer, approval, config),
            status: StatusPublisher::new(),
            running: AtomicBool::new(false),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<WorkflowStatus> {
        self.status.subscribe()
    }

    pub fn status(&self) -> WorkflowStatus {
        self.status.current()
    }

    pub async fn run_balance_check_workflow(&self) -> WorkflowStatus {
        self.exclusive("balance_check", || self.orchestrator.run(&self.status))
            .await
    }

    pub async fn run_fixed_native_donation(&self) -> WorkflowStatus {
        self.exclusive("native_donation", || self.donations.donate_native(&self.status))
            .await
    }

    pub async fn run_full_token_donation(&self) -> WorkflowStatus {
        self.exclusive("token_donation", || {
            self.donations.donate_full_token(&self.status)
        })
        .await
    }

    async fn exclusive<F, Fut>(&self, action_name: &str, action: F) -> WorkflowStatus
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = WorkflowStatus>,
    {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!(action = action_name, "Rejected: another action is in progress");
            return WorkflowStatus::Failure {
                reason: FailureReason::AlreadyRunning,
                message: "Another action is still in progress.".to_string(),
            };
        }

        let _guard = RunningGuard(&self.running);
        action().await
    }
}
