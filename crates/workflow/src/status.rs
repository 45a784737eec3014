use shared::{Stage, WorkflowStatus};
use tokio::sync::watch;
use tracing::debug;

/// Latest-value channel of `WorkflowStatus` observed by the presentation layer.
pub struct StatusPublisher {
    tx: watch::Sender<WorkflowStatus>,
}

impl StatusPublisher {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(WorkflowStatus::Idle);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<WorkflowStatus> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> WorkflowStatus {
        self.tx.borrow().clone()
    }

    pub fn publish(&self, status: WorkflowStatus) {
        debug!(?status, "Workflow status");
        self.tx.send_replace(status);
    }

    pub fn stage(&self, stage: Stage) {
        self.publish(WorkflowStatus::InProgress(stage));
    }
}

impl Default for StatusPublisher {
    fn default() -> Self {
        Self::new()
    }
}
