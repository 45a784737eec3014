use shared::{Error, FailureReason, WorkflowStatus};
use tracing::warn;

/// Which side of the chain boundary a step talks to; decides how unclassified errors map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Query,
    Submission,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepError {
    pub error: Error,
    pub phase: Phase,
}

pub trait PhaseExt<T> {
    fn during(self, phase: Phase) -> Result<T, StepError>;
}

impl<T> PhaseExt<T> for shared::Result<T> {
    fn during(self, phase: Phase) -> Result<T, StepError> {
        self.map_err(|error| StepError { error, phase })
    }
}

pub fn classify(error: &Error, phase: Phase) -> FailureReason {
    match error {
        Error::NotConnected => FailureReason::NotConnected,
        Error::WrongNetwork { .. } => FailureReason::WrongNetwork,
        Error::UserDeclined => FailureReason::UserDeclined,
        Error::Query(_) => FailureReason::QueryError,
        Error::Signing(_) | Error::Broadcast(_) | Error::Reverted { .. } => {
            FailureReason::SubmissionError
        }
        Error::ConfirmationLost { .. } => FailureReason::OutcomeUnknown,
        Error::InvalidWalletAddress(_) | Error::InvalidAmount(_) | Error::Validation(_) => {
            FailureReason::InvalidConfig
        }
        Error::EvmRpc(_) => match phase {
            Phase::Query => FailureReason::QueryError,
            Phase::Submission => FailureReason::SubmissionError,
        },
    }
}

/// One human-readable message per failure. Declines never carry provider text.
pub fn failure_message(error: &Error, reason: FailureReason) -> String {
    match reason {
        FailureReason::NotConnected => "Please connect your wallet first.".to_string(),
        FailureReason::WrongNetwork => match error {
            Error::WrongNetwork { expected, actual } => format!(
                "Your wallet is on chain {}. Switch to chain {} and try again.",
                actual, expected
            ),
            _ => "Your wallet is on the wrong network.".to_string(),
        },
        FailureReason::UserDeclined => "Request declined. Nothing was sent.".to_string(),
        FailureReason::QueryError => format!("Could not read balances: {}", error),
        FailureReason::SubmissionError => format!("Transfer failed: {}", error),
        FailureReason::OutcomeUnknown => format!(
            "Transaction {} was broadcast but its confirmation could not be observed. \
             It may still settle; check a block explorer before trying again.",
            error.pending_tx_hash().unwrap_or("(unknown)")
        ),
        FailureReason::AlreadyRunning => "Another action is still in progress.".to_string(),
        FailureReason::InvalidConfig => format!("Configuration problem: {}", error),
    }
}

impl StepError {
    pub fn into_status(self) -> WorkflowStatus {
        let reason = classify(&self.error, self.phase);
        warn!(?reason, phase = ?self.phase, "Workflow failed: {}", self.error);
        WorkflowStatus::Failure {
            reason,
            message: failure_message(&self.error, reason),
        }
    }
}
