pub mod aggregator;
pub mod approval;
pub mod classify;
pub mod donation;
pub mod orchestrator;
pub mod session;
pub mod status;
pub mod transfer;

pub use aggregator::BalanceAggregator;
pub use approval::{MockTransferApproval, TransferApproval, TransferPreview, TransferPurpose};
pub use donation::DonationActions;
pub use orchestrator::TransferOrchestrator;
pub use session::WorkflowSession;
pub use status::StatusPublisher;
