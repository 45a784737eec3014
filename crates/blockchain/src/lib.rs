pub mod erc20;
pub mod evm_client;
pub mod remote_wallet;
pub mod rpc;
pub mod traits;
pub mod types;
pub mod writer;

pub use evm_client::EvmClient;
pub use remote_wallet::RemoteWallet;
pub use traits::*;
pub use types::*;
pub use writer::EvmChainWriter;
