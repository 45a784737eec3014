pub mod address;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod units;

pub use error::{Error, Result};
pub use models::*;
