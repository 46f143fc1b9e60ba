//! Prediction Market Backend Library
//!
//! This module exposes the backend components for use by tests and other consumers.

pub mod config;
pub mod error;
pub mod executor;
pub mod keys;
pub mod ledger;
pub mod request;
pub mod services;

// Re-export commonly used types
pub use config::{AppConfig, LedgerConfig, LogFormat};
pub use error::{AppError, AppResult};
pub use executor::{ExecutedInstruction, TransactionExecutor, TransactionReceipt};
pub use ledger::FileLedger;
pub use request::TransactionRequest;
pub use services::{AuditTrailService, LedgerService};
