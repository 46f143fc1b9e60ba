pub mod audit;
pub mod ledger_service;

pub use audit::{AuditLogEntry, AuditTrailService};
pub use ledger_service::LedgerService;
