use crate::error::{AppError, AppResult};
use crate::executor::TransactionReceipt;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

/// Audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub timestamp: i64,
    pub event_type: String, // "transaction_committed" or "transaction_aborted"
    pub transaction_id: Option<Uuid>,
    pub signer: Option<String>,
    pub details: serde_json::Value,
}

/// Append-only JSON-lines record of every transaction request
pub struct AuditTrailService {
    log_file: PathBuf,
    file_handle: Arc<Mutex<std::fs::File>>,
}

impl AuditTrailService {
    /// Create a new audit trail service
    pub fn new(log_directory: PathBuf) -> AppResult<Self> {
        // Ensure directory exists
        std::fs::create_dir_all(&log_directory)
            .map_err(|e| AppError::Message(format!("Failed to create log directory: {}", e)))?;

        // Create log file with date
        let date = chrono::Utc::now().format("%Y-%m-%d");
        let log_file = log_directory.join(format!("audit_{}.log", date));

        // Open file in append mode
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .map_err(|e| AppError::Message(format!("Failed to open audit log file: {}", e)))?;

        info!("Audit trail initialized: {:?}", log_file);

        Ok(Self {
            log_file,
            file_handle: Arc::new(Mutex::new(file)),
        })
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Log an audit entry
    pub async fn log(&self, entry: AuditLogEntry) -> AppResult<()> {
        let json = serde_json::to_string(&entry)?;

        let mut file = self.file_handle.lock().await;
        writeln!(file, "{}", json)
            .map_err(|e| AppError::Message(format!("Failed to write audit log: {}", e)))?;

        file.flush()
            .map_err(|e| AppError::Message(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Log the outcome of one transaction request
    pub async fn log_transaction(
        &self,
        receipt: &TransactionReceipt,
        signer: Option<String>,
        ledger_digest: &str,
    ) -> AppResult<()> {
        let (event_type, details) = if receipt.success {
            (
                "transaction_committed",
                serde_json::json!({
                    "unix_timestamp": receipt.unix_timestamp,
                    "instructions": receipt.executed,
                    "ledger_digest": ledger_digest,
                }),
            )
        } else {
            (
                "transaction_aborted",
                serde_json::json!({
                    "unix_timestamp": receipt.unix_timestamp,
                    "error": receipt.error,
                    "error_code": receipt.error_code,
                    "failed_instruction": receipt.failed_instruction,
                    "ledger_digest": ledger_digest,
                }),
            )
        };

        let entry = AuditLogEntry {
            timestamp: chrono::Utc::now().timestamp(),
            event_type: event_type.to_string(),
            transaction_id: Some(receipt.id),
            signer,
            details,
        };

        self.log(entry).await
    }
}
