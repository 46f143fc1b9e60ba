use crate::error::{AppError, AppResult};
use crate::executor::{TransactionExecutor, TransactionReceipt};
use crate::ledger::FileLedger;
use crate::request::TransactionRequest;
use crate::services::audit::AuditTrailService;
use prediction_market::Pubkey;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, warn};

/// Turns request lines into receipts: parse, execute against the ledger, audit.
pub struct LedgerService {
    executor: TransactionExecutor<FileLedger>,
    audit: Arc<AuditTrailService>,
}

impl LedgerService {
    pub fn new(program_id: Pubkey, ledger: FileLedger, audit: Arc<AuditTrailService>) -> Self {
        Self {
            executor: TransactionExecutor::new(program_id, ledger),
            audit,
        }
    }

    pub fn ledger(&self) -> &FileLedger {
        self.executor.store()
    }

    /// Read request lines until EOF, writing one receipt line per non-blank
    /// input line. Returns the number of receipts written.
    pub async fn serve<R, W>(&mut self, mut reader: R, mut writer: W) -> AppResult<usize>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut handled = 0;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                debug!("End of input after {} requests", handled);
                return Ok(handled);
            }

            let line = trim_line_ending(&buf);
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let receipt = self.handle_bytes(line).await;
            let mut json = serde_json::to_vec(&receipt)?;
            json.push(b'\n');
            writer.write_all(&json).await?;
            writer.flush().await?;
            handled += 1;
        }
    }

    /// Handle one raw request line. Bytes that are not UTF-8 are rejected.
    pub async fn handle_bytes(&mut self, line: &[u8]) -> TransactionReceipt {
        match std::str::from_utf8(line) {
            Ok(line) => self.handle_line(line).await,
            Err(e) => {
                self.reject(AppError::Validation(format!("Request is not valid UTF-8: {}", e)))
                    .await
            }
        }
    }

    /// Handle one request line. Malformed requests still get a receipt.
    pub async fn handle_line(&mut self, line: &str) -> TransactionReceipt {
        let request = match TransactionRequest::parse(line) {
            Ok(request) => request,
            Err(err) => return self.reject(err).await,
        };

        let receipt = self.executor.execute(&request);
        self.record(&receipt, request.signer()).await;
        receipt
    }

    async fn reject(&self, err: AppError) -> TransactionReceipt {
        warn!("Rejected request: {}", err);
        let receipt = TransactionReceipt::rejected(&err, chrono::Utc::now().timestamp());
        self.record(&receipt, None).await;
        receipt
    }

    async fn record(&self, receipt: &TransactionReceipt, signer: Option<String>) {
        let digest = self.executor.store().digest();
        if let Err(e) = self.audit.log_transaction(receipt, signer, &digest).await {
            error!("Failed to write audit entry for {}: {}", receipt.id, e);
        }
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
