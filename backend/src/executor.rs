use crate::error::{AppError, AppResult};
use crate::keys::short_key;
use crate::request::{InstructionRequest, TransactionRequest};
use prediction_market::{process_instruction, AccountStore, Executed, Pubkey};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// One successfully applied instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutedInstruction {
    pub instruction: String,
    pub market_id: String,
    pub writes: Vec<String>,
}

impl From<Executed> for ExecutedInstruction {
    fn from(executed: Executed) -> Self {
        Self {
            instruction: executed.instruction.to_string(),
            market_id: executed.market_id,
            writes: executed.writes.iter().map(Pubkey::to_string).collect(),
        }
    }
}

/// Outcome of one transaction request, printed as a JSON line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub id: Uuid,
    pub success: bool,
    pub unix_timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<u32>,
    /// Index of the instruction that failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_instruction: Option<usize>,
    /// Applied instructions; empty unless the transaction committed
    pub executed: Vec<ExecutedInstruction>,
}

impl TransactionReceipt {
    /// Receipt for a request that never reached the ledger
    pub fn rejected(err: &AppError, unix_timestamp: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            success: false,
            unix_timestamp,
            error: Some(err.to_string()),
            error_code: err.error_code(),
            failed_instruction: None,
            executed: Vec::new(),
        }
    }
}

/// Runs transaction requests against an account store, all or nothing.
pub struct TransactionExecutor<S> {
    program_id: Pubkey,
    store: S,
}

impl<S> TransactionExecutor<S>
where
    S: AccountStore,
    AppError: From<S::CommitError>,
{
    pub fn new(program_id: Pubkey, store: S) -> Self {
        Self { program_id, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Execute every instruction in order under one timestamp. Any failure
    /// discards the writes of all instructions in the request.
    pub fn execute(&mut self, request: &TransactionRequest) -> TransactionReceipt {
        let unix_timestamp = request
            .unix_timestamp
            .unwrap_or_else(|| chrono::Utc::now().timestamp());
        let id = Uuid::new_v4();

        match self.apply(request, unix_timestamp) {
            Ok(executed) => {
                info!(
                    "Transaction {} committed ({} instructions)",
                    id,
                    executed.len()
                );
                TransactionReceipt {
                    id,
                    success: true,
                    unix_timestamp,
                    error: None,
                    error_code: None,
                    failed_instruction: None,
                    executed,
                }
            }
            Err((index, err)) => {
                self.store.abort();
                warn!("Transaction {} aborted ({}): {}", id, err.kind(), err);
                TransactionReceipt {
                    id,
                    success: false,
                    unix_timestamp,
                    error: Some(err.to_string()),
                    error_code: err.error_code(),
                    failed_instruction: index,
                    executed: Vec::new(),
                }
            }
        }
    }

    fn apply(
        &mut self,
        request: &TransactionRequest,
        unix_timestamp: i64,
    ) -> Result<Vec<ExecutedInstruction>, (Option<usize>, AppError)> {
        let mut executed = Vec::with_capacity(request.instructions.len());

        for (index, instruction) in request.instructions.iter().enumerate() {
            let result = self
                .execute_instruction(instruction, unix_timestamp)
                .map_err(|err| (Some(index), err))?;
            executed.push(result.into());
        }

        self.store
            .commit()
            .map_err(|err| (None, AppError::from(err)))?;

        Ok(executed)
    }

    fn execute_instruction(
        &mut self,
        instruction: &InstructionRequest,
        unix_timestamp: i64,
    ) -> AppResult<Executed> {
        let accounts = instruction.account_refs()?;
        let data = instruction.instruction_data()?;

        if let Some(signer) = accounts.iter().find(|account| account.is_signer) {
            debug!(
                "Executing instruction for {} with {} accounts",
                short_key(&signer.address),
                accounts.len()
            );
        }

        let executed = process_instruction(
            &self.program_id,
            &accounts,
            &data,
            unix_timestamp,
            &mut self.store,
        )?;
        Ok(executed)
    }
}
