#![allow(dead_code)]

use prediction_market::pda;
use prediction_market::{generate_market_id, Pubkey};
use prediction_market_backend::request::*;
use prediction_market_backend::{AuditTrailService, FileLedger, LedgerService};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

pub const NOW: i64 = 1_700_000_000;
pub const END_DATE: i64 = NOW + 365 * 24 * 60 * 60;

pub fn program_id() -> Pubkey {
    Pubkey::new_from_array([7u8; 32])
}

pub fn key(byte: u8) -> Pubkey {
    Pubkey::new_from_array([byte; 32])
}

/// Ledger file and audit directory under the OS temp dir, removed on drop
pub struct TestPaths {
    pub ledger: PathBuf,
    pub audit_dir: PathBuf,
}

impl TestPaths {
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!("prediction_market_{}", Uuid::new_v4()));
        Self {
            ledger: root.join("ledger.json"),
            audit_dir: root.join("logs"),
        }
    }

    pub fn open_ledger(&self) -> FileLedger {
        FileLedger::open(&self.ledger).expect("Failed to open test ledger")
    }

    pub fn service(&self) -> LedgerService {
        let audit = AuditTrailService::new(self.audit_dir.clone())
            .expect("Failed to create audit trail");
        LedgerService::new(program_id(), self.open_ledger(), Arc::new(audit))
    }

    /// Every audit line written so far
    pub fn audit_entries(&self) -> Vec<serde_json::Value> {
        let mut entries = Vec::new();
        for file in std::fs::read_dir(&self.audit_dir).expect("Audit dir missing") {
            let contents = std::fs::read_to_string(file.unwrap().path()).unwrap();
            entries.extend(
                contents
                    .lines()
                    .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap()),
            );
        }
        entries
    }
}

impl Drop for TestPaths {
    fn drop(&mut self) {
        if let Some(root) = self.ledger.parent() {
            std::fs::remove_dir_all(root).ok();
        }
    }
}

pub fn market_address(market_id: &str) -> Pubkey {
    pda::market_address(&program_id(), market_id).unwrap().address
}

pub fn position_address(market_id: &str, user: &Pubkey) -> Pubkey {
    pda::position_address(&program_id(), market_id, user)
        .unwrap()
        .address
}

pub fn market_id_for(creator: &Pubkey, title: &str) -> String {
    generate_market_id(creator, title, END_DATE)
}

pub fn create_market(creator: &Pubkey, title: &str) -> InstructionRequest {
    InstructionRequest {
        accounts: vec![
            AccountMetaRequest::signer(creator),
            AccountMetaRequest::writable(&market_address(&market_id_for(creator, title))),
        ],
        payload: InstructionPayload::CreateMarket(CreateMarketRequest {
            title: title.to_string(),
            description: "desc".to_string(),
            category: "politics".to_string(),
            end_date_unix: END_DATE,
        }),
    }
}

pub fn create_position(
    user: &Pubkey,
    market_id: &str,
    side: SideArg,
    amount: u64,
) -> InstructionRequest {
    InstructionRequest {
        accounts: vec![
            AccountMetaRequest::signer(user),
            AccountMetaRequest::readonly(&market_address(market_id)),
            AccountMetaRequest::writable(&position_address(market_id, user)),
        ],
        payload: InstructionPayload::CreatePosition(CreatePositionRequest {
            market_id: market_id.to_string(),
            side,
            amount,
            price: 50,
        }),
    }
}

pub fn close_market(closer: &Pubkey, market_id: &str) -> InstructionRequest {
    InstructionRequest {
        accounts: vec![
            AccountMetaRequest::signer(closer),
            AccountMetaRequest::writable(&market_address(market_id)),
        ],
        payload: InstructionPayload::CloseMarket(CloseMarketRequest {
            market_id: market_id.to_string(),
        }),
    }
}

pub fn resolve_market(
    resolver: &Pubkey,
    market_id: &str,
    resolution: ResolutionArg,
) -> InstructionRequest {
    InstructionRequest {
        accounts: vec![
            AccountMetaRequest::signer(resolver),
            AccountMetaRequest::writable(&market_address(market_id)),
        ],
        payload: InstructionPayload::ResolveMarket(ResolveMarketRequest {
            market_id: market_id.to_string(),
            resolution,
        }),
    }
}

pub fn transaction(instructions: Vec<InstructionRequest>) -> TransactionRequest {
    TransactionRequest {
        unix_timestamp: Some(NOW),
        instructions,
    }
}

pub fn to_line(request: &TransactionRequest) -> String {
    serde_json::to_string(request).unwrap()
}
