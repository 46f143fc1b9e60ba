//! File-backed account store.
//!
//! The whole ledger is one JSON document, `{ "accounts": { "<base58>": "<hex>" } }`,
//! loaded at open and rewritten on every commit. Staged writes live in memory
//! until commit; a commit replaces the file atomically via a sibling temp file.

use crate::error::{AppError, AppResult};
use crate::keys::{parse_hex, parse_pubkey};
use prediction_market::{AccountStore, MarketError, MarketResult, Pubkey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerFile {
    accounts: BTreeMap<String, String>,
}

/// Durable account store persisted as JSON
#[derive(Debug)]
pub struct FileLedger {
    path: PathBuf,
    accounts: BTreeMap<Pubkey, Vec<u8>>,
    staged: BTreeMap<Pubkey, Vec<u8>>,
}

impl FileLedger {
    /// Open the ledger at `path`. A missing file is an empty ledger.
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();

        let accounts = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            let file: LedgerFile = serde_json::from_str(&contents)?;
            file.accounts
                .iter()
                .map(|(key, data)| {
                    let address = parse_pubkey(key).map_err(|e| {
                        AppError::Ledger(format!("Bad account key in ledger: {}", e))
                    })?;
                    let data = parse_hex(data).map_err(|e| {
                        AppError::Ledger(format!("Bad account data for {}: {}", key, e))
                    })?;
                    Ok((address, data))
                })
                .collect::<AppResult<BTreeMap<_, _>>>()?
        } else {
            BTreeMap::new()
        };

        info!("Ledger opened: {:?} ({} accounts)", path, accounts.len());

        Ok(Self {
            path,
            accounts,
            staged: BTreeMap::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of committed accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Committed bytes at `address`, ignoring staged writes.
    pub fn get(&self, address: &Pubkey) -> Option<&[u8]> {
        self.accounts.get(address).map(Vec::as_slice)
    }

    pub fn has_staged_writes(&self) -> bool {
        !self.staged.is_empty()
    }

    /// SHA-256 over every committed `(address, len, data)` in key order, hex encoded.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for (address, data) in &self.accounts {
            hasher.update(address.as_ref());
            hasher.update((data.len() as u64).to_le_bytes());
            hasher.update(data);
        }
        hex::encode(hasher.finalize())
    }

    fn persist(&self, accounts: &BTreeMap<Pubkey, Vec<u8>>) -> AppResult<()> {
        let file = LedgerFile {
            accounts: accounts
                .iter()
                .map(|(address, data)| (address.to_string(), hex::encode(data)))
                .collect(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut tmp_name = self
            .path
            .file_name()
            .ok_or_else(|| {
                AppError::Ledger(format!("Ledger path has no file name: {:?}", self.path))
            })?
            .to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        std::fs::write(&tmp_path, json)
            .map_err(|e| AppError::Ledger(format!("Failed to write {:?}: {}", tmp_path, e)))?;
        std::fs::rename(&tmp_path, &self.path)
            .map_err(|e| AppError::Ledger(format!("Failed to replace {:?}: {}", self.path, e)))?;

        Ok(())
    }
}

impl AccountStore for FileLedger {
    type CommitError = AppError;

    fn load(&self, address: &Pubkey) -> MarketResult<Vec<u8>> {
        self.staged
            .get(address)
            .or_else(|| self.accounts.get(address))
            .cloned()
            .ok_or(MarketError::AccountNotFound)
    }

    fn stage_write(&mut self, address: Pubkey, data: Vec<u8>) {
        self.staged.insert(address, data);
    }

    fn commit(&mut self) -> AppResult<()> {
        if self.staged.is_empty() {
            return Ok(());
        }

        let mut next = self.accounts.clone();
        next.extend(self.staged.iter().map(|(k, v)| (*k, v.clone())));
        self.persist(&next)?;

        debug!("Committed {} account writes to {:?}", self.staged.len(), self.path);
        self.accounts = next;
        self.staged.clear();
        Ok(())
    }

    fn abort(&mut self) {
        if !self.staged.is_empty() {
            debug!("Discarding {} staged writes", self.staged.len());
        }
        self.staged.clear();
    }
}
