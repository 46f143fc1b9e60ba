use crate::errors::{MarketError, MarketResult};
use solana_program::pubkey::Pubkey;
use std::collections::BTreeMap;
use std::convert::Infallible;

/// Account storage the processor reads from and stages writes into.
///
/// Staged writes form one set that the owner of the store commits or aborts as
/// a unit. `load` must observe writes staged earlier in the same set.
pub trait AccountStore {
    type CommitError;

    /// Current bytes at `address`, or `AccountNotFound`.
    fn load(&self, address: &Pubkey) -> MarketResult<Vec<u8>>;

    fn stage_write(&mut self, address: Pubkey, data: Vec<u8>);

    fn commit(&mut self) -> Result<(), Self::CommitError>;

    fn abort(&mut self);

    fn exists(&self, address: &Pubkey) -> bool {
        self.load(address).is_ok()
    }
}

/// In-memory store: a committed map with a staged overlay.
#[derive(Debug, Default, Clone)]
pub struct MemoryAccountStore {
    committed: BTreeMap<Pubkey, Vec<u8>>,
    staged: BTreeMap<Pubkey, Vec<u8>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already committed accounts.
    pub fn with_accounts(accounts: impl IntoIterator<Item = (Pubkey, Vec<u8>)>) -> Self {
        Self {
            committed: accounts.into_iter().collect(),
            staged: BTreeMap::new(),
        }
    }

    pub fn committed(&self) -> &BTreeMap<Pubkey, Vec<u8>> {
        &self.committed
    }

    pub fn has_staged_writes(&self) -> bool {
        !self.staged.is_empty()
    }
}

impl AccountStore for MemoryAccountStore {
    type CommitError = Infallible;

    fn load(&self, address: &Pubkey) -> MarketResult<Vec<u8>> {
        self.staged
            .get(address)
            .or_else(|| self.committed.get(address))
            .cloned()
            .ok_or(MarketError::AccountNotFound)
    }

    fn stage_write(&mut self, address: Pubkey, data: Vec<u8>) {
        self.staged.insert(address, data);
    }

    fn commit(&mut self) -> Result<(), Infallible> {
        let staged = std::mem::take(&mut self.staged);
        self.committed.extend(staged);
        Ok(())
    }

    fn abort(&mut self) {
        self.staged.clear();
    }
}
