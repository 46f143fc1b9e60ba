use crate::errors::{MarketError, MarketResult};
use solana_program::pubkey::Pubkey;

/// An account supplied alongside an instruction, with the flags the caller set on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountRef {
    pub address: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountRef {
    /// Writable account.
    pub fn new(address: Pubkey, is_signer: bool) -> Self {
        Self {
            address,
            is_signer,
            is_writable: true,
        }
    }

    pub fn new_readonly(address: Pubkey, is_signer: bool) -> Self {
        Self {
            address,
            is_signer,
            is_writable: false,
        }
    }
}

/// Ok when `principal` is present and flagged as a signer.
pub fn require_signer(accounts: &[AccountRef], principal: &Pubkey) -> MarketResult<()> {
    if accounts
        .iter()
        .any(|account| account.address == *principal && account.is_signer)
    {
        Ok(())
    } else {
        Err(MarketError::Unauthorized)
    }
}

/// Ok when `target` is present and flagged writable. An absent target fails too.
pub fn require_writable(accounts: &[AccountRef], target: &Pubkey) -> MarketResult<()> {
    if accounts
        .iter()
        .any(|account| account.address == *target && account.is_writable)
    {
        Ok(())
    } else {
        Err(MarketError::AccountNotWritable)
    }
}

pub fn require_present(accounts: &[AccountRef], target: &Pubkey) -> MarketResult<()> {
    if accounts.iter().any(|account| account.address == *target) {
        Ok(())
    } else {
        Err(MarketError::InvalidAccounts)
    }
}

pub fn require_account_count(accounts: &[AccountRef], min: usize) -> MarketResult<()> {
    if accounts.len() < min {
        return Err(MarketError::InvalidAccounts);
    }
    Ok(())
}

/// The first signer-flagged account acts for the instruction.
pub fn acting_principal(accounts: &[AccountRef]) -> MarketResult<Pubkey> {
    accounts
        .iter()
        .find(|account| account.is_signer)
        .map(|account| account.address)
        .ok_or(MarketError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    #[test]
    fn test_require_signer() {
        let accounts = [
            AccountRef::new_readonly(key(1), false),
            AccountRef::new(key(2), true),
        ];

        assert_eq!(require_signer(&accounts, &key(2)), Ok(()));
        assert_eq!(require_signer(&accounts, &key(1)), Err(MarketError::Unauthorized));
        assert_eq!(require_signer(&accounts, &key(3)), Err(MarketError::Unauthorized));
        assert_eq!(require_signer(&[], &key(2)), Err(MarketError::Unauthorized));
    }

    #[test]
    fn test_require_writable() {
        let accounts = [
            AccountRef::new_readonly(key(1), true),
            AccountRef::new(key(2), false),
        ];

        assert_eq!(require_writable(&accounts, &key(2)), Ok(()));
        assert_eq!(require_writable(&accounts, &key(1)), Err(MarketError::AccountNotWritable));
        assert_eq!(require_writable(&accounts, &key(9)), Err(MarketError::AccountNotWritable));
    }

    #[test]
    fn test_duplicate_entries_any_match() {
        let accounts = [
            AccountRef::new_readonly(key(1), false),
            AccountRef::new(key(1), true),
        ];
        assert_eq!(require_writable(&accounts, &key(1)), Ok(()));
        assert_eq!(require_signer(&accounts, &key(1)), Ok(()));
    }

    #[test]
    fn test_acting_principal_is_first_signer() {
        let accounts = [
            AccountRef::new(key(1), false),
            AccountRef::new_readonly(key(2), true),
            AccountRef::new(key(3), true),
        ];
        assert_eq!(acting_principal(&accounts), Ok(key(2)));

        let unsigned = [AccountRef::new(key(1), false)];
        assert_eq!(acting_principal(&unsigned), Err(MarketError::Unauthorized));
    }

    #[test]
    fn test_presence_and_count() {
        let accounts = [AccountRef::new_readonly(key(1), false)];
        assert_eq!(require_present(&accounts, &key(1)), Ok(()));
        assert_eq!(require_present(&accounts, &key(2)), Err(MarketError::InvalidAccounts));
        assert_eq!(require_account_count(&accounts, 1), Ok(()));
        assert_eq!(require_account_count(&accounts, 2), Err(MarketError::InvalidAccounts));
    }
}
