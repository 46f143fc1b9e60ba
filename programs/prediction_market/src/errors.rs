use solana_program::program_error::ProgramError;
use thiserror::Error;

/// Custom error codes start here, following the Anchor `#[error_code]` numbering.
pub const ERROR_CODE_OFFSET: u32 = 6000;

/// Every way an instruction can be rejected. All kinds are terminal for the
/// instruction that produced them.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketError {
    #[error("Instruction data is empty")]
    InvalidInstruction,

    #[error("Unknown instruction discriminant")]
    UnknownInstruction,

    #[error("Instruction data is truncated or malformed")]
    InvalidInstructionData,

    #[error("Required accounts are missing")]
    InvalidAccounts,

    #[error("Account data could not be decoded")]
    InvalidAccountData,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Account must be writable")]
    AccountNotWritable,

    #[error("Signer is not authorized to perform this action")]
    Unauthorized,

    #[error("Market is not open for new positions")]
    MarketClosed,

    #[error("Market not found")]
    MarketNotFound,

    #[error("Market status does not allow this transition")]
    InvalidMarketStatus,

    #[error("Invalid market input")]
    InvalidMarketInput,

    #[error("Unable to find a valid program address")]
    AddressSpaceExhausted,

    #[error("Seeds exceed the maximum length")]
    MaxSeedLengthExceeded,

    #[error("Market account is already initialized")]
    MarketAlreadyExists,
}

pub type MarketResult<T> = Result<T, MarketError>;

impl MarketError {
    const ALL: [MarketError; 15] = [
        MarketError::InvalidInstruction,
        MarketError::UnknownInstruction,
        MarketError::InvalidInstructionData,
        MarketError::InvalidAccounts,
        MarketError::InvalidAccountData,
        MarketError::AccountNotFound,
        MarketError::AccountNotWritable,
        MarketError::Unauthorized,
        MarketError::MarketClosed,
        MarketError::MarketNotFound,
        MarketError::InvalidMarketStatus,
        MarketError::InvalidMarketInput,
        MarketError::AddressSpaceExhausted,
        MarketError::MaxSeedLengthExceeded,
        MarketError::MarketAlreadyExists,
    ];

    /// Stable numeric code reported to the host runtime.
    pub fn code(self) -> u32 {
        ERROR_CODE_OFFSET + self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        let index = code.checked_sub(ERROR_CODE_OFFSET)?;
        Self::ALL.get(index as usize).copied()
    }

    /// Variant name, used in receipts and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketError::InvalidInstruction => "InvalidInstruction",
            MarketError::UnknownInstruction => "UnknownInstruction",
            MarketError::InvalidInstructionData => "InvalidInstructionData",
            MarketError::InvalidAccounts => "InvalidAccounts",
            MarketError::InvalidAccountData => "InvalidAccountData",
            MarketError::AccountNotFound => "AccountNotFound",
            MarketError::AccountNotWritable => "AccountNotWritable",
            MarketError::Unauthorized => "Unauthorized",
            MarketError::MarketClosed => "MarketClosed",
            MarketError::MarketNotFound => "MarketNotFound",
            MarketError::InvalidMarketStatus => "InvalidMarketStatus",
            MarketError::InvalidMarketInput => "InvalidMarketInput",
            MarketError::AddressSpaceExhausted => "AddressSpaceExhausted",
            MarketError::MaxSeedLengthExceeded => "MaxSeedLengthExceeded",
            MarketError::MarketAlreadyExists => "MarketAlreadyExists",
        }
    }
}

impl From<MarketError> for ProgramError {
    fn from(err: MarketError) -> Self {
        ProgramError::Custom(err.code())
    }
}
