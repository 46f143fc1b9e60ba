//! Prediction market execution core.
//!
//! Decodes the four market instructions, derives market and position
//! addresses, checks signer and writable flags, applies the market lifecycle
//! and stages the re-encoded records into an [`AccountStore`]. The host that
//! owns the store decides when staged writes are committed.

/// Return `Err($err)` from the enclosing function unless `$cond` holds.
///
/// Unlike Anchor's `require!`, `$err` is a plain error value returned as is, without `.into()`.
macro_rules! require {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}

pub mod auth;
pub mod errors;
pub mod instruction;
pub mod instructions;
pub mod pda;
pub mod processor;
pub mod state;
pub mod store;

pub use auth::AccountRef;
pub use errors::{MarketError, MarketResult, ERROR_CODE_OFFSET};
pub use instruction::{
    CloseMarketArgs, CreateMarketArgs, CreatePositionArgs, MarketInstruction, ResolveMarketArgs,
};
pub use instructions::generate_market_id;
pub use pda::DerivedAddress;
pub use processor::{process_instruction, Executed};
pub use solana_program::pubkey::Pubkey;
pub use state::{AccountRecord, MarketRecord, MarketResolution, MarketStatus, PositionRecord, Side};
pub use store::{AccountStore, MemoryAccountStore};
