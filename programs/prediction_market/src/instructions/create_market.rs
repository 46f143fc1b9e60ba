use crate::errors::{MarketError, MarketResult};
use crate::instruction::CreateMarketArgs;
use crate::state::MarketRecord;
use sha3::{Digest, Keccak256};
use solana_program::pubkey::Pubkey;

pub const MARKET_ID_PREFIX: &str = "market_";

/// Market ids are not sent on the wire. They are derived from the creator,
/// title and end date so that re-executing an instruction yields the same id.
/// The result is 23 bytes, short enough to be a single PDA seed.
pub fn generate_market_id(creator: &Pubkey, title: &str, end_date_unix: i64) -> String {
    let mut hasher = Keccak256::new();
    hasher.update(creator.as_ref());
    hasher.update((title.len() as u32).to_le_bytes());
    hasher.update(title.as_bytes());
    hasher.update(end_date_unix.to_le_bytes());
    let digest = hasher.finalize();

    format!("{}{}", MARKET_ID_PREFIX, hex::encode(&digest[..8]))
}

pub fn handler(
    market_id: String,
    args: &CreateMarketArgs,
    creator: &Pubkey,
    now_unix: i64,
) -> MarketResult<MarketRecord> {
    require!(!args.title.is_empty(), MarketError::InvalidMarketInput);
    require!(args.end_date_unix > now_unix, MarketError::InvalidMarketInput);
    require!(*creator != Pubkey::default(), MarketError::InvalidMarketInput);

    Ok(MarketRecord::new(
        market_id,
        args.title.clone(),
        args.end_date_unix,
        *creator,
    ))
}
