use super::transition;
use crate::errors::{MarketError, MarketResult};
use crate::state::{MarketRecord, MarketResolution, MarketStatus};
use solana_program::pubkey::Pubkey;

/// (Open | Closed) -> Cancelled, creator only.
///
/// No wire discriminant maps here; hosts that need cancellation call it directly.
pub fn handler(market: &MarketRecord, requester: &Pubkey) -> MarketResult<MarketRecord> {
    require!(market.creator == *requester, MarketError::Unauthorized);

    let mut cancelled = transition(market, MarketStatus::Cancelled)?;
    cancelled.resolution = MarketResolution::Cancelled;
    Ok(cancelled)
}
