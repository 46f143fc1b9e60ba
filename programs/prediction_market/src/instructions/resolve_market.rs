use super::transition;
use crate::errors::{MarketError, MarketResult};
use crate::state::{MarketRecord, MarketResolution, MarketStatus};
use solana_program::pubkey::Pubkey;

/// (Open | Closed) -> Resolved with an outcome, creator only.
pub fn handler(
    market: &MarketRecord,
    resolution: MarketResolution,
    requester: &Pubkey,
) -> MarketResult<MarketRecord> {
    require!(market.creator == *requester, MarketError::Unauthorized);

    let mut resolved = transition(market, MarketStatus::Resolved)?;

    // A resolved market must carry an outcome
    require!(resolution != MarketResolution::Pending, MarketError::InvalidMarketInput);
    resolved.resolution = resolution;

    Ok(resolved)
}
