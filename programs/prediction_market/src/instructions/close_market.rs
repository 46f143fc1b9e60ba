use super::transition;
use crate::errors::{MarketError, MarketResult};
use crate::state::{MarketRecord, MarketStatus};
use solana_program::pubkey::Pubkey;

/// Open -> Closed, creator only.
pub fn handler(market: &MarketRecord, requester: &Pubkey) -> MarketResult<MarketRecord> {
    // Checked before status
    require!(market.creator == *requester, MarketError::Unauthorized);

    transition(market, MarketStatus::Closed)
}
