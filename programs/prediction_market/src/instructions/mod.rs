//! Market lifecycle and position ledger rules.
//!
//! Each handler is a pure transition: it takes the current record plus the
//! decoded arguments and returns the record to write, or the reason to reject.
//! Loading, authorization of account flags and staging live in the processor.

pub mod cancel_market;
pub mod close_market;
pub mod create_market;
pub mod create_position;
pub mod resolve_market;

pub use create_market::generate_market_id;

use crate::errors::{MarketError, MarketResult};
use crate::state::{MarketRecord, MarketStatus};

fn transition(market: &MarketRecord, next: MarketStatus) -> MarketResult<MarketRecord> {
    require!(market.status.can_transition_to(next), MarketError::InvalidMarketStatus);

    let mut updated = market.clone();
    updated.status = next;
    Ok(updated)
}
