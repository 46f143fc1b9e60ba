use crate::errors::{MarketError, MarketResult};
use crate::instruction::CreatePositionArgs;
use crate::state::{MarketRecord, PositionRecord};
use solana_program::pubkey::Pubkey;

/// Build the position for `user` on an open market. A position is written
/// whole; amount and price are never adjusted afterwards.
pub fn handler(
    market: &MarketRecord,
    user: &Pubkey,
    args: &CreatePositionArgs,
) -> MarketResult<PositionRecord> {
    require!(market.is_open(), MarketError::MarketClosed);
    require!(args.amount > 0, MarketError::InvalidMarketInput);

    Ok(PositionRecord {
        market_id: market.market_id.clone(),
        side: args.side,
        amount: args.amount,
        price: args.price,
        user: *user,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{MarketStatus, Side};

    fn market(status: MarketStatus) -> MarketRecord {
        let mut market = MarketRecord::new(
            "m1".to_string(),
            "Will X happen?".to_string(),
            1_800_000_000,
            Pubkey::new_from_array([1u8; 32]),
        );
        market.status = status;
        market
    }

    fn args(amount: u64) -> CreatePositionArgs {
        CreatePositionArgs {
            market_id: "m1".to_string(),
            side: Side::Yes,
            amount,
            price: 50,
        }
    }

    #[test]
    fn test_position_on_open_market() {
        let user = Pubkey::new_from_array([5u8; 32]);
        let position = handler(&market(MarketStatus::Open), &user, &args(1000)).unwrap();

        assert_eq!(position.market_id, "m1");
        assert_eq!(position.user, user);
        assert_eq!(position.side, Side::Yes);
        assert_eq!(position.amount, 1000);
        assert_eq!(position.price, 50);
    }

    #[test]
    fn test_position_requires_open_market() {
        let user = Pubkey::new_from_array([5u8; 32]);
        for status in [MarketStatus::Closed, MarketStatus::Resolved, MarketStatus::Cancelled] {
            assert_eq!(
                handler(&market(status), &user, &args(1000)),
                Err(MarketError::MarketClosed)
            );
        }
    }

    #[test]
    fn test_zero_amount_rejected() {
        let user = Pubkey::new_from_array([5u8; 32]);
        assert_eq!(
            handler(&market(MarketStatus::Open), &user, &args(0)),
            Err(MarketError::InvalidMarketInput)
        );
    }
}
