//! Instruction wire format: one discriminant byte, then a borsh payload using
//! the same string and integer conventions as the account records.

use crate::errors::{MarketError, MarketResult};
use crate::state::{MarketResolution, Side};
use borsh::{BorshDeserialize, BorshSerialize};

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateMarketArgs {
    pub title: String,
    pub description: String,
    pub category: String,
    pub end_date_unix: i64,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResolveMarketArgs {
    pub market_id: String,
    pub resolution: MarketResolution,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreatePositionArgs {
    pub market_id: String,
    pub side: Side,
    pub amount: u64,
    pub price: u64,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct CloseMarketArgs {
    pub market_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketInstruction {
    /// Accounts: `[signer] creator`, `[writable] market`.
    CreateMarket(CreateMarketArgs),
    /// Accounts: `[signer] resolver`, `[writable] market`.
    ResolveMarket(ResolveMarketArgs),
    /// Accounts: `[signer] user`, `[] market`, `[writable] position`.
    CreatePosition(CreatePositionArgs),
    /// Accounts: `[signer] closer`, `[writable] market`.
    CloseMarket(CloseMarketArgs),
}

impl MarketInstruction {
    pub const CREATE_MARKET: u8 = 0;
    pub const RESOLVE_MARKET: u8 = 1;
    pub const CREATE_POSITION: u8 = 2;
    pub const CLOSE_MARKET: u8 = 3;

    pub fn unpack(input: &[u8]) -> MarketResult<Self> {
        let (&tag, payload) = input.split_first().ok_or(MarketError::InvalidInstruction)?;

        Ok(match tag {
            Self::CREATE_MARKET => Self::CreateMarket(parse_payload(payload)?),
            Self::RESOLVE_MARKET => Self::ResolveMarket(parse_payload(payload)?),
            Self::CREATE_POSITION => Self::CreatePosition(parse_payload(payload)?),
            Self::CLOSE_MARKET => Self::CloseMarket(parse_payload(payload)?),
            _ => return Err(MarketError::UnknownInstruction),
        })
    }

    pub fn pack(&self) -> MarketResult<Vec<u8>> {
        let mut buf = vec![self.discriminant()];
        let written = match self {
            Self::CreateMarket(args) => args.serialize(&mut buf),
            Self::ResolveMarket(args) => args.serialize(&mut buf),
            Self::CreatePosition(args) => args.serialize(&mut buf),
            Self::CloseMarket(args) => args.serialize(&mut buf),
        };
        written.map_err(|_| MarketError::InvalidInstructionData)?;
        Ok(buf)
    }

    pub fn discriminant(&self) -> u8 {
        match self {
            Self::CreateMarket(_) => Self::CREATE_MARKET,
            Self::ResolveMarket(_) => Self::RESOLVE_MARKET,
            Self::CreatePosition(_) => Self::CREATE_POSITION,
            Self::CloseMarket(_) => Self::CLOSE_MARKET,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateMarket(_) => "create_market",
            Self::ResolveMarket(_) => "resolve_market",
            Self::CreatePosition(_) => "create_position",
            Self::CloseMarket(_) => "close_market",
        }
    }

    /// Market id carried on the wire. CreateMarket has none; it is generated.
    pub fn market_id(&self) -> Option<&str> {
        match self {
            Self::CreateMarket(_) => None,
            Self::ResolveMarket(args) => Some(&args.market_id),
            Self::CreatePosition(args) => Some(&args.market_id),
            Self::CloseMarket(args) => Some(&args.market_id),
        }
    }
}

fn parse_payload<T: BorshDeserialize>(payload: &[u8]) -> MarketResult<T> {
    T::deserialize(&mut &payload[..]).map_err(|_| MarketError::InvalidInstructionData)
}
