use crate::errors::{MarketError, MarketResult};
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;
use tracing::debug;

/// Fixed-layout account records. Fields are little-endian with no padding,
/// strings are a u32 length followed by UTF-8 bytes, enums are one byte.
pub trait AccountRecord: BorshSerialize + BorshDeserialize + Sized {
    const KIND: &'static str;

    /// Exact size of `encode`'s output.
    fn encoded_len(&self) -> usize;

    fn encode(&self) -> MarketResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.serialize(&mut buf)
            .map_err(|_| MarketError::InvalidAccountData)?;
        Ok(buf)
    }

    /// Bytes past the last field are ignored; accounts may be over-allocated.
    fn decode(data: &[u8]) -> MarketResult<Self> {
        Self::deserialize(&mut &data[..]).map_err(|err| {
            debug!(kind = Self::KIND, len = data.len(), error = %err, "Account decode failed");
            MarketError::InvalidAccountData
        })
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[borsh(use_discriminant = true)]
pub enum MarketStatus {
    Open = 0,
    Closed = 1,
    Resolved = 2,
    Cancelled = 3,
}

impl MarketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketStatus::Open => "open",
            MarketStatus::Closed => "closed",
            MarketStatus::Resolved => "resolved",
            MarketStatus::Cancelled => "cancelled",
        }
    }

    /// The full lifecycle table. Everything not listed here is rejected.
    pub fn can_transition_to(&self, next: MarketStatus) -> bool {
        use MarketStatus::*;
        matches!(
            (self, next),
            (Open, Closed)
                | (Open, Resolved)
                | (Closed, Resolved)
                | (Open, Cancelled)
                | (Closed, Cancelled)
        )
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[borsh(use_discriminant = true)]
pub enum MarketResolution {
    Pending = 0,
    Yes = 1,
    No = 2,
    Cancelled = 3,
}

impl MarketResolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketResolution::Pending => "pending",
            MarketResolution::Yes => "yes",
            MarketResolution::No => "no",
            MarketResolution::Cancelled => "cancelled",
        }
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[borsh(use_discriminant = true)]
pub enum Side {
    No = 0,
    Yes = 1,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::No => "no",
            Side::Yes => "yes",
        }
    }
}

/// Market account, stored at `["market", market_id]`.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct MarketRecord {
    pub market_id: String, // 4 + len
    pub title: String, // 4 + len
    pub end_date_unix: i64, // 8 bytes
    pub status: MarketStatus, // 1 byte
    pub resolution: MarketResolution, // 1 byte
    pub creator: Pubkey, // 32 bytes, never changes
}

impl MarketRecord {
    pub const FIXED_LEN: usize = 4 + 4 + 8 + 1 + 1 + 32;

    pub fn new(market_id: String, title: String, end_date_unix: i64, creator: Pubkey) -> Self {
        Self {
            market_id,
            title,
            end_date_unix,
            status: MarketStatus::Open,
            resolution: MarketResolution::Pending,
            creator,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == MarketStatus::Open
    }
}

impl AccountRecord for MarketRecord {
    const KIND: &'static str = "market";

    fn encoded_len(&self) -> usize {
        Self::FIXED_LEN + self.market_id.len() + self.title.len()
    }
}

/// Position account, stored at `["position", market_id, user]`.
/// Field order is the wire order, which puts `user` last.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct PositionRecord {
    pub market_id: String, // 4 + len
    pub side: Side, // 1 byte
    pub amount: u64, // 8 bytes
    pub price: u64, // 8 bytes
    pub user: Pubkey, // 32 bytes
}

impl PositionRecord {
    pub const FIXED_LEN: usize = 4 + 1 + 8 + 8 + 32;
}

impl AccountRecord for PositionRecord {
    const KIND: &'static str = "position";

    fn encoded_len(&self) -> usize {
        Self::FIXED_LEN + self.market_id.len()
    }
}
