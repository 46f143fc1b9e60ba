//! Program derived addresses.
//!
//! An address is `sha256(seeds.. || [bump] || program_id || "ProgramDerivedAddress")`
//! for the highest bump whose hash is not a valid ed25519 point. These are the
//! host chain's own derivation rules, so every address here matches
//! `Pubkey::find_program_address` byte for byte. Changing the hash or the curve
//! check would move every stored account.

use crate::errors::{MarketError, MarketResult};
use sha2::{Digest, Sha256};
use solana_program::pubkey::Pubkey;

pub const PDA_MARKER: &[u8; 21] = b"ProgramDerivedAddress";

pub const MAX_SEED_LEN: usize = 32;

/// Upper bound on seeds per derivation, counting the bump.
pub const MAX_SEEDS: usize = 16;

pub const MARKET_SEED: &[u8] = b"market";
pub const POSITION_SEED: &[u8] = b"position";

/// An address derived from seeds, with the bump that pushed it off the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DerivedAddress {
    pub address: Pubkey,
    pub bump: u8,
}

fn check_seeds(seeds: &[&[u8]]) -> MarketResult<()> {
    if seeds.len() >= MAX_SEEDS || seeds.iter().any(|seed| seed.len() > MAX_SEED_LEN) {
        return Err(MarketError::MaxSeedLengthExceeded);
    }
    Ok(())
}

fn hash_candidate(program_id: &Pubkey, seeds: &[&[u8]], bump: u8) -> Pubkey {
    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update([bump]);
    hasher.update(program_id.as_ref());
    hasher.update(PDA_MARKER);
    let digest: [u8; 32] = hasher.finalize().into();
    Pubkey::new_from_array(digest)
}

fn search_bump(
    program_id: &Pubkey,
    seeds: &[&[u8]],
    is_on_curve: impl Fn(&Pubkey) -> bool,
) -> MarketResult<DerivedAddress> {
    check_seeds(seeds)?;
    (0..=u8::MAX)
        .rev()
        .map(|bump| DerivedAddress {
            address: hash_candidate(program_id, seeds, bump),
            bump,
        })
        .find(|candidate| !is_on_curve(&candidate.address))
        .ok_or(MarketError::AddressSpaceExhausted)
}

/// Find the canonical address and bump for `seeds` under `program_id`.
pub fn derive_address(program_id: &Pubkey, seeds: &[&[u8]]) -> MarketResult<DerivedAddress> {
    search_bump(program_id, seeds, Pubkey::is_on_curve)
}

/// Derive market PDA from its id
pub fn market_address(program_id: &Pubkey, market_id: &str) -> MarketResult<DerivedAddress> {
    derive_address(program_id, &[MARKET_SEED, market_id.as_bytes()])
}

/// Derive position PDA from market id and owner
pub fn position_address(
    program_id: &Pubkey,
    market_id: &str,
    user: &Pubkey,
) -> MarketResult<DerivedAddress> {
    derive_address(program_id, &[POSITION_SEED, market_id.as_bytes(), user.as_ref()])
}
