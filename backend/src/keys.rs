//! Account key parsing and display helpers.

use crate::error::{AppError, AppResult};
use prediction_market::Pubkey;

/// Parse a base58 account key. Must decode to exactly 32 bytes.
pub fn parse_pubkey(s: &str) -> AppResult<Pubkey> {
    let bytes = bs58::decode(s.trim())
        .into_vec()
        .map_err(|e| AppError::Validation(format!("Invalid base58 key {}: {}", s, e)))?;

    let bytes: [u8; 32] = bytes.try_into().map_err(|bytes: Vec<u8>| {
        AppError::Validation(format!("Key {} is {} bytes, expected 32", s, bytes.len()))
    })?;

    Ok(Pubkey::new_from_array(bytes))
}

/// Parse hex bytes, with or without a `0x` prefix.
pub fn parse_hex(s: &str) -> AppResult<Vec<u8>> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).map_err(|e| AppError::Validation(format!("Invalid hex data: {}", e)))
}

/// `ABCD...WXYZ` form for log lines
pub fn short_key(key: &Pubkey) -> String {
    let full = key.to_string();
    if full.len() <= 8 {
        return full;
    }
    format!("{}...{}", &full[..4], &full[full.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pubkey_round_trips_display() {
        let key = Pubkey::new_from_array([9u8; 32]);
        assert_eq!(parse_pubkey(&key.to_string()).unwrap(), key);
        assert_eq!(parse_pubkey(&format!("  {}\n", key)).unwrap(), key);
    }

    #[test]
    fn test_parse_pubkey_rejects_bad_input() {
        assert!(matches!(parse_pubkey("0OIl"), Err(AppError::Validation(_))));
        assert!(matches!(parse_pubkey("abc"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("0x0aff").unwrap(), vec![0x0a, 0xff]);
        assert_eq!(parse_hex("0aff").unwrap(), vec![0x0a, 0xff]);
        assert!(parse_hex("zz").is_err());
    }

    #[test]
    fn test_short_key() {
        let key = Pubkey::new_from_array([9u8; 32]);
        let full = key.to_string();
        let short = short_key(&key);
        assert_eq!(short.len(), 11);
        assert!(full.starts_with(&short[..4]));
        assert!(full.ends_with(&short[7..]));
    }
}
