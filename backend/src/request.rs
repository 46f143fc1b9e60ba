//! Transaction requests as read from stdin, one JSON document per line.
//!
//! ```json
//! {"unix_timestamp": 1700000000,
//!  "instructions": [{"accounts": [{"pubkey": "...", "is_signer": true}],
//!                    "close_market": {"market_id": "m1"}}]}
//! ```
//!
//! Instruction data is either raw wire bytes (`"data": "<hex>"`) or one of the
//! typed forms, which are packed into the same wire layout.

use crate::error::{AppError, AppResult};
use crate::keys::{parse_hex, parse_pubkey};
use prediction_market::{
    AccountRef, CloseMarketArgs, CreateMarketArgs, CreatePositionArgs, MarketInstruction,
    MarketResolution, Pubkey, ResolveMarketArgs, Side,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Ledger time for every instruction; host clock when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unix_timestamp: Option<i64>,
    pub instructions: Vec<InstructionRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructionRequest {
    pub accounts: Vec<AccountMetaRequest>,
    #[serde(flatten)]
    pub payload: InstructionPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountMetaRequest {
    pub pubkey: String,
    #[serde(default)]
    pub is_signer: bool,
    #[serde(default)]
    pub is_writable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionPayload {
    /// Hex-encoded wire bytes, passed through unchanged
    Data(String),
    CreateMarket(CreateMarketRequest),
    ResolveMarket(ResolveMarketRequest),
    CloseMarket(CloseMarketRequest),
    CreatePosition(CreatePositionRequest),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMarketRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub end_date_unix: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveMarketRequest {
    pub market_id: String,
    pub resolution: ResolutionArg,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseMarketRequest {
    pub market_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePositionRequest {
    pub market_id: String,
    pub side: SideArg,
    pub amount: u64,
    pub price: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionArg {
    Pending,
    Yes,
    No,
    Cancelled,
}

impl From<ResolutionArg> for MarketResolution {
    fn from(arg: ResolutionArg) -> Self {
        match arg {
            ResolutionArg::Pending => MarketResolution::Pending,
            ResolutionArg::Yes => MarketResolution::Yes,
            ResolutionArg::No => MarketResolution::No,
            ResolutionArg::Cancelled => MarketResolution::Cancelled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideArg {
    Yes,
    No,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Yes => Side::Yes,
            SideArg::No => Side::No,
        }
    }
}

impl TransactionRequest {
    /// Parse one request line
    pub fn parse(line: &str) -> AppResult<Self> {
        let request: TransactionRequest = serde_json::from_str(line)?;
        if request.instructions.is_empty() {
            return Err(AppError::Validation(
                "Transaction has no instructions".to_string(),
            ));
        }
        Ok(request)
    }

    /// First signer of the first instruction, if any
    pub fn signer(&self) -> Option<String> {
        self.instructions
            .first()?
            .accounts
            .iter()
            .find(|account| account.is_signer)
            .map(|account| account.pubkey.clone())
    }
}

impl InstructionRequest {
    pub fn account_refs(&self) -> AppResult<Vec<AccountRef>> {
        self.accounts
            .iter()
            .map(|meta| {
                Ok(AccountRef {
                    address: parse_pubkey(&meta.pubkey)?,
                    is_signer: meta.is_signer,
                    is_writable: meta.is_writable,
                })
            })
            .collect()
    }

    /// Wire bytes for this instruction
    pub fn instruction_data(&self) -> AppResult<Vec<u8>> {
        let instruction = match &self.payload {
            InstructionPayload::Data(data) => return parse_hex(data),
            InstructionPayload::CreateMarket(req) => {
                MarketInstruction::CreateMarket(CreateMarketArgs {
                    title: req.title.clone(),
                    description: req.description.clone(),
                    category: req.category.clone(),
                    end_date_unix: req.end_date_unix,
                })
            }
            InstructionPayload::ResolveMarket(req) => {
                MarketInstruction::ResolveMarket(ResolveMarketArgs {
                    market_id: req.market_id.clone(),
                    resolution: req.resolution.into(),
                })
            }
            InstructionPayload::CloseMarket(req) => {
                MarketInstruction::CloseMarket(CloseMarketArgs {
                    market_id: req.market_id.clone(),
                })
            }
            InstructionPayload::CreatePosition(req) => {
                MarketInstruction::CreatePosition(CreatePositionArgs {
                    market_id: req.market_id.clone(),
                    side: req.side.into(),
                    amount: req.amount,
                    price: req.price,
                })
            }
        };

        Ok(instruction.pack()?)
    }
}

impl AccountMetaRequest {
    pub fn signer(pubkey: &Pubkey) -> Self {
        Self {
            pubkey: pubkey.to_string(),
            is_signer: true,
            is_writable: false,
        }
    }

    pub fn writable(pubkey: &Pubkey) -> Self {
        Self {
            pubkey: pubkey.to_string(),
            is_signer: false,
            is_writable: true,
        }
    }

    pub fn readonly(pubkey: &Pubkey) -> Self {
        Self {
            pubkey: pubkey.to_string(),
            is_signer: false,
            is_writable: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_typed_instruction() {
        let signer = Pubkey::new_from_array([1u8; 32]);
        let market = Pubkey::new_from_array([2u8; 32]);
        let line = format!(
            concat!(
                r#"{{"unix_timestamp":5,"instructions":[{{"accounts":["#,
                r#"{{"pubkey":"{}","is_signer":true}},{{"pubkey":"{}","is_writable":true}}],"#,
                r#""close_market":{{"market_id":"m1"}}}}]}}"#
            ),
            signer, market
        );

        let request = TransactionRequest::parse(&line).unwrap();
        assert_eq!(request.unix_timestamp, Some(5));
        assert_eq!(request.signer(), Some(signer.to_string()));

        let instruction = &request.instructions[0];
        assert_eq!(
            instruction.account_refs().unwrap(),
            vec![AccountRef::new_readonly(signer, true), AccountRef::new(market, false)]
        );
        assert_eq!(
            instruction.instruction_data().unwrap(),
            vec![3, 2, 0, 0, 0, b'm', b'1']
        );
    }

    #[test]
    fn test_raw_data_passes_through() {
        let line = r#"{"instructions":[{"accounts":[],"data":"0x0302000000"}]}"#;
        let request = TransactionRequest::parse(line).unwrap();
        assert_eq!(request.unix_timestamp, None);
        assert_eq!(request.signer(), None);
        assert_eq!(
            request.instructions[0].instruction_data().unwrap(),
            vec![3, 2, 0, 0, 0]
        );
    }

    #[test]
    fn test_typed_position_and_resolution() {
        let line = r#"{"instructions":[
            {"accounts":[],"create_position":
                {"market_id":"m1","side":"yes","amount":1000,"price":50}},
            {"accounts":[],"resolve_market":{"market_id":"m1","resolution":"no"}}]}"#;
        let request = TransactionRequest::parse(line).unwrap();

        let data = request.instructions[0].instruction_data().unwrap();
        let position = MarketInstruction::unpack(&data).unwrap();
        assert_eq!(
            position,
            MarketInstruction::CreatePosition(CreatePositionArgs {
                market_id: "m1".to_string(),
                side: Side::Yes,
                amount: 1000,
                price: 50,
            })
        );

        let data = request.instructions[1].instruction_data().unwrap();
        let resolve = MarketInstruction::unpack(&data).unwrap();
        assert_eq!(
            resolve,
            MarketInstruction::ResolveMarket(ResolveMarketArgs {
                market_id: "m1".to_string(),
                resolution: MarketResolution::No,
            })
        );
    }

    #[test]
    fn test_rejects_empty_and_malformed() {
        assert!(matches!(
            TransactionRequest::parse(r#"{"instructions":[]}"#),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            TransactionRequest::parse("{"),
            Err(AppError::Serialization(_))
        ));

        let line = r#"{"instructions":[{"accounts":[{"pubkey":"nope!"}],"data":"00"}]}"#;
        let request = TransactionRequest::parse(line).unwrap();
        assert!(matches!(
            request.instructions[0].account_refs(),
            Err(AppError::Validation(_))
        ));
    }
}
