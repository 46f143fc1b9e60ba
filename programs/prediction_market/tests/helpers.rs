#![allow(dead_code)]

use prediction_market::pda;
use prediction_market::*;

pub const NOW: i64 = 1_700_000_000;
pub const ONE_YEAR: i64 = 365 * 24 * 60 * 60;

pub fn program_id() -> Pubkey {
    Pubkey::new_from_array([7u8; 32])
}

pub fn key(byte: u8) -> Pubkey {
    Pubkey::new_from_array([byte; 32])
}

/// Program plus an in-memory ledger. Every `execute` commits on success and
/// aborts on failure, the way a host would.
pub struct TestLedger {
    pub program_id: Pubkey,
    pub store: MemoryAccountStore,
    pub now: i64,
}

impl TestLedger {
    pub fn new() -> Self {
        Self {
            program_id: program_id(),
            store: MemoryAccountStore::new(),
            now: NOW,
        }
    }

    pub fn market_address(&self, market_id: &str) -> Pubkey {
        pda::market_address(&self.program_id, market_id).unwrap().address
    }

    pub fn position_address(&self, market_id: &str, user: &Pubkey) -> Pubkey {
        pda::position_address(&self.program_id, market_id, user)
            .unwrap()
            .address
    }

    /// Write a market straight into committed state, bypassing CreateMarket.
    pub fn seed_market(&mut self, market_id: &str, creator: Pubkey) -> MarketRecord {
        let record = MarketRecord::new(
            market_id.to_string(),
            "Will X happen?".to_string(),
            self.now + ONE_YEAR,
            creator,
        );
        let address = self.market_address(market_id);
        self.store.stage_write(address, record.encode().unwrap());
        self.store.commit().unwrap();
        record
    }

    pub fn execute(&mut self, accounts: &[AccountRef], data: &[u8]) -> MarketResult<Executed> {
        let result =
            process_instruction(&self.program_id, accounts, data, self.now, &mut self.store);
        match &result {
            Ok(_) => self.store.commit().unwrap(),
            Err(_) => {
                assert!(!self.store.has_staged_writes(), "failed instruction staged writes");
                self.store.abort();
            }
        }
        result
    }

    pub fn create_market(
        &mut self,
        creator: Pubkey,
        title: &str,
        end_date_unix: i64,
    ) -> MarketResult<String> {
        let market_id = generate_market_id(&creator, title, end_date_unix);
        let accounts = [
            AccountRef::new_readonly(creator, true),
            AccountRef::new(self.market_address(&market_id), false),
        ];
        let data = MarketInstruction::CreateMarket(CreateMarketArgs {
            title: title.to_string(),
            description: "desc".to_string(),
            category: "politics".to_string(),
            end_date_unix,
        })
        .pack()
        .unwrap();

        self.execute(&accounts, &data).map(|executed| executed.market_id)
    }

    pub fn close_market(&mut self, closer: Pubkey, market_id: &str) -> MarketResult<Executed> {
        let accounts = [
            AccountRef::new_readonly(closer, true),
            AccountRef::new(self.market_address(market_id), false),
        ];
        let data = MarketInstruction::CloseMarket(CloseMarketArgs {
            market_id: market_id.to_string(),
        })
        .pack()
        .unwrap();
        self.execute(&accounts, &data)
    }

    pub fn resolve_market(
        &mut self,
        resolver: Pubkey,
        market_id: &str,
        resolution: MarketResolution,
    ) -> MarketResult<Executed> {
        let accounts = [
            AccountRef::new_readonly(resolver, true),
            AccountRef::new(self.market_address(market_id), false),
        ];
        let data = MarketInstruction::ResolveMarket(ResolveMarketArgs {
            market_id: market_id.to_string(),
            resolution,
        })
        .pack()
        .unwrap();
        self.execute(&accounts, &data)
    }

    pub fn create_position(
        &mut self,
        user: Pubkey,
        market_id: &str,
        side: Side,
        amount: u64,
        price: u64,
    ) -> MarketResult<Executed> {
        let accounts = [
            AccountRef::new_readonly(user, true),
            AccountRef::new_readonly(self.market_address(market_id), false),
            AccountRef::new(self.position_address(market_id, &user), false),
        ];
        let data = MarketInstruction::CreatePosition(CreatePositionArgs {
            market_id: market_id.to_string(),
            side,
            amount,
            price,
        })
        .pack()
        .unwrap();
        self.execute(&accounts, &data)
    }

    pub fn market(&self, market_id: &str) -> MarketRecord {
        let data = self.store.load(&self.market_address(market_id)).unwrap();
        MarketRecord::decode(&data).unwrap()
    }

    pub fn position(&self, market_id: &str, user: &Pubkey) -> Option<PositionRecord> {
        self.store
            .load(&self.position_address(market_id, user))
            .ok()
            .map(|data| PositionRecord::decode(&data).unwrap())
    }
}
