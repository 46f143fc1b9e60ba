//! Entry point: decode, derive, authorize, load, apply, encode, stage.
//!
//! Handlers only ever see the store through a shared reference. Writes are
//! collected and staged in one place after every check has passed, so a
//! rejected instruction leaves nothing staged.

use crate::auth::{self, AccountRef};
use crate::errors::{MarketError, MarketResult};
use crate::instruction::{
    CloseMarketArgs, CreateMarketArgs, CreatePositionArgs, MarketInstruction, ResolveMarketArgs,
};
use crate::instructions::{self, close_market, create_market, create_position, resolve_market};
use crate::pda;
use crate::state::{AccountRecord, MarketRecord};
use crate::store::AccountStore;
use solana_program::pubkey::Pubkey;
use tracing::{debug, warn};

/// What a successful instruction did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executed {
    pub instruction: &'static str,
    pub market_id: String,
    /// Every address written, in staging order.
    pub writes: Vec<Pubkey>,
}

struct Outcome {
    market_id: String,
    writes: Vec<(Pubkey, Vec<u8>)>,
}

pub fn process_instruction<S: AccountStore>(
    program_id: &Pubkey,
    accounts: &[AccountRef],
    instruction_data: &[u8],
    now_unix: i64,
    store: &mut S,
) -> MarketResult<Executed> {
    let dispatched = dispatch(program_id, accounts, instruction_data, now_unix, &*store);
    let (name, outcome) = match dispatched {
        Ok(result) => result,
        Err(err) => {
            warn!(error = %err, code = err.code(), kind = err.as_str(), "Instruction rejected");
            return Err(err);
        }
    };

    let mut writes = Vec::with_capacity(outcome.writes.len());
    for (address, data) in outcome.writes {
        debug!(%address, bytes = data.len(), "Staging write");
        writes.push(address);
        store.stage_write(address, data);
    }

    Ok(Executed {
        instruction: name,
        market_id: outcome.market_id,
        writes,
    })
}

fn dispatch<S: AccountStore>(
    program_id: &Pubkey,
    accounts: &[AccountRef],
    instruction_data: &[u8],
    now_unix: i64,
    store: &S,
) -> MarketResult<(&'static str, Outcome)> {
    let instruction = MarketInstruction::unpack(instruction_data)?;
    debug!(
        instruction = instruction.name(),
        market_id = instruction.market_id().unwrap_or("<generated>"),
        accounts = accounts.len(),
        "Processing instruction"
    );

    let outcome = match &instruction {
        MarketInstruction::CreateMarket(args) => {
            process_create_market(program_id, accounts, args, now_unix, store)?
        }
        MarketInstruction::ResolveMarket(args) => {
            process_resolve_market(program_id, accounts, args, store)?
        }
        MarketInstruction::CreatePosition(args) => {
            process_create_position(program_id, accounts, args, store)?
        }
        MarketInstruction::CloseMarket(args) => {
            process_close_market(program_id, accounts, args, store)?
        }
    };

    Ok((instruction.name(), outcome))
}

fn process_create_market<S: AccountStore>(
    program_id: &Pubkey,
    accounts: &[AccountRef],
    args: &CreateMarketArgs,
    now_unix: i64,
    store: &S,
) -> MarketResult<Outcome> {
    auth::require_account_count(accounts, 2)?;
    let creator = auth::acting_principal(accounts)?;
    auth::require_signer(accounts, &creator)?;

    let market_id = instructions::generate_market_id(&creator, &args.title, args.end_date_unix);
    let market_pda = pda::market_address(program_id, &market_id)?;
    debug!(
        %market_id,
        address = %market_pda.address,
        bump = market_pda.bump,
        "Derived market PDA"
    );
    auth::require_writable(accounts, &market_pda.address)?;

    require!(!store.exists(&market_pda.address), MarketError::MarketAlreadyExists);

    let market = create_market::handler(market_id.clone(), args, &creator, now_unix)?;
    debug!(
        %market_id,
        description_len = args.description.len(),
        category = %args.category,
        status = market.status.as_str(),
        resolution = market.resolution.as_str(),
        "Market created"
    );

    Ok(Outcome {
        market_id,
        writes: vec![(market_pda.address, market.encode()?)],
    })
}

fn process_resolve_market<S: AccountStore>(
    program_id: &Pubkey,
    accounts: &[AccountRef],
    args: &ResolveMarketArgs,
    store: &S,
) -> MarketResult<Outcome> {
    auth::require_account_count(accounts, 2)?;
    let resolver = auth::acting_principal(accounts)?;
    auth::require_signer(accounts, &resolver)?;

    let market_pda = pda::market_address(program_id, &args.market_id)?;
    auth::require_writable(accounts, &market_pda.address)?;

    let market = load_market(store, &market_pda.address, &args.market_id)?;
    let resolved = resolve_market::handler(&market, args.resolution, &resolver)?;
    debug!(
        market_id = %args.market_id,
        from = market.status.as_str(),
        resolution = resolved.resolution.as_str(),
        "Market resolved"
    );

    Ok(Outcome {
        market_id: args.market_id.clone(),
        writes: vec![(market_pda.address, resolved.encode()?)],
    })
}

fn process_close_market<S: AccountStore>(
    program_id: &Pubkey,
    accounts: &[AccountRef],
    args: &CloseMarketArgs,
    store: &S,
) -> MarketResult<Outcome> {
    auth::require_account_count(accounts, 2)?;
    let closer = auth::acting_principal(accounts)?;
    auth::require_signer(accounts, &closer)?;

    let market_pda = pda::market_address(program_id, &args.market_id)?;
    auth::require_writable(accounts, &market_pda.address)?;

    let market = load_market(store, &market_pda.address, &args.market_id)?;
    let closed = close_market::handler(&market, &closer)?;
    debug!(
        market_id = %args.market_id,
        from = market.status.as_str(),
        to = closed.status.as_str(),
        "Market closed"
    );

    Ok(Outcome {
        market_id: args.market_id.clone(),
        writes: vec![(market_pda.address, closed.encode()?)],
    })
}

fn process_create_position<S: AccountStore>(
    program_id: &Pubkey,
    accounts: &[AccountRef],
    args: &CreatePositionArgs,
    store: &S,
) -> MarketResult<Outcome> {
    auth::require_account_count(accounts, 3)?;
    let user = auth::acting_principal(accounts)?;
    auth::require_signer(accounts, &user)?;

    let market_pda = pda::market_address(program_id, &args.market_id)?;
    auth::require_present(accounts, &market_pda.address)?;

    let position_pda = pda::position_address(program_id, &args.market_id, &user)?;
    auth::require_writable(accounts, &position_pda.address)?;

    let market = load_market(store, &market_pda.address, &args.market_id)?;
    let position = create_position::handler(&market, &user, args)?;
    debug!(
        market_id = %args.market_id,
        side = position.side.as_str(),
        amount = position.amount,
        price = position.price,
        "Position built"
    );

    // One position per user per market; a repeat create replaces the old one
    if store.exists(&position_pda.address) {
        warn!(
            market_id = %args.market_id,
            %user,
            address = %position_pda.address,
            "Overwriting existing position"
        );
    }

    Ok(Outcome {
        market_id: args.market_id.clone(),
        writes: vec![(position_pda.address, position.encode()?)],
    })
}

fn load_market<S: AccountStore>(
    store: &S,
    address: &Pubkey,
    market_id: &str,
) -> MarketResult<MarketRecord> {
    let data = store.load(address).map_err(|err| match err {
        MarketError::AccountNotFound => MarketError::MarketNotFound,
        other => other,
    })?;

    let market = MarketRecord::decode(&data)?;
    require!(market.market_id == market_id, MarketError::InvalidAccountData);
    Ok(market)
}
