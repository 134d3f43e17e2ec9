use super::LoadedRound;
use crate::error::CliResult;
use airdrop_protocol::parse_amount;
use std::path::PathBuf;

/// Mint tokens into the round's distributor account
pub fn execute(db_path: PathBuf, round_id: String, amount: String) -> CliResult<()> {
    let amount = parse_amount(&amount)?;
    let mut round = LoadedRound::open(&db_path, &round_id)?;
    let distributor = round.info.distributor;

    println!("💰 Funding round '{}' with {}", round.round_id(), amount);
    round.verifier.ledger_mut().mint(&distributor, amount)?;
    round.save()?;

    println!("✅ Distributor {} now holds {}", distributor, round.verifier.held_balance());
    Ok(())
}
