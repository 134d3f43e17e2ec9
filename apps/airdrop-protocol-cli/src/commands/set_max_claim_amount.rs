use super::{parse_address_arg, LoadedRound};
use crate::error::CliResult;
use airdrop_protocol::parse_amount;
use std::path::PathBuf;

pub fn execute(db_path: PathBuf, round_id: String, caller: String, amount: String) -> CliResult<()> {
    let caller = parse_address_arg("caller", &caller)?;
    let amount = parse_amount(&amount)?;
    let mut round = LoadedRound::open(&db_path, &round_id)?;

    let previous = round.verifier.max_claim_amount();
    round.verifier.set_max_claim_amount(&caller, amount)?;
    round.save()?;

    println!(
        "✅ Max claim amount for round '{}': {} -> {}",
        round_id, previous, amount
    );
    Ok(())
}
