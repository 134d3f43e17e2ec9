use super::{parse_address_arg, LoadedRound};
use crate::error::CliResult;
use std::path::PathBuf;

/// Retire a round. Any remaining balance is swept to the administrator.
pub fn execute(db_path: PathBuf, round_id: String, caller: String) -> CliResult<()> {
    let caller = parse_address_arg("caller", &caller)?;
    let mut round = LoadedRound::open(&db_path, &round_id)?;

    let swept = round.verifier.retire_round(&caller)?;
    round.save()?;

    println!("🏁 Round '{}' retired", round_id);
    println!("   Swept {} to {}", swept, caller);
    Ok(())
}
