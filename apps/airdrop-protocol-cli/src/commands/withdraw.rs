use super::{parse_address_arg, LoadedRound};
use crate::error::CliResult;
use std::path::PathBuf;

pub fn execute(db_path: PathBuf, round_id: String, caller: String) -> CliResult<()> {
    let caller = parse_address_arg("caller", &caller)?;
    let mut round = LoadedRound::open(&db_path, &round_id)?;

    let withdrawn = round.verifier.withdraw(&caller)?;
    round.save()?;

    println!("✅ Withdrew {} from round '{}' to {}", withdrawn, round_id, caller);
    Ok(())
}
