use alloy_primitives::{Address, U256};
use tracing::{error, info, warn};

use crate::access::AccessControl;
use crate::error::{ErrorCode, ProtocolResult};
use crate::events::AirdropEvent;
use crate::ledger::TokenLedger;
use crate::state::{RoundState, RoundStatus};
use crate::store::StoreError;
use crate::verifier::ClaimVerifier;

/// Final sweep: `RootActive -> Retired`.
///
/// Whatever balance is left goes to the calling administrator. An empty
/// balance is fine here, unlike [`super::handle_withdraw`]. The retired
/// status is persisted before the sweep and rolled back if the sweep fails.
pub fn handle_retire_round<A, L, F>(
    verifier: &mut ClaimVerifier<A, L>,
    caller: &Address,
    mut persist: F,
) -> ProtocolResult<U256>
where
    A: AccessControl,
    L: TokenLedger,
    F: FnMut(&RoundState) -> Result<(), StoreError>,
{
    verifier.require_administrator(caller)?;

    match verifier.state.status {
        RoundStatus::RootActive => {}
        RoundStatus::NoRootPublished => return Err(ErrorCode::NoRootPublished),
        RoundStatus::Retired => return Err(ErrorCode::RoundRetired),
    }

    verifier.state.status = RoundStatus::Retired;
    if let Err(e) = persist(&verifier.state) {
        verifier.state.status = RoundStatus::RootActive;
        warn!("Retired status could not be persisted: {}", e);
        return Err(ErrorCode::StateWriteFailed(e.to_string()));
    }

    let swept = verifier.held_balance();
    if !swept.is_zero() {
        let from = verifier.address;
        if let Err(e) = verifier.ledger.transfer(&from, caller, swept) {
            verifier.state.status = RoundStatus::RootActive;
            warn!(%swept, "Sweep failed, retirement rolled back: {}", e);

            if let Err(store_err) = persist(&verifier.state) {
                error!("Rolled back retirement could not be persisted: {}", store_err);
            }
            return Err(ErrorCode::TransferFailed(e));
        }
    }

    info!(swept_to = %caller, %swept, "Round retired");

    verifier.events.push(AirdropEvent::RoundRetired {
        swept_to: *caller,
        swept,
    });
    Ok(swept)
}
