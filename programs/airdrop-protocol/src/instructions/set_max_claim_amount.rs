use alloy_primitives::{Address, U256};
use tracing::{info, warn};

use crate::access::AccessControl;
use crate::error::{ErrorCode, ProtocolResult};
use crate::events::AirdropEvent;
use crate::ledger::TokenLedger;
use crate::state::{RoundState, RoundStatus};
use crate::store::StoreError;
use crate::verifier::ClaimVerifier;

pub fn handle_set_max_claim_amount<A, L, F>(
    verifier: &mut ClaimVerifier<A, L>,
    caller: &Address,
    max_claim_amount: U256,
    mut persist: F,
) -> ProtocolResult<()>
where
    A: AccessControl,
    L: TokenLedger,
    F: FnMut(&RoundState) -> Result<(), StoreError>,
{
    verifier.require_administrator(caller)?;

    if verifier.state.status == RoundStatus::Retired {
        return Err(ErrorCode::RoundRetired);
    }

    let previous = std::mem::replace(&mut verifier.state.max_claim_amount, max_claim_amount);

    if let Err(e) = persist(&verifier.state) {
        verifier.state.max_claim_amount = previous;
        warn!(%max_claim_amount, "Ceiling could not be persisted: {}", e);
        return Err(ErrorCode::StateWriteFailed(e.to_string()));
    }

    info!(%previous, %max_claim_amount, "Per-claim ceiling updated");

    verifier.events.push(AirdropEvent::MaxClaimAmountUpdated {
        previous,
        max_claim_amount,
    });
    Ok(())
}
