use alloy_primitives::{Address, U256};
use tracing::{info, warn};

use crate::access::AccessControl;
use crate::error::{ErrorCode, ProtocolResult};
use crate::events::AirdropEvent;
use crate::ledger::TokenLedger;
use crate::state::RoundState;
use crate::store::StoreError;
use crate::verifier::ClaimVerifier;

/// Send the entire held balance to the calling administrator.
///
/// Allowed in every round status. Claim records are not touched. The round
/// state is persisted before any value moves, so a store that cannot be
/// written leaves the balance where it was.
pub fn handle_withdraw<A, L, F>(
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

    let balance = verifier.held_balance();
    if balance.is_zero() {
        return Err(ErrorCode::InsufficientBalance);
    }

    if let Err(e) = persist(&verifier.state) {
        warn!(to = %caller, "Round state could not be persisted before withdrawal: {}", e);
        return Err(ErrorCode::StateWriteFailed(e.to_string()));
    }

    let from = verifier.address;
    verifier
        .ledger
        .transfer(&from, caller, balance)
        .map_err(ErrorCode::TransferFailed)?;

    info!(to = %caller, amount = %balance, "Withdrew remaining balance");

    verifier.events.push(AirdropEvent::Withdrawn {
        to: *caller,
        amount: balance,
    });
    Ok(balance)
}
