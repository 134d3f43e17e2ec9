use alloy_primitives::Address;
use tracing::{info, warn};

use crate::access::AccessControl;
use crate::error::{ErrorCode, ProtocolResult};
use crate::events::AirdropEvent;
use crate::hashing::{format_hash, Hash};
use crate::ledger::TokenLedger;
use crate::state::{RoundState, RoundStatus};
use crate::store::StoreError;
use crate::verifier::ClaimVerifier;

/// Publish or replace the merkle root.
///
/// Existing claim records are left untouched. Under the global claim key
/// scheme this means anyone who claimed under the old root stays claimed.
/// If `persist` fails the previous root and status are restored.
pub fn handle_set_root<A, L, F>(
    verifier: &mut ClaimVerifier<A, L>,
    caller: &Address,
    root: Hash,
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

    let previous_status = verifier.state.status;
    let previous = verifier.state.merkle_root.replace(root);
    verifier.state.status = RoundStatus::RootActive;

    if let Err(e) = persist(&verifier.state) {
        verifier.state.merkle_root = previous;
        verifier.state.status = previous_status;
        warn!(root = %format_hash(&root), "Root could not be persisted: {}", e);
        return Err(ErrorCode::StateWriteFailed(e.to_string()));
    }

    info!(
        root = %format_hash(&root),
        replaced = previous.is_some(),
        "Merkle root published"
    );

    verifier
        .events
        .push(AirdropEvent::RootUpdated { previous, root });
    Ok(())
}
