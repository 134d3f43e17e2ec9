use alloy_primitives::{Address, U256};
use tracing::{debug, error, info, warn};

use crate::access::AccessControl;
use crate::claim_leaf::ClaimLeaf;
use crate::constants::NULL_ADDRESS;
use crate::error::{ErrorCode, ProtocolResult};
use crate::events::AirdropEvent;
use crate::hashing::format_hash;
use crate::ledger::TokenLedger;
use crate::proofs::ClaimProof;
use crate::state::{RoundState, RoundStatus};
use crate::store::StoreError;
use crate::verifier::{ClaimVerifier, PreparedClaim, VerifiedClaim};

/// Claim `amount` for `caller` in one serialized step.
pub fn handle_claim<A: AccessControl, L: TokenLedger>(
    verifier: &mut ClaimVerifier<A, L>,
    caller: &Address,
    amount: U256,
    proof: &ClaimProof,
) -> ProtocolResult<()> {
    let prepared = handle_prepare_claim(verifier, caller, amount)?;
    let verified = prepared.verify(proof)?;
    handle_commit_claim(verifier, verified, |_| Ok(()))
}

pub fn handle_prepare_claim<A: AccessControl, L: TokenLedger>(
    verifier: &ClaimVerifier<A, L>,
    caller: &Address,
    amount: U256,
) -> ProtocolResult<PreparedClaim> {
    // 1. The null identity can never claim
    if *caller == NULL_ADDRESS {
        return Err(ErrorCode::Unauthorized(*caller));
    }

    // 2. Ceiling applies regardless of what the leaf says
    require_within_ceiling(&verifier.state, amount)?;

    // 3. There must be a live root
    let root = active_root(&verifier.state)?;

    // 4. One claim per key
    let key = verifier.state.claims.key_for(&root, caller);
    if verifier.state.claims.contains(&key) {
        return Err(ErrorCode::AlreadyClaimed(*caller));
    }

    debug!(claimant = %caller, %amount, root = %format_hash(&root), "Claim prepared");

    Ok(PreparedClaim {
        leaf: ClaimLeaf::new(*caller, amount),
        root,
    })
}

/// Record the claim, persist it, then pay out.
///
/// The claim record is written before the transfer is dispatched. If the
/// transfer fails the record is removed again and the call fails with
/// [`ErrorCode::TransferFailed`], leaving no trace of the attempt.
pub fn handle_commit_claim<A, L, F>(
    verifier: &mut ClaimVerifier<A, L>,
    verified: VerifiedClaim,
    mut persist: F,
) -> ProtocolResult<()>
where
    A: AccessControl,
    L: TokenLedger,
    F: FnMut(&RoundState) -> Result<(), StoreError>,
{
    let VerifiedClaim { leaf, root } = verified;

    // 1. State may have moved since the claim was prepared
    require_within_ceiling(&verifier.state, leaf.amount)?;
    let active = active_root(&verifier.state)?;
    if active != root {
        // Verified against a root that has since been replaced
        return Err(ErrorCode::InvalidProof);
    }

    // 2. Stage the claim record
    let key = verifier.state.claims.key_for(&root, &leaf.claimant);
    if !verifier.state.claims.insert(key) {
        return Err(ErrorCode::AlreadyClaimed(leaf.claimant));
    }

    // 3. Make the record durable before any value leaves the pool
    if let Err(e) = persist(&verifier.state) {
        verifier.state.claims.remove(&key);
        warn!(claimant = %leaf.claimant, "Claim record could not be persisted: {}", e);
        return Err(ErrorCode::StateWriteFailed(e.to_string()));
    }

    // 4. Pay out
    let from = verifier.address;
    if let Err(e) = verifier.ledger.transfer(&from, &leaf.claimant, leaf.amount) {
        verifier.state.claims.remove(&key);
        warn!(claimant = %leaf.claimant, amount = %leaf.amount, "Transfer failed, claim rolled back: {}", e);

        if let Err(store_err) = persist(&verifier.state) {
            error!(
                claimant = %leaf.claimant,
                "Rolled back claim could not be persisted: {}", store_err
            );
        }
        return Err(ErrorCode::TransferFailed(e));
    }

    info!(claimant = %leaf.claimant, amount = %leaf.amount, "Claim paid");

    verifier.events.push(AirdropEvent::Claimed {
        claimant: leaf.claimant,
        amount: leaf.amount,
        root,
    });
    Ok(())
}

fn require_within_ceiling(state: &RoundState, amount: U256) -> ProtocolResult<()> {
    if amount > state.max_claim_amount {
        return Err(ErrorCode::AmountTooHigh {
            amount,
            max_claim_amount: state.max_claim_amount,
        });
    }
    Ok(())
}

fn active_root(state: &RoundState) -> ProtocolResult<[u8; 32]> {
    match (state.status, state.merkle_root) {
        (RoundStatus::Retired, _) => Err(ErrorCode::RoundRetired),
        (RoundStatus::RootActive, Some(root)) => Ok(root),
        _ => Err(ErrorCode::NoRootPublished),
    }
}
