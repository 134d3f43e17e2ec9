use alloy_primitives::{Address, U256};

use crate::access::AccessControl;
use crate::claim_leaf::ClaimLeaf;
use crate::error::{ErrorCode, ProtocolResult};
use crate::events::AirdropEvent;
use crate::hashing::Hash;
use crate::instructions;
use crate::ledger::TokenLedger;
use crate::proofs::ClaimProof;
use crate::state::{ClaimKeyScheme, RoundState, RoundStatus};
use crate::store::StoreError;

/// Gatekeeps token release for one distribution round.
///
/// Holds the published root, the per-claim ceiling and the claim records, and
/// pays claims out of `address`'s balance on the injected ledger. Only
/// identities accepted by the injected [`AccessControl`] may publish roots,
/// change the ceiling, withdraw or retire the round.
pub struct ClaimVerifier<A, L> {
    pub(crate) address: Address,
    pub(crate) access: A,
    pub(crate) ledger: L,
    pub(crate) state: RoundState,
    pub(crate) events: Vec<AirdropEvent>,
}

impl<A: AccessControl, L: TokenLedger> ClaimVerifier<A, L> {
    pub fn new(
        address: Address,
        access: A,
        ledger: L,
        max_claim_amount: U256,
        scheme: ClaimKeyScheme,
    ) -> Self {
        Self::from_state(
            address,
            access,
            ledger,
            RoundState::new(max_claim_amount, scheme),
        )
    }

    /// Resume a round from previously persisted state.
    pub fn from_state(address: Address, access: A, ledger: L, state: RoundState) -> Self {
        Self {
            address,
            access,
            ledger,
            state,
            events: Vec::new(),
        }
    }

    // admin
    pub fn set_root(&mut self, caller: &Address, root: Hash) -> ProtocolResult<()> {
        instructions::handle_set_root(self, caller, root, |_| Ok(()))
    }

    /// Like [`Self::set_root`]; `persist` must accept the new state or the
    /// previous root is restored.
    pub fn set_root_with<F>(&mut self, caller: &Address, root: Hash, persist: F) -> ProtocolResult<()>
    where
        F: FnMut(&RoundState) -> Result<(), StoreError>,
    {
        instructions::handle_set_root(self, caller, root, persist)
    }

    // admin
    pub fn set_max_claim_amount(
        &mut self,
        caller: &Address,
        max_claim_amount: U256,
    ) -> ProtocolResult<()> {
        instructions::handle_set_max_claim_amount(self, caller, max_claim_amount, |_| Ok(()))
    }

    pub fn set_max_claim_amount_with<F>(
        &mut self,
        caller: &Address,
        max_claim_amount: U256,
        persist: F,
    ) -> ProtocolResult<()>
    where
        F: FnMut(&RoundState) -> Result<(), StoreError>,
    {
        instructions::handle_set_max_claim_amount(self, caller, max_claim_amount, persist)
    }

    // admin
    pub fn withdraw(&mut self, caller: &Address) -> ProtocolResult<U256> {
        instructions::handle_withdraw(self, caller, |_| Ok(()))
    }

    /// Like [`Self::withdraw`]; nothing is transferred unless `persist`
    /// succeeds first.
    pub fn withdraw_with<F>(&mut self, caller: &Address, persist: F) -> ProtocolResult<U256>
    where
        F: FnMut(&RoundState) -> Result<(), StoreError>,
    {
        instructions::handle_withdraw(self, caller, persist)
    }

    // admin
    pub fn retire_round(&mut self, caller: &Address) -> ProtocolResult<U256> {
        instructions::handle_retire_round(self, caller, |_| Ok(()))
    }

    /// Like [`Self::retire_round`]; the retired state is persisted before the
    /// sweep, and persisted again after a rollback if the sweep fails.
    pub fn retire_round_with<F>(&mut self, caller: &Address, persist: F) -> ProtocolResult<U256>
    where
        F: FnMut(&RoundState) -> Result<(), StoreError>,
    {
        instructions::handle_retire_round(self, caller, persist)
    }

    // claimant
    pub fn claim(
        &mut self,
        caller: &Address,
        amount: U256,
        proof: &ClaimProof,
    ) -> ProtocolResult<()> {
        instructions::handle_claim(self, caller, amount, proof)
    }

    /// First phase of a claim: every check that does not need the proof.
    pub fn prepare_claim(&self, caller: &Address, amount: U256) -> ProtocolResult<PreparedClaim> {
        instructions::handle_prepare_claim(self, caller, amount)
    }

    /// Last phase of a claim: re-validate against current state, record the
    /// claim, then transfer.
    pub fn commit_claim(&mut self, verified: VerifiedClaim) -> ProtocolResult<()> {
        instructions::handle_commit_claim(self, verified, |_| Ok(()))
    }

    /// Like [`Self::commit_claim`], but `persist` is called with the staged
    /// state after the claim record is written and before the transfer. If the
    /// transfer then fails, `persist` is called again with the rolled back
    /// state.
    pub fn commit_claim_with<F>(&mut self, verified: VerifiedClaim, persist: F) -> ProtocolResult<()>
    where
        F: FnMut(&RoundState) -> Result<(), StoreError>,
    {
        instructions::handle_commit_claim(self, verified, persist)
    }

    pub fn current_root(&self) -> Option<Hash> {
        self.state.merkle_root
    }

    pub fn has_claimed(&self, identity: &Address) -> bool {
        self.state.has_claimed(identity)
    }

    pub fn max_claim_amount(&self) -> U256 {
        self.state.max_claim_amount
    }

    pub fn status(&self) -> RoundStatus {
        self.state.status
    }

    /// Balance the verifier can still pay out.
    pub fn held_balance(&self) -> U256 {
        self.ledger.balance_of(&self.address)
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn access(&self) -> &A {
        &self.access
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn events(&self) -> &[AirdropEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<AirdropEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn into_parts(self) -> (A, L, RoundState) {
        (self.access, self.ledger, self.state)
    }

    pub(crate) fn require_administrator(&self, caller: &Address) -> ProtocolResult<()> {
        if self.access.is_administrator(caller) {
            Ok(())
        } else {
            Err(ErrorCode::Unauthorized(*caller))
        }
    }
}

/// A claim that passed every check except proof verification.
///
/// Holds a snapshot of the root that was active when it was prepared, so the
/// proof can be folded without holding any lock on the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedClaim {
    pub(crate) leaf: ClaimLeaf,
    pub(crate) root: Hash,
}

impl PreparedClaim {
    pub fn leaf(&self) -> &ClaimLeaf {
        &self.leaf
    }

    pub fn root(&self) -> Hash {
        self.root
    }

    pub fn verify(self, proof: &ClaimProof) -> ProtocolResult<VerifiedClaim> {
        if proof.verify(&self.root, &self.leaf) {
            Ok(VerifiedClaim {
                leaf: self.leaf,
                root: self.root,
            })
        } else {
            Err(ErrorCode::InvalidProof)
        }
    }
}

/// A claim whose proof folded to the snapshot root. Only obtainable through
/// [`PreparedClaim::verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedClaim {
    pub(crate) leaf: ClaimLeaf,
    pub(crate) root: Hash,
}

impl VerifiedClaim {
    pub fn leaf(&self) -> &ClaimLeaf {
        &self.leaf
    }

    pub fn root(&self) -> Hash {
        self.root
    }
}
