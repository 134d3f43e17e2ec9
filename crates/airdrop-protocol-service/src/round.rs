use airdrop_protocol::{
    AccessControl, Address, AirdropEvent, ClaimProof, ClaimVerifier, Hash, PreparedClaim,
    ProtocolResult, RoundState, RoundStatus, RoundStore, StoreError, TokenLedger, VerifiedClaim,
    U256,
};
use futures::future::join_all;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::{ServiceConfig, ServiceError, ServiceResult};

/// One claim submitted as part of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRequest {
    pub claimant: Address,
    pub amount: U256,
    pub proof: ClaimProof,
}

struct RoundInner<A, L, S> {
    verifier: ClaimVerifier<A, L>,
    store: S,
}

/// A claim verifier shared between concurrent callers.
///
/// The mutex guards the verifier (root, ceiling, claim records, ledger handle)
/// together with the round store, so a claim record is persisted before the
/// lock is released.
pub struct DistributionRound<A, L, S> {
    round_id: String,
    config: ServiceConfig,
    inner: Mutex<RoundInner<A, L, S>>,
}

impl<A, L, S> DistributionRound<A, L, S>
where
    A: AccessControl,
    L: TokenLedger,
    S: RoundStore,
{
    pub fn new(
        round_id: impl Into<String>,
        verifier: ClaimVerifier<A, L>,
        store: S,
        config: ServiceConfig,
    ) -> Self {
        Self {
            round_id: round_id.into(),
            config,
            inner: Mutex::new(RoundInner { verifier, store }),
        }
    }

    /// Resume a round from its persisted state.
    pub fn resume(
        round_id: impl Into<String>,
        distributor: Address,
        access: A,
        ledger: L,
        store: S,
        config: ServiceConfig,
    ) -> ServiceResult<Self> {
        let round_id = round_id.into();
        let state = store
            .load_round(&round_id)?
            .ok_or_else(|| ServiceError::RoundNotFound(round_id.clone()))?;

        debug!(
            round_id = %round_id,
            status = %state.status,
            claims = state.claims.len(),
            "Resuming round"
        );

        let verifier = ClaimVerifier::from_state(distributor, access, ledger, state);
        Ok(Self::new(round_id, verifier, store, config))
    }

    pub fn round_id(&self) -> &str {
        &self.round_id
    }

    // ============================================================================================
    // Claims
    // ============================================================================================

    /// Claim `amount` for `claimant`: prepare, verify without the lock, commit.
    pub async fn claim(
        &self,
        claimant: &Address,
        amount: U256,
        proof: &ClaimProof,
    ) -> ServiceResult<()> {
        let prepared = self.prepare_claim(claimant, amount).await?;
        let verified = prepared.verify(proof)?;
        self.commit_claim(verified).await
    }

    /// First phase: checks that need the round state, plus a root snapshot.
    pub async fn prepare_claim(
        &self,
        claimant: &Address,
        amount: U256,
    ) -> ServiceResult<PreparedClaim> {
        let inner = self.inner.lock().await;
        Ok(inner.verifier.prepare_claim(claimant, amount)?)
    }

    /// Last phase: re-validate, record, persist, transfer.
    pub async fn commit_claim(&self, verified: VerifiedClaim) -> ServiceResult<()> {
        let claimant = verified.leaf().claimant;
        let amount = verified.leaf().amount;

        let mut guard = self.inner.lock().await;
        let RoundInner { verifier, store } = &mut *guard;
        let round_id = self.round_id.as_str();
        let key = verifier.state().claims.key_for(&verified.root(), &claimant);

        verifier.commit_claim_with(verified, |state| {
            store.save_claim(round_id, state, &key)
        })?;

        debug!(round_id, claimant = %claimant, amount = %amount, "Claim persisted");
        Ok(())
    }

    /// Submit many claims, at most `max_parallel_claims` in flight at once.
    /// Results are returned in request order.
    pub async fn claim_batch(&self, requests: &[ClaimRequest]) -> Vec<ServiceResult<()>> {
        let chunk_size = self.config.max_parallel_claims.max(1);
        let mut results = Vec::with_capacity(requests.len());

        for (batch_idx, batch) in requests.chunks(chunk_size).enumerate() {
            debug!(
                round_id = %self.round_id,
                "Submitting claim batch {} ({} claims)",
                batch_idx + 1,
                batch.len()
            );

            let batch_futures: Vec<_> = batch
                .iter()
                .map(|request| self.claim(&request.claimant, request.amount, &request.proof))
                .collect();

            results.extend(join_all(batch_futures).await);
        }

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            warn!(
                round_id = %self.round_id,
                "{} of {} claims failed",
                failed,
                results.len()
            );
        }

        results
    }

    // ============================================================================================
    // Administration
    // ============================================================================================

    pub async fn set_root(&self, caller: &Address, root: Hash) -> ServiceResult<()> {
        self.administer(|verifier, persist| verifier.set_root_with(caller, root, persist))
            .await
    }

    pub async fn set_max_claim_amount(
        &self,
        caller: &Address,
        max_claim_amount: U256,
    ) -> ServiceResult<()> {
        self.administer(|verifier, persist| {
            verifier.set_max_claim_amount_with(caller, max_claim_amount, persist)
        })
        .await
    }

    pub async fn withdraw(&self, caller: &Address) -> ServiceResult<U256> {
        self.administer(|verifier, persist| verifier.withdraw_with(caller, persist))
            .await
    }

    pub async fn retire_round(&self, caller: &Address) -> ServiceResult<U256> {
        self.administer(|verifier, persist| verifier.retire_round_with(caller, persist))
            .await
    }

    /// Run an administrator operation with the round store as its persist
    /// step. The operation restores its own state if the store rejects it.
    async fn administer<T, F>(&self, op: F) -> ServiceResult<T>
    where
        F: FnOnce(
            &mut ClaimVerifier<A, L>,
            &mut dyn FnMut(&RoundState) -> Result<(), StoreError>,
        ) -> ProtocolResult<T>,
    {
        let mut guard = self.inner.lock().await;
        let RoundInner { verifier, store } = &mut *guard;
        let round_id = self.round_id.as_str();

        let mut persist = |state: &RoundState| store.save_round(round_id, state);
        let result = op(verifier, &mut persist)?;

        debug!(round_id, status = %verifier.status(), "Round state persisted");
        Ok(result)
    }

    // ============================================================================================
    // Queries
    // ============================================================================================

    pub async fn current_root(&self) -> Option<Hash> {
        self.inner.lock().await.verifier.current_root()
    }

    pub async fn has_claimed(&self, identity: &Address) -> bool {
        self.inner.lock().await.verifier.has_claimed(identity)
    }

    pub async fn max_claim_amount(&self) -> U256 {
        self.inner.lock().await.verifier.max_claim_amount()
    }

    pub async fn status(&self) -> RoundStatus {
        self.inner.lock().await.verifier.status()
    }

    pub async fn held_balance(&self) -> U256 {
        self.inner.lock().await.verifier.held_balance()
    }

    /// Copy of the round state as it is now.
    pub async fn snapshot(&self) -> RoundState {
        self.inner.lock().await.verifier.state().clone()
    }

    pub async fn drain_events(&self) -> Vec<AirdropEvent> {
        self.inner.lock().await.verifier.drain_events()
    }

    /// Run `f` against the ledger while holding the round lock.
    pub async fn with_ledger<T>(&self, f: impl FnOnce(&L) -> T) -> T {
        let inner = self.inner.lock().await;
        f(inner.verifier.ledger())
    }

    /// Tear the round down into its verifier and store.
    pub fn into_parts(self) -> (ClaimVerifier<A, L>, S) {
        let inner = self.inner.into_inner();
        (inner.verifier, inner.store)
    }
}
