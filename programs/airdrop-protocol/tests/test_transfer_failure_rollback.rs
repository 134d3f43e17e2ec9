use airdrop_protocol::test_utils::{deterministic_address, TestFixture};
use airdrop_protocol::{
    Address, ClaimKeyScheme, ClaimVerifier, ErrorCode, InMemoryLedger, LedgerError,
    RoundState, SingleAdministrator, StoreError, TokenLedger, U256,
};

/// Ledger that can be told to reject the next transfers.
struct FlakyLedger {
    inner: InMemoryLedger,
    reject_transfers: bool,
}

impl TokenLedger for FlakyLedger {
    fn balance_of(&self, holder: &Address) -> U256 {
        self.inner.balance_of(holder)
    }

    fn transfer(&mut self, from: &Address, to: &Address, amount: U256) -> Result<(), LedgerError> {
        if self.reject_transfers {
            return Err(LedgerError::Rejected("paused".to_string()));
        }
        self.inner.transfer(from, to, amount)
    }
}

fn flaky_verifier(test: &TestFixture) -> ClaimVerifier<SingleAdministrator, FlakyLedger> {
    let mut inner = InMemoryLedger::new();
    inner
        .mint(&test.verifier_address, U256::from(1_000u64))
        .unwrap();

    let mut verifier = ClaimVerifier::new(
        test.verifier_address,
        SingleAdministrator(test.admin),
        FlakyLedger {
            inner,
            reject_transfers: true,
        },
        U256::from(1_000u64),
        ClaimKeyScheme::Global,
    );
    verifier.set_root(&test.admin, test.root).unwrap();
    verifier
}

/// Test that a rejected payout leaves no claim record behind
///
/// **Test flow:**
/// 1. Publish the sample root on a verifier whose ledger rejects transfers
/// 2. Claim and expect TransferFailed
/// 3. Verify the claim record was rolled back and no Claimed event exists
/// 4. Re-enable transfers; the same claim now succeeds
#[test]
fn test_transfer_failure_rolls_back_claim_record() {
    let test = TestFixture::new();
    let mut verifier = flaky_verifier(&test);
    let entry = test.entries[1];

    let result = verifier.claim(&entry.claimant, entry.amount, &test.proofs[1]);
    assert_eq!(
        result,
        Err(ErrorCode::TransferFailed(LedgerError::Rejected(
            "paused".to_string()
        )))
    );
    assert!(!verifier.has_claimed(&entry.claimant));
    assert!(verifier.state().claims.is_empty());
    assert_eq!(verifier.held_balance(), U256::from(1_000u64));
    assert_eq!(verifier.drain_events().len(), 1); // only RootUpdated

    verifier.ledger_mut().reject_transfers = false;
    verifier
        .claim(&entry.claimant, entry.amount, &test.proofs[1])
        .unwrap();
    assert!(verifier.has_claimed(&entry.claimant));
    assert_eq!(verifier.ledger().balance_of(&entry.claimant), entry.amount);
}

/// The claim record is persisted before the transfer, and the rollback is
/// persisted after a failed one.
#[test]
fn test_commit_persists_before_transfer_and_after_rollback() {
    let test = TestFixture::new();
    let mut verifier = flaky_verifier(&test);
    let entry = test.entries[0];

    let prepared = verifier
        .prepare_claim(&entry.claimant, entry.amount)
        .unwrap();
    let verified = prepared.verify(&test.proofs[0]).unwrap();

    let mut snapshots: Vec<RoundState> = Vec::new();
    let result = verifier.commit_claim_with(verified, |state| {
        snapshots.push(state.clone());
        Ok(())
    });

    assert!(matches!(result, Err(ErrorCode::TransferFailed(_))));
    assert_eq!(snapshots.len(), 2);
    assert!(snapshots[0].has_claimed(&entry.claimant));
    assert!(!snapshots[1].has_claimed(&entry.claimant));
}

#[test]
fn test_persist_failure_aborts_before_transfer() {
    let mut test = TestFixture::new();
    test.publish_root();
    let entry = test.entries[0];

    let verified = test
        .verifier
        .prepare_claim(&entry.claimant, entry.amount)
        .unwrap()
        .verify(&test.proofs[0])
        .unwrap();

    let result = test.verifier.commit_claim_with(verified, |_| {
        Err(StoreError::Backend("disk full".to_string()))
    });

    assert_eq!(
        result,
        Err(ErrorCode::StateWriteFailed(
            "Storage backend error: disk full".to_string()
        ))
    );
    assert!(!test.verifier.has_claimed(&entry.claimant));
    assert_eq!(test.balance_of(&entry.claimant), U256::ZERO);
}

#[test]
fn test_invalid_claim_never_reaches_ledger() {
    let test = TestFixture::new();
    let mut verifier = flaky_verifier(&test);
    let stranger = deterministic_address("stranger");

    assert_eq!(verifier.ledger().balance_of(&stranger), U256::ZERO);
    verifier.ledger_mut().reject_transfers = false;
    assert_eq!(
        verifier.claim(&stranger, U256::from(1u64), &test.proofs[0]),
        Err(ErrorCode::InvalidProof)
    );
    assert_eq!(verifier.ledger().balance_of(&stranger), U256::ZERO);
}
