#![cfg(feature = "testing")]

//! Fixtures shared by this crate's tests and the downstream crates' tests.

use alloy_primitives::{Address, U256};

use crate::access::SingleAdministrator;
use crate::claim_leaf::ClaimLeaf;
use crate::hashing::{hash_sorted_pair, keccak256, Hash};
use crate::ledger::InMemoryLedger;
use crate::proofs::ClaimProof;
use crate::state::ClaimKeyScheme;
use crate::verifier::ClaimVerifier;

/// Standard test constants
pub const TEST_POOL_FUNDING: u64 = 10_000;
pub const TEST_MAX_CLAIM_AMOUNT: u64 = 1_000;

/// Stable, non-null address derived from a label.
pub fn deterministic_address(label: &str) -> Address {
    let digest = keccak256(label.as_bytes());
    Address::from_slice(&digest[12..])
}

/// Three entries with fixed addresses (`0xaa..`, `0xbb..`, `0xcc..`) whose
/// leaves, root and proofs are known ahead of time.
pub fn sample_entries() -> Vec<ClaimLeaf> {
    vec![
        ClaimLeaf::new(Address::new([0xaa; 20]), U256::from(100u64)),
        ClaimLeaf::new(Address::new([0xbb; 20]), U256::from(200u64)),
        ClaimLeaf::new(Address::new([0xcc; 20]), U256::from(500u64)),
    ]
}

/// `count` entries with labelled addresses and amounts `1..=count`.
pub fn generate_test_entries(count: usize) -> Vec<ClaimLeaf> {
    (0..count)
        .map(|i| {
            ClaimLeaf::new(
                deterministic_address(&format!("claimant-{}", i)),
                U256::from(i as u64 + 1),
            )
        })
        .collect()
}

/// Straightforward layer-by-layer tree construction, kept independent of
/// `rs_merkle` so it can act as an oracle for the production builder.
///
/// Returns the root and one bottom-up proof per leaf. Panics on empty input.
pub fn reference_tree(leaves: &[Hash]) -> (Hash, Vec<Vec<Hash>>) {
    assert!(!leaves.is_empty(), "reference tree needs at least one leaf");

    let mut proofs: Vec<Vec<Hash>> = vec![Vec::new(); leaves.len()];
    // Position of each original leaf in the current layer
    let mut positions: Vec<usize> = (0..leaves.len()).collect();
    let mut layer: Vec<Hash> = leaves.to_vec();

    while layer.len() > 1 {
        for (leaf, pos) in positions.iter_mut().enumerate() {
            let sibling = *pos ^ 1;
            if sibling < layer.len() {
                proofs[leaf].push(layer[sibling]);
            }
            *pos /= 2;
        }

        layer = layer
            .chunks(2)
            .map(|pair| match pair {
                [a, b] => hash_sorted_pair(a, b),
                [a] => *a,
                _ => unreachable!(),
            })
            .collect();
    }

    (layer[0], proofs)
}

/// Test fixture containing common test setup
pub struct TestFixture {
    pub admin: Address,
    pub verifier_address: Address,
    pub entries: Vec<ClaimLeaf>,
    pub root: Hash,
    pub proofs: Vec<ClaimProof>,
    pub verifier: ClaimVerifier<SingleAdministrator, InMemoryLedger>,
}

impl TestFixture {
    /// Fixture over [`sample_entries`], funded with [`TEST_POOL_FUNDING`].
    pub fn new() -> Self {
        Self::with_entries(sample_entries(), ClaimKeyScheme::Global)
    }

    pub fn with_entries(entries: Vec<ClaimLeaf>, scheme: ClaimKeyScheme) -> Self {
        Self::with_funding(entries, scheme, U256::from(TEST_POOL_FUNDING))
    }

    pub fn with_funding(entries: Vec<ClaimLeaf>, scheme: ClaimKeyScheme, funding: U256) -> Self {
        let admin = deterministic_address("admin");
        let verifier_address = deterministic_address("verifier");

        let leaves: Vec<Hash> = entries.iter().map(ClaimLeaf::to_hash).collect();
        let (root, proofs) = reference_tree(&leaves);

        let mut ledger = InMemoryLedger::new();
        if !funding.is_zero() {
            ledger.mint(&verifier_address, funding).expect("fund verifier");
        }

        let verifier = ClaimVerifier::new(
            verifier_address,
            SingleAdministrator(admin),
            ledger,
            U256::from(TEST_MAX_CLAIM_AMOUNT),
            scheme,
        );

        Self {
            admin,
            verifier_address,
            entries,
            root,
            proofs: proofs.into_iter().map(ClaimProof::new).collect(),
            verifier,
        }
    }

    /// Publish the fixture's root as the administrator.
    pub fn publish_root(&mut self) -> &mut Self {
        let admin = self.admin;
        let root = self.root;
        self.verifier
            .set_root(&admin, root)
            .expect("admin can publish root");
        self
    }

    /// Claim entry `index` with its own proof.
    pub fn claim(&mut self, index: usize) -> crate::error::ProtocolResult<()> {
        let entry = self.entries[index];
        let proof = self.proofs[index].clone();
        self.verifier.claim(&entry.claimant, entry.amount, &proof)
    }

    pub fn balance_of(&self, holder: &Address) -> U256 {
        use crate::ledger::TokenLedger;
        self.verifier.ledger().balance_of(holder)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
