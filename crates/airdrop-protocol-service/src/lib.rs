/*!
# Airdrop Round Service

Async wrapper that exposes claim verifiers to many concurrent callers while
keeping each round serializable.

Each [`DistributionRound`] guards its verifier and round store with one
`tokio::sync::Mutex`. A claim runs in three phases:

1. **Prepare** (locked): caller, ceiling, status and claim-record checks, plus
   a snapshot of the active root
2. **Verify** (unlocked): fold the proof against the snapshot. Claims for
   different recipients verify in parallel
3. **Commit** (locked): re-validate against current state, write the claim
   record, persist it, then transfer. A failed transfer rolls the record back
   and persists the rollback

## Quick Start

```rust
use airdrop_protocol::test_utils::{deterministic_address, sample_entries, reference_tree};
use airdrop_protocol::{
    ClaimKeyScheme, ClaimLeaf, ClaimProof, ClaimVerifier, InMemoryLedger, MemoryRoundStore,
    SingleAdministrator, U256,
};
use airdrop_protocol_service::{DistributionRound, ServiceConfig};

# async fn example() -> Result<(), Box<dyn std::error::Error>> {
let admin = deterministic_address("admin");
let distributor = deterministic_address("distributor");
let mut ledger = InMemoryLedger::new();
ledger.mint(&distributor, U256::from(1_000u64))?;

let verifier = ClaimVerifier::new(
    distributor,
    SingleAdministrator(admin),
    ledger,
    U256::from(1_000u64),
    ClaimKeyScheme::Global,
);
let round = DistributionRound::new("round-1", verifier, MemoryRoundStore::new(), ServiceConfig::default());

let entries = sample_entries();
let leaves: Vec<_> = entries.iter().map(ClaimLeaf::to_hash).collect();
let (root, proofs) = reference_tree(&leaves);

round.set_root(&admin, root).await?;
round
    .claim(&entries[0].claimant, entries[0].amount, &ClaimProof::new(proofs[0].clone()))
    .await?;
# Ok(())
# }
```
*/

mod config;
mod error;
mod registry;
mod round;

pub use config::ServiceConfig;
pub use error::{ServiceError, ServiceResult};
pub use registry::RoundRegistry;
pub use round::{ClaimRequest, DistributionRound};
