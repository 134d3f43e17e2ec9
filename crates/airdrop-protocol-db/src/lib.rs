/*!
# Airdrop Round Database

SQLite persistence for distribution rounds: round configuration and status,
claim records, ledger balances and compiled distributions (one proof per
entry). Everything a restarted process needs to resume a round.

## Tables

- `rounds`: one row per round (distributor, administrator, root, ceiling,
  status, claim key scheme)
- `claims`: one row per claim record, keyed by `(round_id, claim_root,
  claimant)`. `claim_root` is empty under the global key scheme
- `balances`: the shared token ledger
- `distribution_entries`: compiled leaves and proofs per round
- `schema_version`
*/

pub mod database;
pub mod errors;
pub mod schema;

// Re-export main types for convenience
pub use database::{DistributionEntry, EligibilityInfo, RoundDatabase, RoundInfo};
pub use errors::{DbError, DbResult};
pub use schema::SCHEMA_VERSION;
