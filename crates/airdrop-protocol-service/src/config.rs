use airdrop_protocol::{default_max_claim_amount, ClaimKeyScheme, U256};

/// Configuration for round services
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Maximum number of claims of one batch in flight at once
    pub max_parallel_claims: usize,

    /// Ceiling for rounds created through the registry
    pub default_max_claim_amount: U256,

    /// Claim key scheme for rounds created through the registry
    pub claim_key_scheme: ClaimKeyScheme,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_parallel_claims: 16,
            default_max_claim_amount: default_max_claim_amount(),
            claim_key_scheme: ClaimKeyScheme::Global,
        }
    }
}
