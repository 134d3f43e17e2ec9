use std::collections::HashMap;
use std::sync::Arc;

use airdrop_protocol::{AccessControl, Address, ClaimVerifier, RoundStore, TokenLedger};
use tokio::sync::RwLock;
use tracing::info;

use crate::{DistributionRound, ServiceConfig, ServiceError, ServiceResult};

/// Rounds served by one process, keyed by round id.
pub struct RoundRegistry<A, L, S> {
    config: ServiceConfig,
    rounds: RwLock<HashMap<String, Arc<DistributionRound<A, L, S>>>>,
}

impl<A, L, S> RoundRegistry<A, L, S>
where
    A: AccessControl,
    L: TokenLedger,
    S: RoundStore,
{
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            rounds: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Register an existing round under its own id.
    pub async fn register(
        &self,
        round: DistributionRound<A, L, S>,
    ) -> ServiceResult<Arc<DistributionRound<A, L, S>>> {
        let mut rounds = self.rounds.write().await;
        let round_id = round.round_id().to_string();
        if rounds.contains_key(&round_id) {
            return Err(ServiceError::RoundAlreadyExists(round_id));
        }

        let round = Arc::new(round);
        rounds.insert(round_id, Arc::clone(&round));
        Ok(round)
    }

    /// Create a fresh round using the registry's ceiling and claim key scheme.
    pub async fn create_round(
        &self,
        round_id: &str,
        distributor: Address,
        access: A,
        ledger: L,
        store: S,
    ) -> ServiceResult<Arc<DistributionRound<A, L, S>>> {
        let verifier = ClaimVerifier::new(
            distributor,
            access,
            ledger,
            self.config.default_max_claim_amount,
            self.config.claim_key_scheme,
        );
        let round = DistributionRound::new(round_id, verifier, store, self.config.clone());
        let round = self.register(round).await?;

        info!(
            round_id,
            distributor = %distributor,
            scheme = %self.config.claim_key_scheme,
            "Round created"
        );
        Ok(round)
    }

    pub async fn get(&self, round_id: &str) -> ServiceResult<Arc<DistributionRound<A, L, S>>> {
        self.rounds
            .read()
            .await
            .get(round_id)
            .cloned()
            .ok_or_else(|| ServiceError::RoundNotFound(round_id.to_string()))
    }

    pub async fn round_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.rounds.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub async fn remove(&self, round_id: &str) -> ServiceResult<Arc<DistributionRound<A, L, S>>> {
        self.rounds
            .write()
            .await
            .remove(round_id)
            .ok_or_else(|| ServiceError::RoundNotFound(round_id.to_string()))
    }
}
