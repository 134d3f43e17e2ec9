use super::generate_fixtures::generate_entries;
use crate::error::{CliError, CliResult};
use airdrop_protocol::{
    format_hash, Address, ClaimKeyScheme, ClaimVerifier, ErrorCode, InMemoryLedger,
    MemoryRoundStore, SingleAdministrator, TokenLedger, U256,
};
use airdrop_protocol_merkle::ClaimTree;
use airdrop_protocol_service::{
    ClaimRequest, DistributionRound, ServiceConfig, ServiceError, ServiceResult,
};
use std::str::FromStr;
use std::time::Instant;

const SIMULATION_MAX_AMOUNT: u64 = 1_000;

type SimulatedRound = DistributionRound<SingleAdministrator, InMemoryLedger, MemoryRoundStore>;

#[derive(Debug, Default)]
struct Outcome {
    succeeded: usize,
    already_claimed: usize,
    invalid_proof: usize,
    other: usize,
}

impl Outcome {
    fn tally(results: &[ServiceResult<()>], requests: &[ClaimRequest], verbose: bool) -> Self {
        let mut outcome = Outcome::default();
        for (result, request) in results.iter().zip(requests) {
            match result {
                Ok(()) => outcome.succeeded += 1,
                Err(ServiceError::Protocol(ErrorCode::AlreadyClaimed(_))) => {
                    outcome.already_claimed += 1
                }
                Err(ServiceError::Protocol(ErrorCode::InvalidProof)) => outcome.invalid_proof += 1,
                Err(_) => outcome.other += 1,
            }
            if verbose {
                if let Err(e) = result {
                    println!("   ❌ {} ({}): {}", request.claimant, request.amount, e);
                }
            }
        }
        outcome
    }

    fn print(&self, label: &str, elapsed_ms: u128) {
        println!(
            "   {}: {} ok, {} already claimed, {} invalid proof, {} other ({} ms)",
            label, self.succeeded, self.already_claimed, self.invalid_proof, self.other, elapsed_ms
        );
    }
}

/// Run a concurrent in-memory claim simulation through the round service
pub fn execute(
    count: u64,
    seed: u64,
    parallel: usize,
    scheme: String,
    verbose: bool,
) -> CliResult<()> {
    if count < 2 {
        return Err(CliError::InvalidConfig(
            "simulation needs at least 2 claimants".to_string(),
        ));
    }
    let scheme = ClaimKeyScheme::from_str(&scheme).map_err(CliError::InvalidConfig)?;

    println!("🧪 Simulating {} claimants (seed {}, {} in flight)", count, seed, parallel);

    let entries = generate_entries(count, seed, "realistic", 1, SIMULATION_MAX_AMOUNT)?;
    let tree = ClaimTree::from_leaves(entries.clone())?;
    let total = tree.total_amount().ok_or_else(|| {
        CliError::CommandExecution("Total distribution amount overflows uint256".to_string())
    })?;
    println!("🌳 Root {} (depth {})", format_hash(&tree.root()), tree.depth());

    let administrator = Address::repeat_byte(0xad);
    let distributor = Address::repeat_byte(0xd1);

    let mut ledger = InMemoryLedger::new();
    ledger.mint(&distributor, total)?;

    let verifier = ClaimVerifier::new(
        distributor,
        SingleAdministrator(administrator),
        ledger,
        U256::from(SIMULATION_MAX_AMOUNT),
        scheme,
    );
    let config = ServiceConfig {
        max_parallel_claims: parallel,
        ..ServiceConfig::default()
    };
    let round: SimulatedRound =
        DistributionRound::new("simulation", verifier, MemoryRoundStore::new(), config);

    let requests: Vec<ClaimRequest> = entries
        .iter()
        .zip(tree.proofs())
        .map(|(entry, proof)| ClaimRequest {
            claimant: entry.claimant,
            amount: entry.amount,
            proof,
        })
        .collect();

    // Claimant 0 presents claimant 1's proof
    let mut forged = requests[0].clone();
    forged.proof = requests[1].proof.clone();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        round.set_root(&administrator, tree.root()).await?;

        println!("\n🚀 Submitting claims...");
        let forged_results = round.claim_batch(std::slice::from_ref(&forged)).await;
        Outcome::tally(&forged_results, std::slice::from_ref(&forged), verbose)
            .print("Forged proof", 0);

        let started = Instant::now();
        let first_pass = round.claim_batch(&requests).await;
        let first = Outcome::tally(&first_pass, &requests, verbose);
        first.print("First pass", started.elapsed().as_millis());

        let started = Instant::now();
        let replay = round.claim_batch(&requests).await;
        let second = Outcome::tally(&replay, &requests, verbose);
        second.print("Replay", started.elapsed().as_millis());

        let remaining = round.held_balance().await;
        let swept = round.retire_round(&administrator).await?;

        let paid_out = round
            .with_ledger(|ledger| {
                entries
                    .iter()
                    .fold(U256::ZERO, |acc, entry| {
                        acc.saturating_add(ledger.balance_of(&entry.claimant))
                    })
            })
            .await;

        println!("\n📊 Summary:");
        println!("  - Claims paid: {} / {}", first.succeeded, requests.len());
        println!("  - Replays rejected: {}", second.already_claimed);
        println!("  - Paid out: {} of {}", paid_out, total);
        println!("  - Remaining before retirement: {}", remaining);
        println!("  - Swept to administrator: {}", swept);

        if first.succeeded != requests.len() || second.succeeded != 0 || paid_out != total {
            return Err(CliError::CommandExecution(
                "simulation finished with inconsistent results".to_string(),
            ));
        }

        println!("\n🎉 Simulation completed!");
        Ok(())
    })
}
