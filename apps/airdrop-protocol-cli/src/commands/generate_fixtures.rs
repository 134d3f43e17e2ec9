use crate::error::{CliError, CliResult};
use airdrop_protocol::{Address, ClaimLeaf, NULL_ADDRESS, U256};
use airdrop_protocol_csvs::{write_entries_csv, EntriesCsvRow};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

/// Generate deterministic entries for testing and benchmarking
pub fn execute(
    count: u64,
    seed: u64,
    entries_csv_out: PathBuf,
    distribution: String,
    min_amount: u64,
    max_amount: u64,
) -> CliResult<()> {
    println!("Generating {} fixtures with seed {}", count, seed);
    println!("Distribution: {}", distribution);
    println!("Amount range: {} - {}", min_amount, max_amount);

    println!("\n📋 Generating claimants...");
    let entries = generate_entries(count, seed, &distribution, min_amount, max_amount)?;
    let rows: Vec<EntriesCsvRow> = entries.iter().map(EntriesCsvRow::from).collect();
    write_entries_csv(&entries_csv_out, &rows)?;
    println!("✅ Generated entries: {}", entries_csv_out.display());

    let total: U256 = entries
        .iter()
        .fold(U256::ZERO, |acc, entry| acc.saturating_add(entry.amount));

    println!("\n🎉 Fixture generation completed!");
    println!("📊 Summary:");
    println!("  - {} claimants", count);
    println!("  - Distribution: {}", distribution);
    println!("  - Amount range: {} - {}", min_amount, max_amount);
    println!("  - Total amount: {}", total);

    Ok(())
}

/// Generate `count` entries with distinct claimants, deterministic in `seed`
pub fn generate_entries(
    count: u64,
    seed: u64,
    distribution: &str,
    min_amount: u64,
    max_amount: u64,
) -> CliResult<Vec<ClaimLeaf>> {
    if min_amount > max_amount {
        return Err(CliError::InvalidConfig(format!(
            "min amount {} is greater than max amount {}",
            min_amount, max_amount
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut entries = Vec::with_capacity(count as usize);

    for i in 0..count {
        let claimant = generate_claimant(&mut rng);

        let amount = match distribution {
            "uniform" => rng.gen_range(min_amount..=max_amount),
            "realistic" => generate_realistic_amount(&mut rng, min_amount, max_amount),
            "exponential" => generate_exponential_amount(&mut rng, min_amount, max_amount),
            _ => {
                return Err(CliError::InvalidConfig(format!(
                    "Unknown distribution type: {}. Valid options: uniform, realistic, exponential",
                    distribution
                )));
            }
        };

        entries.push(ClaimLeaf::new(claimant, U256::from(amount)));

        // Progress indicator for large datasets
        if count > 10_000 && i % 10_000 == 0 {
            println!("Generated {} / {} fixtures", i, count);
        }
    }

    Ok(entries)
}

fn generate_claimant(rng: &mut StdRng) -> Address {
    loop {
        let address = Address::new(rng.gen::<[u8; 20]>());
        if address != NULL_ADDRESS {
            return address;
        }
    }
}

/// Weighted towards lower amounts
fn generate_realistic_amount(rng: &mut StdRng, min: u64, max: u64) -> u64 {
    let range = (max - min) as f64 + 1.0;
    let random_val: f64 = rng.gen();
    let weighted = 1.0 - (-random_val * 2.0).exp();

    (min + (weighted * range) as u64).min(max)
}

/// Exponential distribution with lambda = 2, capped at the range
fn generate_exponential_amount(rng: &mut StdRng, min: u64, max: u64) -> u64 {
    let range = (max - min) as f64 + 1.0;
    let random_val: f64 = rng.gen_range(f64::EPSILON..1.0);
    let exponential = (-random_val.ln() / 2.0).min(1.0);

    (min + (exponential * range) as u64).min(max)
}
