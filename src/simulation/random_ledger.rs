//! Random shared-expense ledgers for benchmarks and manual testing.

use crate::intent::{Intent, Payees, Transaction};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

/// Configuration for generating a random intent document.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Number of members in the group.
    pub member_count: usize,
    /// Number of transactions to generate.
    pub transaction_count: usize,
    /// Largest number of payees on a single transaction.
    pub max_payees: usize,
    /// Smallest transaction amount, in cents.
    pub min_cents: i64,
    /// Largest transaction amount, in cents.
    pub max_cents: i64,
    /// Seed for reproducible output. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            member_count: 10,
            transaction_count: 30,
            max_payees: 4,
            min_cents: 100,
            max_cents: 50_000,
            seed: None,
        }
    }
}

/// Generate a random intent document.
///
/// Members are named `MEMBER-000`, `MEMBER-001`, ... Each transaction picks
/// a payer and between one and `max_payees` distinct other members.
pub fn generate_random_intent(config: &LedgerConfig) -> Intent {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let members: Vec<String> = (0..config.member_count)
        .map(|i| format!("MEMBER-{:03}", i))
        .collect();

    let mut transactions = Vec::with_capacity(config.transaction_count);
    if members.len() >= 2 {
        for _ in 0..config.transaction_count {
            let payer = rng.gen_range(0..members.len());
            let others: Vec<&String> = members
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != payer)
                .map(|(_, m)| m)
                .collect();

            let payee_count = rng.gen_range(1..=config.max_payees.clamp(1, others.len()));
            let payees: Vec<String> = others
                .choose_multiple(&mut rng, payee_count)
                .map(|m| (*m).clone())
                .collect();

            let cents = rng.gen_range(config.min_cents..=config.max_cents.max(config.min_cents));
            let to = match payees.len() {
                1 => Payees::One(payees[0].clone()),
                _ => Payees::Many(payees),
            };
            transactions.push(Transaction {
                from: members[payer].clone(),
                to,
                amount: Decimal::new(cents, 2),
            });
        }
    }

    Intent {
        members,
        transactions,
    }
}
