use crate::core::balance::Balances;
use crate::core::config::SettlementConfig;
use crate::core::payment::SettlementPayment;
use crate::error::GraphError;
use crate::graph::debt_graph::DebtGraph;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A member waiting in the debtor or creditor queue.
///
/// Ordered by outstanding magnitude, largest first. Equal magnitudes pop
/// in ascending name order so the output does not depend on the order
/// balances were supplied in.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Outstanding {
    magnitude: Decimal,
    name: String,
}

impl Ord for Outstanding {
    fn cmp(&self, other: &Self) -> Ordering {
        self.magnitude
            .cmp(&other.magnitude)
            .then_with(|| other.name.cmp(&self.name))
    }
}

impl PartialOrd for Outstanding {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pop the largest debtor and creditor, leaving both queues untouched
/// unless both are non-empty.
fn pop_pair(
    debtors: &mut BinaryHeap<Outstanding>,
    creditors: &mut BinaryHeap<Outstanding>,
) -> Option<(Outstanding, Outstanding)> {
    if debtors.is_empty() || creditors.is_empty() {
        return None;
    }
    Some((debtors.pop()?, creditors.pop()?))
}

/// Reduces net balances to a short list of settlement payments.
///
/// # Algorithm
///
/// Greedy largest-debtor / largest-creditor pairing:
///
/// 1. Members below `-ε` are debtors, members above `ε` are creditors.
/// 2. Pop the largest debtor and the largest creditor.
/// 3. Transfer `min(debt, credit)` from the debtor to the creditor.
/// 4. Whichever side still has more than `ε` outstanding goes back in
///    its queue; the other is settled.
/// 5. Stop when either queue is empty.
///
/// A transfer that rounds to zero at the configured precision is dust:
/// no payment is emitted for it, but the pairing still consumes it.
///
/// The result never has more than `k - 1` payments for `k` unsettled
/// members. It is a heuristic: finding the true minimum number of
/// payments is NP-hard and is not attempted.
///
/// # Examples
///
/// ```
/// use debt_settlement::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let balances: Balances = [("A", dec!(-50)), ("B", dec!(-50)), ("C", dec!(100))]
///     .into_iter()
///     .collect();
///
/// let payments = SettlementOptimizer::default().optimize(&balances);
/// assert_eq!(payments.len(), 2);
/// assert!(payments.iter().all(|p| p.to() == "C" && p.amount() == dec!(50)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SettlementOptimizer {
    config: SettlementConfig,
}

impl SettlementOptimizer {
    pub fn new(config: SettlementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    /// Compute payments that bring every balance to zero.
    ///
    /// Balances are expected to sum to zero; if they do not, a warning is
    /// logged and the greedy pairing still runs until one side is exhausted.
    /// Rounded balances may drift by up to half a unit per member, which
    /// does not count as unbalanced.
    pub fn optimize(&self, balances: &Balances) -> Vec<SettlementPayment> {
        let epsilon = self.config.epsilon;
        let tolerance = epsilon + self.config.half_unit() * Decimal::from(balances.len());

        if !balances.is_balanced(tolerance) {
            warn!(
                "balances sum to {} instead of zero; settlement will be incomplete",
                balances.total()
            );
        }

        let mut debtors: BinaryHeap<Outstanding> = balances
            .debtors(epsilon)
            .map(|(name, amount)| Outstanding {
                magnitude: -amount,
                name: name.to_string(),
            })
            .collect();
        let mut creditors: BinaryHeap<Outstanding> = balances
            .creditors(epsilon)
            .map(|(name, amount)| Outstanding {
                magnitude: amount,
                name: name.to_string(),
            })
            .collect();

        let mut payments = Vec::new();

        while let Some((debtor, creditor)) = pop_pair(&mut debtors, &mut creditors) {
            let transfer = debtor.magnitude.min(creditor.magnitude);
            let amount = transfer.round_dp(self.config.precision);
            if amount > Decimal::ZERO {
                let payment = SettlementPayment::new(&debtor.name, &creditor.name, amount);
                debug!("settle {}", payment);
                payments.push(payment);
            } else {
                debug!(
                    "dropping {} between {} and {}",
                    transfer, debtor.name, creditor.name
                );
            }

            let remaining_debt = debtor.magnitude - transfer;
            let remaining_credit = creditor.magnitude - transfer;

            if remaining_debt > epsilon {
                debtors.push(Outstanding {
                    magnitude: remaining_debt,
                    ..debtor
                });
            }
            if remaining_credit > epsilon {
                creditors.push(Outstanding {
                    magnitude: remaining_credit,
                    ..creditor
                });
            }
        }

        if !debtors.is_empty() || !creditors.is_empty() {
            warn!(
                "{} debtors and {} creditors left unsettled",
                debtors.len(),
                creditors.len()
            );
        }

        payments
    }

    /// Replace the graph's edges with the optimized payments.
    ///
    /// Net balances are unchanged; only the set of edges shrinks.
    /// Balances are rounded at the configured precision.
    pub fn simplify(&self, graph: &mut DebtGraph) -> Result<Vec<SettlementPayment>, GraphError> {
        let payments = self.optimize(&graph.net_balances_at(self.config.precision));
        graph.replace_with(&payments)?;
        Ok(payments)
    }
}
