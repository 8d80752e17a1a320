use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single transfer that moves money from a net debtor to a net creditor.
///
/// Payments are the output of settlement optimization. They are immutable
/// once created and can be fed back into a [`DebtGraph`] to replace its
/// accumulated edges with the simplified set.
///
/// [`DebtGraph`]: crate::graph::debt_graph::DebtGraph
///
/// # Examples
///
/// ```
/// use debt_settlement::core::payment::SettlementPayment;
/// use rust_decimal_macros::dec;
///
/// let payment = SettlementPayment::new("alice", "carol", dec!(25));
///
/// assert_eq!(payment.from(), "alice");
/// assert_eq!(payment.amount(), dec!(25));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPayment {
    /// The member who pays (net debtor).
    from: String,
    /// The member who receives (net creditor).
    to: String,
    /// Amount transferred. Always positive.
    amount: Decimal,
}

impl SettlementPayment {
    /// Create a new payment.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not positive.
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: Decimal) -> Self {
        assert!(
            amount > Decimal::ZERO,
            "Payment amount must be positive, got {}",
            amount
        );
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl fmt::Display for SettlementPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}: {}", self.from, self.to, self.amount)
    }
}

/// Sum of all payment amounts.
pub fn total_paid(payments: &[SettlementPayment]) -> Decimal {
    payments.iter().map(|p| p.amount).sum()
}
