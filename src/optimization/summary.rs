use crate::core::payment::{total_paid, SettlementPayment};
use crate::graph::debt_graph::DebtGraph;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How much a settlement plan simplifies the accumulated debts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementSummary {
    /// Non-zero edges in the graph before simplification.
    pub gross_edges: usize,
    /// Sum of all edges before simplification.
    pub gross_total: Decimal,
    /// Payments in the settlement plan.
    pub payment_count: usize,
    /// Money moved by the settlement plan.
    pub net_total: Decimal,
}

impl SettlementSummary {
    /// Compare a graph's current edges against a settlement plan.
    ///
    /// Call before [`DebtGraph::replace_with`] to compare against the
    /// original edges.
    pub fn new(graph: &DebtGraph, payments: &[SettlementPayment]) -> Self {
        Self {
            gross_edges: graph.edge_count(),
            gross_total: graph.gross_total(),
            payment_count: payments.len(),
            net_total: total_paid(payments),
        }
    }

    /// Transfers avoided compared to paying every edge.
    pub fn payments_saved(&self) -> usize {
        self.gross_edges.saturating_sub(self.payment_count)
    }

    /// Share of the gross amount that no longer has to move.
    pub fn reduction_ratio(&self) -> f64 {
        if self.gross_total == Decimal::ZERO {
            return 0.0;
        }
        let ratio = (self.gross_total - self.net_total) / self.gross_total;
        ratio.to_f64().unwrap_or(0.0)
    }
}

impl std::fmt::Display for SettlementSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Settlement Summary ===")?;
        writeln!(f, "Debts Before:     {} ({} total)", self.gross_edges, self.gross_total)?;
        writeln!(f, "Payments After:   {} ({} total)", self.payment_count, self.net_total)?;
        writeln!(f, "Payments Saved:   {}", self.payments_saved())?;
        writeln!(f, "Amount Reduction: {:.1}%", self.reduction_ratio() * 100.0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::settlement::SettlementOptimizer;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn cycle_graph() -> DebtGraph {
        let mut graph = DebtGraph::new();
        for name in ["A", "B", "C"] {
            graph.register_member(name);
        }
        graph.add_debt("A", "B", dec!(100)).unwrap();
        graph.add_debt("B", "C", dec!(100)).unwrap();
        graph.add_debt("C", "A", dec!(100)).unwrap();
        graph
    }

    #[test]
    fn test_summary_perfect_cycle() {
        let graph = cycle_graph();
        let payments = SettlementOptimizer::default().optimize(&graph.net_balances());
        let summary = SettlementSummary::new(&graph, &payments);

        assert_eq!(summary.gross_edges, 3);
        assert_eq!(summary.gross_total, dec!(300));
        assert_eq!(summary.payment_count, 0);
        assert_eq!(summary.payments_saved(), 3);
        assert_relative_eq!(summary.reduction_ratio(), 1.0);
    }

    #[test]
    fn test_summary_partial_reduction() {
        let mut graph = cycle_graph();
        graph.add_debt("A", "C", dec!(100)).unwrap();
        let payments = SettlementOptimizer::default().optimize(&graph.net_balances());
        let summary = SettlementSummary::new(&graph, &payments);

        assert_eq!(summary.gross_total, dec!(400));
        assert_eq!(summary.net_total, dec!(100));
        assert_relative_eq!(summary.reduction_ratio(), 0.75);
    }

    #[test]
    fn test_summary_empty_graph() {
        let summary = SettlementSummary::new(&DebtGraph::new(), &[]);
        assert_eq!(summary.payments_saved(), 0);
        assert_relative_eq!(summary.reduction_ratio(), 0.0);
    }
}
