use debt_settlement::core::config::DEFAULT_EPSILON;
use debt_settlement::core::payment::total_paid;
use debt_settlement::prelude::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

const MEMBERS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

/// Residuals at or below epsilon are dropped rather than paid. Each member
/// drops at most once, and the dust can land on a single counterparty.
fn dust_tolerance() -> Decimal {
    DEFAULT_EPSILON * Decimal::from(MEMBERS.len())
}

/// Generate a member name from a small pool (to increase edge overlap).
fn arb_member() -> impl Strategy<Value = &'static str> {
    prop::sample::select(MEMBERS.to_vec())
}

/// Generate a signed amount in cents (-10,000.00 to 10,000.00).
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Generate a debt edge. Self-loops and negative amounts are allowed.
fn arb_debt() -> impl Strategy<Value = (&'static str, &'static str, Decimal)> {
    (arb_member(), arb_member(), arb_amount())
}

fn arb_debts() -> impl Strategy<Value = Vec<(&'static str, &'static str, Decimal)>> {
    prop::collection::vec(arb_debt(), 0..40)
}

fn build_graph(debts: &[(&str, &str, Decimal)]) -> DebtGraph {
    let mut graph = DebtGraph::new();
    for name in MEMBERS {
        graph.register_member(name);
    }
    for (payer, payee, amount) in debts {
        graph.add_debt(payer, payee, *amount).unwrap();
    }
    graph
}

proptest! {
    // ===================================================================
    // Balances always sum to zero.
    //
    // Every debt is recorded once as a receivable and once as a payable,
    // so money is conserved across members.
    // ===================================================================
    #[test]
    fn balances_are_conserved(debts in arb_debts()) {
        let balances = build_graph(&debts).net_balances();
        prop_assert!(
            balances.is_balanced(DEFAULT_EPSILON),
            "Balances sum to {}",
            balances.total()
        );
    }

    // ===================================================================
    // Registering a member twice changes nothing.
    // ===================================================================
    #[test]
    fn registration_is_idempotent(names in prop::collection::vec(arb_member(), 1..20)) {
        let mut graph = DebtGraph::new();
        let mut first_ids: HashMap<&str, usize> = HashMap::new();
        for name in &names {
            let id = graph.register_member(*name);
            prop_assert_eq!(*first_ids.entry(*name).or_insert(id), id);
        }
        let unique: std::collections::HashSet<_> = names.iter().collect();
        prop_assert_eq!(graph.member_count(), unique.len());
        for member in graph.members() {
            prop_assert_eq!(first_ids[member.name()], member.id());
        }
    }

    // ===================================================================
    // add_debt(A, B, -x) is the same as add_debt(B, A, x).
    // ===================================================================
    #[test]
    fn negative_amount_reverses_edge(
        payer in arb_member(),
        payee in arb_member(),
        cents in 1i64..1_000_000i64,
    ) {
        let amount = Decimal::new(cents, 2);
        let negated = build_graph(&[(payer, payee, -amount)]);
        let reversed = build_graph(&[(payee, payer, amount)]);
        prop_assert_eq!(negated.snapshot(), reversed.snapshot());
    }

    // ===================================================================
    // Stored edges are never negative.
    // ===================================================================
    #[test]
    fn matrix_cells_are_non_negative(debts in arb_debts()) {
        let graph = build_graph(&debts);
        prop_assert!(graph.edges().iter().all(|(_, _, amount)| *amount > Decimal::ZERO));
        prop_assert!(graph.snapshot().validate().is_ok());
    }

    // ===================================================================
    // Settling preserves every member's net position.
    //
    // Replacing the graph with the optimized payments and recomputing
    // balances reproduces the original balances.
    // ===================================================================
    #[test]
    fn settlement_preserves_net_position(debts in arb_debts()) {
        let mut graph = build_graph(&debts);
        let before = graph.net_balances();

        SettlementOptimizer::default().simplify(&mut graph).unwrap();
        let after = graph.net_balances();

        for (name, amount) in before.iter() {
            let settled = after.get(name).unwrap();
            prop_assert!(
                (settled - amount).abs() <= dust_tolerance(),
                "{} moved from {} to {}",
                name,
                amount,
                settled
            );
        }
    }

    // ===================================================================
    // Re-settling a simplified graph moves the same total.
    // ===================================================================
    #[test]
    fn settlement_is_idempotent(debts in arb_debts()) {
        let mut graph = build_graph(&debts);
        let optimizer = SettlementOptimizer::default();

        let first = optimizer.simplify(&mut graph).unwrap();
        let second = optimizer.optimize(&graph.net_balances());
        prop_assert!((total_paid(&first) - total_paid(&second)).abs() <= dust_tolerance());
    }

    // ===================================================================
    // At most k - 1 payments for k unsettled members.
    // ===================================================================
    #[test]
    fn payment_count_is_bounded(debts in arb_debts()) {
        let balances = build_graph(&debts).net_balances();
        let unsettled = balances.iter().filter(|(_, a)| !a.is_zero()).count();
        let payments = SettlementOptimizer::default().optimize(&balances);
        prop_assert!(payments.len() <= unsettled.saturating_sub(1));
    }

    // ===================================================================
    // Each debtor pays exactly its debt, each creditor receives its credit.
    // ===================================================================
    #[test]
    fn payments_match_balances(debts in arb_debts()) {
        let balances = build_graph(&debts).net_balances();
        let payments = SettlementOptimizer::default().optimize(&balances);

        let mut net: HashMap<&str, Decimal> = HashMap::new();
        for p in &payments {
            prop_assert!(p.from() != p.to());
            *net.entry(p.from()).or_insert(Decimal::ZERO) -= p.amount();
            *net.entry(p.to()).or_insert(Decimal::ZERO) += p.amount();
        }
        for (name, amount) in balances.iter() {
            let moved = net.get(name).copied().unwrap_or(Decimal::ZERO);
            prop_assert!(
                (moved - amount).abs() <= dust_tolerance(),
                "{} has balance {} but payments net to {}",
                name,
                amount,
                moved
            );
        }
    }

    // ===================================================================
    // Settlement is deterministic and ignores balance order.
    // ===================================================================
    #[test]
    fn settlement_is_deterministic(debts in arb_debts()) {
        let balances = build_graph(&debts).net_balances();
        let reversed: Balances = balances
            .iter()
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();

        let optimizer = SettlementOptimizer::default();
        let payments = optimizer.optimize(&balances);
        prop_assert_eq!(&payments, &optimizer.optimize(&balances));
        prop_assert_eq!(&payments, &optimizer.optimize(&reversed));
    }
}
