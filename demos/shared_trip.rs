//! Shared trip expenses example.
//!
//! Demonstrates how a group's shared expenses turn into net balances
//! and a short list of settlement payments.

use debt_settlement::prelude::*;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  debt-settlement: Shared Trip Example    ║");
    println!("╚══════════════════════════════════════════╝\n");

    let intent = Intent {
        members: vec!["alice".into(), "bob".into(), "carol".into(), "dave".into()],
        transactions: vec![
            Transaction::new("alice", vec!["bob", "carol", "dave"], dec!(90)),
            Transaction::new("bob", "carol", dec!(40)),
            Transaction::new("carol", vec!["alice", "dave"], dec!(25.50)),
            Transaction::new("dave", "alice", dec!(12)),
        ],
    };

    println!("━━━ Expenses ━━━\n");
    for txn in &intent.transactions {
        println!(
            "  {:<6} owes {:<20} {:>8} total",
            txn.from,
            txn.to.names().join(", "),
            txn.amount
        );
    }
    println!();

    let graph = match intent.to_graph() {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    let balances = graph.net_balances();
    println!("{}", balances);

    let payments = SettlementOptimizer::default().optimize(&balances);
    println!("━━━ Payments ━━━\n");
    for payment in &payments {
        println!("  {}", payment);
    }
    println!();

    println!("{}", SettlementSummary::new(&graph, &payments));
}
