//! Graph simplification example.
//!
//! Generates a random group ledger, then replaces its debts with the
//! settlement payments and shows that every balance is unchanged.

use debt_settlement::prelude::*;
use debt_settlement::simulation::random_ledger::{generate_random_intent, LedgerConfig};

fn main() {
    println!("╔═══════════════════════════════════════════════╗");
    println!("║  debt-settlement: Graph Simplification        ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    let config = LedgerConfig {
        member_count: 8,
        transaction_count: 40,
        seed: Some(2024),
        ..Default::default()
    };
    let mut graph = match generate_random_intent(&config).to_graph() {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    let before = graph.net_balances();
    println!(
        "Before: {} debts totalling {}\n",
        graph.edge_count(),
        graph.gross_total()
    );

    let payments = match SettlementOptimizer::default().simplify(&mut graph) {
        Ok(payments) => payments,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    println!(
        "After:  {} debts totalling {}\n",
        graph.edge_count(),
        graph.gross_total()
    );
    for payment in &payments {
        println!("  {}", payment);
    }

    let after = graph.net_balances();
    println!("\n━━━ Net Positions ━━━\n");
    for (name, amount) in before.iter() {
        let settled = after.get(name).unwrap_or_default();
        let status = if settled == amount { "UNCHANGED" } else { "DRIFT" };
        println!("  {:<12} {:>10} → {:>10}  [{}]", name, amount, settled, status);
    }
}
