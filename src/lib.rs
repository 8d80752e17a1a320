//! # debt-settlement
//!
//! Shared-expense debt graph with settlement minimization.
//!
//! Members record who owes whom; the engine computes each member's net
//! balance and reduces the web of debts to a short list of payments that
//! settles everyone.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: members, balances, payments, configuration
//! - **graph** — Debt matrix over members and its persisted snapshot form
//! - **optimization** — Greedy settlement and simplification summary
//! - **intent** — JSON documents describing members and shared expenses
//! - **simulation** — Random ledgers for benchmarks and manual testing

pub mod core;
pub mod error;
pub mod graph;
pub mod intent;
pub mod optimization;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::balance::Balances;
    pub use crate::core::config::SettlementConfig;
    pub use crate::core::member::Member;
    pub use crate::core::payment::SettlementPayment;
    pub use crate::error::{DocumentError, GraphError};
    pub use crate::graph::debt_graph::DebtGraph;
    pub use crate::graph::snapshot::GraphSnapshot;
    pub use crate::intent::{Intent, Payees, Transaction};
    pub use crate::optimization::settlement::SettlementOptimizer;
    pub use crate::optimization::summary::SettlementSummary;
}
