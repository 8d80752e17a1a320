//! Intent documents: the members of a group and the expenses they shared.
//!
//! ```json
//! {
//!   "members": ["A", "B", "C"],
//!   "transactions": [
//!     { "from": "A", "to": ["B", "C"], "amount": 30 },
//!     { "from": "B", "to": "C", "amount": "10" }
//!   ]
//! }
//! ```
//!
//! Each transaction means `from` owes every member in `to` an equal share
//! of `amount`.

use crate::error::{DocumentError, GraphError};
use crate::graph::debt_graph::DebtGraph;
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::slice;

/// One payee or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payees {
    One(String),
    Many(Vec<String>),
}

impl Payees {
    pub fn names(&self) -> &[String] {
        match self {
            Payees::One(name) => slice::from_ref(name),
            Payees::Many(names) => names,
        }
    }
}

impl From<&str> for Payees {
    fn from(name: &str) -> Self {
        Payees::One(name.to_string())
    }
}

impl From<Vec<&str>> for Payees {
    fn from(names: Vec<&str>) -> Self {
        Payees::Many(names.into_iter().map(String::from).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(alias = "payer")]
    pub from: String,
    #[serde(alias = "payees")]
    pub to: Payees,
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(from: impl Into<String>, to: impl Into<Payees>, amount: Decimal) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }

    /// The amount each payee is owed, or `None` when there are no payees.
    pub fn share(&self) -> Option<Decimal> {
        match self.to.names().len() {
            0 => None,
            n => Some(self.amount / Decimal::from(n)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default, alias = "transaction")]
    pub transactions: Vec<Transaction>,
}

impl Intent {
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Register every member, then record each transaction as debts.
    ///
    /// Transactions may only reference listed (or previously registered)
    /// members. Edges recorded before an unknown name is hit are kept.
    pub fn apply(&self, graph: &mut DebtGraph) -> Result<(), GraphError> {
        for member in &self.members {
            graph.register_member(member.as_str());
        }

        for txn in &self.transactions {
            let Some(share) = txn.share() else {
                warn!("skipping transaction from '{}' with no payees", txn.from);
                continue;
            };
            for payee in txn.to.names() {
                graph.add_debt(&txn.from, payee, share)?;
            }
        }

        debug!(
            "applied {} transactions across {} members",
            self.transactions.len(),
            graph.member_count()
        );
        Ok(())
    }

    /// Build a fresh graph from this intent.
    pub fn to_graph(&self) -> Result<DebtGraph, GraphError> {
        let mut graph = DebtGraph::new();
        self.apply(&mut graph)?;
        Ok(graph)
    }
}
