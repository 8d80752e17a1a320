//! Persistence form of a [`DebtGraph`](crate::graph::debt_graph::DebtGraph).
//!
//! ```json
//! {
//!   "nodes": [{ "id": 0, "name": "A" }, { "id": 1, "name": "B" }],
//!   "matrix": [["0", "0"], ["15", "0"]]
//! }
//! ```
//!
//! `matrix[i][j]` is the amount member `j` owes member `i`.

use crate::core::member::Member;
use crate::error::{DocumentError, GraphError};
use log::info;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Member list and matrix aligned to member ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Member>,
    pub matrix: Vec<Vec<Decimal>>,
}

impl GraphSnapshot {
    /// Check ids are sequential, names unique, and the matrix square,
    /// aligned to the member list and free of negative cells.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut seen = HashSet::new();
        for (position, node) in self.nodes.iter().enumerate() {
            if node.id() != position {
                return Err(GraphError::MalformedSnapshot(format!(
                    "member '{}' has id {} at position {}",
                    node.name(),
                    node.id(),
                    position
                )));
            }
            if !seen.insert(node.name()) {
                return Err(GraphError::MalformedSnapshot(format!(
                    "duplicate member '{}'",
                    node.name()
                )));
            }
        }

        let n = self.nodes.len();
        if self.matrix.len() != n {
            return Err(GraphError::MalformedSnapshot(format!(
                "matrix has {} rows for {} members",
                self.matrix.len(),
                n
            )));
        }
        for (i, row) in self.matrix.iter().enumerate() {
            if row.len() != n {
                return Err(GraphError::MalformedSnapshot(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            if let Some(amount) = row.iter().find(|a| **a < Decimal::ZERO) {
                return Err(GraphError::MalformedSnapshot(format!(
                    "row {} holds negative amount {}",
                    i, amount
                )));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the snapshot as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        info!(
            "saved graph with {} members to {}",
            self.nodes.len(),
            path.display()
        );
        Ok(())
    }

    /// Read a snapshot written by [`GraphSnapshot::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let snapshot = Self::from_json(&fs::read_to_string(path)?)?;
        info!(
            "loaded graph with {} members from {}",
            snapshot.nodes.len(),
            path.display()
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn two_members() -> GraphSnapshot {
        GraphSnapshot {
            nodes: vec![Member::new(0, "A"), Member::new(1, "B")],
            matrix: vec![vec![dec!(0), dec!(0)], vec![dec!(15), dec!(0)]],
        }
    }

    #[test]
    fn test_valid_snapshot() {
        assert!(two_members().validate().is_ok());
    }

    #[test]
    fn test_snapshot_json_shape() {
        let json = two_members().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["nodes"][1]["name"], "B");
        assert_eq!(value["nodes"][1]["id"], 1);
        assert_eq!(value["matrix"][1][0], "15");
    }

    #[test]
    fn test_snapshot_accepts_numeric_cells() {
        let json = r#"{"nodes":[{"id":0,"name":"A"}],"matrix":[[2.5]]}"#;
        let snapshot = GraphSnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.matrix[0][0], dec!(2.5));
    }

    #[test]
    fn test_rejects_out_of_order_ids() {
        let mut snapshot = two_members();
        snapshot.nodes[1] = Member::new(5, "B");
        assert!(matches!(
            snapshot.validate(),
            Err(GraphError::MalformedSnapshot(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let mut snapshot = two_members();
        snapshot.nodes[1] = Member::new(1, "A");
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_rejects_ragged_matrix() {
        let mut snapshot = two_members();
        snapshot.matrix[0].pop();
        assert!(snapshot.validate().is_err());

        let mut snapshot = two_members();
        snapshot.matrix.pop();
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_cell() {
        let mut snapshot = two_members();
        snapshot.matrix[0][1] = dec!(-1);
        assert!(snapshot.validate().is_err());
    }
}
