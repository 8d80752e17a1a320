use crate::core::balance::Balances;
use crate::core::config::DEFAULT_PRECISION;
use crate::core::member::Member;
use crate::core::payment::SettlementPayment;
use crate::error::GraphError;
use crate::graph::snapshot::GraphSnapshot;
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// A directed graph of accumulated debts between members.
///
/// Edges are stored in a square matrix indexed by member id. Cell
/// `matrix[creditor][debtor]` holds the total amount `debtor` owes
/// `creditor`, so a row sums to a member's receivables and a column to its
/// payables. The matrix grows by one row and one column per registered
/// member and is never shrunk.
///
/// # Examples
///
/// ```
/// use debt_settlement::graph::debt_graph::DebtGraph;
/// use rust_decimal_macros::dec;
///
/// let mut graph = DebtGraph::new();
/// graph.register_member("A");
/// graph.register_member("B");
///
/// graph.add_debt("A", "B", dec!(40)).unwrap();
/// graph.add_debt("B", "A", dec!(-10)).unwrap();
///
/// assert_eq!(graph.owed("B", "A").unwrap(), dec!(50));
///
/// let balances = graph.net_balances();
/// assert_eq!(balances.get("A"), Some(dec!(-50)));
/// assert_eq!(balances.get("B"), Some(dec!(50)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DebtGraph {
    /// Members in registration order; `members[i].id() == i`.
    members: Vec<Member>,
    /// name -> member id
    index: HashMap<String, usize>,
    /// matrix[creditor][debtor] -> accumulated amount owed
    matrix: Vec<Vec<Decimal>>,
}

impl DebtGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a member, returning its id.
    ///
    /// Registering a name that already exists is a no-op and returns the
    /// existing id.
    pub fn register_member(&mut self, name: impl Into<String>) -> usize {
        let name = name.into();
        if let Some(&id) = self.index.get(&name) {
            return id;
        }

        let id = self.members.len();
        for row in &mut self.matrix {
            row.push(Decimal::ZERO);
        }
        self.matrix.push(vec![Decimal::ZERO; id + 1]);
        self.index.insert(name.clone(), id);
        self.members.push(Member::new(id, name));
        id
    }

    /// Look up the id of a registered member.
    pub fn resolve_member(&self, name: &str) -> Result<usize, GraphError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::MemberNotFound(name.to_string()))
    }

    /// Record that `payer` owes `payee` the given `amount`.
    ///
    /// A negative amount records the debt in the opposite direction:
    /// `add_debt(a, b, -x)` is the same as `add_debt(b, a, x)`.
    /// Nothing is changed if either member is unknown.
    pub fn add_debt(&mut self, payer: &str, payee: &str, amount: Decimal) -> Result<(), GraphError> {
        let (creditor, debtor, amount) = self.orient(payer, payee, amount)?;
        self.matrix[creditor][debtor] += amount;
        Ok(())
    }

    /// Resolve an edge into `(creditor_id, debtor_id, non-negative amount)`.
    fn orient(
        &self,
        payer: &str,
        payee: &str,
        amount: Decimal,
    ) -> Result<(usize, usize, Decimal), GraphError> {
        let debtor = self.resolve_member(payer)?;
        let creditor = self.resolve_member(payee)?;
        if amount < Decimal::ZERO {
            Ok((debtor, creditor, -amount))
        } else {
            Ok((creditor, debtor, amount))
        }
    }

    /// Net balance of every member: receivables minus payables,
    /// rounded to two decimal places.
    ///
    /// Every registered member gets an entry, including settled ones.
    pub fn net_balances(&self) -> Balances {
        self.net_balances_at(DEFAULT_PRECISION)
    }

    /// Net balances rounded to `precision` decimal places.
    pub fn net_balances_at(&self, precision: u32) -> Balances {
        self.members
            .iter()
            .map(|member| {
                let id = member.id();
                let receivable: Decimal = self.matrix[id].iter().sum();
                let payable: Decimal = self.matrix.iter().map(|row| row[id]).sum();
                (
                    member.name().to_string(),
                    (receivable - payable).round_dp(precision),
                )
            })
            .collect()
    }

    /// Replace every edge with the given payments.
    ///
    /// The member set is unchanged. The new matrix is built on the side and
    /// swapped in only once every payment resolved, so on error the graph
    /// keeps its previous edges.
    pub fn replace_with(&mut self, payments: &[SettlementPayment]) -> Result<(), GraphError> {
        let n = self.members.len();
        let mut matrix = vec![vec![Decimal::ZERO; n]; n];
        for payment in payments {
            let (creditor, debtor, amount) =
                self.orient(payment.from(), payment.to(), payment.amount())?;
            matrix[creditor][debtor] += amount;
        }

        debug!(
            "replacing {} edges with {} payments",
            self.edge_count(),
            payments.len()
        );
        self.matrix = matrix;
        Ok(())
    }

    /// Copy of the member list and matrix for persistence.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.members.clone(),
            matrix: self.matrix.clone(),
        }
    }

    /// Rebuild a graph from a persisted snapshot.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Result<Self, GraphError> {
        snapshot.validate()?;
        let index = snapshot
            .nodes
            .iter()
            .map(|m| (m.name().to_string(), m.id()))
            .collect();
        Ok(Self {
            members: snapshot.nodes,
            index,
            matrix: snapshot.matrix,
        })
    }

    /// Accumulated amount `debtor` owes `creditor`.
    pub fn owed(&self, creditor: &str, debtor: &str) -> Result<Decimal, GraphError> {
        let creditor = self.resolve_member(creditor)?;
        let debtor = self.resolve_member(debtor)?;
        Ok(self.matrix[creditor][debtor])
    }

    /// All non-zero edges as `(debtor, creditor, amount)`, row by row.
    pub fn edges(&self) -> Vec<(&str, &str, Decimal)> {
        let mut edges = Vec::new();
        for (creditor, row) in self.matrix.iter().enumerate() {
            for (debtor, &amount) in row.iter().enumerate() {
                if amount != Decimal::ZERO {
                    edges.push((
                        self.members[debtor].name(),
                        self.members[creditor].name(),
                        amount,
                    ));
                }
            }
        }
        edges
    }

    /// Number of non-zero cells in the matrix.
    pub fn edge_count(&self) -> usize {
        self.matrix
            .iter()
            .flatten()
            .filter(|amount| **amount != Decimal::ZERO)
            .count()
    }

    /// Sum of every accumulated debt.
    pub fn gross_total(&self) -> Decimal {
        self.matrix.iter().flatten().sum()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
