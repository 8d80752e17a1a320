use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Net position of every member, in member registration order.
///
/// A positive balance means the member is owed (net creditor).
/// A negative balance means the member owes (net debtor).
///
/// Produced by [`DebtGraph::net_balances`] and consumed by the settlement
/// optimizer. It can also be built directly from `(name, amount)` pairs.
///
/// [`DebtGraph::net_balances`]: crate::graph::debt_graph::DebtGraph::net_balances
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balances {
    /// name -> net balance, serialized as a JSON object in entry order
    #[serde(with = "entries_serde")]
    entries: Vec<(String, Decimal)>,
}

mod entries_serde {
    use rust_decimal::Decimal;
    use serde::de::{Error, MapAccess, Visitor};
    use serde::ser::SerializeMap;

    pub fn serialize<S: serde::Serializer>(
        entries: &[(String, Decimal)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (name, amount) in entries {
            map.serialize_entry(name, amount)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, Decimal)>, D::Error> {
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = Vec<(String, Decimal)>;
            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of member name to balance")
            }
            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
                let mut entries: Vec<(String, Decimal)> = Vec::new();
                while let Some((name, amount)) = access.next_entry::<String, Decimal>()? {
                    if entries.iter().any(|(n, _)| *n == name) {
                        return Err(M::Error::custom(format!("duplicate member '{}'", name)));
                    }
                    entries.push((name, amount));
                }
                Ok(entries)
            }
        }
        deserializer.deserialize_map(V)
    }
}

impl Balances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a member's balance, appending the member if it is new.
    pub fn set(&mut self, name: impl Into<String>, amount: Decimal) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = amount,
            None => self.entries.push((name, amount)),
        }
    }

    /// Balance of a member, or `None` if the member is not listed.
    pub fn get(&self, name: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, amount)| *amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), *a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all balances. Zero for any balance set derived from a graph.
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|(_, a)| *a).sum()
    }

    /// True when the balances sum to zero within `epsilon`.
    pub fn is_balanced(&self, epsilon: Decimal) -> bool {
        self.total().abs() <= epsilon
    }

    /// Members whose balance is below `-epsilon`.
    pub fn debtors(&self, epsilon: Decimal) -> impl Iterator<Item = (&str, Decimal)> {
        self.iter().filter(move |(_, a)| *a < -epsilon)
    }

    /// Members whose balance is above `epsilon`.
    pub fn creditors(&self, epsilon: Decimal) -> impl Iterator<Item = (&str, Decimal)> {
        self.iter().filter(move |(_, a)| *a > epsilon)
    }

    /// Total amount owed to creditors (sum of positive balances).
    /// This is the least money that has to move to settle everyone.
    pub fn total_owed(&self) -> Decimal {
        self.entries
            .iter()
            .map(|(_, a)| *a)
            .filter(|a| *a > Decimal::ZERO)
            .sum()
    }

    /// Balances keyed by name.
    pub fn to_map(&self) -> HashMap<String, Decimal> {
        self.entries.iter().cloned().collect()
    }
}

impl FromIterator<(String, Decimal)> for Balances {
    fn from_iter<T: IntoIterator<Item = (String, Decimal)>>(iter: T) -> Self {
        let mut balances = Balances::new();
        for (name, amount) in iter {
            balances.set(name, amount);
        }
        balances
    }
}

impl<'a> FromIterator<(&'a str, Decimal)> for Balances {
    fn from_iter<T: IntoIterator<Item = (&'a str, Decimal)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(name, amount)| (name.to_string(), amount))
            .collect()
    }
}

impl fmt::Display for Balances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Net Balances ===")?;
        for (name, amount) in &self.entries {
            let status = if *amount > Decimal::ZERO {
                "CREDITOR"
            } else if *amount < Decimal::ZERO {
                "DEBTOR"
            } else {
                "SETTLED"
            };
            writeln!(f, "  {:<15} {:>12}  [{}]", name, amount, status)?;
        }
        Ok(())
    }
}
