use serde::{Deserialize, Serialize};
use std::fmt;

/// A named participant in the shared-expense ledger.
///
/// The `id` is the member's row/column index in the debt matrix. It is
/// assigned in first-registration order and never reused or renumbered.
///
/// # Examples
///
/// ```
/// use debt_settlement::core::member::Member;
///
/// let alice = Member::new(0, "alice");
/// assert_eq!(alice.id(), 0);
/// assert_eq!(alice.name(), "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    id: usize,
    name: String,
}

impl Member {
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Index of this member in the debt matrix.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
