//! Settlement tolerances.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Balances and residuals with magnitude at or below this are settled.
pub const DEFAULT_EPSILON: Decimal = dec!(0.01);

/// Decimal places kept when balances and payments are finalized.
pub const DEFAULT_PRECISION: u32 = 2;

/// Largest scale a `Decimal` can carry.
const MAX_PRECISION: u32 = 27;

/// Tuning for the settlement optimizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementConfig {
    /// Tolerance below which a balance or residual counts as zero.
    pub epsilon: Decimal,
    /// Decimal places for balances and emitted payment amounts.
    pub precision: u32,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl SettlementConfig {
    pub fn with_epsilon(mut self, epsilon: Decimal) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Half of the smallest unit at `precision`: the most a single
    /// rounded amount can drift from its exact value.
    pub fn half_unit(&self) -> Decimal {
        Decimal::new(5, self.precision.min(MAX_PRECISION) + 1)
    }

    /// Check the configuration is usable.
    ///
    /// Epsilon must be at least half a unit at `precision`, otherwise a
    /// transfer above epsilon could round to nothing.
    pub fn validate(&self) -> Result<(), String> {
        if self.precision > MAX_PRECISION {
            return Err(format!(
                "precision must be at most {}, got {}",
                MAX_PRECISION, self.precision
            ));
        }
        if self.epsilon < Decimal::ZERO {
            return Err(format!("epsilon must not be negative, got {}", self.epsilon));
        }
        if self.epsilon < self.half_unit() {
            return Err(format!(
                "epsilon {} is below half a unit ({}) at precision {}",
                self.epsilon,
                self.half_unit(),
                self.precision
            ));
        }
        Ok(())
    }
}
