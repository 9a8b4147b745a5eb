//! Value objects for the catalog domain.

use serde::{Deserialize, Serialize};

/// Monetary amount represented in cents to avoid floating point issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money {
    /// Amount in cents (e.g., 1000 = R$ 10,00)
    cents: i64,
}

impl Money {
    /// Creates a new Money amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Creates a new Money amount from a whole currency value.
    ///
    /// Returns `None` when the amount does not fit in cents.
    pub fn from_units(units: i64) -> Option<Self> {
        units.checked_mul(100).map(Self::from_cents)
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the whole-unit portion.
    pub fn units(&self) -> i64 {
        self.cents / 100
    }

    /// Returns the cents portion (remainder after units).
    pub fn cents_part(&self) -> i64 {
        self.cents.abs() % 100
    }

    /// Returns true if the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.cents > 0
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cents < 0 {
            write!(f, "-R$ {},{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "R$ {},{:02}", self.units(), self.cents_part())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let money = Money::from_cents(9999);
        assert_eq!(money.cents(), 9999);
        assert_eq!(money.units(), 99);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_money_from_units() {
        let money = Money::from_units(100).unwrap();
        assert_eq!(money.cents(), 10_000);
        assert_eq!(money.cents_part(), 0);
    }

    #[test]
    fn test_money_from_units_rejects_overflow() {
        assert_eq!(Money::from_units(i64::MAX), None);
        assert_eq!(Money::from_units(i64::MIN / 100 - 1), None);
        assert_eq!(
            Money::from_units(i64::MAX / 100).map(|m| m.units()),
            Some(i64::MAX / 100)
        );
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(1234).to_string(), "R$ 12,34");
        assert_eq!(Money::from_cents(5).to_string(), "R$ 0,05");
        assert_eq!(Money::from_cents(-1234).to_string(), "-R$ 12,34");
    }

    #[test]
    fn test_money_positivity() {
        assert!(Money::from_cents(1).is_positive());
        assert!(!Money::zero().is_positive());
        assert!(!Money::from_cents(-100).is_positive());
    }

    #[test]
    fn test_money_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(250)).unwrap();
        assert_eq!(json, "250");
    }
}
