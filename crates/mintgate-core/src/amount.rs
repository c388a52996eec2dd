//! # Wei Amounts — Checked Money Arithmetic
//!
//! `Wei` is the single money type of the drop engine: prices, attached
//! payments, and payment totals are all `Wei`. The only multiplication
//! exposed is overflow-checked, so a payment total can never silently wrap.

use serde::{Deserialize, Serialize};

/// An amount of wei (10⁻¹⁸ ether).
///
/// `u128` comfortably holds any realistic payment: the full ether supply
/// is on the order of 10²⁶ wei.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Wei(pub u128);

impl Wei {
    /// Zero wei.
    pub const ZERO: Wei = Wei(0);

    /// Construct from a raw wei count.
    pub const fn from_wei(wei: u128) -> Self {
        Self(wei)
    }

    /// Construct from whole milliether (10⁻³ ether). Drop prices are
    /// quoted in milliether increments (e.g. 0.07 ether = 70 milliether).
    pub const fn from_milliether(milli: u64) -> Self {
        Self(milli as u128 * 1_000_000_000_000_000)
    }

    /// The raw wei count.
    pub const fn as_wei(&self) -> u128 {
        self.0
    }

    /// Overflow-checked multiplication by a quantity.
    ///
    /// Returns `None` on overflow. Callers treat overflow as an invalid
    /// request, never as a wrapped total.
    pub fn checked_mul(self, quantity: u64) -> Option<Wei> {
        self.0.checked_mul(quantity as u128).map(Wei)
    }

    /// Overflow-checked addition.
    pub fn checked_add(self, other: Wei) -> Option<Wei> {
        self.0.checked_add(other.0).map(Wei)
    }
}

impl std::fmt::Display for Wei {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} wei", self.0)
    }
}
