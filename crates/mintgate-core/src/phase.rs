//! # Sale Phase — The Global Sale Mode
//!
//! `SalePhase` is the single globally active sale mode gating which mint
//! entry point is currently callable. Exactly one phase is active at a
//! time; the admin transition operation in `mintgate-ledger` is the only
//! mutation path.
//!
//! The enum lives in `mintgate-core` because it doubles as a component of
//! the per-identity mint-count key: per-phase caps are tracked per
//! `(Address, SalePhase)` pair.

use serde::{Deserialize, Serialize};

/// The globally active sale mode.
///
/// Transitions are admin-triggered, unconditional, and total — any phase
/// is reachable from any other, and there is no terminal phase. A drop
/// starts `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SalePhase {
    /// Open public sale at the public price.
    Public,
    /// First allowlisted pre-sale; membership proven against the primary
    /// commitment, charged at the public price.
    PrimaryAllowlist,
    /// Second allowlisted pre-sale; membership proven against the secondary
    /// commitment, charged at the secondary price.
    SecondaryAllowlist,
    /// No minting entry point is callable.
    Closed,
}

impl SalePhase {
    /// All phases, in declaration order.
    pub const ALL: [SalePhase; 4] = [
        SalePhase::Public,
        SalePhase::PrimaryAllowlist,
        SalePhase::SecondaryAllowlist,
        SalePhase::Closed,
    ];

    /// Whether minting in this phase requires a membership proof.
    pub fn is_allowlisted(&self) -> bool {
        matches!(self, Self::PrimaryAllowlist | Self::SecondaryAllowlist)
    }

    /// Whether any mint entry point is callable in this phase.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

impl std::fmt::Display for SalePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Public => "PUBLIC",
            Self::PrimaryAllowlist => "PRIMARY_ALLOWLIST",
            Self::SecondaryAllowlist => "SECONDARY_ALLOWLIST",
            Self::Closed => "CLOSED",
        };
        f.write_str(s)
    }
}
