//! # Supply Ledger
//!
//! Tracks total issued, total gifted, and per-`(Address, SalePhase)` mint
//! counts for a fixed-size drop, and enforces every capacity invariant.
//!
//! ## Invariants (hold after every operation)
//!
//! - `total_issued ≤ max_total − max_gifted + total_gifted` — the gift
//!   pool is carved out of total supply and only released into the
//!   public/allowlist pools as gifts are actually consumed.
//! - `total_gifted ≤ max_gifted`.
//! - every per-phase count `≤ max_per_phase`.
//!
//! ## Edge policy
//!
//! Ids are assigned strictly in increasing sequential order with no gaps
//! and no reuse, even across the public/allowlist/gift pools — all three
//! pools draw from one monotonic counter. A failed reservation leaves
//! every counter exactly as it was.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use mintgate_core::{Address, SalePhase, TokenId};

/// Errors raised by ledger reservations. Each one is terminal for the
/// surrounding request; the ledger is unchanged when they are returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SupplyError {
    /// The reservation would exceed the pool available to minting.
    #[error("supply exceeded: requested {requested}, {available} available")]
    SupplyExceeded {
        /// Quantity requested.
        requested: u64,
        /// Items still available to this pool.
        available: u64,
    },

    /// The reservation would push a minter past the per-phase cap.
    #[error(
        "phase cap exceeded: {minter} has minted {minted} in {phase}, \
         requested {requested} more (cap {cap})"
    )]
    PhaseCapExceeded {
        /// The requesting minter.
        minter: Address,
        /// The phase being minted in.
        phase: SalePhase,
        /// Items already minted by this minter in this phase.
        minted: u64,
        /// Quantity requested.
        requested: u64,
        /// The per-phase cap.
        cap: u64,
    },

    /// The gift would exceed the reserved gift pool.
    #[error("gift cap exceeded: requested {requested}, {available} gifts remain")]
    GiftCapExceeded {
        /// Quantity requested.
        requested: u64,
        /// Gifts still available.
        available: u64,
    },
}

/// The capacity configuration of a drop.
///
/// `max_gifted` must not exceed `max_total`; the gift pool is a reserved
/// sub-allocation of total supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyCaps {
    /// Total number of items that will ever exist.
    pub max_total: u64,
    /// Sub-allocation reserved for admin gifting.
    pub max_gifted: u64,
    /// Maximum items one identity may mint within one phase.
    pub max_per_phase: u64,
}

impl Default for SupplyCaps {
    fn default() -> Self {
        Self {
            max_total: 9999,
            max_gifted: 666,
            max_per_phase: 3,
        }
    }
}

/// Composite lookup key for per-phase mint counts.
///
/// An explicit key type, not a formatted string — distinct
/// (identity, phase) pairs can never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PhaseKey {
    /// The minting identity.
    pub minter: Address,
    /// The phase the mint was performed in.
    pub phase: SalePhase,
}

/// One `(identity, phase)` count, as exported in a [`LedgerSnapshot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseCountEntry {
    /// The minting identity.
    pub minter: Address,
    /// The phase.
    pub phase: SalePhase,
    /// Items minted by `minter` in `phase`.
    pub count: u64,
}

/// Serializable export of the ledger counters, for audit and reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Total items issued across all pools.
    pub total_issued: u64,
    /// Total items drawn from the gift pool.
    pub total_gifted: u64,
    /// Per-identity per-phase counts, in key order.
    pub phase_counts: Vec<PhaseCountEntry>,
}

/// The process-wide supply counters.
///
/// Counters start at zero and only increase. Both reservation operations
/// are check-then-commit: every precondition is validated before the
/// first counter moves, so a failure can never leave a partial update.
#[derive(Debug, Clone)]
pub struct SupplyLedger {
    caps: SupplyCaps,
    total_issued: u64,
    total_gifted: u64,
    phase_counts: BTreeMap<PhaseKey, u64>,
}

impl SupplyLedger {
    /// Create an empty ledger under the given caps.
    pub fn new(caps: SupplyCaps) -> Self {
        Self {
            caps,
            total_issued: 0,
            total_gifted: 0,
            phase_counts: BTreeMap::new(),
        }
    }

    /// The capacity configuration.
    pub fn caps(&self) -> &SupplyCaps {
        &self.caps
    }

    /// Total items issued across all pools.
    pub fn total_issued(&self) -> u64 {
        self.total_issued
    }

    /// Total items drawn from the gift pool.
    pub fn total_gifted(&self) -> u64 {
        self.total_gifted
    }

    /// Items minted by `minter` in `phase` so far.
    pub fn phase_count(&self, minter: &Address, phase: SalePhase) -> u64 {
        self.phase_counts
            .get(&PhaseKey {
                minter: *minter,
                phase,
            })
            .copied()
            .unwrap_or(0)
    }

    /// The highest id issued so far, or `None` before the first mint.
    pub fn last_issued_id(&self) -> Option<TokenId> {
        (self.total_issued > 0).then(|| TokenId(self.total_issued))
    }

    /// The supply ceiling currently visible to paid minting: total supply
    /// minus the still-unconsumed remainder of the gift pool.
    fn minting_limit(&self) -> u64 {
        let unconsumed_gifts = self.caps.max_gifted.saturating_sub(self.total_gifted);
        self.caps.max_total.saturating_sub(unconsumed_gifts)
    }

    /// Reserve `quantity` items for a paid mint by `minter` in `phase`.
    ///
    /// On success both `total_issued` and the `(minter, phase)` count are
    /// incremented and the newly assigned sequential ids are returned
    /// (first id = prior `total_issued` + 1).
    ///
    /// # Errors
    ///
    /// - [`SupplyError::SupplyExceeded`] if the paid pool cannot cover
    ///   the quantity.
    /// - [`SupplyError::PhaseCapExceeded`] if the minter would pass the
    ///   per-phase cap.
    pub fn reserve_issuance(
        &mut self,
        minter: &Address,
        phase: SalePhase,
        quantity: u64,
    ) -> Result<Vec<TokenId>, SupplyError> {
        let limit = self.minting_limit();
        let new_total = self
            .total_issued
            .checked_add(quantity)
            .filter(|t| *t <= limit)
            .ok_or(SupplyError::SupplyExceeded {
                requested: quantity,
                available: limit - self.total_issued,
            })?;

        let key = PhaseKey {
            minter: *minter,
            phase,
        };
        let minted = self.phase_counts.get(&key).copied().unwrap_or(0);
        let new_count = minted
            .checked_add(quantity)
            .filter(|c| *c <= self.caps.max_per_phase)
            .ok_or(SupplyError::PhaseCapExceeded {
                minter: *minter,
                phase,
                minted,
                requested: quantity,
                cap: self.caps.max_per_phase,
            })?;

        // All checks passed: commit.
        let ids = self.assign_ids(quantity);
        self.total_issued = new_total;
        self.phase_counts.insert(key, new_count);
        Ok(ids)
    }

    /// Reserve `quantity` items from the gift pool.
    ///
    /// Gifting does not consume a per-identity phase cap — it is an
    /// admin-only path with admin-chosen recipients.
    ///
    /// # Errors
    ///
    /// - [`SupplyError::GiftCapExceeded`] if the gift pool cannot cover
    ///   the quantity.
    /// - [`SupplyError::SupplyExceeded`] if total supply cannot.
    pub fn reserve_gift(&mut self, quantity: u64) -> Result<Vec<TokenId>, SupplyError> {
        let new_gifted = self
            .total_gifted
            .checked_add(quantity)
            .filter(|g| *g <= self.caps.max_gifted)
            .ok_or(SupplyError::GiftCapExceeded {
                requested: quantity,
                available: self.caps.max_gifted - self.total_gifted,
            })?;

        let new_total = self
            .total_issued
            .checked_add(quantity)
            .filter(|t| *t <= self.caps.max_total)
            .ok_or(SupplyError::SupplyExceeded {
                requested: quantity,
                available: self.caps.max_total - self.total_issued,
            })?;

        let ids = self.assign_ids(quantity);
        self.total_gifted = new_gifted;
        self.total_issued = new_total;
        Ok(ids)
    }

    /// Export the counters for audit.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            total_issued: self.total_issued,
            total_gifted: self.total_gifted,
            phase_counts: self
                .phase_counts
                .iter()
                .map(|(key, count)| PhaseCountEntry {
                    minter: key.minter,
                    phase: key.phase,
                    count: *count,
                })
                .collect(),
        }
    }

    // Ids are 1-based: the first item ever issued is token 1.
    fn assign_ids(&self, quantity: u64) -> Vec<TokenId> {
        (self.total_issued + 1..=self.total_issued + quantity)
            .map(TokenId)
            .collect()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
