//! # mintgate-ledger — Phase Control and Supply Accounting
//!
//! The shared mutable state of a drop, split into two pieces:
//!
//! - **`PhaseController`** (`phase.rs`): the single globally active
//!   [`SalePhase`](mintgate_core::SalePhase), mutated only by the admin
//!   transition operation, with a timestamped transition log.
//!
//! - **`SupplyLedger`** (`supply.rs`): total issued, total gifted, and
//!   per-`(Address, SalePhase)` mint counts, enforcing every capacity
//!   invariant with check-then-commit operations that either fully apply
//!   or leave the ledger untouched.
//!
//! ## Design
//!
//! Counters are monotonic — there is no decrement, rollback, or "return
//! to pool" operation. All three pools (public, allowlist, gift) draw
//! sequential ids from one counter, so issued ids are always the
//! contiguous run `1..=total_issued` with no gaps or reuse.
//!
//! Neither type performs its own locking: the orchestrator serializes
//! access around the whole check-then-commit sequence.

pub mod phase;
pub mod supply;

pub use phase::{PhaseController, PhaseError, PhaseTransitionRecord};
pub use supply::{
    LedgerSnapshot, PhaseCountEntry, PhaseKey, SupplyCaps, SupplyError, SupplyLedger,
};
