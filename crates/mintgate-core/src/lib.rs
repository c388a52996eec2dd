//! # mintgate-core — Foundational Types for the Mintgate Drop Engine
//!
//! This crate is the bedrock of the Mintgate workspace. It defines the
//! type-system primitives every other crate builds on; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `Address`, `TokenId`,
//!    `Wei` — all newtypes with validated constructors. No bare strings
//!    for identities, no bare integers for money.
//!
//! 2. **Single `SalePhase` enum.** One definition, four variants,
//!    exhaustive `match` everywhere. The phase gating every mint entry
//!    point is this type, not a string.
//!
//! 3. **Checked arithmetic on amounts.** `Wei` exposes only overflow-checked
//!    operations; there is no path to a silently wrapped payment total.
//!
//! 4. **UTC-only timestamps.** `Timestamp` enforces UTC with seconds
//!    precision for audit records.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `mintgate-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod amount;
pub mod error;
pub mod identity;
pub mod phase;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use amount::Wei;
pub use error::CoreError;
pub use identity::{Address, TokenId};
pub use phase::SalePhase;
pub use temporal::Timestamp;
