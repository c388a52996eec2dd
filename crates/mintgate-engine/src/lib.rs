//! # mintgate-engine — The Mint Orchestrator
//!
//! Composes the phase controller, allowlist verifier, payment validator,
//! and supply ledger into the five minting entry points of a drop:
//!
//! - `mint_public`, `mint_primary_allowlist`, `mint_secondary_allowlist`
//!   — the paid entry points, each a single atomic check-then-commit step
//!   in the fixed order phase → proof → payment → ledger → materialize.
//! - `reserve_for_gifting`, `gift_to_addresses` — admin-only gift paths
//!   that skip phase/proof/payment checks entirely.
//!
//! Any failed check aborts the whole request with no ledger mutation and
//! no materialized items.
//!
//! ## Concurrency model
//!
//! Each request executes as one indivisible step against the engine;
//! callers needing cross-thread access wrap the engine in a `Mutex`.
//! Independently of that, the engine holds an explicit in-flight flag so
//! that recipient callback code running inside
//! [`TokenRegistry::materialize`] can never re-enter a minting entry
//! point and observe a half-committed ledger.

pub mod config;
pub mod engine;
pub mod error;
pub mod payment;
pub mod registry;

pub use config::DropConfig;
pub use engine::{GiftRecord, MintEngine};
pub use error::MintError;
pub use registry::{InMemoryRegistry, RegistryError, TokenRegistry};
