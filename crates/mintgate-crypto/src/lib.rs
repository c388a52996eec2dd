//! # mintgate-crypto — Allowlist Commitment Scheme
//!
//! Implements the cryptographic membership check for allowlisted sale
//! phases:
//!
//! - **Domain-separated SHA-256** Merkle hashing — leaf and interior nodes
//!   use distinct one-byte tags so a leaf digest can never be replayed as
//!   an interior node.
//! - **`AllowlistRoot`** — the committed digest of an eligible-address set.
//! - **`MembershipProof`** + stateless [`verify`] — the per-request check.
//! - **`AllowlistTree`** — builds a commitment over an address set and
//!   emits proofs; used by drop operators and tests.
//!
//! ## Crate Policy
//!
//! - No mocking of cryptographic operations in tests — all tests use real
//!   SHA-256 over real addresses.
//! - Verification is pure and stateless; it is re-run on every request
//!   because commitments can be replaced between calls.

pub mod allowlist;
pub mod digest;

pub use allowlist::{leaf_hash, node_hash, verify, AllowlistError, AllowlistTree, MembershipProof};
pub use digest::{AllowlistRoot, Digest};
