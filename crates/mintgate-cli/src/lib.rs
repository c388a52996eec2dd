//! # mintgate-cli — Drop Operator Tooling
//!
//! Offline companions to the mint engine. The engine only ever holds a
//! 32-byte allowlist root; this tool is how that root (and the per-minter
//! proofs distributed alongside it) get produced from a plain list of
//! addresses.

pub mod allowlist;
