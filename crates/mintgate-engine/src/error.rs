//! # Mint Error Taxonomy
//!
//! Every way a mint request can fail, as one typed enum. All variants are
//! terminal for the current request — nothing is retried internally, and
//! the ledger is left exactly as it was before the request. The caller
//! corrects the request (different phase, exact payment, valid proof,
//! smaller quantity) and resubmits.

use thiserror::Error;

use mintgate_core::{Address, Wei};
use mintgate_ledger::{PhaseError, SupplyError};

use crate::registry::RegistryError;

/// Terminal failures of a mint or admin request.
#[derive(Error, Debug)]
pub enum MintError {
    /// A non-admin identity called an admin operation.
    #[error("unauthorized: {caller} is not the drop admin")]
    Unauthorized {
        /// The rejected caller.
        caller: Address,
    },

    /// The requested sale type does not match the active phase.
    #[error(transparent)]
    Phase(#[from] PhaseError),

    /// The membership proof does not fold to the committed root (or no
    /// commitment is installed for the phase).
    #[error("membership proof invalid against the committed allowlist root")]
    ProofInvalid,

    /// The attached payment is not exactly `price × quantity`.
    #[error("payment mismatch: attached {attached}, expected {expected}")]
    PaymentMismatch {
        /// The payment attached to the request.
        attached: Wei,
        /// The exact total the request required.
        expected: Wei,
    },

    /// The quantity is zero, or `price × quantity` overflows.
    #[error("invalid quantity {quantity}: must be positive and priceable")]
    QuantityInvalid {
        /// The rejected quantity.
        quantity: u64,
    },

    /// A supply, gift, or per-phase capacity invariant would be violated.
    #[error(transparent)]
    Supply(#[from] SupplyError),

    /// A minting entry point was re-entered while a prior request was
    /// still committing.
    #[error("re-entrant mint rejected: another mint operation is in progress")]
    ReentrantCall,

    /// The token-ownership registry rejected an operation.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
