//! # Token Registry Collaborator
//!
//! The external token-ownership registry records which identity owns
//! which sequential item id; transfers and approvals live entirely on
//! its side. The engine only requires two things of it:
//!
//! - `materialize` must succeed exactly once per id, and ids are
//!   presented in the order returned by the ledger;
//! - `owner_of` reports the recorded owner, or fails for an id that was
//!   never materialized.
//!
//! `InMemoryRegistry` is the reference implementation backing tests and
//! local tooling. It enforces the exactly-once contract hard.

use std::collections::BTreeMap;

use thiserror::Error;

use mintgate_core::{Address, TokenId};

/// Errors from the token-ownership registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// An id was presented for materialization twice.
    #[error("{0} has already been materialized")]
    AlreadyMaterialized(TokenId),

    /// An id that was never materialized was looked up.
    #[error("{0} does not exist")]
    NonexistentItem(TokenId),
}

/// The token-ownership registry interface.
pub trait TokenRegistry {
    /// Record `id` as owned by `recipient`.
    ///
    /// Called exactly once per id, in ascending id order.
    fn materialize(&mut self, recipient: &Address, id: TokenId) -> Result<(), RegistryError>;

    /// The recorded owner of `id`.
    fn owner_of(&self, id: TokenId) -> Result<Address, RegistryError>;
}

/// A registry keeping ownership in a `BTreeMap`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    owners: BTreeMap<TokenId, Address>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of materialized items.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Whether no items have been materialized.
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// All ids owned by `owner`, in ascending order.
    pub fn items_of(&self, owner: &Address) -> Vec<TokenId> {
        self.owners
            .iter()
            .filter(|(_, o)| *o == owner)
            .map(|(id, _)| *id)
            .collect()
    }
}

impl TokenRegistry for InMemoryRegistry {
    fn materialize(&mut self, recipient: &Address, id: TokenId) -> Result<(), RegistryError> {
        if self.owners.contains_key(&id) {
            return Err(RegistryError::AlreadyMaterialized(id));
        }
        self.owners.insert(id, *recipient);
        Ok(())
    }

    fn owner_of(&self, id: TokenId) -> Result<Address, RegistryError> {
        self.owners
            .get(&id)
            .copied()
            .ok_or(RegistryError::NonexistentItem(id))
    }
}
