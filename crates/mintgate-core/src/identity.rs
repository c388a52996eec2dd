//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the two identifiers in the drop engine: the
//! 20-byte minter/recipient address and the sequential token id.
//! These prevent accidental identifier confusion — you cannot pass a
//! `TokenId` where an `Address` is expected.
//!
//! ## Security Invariant
//!
//! The caller address attached to a mint request is an opaque, unforgeable
//! bearer credential supplied by the transport layer. This crate only
//! validates its shape; it never derives one address from another.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// A 20-byte account address identifying a minter, gift recipient, or admin.
///
/// Constructed from a hex string (with or without `0x` prefix) via
/// [`Address::from_hex`], or directly from raw bytes. Rendered and
/// serialized as `0x`-prefixed lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// Parse an address from a hex string, accepting an optional `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidAddress`] if the input is not exactly
    /// 40 hex characters after stripping the prefix.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let hex = s.strip_prefix("0x").unwrap_or(s);
        if hex.len() != 40 {
            return Err(CoreError::InvalidAddress {
                input: s.to_string(),
                reason: format!("expected 40 hex chars, got {}", hex.len()),
            });
        }
        let mut out = [0u8; 20];
        for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk).map_err(|e| CoreError::InvalidAddress {
                input: s.to_string(),
                reason: format!("invalid hex: {e}"),
            })?;
            out[i] = u8::from_str_radix(pair, 16).map_err(|e| CoreError::InvalidAddress {
                input: s.to_string(),
                reason: format!("invalid hex at byte {i}: {e}"),
            })?;
        }
        Ok(Self(out))
    }

    /// The raw 20 address bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Render as `0x`-prefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        let body: String = self.0.iter().map(|b| format!("{b:02x}")).collect();
        format!("0x{body}")
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// Serialize as the hex string rather than a 20-element byte array so ledger
// snapshots and CLI output stay human-readable.
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(de::Error::custom)
    }
}

/// A sequential token identifier, assigned by the supply ledger.
///
/// Ids start at 1 and are strictly increasing with no gaps or reuse,
/// across the public, allowlist, and gift pools alike.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TokenId(pub u64);

impl TokenId {
    /// The numeric id value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "token:{}", self.0)
    }
}
