//! # Digest Newtypes
//!
//! `Digest` wraps a raw 32-byte SHA-256 output; `AllowlistRoot` marks a
//! digest as the committed root of an eligible-address set. Keeping the
//! root a distinct type prevents an arbitrary proof element from being
//! passed where a commitment is expected.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use mintgate_core::CoreError;

/// A 32-byte SHA-256 digest, rendered and serialized as lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    /// Parse from a 64-char hex string.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let hex = s.trim();
        if hex.len() != 64 {
            return Err(CoreError::InvalidDigest {
                input: s.to_string(),
                reason: format!("expected 64 hex chars, got {}", hex.len()),
            });
        }
        let mut out = [0u8; 32];
        for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk).map_err(|e| CoreError::InvalidDigest {
                input: s.to_string(),
                reason: format!("invalid hex: {e}"),
            })?;
            out[i] = u8::from_str_radix(pair, 16).map_err(|e| CoreError::InvalidDigest {
                input: s.to_string(),
                reason: format!("invalid hex at byte {i}: {e}"),
            })?;
        }
        Ok(Self(out))
    }

    /// Render as lowercase hex.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Digest::from_hex(&s).map_err(de::Error::custom)
    }
}

/// The committed root of an eligible-address set.
///
/// Admin-settable per allowlisted phase. Replacing the root invalidates
/// every proof generated against the previous set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AllowlistRoot(pub Digest);

impl AllowlistRoot {
    /// Parse from a 64-char hex string.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        Digest::from_hex(s).map(Self)
    }

    /// Render as lowercase hex.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl std::fmt::Display for AllowlistRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "root:{}", self.0)
    }
}
