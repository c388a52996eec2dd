//! # Drop Configuration
//!
//! The persisted configuration surface of a drop: capacity caps, prices,
//! and the initial values of the pass-through settings. Constructed once
//! and handed to [`MintEngine::new`](crate::MintEngine::new); caps and
//! prices never change for the lifetime of the drop.

use serde::{Deserialize, Serialize};

use mintgate_core::Wei;
use mintgate_ledger::SupplyCaps;

/// Configuration of a fixed-size drop.
///
/// Note the price asymmetry: the primary allowlist phase charges
/// `public_price`, and only the secondary allowlist phase charges
/// `secondary_price`. This mirrors the deployed sale rules as-is;
/// whether the primary phase was *meant* to have its own price is
/// pending product confirmation, so it is deliberately not normalized
/// here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropConfig {
    /// Supply capacity caps (total, gifted, per-phase).
    pub caps: SupplyCaps,
    /// Price per item in the public and primary-allowlist phases.
    pub public_price: Wei,
    /// Price per item in the secondary-allowlist phase.
    pub secondary_price: Wei,
    /// Initial metadata base URI (pass-through; not interpreted here).
    pub base_uri: String,
    /// Initial marketplace-proxy blanket-approval flag (pass-through).
    pub proxy_approval: bool,
}

impl Default for DropConfig {
    /// The reference drop: 9999 items, 666 gift reserve, cap of 3 per
    /// identity per phase, 0.07 ether public price, 0.05 ether secondary
    /// price.
    fn default() -> Self {
        Self {
            caps: SupplyCaps::default(),
            public_price: Wei::from_milliether(70),
            secondary_price: Wei::from_milliether(50),
            base_uri: String::new(),
            proxy_approval: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prices() {
        let config = DropConfig::default();
        assert_eq!(config.public_price.as_wei(), 70_000_000_000_000_000);
        assert_eq!(config.secondary_price.as_wei(), 50_000_000_000_000_000);
    }

    #[test]
    fn test_default_caps_match_drop_constants() {
        let config = DropConfig::default();
        assert_eq!(config.caps.max_total, 9999);
        assert_eq!(config.caps.max_gifted, 666);
        assert_eq!(config.caps.max_per_phase, 3);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = DropConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: DropConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.public_price, config.public_price);
        assert_eq!(parsed.caps, config.caps);
    }
}
