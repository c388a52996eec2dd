//! # Phase Controller
//!
//! Holds the single globally active [`SalePhase`] and exposes the admin
//! transition operation. Transitions are unconditional and total — any
//! phase is reachable from any other, and no validation is performed
//! that work in the old phase has settled. Every transition is appended
//! to a timestamped log for audit.
//!
//! Admin gating lives in the orchestrator; this controller assumes its
//! caller has already been authorized.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use mintgate_core::{SalePhase, Timestamp};

/// Errors raised by phase checks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhaseError {
    /// The requested sale type does not match the active phase.
    #[error("phase mismatch: requested {expected}, active phase is {active}")]
    PhaseMismatch {
        /// The phase the mint entry point requires.
        expected: SalePhase,
        /// The phase currently active.
        active: SalePhase,
    },
}

/// Record of one phase transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseTransitionRecord {
    /// Phase before the transition.
    pub from: SalePhase,
    /// Phase after the transition.
    pub to: SalePhase,
    /// When the transition occurred.
    pub timestamp: Timestamp,
}

/// The single globally active sale phase, plus its transition history.
///
/// A drop starts `Closed`; the admin walks it through the allowlist and
/// public phases and back to `Closed` as the sale winds down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseController {
    active: SalePhase,
    transitions: Vec<PhaseTransitionRecord>,
}

impl PhaseController {
    /// Create a controller in the initial `Closed` phase.
    pub fn new() -> Self {
        Self {
            active: SalePhase::Closed,
            transitions: Vec::new(),
        }
    }

    /// The currently active phase.
    pub fn current(&self) -> SalePhase {
        self.active
    }

    /// Overwrite the active phase unconditionally.
    ///
    /// Always succeeds; setting the already-active phase is recorded as
    /// a (no-op) transition for the audit trail.
    pub fn set_phase(&mut self, to: SalePhase) {
        self.transitions.push(PhaseTransitionRecord {
            from: self.active,
            to,
            timestamp: Timestamp::now(),
        });
        self.active = to;
    }

    /// Fail unless the active phase equals `expected`.
    pub fn require_active(&self, expected: SalePhase) -> Result<(), PhaseError> {
        if self.active != expected {
            return Err(PhaseError::PhaseMismatch {
                expected,
                active: self.active,
            });
        }
        Ok(())
    }

    /// The ordered transition log.
    pub fn transitions(&self) -> &[PhaseTransitionRecord] {
        &self.transitions
    }
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new()
    }
}
