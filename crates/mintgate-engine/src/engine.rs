//! # Mint Engine
//!
//! The service object owning all drop state: the phase controller, the
//! two allowlist commitments, the supply ledger, the pass-through
//! settings, and the token registry collaborator. Constructed once at
//! process start — there are no module-level singletons.
//!
//! Every entry point is a guard-clause pipeline composed by early
//! return, in the fixed order phase → proof → payment → ledger →
//! materialize. The first failing check aborts the request before any
//! counter moves.

use std::cell::Cell;

use serde::{Deserialize, Serialize};

use mintgate_core::{Address, SalePhase, Timestamp, TokenId, Wei};
use mintgate_crypto::{verify, AllowlistRoot, MembershipProof};
use mintgate_ledger::{LedgerSnapshot, PhaseController, PhaseTransitionRecord, SupplyLedger};

use crate::config::DropConfig;
use crate::error::MintError;
use crate::payment::require_exact_payment;
use crate::registry::TokenRegistry;

/// Audit record of one gift operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftRecord {
    /// Who received the items.
    pub recipient: Address,
    /// The ids materialized for the recipient.
    pub ids: Vec<TokenId>,
    /// When the gift was committed.
    pub timestamp: Timestamp,
}

/// Execution-scope re-entrancy guard.
///
/// Set for the whole orchestrated operation, including registry
/// materialization, so recipient callback code can never re-enter a
/// minting entry point against a half-committed ledger. Cleared on drop,
/// so failed requests release the flag too.
struct InFlight<'a>(&'a Cell<bool>);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Result<Self, MintError> {
        if flag.replace(true) {
            return Err(MintError::ReentrantCall);
        }
        Ok(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// The minting-authorization and supply-accounting engine of one drop.
///
/// Generic over the token-ownership registry so deployments can plug in
/// their real registry while tests use
/// [`InMemoryRegistry`](crate::InMemoryRegistry).
///
/// The engine itself performs no locking; callers serialize access (a
/// `Mutex<MintEngine<R>>` at the service boundary). The internal
/// in-flight flag guards the orthogonal hazard of callback re-entry
/// within a single request.
#[derive(Debug)]
pub struct MintEngine<R: TokenRegistry> {
    admin: Address,
    config: DropConfig,
    phase: PhaseController,
    ledger: SupplyLedger,
    primary_root: Option<AllowlistRoot>,
    secondary_root: Option<AllowlistRoot>,
    base_uri: String,
    proxy_approval: bool,
    gift_log: Vec<GiftRecord>,
    registry: R,
    in_flight: Cell<bool>,
}

impl<R: TokenRegistry> MintEngine<R> {
    /// Create an engine for a fresh drop: phase `Closed`, zero counters,
    /// no commitments installed.
    pub fn new(config: DropConfig, admin: Address, registry: R) -> Self {
        let ledger = SupplyLedger::new(config.caps);
        let base_uri = config.base_uri.clone();
        let proxy_approval = config.proxy_approval;
        Self {
            admin,
            config,
            phase: PhaseController::new(),
            ledger,
            primary_root: None,
            secondary_root: None,
            base_uri,
            proxy_approval,
            gift_log: Vec::new(),
            registry,
            in_flight: Cell::new(false),
        }
    }

    // ─── Read-only surface ───────────────────────────────────────────

    /// The currently active sale phase.
    pub fn current_phase(&self) -> SalePhase {
        self.phase.current()
    }

    /// The highest id issued so far, or `None` before the first mint.
    pub fn last_issued_id(&self) -> Option<TokenId> {
        self.ledger.last_issued_id()
    }

    /// Export the ledger counters for audit.
    pub fn ledger_snapshot(&self) -> LedgerSnapshot {
        self.ledger.snapshot()
    }

    /// The phase transition history.
    pub fn phase_transitions(&self) -> &[PhaseTransitionRecord] {
        self.phase.transitions()
    }

    /// The gift audit log.
    pub fn gift_log(&self) -> &[GiftRecord] {
        &self.gift_log
    }

    /// The drop configuration.
    pub fn config(&self) -> &DropConfig {
        &self.config
    }

    /// The metadata base URI (pass-through setting).
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Whether marketplace-proxy blanket approval is enabled
    /// (pass-through setting).
    pub fn proxy_approval_enabled(&self) -> bool {
        self.proxy_approval
    }

    /// The registry collaborator.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Look up the recorded owner of `id` in the registry.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NonexistentItem`](crate::RegistryError::NonexistentItem)
    /// (wrapped) for an id that was never materialized.
    pub fn owner_of(&self, id: TokenId) -> Result<Address, MintError> {
        Ok(self.registry.owner_of(id)?)
    }

    // ─── Paid mint entry points ──────────────────────────────────────

    /// Mint `quantity` items in the public phase.
    ///
    /// Requires phase `Public` and payment of exactly
    /// `public_price × quantity`.
    pub fn mint_public(
        &mut self,
        caller: Address,
        quantity: u64,
        payment: Wei,
    ) -> Result<Vec<TokenId>, MintError> {
        let price = self.config.public_price;
        self.mint_paid(caller, SalePhase::Public, price, None, quantity, payment)
    }

    /// Mint `quantity` items in the primary allowlist phase.
    ///
    /// Requires phase `PrimaryAllowlist`, a proof valid against the
    /// primary commitment, and payment of exactly
    /// `public_price × quantity` (the primary phase charges the public
    /// price; see [`DropConfig`]).
    pub fn mint_primary_allowlist(
        &mut self,
        caller: Address,
        quantity: u64,
        payment: Wei,
        proof: &MembershipProof,
    ) -> Result<Vec<TokenId>, MintError> {
        let price = self.config.public_price;
        self.mint_paid(
            caller,
            SalePhase::PrimaryAllowlist,
            price,
            Some(proof),
            quantity,
            payment,
        )
    }

    /// Mint `quantity` items in the secondary allowlist phase.
    ///
    /// Requires phase `SecondaryAllowlist`, a proof valid against the
    /// secondary commitment, and payment of exactly
    /// `secondary_price × quantity`.
    pub fn mint_secondary_allowlist(
        &mut self,
        caller: Address,
        quantity: u64,
        payment: Wei,
        proof: &MembershipProof,
    ) -> Result<Vec<TokenId>, MintError> {
        let price = self.config.secondary_price;
        self.mint_paid(
            caller,
            SalePhase::SecondaryAllowlist,
            price,
            Some(proof),
            quantity,
            payment,
        )
    }

    // The shared paid-mint pipeline. Check order is fixed:
    // phase → proof → payment → ledger → materialize.
    fn mint_paid(
        &mut self,
        caller: Address,
        phase: SalePhase,
        price: Wei,
        proof: Option<&MembershipProof>,
        quantity: u64,
        payment: Wei,
    ) -> Result<Vec<TokenId>, MintError> {
        let _guard = InFlight::acquire(&self.in_flight)?;

        self.phase.require_active(phase)?;

        if let Some(proof) = proof {
            let root = match phase {
                SalePhase::PrimaryAllowlist => self.primary_root,
                SalePhase::SecondaryAllowlist => self.secondary_root,
                _ => None,
            };
            // No installed commitment verifies nothing.
            let root = root.ok_or(MintError::ProofInvalid)?;
            if !verify(&caller, proof, &root) {
                return Err(MintError::ProofInvalid);
            }
        }

        require_exact_payment(payment, price, quantity)?;

        let ids = self.ledger.reserve_issuance(&caller, phase, quantity)?;
        for id in &ids {
            self.registry.materialize(&caller, *id)?;
        }

        tracing::info!(
            phase = %phase,
            minter = %caller,
            quantity,
            first_id = ids[0].value(),
            last_id = ids[ids.len() - 1].value(),
            "mint committed"
        );
        Ok(ids)
    }

    // ─── Admin gift entry points ─────────────────────────────────────

    /// Reserve `quantity` items from the gift pool, materialized to the
    /// admin address. Admin-only; skips phase, proof, and payment checks.
    pub fn reserve_for_gifting(
        &mut self,
        caller: Address,
        quantity: u64,
    ) -> Result<Vec<TokenId>, MintError> {
        self.require_admin(&caller)?;
        let _guard = InFlight::acquire(&self.in_flight)?;
        if quantity == 0 {
            return Err(MintError::QuantityInvalid { quantity });
        }

        let ids = self.ledger.reserve_gift(quantity)?;
        for id in &ids {
            self.registry.materialize(&self.admin, *id)?;
        }
        self.gift_log.push(GiftRecord {
            recipient: self.admin,
            ids: ids.clone(),
            timestamp: Timestamp::now(),
        });

        tracing::info!(quantity, recipient = %self.admin, "gift reserve committed");
        Ok(ids)
    }

    /// Gift one item to each address in `recipients`. Admin-only; skips
    /// phase, proof, and payment checks, and consumes no per-phase cap.
    pub fn gift_to_addresses(
        &mut self,
        caller: Address,
        recipients: &[Address],
    ) -> Result<Vec<TokenId>, MintError> {
        self.require_admin(&caller)?;
        let _guard = InFlight::acquire(&self.in_flight)?;
        let quantity = recipients.len() as u64;
        if quantity == 0 {
            return Err(MintError::QuantityInvalid { quantity });
        }

        let ids = self.ledger.reserve_gift(quantity)?;
        let now = Timestamp::now();
        for (recipient, id) in recipients.iter().zip(&ids) {
            self.registry.materialize(recipient, *id)?;
            self.gift_log.push(GiftRecord {
                recipient: *recipient,
                ids: vec![*id],
                timestamp: now,
            });
        }

        tracing::info!(quantity, "gift batch committed");
        Ok(ids)
    }

    // ─── Admin setters ───────────────────────────────────────────────

    /// Overwrite the active sale phase. Admin-only, unconditional.
    pub fn set_phase(&mut self, caller: Address, phase: SalePhase) -> Result<(), MintError> {
        self.require_admin(&caller)?;
        self.phase.set_phase(phase);
        tracing::debug!(phase = %phase, "phase set");
        Ok(())
    }

    /// Install or replace the primary allowlist commitment. Admin-only.
    /// Replacing it invalidates all proofs against the previous set.
    pub fn set_primary_commitment(
        &mut self,
        caller: Address,
        root: AllowlistRoot,
    ) -> Result<(), MintError> {
        self.require_admin(&caller)?;
        self.primary_root = Some(root);
        tracing::debug!(root = %root, "primary commitment set");
        Ok(())
    }

    /// Install or replace the secondary allowlist commitment. Admin-only.
    pub fn set_secondary_commitment(
        &mut self,
        caller: Address,
        root: AllowlistRoot,
    ) -> Result<(), MintError> {
        self.require_admin(&caller)?;
        self.secondary_root = Some(root);
        tracing::debug!(root = %root, "secondary commitment set");
        Ok(())
    }

    /// Set the metadata base URI. Admin-only, idempotent, no ledger
    /// effect — the engine stores the string and nothing more.
    pub fn set_base_uri(&mut self, caller: Address, uri: String) -> Result<(), MintError> {
        self.require_admin(&caller)?;
        self.base_uri = uri;
        Ok(())
    }

    /// Enable or disable marketplace-proxy blanket approval. Admin-only,
    /// idempotent, no ledger effect.
    pub fn set_proxy_approval(&mut self, caller: Address, enabled: bool) -> Result<(), MintError> {
        self.require_admin(&caller)?;
        self.proxy_approval = enabled;
        Ok(())
    }

    fn require_admin(&self, caller: &Address) -> Result<(), MintError> {
        if *caller != self.admin {
            return Err(MintError::Unauthorized { caller: *caller });
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
