//! End-to-end drop scenarios against the full engine with the in-memory
//! token registry and real allowlist commitments.

use mintgate_core::{Address, SalePhase, TokenId, Wei};
use mintgate_crypto::AllowlistTree;
use mintgate_engine::{DropConfig, InMemoryRegistry, MintEngine, MintError};
use mintgate_ledger::{PhaseError, SupplyError};

fn addr(n: u16) -> Address {
    let mut bytes = [0u8; 20];
    bytes[18..].copy_from_slice(&n.to_be_bytes());
    Address(bytes)
}

fn admin() -> Address {
    addr(0xadad)
}

fn engine() -> MintEngine<InMemoryRegistry> {
    MintEngine::new(DropConfig::default(), admin(), InMemoryRegistry::new())
}

#[test]
fn public_mint_of_three_then_cap_rejection() {
    let mut e = engine();
    e.set_phase(admin(), SalePhase::Public).unwrap();

    // quantity 3 at 0.07 ether each: 0.21 ether attached.
    let payment = Wei::from_milliether(210);
    let caller = addr(1);
    let ids = e.mint_public(caller, 3, payment).unwrap();
    assert_eq!(ids, vec![TokenId(1), TokenId(2), TokenId(3)]);
    for id in &ids {
        assert_eq!(e.owner_of(*id).unwrap(), caller);
    }

    let snap = e.ledger_snapshot();
    assert_eq!(snap.total_issued, 3);
    assert_eq!(snap.phase_counts.len(), 1);
    assert_eq!(snap.phase_counts[0].count, 3);

    // A follow-up single mint by the same caller breaches the cap.
    let err = e
        .mint_public(caller, 1, Wei::from_milliether(70))
        .unwrap_err();
    assert!(matches!(
        err,
        MintError::Supply(SupplyError::PhaseCapExceeded { .. })
    ));
    assert_eq!(e.ledger_snapshot().total_issued, 3);
}

#[test]
fn payment_must_be_exact_in_both_directions() {
    let mut e = engine();
    e.set_phase(admin(), SalePhase::Public).unwrap();
    let exact = Wei::from_milliether(140);

    let short = Wei(exact.as_wei() - 1);
    assert!(matches!(
        e.mint_public(addr(1), 2, short),
        Err(MintError::PaymentMismatch { .. })
    ));
    let over = Wei(exact.as_wei() + 1);
    assert!(matches!(
        e.mint_public(addr(1), 2, over),
        Err(MintError::PaymentMismatch { .. })
    ));
    assert_eq!(e.last_issued_id(), None);

    assert!(e.mint_public(addr(1), 2, exact).is_ok());
}

#[test]
fn closed_phase_rejects_every_mint_entry_point() {
    let mut e = engine();
    let tree = AllowlistTree::build(&[addr(1)]).unwrap();
    e.set_primary_commitment(admin(), tree.root()).unwrap();
    e.set_secondary_commitment(admin(), tree.root()).unwrap();
    let proof = tree.prove(&addr(1)).unwrap();

    let payment = Wei::from_milliether(70);
    assert!(matches!(
        e.mint_public(addr(1), 1, payment),
        Err(MintError::Phase(PhaseError::PhaseMismatch { .. }))
    ));
    assert!(matches!(
        e.mint_primary_allowlist(addr(1), 1, payment, &proof),
        Err(MintError::Phase(PhaseError::PhaseMismatch { .. }))
    ));
    assert!(matches!(
        e.mint_secondary_allowlist(addr(1), 1, payment, &proof),
        Err(MintError::Phase(PhaseError::PhaseMismatch { .. }))
    ));

    let snap = e.ledger_snapshot();
    assert_eq!(snap.total_issued, 0);
    assert!(snap.phase_counts.is_empty());
}

#[test]
fn allowlist_phases_gate_on_membership_and_price() {
    let mut e = engine();
    let members: Vec<Address> = (1..=10u16).map(addr).collect();
    let tree = AllowlistTree::build(&members).unwrap();
    e.set_secondary_commitment(admin(), tree.root()).unwrap();
    e.set_phase(admin(), SalePhase::SecondaryAllowlist).unwrap();

    let member = addr(4);
    let proof = tree.prove(&member).unwrap();

    // Secondary phase charges the secondary price, not the public one.
    let public_price = Wei::from_milliether(70);
    assert!(matches!(
        e.mint_secondary_allowlist(member, 1, public_price, &proof),
        Err(MintError::PaymentMismatch { .. })
    ));
    let secondary_price = Wei::from_milliether(50);
    let ids = e
        .mint_secondary_allowlist(member, 1, secondary_price, &proof)
        .unwrap();
    assert_eq!(ids, vec![TokenId(1)]);

    // A non-member with a member's proof is rejected before payment.
    let outsider = addr(99);
    assert!(matches!(
        e.mint_secondary_allowlist(outsider, 1, secondary_price, &proof),
        Err(MintError::ProofInvalid)
    ));
}

#[test]
fn per_phase_caps_reset_across_phases() {
    let mut e = engine();
    let caller = addr(7);
    let tree = AllowlistTree::build(&[caller]).unwrap();
    e.set_primary_commitment(admin(), tree.root()).unwrap();
    let proof = tree.prove(&caller).unwrap();

    e.set_phase(admin(), SalePhase::PrimaryAllowlist).unwrap();
    e.mint_primary_allowlist(caller, 3, Wei::from_milliether(210), &proof)
        .unwrap();

    // The same identity gets a fresh cap in the public phase.
    e.set_phase(admin(), SalePhase::Public).unwrap();
    let ids = e
        .mint_public(caller, 3, Wei::from_milliether(210))
        .unwrap();
    assert_eq!(ids, vec![TokenId(4), TokenId(5), TokenId(6)]);
}

#[test]
fn gift_pool_is_exactly_666() {
    let mut e = engine();

    // 667 recipients: rejected outright, nothing committed.
    let too_many: Vec<Address> = (1..=667u16).map(addr).collect();
    let err = e.gift_to_addresses(admin(), &too_many).unwrap_err();
    assert!(matches!(
        err,
        MintError::Supply(SupplyError::GiftCapExceeded { .. })
    ));
    assert_eq!(e.ledger_snapshot().total_gifted, 0);
    assert!(e.registry().is_empty());

    // 666 recipients: the whole pool in one batch.
    let recipients: Vec<Address> = (1..=666u16).map(addr).collect();
    let ids = e.gift_to_addresses(admin(), &recipients).unwrap();
    assert_eq!(ids.len(), 666);
    assert_eq!(ids[0], TokenId(1));
    assert_eq!(ids[665], TokenId(666));
    assert_eq!(e.ledger_snapshot().total_gifted, 666);
    assert_eq!(e.owner_of(TokenId(1)).unwrap(), addr(1));
    assert_eq!(e.owner_of(TokenId(666)).unwrap(), addr(666));

    // Every further gift fails, by either path.
    assert!(e.gift_to_addresses(admin(), &[addr(1)]).is_err());
    assert!(e.reserve_for_gifting(admin(), 1).is_err());
}

#[test]
fn ids_are_contiguous_across_pools_and_phases() {
    let mut e = engine();

    let gifts = e.reserve_for_gifting(admin(), 2).unwrap();
    assert_eq!(gifts, vec![TokenId(1), TokenId(2)]);

    e.set_phase(admin(), SalePhase::Public).unwrap();
    let paid = e
        .mint_public(addr(1), 3, Wei::from_milliether(210))
        .unwrap();
    assert_eq!(paid, vec![TokenId(3), TokenId(4), TokenId(5)]);

    let batch = e.gift_to_addresses(admin(), &[addr(2), addr(3)]).unwrap();
    assert_eq!(batch, vec![TokenId(6), TokenId(7)]);

    assert_eq!(e.last_issued_id(), Some(TokenId(7)));
    // Every id 1..=7 is materialized exactly once.
    for id in 1..=7u64 {
        assert!(e.owner_of(TokenId(id)).is_ok());
    }
    assert_eq!(e.registry().len(), 7);
}

#[test]
fn paid_minting_never_consumes_the_gift_reserve() {
    let mut e = MintEngine::new(
        DropConfig {
            caps: mintgate_ledger::SupplyCaps {
                max_total: 12,
                max_gifted: 6,
                max_per_phase: 3,
            },
            ..DropConfig::default()
        },
        admin(),
        InMemoryRegistry::new(),
    );
    e.set_phase(admin(), SalePhase::Public).unwrap();

    // Paid pool is 12 - 6 = 6 while no gifts are consumed.
    e.mint_public(addr(1), 3, Wei::from_milliether(210)).unwrap();
    e.mint_public(addr(2), 3, Wei::from_milliether(210)).unwrap();
    assert!(matches!(
        e.mint_public(addr(3), 1, Wei::from_milliether(70)),
        Err(MintError::Supply(SupplyError::SupplyExceeded { .. }))
    ));

    // Gifts still proceed out of the untouched reserve, and consuming
    // them never hands capacity back to paid minting.
    let gifts = e.gift_to_addresses(admin(), &[addr(9), addr(10)]).unwrap();
    assert_eq!(gifts, vec![TokenId(7), TokenId(8)]);
    assert!(matches!(
        e.mint_public(addr(3), 1, Wei::from_milliether(70)),
        Err(MintError::Supply(SupplyError::SupplyExceeded { .. }))
    ));
}
