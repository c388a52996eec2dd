//! # Allowlist Merkle Tree
//!
//! The commitment scheme for allowlisted sale phases. An allowlist is
//! committed as the root of a binary Merkle tree over the eligible
//! addresses; eligibility is proven with an ordered sequence of sibling
//! digests that folds back to the root.
//!
//! ## Algorithm
//!
//! Domain-separated SHA-256:
//! - Leaf: `SHA256(0x00 || address_bytes)`.
//! - Node: `SHA256(0x01 || lo || hi)` where `(lo, hi)` is the byte-wise
//!   sorted pair of children.
//!
//! Sorting the pair at every interior node makes the fold order canonical:
//! a proof carries no left/right direction bits, only digests. Leaf digests
//! are sorted and deduplicated before tree construction so the same address
//! set always commits to the same root. An odd node at any level is
//! promoted to the next level unhashed.
//!
//! ## Security Invariant
//!
//! The `0x00`/`0x01` domain tags ensure an interior node digest can never
//! be presented as a leaf (or vice versa), ruling out second-preimage
//! splicing between tree levels.

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use thiserror::Error;

use mintgate_core::Address;

use crate::digest::{AllowlistRoot, Digest};

/// Errors raised while building an allowlist commitment.
#[derive(Error, Debug)]
pub enum AllowlistError {
    /// An allowlist must contain at least one address.
    #[error("cannot commit to an empty allowlist")]
    EmptyAllowlist,
}

// ─── Core hashing ────────────────────────────────────────────────────

fn sha256_raw(input: &[u8]) -> Digest {
    let hash = Sha256::digest(input);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hash);
    Digest(out)
}

/// Compute the leaf digest for an address: `SHA256(0x00 || address)`.
pub fn leaf_hash(address: &Address) -> Digest {
    let mut input = Vec::with_capacity(21);
    input.push(0x00);
    input.extend_from_slice(address.as_bytes());
    sha256_raw(&input)
}

/// Compute an interior node digest: `SHA256(0x01 || lo || hi)`.
///
/// The children are sorted byte-wise before hashing, so
/// `node_hash(a, b) == node_hash(b, a)`.
pub fn node_hash(a: &Digest, b: &Digest) -> Digest {
    let (lo, hi) = if a.as_bytes() <= b.as_bytes() {
        (a, b)
    } else {
        (b, a)
    };
    let mut input = Vec::with_capacity(65);
    input.push(0x01);
    input.extend_from_slice(lo.as_bytes());
    input.extend_from_slice(hi.as_bytes());
    sha256_raw(&input)
}

// ─── Membership proof ────────────────────────────────────────────────

/// An ordered sequence of sibling digests proving allowlist membership.
///
/// Folded leaf-to-root: each element is combined with the running digest
/// via [`node_hash`]. An empty proof is valid only for a single-address
/// allowlist, where the leaf digest is itself the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipProof(pub Vec<Digest>);

impl MembershipProof {
    /// Number of sibling digests in the proof.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the proof carries no siblings.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Check a claimed membership: fold `proof` onto the leaf digest of
/// `address` and compare the result against the committed `root`.
///
/// Pure and stateless — no caching. The commitment can be replaced
/// between requests, so every request re-verifies from scratch.
pub fn verify(address: &Address, proof: &MembershipProof, root: &AllowlistRoot) -> bool {
    let mut acc = leaf_hash(address);
    for sibling in &proof.0 {
        acc = node_hash(&acc, sibling);
    }
    acc == root.0
}

// ─── Tree construction ───────────────────────────────────────────────

/// A Merkle tree over a committed address set.
///
/// Built once by the drop operator, then queried for the root (to install
/// on the engine) and per-address proofs (to distribute to minters).
/// Verification on the mint path uses only [`verify`] — the engine never
/// holds a tree, only the 32-byte root.
#[derive(Debug, Clone)]
pub struct AllowlistTree {
    // levels[0] holds the sorted, deduplicated leaf digests;
    // levels.last() is the single root digest.
    levels: Vec<Vec<Digest>>,
    members: Vec<Address>,
}

impl AllowlistTree {
    /// Build the commitment tree over `addresses`.
    ///
    /// Duplicates are collapsed; the committed set is order-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`AllowlistError::EmptyAllowlist`] for an empty input.
    pub fn build(addresses: &[Address]) -> Result<Self, AllowlistError> {
        if addresses.is_empty() {
            return Err(AllowlistError::EmptyAllowlist);
        }

        let mut pairs: Vec<(Digest, Address)> =
            addresses.iter().map(|a| (leaf_hash(a), *a)).collect();
        pairs.sort_by(|x, y| x.0.as_bytes().cmp(y.0.as_bytes()));
        pairs.dedup_by(|x, y| x.0 == y.0);

        let members: Vec<Address> = pairs.iter().map(|(_, a)| *a).collect();
        let leaves: Vec<Digest> = pairs.into_iter().map(|(d, _)| d).collect();

        let mut levels = vec![leaves];
        loop {
            let prev = &levels[levels.len() - 1];
            if prev.len() == 1 {
                break;
            }
            let mut next = Vec::with_capacity(prev.len().div_ceil(2));
            for pair in prev.chunks(2) {
                match pair {
                    [l, r] => next.push(node_hash(l, r)),
                    // Odd node: promoted unhashed.
                    [single] => next.push(*single),
                    _ => unreachable!("chunks(2) yields 1 or 2 elements"),
                }
            }
            levels.push(next);
        }

        Ok(Self { levels, members })
    }

    /// The committed root.
    pub fn root(&self) -> AllowlistRoot {
        // build() guarantees a final level with exactly one digest.
        AllowlistRoot(self.levels[self.levels.len() - 1][0])
    }

    /// The committed member addresses, in leaf order.
    pub fn members(&self) -> &[Address] {
        &self.members
    }

    /// Generate the membership proof for `address`, or `None` if the
    /// address is not in the committed set.
    pub fn prove(&self, address: &Address) -> Option<MembershipProof> {
        let target = leaf_hash(address);
        let mut idx = self.levels[0].iter().position(|d| *d == target)?;

        let mut siblings = Vec::new();
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_idx = idx ^ 1;
            if let Some(sibling) = level.get(sibling_idx) {
                siblings.push(*sibling);
            }
            // No sibling: this node was promoted unhashed, skip the level.
            idx /= 2;
        }
        Some(MembershipProof(siblings))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address([n; 20])
    }

    fn addrs(count: u8) -> Vec<Address> {
        (1..=count).map(addr).collect()
    }

    // ── Hashing primitives ───────────────────────────────────────────

    #[test]
    fn test_leaf_hash_deterministic() {
        assert_eq!(leaf_hash(&addr(1)), leaf_hash(&addr(1)));
        assert_ne!(leaf_hash(&addr(1)), leaf_hash(&addr(2)));
    }

    #[test]
    fn test_node_hash_symmetric() {
        let a = leaf_hash(&addr(1));
        let b = leaf_hash(&addr(2));
        assert_eq!(node_hash(&a, &b), node_hash(&b, &a));
    }

    #[test]
    fn test_leaf_and_node_domains_separated() {
        // An interior node over (x, x) must not collide with any leaf of
        // the same bytes.
        let x = leaf_hash(&addr(1));
        assert_ne!(node_hash(&x, &x), x);
    }

    // ── Tree construction ────────────────────────────────────────────

    #[test]
    fn test_empty_allowlist_rejected() {
        assert!(matches!(
            AllowlistTree::build(&[]),
            Err(AllowlistError::EmptyAllowlist)
        ));
    }

    #[test]
    fn test_single_member_root_is_leaf() {
        let tree = AllowlistTree::build(&[addr(1)]).unwrap();
        assert_eq!(tree.root().0, leaf_hash(&addr(1)));
        let proof = tree.prove(&addr(1)).unwrap();
        assert!(proof.is_empty());
        assert!(verify(&addr(1), &proof, &tree.root()));
    }

    #[test]
    fn test_root_is_order_insensitive() {
        let forward = AllowlistTree::build(&addrs(7)).unwrap();
        let mut reversed = addrs(7);
        reversed.reverse();
        let backward = AllowlistTree::build(&reversed).unwrap();
        assert_eq!(forward.root(), backward.root());
    }

    #[test]
    fn test_duplicates_collapse() {
        let unique = AllowlistTree::build(&addrs(3)).unwrap();
        let duped = AllowlistTree::build(&[addr(1), addr(2), addr(2), addr(3), addr(1)]).unwrap();
        assert_eq!(unique.root(), duped.root());
        assert_eq!(duped.members().len(), 3);
    }

    // ── Proof round-trips ────────────────────────────────────────────

    #[test]
    fn test_every_member_proves() {
        // Cover even, odd, and power-of-two set sizes.
        for count in [2u8, 3, 4, 5, 8, 13] {
            let members = addrs(count);
            let tree = AllowlistTree::build(&members).unwrap();
            let root = tree.root();
            for member in &members {
                let proof = tree.prove(member).unwrap();
                assert!(
                    verify(member, &proof, &root),
                    "member {member} failed to verify in a {count}-address set"
                );
            }
        }
    }

    #[test]
    fn test_non_member_has_no_proof() {
        let tree = AllowlistTree::build(&addrs(5)).unwrap();
        assert!(tree.prove(&addr(99)).is_none());
    }

    #[test]
    fn test_non_member_fails_with_stolen_proof() {
        let tree = AllowlistTree::build(&addrs(5)).unwrap();
        let proof = tree.prove(&addr(1)).unwrap();
        assert!(!verify(&addr(99), &proof, &tree.root()));
    }

    #[test]
    fn test_tampered_proof_element_fails() {
        let tree = AllowlistTree::build(&addrs(8)).unwrap();
        let root = tree.root();
        let proof = tree.prove(&addr(3)).unwrap();
        for i in 0..proof.len() {
            let mut tampered = proof.clone();
            tampered.0[i].0[0] ^= 0x01;
            assert!(
                !verify(&addr(3), &tampered, &root),
                "flipping proof element {i} should break verification"
            );
        }
    }

    #[test]
    fn test_wrong_root_fails() {
        let tree = AllowlistTree::build(&addrs(5)).unwrap();
        let proof = tree.prove(&addr(1)).unwrap();
        let mut wrong = tree.root();
        wrong.0 .0[31] ^= 0x01;
        assert!(!verify(&addr(1), &proof, &wrong));
    }

    #[test]
    fn test_replacing_commitment_invalidates_old_proofs() {
        let old = AllowlistTree::build(&addrs(4)).unwrap();
        let new = AllowlistTree::build(&addrs(5)).unwrap();
        let proof = old.prove(&addr(2)).unwrap();
        assert!(verify(&addr(2), &proof, &old.root()));
        assert!(!verify(&addr(2), &proof, &new.root()));
    }

    #[test]
    fn test_truncated_proof_fails() {
        let tree = AllowlistTree::build(&addrs(8)).unwrap();
        let mut proof = tree.prove(&addr(3)).unwrap();
        proof.0.pop();
        assert!(!verify(&addr(3), &proof, &tree.root()));
    }

    #[test]
    fn test_proof_serde_roundtrip() {
        let tree = AllowlistTree::build(&addrs(6)).unwrap();
        let proof = tree.prove(&addr(4)).unwrap();
        let json = serde_json::to_string(&proof).unwrap();
        let parsed: MembershipProof = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, proof);
        assert!(verify(&addr(4), &parsed, &tree.root()));
    }

    // ── Properties ───────────────────────────────────────────────────

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_addresses() -> impl Strategy<Value = Vec<Address>> {
            proptest::collection::vec(proptest::array::uniform20(any::<u8>()), 1..40)
                .prop_map(|v| v.into_iter().map(Address).collect())
        }

        proptest! {
            #[test]
            fn every_committed_member_verifies(members in arb_addresses()) {
                let tree = AllowlistTree::build(&members).unwrap();
                let root = tree.root();
                for member in tree.members() {
                    let proof = tree.prove(member).unwrap();
                    prop_assert!(verify(member, &proof, &root));
                }
            }

            #[test]
            fn outsider_never_verifies_with_member_proof(
                members in arb_addresses(),
                outsider in proptest::array::uniform20(any::<u8>()),
            ) {
                let outsider = Address(outsider);
                prop_assume!(!members.contains(&outsider));
                let tree = AllowlistTree::build(&members).unwrap();
                let root = tree.root();
                for member in tree.members() {
                    let proof = tree.prove(member).unwrap();
                    prop_assert!(!verify(&outsider, &proof, &root));
                }
            }
        }
    }
}
