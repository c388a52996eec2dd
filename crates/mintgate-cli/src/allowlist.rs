//! Allowlist subcommands: root computation, proof emission, offline
//! verification.
//!
//! Address files are plain text, one hex address per line; blank lines
//! and `#` comments are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Args;
use serde::{Deserialize, Serialize};

use mintgate_core::Address;
use mintgate_crypto::{verify, AllowlistRoot, AllowlistTree, MembershipProof};

/// Arguments for `mintgate root`.
#[derive(Args, Debug)]
pub struct RootArgs {
    /// Address file (one hex address per line).
    #[arg(long)]
    pub addresses: PathBuf,
}

/// Arguments for `mintgate proof`.
#[derive(Args, Debug)]
pub struct ProofArgs {
    /// Address file the commitment was built from.
    #[arg(long)]
    pub addresses: PathBuf,

    /// The member address to prove.
    #[arg(long)]
    pub address: String,
}

/// Arguments for `mintgate verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// A proof bundle produced by `mintgate proof`.
    #[arg(long)]
    pub bundle: PathBuf,
}

/// The JSON document emitted by `proof` and consumed by `verify`:
/// everything a minter needs to present, plus the root to check against.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProofBundle {
    /// The proven member address.
    pub address: Address,
    /// The committed root the proof folds to.
    pub root: AllowlistRoot,
    /// The sibling digests.
    pub proof: MembershipProof,
}

/// Read and parse an address file.
pub fn load_addresses(path: &Path) -> anyhow::Result<Vec<Address>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading address file {}", path.display()))?;
    let mut addresses = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let address = Address::from_hex(line)
            .with_context(|| format!("{}:{}", path.display(), lineno + 1))?;
        addresses.push(address);
    }
    if addresses.is_empty() {
        bail!("{} contains no addresses", path.display());
    }
    Ok(addresses)
}

/// `mintgate root` — print the committed root for an address file.
pub fn run_root(args: &RootArgs) -> anyhow::Result<()> {
    let addresses = load_addresses(&args.addresses)?;
    let tree = AllowlistTree::build(&addresses)?;
    tracing::info!(members = tree.members().len(), "allowlist committed");
    println!("{}", tree.root().to_hex());
    Ok(())
}

/// `mintgate proof` — print the proof bundle for one member as JSON.
pub fn run_proof(args: &ProofArgs) -> anyhow::Result<()> {
    let addresses = load_addresses(&args.addresses)?;
    let address = Address::from_hex(&args.address)?;
    let tree = AllowlistTree::build(&addresses)?;
    let proof = tree
        .prove(&address)
        .with_context(|| format!("{address} is not in the allowlist"))?;
    let bundle = ProofBundle {
        address,
        root: tree.root(),
        proof,
    };
    println!("{}", serde_json::to_string_pretty(&bundle)?);
    Ok(())
}

/// `mintgate verify` — check a proof bundle offline.
pub fn run_verify(args: &VerifyArgs) -> anyhow::Result<()> {
    let text = fs::read_to_string(&args.bundle)
        .with_context(|| format!("reading proof bundle {}", args.bundle.display()))?;
    let bundle: ProofBundle = serde_json::from_str(&text).context("parsing proof bundle")?;
    if !verify(&bundle.address, &bundle.proof, &bundle.root) {
        bail!("proof for {} does NOT verify against {}", bundle.address, bundle.root);
    }
    println!("proof for {} verifies against {}", bundle.address, bundle.root);
    Ok(())
}
