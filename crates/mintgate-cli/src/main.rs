//! # mintgate CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Mintgate drop tooling — allowlist commitments and membership proofs.
///
/// Computes the root a drop admin installs on the engine, emits the
/// proof bundles distributed to allowlisted minters, and verifies those
/// bundles offline.
#[derive(Parser, Debug)]
#[command(name = "mintgate", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Compute the allowlist root for an address file.
    Root(mintgate_cli::allowlist::RootArgs),
    /// Emit the membership proof bundle for one address.
    Proof(mintgate_cli::allowlist::ProofArgs),
    /// Verify a proof bundle offline.
    Verify(mintgate_cli::allowlist::VerifyArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Root(args) => mintgate_cli::allowlist::run_root(&args),
        Commands::Proof(args) => mintgate_cli::allowlist::run_proof(&args),
        Commands::Verify(args) => mintgate_cli::allowlist::run_verify(&args),
    }
}
