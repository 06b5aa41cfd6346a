//! # certmark CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros; verbosity flags map onto the tracing filter.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use certmark_cli::digest::{run_digest, DigestArgs};
use certmark_cli::stamp::{run_stamp, StampArgs};
use certmark_cli::verify::{run_verify, VerifyArgs};

/// certmark — on-chain certificate verification and watermarking.
///
/// Proves possession of a registered email against the certificate
/// registry and, when a certificate exists, retrieves it as a
/// watermarked PDF.
#[derive(Parser, Debug)]
#[command(name = "certmark", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify an identity against the registry and download the
    /// watermarked certificate.
    Verify(VerifyArgs),

    /// Print the registry digest for an identity.
    Digest(DigestArgs),

    /// Watermark a local PDF without touching the registry.
    Stamp(StampArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Verify(args) => run_verify(&args).await,
        Commands::Digest(args) => run_digest(&args),
        Commands::Stamp(args) => run_stamp(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
