//! `certmark digest` — print the registry key for an identity.
//!
//! Useful for issuers registering certificates off-chain: the digest
//! printed here is exactly what `checkHash` will be called with.

use certmark_core::{Digest, Identity};
use clap::Args;

/// Arguments for `certmark digest`.
#[derive(Args, Debug)]
pub struct DigestArgs {
    /// Identity string to hash (raw, no normalization is applied).
    pub identity: String,
}

/// The 64-hex digest line for an identity.
pub fn digest_line(identity: &str) -> String {
    Digest::of_identity(&Identity::new(identity)).to_hex()
}

/// Run `certmark digest`.
pub fn run_digest(args: &DigestArgs) -> anyhow::Result<u8> {
    println!("{}", digest_line(&args.identity));
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_line_is_the_sha256_hex() {
        assert_eq!(
            digest_line("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn digest_line_preserves_case_and_whitespace() {
        assert_ne!(digest_line("Abc"), digest_line("abc"));
        assert_ne!(digest_line(" abc"), digest_line("abc"));
    }
}
