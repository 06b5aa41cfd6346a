//! `certmark stamp` — run the watermark engine on a local PDF.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

/// Arguments for `certmark stamp`.
#[derive(Args, Debug)]
pub struct StampArgs {
    /// Input PDF to watermark.
    #[arg(long)]
    pub input: PathBuf,

    /// Text to overlay on every page.
    #[arg(long)]
    pub text: String,

    /// Where to write the watermarked PDF.
    #[arg(long)]
    pub output: PathBuf,
}

/// Run `certmark stamp`.
pub fn run_stamp(args: &StampArgs) -> anyhow::Result<u8> {
    let input = std::fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let output = certmark_watermark::stamp(&input, &args.text)?;
    std::fs::write(&args.output, &output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    tracing::info!(
        input = %args.input.display(),
        output = %args.output.display(),
        size = output.len(),
        "document watermarked"
    );
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = StampArgs {
            input: dir.path().join("does-not-exist.pdf"),
            text: "abc123".to_string(),
            output: dir.path().join("out.pdf"),
        };
        let err = run_stamp(&args).unwrap_err();
        assert!(format!("{err:#}").contains("does-not-exist.pdf"));
    }

    #[test]
    fn non_pdf_input_fails_without_writing_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("garbage.pdf");
        std::fs::write(&input, b"not a pdf").unwrap();
        let output = dir.path().join("out.pdf");
        let args = StampArgs {
            input,
            text: "abc123".to_string(),
            output: output.clone(),
        };
        assert!(run_stamp(&args).is_err());
        assert!(!output.exists());
    }
}
