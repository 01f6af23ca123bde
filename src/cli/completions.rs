//! `jenkins-views completions` - Generate shell completions
//!
//! The generated scripts complete subcommands and flags as well as the
//! column identifiers accepted by `jenkins-views columns`.

use anyhow::{Context, Result};
use clap_complete::Shell;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Writes the completion script for `shell` to `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = super::build_cli();
    let bin = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin, out);
}

/// Generates the completion script for `shell` into `output`, or stdout.
///
/// # Errors
///
/// Fails if the output file cannot be written.
pub fn completions(shell: Shell, output: Option<&Path>) -> Result<()> {
    let mut script = Vec::new();
    write_completions(shell, &mut script);

    match output {
        Some(path) => {
            fs::write(path, &script)
                .with_context(|| format!("Failed to write completions to: {}", path.display()))?;
            tracing::info!(path = %path.display(), ?shell, "wrote completions");
        }
        None => std::io::stdout()
            .write_all(&script)
            .context("Failed to write completions")?,
    }
    Ok(())
}
