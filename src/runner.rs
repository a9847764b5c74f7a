//! Execution launcher.
//!
//! Resolves a built artifact under the fixed output convention
//! (`build/bin/<name>`, or the fixed quick path for `--quick`), runs it with
//! no arguments, and propagates the child's exit status unchanged. A missing
//! artifact is an explicit failure, never "nothing to run".

use anyhow::{Context, Result};
use colored::*;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::KilnConfig;
use crate::generate;
use crate::synth;

/// The single candidate path for a requested target. No search, no
/// fallbacks: the output layout is a fixed contract with the build step.
pub fn artifact_path(root: &Path, config: &KilnConfig, target: Option<&str>, quick: bool) -> PathBuf {
    let name = if quick {
        synth::QUICK_TARGET_NAME
    } else {
        target.unwrap_or(config.package.name.as_str())
    };
    let file = if cfg!(windows) {
        format!("{}.exe", name)
    } else {
        name.to_string()
    };
    generate::bin_dir(root).join(file)
}

pub fn run(config: &KilnConfig, root: &Path, target: Option<&str>, quick: bool) -> Result<()> {
    let artifact = artifact_path(root, config, target, quick);

    if !artifact.exists() {
        eprintln!(
            "{} run failed: {} not found - did you build it?",
            "x".red(),
            artifact.display()
        );
        std::process::exit(1);
    }

    println!("{} Running {}...\n", "▶".green(), artifact.display());
    let status = Command::new(&artifact)
        .status()
        .with_context(|| format!("Failed to launch {}", artifact.display()))?;

    std::process::exit(status.code().unwrap_or(1));
}
