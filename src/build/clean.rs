//! Build artifact cleanup.
//!
//! `kiln clean` removes the whole output directory tree. The external tool's
//! cache lives inside it, so a clean invalidates that cache wholesale.
//! Cleaning an already-clean tree succeeds.

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;

use crate::generate;

pub fn clean(root: &Path) -> Result<()> {
    let out = generate::out_dir(root);
    if out.exists() {
        fs::remove_dir_all(&out).context("Failed to remove the build directory")?;
        println!("{} Removed {}", "✓".green(), out.display());
    } else {
        println!("{} Nothing to clean", "!".yellow());
    }
    Ok(())
}
