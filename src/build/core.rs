//! Configure and build driver.
//!
//! The effectful half of the engine: scans the tree, synthesizes targets,
//! materializes the generated CMake project, then spawns exactly one
//! configure invocation followed by exactly one build invocation. A non-zero
//! exit from either external step is echoed and propagated as this process's
//! own exit status. Every failure here is terminal - nothing is retried or
//! downgraded to a warning.

use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::{Duration, Instant};

use crate::config::KilnConfig;
use crate::generate;
use crate::layout;
use crate::policy::FeatureSet;
use crate::synth::{self, Target, TargetKind};
use crate::ui;

/// The external build-generation tool. Invoked once to configure and once to
/// build; its incremental cache under `build/obj` is opaque to kiln.
pub const CONFIGURE_TOOL: &str = "cmake";

#[derive(Debug, Default)]
pub struct BuildOptions {
    /// Map to `-DCMAKE_BUILD_TYPE=Debug` on the configure invocation.
    pub debug: bool,
    /// Restrict the primary executable to one named source file.
    pub quick: bool,
    /// Required by `quick`; the source file to build.
    pub target: Option<String>,
    /// Extra preprocessor definition for the primary executable.
    pub define: Option<String>,
    pub verbose: bool,
    /// Print the target set and argument vectors without spawning anything.
    pub dry_run: bool,
}

pub fn configure_and_build(config: &KilnConfig, options: &BuildOptions, root: &Path) -> Result<()> {
    let start = Instant::now();

    let scanned = match layout::scan(root) {
        Ok(scanned) => scanned,
        Err(e) => {
            eprintln!("{} scan failed: {}", "x".red(), e);
            std::process::exit(2);
        }
    };

    let features = FeatureSet::from_toggles(config.features.clone().unwrap_or_default());

    let targets = match synth::synthesize(
        &scanned,
        config,
        &features,
        options.quick,
        options.target.as_deref(),
        options.define.as_deref(),
    ) {
        Ok(targets) => targets,
        Err(e) => {
            eprintln!("{} configure failed: {}", "x".red(), e);
            std::process::exit(1);
        }
    };

    let primary_empty = targets
        .iter()
        .find(|t| t.kind == TargetKind::Executable)
        .map(|t| t.sources.is_empty())
        .unwrap_or(true);
    if primary_empty {
        eprintln!("{} configure failed: no source files found in src/", "x".red());
        std::process::exit(1);
    }

    if options.verbose || options.dry_run {
        print_target_table(&targets);
    }

    let r#gen = generate::gen_dir(root);
    let obj = generate::obj_dir(root);
    let configure_args = configure_args(&r#gen, &obj, options);
    let build_args = vec!["--build".to_string(), obj.display().to_string()];

    if options.dry_run {
        println!(
            "{} Would execute: {} {}",
            "ℹ".blue(),
            CONFIGURE_TOOL,
            configure_args.join(" ")
        );
        println!(
            "{} Would execute: {} {}",
            "ℹ".blue(),
            CONFIGURE_TOOL,
            build_args.join(" ")
        );
        return Ok(());
    }

    generate::write_project(config, &targets, root)?;
    fs::create_dir_all(&obj).context("Failed to create the output directory")?;

    run_external("configure", &configure_args, options.verbose)?;
    run_external("build", &build_args, options.verbose)?;

    println!(
        "{} Build finished in {:.2?} ({} targets)",
        "✓".green(),
        start.elapsed(),
        targets.len()
    );
    Ok(())
}

/// Quick and debug are additive flag sets on the one configure invocation,
/// not separate code paths, so they compose freely.
fn configure_args(r#gen: &Path, obj: &Path, options: &BuildOptions) -> Vec<String> {
    let mut args = vec![
        "-S".to_string(),
        r#gen.display().to_string(),
        "-B".to_string(),
        obj.display().to_string(),
        "-DCMAKE_EXPORT_COMPILE_COMMANDS=ON".to_string(),
    ];
    if options.debug {
        args.push("-DCMAKE_BUILD_TYPE=Debug".to_string());
    }
    args
}

fn run_external(step: &str, args: &[String], verbose: bool) -> Result<()> {
    if verbose {
        println!(
            "   {} {} {}",
            "$".dimmed(),
            CONFIGURE_TOOL,
            args.join(" ").dimmed()
        );
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Running {} step...", step));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let output = Command::new(CONFIGURE_TOOL)
        .args(args)
        .output()
        .with_context(|| format!("Failed to launch {} for the {} step", CONFIGURE_TOOL, step))?;

    spinner.finish_and_clear();

    if !output.status.success() {
        print!("{}", String::from_utf8_lossy(&output.stdout));
        eprint!("{}", String::from_utf8_lossy(&output.stderr));
        eprintln!("{} {} step failed", "x".red(), step);
        std::process::exit(output.status.code().unwrap_or(1));
    }

    if verbose {
        print!("{}", String::from_utf8_lossy(&output.stdout));
    }
    Ok(())
}

fn print_target_table(targets: &[Target]) {
    let mut table = ui::Table::new(&["Target", "Kind", "Sources", "Links", "Definitions"]);
    for target in targets {
        table.add_row(vec![
            target.name.cyan().to_string(),
            target.kind.label().to_string(),
            target.sources.len().to_string(),
            target.depends_on.clone().unwrap_or_else(|| "-".to_string()),
            if target.definitions.is_empty() {
                "-".to_string()
            } else {
                target.definitions.join(" ")
            },
        ]);
    }
    table.print();
}
