//! # kiln CLI Entry Point
//!
//! Parses CLI arguments with clap and routes the three entry points -
//! `build`, `run`, `clean` - to their handlers.
//!
//! Exit statuses are part of the contract: `build` exits with the external
//! tool's own status (or 1 for a configuration error, 2 for an unreadable
//! layout), `run` exits with the launched artifact's status (or 1 when the
//! artifact is missing), and `clean` always exits 0.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::path::Path;

use kiln::build;
use kiln::config;
use kiln::runner;

#[derive(Parser)]
#[command(name = "kiln")]
#[command(about = "Convention-driven configure/build/run front-end for C++ projects", version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure and build the project
    Build {
        /// Extra preprocessor definition for the main program (NAME or NAME=VALUE)
        #[arg(long, value_name = "VALUE")]
        define: Option<String>,
        /// Build a single named source file as the whole program (requires --target)
        #[arg(long)]
        quick: bool,
        /// Source file name for --quick
        #[arg(long, value_name = "NAME")]
        target: Option<String>,
        /// Configure a Debug build type
        #[arg(long)]
        debug: bool,
        /// Show the synthesized targets and external commands
        #[arg(short, long)]
        verbose: bool,
        /// Show what would be executed without running
        #[arg(long)]
        dry_run: bool,
    },
    /// Run a built artifact
    Run {
        /// Target name (default: the main program)
        #[arg(long, value_name = "NAME")]
        target: Option<String>,
        /// Run the quick artifact instead of a named target
        #[arg(long)]
        quick: bool,
    },
    /// Remove the build output directory
    Clean,
    /// Generate shell completion scripts
    Completion { shell: Shell },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let root = Path::new(".");

    match &cli.command {
        Commands::Build {
            define,
            quick,
            target,
            debug,
            verbose,
            dry_run,
        } => {
            let config = config::load_config(root)?;
            let options = build::BuildOptions {
                debug: *debug,
                quick: *quick,
                target: target.clone(),
                define: define.clone(),
                verbose: *verbose,
                dry_run: *dry_run,
            };
            build::configure_and_build(&config, &options, root)
        }
        Commands::Run { target, quick } => {
            let config = config::load_config(root)?;
            runner::run(&config, root, target.as_deref(), *quick)
        }
        Commands::Clean => build::clean(root),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
    }
}
