//! # kiln - convention-driven C++ build front-end
//!
//! kiln inspects a project's directory layout at configure time and
//! synthesizes a consistent set of build targets - core library, main
//! program, test binary, and experimental "spike" programs - with uniform
//! compiler flags, preprocessor definitions, and feature toggles, then
//! drives CMake to build them.
//!
//! ## Conventional layout
//!
//! ```text
//! include/   public headers
//! src/       main program sources
//! lib/       core library sources
//! tests/     test binary sources
//! spikes/    one experimental program per subdirectory
//! ```
//!
//! Whichever directories exist decide which targets get synthesized; there
//! is nothing to declare. Artifacts land under `build/bin` and `build/lib`.
//!
//! ## Quick Start
//!
//! ```bash
//! # Configure and build everything
//! kiln build
//!
//! # Build one file as the whole program, then run it
//! kiln build --quick --target scratch
//! kiln run --quick
//! ```
//!
//! ## Module Organization
//!
//! - [`layout`] - filesystem scanning of the conventional directories
//! - [`synth`] - pure target synthesis from a scanned layout
//! - [`policy`] - centralized warning/definition/standard policy
//! - [`generate`] - generated CMake project and target manifest
//! - [`build`] - configure/build driver and cleanup
//! - [`runner`] - artifact launcher

/// Configure/build driver and artifact cleanup.
pub mod build;

/// Configuration file parsing (`kiln.toml`).
pub mod config;

/// Generated CMake project and target manifest.
pub mod generate;

/// Filesystem scanning of the conventional project layout.
pub mod layout;

/// Warning flags, C++ standard, and preprocessor definition policy.
pub mod policy;

/// Built-artifact launcher.
pub mod runner;

/// Target synthesis from a scanned layout.
pub mod synth;

/// Terminal UI utilities (tables).
pub mod ui;
