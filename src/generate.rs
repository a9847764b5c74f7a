//! Generated build-system files.
//!
//! The synthesized target set is materialized as a CMake project under
//! `build/gen/`, which the driver then hands to the external configure and
//! build steps. Source paths are anchored on an absolute `KILN_ROOT`
//! variable so the generated project can live outside the source tree.
//! A `targets.json` manifest is written next to it for IDE integration.

use crate::config::KilnConfig;
use crate::policy;
use crate::synth::{Target, TargetKind};
use anyhow::{Context, Result};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

/// Output directory convention, owned jointly with the external tool:
/// `build/bin` holds executables, `build/lib` holds libraries, `build/gen`
/// the generated CMake project, `build/obj` the external tool's own state.
pub const OUT_DIR: &str = "build";
pub const GEN_DIR: &str = "gen";
pub const OBJ_DIR: &str = "obj";
pub const BIN_DIR: &str = "bin";
pub const LIB_DIR: &str = "lib";

pub fn out_dir(root: &Path) -> PathBuf {
    root.join(OUT_DIR)
}

pub fn gen_dir(root: &Path) -> PathBuf {
    out_dir(root).join(GEN_DIR)
}

pub fn obj_dir(root: &Path) -> PathBuf {
    out_dir(root).join(OBJ_DIR)
}

pub fn bin_dir(root: &Path) -> PathBuf {
    out_dir(root).join(BIN_DIR)
}

/// Render the CMakeLists.txt for a synthesized target set.
pub fn emit_cmake(config: &KilnConfig, targets: &[Target], root_abs: &Path) -> String {
    let mut out = String::new();
    let root_str = root_abs.display().to_string().replace('\\', "/");
    let standard = policy::standard_number(&config.package.edition);

    out.push_str("cmake_minimum_required(VERSION 3.16)\n");
    out.push_str(&format!("project({} CXX)\n\n", config.package.name));
    out.push_str(&format!("set(CMAKE_CXX_STANDARD {})\n", standard));
    out.push_str("set(CMAKE_CXX_STANDARD_REQUIRED ON)\n");
    out.push_str("set(CMAKE_CXX_EXTENSIONS OFF)\n\n");
    out.push_str(&format!("set(KILN_ROOT \"{}\")\n", root_str));
    out.push_str(&format!(
        "set(CMAKE_RUNTIME_OUTPUT_DIRECTORY \"${{KILN_ROOT}}/{}/{}\")\n",
        OUT_DIR, BIN_DIR
    ));
    out.push_str(&format!(
        "set(CMAKE_ARCHIVE_OUTPUT_DIRECTORY \"${{KILN_ROOT}}/{}/{}\")\n",
        OUT_DIR, LIB_DIR
    ));
    out.push_str(&format!(
        "set(CMAKE_LIBRARY_OUTPUT_DIRECTORY \"${{KILN_ROOT}}/{}/{}\")\n",
        OUT_DIR, LIB_DIR
    ));

    for target in targets {
        out.push('\n');
        emit_target(&mut out, target);
    }

    out
}

fn emit_target(out: &mut String, target: &Target) {
    match target.kind {
        TargetKind::Library => {
            out.push_str(&format!("add_library({} STATIC\n", target.name));
        }
        _ => {
            out.push_str(&format!("add_executable({}\n", target.name));
        }
    }
    for source in &target.sources {
        out.push_str(&format!(
            "  \"${{KILN_ROOT}}/{}\"\n",
            source.display().to_string().replace('\\', "/")
        ));
    }
    out.push_str(")\n");

    for include in &target.include_dirs {
        let scope = if target.kind == TargetKind::Library {
            "PUBLIC"
        } else {
            "PRIVATE"
        };
        out.push_str(&format!(
            "target_include_directories({} {} \"${{KILN_ROOT}}/{}\")\n",
            target.name,
            scope,
            include.display().to_string().replace('\\', "/")
        ));
    }

    if !target.warnings.is_empty() {
        out.push_str(&format!(
            "target_compile_options({} PRIVATE {})\n",
            target.name,
            target.warnings.join(" ")
        ));
    }

    if !target.definitions.is_empty() {
        out.push_str(&format!(
            "target_compile_definitions({} PRIVATE {})\n",
            target.name,
            target.definitions.join(" ")
        ));
    }

    if let Some(library) = &target.depends_on {
        out.push_str(&format!(
            "target_link_libraries({} PRIVATE {})\n",
            target.name, library
        ));
    }
}

/// Write the generated CMake project and the target manifest under the
/// output directory. Returns the generated project directory.
pub fn write_project(config: &KilnConfig, targets: &[Target], root: &Path) -> Result<PathBuf> {
    let root_abs = root
        .canonicalize()
        .context("Failed to resolve the project root path")?;

    let r#gen = gen_dir(root);
    fs::create_dir_all(&r#gen).context("Failed to create the output directory")?;

    let cmake = emit_cmake(config, targets, &root_abs);
    fs::write(r#gen.join("CMakeLists.txt"), cmake)
        .context("Failed to write the generated CMakeLists.txt")?;

    let manifest = targets_manifest(targets);
    fs::write(
        out_dir(root).join("targets.json"),
        serde_json::to_string_pretty(&manifest)?,
    )
    .context("Failed to write targets.json")?;

    Ok(r#gen)
}

fn targets_manifest(targets: &[Target]) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = targets
        .iter()
        .map(|t| {
            json!({
                "name": t.name,
                "kind": t.kind.label(),
                "sources": t.sources.iter().map(|s| s.display().to_string()).collect::<Vec<_>>(),
                "definitions": t.definitions,
                "depends_on": t.depends_on,
            })
        })
        .collect();
    json!({ "targets": entries })
}
