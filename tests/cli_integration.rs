//! Integration tests for the kiln CLI.
//!
//! These drive the built `kiln` binary against temporary projects and check
//! the process-level contract: exit statuses and one-line diagnostics. None
//! of them require CMake - they exercise the paths that fail or finish
//! before the external tool is spawned.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Get the path to the kiln binary built by cargo.
fn kiln_binary() -> PathBuf {
    let target_dir = std::env::var_os("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("target"));

    let bin_name = if cfg!(windows) { "kiln.exe" } else { "kiln" };
    target_dir.join("debug").join(bin_name)
}

/// Create a temporary project with a single main source file.
fn scratch_project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp project");
    fs::create_dir_all(dir.path().join("src")).expect("Failed to create src");
    fs::write(
        dir.path().join("src").join("main.cpp"),
        "int main() { return 0; }\n",
    )
    .expect("Failed to write main.cpp");
    dir
}

#[test]
fn test_clean_twice_exits_zero_both_times() {
    let kiln = kiln_binary();
    if !kiln.exists() {
        eprintln!("Skipping test: kiln binary not found at {:?}", kiln);
        return;
    }

    let project = scratch_project();
    fs::create_dir_all(project.path().join("build").join("bin")).unwrap();

    let first = Command::new(&kiln)
        .arg("clean")
        .current_dir(project.path())
        .output()
        .expect("Failed to execute kiln clean");
    assert!(first.status.success(), "first clean failed");
    assert!(!project.path().join("build").exists());

    let second = Command::new(&kiln)
        .arg("clean")
        .current_dir(project.path())
        .output()
        .expect("Failed to execute kiln clean");
    assert!(second.status.success(), "clean of a clean tree must succeed");
}

#[test]
fn test_run_missing_artifact_exits_one() {
    let kiln = kiln_binary();
    if !kiln.exists() {
        eprintln!("Skipping test: kiln binary not found at {:?}", kiln);
        return;
    }

    let project = scratch_project();
    let output = Command::new(&kiln)
        .args(["run", "--target", "ghost"])
        .current_dir(project.path())
        .output()
        .expect("Failed to execute kiln run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("not found"),
        "diagnostic should name the missing artifact, got: {}",
        stderr
    );
}

#[test]
fn test_build_quick_without_target_exits_one() {
    let kiln = kiln_binary();
    if !kiln.exists() {
        eprintln!("Skipping test: kiln binary not found at {:?}", kiln);
        return;
    }

    let project = scratch_project();
    let output = Command::new(&kiln)
        .args(["build", "--quick"])
        .current_dir(project.path())
        .output()
        .expect("Failed to execute kiln build --quick");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("requires a target name"),
        "got: {}",
        stderr
    );
}

#[test]
fn test_build_quick_with_unknown_target_exits_one() {
    let kiln = kiln_binary();
    if !kiln.exists() {
        eprintln!("Skipping test: kiln binary not found at {:?}", kiln);
        return;
    }

    let project = scratch_project();
    let output = Command::new(&kiln)
        .args(["build", "--quick", "--target", "missing"])
        .current_dir(project.path())
        .output()
        .expect("Failed to execute kiln build --quick --target missing");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing"), "got: {}", stderr);
}

#[test]
fn test_build_dry_run_prints_commands_without_output_dir() {
    let kiln = kiln_binary();
    if !kiln.exists() {
        eprintln!("Skipping test: kiln binary not found at {:?}", kiln);
        return;
    }

    let project = scratch_project();
    let output = Command::new(&kiln)
        .args(["build", "--dry-run"])
        .current_dir(project.path())
        .output()
        .expect("Failed to execute kiln build --dry-run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Would execute"), "got: {}", stdout);
    assert!(
        !project.path().join("build").exists(),
        "dry run must not create the output directory"
    );
}

#[cfg(unix)]
#[test]
fn test_run_propagates_artifact_exit_status() {
    use std::os::unix::fs::PermissionsExt;

    let kiln = kiln_binary();
    if !kiln.exists() {
        eprintln!("Skipping test: kiln binary not found at {:?}", kiln);
        return;
    }

    let project = scratch_project();
    let bin_dir = project.path().join("build").join("bin");
    fs::create_dir_all(&bin_dir).unwrap();
    let artifact = bin_dir.join("widget");
    fs::write(&artifact, "#!/bin/sh\nexit 7\n").unwrap();
    fs::set_permissions(&artifact, fs::Permissions::from_mode(0o755)).unwrap();

    let output = Command::new(&kiln)
        .args(["run", "--target", "widget"])
        .current_dir(project.path())
        .output()
        .expect("Failed to execute kiln run");

    assert_eq!(output.status.code(), Some(7), "exit status must pass through");
}
