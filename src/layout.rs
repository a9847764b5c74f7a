//! Filesystem scanning for the conventional project layout.
//!
//! A kiln project is discovered, not declared: whichever of the
//! conventional directories exist decide which build targets get
//! synthesized.
//!
//! ## Conventional roles
//!
//! - `include/` - public headers
//! - `src/` - main program sources
//! - `lib/` - core library sources
//! - `tests/` - test binary sources
//! - `spikes/<name>/` - one experimental program per subdirectory
//!
//! The scan is a pure read of the tree: it produces an immutable
//! [`ProjectLayout`] snapshot and is recomputed from scratch on every
//! configuration run. A role directory that is missing simply yields an
//! empty file list; a role directory that exists but cannot be read is a
//! [`LayoutError`], so "no library" is never confused with "lib/ exists
//! but permission denied".

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const ROLE_HEADERS: &str = "include";
pub const ROLE_MAIN: &str = "src";
pub const ROLE_LIB: &str = "lib";
pub const ROLE_TESTS: &str = "tests";
pub const ROLE_SPIKES: &str = "spikes";

pub const SOURCE_EXTENSIONS: &[&str] = &["cpp", "cc", "cxx"];
pub const HEADER_EXTENSIONS: &[&str] = &["h", "hpp", "hh"];

/// Immutable snapshot of the conventional directories and their files.
///
/// All file paths are relative to `root`, in walk order (entries sorted by
/// file name), so two scans of an identical tree produce identical layouts.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    pub root: PathBuf,
    /// Present iff `include/` exists; becomes the include path of targets.
    pub include_dir: Option<PathBuf>,
    pub headers: Vec<PathBuf>,
    pub main_sources: Vec<PathBuf>,
    pub lib_sources: Vec<PathBuf>,
    pub test_sources: Vec<PathBuf>,
    /// Immediate subdirectories of `spikes/`, sorted by name. Subdirectories
    /// without sources are kept here; the synthesizer skips them.
    pub spikes: Vec<SpikeDir>,
}

#[derive(Debug, Clone)]
pub struct SpikeDir {
    pub name: String,
    pub sources: Vec<PathBuf>,
}

#[derive(Debug)]
pub enum LayoutError {
    /// A role directory exists but could not be read.
    Unreadable {
        role: String,
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::Unreadable { role, path, source } => write!(
                f,
                "{} directory exists but is not readable: {} ({})",
                role,
                path.display(),
                source
            ),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Scan the project tree rooted at `root`.
pub fn scan(root: &Path) -> Result<ProjectLayout, LayoutError> {
    let include_path = root.join(ROLE_HEADERS);
    let include_dir = if include_path.is_dir() {
        Some(PathBuf::from(ROLE_HEADERS))
    } else {
        None
    };

    Ok(ProjectLayout {
        root: root.to_path_buf(),
        include_dir,
        headers: scan_role(root, ROLE_HEADERS, HEADER_EXTENSIONS)?,
        main_sources: scan_role(root, ROLE_MAIN, SOURCE_EXTENSIONS)?,
        lib_sources: scan_role(root, ROLE_LIB, SOURCE_EXTENSIONS)?,
        test_sources: scan_role(root, ROLE_TESTS, SOURCE_EXTENSIONS)?,
        spikes: scan_spikes(root)?,
    })
}

fn matches_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .map(|ext| {
            let s = ext.to_string_lossy().to_lowercase();
            extensions.contains(&s.as_str())
        })
        .unwrap_or(false)
}

/// Recursively collect matching files under `root/<role>`, relative to
/// `root`. A missing directory is "role absent" and yields an empty list.
fn scan_role(root: &Path, role: &str, extensions: &[&str]) -> Result<Vec<PathBuf>, LayoutError> {
    let dir = root.join(role);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    walk_sources(root, &dir, role, extensions)
}

fn walk_sources(
    root: &Path,
    dir: &Path,
    role: &str,
    extensions: &[&str],
) -> Result<Vec<PathBuf>, LayoutError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| LayoutError::Unreadable {
            role: role.to_string(),
            path: dir.to_path_buf(),
            source: e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("walk aborted")),
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && matches_extension(path, extensions) {
            files.push(path.strip_prefix(root).unwrap_or(path).to_path_buf());
        }
    }
    Ok(files)
}

/// List the immediate subdirectories of `spikes/` and scan each for sources.
fn scan_spikes(root: &Path) -> Result<Vec<SpikeDir>, LayoutError> {
    let dir = root.join(ROLE_SPIKES);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let unreadable = |source: std::io::Error| LayoutError::Unreadable {
        role: ROLE_SPIKES.to_string(),
        path: dir.clone(),
        source,
    };

    let mut subdirs = Vec::new();
    for entry in fs::read_dir(&dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        if entry.path().is_dir() {
            subdirs.push(entry.path());
        }
    }
    subdirs.sort();

    let mut spikes = Vec::new();
    for subdir in subdirs {
        let name = subdir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let role = format!("{}/{}", ROLE_SPIKES, name);
        let sources = walk_sources(root, &subdir, &role, SOURCE_EXTENSIONS)?;
        spikes.push(SpikeDir { name, sources });
    }
    Ok(spikes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "// test fixture\n").unwrap();
    }

    #[test]
    fn test_absent_roles_yield_empty_lists() {
        let dir = tempfile::tempdir().unwrap();
        let layout = scan(dir.path()).unwrap();
        assert!(layout.include_dir.is_none());
        assert!(layout.headers.is_empty());
        assert!(layout.main_sources.is_empty());
        assert!(layout.lib_sources.is_empty());
        assert!(layout.test_sources.is_empty());
        assert!(layout.spikes.is_empty());
    }

    #[test]
    fn test_sources_are_filtered_and_ordered() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/zeta.cpp");
        touch(dir.path(), "src/alpha.cpp");
        touch(dir.path(), "src/notes.txt");
        touch(dir.path(), "src/io/file.cc");

        let layout = scan(dir.path()).unwrap();
        assert_eq!(
            layout.main_sources,
            vec![
                PathBuf::from("src/alpha.cpp"),
                PathBuf::from("src/io/file.cc"),
                PathBuf::from("src/zeta.cpp"),
            ]
        );
    }

    #[test]
    fn test_include_dir_detected_with_headers() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "include/widget.hpp");
        touch(dir.path(), "include/detail/impl.h");

        let layout = scan(dir.path()).unwrap();
        assert_eq!(layout.include_dir, Some(PathBuf::from("include")));
        assert_eq!(layout.headers.len(), 2);
    }

    #[test]
    fn test_spike_subdirs_listed_even_without_sources() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "spikes/net/poll.cpp");
        fs::create_dir_all(dir.path().join("spikes/empty")).unwrap();

        let layout = scan(dir.path()).unwrap();
        assert_eq!(layout.spikes.len(), 2);
        assert_eq!(layout.spikes[0].name, "empty");
        assert!(layout.spikes[0].sources.is_empty());
        assert_eq!(layout.spikes[1].name, "net");
        assert_eq!(layout.spikes[1].sources, vec![PathBuf::from("spikes/net/poll.cpp")]);
    }

    #[test]
    fn test_scans_of_identical_tree_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/main.cpp");
        touch(dir.path(), "lib/core.cpp");
        touch(dir.path(), "tests/core_test.cpp");

        let a = scan(dir.path()).unwrap();
        let b = scan(dir.path()).unwrap();
        assert_eq!(a.main_sources, b.main_sources);
        assert_eq!(a.lib_sources, b.lib_sources);
        assert_eq!(a.test_sources, b.test_sources);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_role_is_an_error_not_absent() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let lib = dir.path().join("lib");
        fs::create_dir(&lib).unwrap();
        fs::write(lib.join("core.cpp"), "").unwrap();
        fs::set_permissions(&lib, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits don't bind root; nothing to assert there.
        if fs::read_dir(&lib).is_ok() {
            fs::set_permissions(&lib, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = scan(dir.path());

        // Restore so the tempdir can be removed.
        fs::set_permissions(&lib, fs::Permissions::from_mode(0o755)).unwrap();

        let err = result.expect_err("unreadable lib/ must not scan as absent");
        let msg = err.to_string();
        assert!(msg.contains("lib"), "diagnostic names the role: {}", msg);
        assert!(msg.contains("not readable"), "got: {}", msg);
    }
}
