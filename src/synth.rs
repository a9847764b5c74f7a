//! Target synthesis.
//!
//! Pure decision logic: [`synthesize`] maps a scanned [`ProjectLayout`] plus
//! the resolved [`FeatureSet`] to the ordered list of build targets, without
//! touching the filesystem or spawning anything. The effectful driver in
//! [`crate::build`] hands the result to the generator; keeping this function
//! pure is what lets the whole decision table be unit tested without CMake
//! installed.
//!
//! Emission order is fixed - library, primary executable, test binary, then
//! spikes in directory-scan order - so repeated runs over an identical tree
//! produce identical target sequences.

use crate::config::KilnConfig;
use crate::layout::ProjectLayout;
use crate::policy::{self, FeatureSet};
use std::path::PathBuf;

/// Spike targets are named by prefixing their subdirectory name, which makes
/// collisions impossible: subdirectory names are unique within `spikes/`.
pub const SPIKE_PREFIX: &str = "spike_";

/// In quick mode the primary executable takes this fixed name, so the built
/// artifact always lands at `build/bin/quick` for `kiln run --quick`.
pub const QUICK_TARGET_NAME: &str = "quick";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Library,
    Executable,
    TestExecutable,
    SpikeExecutable,
}

impl TargetKind {
    pub fn label(self) -> &'static str {
        match self {
            TargetKind::Library => "library",
            TargetKind::Executable => "executable",
            TargetKind::TestExecutable => "test",
            TargetKind::SpikeExecutable => "spike",
        }
    }
}

/// One buildable unit with its own sources, flags, and definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub name: String,
    pub kind: TargetKind,
    pub sources: Vec<PathBuf>,
    pub include_dirs: Vec<PathBuf>,
    pub definitions: Vec<String>,
    pub warnings: Vec<String>,
    /// Name of the library target this one links against, if any. At most
    /// one, and only when that library was actually synthesized.
    pub depends_on: Option<String>,
}

#[derive(Debug)]
pub enum SynthError {
    /// Quick mode selected without a target name.
    QuickTargetMissing,
    /// The requested quick target matched no file in `src/`.
    QuickNoMatch { name: String },
    /// The requested quick target matched more than one file.
    QuickAmbiguous {
        name: String,
        candidates: Vec<PathBuf>,
    },
}

impl std::fmt::Display for SynthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SynthError::QuickTargetMissing => {
                write!(f, "quick mode requires a target name (--target <name>)")
            }
            SynthError::QuickNoMatch { name } => {
                write!(f, "no source file in src/ matches quick target '{}'", name)
            }
            SynthError::QuickAmbiguous { name, candidates } => {
                let listed: Vec<String> = candidates
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect();
                write!(
                    f,
                    "quick target '{}' is ambiguous, matches: {}",
                    name,
                    listed.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for SynthError {}

pub fn library_name(project: &str) -> String {
    format!("{}_core", project)
}

pub fn test_target_name(project: &str) -> String {
    format!("{}_tests", project)
}

/// Synthesize the ordered target set for a scanned layout.
///
/// `quick` restricts the primary executable to the single `src/` file whose
/// stem (or full file name) matches `quick_target`; no match and ambiguous
/// matches are hard errors, never a silent fallback to the full source list.
/// `extra_define` is the CLI `--define` value, applied to the primary
/// executable only.
pub fn synthesize(
    layout: &ProjectLayout,
    config: &KilnConfig,
    features: &FeatureSet,
    quick: bool,
    quick_target: Option<&str>,
    extra_define: Option<&str>,
) -> Result<Vec<Target>, SynthError> {
    let project = config.package.name.as_str();
    let include_dirs: Vec<PathBuf> = layout.include_dir.iter().cloned().collect();

    let mut targets = Vec::new();

    // 1. Core library, iff lib/ contributed sources.
    let library = (!layout.lib_sources.is_empty()).then(|| library_name(project));
    if let Some(lib_name) = &library {
        targets.push(make_target(
            lib_name.clone(),
            TargetKind::Library,
            layout.lib_sources.clone(),
            &include_dirs,
            features,
            None,
        ));
    }

    // 2. Exactly one primary executable.
    let (exe_name, exe_sources) = if quick {
        let name = quick_target.ok_or(SynthError::QuickTargetMissing)?;
        let sources = select_quick_source(layout, name)?;
        (QUICK_TARGET_NAME.to_string(), sources)
    } else {
        (project.to_string(), layout.main_sources.clone())
    };
    let mut exe = make_target(
        exe_name,
        TargetKind::Executable,
        exe_sources,
        &include_dirs,
        features,
        library.clone(),
    );
    if let Some(define) = extra_define {
        exe.definitions.push(define.to_string());
    }
    targets.push(exe);

    // 3. Test binary, iff tests/ contributed sources.
    if !layout.test_sources.is_empty() {
        targets.push(make_target(
            test_target_name(project),
            TargetKind::TestExecutable,
            layout.test_sources.clone(),
            &include_dirs,
            features,
            library.clone(),
        ));
    }

    // 4. One spike per populated spike subdirectory, in scan order.
    for spike in &layout.spikes {
        if spike.sources.is_empty() {
            continue;
        }
        targets.push(make_target(
            format!("{}{}", SPIKE_PREFIX, spike.name),
            TargetKind::SpikeExecutable,
            spike.sources.clone(),
            &include_dirs,
            features,
            library.clone(),
        ));
    }

    Ok(targets)
}

fn select_quick_source(layout: &ProjectLayout, name: &str) -> Result<Vec<PathBuf>, SynthError> {
    let matches: Vec<PathBuf> = layout
        .main_sources
        .iter()
        .filter(|path| {
            let stem_match = path
                .file_stem()
                .map(|s| s.to_string_lossy() == name)
                .unwrap_or(false);
            let file_match = path
                .file_name()
                .map(|s| s.to_string_lossy() == name)
                .unwrap_or(false);
            stem_match || file_match
        })
        .cloned()
        .collect();

    match matches.len() {
        0 => Err(SynthError::QuickNoMatch {
            name: name.to_string(),
        }),
        1 => Ok(matches),
        _ => Err(SynthError::QuickAmbiguous {
            name: name.to_string(),
            candidates: matches,
        }),
    }
}

fn make_target(
    name: String,
    kind: TargetKind,
    sources: Vec<PathBuf>,
    include_dirs: &[PathBuf],
    features: &FeatureSet,
    depends_on: Option<String>,
) -> Target {
    Target {
        name,
        kind,
        sources,
        include_dirs: include_dirs.to_vec(),
        definitions: policy::definitions(kind, features),
        warnings: policy::warning_flags(kind),
        depends_on,
    }
}
