//! Flag and definition policy.
//!
//! Every compiler-facing literal lives here: the uniform warning set, the
//! C++ standard normalization, and the per-kind preprocessor definitions.
//! The synthesizer sources all of these from this module, so changing a
//! warning flag or a definition affects every target kind in one place.

use crate::synth::TargetKind;
use std::collections::BTreeMap;

/// Warnings applied to every synthesized target, regardless of kind.
pub const WARNING_FLAGS: &[&str] = &["-Wall", "-Wextra", "-Wpedantic"];

/// Defined for the test binary only.
pub const TESTING_DEFINE: &str = "KILN_TESTING";

/// Defined for spike binaries only.
pub const SPIKE_DEFINE: &str = "KILN_SPIKE";

/// Boolean toggles resolved once at configure time from `[features]` in
/// `kiln.toml`. Enabled toggles become identical preprocessor definitions
/// on every target kind that opts in (library and primary executable).
///
/// Held sorted so the emitted definition order is deterministic.
#[derive(Debug, Clone, Default)]
pub struct FeatureSet {
    toggles: BTreeMap<String, bool>,
}

impl FeatureSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_toggles<I>(toggles: I) -> Self
    where
        I: IntoIterator<Item = (String, bool)>,
    {
        Self {
            toggles: toggles.into_iter().collect(),
        }
    }

    /// Names of the enabled toggles, in sorted order.
    pub fn enabled(&self) -> impl Iterator<Item = &str> {
        self.toggles
            .iter()
            .filter(|&(_, &on)| on)
            .map(|(name, _)| name.as_str())
    }
}

/// The uniform warning set. Kind is accepted so a future per-kind override
/// has one obvious seam, but today every kind gets the same flags.
pub fn warning_flags(_kind: TargetKind) -> Vec<String> {
    WARNING_FLAGS.iter().map(|f| f.to_string()).collect()
}

/// Preprocessor definitions for a target kind. Feature toggles are opt-in
/// per kind: the library and primary executable receive them, test and
/// spike binaries never do, so flipping a toggle cannot force their
/// recompilation.
pub fn definitions(kind: TargetKind, features: &FeatureSet) -> Vec<String> {
    match kind {
        TargetKind::Library | TargetKind::Executable => {
            features.enabled().map(feature_define).collect()
        }
        TargetKind::TestExecutable => vec![TESTING_DEFINE.to_string()],
        TargetKind::SpikeExecutable => vec![SPIKE_DEFINE.to_string()],
    }
}

/// The definition emitted for an enabled feature toggle. Identical wherever
/// it applies: `KILN_FEATURE_<NAME>=1`.
pub fn feature_define(name: &str) -> String {
    let upper = name.to_uppercase().replace(['-', ' '], "_");
    format!("KILN_FEATURE_{}=1", upper)
}

/// Normalize an edition string ("c++17", "gnu++2a", "-std=c++20") to the
/// bare standard number CMake expects in `CMAKE_CXX_STANDARD`.
pub fn standard_number(edition: &str) -> String {
    let normalized = edition.to_lowercase();
    let stripped = normalized.strip_prefix("-std=").unwrap_or(&normalized);
    let digits = stripped
        .trim_start_matches("gnu++")
        .trim_start_matches("c++");

    match digits {
        "03" | "98" => "98".to_string(),
        "0x" | "11" => "11".to_string(),
        "1y" | "14" => "14".to_string(),
        "1z" | "17" => "17".to_string(),
        "2a" | "20" => "20".to_string(),
        "2b" | "23" => "23".to_string(),
        "2c" | "26" => "26".to_string(),
        _ => "17".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_flags_uniform_across_kinds() {
        assert_eq!(
            warning_flags(TargetKind::Library),
            warning_flags(TargetKind::SpikeExecutable)
        );
        assert_eq!(
            warning_flags(TargetKind::Executable),
            warning_flags(TargetKind::TestExecutable)
        );
    }

    #[test]
    fn test_test_and_spike_definitions_are_exclusive() {
        let features = FeatureSet::empty();
        assert_eq!(
            definitions(TargetKind::TestExecutable, &features),
            vec!["KILN_TESTING"]
        );
        assert_eq!(
            definitions(TargetKind::SpikeExecutable, &features),
            vec!["KILN_SPIKE"]
        );
        assert!(definitions(TargetKind::Executable, &features).is_empty());
        assert!(definitions(TargetKind::Library, &features).is_empty());
    }

    #[test]
    fn test_feature_defines_only_on_library_and_executable() {
        let features = FeatureSet::from_toggles([
            ("telemetry".to_string(), true),
            ("legacy-io".to_string(), false),
        ]);
        let expected = vec!["KILN_FEATURE_TELEMETRY=1".to_string()];
        assert_eq!(definitions(TargetKind::Library, &features), expected);
        assert_eq!(definitions(TargetKind::Executable, &features), expected);
        assert_eq!(
            definitions(TargetKind::TestExecutable, &features),
            vec!["KILN_TESTING"]
        );
        assert_eq!(
            definitions(TargetKind::SpikeExecutable, &features),
            vec!["KILN_SPIKE"]
        );
    }

    #[test]
    fn test_feature_define_shape() {
        assert_eq!(feature_define("telemetry"), "KILN_FEATURE_TELEMETRY=1");
        assert_eq!(feature_define("legacy-io"), "KILN_FEATURE_LEGACY_IO=1");
    }

    #[test]
    fn test_enabled_toggles_sorted() {
        let features = FeatureSet::from_toggles([
            ("zlib".to_string(), true),
            ("arena".to_string(), true),
            ("off".to_string(), false),
        ]);
        let names: Vec<&str> = features.enabled().collect();
        assert_eq!(names, vec!["arena", "zlib"]);
    }

    #[test]
    fn test_standard_number_normalization() {
        assert_eq!(standard_number("c++17"), "17");
        assert_eq!(standard_number("c++20"), "20");
        assert_eq!(standard_number("gnu++2a"), "20");
        assert_eq!(standard_number("-std=c++23"), "23");
        assert_eq!(standard_number("c++0x"), "11");
    }

    #[test]
    fn test_standard_number_falls_back_to_default() {
        assert_eq!(standard_number("weird"), "17");
    }
}
