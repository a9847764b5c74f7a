//! Configuration file parsing (`kiln.toml`).
//!
//! The config file is optional. A project with no `kiln.toml` gets the
//! directory name as its project name and the default C++ standard, so a
//! conventional tree builds with zero setup.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "kiln.toml";

#[derive(Deserialize, Debug, Default)]
pub struct KilnConfig {
    #[serde(default)]
    pub package: PackageConfig,
    pub features: Option<HashMap<String, bool>>,
}

#[derive(Deserialize, Debug)]
pub struct PackageConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_edition")]
    pub edition: String,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            edition: default_edition(),
        }
    }
}

fn default_edition() -> String {
    "c++17".to_string()
}

/// Load `kiln.toml` from the project root, falling back to defaults when the
/// file is absent. An empty package name resolves to the root directory name.
pub fn load_config(root: &Path) -> Result<KilnConfig> {
    let path = root.join(CONFIG_FILE);

    let mut config: KilnConfig = if path.exists() {
        let config_str = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {} - check file permissions", CONFIG_FILE))?;
        toml::from_str(&config_str).with_context(|| {
            format!(
                "Failed to parse {} - check for syntax errors (missing quotes, brackets)",
                CONFIG_FILE
            )
        })?
    } else {
        KilnConfig::default()
    };

    if config.package.name.is_empty() {
        config.package.name = project_name_from_dir(root);
    }

    Ok(config)
}

fn project_name_from_dir(root: &Path) -> String {
    root.canonicalize()
        .ok()
        .as_deref()
        .unwrap_or(root)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "app".to_string())
}
