//! Configuration loading for the cohesion analyzer
//!
//! Reads the `[tool.cohesion]` section of `pyproject.toml`, discovered by
//! walking up from the analyzed path. Command line flags take precedence
//! over the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    /// Flag classes whose cohesion is below this percentage.
    #[serde(default)]
    pub below: Option<f64>,

    /// Flag classes whose cohesion is above this percentage.
    #[serde(default)]
    pub above: Option<f64>,

    /// Path patterns to skip during file discovery.
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Find a pyproject.toml with a `[tool.cohesion]` section, walking up from
/// the given path.
pub fn find_config_pyproject_toml(start_path: &Path) -> Option<PathBuf> {
    let mut current = if start_path.is_file() {
        start_path.parent()?
    } else {
        start_path
    };

    loop {
        let pyproject = current.join("pyproject.toml");
        if pyproject.exists() {
            if let Ok(content) = std::fs::read_to_string(&pyproject) {
                if let Ok(value) = toml::from_str::<toml::Value>(&content) {
                    if value.get("tool").and_then(|t| t.get("cohesion")).is_some() {
                        return Some(pyproject);
                    }
                }
            }
        }

        current = current.parent()?;
    }
}

/// Load configuration from an explicit path, or search from the current
/// directory when none is given. Absence and malformed sections both read
/// as "no configuration".
pub fn load_config(path: Option<&Path>) -> Option<Config> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            p.to_path_buf()
        } else {
            return None;
        }
    } else {
        find_config_pyproject_toml(&std::env::current_dir().ok()?)?
    };

    let content = std::fs::read_to_string(&config_path).ok()?;
    let value: toml::Value = toml::from_str(&content).ok()?;
    let section = value.get("tool")?.get("cohesion")?;

    section.clone().try_into().ok()
}

/// Merge config file settings with command line arguments; the command line
/// wins wherever both are set.
pub fn merge_config(
    config: Option<&Config>,
    cli_below: Option<f64>,
    cli_above: Option<f64>,
    cli_skip: &[String],
) -> (Option<f64>, Option<f64>, Vec<String>) {
    let mut below = cli_below;
    let mut above = cli_above;
    let mut exclude = Vec::new();

    if let Some(cfg) = config {
        below = below.or(cfg.below);
        above = above.or(cfg.above);
        exclude.extend(cfg.exclude.iter().cloned());
    }

    exclude.extend(cli_skip.iter().cloned());

    let defaults = [
        ".venv",
        "venv",
        "__pycache__",
        ".git",
        ".tox",
        "build",
        "dist",
        ".pytest_cache",
        "node_modules",
    ];
    for default in defaults {
        if !exclude.contains(&default.to_string()) {
            exclude.push(default.to_string());
        }
    }

    (below, above, exclude)
}
