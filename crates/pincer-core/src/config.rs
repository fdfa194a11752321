//! Tool configuration loaded from `pincer.toml` alongside the manifest.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pincer_util::errors::PincerError;

use crate::marker::MarkerEnvironment;

/// Configuration filename looked up next to the manifest.
pub const CONFIG_FILE_NAME: &str = "pincer.toml";

/// Per-project tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub relax: RelaxConfig,

    /// Marker variables assumed when filtering entries by environment,
    /// e.g. `python_version = "3.11"`.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// Relax policy from the `[relax]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelaxConfig {
    /// Packages whose upper bounds are kept even without a strict
    /// annotation.
    #[serde(default)]
    pub keep: Vec<String>,
}

impl ToolConfig {
    /// Load configuration from `pincer.toml` in the given directory, or
    /// return defaults if the file doesn't exist.
    pub fn load_dir(dir: &Path) -> miette::Result<Self> {
        Self::load(&dir.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from an explicit path, or return defaults if the
    /// file doesn't exist.
    pub fn load(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| PincerError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        toml::from_str(&content).map_err(|e| {
            PincerError::Config {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    /// The marker environment implied by the `[env]` table.
    pub fn marker_environment(&self) -> MarkerEnvironment {
        let mut env = MarkerEnvironment::new();
        for (key, value) in &self.env {
            env.set(key, value);
        }
        env
    }
}

/// The directory a manifest lives in, used as the config lookup root.
pub fn config_root(manifest_path: &Path) -> PathBuf {
    manifest_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
