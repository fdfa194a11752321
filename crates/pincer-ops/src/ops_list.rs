//! Operation: list parsed manifest entries, as a table or as JSON.

use std::path::Path;

use pincer_core::config::{self, ToolConfig};
use pincer_core::entry::RequirementEntry;
use pincer_core::manifest::Manifest;
use pincer_util::errors::PincerError;

/// Print manifest entries. `package` filters to one package's alternative
/// ranges; `applicable` keeps only entries whose marker holds in the
/// configured environment.
pub fn list(
    manifest_path: &Path,
    format: &str,
    package: Option<&str>,
    applicable: bool,
) -> miette::Result<()> {
    let manifest = Manifest::from_path(manifest_path)?;
    let config = ToolConfig::load_dir(&config::config_root(manifest_path))?;
    let env = config.marker_environment();

    let entries: Vec<&RequirementEntry> = manifest
        .entries()
        .filter(|e| package.map(|p| e.name == p).unwrap_or(true))
        .filter(|e| !applicable || e.applies(&env))
        .collect();

    match format {
        "json" => {
            let rendered =
                serde_json::to_string_pretty(&entries).map_err(|e| PincerError::Generic {
                    message: format!("Failed to serialize entries: {e}"),
                })?;
            println!("{rendered}");
        }
        "table" => {
            for entry in &entries {
                let marker = entry
                    .marker
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<28} {:<30} {:<34} {}",
                    entry.name,
                    entry.specifiers.to_string(),
                    marker,
                    if entry.strict { "strict" } else { "" }
                );
            }
        }
        other => {
            return Err(PincerError::Generic {
                message: format!("Unknown output format '{other}' (expected table or json)"),
            }
            .into());
        }
    }

    Ok(())
}
