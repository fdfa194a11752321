//! Operation: drop advisory upper bounds from a manifest.

use std::path::Path;

use pincer_core::config::{self, ToolConfig};
use pincer_core::manifest::Manifest;
use pincer_core::relax;
use pincer_util::errors::PincerError;
use pincer_util::progress;

/// Apply the relax transformation. Writes in place unless `output` is
/// given; `dry_run` prints the transformed manifest to stdout instead.
pub fn relax(
    manifest_path: &Path,
    output: Option<&Path>,
    dry_run: bool,
    verbose: bool,
) -> miette::Result<()> {
    progress::status("Relaxing", &manifest_path.display().to_string());

    let mut manifest = Manifest::from_path(manifest_path)?;
    let config = ToolConfig::load_dir(&config::config_root(manifest_path))?;
    let outcome = relax::relax(&mut manifest, &config.relax.keep);

    tracing::debug!(
        dropped = outcome.dropped.len(),
        kept_strict = outcome.kept_strict,
        kept_policy = outcome.kept_policy,
        "relax pass complete"
    );

    if verbose {
        for bound in &outcome.dropped {
            progress::status_info("Dropped", &format!("{} {}", bound.package, bound.specifier));
        }
    }

    if dry_run {
        print!("{manifest}");
    } else {
        let target = output.unwrap_or(manifest_path);
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            pincer_util::fs::ensure_dir(parent).map_err(PincerError::Io)?;
        }
        std::fs::write(target, manifest.to_string()).map_err(PincerError::Io)?;
    }

    let mut summary = format!("dropped {} upper bound(s)", outcome.dropped.len());
    if outcome.kept_strict > 0 {
        summary.push_str(&format!(", kept {} strict", outcome.kept_strict));
    }
    if outcome.kept_policy > 0 {
        summary.push_str(&format!(", kept {} by policy", outcome.kept_policy));
    }
    progress::status("Finished", &summary);

    Ok(())
}
