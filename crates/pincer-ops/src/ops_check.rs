//! Operation: parse a manifest and validate its constraints.

use std::path::Path;

use pincer_core::manifest::Manifest;
use pincer_util::errors::PincerError;
use pincer_util::progress;

/// Parse and validate a constraint manifest. Fails on any parse error or
/// constraint violation.
pub fn check(manifest_path: &Path, verbose: bool) -> miette::Result<()> {
    progress::status("Checking", &manifest_path.display().to_string());

    let manifest = Manifest::from_path(manifest_path)?;
    let entries = manifest.entries().count();
    let digest = manifest.digest();
    println!("{entries} entries, digest {}", &digest[..12]);

    let raw_digest = pincer_util::hash::sha256_file(manifest_path).map_err(PincerError::Io)?;
    if raw_digest != digest {
        progress::status_warn("Formatting", "manifest is not canonically formatted");
    }

    if verbose {
        for (name, count) in manifest.duplicate_packages() {
            progress::status_info(
                "Alternative",
                &format!("{name} declared {count} times (ranges are alternatives)"),
            );
        }
    }

    let report = manifest.validate();
    if report.is_empty() {
        progress::status("Finished", "check passed");
        Ok(())
    } else {
        eprintln!("{report}");
        Err(PincerError::Constraint {
            message: format!("{} constraint violation(s)", report.len()),
        }
        .into())
    }
}
