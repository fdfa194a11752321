//! Command dispatch and handler modules.

mod check;
mod diff;
mod list;
mod relax;

use std::path::PathBuf;

use miette::Result;
use pincer_core::DEFAULT_MANIFEST_NAME;
use pincer_util::errors::PincerError;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Diff { old, new } => diff::exec(&old, &new, cli.verbose),
        Command::Check => {
            let manifest = resolve_manifest(cli.manifest)?;
            check::exec(&manifest, cli.verbose)
        }
        Command::Relax { output, dry_run } => {
            let manifest = resolve_manifest(cli.manifest)?;
            relax::exec(&manifest, output.as_deref(), dry_run, cli.verbose)
        }
        Command::List {
            format,
            package,
            applicable,
        } => {
            let manifest = resolve_manifest(cli.manifest)?;
            list::exec(&manifest, &format, package.as_deref(), applicable)
        }
    }
}

/// Use the explicit `--manifest` path, or walk up from the current
/// directory looking for the default manifest name.
fn resolve_manifest(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let cwd = std::env::current_dir().map_err(PincerError::Io)?;
    match pincer_util::fs::find_ancestor_with(&cwd, DEFAULT_MANIFEST_NAME) {
        Some(dir) => Ok(dir.join(DEFAULT_MANIFEST_NAME)),
        None => Err(PincerError::Manifest {
            message: format!(
                "No {DEFAULT_MANIFEST_NAME} found in {} or any parent directory",
                cwd.display()
            ),
        }
        .into()),
    }
}
