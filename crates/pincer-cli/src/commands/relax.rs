//! Relax command implementation.

use std::path::Path;

use miette::Result;

pub fn exec(manifest: &Path, output: Option<&Path>, dry_run: bool, verbose: bool) -> Result<()> {
    pincer_ops::ops_relax::relax(manifest, output, dry_run, verbose)
}
