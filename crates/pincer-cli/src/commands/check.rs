//! Check command implementation.

use std::path::Path;

use miette::Result;

pub fn exec(manifest: &Path, verbose: bool) -> Result<()> {
    pincer_ops::ops_check::check(manifest, verbose)
}
