//! Diff command implementation.

use std::path::Path;

use miette::Result;

pub fn exec(old: &Path, new: &Path, verbose: bool) -> Result<()> {
    pincer_ops::ops_diff::diff(old, new, verbose)
}
