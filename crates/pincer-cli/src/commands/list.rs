//! List command implementation.

use std::path::Path;

use miette::Result;

pub fn exec(manifest: &Path, format: &str, package: Option<&str>, applicable: bool) -> Result<()> {
    pincer_ops::ops_list::list(manifest, format, package, applicable)
}
