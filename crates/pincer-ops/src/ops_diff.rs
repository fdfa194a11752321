//! Operation: structural diff of two constraint manifests.

use std::collections::BTreeMap;
use std::path::Path;

use pincer_core::manifest::Manifest;
use pincer_util::progress;

/// Compare two manifests entry-by-entry and print added (`+`), removed
/// (`-`), and changed constraints per package.
pub fn diff(old_path: &Path, new_path: &Path, verbose: bool) -> miette::Result<()> {
    let old = Manifest::from_path(old_path)?;
    let new = Manifest::from_path(new_path)?;

    let old_entries = entries_by_package(&old);
    let new_entries = entries_by_package(&new);

    let mut changes = 0usize;
    let mut unchanged = 0usize;

    for (name, old_ranges) in &old_entries {
        match new_entries.get(name) {
            None => {
                for range in old_ranges {
                    println!("- {range}");
                    changes += 1;
                }
            }
            Some(new_ranges) if new_ranges != old_ranges => {
                for range in old_ranges {
                    println!("- {range}");
                }
                for range in new_ranges {
                    println!("+ {range}");
                }
                changes += 1;
            }
            Some(_) => unchanged += 1,
        }
    }
    for (name, new_ranges) in &new_entries {
        if !old_entries.contains_key(name) {
            for range in new_ranges {
                println!("+ {range}");
                changes += 1;
            }
        }
    }

    if changes == 0 {
        println!("No differences.");
    }
    if verbose {
        progress::status_info("Unchanged", &format!("{unchanged} package(s)"));
    }

    Ok(())
}

/// All entries per package, rendered to text. Alternative ranges for one
/// package stay together, in file order.
fn entries_by_package(manifest: &Manifest) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for entry in manifest.entries() {
        map.entry(entry.name.clone()).or_default().push(entry.to_string());
    }
    map
}
