//! The relax transformation: drop advisory (CI-only) upper bounds while
//! preserving everything marked strict.

use crate::manifest::Manifest;

/// What a relax pass did to a manifest.
#[derive(Debug, Default)]
pub struct RelaxOutcome {
    /// Upper-bound specifiers that were removed, per package.
    pub dropped: Vec<DroppedBound>,
    /// Entries left untouched because of a `strict` annotation.
    pub kept_strict: usize,
    /// Entries left untouched because configuration lists the package.
    pub kept_policy: usize,
}

/// One removed upper bound.
#[derive(Debug, Clone)]
pub struct DroppedBound {
    pub package: String,
    pub specifier: String,
}

/// Remove `<` and `<=` specifiers from every entry not marked strict and
/// not listed in `keep`. Lower bounds, pins (`==`), exclusions (`!=`),
/// markers, and comments are preserved unchanged.
pub fn relax(manifest: &mut Manifest, keep: &[String]) -> RelaxOutcome {
    let mut outcome = RelaxOutcome::default();

    for entry in manifest.entries_mut() {
        if entry.strict {
            outcome.kept_strict += 1;
            continue;
        }
        if keep.iter().any(|name| *name == entry.name) {
            outcome.kept_policy += 1;
            continue;
        }
        let name = entry.name.clone();
        entry.specifiers.specifiers.retain(|spec| {
            if spec.comparator.is_upper_bound() {
                outcome.dropped.push(DroppedBound {
                    package: name.clone(),
                    specifier: spec.to_string(),
                });
                false
            } else {
                true
            }
        });
    }

    outcome
}
