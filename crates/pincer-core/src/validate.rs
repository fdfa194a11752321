//! Manifest validation and violation reporting.

use std::fmt;

use crate::manifest::Manifest;

/// A report of all constraint violations found in a manifest.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

/// A single violated invariant on one entry.
#[derive(Debug, Clone)]
pub struct Violation {
    pub package: String,
    pub message: String,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.violations.is_empty() {
            return write!(f, "No constraint violations.");
        }
        writeln!(f, "Constraint violations ({}):", self.violations.len())?;
        for v in &self.violations {
            writeln!(f, "  {}: {}", v.package, v.message)?;
        }
        Ok(())
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.package, self.message)
    }
}

impl Manifest {
    /// Check the manifest's semantic invariants. Well-formedness per line is
    /// already enforced at parse time; this validates what parsing cannot:
    /// for every entry stating both a minimum and a maximum, minimum must
    /// not exceed maximum. Duplicate package names are alternatives, not
    /// violations.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        for entry in self.entries() {
            if !entry.specifiers.bounds_consistent() {
                let lo = entry.specifiers.lower_bound().map(|s| s.to_string());
                let hi = entry.specifiers.upper_bound().map(|s| s.to_string());
                report.add(Violation {
                    package: entry.name.clone(),
                    message: format!(
                        "lower bound {} exceeds upper bound {}",
                        lo.unwrap_or_default(),
                        hi.unwrap_or_default()
                    ),
                });
            }
        }
        report
    }
}
