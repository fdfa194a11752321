//! The manifest document: an ordered list of blank lines, comments, and
//! requirement entries, preserving layout across parse and serialize.

use std::fmt;
use std::path::Path;

use pincer_util::errors::PincerError;

use crate::entry::RequirementEntry;

/// One physical line of a constraint manifest.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Blank,
    /// A full-line comment, stored verbatim including the leading `#`.
    Comment(String),
    Entry(RequirementEntry),
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => Ok(()),
            Self::Comment(text) => f.write_str(text),
            Self::Entry(entry) => write!(f, "{entry}"),
        }
    }
}

/// The parsed representation of a requirements-style constraint manifest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    pub lines: Vec<Line>,
}

impl Manifest {
    /// Load and parse a manifest file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PincerError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        let manifest = Self::from_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            entries = manifest.entries().count(),
            "parsed manifest"
        );
        Ok(manifest)
    }

    /// Parse a manifest from a string. Malformed lines are fatal and
    /// reported with their line number and content.
    pub fn from_str(content: &str) -> miette::Result<Self> {
        let mut lines = Vec::new();
        for (idx, raw) in content.lines().enumerate() {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                lines.push(Line::Blank);
            } else if trimmed.starts_with('#') {
                lines.push(Line::Comment(raw.trim_end().to_string()));
            } else {
                let entry =
                    RequirementEntry::parse(trimmed).map_err(|message| PincerError::Parse {
                        line: idx + 1,
                        content: raw.trim_end().to_string(),
                        message,
                    })?;
                lines.push(Line::Entry(entry));
            }
        }
        Ok(Self { lines })
    }

    /// All requirement entries, in file order.
    pub fn entries(&self) -> impl Iterator<Item = &RequirementEntry> {
        self.lines.iter().filter_map(|line| match line {
            Line::Entry(entry) => Some(entry),
            _ => None,
        })
    }

    /// Mutable access to all requirement entries, in file order.
    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut RequirementEntry> {
        self.lines.iter_mut().filter_map(|line| match line {
            Line::Entry(entry) => Some(entry),
            _ => None,
        })
    }

    /// All entries declaring the given package. More than one entry means
    /// the ranges are alternatives for different consumer contexts; they
    /// are never intersected.
    pub fn entries_for(&self, name: &str) -> Vec<&RequirementEntry> {
        self.entries().filter(|e| e.name == name).collect()
    }

    /// Package names declared by more than one entry, with their counts.
    pub fn duplicate_packages(&self) -> Vec<(String, usize)> {
        let mut counts: std::collections::BTreeMap<&str, usize> = Default::default();
        for entry in self.entries() {
            *counts.entry(entry.name.as_str()).or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(name, n)| (name.to_string(), n))
            .collect()
    }

    /// SHA-256 digest of the serialized manifest, for drift detection.
    pub fn digest(&self) -> String {
        pincer_util::hash::sha256_bytes(self.to_string().as_bytes())
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
