//! Version specifiers: comparators, single specifiers, and comma-separated
//! specifier sets with containment and bound extraction.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::version::Version;

/// A version comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl Comparator {
    /// Match a comparator prefix, returning the operator and the remainder.
    /// Two-character operators take precedence over their one-character
    /// prefixes.
    pub fn parse_prefix(s: &str) -> Option<(Self, &str)> {
        for (text, cmp) in [
            ("<=", Self::Le),
            (">=", Self::Ge),
            ("==", Self::Eq),
            ("!=", Self::Ne),
            ("<", Self::Lt),
            (">", Self::Gt),
        ] {
            if let Some(rest) = s.strip_prefix(text) {
                return Some((cmp, rest));
            }
        }
        None
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }

    /// Whether `lhs <cmp> rhs` holds given `lhs.cmp(rhs)`.
    pub fn matches(&self, ord: Ordering) -> bool {
        match self {
            Self::Lt => ord == Ordering::Less,
            Self::Le => ord != Ordering::Greater,
            Self::Gt => ord == Ordering::Greater,
            Self::Ge => ord != Ordering::Less,
            Self::Eq => ord == Ordering::Equal,
            Self::Ne => ord != Ordering::Equal,
        }
    }

    /// Whether this comparator states a maximum acceptable version.
    pub fn is_upper_bound(&self) -> bool {
        matches!(self, Self::Lt | Self::Le)
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One comparator applied to one version, e.g. `>=0.8.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Specifier {
    pub comparator: Comparator,
    pub version: Version,
}

impl Specifier {
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let (comparator, rest) = Comparator::parse_prefix(s)
            .ok_or_else(|| format!("missing comparator in '{s}'"))?;
        let version_text = rest.trim();
        if version_text.is_empty() {
            return Err(format!("missing version in '{s}'"));
        }
        if version_text.split_whitespace().count() != 1 {
            return Err(format!("unexpected whitespace in version '{version_text}'"));
        }
        if !version_text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+' | '!'))
        {
            return Err(format!("invalid version '{version_text}'"));
        }
        Ok(Self {
            comparator,
            version: Version::parse(version_text),
        })
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.comparator.matches(version.cmp(&self.version))
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.comparator, self.version)
    }
}

impl Serialize for Specifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A comma-separated conjunction of specifiers, e.g. `>=0.8.0, <0.11.0`.
///
/// An empty set accepts every version.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SpecifierSet {
    pub specifiers: Vec<Specifier>,
}

impl SpecifierSet {
    pub fn parse(s: &str) -> Result<Self, String> {
        let mut specifiers = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(format!("empty specifier in '{s}'"));
            }
            specifiers.push(Specifier::parse(part)?);
        }
        Ok(Self { specifiers })
    }

    pub fn is_empty(&self) -> bool {
        self.specifiers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.specifiers.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Specifier> {
        self.specifiers.iter()
    }

    /// Check whether a version satisfies every specifier in the set.
    pub fn contains(&self, version: &Version) -> bool {
        self.specifiers.iter().all(|s| s.matches(version))
    }

    /// The strongest stated minimum: the highest version among `>`, `>=`
    /// and `==` specifiers.
    pub fn lower_bound(&self) -> Option<&Specifier> {
        self.specifiers
            .iter()
            .filter(|s| matches!(s.comparator, Comparator::Gt | Comparator::Ge | Comparator::Eq))
            .max_by(|a, b| a.version.cmp(&b.version))
    }

    /// The weakest stated maximum: the lowest version among `<`, `<=`
    /// and `==` specifiers.
    pub fn upper_bound(&self) -> Option<&Specifier> {
        self.specifiers
            .iter()
            .filter(|s| matches!(s.comparator, Comparator::Lt | Comparator::Le | Comparator::Eq))
            .min_by(|a, b| a.version.cmp(&b.version))
    }

    /// Whether the stated minimum does not exceed the stated maximum.
    /// Sets with only one kind of bound (or none) are trivially consistent.
    pub fn bounds_consistent(&self) -> bool {
        match (self.lower_bound(), self.upper_bound()) {
            (Some(lo), Some(hi)) => lo.version <= hi.version,
            _ => true,
        }
    }
}

impl fmt::Display for SpecifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, spec) in self.specifiers.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{spec}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_specifier() {
        let spec = Specifier::parse(">1.20.0").unwrap();
        assert_eq!(spec.comparator, Comparator::Gt);
        assert_eq!(spec.version, Version::parse("1.20.0"));
    }

    #[test]
    fn parse_with_inner_space() {
        let spec = Specifier::parse(">= 0.8.0").unwrap();
        assert_eq!(spec.comparator, Comparator::Ge);
        assert_eq!(spec.to_string(), ">=0.8.0");
    }

    #[test]
    fn parse_missing_comparator() {
        assert!(Specifier::parse("1.0.0").is_err());
    }

    #[test]
    fn parse_missing_version() {
        assert!(Specifier::parse(">=").is_err());
    }

    #[test]
    fn set_containment_is_conjunction() {
        let set = SpecifierSet::parse(">=0.8.0, <0.11.0").unwrap();
        assert!(set.contains(&Version::parse("0.8.0")));
        assert!(set.contains(&Version::parse("0.10.2")));
        assert!(!set.contains(&Version::parse("0.7.9")));
        assert!(!set.contains(&Version::parse("0.11.0")));
    }

    #[test]
    fn exclusive_lower_bound() {
        let set = SpecifierSet::parse(">1.20.0").unwrap();
        assert!(!set.contains(&Version::parse("1.20.0")));
        assert!(set.contains(&Version::parse("1.20.1")));
    }

    #[test]
    fn not_equal_excludes_single_version() {
        let set = SpecifierSet::parse(">=1.0, !=1.5").unwrap();
        assert!(set.contains(&Version::parse("1.4")));
        assert!(!set.contains(&Version::parse("1.5")));
        assert!(set.contains(&Version::parse("1.6")));
    }

    #[test]
    fn bounds_extraction() {
        let set = SpecifierSet::parse(">=0.8.0, >0.9, <0.11.0, <=0.12").unwrap();
        assert_eq!(set.lower_bound().unwrap().version, Version::parse("0.9"));
        assert_eq!(set.upper_bound().unwrap().version, Version::parse("0.11.0"));
    }

    #[test]
    fn pin_contributes_both_bounds() {
        let set = SpecifierSet::parse("==2.1.0").unwrap();
        assert_eq!(set.lower_bound().unwrap().version, Version::parse("2.1.0"));
        assert_eq!(set.upper_bound().unwrap().version, Version::parse("2.1.0"));
        assert!(set.bounds_consistent());
    }

    #[test]
    fn contradictory_bounds_detected() {
        let set = SpecifierSet::parse(">=2.0, <1.0").unwrap();
        assert!(!set.bounds_consistent());
    }

    #[test]
    fn empty_part_is_error() {
        assert!(SpecifierSet::parse(">=1.0,").is_err());
    }

    #[test]
    fn display_roundtrip() {
        let set = SpecifierSet::parse(">=0.8.0, <0.11.0").unwrap();
        assert_eq!(set.to_string(), ">=0.8.0, <0.11.0");
    }
}
