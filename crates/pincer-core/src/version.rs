//! Package version parsing, comparison, and ordering.
//!
//! Versions in requirement manifests are dotted releases with optional
//! extras around the numeric core:
//! - Segments are split on `.`, `-`, `_` and at digit/letter boundaries,
//!   so `1.20.0rc1` reads as `1 . 20 . 0 . rc . 1`
//! - Numeric segments compare as numbers
//! - Qualifiers have a defined ordering:
//!   `dev` < `alpha` < `beta` < `rc` < `""` (release) < `post`
//! - Trailing zero segments are insignificant: `1.0` equals `1.0.0`
//! - An epoch prefix (`1!2.0`) dominates every other segment
//! - A `+local` label participates only as a tie-break

use std::cmp::Ordering;
use std::fmt;

/// A parsed package version with comparable segments.
#[derive(Debug, Clone)]
pub struct Version {
    pub original: String,
    epoch: u64,
    segments: Vec<Segment>,
    local: Option<String>,
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Segment {
    Numeric(u64),
    Qualifier(QualifierKind),
    Text(String),
}

/// Well-known pre/post-release qualifiers with defined ordering.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
enum QualifierKind {
    Dev,
    Alpha,
    Beta,
    Rc,
    Release,
    Post,
}

impl Version {
    pub fn parse(version: &str) -> Self {
        let trimmed = version.trim();

        let (epoch, rest) = match trimmed.split_once('!') {
            Some((e, rest)) => match e.parse::<u64>() {
                Ok(n) => (n, rest),
                Err(_) => (0, trimmed),
            },
            None => (0, trimmed),
        };

        let (release, local) = match rest.split_once('+') {
            Some((main, local)) => (main, Some(local.to_string())),
            None => (rest, None),
        };

        Self {
            original: version.to_string(),
            epoch,
            segments: parse_segments(release),
            local,
        }
    }

    /// Whether this version carries a pre-release qualifier (`dev`, `a`,
    /// `b`, `rc`) and therefore sorts before its final release.
    pub fn is_prerelease(&self) -> bool {
        self.segments.iter().any(|s| {
            matches!(
                s,
                Segment::Qualifier(
                    QualifierKind::Dev
                        | QualifierKind::Alpha
                        | QualifierKind::Beta
                        | QualifierKind::Rc
                )
            )
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let ord = self.epoch.cmp(&other.epoch);
        if ord != Ordering::Equal {
            return ord;
        }

        let max_len = self.segments.len().max(other.segments.len());
        for i in 0..max_len {
            let a = self.segments.get(i);
            let b = other.segments.get(i);
            let ord = compare_segments(a, b);
            if ord != Ordering::Equal {
                return ord;
            }
        }

        match (&self.local, &other.local) {
            (None, None) => Ordering::Equal,
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn compare_segments(a: Option<&Segment>, b: Option<&Segment>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(s), None) => compare_segment_to_empty(s),
        (None, Some(s)) => compare_segment_to_empty(s).reverse(),
        (Some(a), Some(b)) => compare_two_segments(a, b),
    }
}

fn compare_segment_to_empty(seg: &Segment) -> Ordering {
    match seg {
        Segment::Numeric(0) => Ordering::Equal,
        Segment::Numeric(_) => Ordering::Greater,
        Segment::Qualifier(q) => q.cmp(&QualifierKind::Release),
        Segment::Text(s) if s.is_empty() => Ordering::Equal,
        Segment::Text(_) => Ordering::Less,
    }
}

fn compare_two_segments(a: &Segment, b: &Segment) -> Ordering {
    match (a, b) {
        (Segment::Numeric(a), Segment::Numeric(b)) => a.cmp(b),
        (Segment::Qualifier(a), Segment::Qualifier(b)) => a.cmp(b),
        (Segment::Numeric(_), Segment::Qualifier(_)) => Ordering::Greater,
        (Segment::Qualifier(_), Segment::Numeric(_)) => Ordering::Less,
        (Segment::Numeric(_), Segment::Text(_)) => Ordering::Greater,
        (Segment::Text(_), Segment::Numeric(_)) => Ordering::Less,
        (Segment::Text(a), Segment::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (Segment::Qualifier(q), Segment::Text(_)) => {
            if *q >= QualifierKind::Release {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (Segment::Text(_), Segment::Qualifier(q)) => {
            if *q >= QualifierKind::Release {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
    }
}

fn parse_segments(version: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for ch in version.chars() {
        if ch == '.' || ch == '-' || ch == '_' {
            if !current.is_empty() {
                segments.push(classify(&current));
                current.clear();
            }
            continue;
        }
        // Break at digit/letter boundaries so attached qualifiers split out
        if let Some(last) = current.chars().last() {
            if last.is_ascii_digit() != ch.is_ascii_digit() {
                segments.push(classify(&current));
                current.clear();
            }
        }
        current.push(ch);
    }
    if !current.is_empty() {
        segments.push(classify(&current));
    }

    segments
}

fn classify(token: &str) -> Segment {
    if let Ok(n) = token.parse::<u64>() {
        return Segment::Numeric(n);
    }
    match token.to_lowercase().as_str() {
        "dev" => Segment::Qualifier(QualifierKind::Dev),
        "alpha" | "a" => Segment::Qualifier(QualifierKind::Alpha),
        "beta" | "b" => Segment::Qualifier(QualifierKind::Beta),
        "rc" | "c" | "pre" | "preview" => Segment::Qualifier(QualifierKind::Rc),
        "" | "final" | "release" => Segment::Qualifier(QualifierKind::Release),
        "post" | "rev" | "r" => Segment::Qualifier(QualifierKind::Post),
        _ => Segment::Text(token.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_ordering() {
        let v1 = Version::parse("1.0");
        let v2 = Version::parse("2.0");
        assert!(v1 < v2);
    }

    #[test]
    fn three_part_ordering() {
        let v1 = Version::parse("1.20.0");
        let v2 = Version::parse("1.20.1");
        let v3 = Version::parse("1.21.0");
        assert!(v1 < v2);
        assert!(v2 < v3);
    }

    #[test]
    fn qualifier_ordering() {
        let dev = Version::parse("1.0.dev1");
        let alpha = Version::parse("1.0a1");
        let beta = Version::parse("1.0b1");
        let rc = Version::parse("1.0rc1");
        let release = Version::parse("1.0");
        let post = Version::parse("1.0.post1");

        assert!(dev < alpha);
        assert!(alpha < beta);
        assert!(beta < rc);
        assert!(rc < release);
        assert!(release < post);
    }

    #[test]
    fn attached_qualifier_splits() {
        let rc = Version::parse("1.20.0rc1");
        let rel = Version::parse("1.20.0");
        assert!(rc < rel);
    }

    #[test]
    fn trailing_zeros_equal() {
        let v1 = Version::parse("1.0");
        let v2 = Version::parse("1.0.0");
        assert_eq!(v1, v2);
    }

    #[test]
    fn epoch_dominates() {
        let v1 = Version::parse("1!1.0");
        let v2 = Version::parse("2.0");
        assert!(v1 > v2);
    }

    #[test]
    fn local_label_breaks_ties() {
        let plain = Version::parse("1.13.1");
        let local = Version::parse("1.13.1+cpu");
        assert!(local > plain);
        assert_eq!(Version::parse("1.13.1+cpu"), Version::parse("1.13.1+cpu"));
    }

    #[test]
    fn qualifier_case_insensitive() {
        assert_eq!(Version::parse("1.0RC1"), Version::parse("1.0rc1"));
    }

    #[test]
    fn rc_ordering_by_number() {
        let rc1 = Version::parse("2.0rc1");
        let rc2 = Version::parse("2.0rc2");
        assert!(rc1 < rc2);
    }

    #[test]
    fn is_prerelease() {
        assert!(Version::parse("1.0rc1").is_prerelease());
        assert!(Version::parse("0.11.0.dev0").is_prerelease());
        assert!(!Version::parse("1.0").is_prerelease());
        assert!(!Version::parse("1.0.post2").is_prerelease());
    }

    #[test]
    fn display_preserves_original() {
        let v = Version::parse("1.20.0rc1+cu117");
        assert_eq!(v.to_string(), "1.20.0rc1+cu117");
    }
}
