//! A single requirement line: package name, optional extras, version
//! specifiers, optional environment marker, and annotations.
//!
//! Line shape: `<package>[extras] <spec>[, <spec>]...[; <marker>][# comment]`.
//! A trailing comment containing the literal word `strict` marks the
//! entry's bounds as non-droppable.

use std::fmt;

use serde::Serialize;

use crate::marker::Marker;
use crate::specifier::SpecifierSet;

/// One declared package with its acceptable version range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequirementEntry {
    #[serde(rename = "package")]
    pub name: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<String>,

    #[serde(rename = "constraints")]
    pub specifiers: SpecifierSet,

    #[serde(rename = "environment_marker", skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,

    pub strict: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl RequirementEntry {
    /// Parse a single non-comment, non-blank manifest line.
    pub fn parse(line: &str) -> Result<Self, String> {
        let (body, comment) = split_comment(line);
        let body = body.trim();
        if body.is_empty() {
            return Err("empty package name".to_string());
        }

        let (head, marker_text) = split_unquoted(body, ';');
        let marker = match marker_text {
            Some(m) => Some(Marker::parse(m.trim())?),
            None => None,
        };

        let head = head.trim();
        let name_end = head
            .find(|c: char| !is_name_char(c))
            .unwrap_or(head.len());
        let name = &head[..name_end];
        validate_name(name)?;

        let mut rest = head[name_end..].trim_start();

        let mut extras = Vec::new();
        if let Some(inner) = rest.strip_prefix('[') {
            let close = inner
                .find(']')
                .ok_or_else(|| format!("unclosed extras bracket in '{head}'"))?;
            for extra in inner[..close].split(',') {
                let extra = extra.trim();
                if extra.is_empty() {
                    return Err(format!("empty extra name in '{head}'"));
                }
                extras.push(extra.to_string());
            }
            rest = inner[close + 1..].trim_start();
        }

        let specifiers = if rest.is_empty() {
            SpecifierSet::default()
        } else {
            SpecifierSet::parse(rest)?
        };

        let strict = comment
            .as_deref()
            .map(|c| c.split_whitespace().any(|w| w == "strict"))
            .unwrap_or(false);

        Ok(Self {
            name: name.to_string(),
            extras,
            specifiers,
            marker,
            strict,
            comment,
        })
    }

    /// Whether the entry applies in the given environment. Entries without
    /// a marker always apply.
    pub fn applies(&self, env: &crate::marker::MarkerEnvironment) -> bool {
        self.marker.as_ref().map(|m| m.evaluate(env)).unwrap_or(true)
    }
}

impl fmt::Display for RequirementEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.extras.is_empty() {
            write!(f, "[{}]", self.extras.join(","))?;
        }
        if !self.specifiers.is_empty() {
            write!(f, " {}", self.specifiers)?;
        }
        if let Some(ref marker) = self.marker {
            write!(f, "; {marker}")?;
        }
        if let Some(ref comment) = self.comment {
            write!(f, "  # {comment}")?;
        }
        Ok(())
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'
}

fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("empty package name".to_string());
    }
    let first = name.chars().next().unwrap_or(' ');
    let last = name.chars().last().unwrap_or(' ');
    if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
        return Err(format!("invalid package name '{name}'"));
    }
    Ok(())
}

/// Split off a trailing `#` comment, ignoring `#` inside quoted literals.
/// Empty comments collapse to `None`.
fn split_comment(line: &str) -> (&str, Option<String>) {
    match find_unquoted(line, '#') {
        Some(i) => {
            let comment = line[i + 1..].trim();
            let comment = if comment.is_empty() {
                None
            } else {
                Some(comment.to_string())
            };
            (&line[..i], comment)
        }
        None => (line, None),
    }
}

/// Split at the first unquoted occurrence of `sep`, if any.
fn split_unquoted(s: &str, sep: char) -> (&str, Option<&str>) {
    match find_unquoted(s, sep) {
        Some(i) => (&s[..i], Some(&s[i + sep.len_utf8()..])),
        None => (s, None),
    }
}

fn find_unquoted(s: &str, target: char) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => {
                if c == '\'' || c == '"' {
                    quote = Some(c);
                } else if c == target {
                    return Some(i);
                }
            }
        }
    }
    None
}
