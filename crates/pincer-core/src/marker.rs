//! Environment markers: predicates restricting when a constraint entry
//! applies, e.g. `python_version < '3.9'`.
//!
//! Grammar: comparisons `<key> <op> '<literal>'` joined by `and` / `or`,
//! with `and` binding tighter. Values compare version-aware, so
//! `'3.10' > '3.9'` holds.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::specifier::Comparator;
use crate::version::Version;

/// A parsed environment marker expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Marker {
    Compare {
        key: String,
        op: Comparator,
        value: String,
    },
    And(Box<Marker>, Box<Marker>),
    Or(Box<Marker>, Box<Marker>),
}

impl Marker {
    pub fn parse(s: &str) -> Result<Self, String> {
        let tokens = tokenize(s)?;
        if tokens.is_empty() {
            return Err("empty marker expression".to_string());
        }
        let mut parser = Parser { tokens, pos: 0 };
        let marker = parser.parse_or()?;
        if parser.pos != parser.tokens.len() {
            return Err(format!("trailing tokens in marker '{s}'"));
        }
        Ok(marker)
    }

    /// Evaluate the marker against an environment. Comparisons against keys
    /// absent from the environment are false.
    pub fn evaluate(&self, env: &MarkerEnvironment) -> bool {
        match self {
            Self::Compare { key, op, value } => env
                .get(key)
                .map(|actual| op.matches(Version::parse(actual).cmp(&Version::parse(value))))
                .unwrap_or(false),
            Self::And(a, b) => a.evaluate(env) && b.evaluate(env),
            Self::Or(a, b) => a.evaluate(env) || b.evaluate(env),
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compare { key, op, value } => write!(f, "{key} {op} '{value}'"),
            Self::And(a, b) => write!(f, "{a} and {b}"),
            Self::Or(a, b) => write!(f, "{a} or {b}"),
        }
    }
}

impl Serialize for Marker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Key/value environment a marker is evaluated against.
#[derive(Debug, Clone, Default)]
pub struct MarkerEnvironment {
    values: BTreeMap<String, String>,
}

impl MarkerEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Op(Comparator),
    Literal(String),
    And,
    Or,
}

fn tokenize(s: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = s.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
        } else if ch == '\'' || ch == '"' {
            chars.next();
            let mut lit = String::new();
            loop {
                match chars.next() {
                    Some(c) if c == ch => break,
                    Some(c) => lit.push(c),
                    None => return Err(format!("unterminated string literal in marker '{s}'")),
                }
            }
            tokens.push(Token::Literal(lit));
        } else if matches!(ch, '<' | '>' | '=' | '!') {
            let mut op = String::new();
            while let Some(&c) = chars.peek() {
                if matches!(c, '<' | '>' | '=' | '!') {
                    op.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            match Comparator::parse_prefix(&op) {
                Some((cmp, "")) => tokens.push(Token::Op(cmp)),
                _ => return Err(format!("unknown operator '{op}' in marker")),
            }
        } else if ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' {
            let mut ident = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                    ident.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            match ident.as_str() {
                "and" => tokens.push(Token::And),
                "or" => tokens.push(Token::Or),
                _ => tokens.push(Token::Ident(ident)),
            }
        } else {
            return Err(format!("unexpected character '{ch}' in marker"));
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_or(&mut self) -> Result<Marker, String> {
        let mut left = self.parse_and()?;
        while matches!(self.peek(), Some(Token::Or)) {
            self.advance();
            let right = self.parse_and()?;
            left = Marker::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Marker, String> {
        let mut left = self.parse_compare()?;
        while matches!(self.peek(), Some(Token::And)) {
            self.advance();
            let right = self.parse_compare()?;
            left = Marker::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_compare(&mut self) -> Result<Marker, String> {
        let key = match self.advance() {
            Some(Token::Ident(k)) => k,
            _ => return Err("expected marker variable name".to_string()),
        };
        let op = match self.advance() {
            Some(Token::Op(op)) => op,
            _ => return Err(format!("expected comparator after '{key}'")),
        };
        let value = match self.advance() {
            Some(Token::Literal(v)) | Some(Token::Ident(v)) => v,
            _ => return Err(format!("expected value after '{key} {op}'")),
        };
        Ok(Marker::Compare { key, op, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> MarkerEnvironment {
        let mut env = MarkerEnvironment::new();
        for (k, v) in pairs {
            env.set(k, v);
        }
        env
    }

    #[test]
    fn parse_simple_comparison() {
        let marker = Marker::parse("python_version < '3.9'").unwrap();
        assert_eq!(
            marker,
            Marker::Compare {
                key: "python_version".to_string(),
                op: Comparator::Lt,
                value: "3.9".to_string(),
            }
        );
    }

    #[test]
    fn display_roundtrip() {
        let text = "python_version < '3.9'";
        let marker = Marker::parse(text).unwrap();
        assert_eq!(marker.to_string(), text);
        assert_eq!(Marker::parse(&marker.to_string()).unwrap(), marker);
    }

    #[test]
    fn evaluate_version_aware() {
        let marker = Marker::parse("python_version < '3.9'").unwrap();
        assert!(marker.evaluate(&env(&[("python_version", "3.8")])));
        assert!(!marker.evaluate(&env(&[("python_version", "3.9")])));
        // Not a lexical comparison: 3.10 sorts above 3.9
        assert!(!marker.evaluate(&env(&[("python_version", "3.10")])));
    }

    #[test]
    fn unknown_key_is_false() {
        let marker = Marker::parse("platform_system == 'Linux'").unwrap();
        assert!(!marker.evaluate(&MarkerEnvironment::new()));
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let marker =
            Marker::parse("a == '1' or b == '2' and c == '3'").unwrap();
        match marker {
            Marker::Or(lhs, rhs) => {
                assert!(matches!(*lhs, Marker::Compare { .. }));
                assert!(matches!(*rhs, Marker::And(_, _)));
            }
            other => panic!("expected Or at the top, got {other:?}"),
        }
    }

    #[test]
    fn conjunction_evaluates_both_sides() {
        let marker =
            Marker::parse("python_version >= '3.8' and python_version < '3.11'").unwrap();
        assert!(marker.evaluate(&env(&[("python_version", "3.9")])));
        assert!(!marker.evaluate(&env(&[("python_version", "3.11")])));
    }

    #[test]
    fn compound_display_reparses_equivalent() {
        let marker =
            Marker::parse("a == '1' and b != '2' or c >= '3'").unwrap();
        assert_eq!(Marker::parse(&marker.to_string()).unwrap(), marker);
    }

    #[test]
    fn unterminated_literal_is_error() {
        assert!(Marker::parse("python_version < '3.9").is_err());
    }

    #[test]
    fn missing_operator_is_error() {
        assert!(Marker::parse("python_version '3.9'").is_err());
    }

    #[test]
    fn empty_marker_is_error() {
        assert!(Marker::parse("   ").is_err());
    }
}
