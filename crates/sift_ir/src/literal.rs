//! Literal values carried by tokens.
//!
//! A literal is a raw semantic value plus an optional *formatted* spelling.
//! The formatted spelling preserves the original text when it cannot be
//! derived mechanically from the value (a hex integer's digits, an unusual
//! quoting convention). When absent, the text is derived from the value.

use std::fmt;

/// The raw semantic value of a [`Literal`].
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// A raw value plus an optional original-spelling textual form.
///
/// Consistency between the raw value and the formatted spelling is not
/// validated; the producer layer is trusted.
#[derive(Clone, Debug, PartialEq)]
pub struct Literal {
    value: LiteralValue,
    formatted: Option<String>,
}

impl Literal {
    /// Create a literal with no preserved spelling.
    #[inline]
    pub fn new(value: LiteralValue) -> Self {
        Literal {
            value,
            formatted: None,
        }
    }

    /// Create a literal that keeps its original spelling.
    #[inline]
    pub fn with_formatted(value: LiteralValue, formatted: impl Into<String>) -> Self {
        Literal {
            value,
            formatted: Some(formatted.into()),
        }
    }

    /// Boolean literal.
    #[inline]
    pub fn bool(value: bool) -> Self {
        Literal::new(LiteralValue::Bool(value))
    }

    /// Integer literal.
    #[inline]
    pub fn int(value: i64) -> Self {
        Literal::new(LiteralValue::Int(value))
    }

    /// Float literal.
    #[inline]
    pub fn float(value: f64) -> Self {
        Literal::new(LiteralValue::Float(value))
    }

    /// String-valued literal (identifiers, string literals, comment text).
    #[inline]
    pub fn str(value: impl Into<String>) -> Self {
        Literal::new(LiteralValue::Str(value.into()))
    }

    /// The raw value.
    #[inline]
    pub fn value(&self) -> &LiteralValue {
        &self.value
    }

    /// The preserved spelling, if any.
    #[inline]
    pub fn formatted(&self) -> Option<&str> {
        self.formatted.as_deref()
    }

    /// Textual form: the preserved spelling if present, otherwise the
    /// canonical derivation from the raw value.
    pub fn text(&self) -> String {
        if let Some(formatted) = &self.formatted {
            return formatted.clone();
        }
        match &self.value {
            LiteralValue::Bool(b) => b.to_string(),
            LiteralValue::Int(n) => n.to_string(),
            LiteralValue::Float(x) => x.to_string(),
            LiteralValue::Str(s) => s.clone(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Quote and escape a string for rule syntax: `evil "x"` becomes `"evil \"x\""`.
pub fn quote(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
