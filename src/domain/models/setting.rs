//! Typed scalar settings decoded once from the document.
//!
//! A `Setting<T>` replaces the untyped node representation: YAML scalars are
//! captured as text, parsed into `T` exactly once at decode time, and never
//! re-parsed at the use site.

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// A tri-state scalar setting
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Setting<T> {
    /// Absent, null, or empty in the document
    #[default]
    Unset,
    /// Present and parsed
    Value(T),
    /// Present but not parseable as `T`; keeps the original text
    Malformed(String),
}

impl<T> Setting<T> {
    /// Whether the field has a non-empty representation in the document.
    ///
    /// Malformed values count as set: precedence is decided on presence,
    /// and the degrade-to-zero rule applies at consumption.
    pub const fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// The parsed value, if any
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: Clone> Setting<T> {
    /// Returns `self` if set, otherwise `fallback`.
    #[must_use]
    pub fn or(&self, fallback: &Self) -> Self {
        if self.is_set() {
            self.clone()
        } else {
            fallback.clone()
        }
    }
}

impl<T: Clone + Default> Setting<T> {
    /// Resolve to a concrete value. Unset and malformed settings yield the
    /// zero value of `T`; malformed ones are logged against `field`.
    pub fn resolve(&self, field: &str) -> T {
        match self {
            Self::Value(v) => v.clone(),
            Self::Unset => T::default(),
            Self::Malformed(raw) => {
                warn!(field, value = %raw, "failed to convert setting, using zero value");
                T::default()
            }
        }
    }
}

impl<T: FromStr> Setting<T> {
    /// Parse a raw scalar as it appears in the document
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Unset;
        }
        trimmed
            .parse()
            .map_or_else(|_| Self::Malformed(trimmed.to_string()), Self::Value)
    }
}

impl<T> From<T> for Setting<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: fmt::Display> fmt::Display for Setting<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("<unset>"),
            Self::Value(v) => write!(f, "{v}"),
            Self::Malformed(raw) => write!(f, "{raw} (malformed)"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Bool(bool),
    Int(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl RawScalar {
    fn into_text(self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Unsigned(u) => u.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => s,
        }
    }
}

impl<'de, T: FromStr> Deserialize<'de> for Setting<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<RawScalar>::deserialize(deserializer)?;
        Ok(raw.map_or(Self::Unset, |raw| Self::parse(&raw.into_text())))
    }
}
