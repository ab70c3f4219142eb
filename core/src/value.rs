//! Literal and multi-valued slot types for entity properties and references.
//!
//! A property slot holds one literal or an ordered sequence of literals.
//! A reference slot holds one target identifier or an ordered sequence of them.
//! Cardinality checks count occurrences, so a scalar counts as one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal stored in an entity property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// Null/missing value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
}

impl Literal {
    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }

    /// Get as boolean if this is a Bool value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Literal::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as integer. Floats with no fractional part are accepted, since
    /// JSON and YAML documents do not distinguish `1` from `1.0` reliably.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Literal::Int(i) => Some(*i),
            Literal::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    /// Get as float if this is a numeric value.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Literal::Float(f) => Some(*f),
            Literal::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get as string reference if this is a String value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the type name of this literal.
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::Null => "Null",
            Literal::Bool(_) => "Bool",
            Literal::Int(_) => "Int",
            Literal::Float(_) => "Float",
            Literal::String(_) => "String",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "null"),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Int(i) => write!(f, "{}", i),
            Literal::Float(fl) => write!(f, "{}", fl),
            Literal::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<i64> for Literal {
    fn from(i: i64) -> Self {
        Literal::Int(i)
    }
}

impl From<i32> for Literal {
    fn from(i: i32) -> Self {
        Literal::Int(i as i64)
    }
}

impl From<f64> for Literal {
    fn from(f: f64) -> Self {
        Literal::Float(f)
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

/// The content of one property slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    One(Literal),
    Many(Vec<Literal>),
}

impl PropertyValue {
    /// Number of occurrences in this slot.
    pub fn count(&self) -> usize {
        match self {
            PropertyValue::One(_) => 1,
            PropertyValue::Many(values) => values.len(),
        }
    }

    /// First literal in the slot, if any.
    pub fn first(&self) -> Option<&Literal> {
        match self {
            PropertyValue::One(value) => Some(value),
            PropertyValue::Many(values) => values.first(),
        }
    }

    /// Iterate over all literals in the slot.
    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        let slice: &[Literal] = match self {
            PropertyValue::One(value) => std::slice::from_ref(value),
            PropertyValue::Many(values) => values,
        };
        slice.iter()
    }
}

impl From<Literal> for PropertyValue {
    fn from(value: Literal) -> Self {
        PropertyValue::One(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::One(value.into())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::One(value.into())
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::One(value.into())
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::One(value.into())
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::One(value.into())
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::One(value.into())
    }
}

impl From<Vec<Literal>> for PropertyValue {
    fn from(values: Vec<Literal>) -> Self {
        PropertyValue::Many(values)
    }
}

impl From<Vec<&str>> for PropertyValue {
    fn from(values: Vec<&str>) -> Self {
        PropertyValue::Many(values.into_iter().map(Literal::from).collect())
    }
}

impl From<Vec<i64>> for PropertyValue {
    fn from(values: Vec<i64>) -> Self {
        PropertyValue::Many(values.into_iter().map(Literal::from).collect())
    }
}

/// The content of one reference slot: target identifier(s).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefValue {
    One(String),
    Many(Vec<String>),
}

impl RefValue {
    /// Number of targets in this slot.
    pub fn count(&self) -> usize {
        match self {
            RefValue::One(_) => 1,
            RefValue::Many(targets) => targets.len(),
        }
    }

    /// First target in the slot, if any.
    pub fn first(&self) -> Option<&str> {
        match self {
            RefValue::One(target) => Some(target),
            RefValue::Many(targets) => targets.first().map(String::as_str),
        }
    }

    /// Iterate over all targets in the slot.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            RefValue::One(target) => std::slice::from_ref(target),
            RefValue::Many(targets) => targets,
        };
        slice.iter().map(String::as_str)
    }

    /// Whether the slot contains `target`.
    pub fn contains(&self, target: &str) -> bool {
        self.iter().any(|t| t == target)
    }

    /// Rewrite every target through `f`.
    pub fn map_targets(&mut self, mut f: impl FnMut(&str) -> String) {
        match self {
            RefValue::One(target) => *target = f(target),
            RefValue::Many(targets) => {
                for target in targets.iter_mut() {
                    *target = f(target);
                }
            }
        }
    }
}

impl From<&str> for RefValue {
    fn from(target: &str) -> Self {
        RefValue::One(target.to_string())
    }
}

impl From<String> for RefValue {
    fn from(target: String) -> Self {
        RefValue::One(target)
    }
}

impl From<Vec<&str>> for RefValue {
    fn from(targets: Vec<&str>) -> Self {
        RefValue::Many(targets.into_iter().map(String::from).collect())
    }
}

impl From<Vec<String>> for RefValue {
    fn from(targets: Vec<String>) -> Self {
        RefValue::Many(targets)
    }
}

/// Type alias for property storage (predicate -> literal(s)).
pub type Properties = indexmap::IndexMap<String, PropertyValue>;

/// Type alias for reference storage (predicate -> target id(s)).
pub type References = indexmap::IndexMap<String, RefValue>;

/// Helper macro to create property maps.
#[macro_export]
macro_rules! props {
    () => {
        $crate::Properties::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut map = $crate::Properties::new();
            $(
                map.insert($key.to_string(), $crate::PropertyValue::from($value));
            )+
            map
        }
    };
}

/// Helper macro to create reference maps.
#[macro_export]
macro_rules! refs {
    () => {
        $crate::References::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut map = $crate::References::new();
            $(
                map.insert($key.to_string(), $crate::RefValue::from($value));
            )+
            map
        }
    };
}
