//! Constraint violation types.

use lattice_core::Entity;
use lattice_schema::Constraint;
use serde::Serialize;
use std::fmt;

/// The rule a violation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ViolationKind {
    MinPropertyOccurrenceNotMet,
    MaxPropertyOccurrenceExceeded,
    MinReferenceOccurrenceNotMet,
    MaxReferenceOccurrenceExceeded,
    MinInverseReferenceOccurrenceNotMet,
    MaxInverseReferenceOccurrenceExceeded,
    ReferenceNotFound,
    ReferenceTypeMismatch,
    AbstractEntityClassViolation,
    UndeclaredProperty,
    UndeclaredReference,
    ApplicationRuleViolation,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::MinPropertyOccurrenceNotMet => "MinPropertyOccurrenceNotMet",
            ViolationKind::MaxPropertyOccurrenceExceeded => "MaxPropertyOccurrenceExceeded",
            ViolationKind::MinReferenceOccurrenceNotMet => "MinReferenceOccurrenceNotMet",
            ViolationKind::MaxReferenceOccurrenceExceeded => "MaxReferenceOccurrenceExceeded",
            ViolationKind::MinInverseReferenceOccurrenceNotMet => {
                "MinInverseReferenceOccurrenceNotMet"
            }
            ViolationKind::MaxInverseReferenceOccurrenceExceeded => {
                "MaxInverseReferenceOccurrenceExceeded"
            }
            ViolationKind::ReferenceNotFound => "ReferenceNotFound",
            ViolationKind::ReferenceTypeMismatch => "ReferenceTypeMismatch",
            ViolationKind::AbstractEntityClassViolation => "AbstractEntityClassViolation",
            ViolationKind::UndeclaredProperty => "UndeclaredProperty",
            ViolationKind::UndeclaredReference => "UndeclaredReference",
            ViolationKind::ApplicationRuleViolation => "ApplicationRuleViolation",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constraint violation.
///
/// Borrows the violated constraint from the schema the run used.
#[derive(Debug, Clone)]
pub struct ConstraintViolation<'s> {
    /// The violated constraint. Absent for closed-world violations.
    pub constraint: Option<&'s Constraint>,
    /// The offending entity. Absent for store-wide checks.
    pub entity: Option<Entity>,
    pub kind: ViolationKind,
    /// Human-readable message describing the violation.
    pub message: String,
}

impl<'s> ConstraintViolation<'s> {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            constraint: None,
            entity: None,
            kind,
            message: message.into(),
        }
    }

    pub fn with_constraint(mut self, constraint: &'s Constraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    pub fn with_entity(mut self, entity: &Entity) -> Self {
        self.entity = Some(entity.clone());
        self
    }

    /// Serializable projection of this violation.
    pub fn to_record(&self) -> ViolationRecord {
        ViolationRecord {
            kind: self.kind,
            constraint: self.constraint.map(|c| c.id().to_string()),
            entity: self.entity.as_ref().map(|e| e.id.clone()),
            message: self.message.clone(),
        }
    }
}

impl fmt::Display for ConstraintViolation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// A violation reduced to ids, for reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViolationRecord {
    pub kind: ViolationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    pub message: String,
}

/// Collection of violations.
#[derive(Debug, Clone, Default)]
pub struct Violations<'s> {
    violations: Vec<ConstraintViolation<'s>>,
}

impl<'s> Violations<'s> {
    /// Create a new empty violations collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a violation.
    pub fn push(&mut self, violation: ConstraintViolation<'s>) {
        self.violations.push(violation);
    }

    /// Whether the run passed (no violations at all).
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Get the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Get all violations.
    pub fn all(&self) -> &[ConstraintViolation<'s>] {
        &self.violations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConstraintViolation<'s>> {
        self.violations.iter()
    }

    /// Violations of one kind.
    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &ConstraintViolation<'s>> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    /// Whether any violation has the given kind.
    pub fn has_kind(&self, kind: ViolationKind) -> bool {
        self.of_kind(kind).next().is_some()
    }

    /// Merge another violations collection.
    pub fn merge(&mut self, other: Violations<'s>) {
        self.violations.extend(other.violations);
    }

    pub fn to_records(&self) -> Vec<ViolationRecord> {
        self.violations.iter().map(ConstraintViolation::to_record).collect()
    }

    /// Pretty JSON report of every violation.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_records())
    }
}

impl<'s> IntoIterator for Violations<'s> {
    type Item = ConstraintViolation<'s>;
    type IntoIter = std::vec::IntoIter<ConstraintViolation<'s>>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a, 's> IntoIterator for &'a Violations<'s> {
    type Item = &'a ConstraintViolation<'s>;
    type IntoIter = std::slice::Iter<'a, ConstraintViolation<'s>>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}
