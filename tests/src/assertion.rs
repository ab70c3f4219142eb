//! Assertion types and builders for verifying step results.

use lattice_core::NamespaceManager;
use lattice_validator::{ViolationKind, ViolationRecord};

use crate::error::{ScenarioError, ScenarioResult};

/// What a step produced: the violations of a completed run, or the message
/// of the error that aborted it.
pub type StepOutcome = Result<Vec<ViolationRecord>, String>;

/// A complete assertion for a step result.
#[derive(Default)]
pub struct Assertion {
    pub violations: Option<usize>,
    /// Exact count per kind.
    pub kinds: Vec<(ViolationKind, usize)>,
    /// Ids that must each appear on some violation.
    pub entities: Vec<String>,
    /// The exact set of violating entity ids, in first-seen order.
    pub only_entities: Option<Vec<String>>,
    pub message_contains: Vec<String>,

    // Error assertions
    pub error: Option<String>,

    #[allow(clippy::type_complexity)]
    pub custom: Option<Box<dyn Fn(&[ViolationRecord]) -> bool + Send + Sync>>,
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertion")
            .field("violations", &self.violations)
            .field("kinds", &self.kinds)
            .field("entities", &self.entities)
            .field("only_entities", &self.only_entities)
            .field("message_contains", &self.message_contains)
            .field("error", &self.error)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Assertion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify the assertion against a step outcome. Entity ids in the
    /// assertion may be abbreviated with the prefixes of `namespaces`.
    pub fn verify(
        &self,
        step: &str,
        outcome: &StepOutcome,
        namespaces: &NamespaceManager,
    ) -> ScenarioResult<()> {
        if let Some(ref expected) = self.error {
            return match outcome {
                Err(msg) if msg.contains(expected) => Ok(()),
                Err(msg) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error containing '{}', got: {}", expected, msg),
                )),
                Ok(records) => Err(ScenarioError::assertion_failed(
                    step,
                    format!(
                        "expected error containing '{}', but step produced {} violation(s)",
                        expected,
                        records.len()
                    ),
                )),
            };
        }

        let records = outcome
            .as_ref()
            .map_err(|msg| ScenarioError::assertion_failed(step, format!("step failed: {}", msg)))?;

        if let Some(expected) = self.violations {
            if records.len() != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!(
                        "expected {} violation(s), got {}:\n{}",
                        expected,
                        records.len(),
                        describe(records)
                    ),
                ));
            }
        }

        for (kind, expected) in &self.kinds {
            let actual = records.iter().filter(|r| r.kind == *kind).count();
            if actual != *expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!(
                        "expected {} {} violation(s), got {}:\n{}",
                        expected,
                        kind,
                        actual,
                        describe(records)
                    ),
                ));
            }
        }

        for expected in &self.entities {
            let found = records
                .iter()
                .filter_map(|r| r.entity.as_deref())
                .any(|id| namespaces.same(id, expected));
            if !found {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected a violation for {}:\n{}", expected, describe(records)),
                ));
            }
        }

        if let Some(ref expected) = self.only_entities {
            let mut actual: Vec<&str> = Vec::new();
            for id in records.iter().filter_map(|r| r.entity.as_deref()) {
                if !actual.contains(&id) {
                    actual.push(id);
                }
            }
            let matches = actual.len() == expected.len()
                && actual
                    .iter()
                    .zip(expected)
                    .all(|(a, e)| namespaces.same(a, e));
            if !matches {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!(
                        "violating entities mismatch:\n  expected: {:?}\n  actual:   {:?}",
                        expected, actual
                    ),
                ));
            }
        }

        for fragment in &self.message_contains {
            if !records.iter().any(|r| r.message.contains(fragment.as_str())) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("no violation message contains '{}':\n{}", fragment, describe(records)),
                ));
            }
        }

        if let Some(ref custom) = self.custom {
            if !custom(records) {
                return Err(ScenarioError::assertion_failed(step, "custom assertion failed"));
            }
        }

        Ok(())
    }
}

fn describe(records: &[ViolationRecord]) -> String {
    if records.is_empty() {
        return "  (none)".to_string();
    }
    records
        .iter()
        .map(|r| format!("  {}: {}", r.kind, r.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fluent builder for assertions.
#[derive(Default)]
pub struct AssertionBuilder {
    assertion: Assertion,
}

impl AssertionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The run passed: no violations at all.
    pub fn ok(mut self) -> Self {
        self.assertion.violations = Some(0);
        self
    }

    /// Exact total number of violations.
    pub fn violations(mut self, count: usize) -> Self {
        self.assertion.violations = Some(count);
        self
    }

    /// Exact number of violations of one kind.
    pub fn kind(mut self, kind: ViolationKind, count: usize) -> Self {
        self.assertion.kinds.push((kind, count));
        self
    }

    /// At least one violation concerns this entity.
    pub fn entity(mut self, id: impl Into<String>) -> Self {
        self.assertion.entities.push(id.into());
        self
    }

    /// The violating entities, in the order they are first reported.
    pub fn only_entities<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assertion.only_entities = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn message_contains(mut self, fragment: impl Into<String>) -> Self {
        self.assertion.message_contains.push(fragment.into());
        self
    }

    /// The run aborted with an error whose message contains `fragment`.
    pub fn error(mut self, fragment: impl Into<String>) -> Self {
        self.assertion.error = Some(fragment.into());
        self
    }

    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&[ViolationRecord]) -> bool + Send + Sync + 'static,
    {
        self.assertion.custom = Some(Box::new(check));
        self
    }

    pub fn build(self) -> Assertion {
        self.assertion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: ViolationKind, entity: &str) -> ViolationRecord {
        ViolationRecord {
            kind,
            constraint: None,
            entity: Some(entity.to_string()),
            message: format!("{} broke {}", entity, kind),
        }
    }

    fn namespaces() -> NamespaceManager {
        let mut namespaces = NamespaceManager::new();
        namespaces.store_prefix("ex", "http://example.org/");
        namespaces
    }

    #[test]
    fn test_counts_and_entities() {
        // GIVEN
        let outcome: StepOutcome = Ok(vec![
            record(ViolationKind::ReferenceNotFound, "http://example.org/a"),
            record(ViolationKind::ReferenceNotFound, "http://example.org/b"),
        ]);

        // WHEN
        let assertion = AssertionBuilder::new()
            .violations(2)
            .kind(ViolationKind::ReferenceNotFound, 2)
            .entity("ex:b")
            .only_entities(["ex:a", "ex:b"])
            .build();

        // THEN
        assert!(assertion.verify("s", &outcome, &namespaces()).is_ok());
    }

    #[test]
    fn test_count_mismatch_fails() {
        let outcome: StepOutcome = Ok(vec![record(ViolationKind::ReferenceNotFound, "ex:a")]);

        let assertion = AssertionBuilder::new().ok().build();

        assert!(matches!(
            assertion.verify("s", &outcome, &namespaces()),
            Err(ScenarioError::AssertionFailed { .. })
        ));
    }

    #[test]
    fn test_expected_error() {
        let outcome: StepOutcome = Err("Validation timed out".to_string());

        let expects_error = AssertionBuilder::new().error("timed out").build();
        let expects_pass = AssertionBuilder::new().ok().build();

        assert!(expects_error.verify("s", &outcome, &namespaces()).is_ok());
        assert!(expects_pass.verify("s", &outcome, &namespaces()).is_err());
    }
}
