//! Library scenarios: a schema written as an entity document, closed-world
//! validation and an application rule.

use lattice_core::Entity;
use lattice_tests::prelude::*;
use lattice_validator::{RuleContext, ValidationResult};

/// ISBN-13 check digit.
fn isbn13(ctx: &RuleContext<'_>, entity: &Entity) -> ValidationResult<Option<String>> {
    let predicate = ctx.schema.namespaces().canonical("lib:isbn");
    let Some(isbn) = entity.first_string_property(&predicate) else {
        return Ok(None);
    };
    let digits: Vec<u32> = isbn.chars().filter_map(|c| c.to_digit(10)).collect();
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
        .sum();
    if digits.len() == 13 && sum % 10 == 0 {
        Ok(None)
    } else {
        Ok(Some(format!("{} has invalid ISBN {}", entity.id, isbn)))
    }
}

fn base(name: &str, settings: ValidatorSettings) -> Scenario {
    Scenario::new(name)
        .schema("library/schema.json")
        .seed("authors", "library/seeds/authors.json")
        .settings(settings.with_validate_related(true))
        .rule("lib:rules/isbn13", isbn13)
        .operations("library/operations/books.ops")
}

#[test]
fn test_open_world() {
    base("open", ValidatorSettings::new())
        .step("good_omens", |a| a.ok())
        .step("anonymous", |a| a.violations(1).kind(ViolationKind::MinReferenceOccurrenceNotMet, 1))
        .step("extra_predicates", |a| a.ok())
        .step("bad_isbn", |a| {
            a.violations(1)
                .kind(ViolationKind::ApplicationRuleViolation, 1)
                .message_contains("9780552134621")
        })
        .run()
        .unwrap();
}

#[test]
fn test_strict() {
    base("strict", ValidatorSettings::new().with_strict_validation(true))
        .step("good_omens", |a| a.ok())
        .step("extra_predicates", |a| {
            a.violations(2)
                .kind(ViolationKind::UndeclaredProperty, 1)
                .kind(ViolationKind::UndeclaredReference, 1)
                .custom(|records| records.iter().all(|r| r.constraint.is_none()))
        })
        .run()
        .unwrap();
}

#[test]
fn test_missing_step_is_reported() {
    let result = base("missing", ValidatorSettings::new())
        .step("no_such_step", |a| a.ok())
        .run();

    assert!(matches!(result, Err(ScenarioError::StepNotFound { .. })));
}
