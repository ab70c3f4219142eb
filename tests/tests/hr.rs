//! HR scenarios: inheritance, referential integrity, inverse cardinality
//! and abstract classes over a people/companies store.

use lattice_core::Entity;
use lattice_tests::prelude::*;
use lattice_validator::{RuleContext, ValidationResult};

/// Organisation numbers are exactly six digits.
fn org_number_format(ctx: &RuleContext<'_>, entity: &Entity) -> ValidationResult<Option<String>> {
    let predicate = ctx.schema.namespaces().canonical("ex:orgNumber");
    Ok(match entity.first_string_property(&predicate) {
        Some(number) if number.len() == 6 && number.chars().all(|c| c.is_ascii_digit()) => None,
        Some(number) => Some(format!("{} has malformed orgNumber {}", entity.id, number)),
        None => None,
    })
}

fn base(name: &str) -> Scenario {
    Scenario::new(name)
        .schema("hr/schema.yaml")
        .settings_file("hr/settings.toml")
        .seed("people", "hr/seeds/people.json")
        .seed("companies", "hr/seeds/companies.json")
        .rule("ex:rules/orgNumberFormat", org_number_format)
}

mod people {
    use super::*;

    pub fn scenario() -> Scenario {
        base("people")
            .operations("hr/operations/people.ops")
            .step("valid_employee", |a| a.ok())
            .step("nameless", |a| {
                a.violations(1)
                    .kind(ViolationKind::MinPropertyOccurrenceNotMet, 1)
                    .entity("ex:bart")
            })
            .step("two_names", |a| {
                a.violations(1).kind(ViolationKind::MaxPropertyOccurrenceExceeded, 1)
            })
            .step("two_employers", |a| {
                a.violations(1).kind(ViolationKind::MaxReferenceOccurrenceExceeded, 1)
            })
            .step("dangling_employer", |a| {
                a.violations(1)
                    .kind(ViolationKind::ReferenceNotFound, 1)
                    .message_contains("moesTavern")
            })
            .step("employer_is_person", |a| {
                a.violations(1).kind(ViolationKind::ReferenceTypeMismatch, 1)
            })
            .step("abstract_agent", |a| {
                a.violations(1).kind(ViolationKind::AbstractEntityClassViolation, 1)
            })
            .step("untyped", |a| a.ok())
            .step("batch", |a| a.violations(3).only_entities(["ex:p1", "ex:p3", "ex:p4"]))
    }

    #[test]
    fn test_single_entity_checks() {
        scenario().run().unwrap();
    }

    #[test]
    fn test_single_entity_checks_in_parallel() {
        scenario().workers(3).run().unwrap();
    }
}

mod datasets {
    use super::*;

    pub fn scenario() -> Scenario {
        base("datasets")
            .operations("hr/operations/datasets.ops")
            .step("people", |a| a.ok())
            .step("companies", |a| {
                a.violations(2)
                    .kind(ViolationKind::MinInverseReferenceOccurrenceNotMet, 1)
                    .kind(ViolationKind::ApplicationRuleViolation, 1)
                    .only_entities(["ex:kwikemart"])
            })
            .step("unknown", |a| a.error("Unknown dataset: payroll"))
            .step("schema", |a| a.ok())
    }

    #[test]
    fn test_dataset_checks() {
        scenario().run().unwrap();
    }

    #[test]
    fn test_unregistered_rule_is_skipped() {
        Scenario::new("no_rules")
            .schema("hr/schema.yaml")
            .settings_file("hr/settings.toml")
            .seed("people", "hr/seeds/people.json")
            .seed("companies", "hr/seeds/companies.json")
            .operations("hr/operations/datasets.ops")
            .step("companies", |a| {
                a.violations(1).kind(ViolationKind::MinInverseReferenceOccurrenceNotMet, 1)
            })
            .run()
            .unwrap();
    }

    #[test]
    fn test_abstract_instances_in_store() {
        base("legacy")
            .seed("legacy", "hr/seeds/legacy.json")
            .operations("hr/operations/datasets.ops")
            .step("schema", |a| {
                a.violations(1)
                    .kind(ViolationKind::ReferenceTypeMismatch, 1)
                    .message_contains("expected zero instances")
                    .custom(|records| records.iter().all(|r| r.entity.is_none()))
            })
            .step("people", |a| a.violations(1).message_contains("someone"))
            .run()
            .unwrap();
    }
}

mod settings {
    use super::*;

    #[test]
    fn test_datasets_context_hides_other_datasets() {
        // GIVEN only the people dataset counts for references
        base("context")
            .settings(
                ValidatorSettings::new()
                    .with_validate_related(true)
                    .with_datasets_context(["people"]),
            )
            .operations("hr/operations/people.ops")
            // THEN a company reference no longer resolves
            .step("valid_employee", |a| a.violations(1).kind(ViolationKind::ReferenceNotFound, 1))
            .run()
            .unwrap();
    }

    #[test]
    fn test_open_world_skips_references() {
        base("open")
            .settings(ValidatorSettings::new())
            .operations("hr/operations/people.ops")
            .step("dangling_employer", |a| a.ok())
            .step("employer_is_person", |a| a.ok())
            .step("nameless", |a| a.violations(1))
            .run()
            .unwrap();
    }

    #[test]
    fn test_related_without_provider() {
        base("no_provider")
            .without_provider()
            .operations("hr/operations/people.ops")
            .step("valid_employee", |a| a.error("requires a data provider"))
            .run()
            .unwrap();
    }

    #[test]
    fn test_timeout() {
        base("timeout")
            .settings(ValidatorSettings::new().with_timeout(std::time::Duration::ZERO))
            .operations("hr/operations/people.ops")
            .step("valid_employee", |a| a.error("timed out"))
            .run()
            .unwrap();
    }
}
