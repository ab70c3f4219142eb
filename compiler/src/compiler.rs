//! Translation of schema documents into a Schema.

use lattice_core::parse_document;
use lattice_schema::{ConstraintKind, Schema, SchemaBuilder};
use std::path::Path;
use tracing::{debug, warn};

use crate::compact::{ClassBlock, NamespacesBlock};
use crate::error::{CompileError, CompileResult};

/// Compile a compact YAML schema document.
pub fn compile(source: &str) -> CompileResult<Schema> {
    Compiler::new().compile(source)
}

/// Compile a JSON entity document declaring classes and constraints directly.
pub fn compile_document(source: &str) -> CompileResult<Schema> {
    let collection = parse_document(source)?;
    Ok(Schema::from_collection(collection))
}

/// Compile a schema file, choosing the format by extension
/// (`.yaml`/`.yml` compact form, `.json` entity document).
pub fn compile_file(path: impl AsRef<Path>) -> CompileResult<Schema> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => compile(&source),
        Some("json") => compile_document(&source),
        _ => Err(CompileError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Translates compact class blocks into primitive schema entities.
#[derive(Debug, Default)]
pub struct Compiler {
    builder: SchemaBuilder,
    classes: usize,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a compact YAML document into a Schema.
    pub fn compile(mut self, source: &str) -> CompileResult<Schema> {
        let elements: Vec<serde_yaml::Value> = serde_yaml::from_str(source)?;
        let mut elements = elements.into_iter();

        let header: NamespacesBlock = match elements.next() {
            Some(first) => serde_yaml::from_value(first)?,
            None => return Err(CompileError::MissingNamespaces),
        };
        let namespaces = header.namespaces.ok_or(CompileError::MissingNamespaces)?;
        for (prefix, expansion) in namespaces {
            self.builder.namespace(prefix, expansion);
        }

        for (offset, element) in elements.enumerate() {
            let block: ClassBlock = serde_yaml::from_value(element)?;
            self.compile_class(offset + 1, block)?;
        }

        debug!(classes = self.classes, "compiled compact schema");
        Ok(self.builder.build()?)
    }

    fn compile_class(&mut self, index: usize, block: ClassBlock) -> CompileResult<()> {
        let id = block.id.ok_or(CompileError::MissingClassId { index })?;
        self.classes += 1;

        let mut class = self.builder.add_class(id.as_str());
        for parent in block.superclasses {
            class = class.extends(parent);
        }
        if let Some(label) = block.label {
            class = class.label(label);
        }
        if let Some(description) = block.description {
            class = class.description(description);
        }
        for (predicate, value) in block.props {
            class = class.property(predicate, value);
        }
        for (predicate, target) in block.refs {
            class = class.reference(predicate, target);
        }
        if block.is_abstract {
            class = class.is_abstract();
        }
        class.done();

        for pc in block.property_constraints {
            let mut constraint = self.builder.add_constraint(ConstraintKind::Property, &id);
            match pc.property_class.as_deref() {
                Some(property_class) => constraint = constraint.property_class(property_class),
                None => warn!(class = %id, "property constraint without propertyClass"),
            }
            if let Some(datatype) = pc.datatype.as_deref() {
                constraint = constraint.datatype(datatype);
            }
            if let Some(min) = pc.min_card {
                constraint = constraint.min(min);
            }
            if let Some(max) = pc.max_card {
                constraint = constraint.max(max);
            }
            if pc.sortable {
                constraint = constraint.sortable();
            }
            if pc.queryable {
                constraint = constraint.queryable();
            }
            if pc.is_unique {
                constraint = constraint.unique();
            }
            constraint.done();
        }

        for rc in block.reference_constraints {
            let mut constraint = self.builder.add_constraint(ConstraintKind::Reference, &id);
            match rc.reference_class.as_deref() {
                Some(reference_class) => constraint = constraint.reference_class(reference_class),
                None => warn!(class = %id, "reference constraint without referenceClass"),
            }
            if let Some(target) = rc.referenced_entity_class.as_deref() {
                constraint = constraint.target(target);
            }
            if let Some(min) = rc.min_card {
                constraint = constraint.min(min);
            }
            if let Some(max) = rc.max_card {
                constraint = constraint.max(max);
            }
            if let Some(inverse) = rc.inverse_reference_class.as_deref() {
                constraint = constraint.inverse(inverse);
            }
            if let Some(min) = rc.inverse_min_card {
                constraint = constraint.inverse_min(min);
            }
            if let Some(max) = rc.inverse_max_card {
                constraint = constraint.inverse_max(max);
            }
            constraint.done();
        }

        for ac in block.application_constraints {
            let mut constraint = self.builder.add_constraint(ConstraintKind::Application, &id);
            match ac.rule.as_deref() {
                Some(rule) => constraint = constraint.rule(rule),
                None => warn!(class = %id, "application constraint without rule"),
            }
            constraint.done();
        }

        Ok(())
    }
}
