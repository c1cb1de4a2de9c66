//! Primitive, alias and whole-type override generation.

use super::push_docs;
use crate::options::GeneratorOptions;
use bendec_schema::{AliasStrict, TypeDefinitionStrict};

/// Built-in names that get no declaration.
pub const IGNORED_TYPES: &[&str] = &["char"];

/// Generator for primitives, aliases and mapped types.
pub struct TypeGenerator<'a> {
    options: &'a GeneratorOptions,
}

impl<'a> TypeGenerator<'a> {
    /// Creates a new type generator.
    #[must_use]
    pub fn new(options: &'a GeneratorOptions) -> Self {
        Self { options }
    }

    /// Generates `pub type Name = ...;` if the type name itself is mapped.
    #[must_use]
    pub fn generate_override(&self, type_def: &TypeDefinitionStrict) -> Option<String> {
        let mapper = self.options.type_mapping(type_def.name())?;
        let size = match type_def {
            TypeDefinitionStrict::Primitive(p) => p.size.unwrap_or(0),
            _ => 0,
        };

        let mut output = String::new();
        push_docs(&mut output, "", type_def.description());
        output.push_str(&format!("pub type {} = {};", type_def.name(), mapper(size)));
        Some(output)
    }

    /// Returns true if the name is a built-in that is skipped.
    #[must_use]
    pub fn is_ignored(name: &str) -> bool {
        IGNORED_TYPES.contains(&name)
    }

    /// Generates the comment for a skipped built-in.
    #[must_use]
    pub fn generate_ignored(name: &str) -> String {
        format!("// ignored: {name}")
    }

    /// Generates the comment for a primitive.
    #[must_use]
    pub fn generate_primitive(name: &str) -> String {
        format!("// primitive built-in: {name}")
    }

    /// Generates a type alias.
    #[must_use]
    pub fn generate_alias(&self, alias: &AliasStrict) -> String {
        let mut output = String::new();
        push_docs(&mut output, "", alias.description.as_deref());
        output.push_str(&format!("pub type {} = {};", alias.name, alias.alias));
        output
    }
}
