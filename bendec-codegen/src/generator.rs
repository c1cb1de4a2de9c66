//! Document-level code generation.

use crate::error::CodegenError;
use crate::options::GeneratorOptions;
use crate::rust::{EnumGenerator, StructGenerator, TypeGenerator, UnionGenerator};
use bendec_schema::{Schema, TypeDefinitionStrict};

/// First line of every generated file.
pub const HEADER: &str = "// Generated by the Bendec type generator. Do not edit.";

/// Imports the generated declarations rely on.
pub const IMPORTS: &str = "\
#[allow(unused_imports)]
use serde::{Deserialize, Serialize, Serializer};
#[allow(unused_imports)]
use serde_big_array::BigArray;
#[allow(unused_imports)]
use serde_repr::{Deserialize_repr, Serialize_repr};";

/// Rust code generator over a normalized schema.
pub struct Generator<'a> {
    schema: &'a Schema,
    options: &'a GeneratorOptions,
}

impl<'a> Generator<'a> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(schema: &'a Schema, options: &'a GeneratorOptions) -> Self {
        Self { schema, options }
    }

    /// Generates the complete file.
    ///
    /// Declarations follow schema order and are separated by blank lines.
    /// Nothing is returned unless every declaration succeeds.
    ///
    /// # Errors
    /// Returns the first `CodegenError` raised by a declaration.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let definitions = self
            .schema
            .iter()
            .map(|type_def| self.generate_type(type_def))
            .collect::<Result<Vec<_>, _>>()?;

        let mut output = String::new();
        output.push_str(HEADER);
        output.push('\n');
        output.push_str(IMPORTS);
        output.push_str("\n\n");
        output.push_str(&definitions.join("\n\n"));
        output.push('\n');
        Ok(output)
    }

    /// Generates the declaration of a single type.
    ///
    /// # Errors
    /// Returns `CodegenError` if a union discriminator cannot be resolved,
    /// a type mapping renders nothing, or layout docs cannot be computed.
    pub fn generate_type(&self, type_def: &TypeDefinitionStrict) -> Result<String, CodegenError> {
        tracing::debug!("generating {} {}", type_def.kind(), type_def.name());

        let types = TypeGenerator::new(self.options);
        if let Some(mapped) = types.generate_override(type_def) {
            return Ok(mapped);
        }
        if TypeGenerator::is_ignored(type_def.name()) {
            return Ok(TypeGenerator::generate_ignored(type_def.name()));
        }

        match type_def {
            TypeDefinitionStrict::Primitive(p) => Ok(TypeGenerator::generate_primitive(&p.name)),
            TypeDefinitionStrict::Alias(a) => Ok(types.generate_alias(a)),
            TypeDefinitionStrict::Enum(e) => {
                EnumGenerator::new(self.schema, self.options).generate(e)
            }
            TypeDefinitionStrict::Struct(s) => {
                StructGenerator::new(self.schema, self.options).generate(s)
            }
            TypeDefinitionStrict::Union(u) => {
                UnionGenerator::new(self.schema, self.options).generate(u)
            }
        }
    }
}
