//! Enum code generation.

use super::{push_docs, push_preamble};
use crate::error::CodegenError;
use crate::options::GeneratorOptions;
use bendec_schema::{EnumStrict, Schema};

/// Generator for integer-backed enums.
pub struct EnumGenerator<'a> {
    schema: &'a Schema,
    options: &'a GeneratorOptions,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(schema: &'a Schema, options: &'a GeneratorOptions) -> Self {
        Self { schema, options }
    }

    /// Generates an enum definition tagged with its underlying width.
    ///
    /// # Errors
    /// Returns `CodegenError::Schema` if layout docs are enabled and the
    /// size cannot be computed.
    pub fn generate(&self, def: &EnumStrict) -> Result<String, CodegenError> {
        let mut output = String::new();

        push_preamble(
            &mut output,
            self.schema,
            self.options,
            &def.name,
            def.description.as_deref(),
        )?;
        output.push_str(&format!("#[repr({})]\n", def.underlying));
        output.push_str("#[derive(Serialize_repr, Deserialize_repr)]\n");
        output.push_str(&format!("pub enum {} {{\n", def.name));
        for variant in &def.variants {
            push_docs(&mut output, "    ", variant.description.as_deref());
            output.push_str(&format!(
                "    {} = {},\n",
                variant.name,
                format_value(variant.value)
            ));
        }
        output.push('}');

        Ok(output)
    }
}

/// Formats a discriminant: zero-padded hex when non-negative, decimal
/// otherwise.
#[must_use]
pub fn format_value(value: i128) -> String {
    if value < 0 {
        value.to_string()
    } else {
        format!("{value:#06x}")
    }
}
