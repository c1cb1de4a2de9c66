//! Struct code generation.

use super::{push_docs, push_preamble};
use crate::error::CodegenError;
use crate::options::GeneratorOptions;
use bendec_schema::ir::to_field_ident;
use bendec_schema::{FieldStrict, Schema, StructStrict};

/// Arrays longer than this need `serde_big_array` to (de)serialize.
pub const BIG_ARRAY_THRESHOLD: usize = 32;

/// Generator for packed structs.
pub struct StructGenerator<'a> {
    schema: &'a Schema,
    options: &'a GeneratorOptions,
}

impl<'a> StructGenerator<'a> {
    /// Creates a new struct generator.
    #[must_use]
    pub fn new(schema: &'a Schema, options: &'a GeneratorOptions) -> Self {
        Self { schema, options }
    }

    /// Generates a struct definition with fields in schema order.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` if a type mapping renders an empty
    /// type, or `CodegenError::Schema` if layout docs cannot be computed.
    pub fn generate(&self, def: &StructStrict) -> Result<String, CodegenError> {
        let mut output = String::new();

        push_preamble(
            &mut output,
            self.schema,
            self.options,
            &def.name,
            def.description.as_deref(),
        )?;
        output.push_str("#[repr(C, packed)]\n");
        output.push_str("#[derive(Serialize, Deserialize)]\n");
        output.push_str(&format!("pub struct {} {{\n", def.name));
        for field in &def.fields {
            push_docs(&mut output, "    ", field.description.as_deref());
            if field.length.is_some_and(|len| len > BIG_ARRAY_THRESHOLD) {
                output.push_str("    #[serde(with = \"BigArray\")]\n");
            }
            output.push_str(&format!(
                "    pub {}: {},\n",
                to_field_ident(&field.name),
                self.field_type(&def.name, field)?
            ));
        }
        output.push('}');

        Ok(output)
    }

    /// Renders the Rust type of a field.
    ///
    /// A mapping keyed by the field's type (suffixed `[]` for arrays) wins;
    /// otherwise scalars use the type name and arrays become `[T; N]`.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` if the mapping renders nothing.
    pub fn field_type(&self, owner: &str, field: &FieldStrict) -> Result<String, CodegenError> {
        let key = if field.is_array() {
            format!("{}[]", field.type_name)
        } else {
            field.type_name.clone()
        };

        let Some(mapper) = self.options.type_mapping(&key) else {
            return Ok(match field.length {
                Some(len) => format!("[{}; {}]", field.type_name, len),
                None => field.type_name.clone(),
            });
        };

        let rendered = mapper(field.length.unwrap_or(0));
        if rendered.trim().is_empty() {
            return Err(CodegenError::generation(format!(
                "type mapping '{key}' rendered an empty type for field '{owner}.{}'",
                field.name
            )));
        }
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bendec_schema::{Field, TypeDefinition, TypeDefinitionStrict, normalize};

    fn generate(fields: Vec<Field>, options: &GeneratorOptions) -> Result<String, CodegenError> {
        let schema = normalize(&[TypeDefinition::structure("Msg", fields)])?;
        let def = schema
            .iter()
            .find_map(TypeDefinitionStrict::as_struct)
            .expect("struct")
            .clone();
        StructGenerator::new(&schema, options).generate(&def)
    }

    #[test]
    fn test_field_order_preserved() {
        let output = generate(
            vec![
                Field::new("msgType", "u16"),
                Field::array("payload", "u8", 4),
                Field::new("seqNum", "u32"),
            ],
            &GeneratorOptions::default(),
        )
        .expect("Failed to generate");

        assert_eq!(
            output,
            "#[repr(C, packed)]\n\
             #[derive(Serialize, Deserialize)]\n\
             pub struct Msg {\n    \
             pub msg_type: u16,\n    \
             pub payload: [u8; 4],\n    \
             pub seq_num: u32,\n\
             }"
        );
    }

    #[test]
    fn test_big_array_threshold() {
        let output = generate(
            vec![Field::array("at", "u8", 32), Field::array("over", "u8", 33)],
            &GeneratorOptions::default(),
        )
        .expect("Failed to generate");

        assert!(output.contains("    pub at: [u8; 32],\n"));
        assert!(output.contains("    #[serde(with = \"BigArray\")]\n    pub over: [u8; 33],\n"));
        assert_eq!(output.matches("BigArray").count(), 1);
    }

    #[test]
    fn test_char_array_uses_default_mapping() {
        let output = generate(
            vec![Field::array("name", "char", 64), Field::new("initial", "char")],
            &GeneratorOptions::default(),
        )
        .expect("Failed to generate");

        assert!(output.contains("    #[serde(with = \"BigArray\")]\n    pub name: [u8; 64],\n"));
        assert!(output.contains("    pub initial: char,\n"));
    }

    #[test]
    fn test_scalar_mapping_and_keyword_field() {
        let options = GeneratorOptions::new().with_type_mapping("u64", |_| "U64Le".to_string());
        let output =
            generate(vec![Field::new("type", "u64")], &options).expect("Failed to generate");

        assert!(output.contains("    pub r#type: U64Le,\n"));
    }

    #[test]
    fn test_empty_mapping_fails() {
        let options = GeneratorOptions::new().with_type_mapping("u8[]", |_| String::new());
        let result = generate(vec![Field::array("data", "u8", 4)], &options);

        assert!(matches!(result, Err(CodegenError::Generation { .. })));
    }

    #[test]
    fn test_field_docs() {
        let output = generate(
            vec![Field::new("legs", "u8").with_description("Leg count")],
            &GeneratorOptions::default(),
        )
        .expect("Failed to generate");

        assert!(output.contains("    /// Leg count\n    pub legs: u8,\n"));
    }
}
