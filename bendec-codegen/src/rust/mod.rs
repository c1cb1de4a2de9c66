//! Rust code generation modules.

pub mod enums;
pub mod structs;
pub mod types;
pub mod unions;

pub use enums::EnumGenerator;
pub use structs::StructGenerator;
pub use types::TypeGenerator;
pub use unions::UnionGenerator;

use crate::error::CodegenError;
use crate::options::GeneratorOptions;
use bendec_schema::{Schema, byte_length};

/// Pushes `///` doc lines for an optional description.
pub(crate) fn push_docs(output: &mut String, indent: &str, description: Option<&str>) {
    if let Some(description) = description {
        for line in description.lines() {
            if line.is_empty() {
                output.push_str(&format!("{indent}///\n"));
            } else {
                output.push_str(&format!("{indent}/// {line}\n"));
            }
        }
    }
}

/// Pushes the docs and attribute block that precede a declaration.
pub(crate) fn push_preamble(
    output: &mut String,
    schema: &Schema,
    options: &GeneratorOptions,
    name: &str,
    description: Option<&str>,
) -> Result<(), CodegenError> {
    push_docs(output, "", description);
    if options.layout_docs() {
        if description.is_some() {
            output.push_str("///\n");
        }
        output.push_str(&format!(
            "/// Byte length: {}\n",
            byte_length(schema, name)?
        ));
    }
    let attribute = options.attribute();
    if !attribute.is_empty() {
        output.push_str(attribute);
        output.push('\n');
    }
    Ok(())
}
