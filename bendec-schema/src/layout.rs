//! Packed byte layout of schema types.
//!
//! Generated structs and unions are `#[repr(C, packed)]`, so sizes are plain
//! sums (structs) and maxima (unions) with no padding.

use crate::error::SchemaError;
use crate::ir::{Schema, TypeDefinitionStrict};
use crate::types::builtin_size;

/// Returns the packed size in bytes of the type named `name`.
///
/// # Errors
/// Returns `SchemaError::UnresolvedReference` for unknown names,
/// `SchemaError::UnknownSize` for a primitive without a known width,
/// `SchemaError::InvalidUnderlying` for an enum over a non-integer,
/// `SchemaError::SizeOverflow` when a size does not fit in `usize` and
/// `SchemaError::CircularReference` for a type that contains itself.
pub fn byte_length(schema: &Schema, name: &str) -> Result<usize, SchemaError> {
    let mut stack = Vec::new();
    size_of(schema, name, name, &mut stack)
}

fn size_of<'a>(
    schema: &'a Schema,
    name: &str,
    referenced_by: &str,
    stack: &mut Vec<&'a str>,
) -> Result<usize, SchemaError> {
    let type_def = schema.require_type(name, referenced_by)?;
    let type_name = type_def.name();

    if stack.contains(&type_name) {
        stack.push(type_name);
        return Err(SchemaError::CircularReference {
            path: stack.join(" -> "),
        });
    }
    stack.push(type_name);

    let size = match type_def {
        TypeDefinitionStrict::Primitive(p) => p
            .size
            .or_else(|| builtin_size(&p.name))
            .ok_or_else(|| SchemaError::UnknownSize {
                name: p.name.clone(),
            })?,
        TypeDefinitionStrict::Alias(a) => size_of(schema, &a.alias, &a.name, stack)?,
        TypeDefinitionStrict::Struct(s) => {
            let mut total: usize = 0;
            for field in &s.fields {
                let owner = format!("{}.{}", s.name, field.name);
                total = size_of(schema, &field.type_name, &owner, stack)?
                    .checked_mul(field.arity())
                    .and_then(|bytes| total.checked_add(bytes))
                    .ok_or_else(|| SchemaError::SizeOverflow {
                        name: s.name.clone(),
                    })?;
            }
            total
        }
        TypeDefinitionStrict::Enum(e) => e
            .integer_type()
            .ok_or_else(|| SchemaError::InvalidUnderlying {
                enum_name: e.name.clone(),
                underlying: e.underlying.clone(),
            })?
            .size(),
        TypeDefinitionStrict::Union(u) => {
            let mut largest = 0;
            for member in &u.members {
                largest = largest.max(size_of(schema, member, &u.name, stack)?);
            }
            largest
        }
    };

    stack.pop();
    Ok(size)
}
