//! Schema validation utilities.
//!
//! This module checks a normalized schema for dangling references, alias
//! cycles, enum ranges and union consistency before any code is generated.

use crate::discriminator::{resolve_discriminator, walk_discriminator};
use crate::error::SchemaError;
use crate::ir::{
    AliasStrict, EnumStrict, Schema, StructStrict, TypeDefinitionStrict, UnionStrict,
    to_field_ident,
};
use std::collections::HashSet;

/// Validation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Check every union member, not only the first.
    pub strict_unions: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            strict_unions: true,
        }
    }
}

/// Validates a normalized schema.
///
/// # Arguments
/// * `schema` - The schema to validate
/// * `options` - Which optional checks to run
///
/// # Errors
/// Returns the first `SchemaError` found, in definition order.
pub fn validate_schema(schema: &Schema, options: &ValidationOptions) -> Result<(), SchemaError> {
    for type_def in schema {
        match type_def {
            TypeDefinitionStrict::Primitive(_) => {}
            TypeDefinitionStrict::Alias(alias) => validate_alias(schema, alias)?,
            TypeDefinitionStrict::Struct(def) => validate_struct(schema, def)?,
            TypeDefinitionStrict::Enum(def) => validate_enum(def)?,
            TypeDefinitionStrict::Union(def) => validate_union(schema, def, options)?,
        }
    }
    Ok(())
}

/// Validates that an alias resolves to a non-alias type.
fn validate_alias(schema: &Schema, alias: &AliasStrict) -> Result<(), SchemaError> {
    schema.resolve_alias(&alias.name).map(|_| ())
}

/// Validates field references and field identifier uniqueness.
fn validate_struct(schema: &Schema, def: &StructStrict) -> Result<(), SchemaError> {
    unique_idents(&def.name, def.fields.iter().map(|field| field.name.as_str()))?;

    for field in &def.fields {
        schema.require_type(&field.type_name, &format!("{}.{}", def.name, field.name))?;
    }

    Ok(())
}

/// Checks that `names` render to distinct Rust identifiers.
///
/// `fooBar` and `foo_bar` are different schema names but the same field.
fn unique_idents<'a>(
    owner: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for name in names {
        let ident = to_field_ident(name);
        if !seen.insert(ident.clone()) {
            return Err(SchemaError::DuplicateField {
                struct_name: owner.to_string(),
                field: ident,
            });
        }
    }
    Ok(())
}

/// Validates an enum type definition.
fn validate_enum(def: &EnumStrict) -> Result<(), SchemaError> {
    let integer = def
        .integer_type()
        .ok_or_else(|| SchemaError::InvalidUnderlying {
            enum_name: def.name.clone(),
            underlying: def.underlying.clone(),
        })?;

    let mut seen = HashSet::new();
    for variant in &def.variants {
        if !seen.insert(variant.name.as_str()) {
            return Err(SchemaError::DuplicateVariant {
                enum_name: def.name.clone(),
                variant: variant.name.clone(),
            });
        }
        if !integer.contains(variant.value) {
            return Err(SchemaError::EnumValueOutOfRange {
                enum_name: def.name.clone(),
                variant: variant.name.clone(),
                value: variant.value,
                underlying: def.underlying.clone(),
            });
        }
    }

    Ok(())
}

/// Validates a union.
///
/// Member references are always checked. In strict mode every member must
/// be a struct whose discriminator walk yields the first member's enum, and
/// that enum must name a variant after each member.
fn validate_union(
    schema: &Schema,
    def: &UnionStrict,
    options: &ValidationOptions,
) -> Result<(), SchemaError> {
    for member in &def.members {
        schema.require_type(member, &def.name)?;
    }
    unique_idents(&def.name, def.members.iter().map(String::as_str))?;

    let discriminant = resolve_discriminator(def, schema)?;
    if !options.strict_unions {
        return Ok(());
    }

    for member in &def.members {
        let member_def = schema.require_type(member, &def.name)?;
        if member_def.as_struct().is_none() {
            return Err(SchemaError::malformed(
                &def.name,
                format!(
                    "union member '{member}' is {} not a struct",
                    member_def.kind()
                ),
            ));
        }

        let resolved = walk_discriminator(def, member, schema)?;
        if resolved.name() != discriminant.name() {
            return Err(SchemaError::discriminator(
                &def.name,
                format!(
                    "member '{member}' resolves to '{}' but '{}' resolves to '{}'",
                    resolved.name(),
                    def.members[0],
                    discriminant.name()
                ),
            ));
        }
    }

    let TypeDefinitionStrict::Enum(tag) = schema.resolve_alias(discriminant.name())? else {
        return Err(SchemaError::discriminator(
            &def.name,
            format!(
                "discriminator resolves to {} '{}', expected an enum",
                discriminant.kind(),
                discriminant.name()
            ),
        ));
    };

    if let Some(member) = def.members.iter().find(|m| tag.variant(m).is_none()) {
        return Err(SchemaError::discriminator(
            &def.name,
            format!("enum '{}' has no variant for member '{member}'", tag.name),
        ));
    }

    Ok(())
}
