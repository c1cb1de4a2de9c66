//! Normalization of loose definitions into the strict model.
//!
//! Kinds are taken from `kind` when present, otherwise inferred from the
//! single kind-specific shape the definition carries. Defaults are filled in
//! here so nothing downstream has to sniff shapes again.

use crate::error::SchemaError;
use crate::ir::{
    AliasStrict, EnumStrict, EnumVariant, FieldStrict, PrimitiveStrict, Schema, StructStrict,
    TypeDefinitionStrict, UnionStrict,
};
use crate::types::{Field, Kind, TypeDefinition};

/// Normalizes a loose type list into a [`Schema`].
///
/// The result keeps input order and cardinality.
///
/// # Errors
/// Returns `SchemaError::DuplicateName` if a name repeats and
/// `SchemaError::MalformedDefinition` if a definition's shape does not match
/// its kind.
pub fn normalize(loose: &[TypeDefinition]) -> Result<Schema, SchemaError> {
    let types = loose
        .iter()
        .map(normalize_type)
        .collect::<Result<Vec<_>, _>>()?;
    let schema = Schema::new(types)?;
    tracing::debug!("normalized {} type definitions", schema.len());
    Ok(schema)
}

/// Normalizes a single loose definition.
///
/// # Errors
/// Returns `SchemaError::MalformedDefinition` if the shape does not match
/// the kind.
pub fn normalize_type(def: &TypeDefinition) -> Result<TypeDefinitionStrict, SchemaError> {
    if def.name.is_empty() {
        return Err(SchemaError::malformed("", "type definition without a name"));
    }

    let kind = resolve_kind(def)?;
    let description = def.description.clone();

    let strict = match kind {
        Kind::Primitive => TypeDefinitionStrict::Primitive(PrimitiveStrict {
            name: def.name.clone(),
            size: def.size,
            description,
        }),
        Kind::Alias => {
            let alias = def
                .alias
                .as_ref()
                .ok_or_else(|| SchemaError::malformed(&def.name, "alias without 'alias' target"))?;
            TypeDefinitionStrict::Alias(AliasStrict {
                name: def.name.clone(),
                alias: alias.name().to_string(),
                description,
            })
        }
        Kind::Struct => TypeDefinitionStrict::Struct(StructStrict {
            name: def.name.clone(),
            fields: def
                .fields
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(normalize_field)
                .collect(),
            description,
        }),
        Kind::Enum => {
            let underlying = def
                .underlying
                .clone()
                .ok_or_else(|| SchemaError::malformed(&def.name, "enum without 'underlying'"))?;
            let variants = def
                .variants
                .clone()
                .unwrap_or_default()
                .into_iter()
                .map(|v| EnumVariant {
                    name: v.name,
                    value: v.value,
                    description: v.description,
                })
                .collect();
            TypeDefinitionStrict::Enum(EnumStrict {
                name: def.name.clone(),
                underlying,
                variants,
                description,
            })
        }
        Kind::Union => {
            let discriminator = def
                .discriminator
                .clone()
                .ok_or_else(|| SchemaError::malformed(&def.name, "union without 'discriminator'"))?;
            if discriminator.is_empty() {
                return Err(SchemaError::malformed(
                    &def.name,
                    "union discriminator path is empty",
                ));
            }
            let members = def
                .members
                .clone()
                .ok_or_else(|| SchemaError::malformed(&def.name, "union without 'members'"))?;
            if members.is_empty() {
                return Err(SchemaError::malformed(&def.name, "union has no members"));
            }
            TypeDefinitionStrict::Union(UnionStrict {
                name: def.name.clone(),
                discriminator,
                members,
                description,
            })
        }
    };

    Ok(strict)
}

fn normalize_field(field: &Field) -> FieldStrict {
    FieldStrict {
        name: field.name.clone(),
        type_name: field.type_name.clone(),
        length: field.length.filter(|&len| len > 0),
        description: field.description.clone(),
    }
}

/// Kinds whose data the definition carries.
fn shapes(def: &TypeDefinition) -> Vec<Kind> {
    let mut found = Vec::new();
    if def.alias.is_some() {
        found.push(Kind::Alias);
    }
    if def.fields.is_some() {
        found.push(Kind::Struct);
    }
    if def.underlying.is_some() || def.variants.is_some() {
        found.push(Kind::Enum);
    }
    if def.discriminator.is_some() || def.members.is_some() {
        found.push(Kind::Union);
    }
    found
}

fn resolve_kind(def: &TypeDefinition) -> Result<Kind, SchemaError> {
    let found = shapes(def);

    match def.kind {
        Some(kind) => {
            if let Some(other) = found.iter().find(|&&k| k != kind) {
                return Err(SchemaError::malformed(
                    &def.name,
                    format!("{kind} definition carries {other} data"),
                ));
            }
            if kind != Kind::Primitive && def.size.is_some() {
                return Err(SchemaError::malformed(
                    &def.name,
                    format!("{kind} definition carries a primitive size"),
                ));
            }
            Ok(kind)
        }
        None => match found.as_slice() {
            [] => Ok(Kind::Primitive),
            [kind] if def.size.is_none() => Ok(*kind),
            _ => Err(SchemaError::malformed(
                &def.name,
                "cannot infer kind: definition mixes the shapes of several kinds",
            )),
        },
    }
}
