//! Union discriminator resolution.
//!
//! A union's discriminator is a field path such as `["header", "kind"]`.
//! Walking it through a member struct yields the type of the tag, which is
//! the enum the generated serializer matches on.

use crate::error::SchemaError;
use crate::ir::{Schema, TypeDefinitionStrict, UnionStrict};

/// Position of the walk over a discriminator path.
#[derive(Debug, Clone, Copy)]
enum Cursor<'a> {
    /// The next segment needs this type to be a struct.
    AwaitingStruct(&'a TypeDefinitionStrict),
    /// A segment matched a field; its type is resolved next.
    FoundField {
        owner: &'a str,
        field: &'a str,
        type_name: &'a str,
    },
    /// All segments consumed.
    Done(&'a TypeDefinitionStrict),
}

/// Resolves the type of a union's discriminator.
///
/// Only the first member is walked; see [`walk_discriminator`] to check the
/// others.
///
/// # Errors
/// Returns `SchemaError::DiscriminatorPath` if a segment passes through a
/// non-struct or names a missing field, and
/// `SchemaError::UnresolvedReference` if a referenced type does not exist.
pub fn resolve_discriminator<'a>(
    union: &UnionStrict,
    schema: &'a Schema,
) -> Result<&'a TypeDefinitionStrict, SchemaError> {
    let first = union.members.first().ok_or_else(|| {
        SchemaError::malformed(&union.name, "union has no members")
    })?;
    walk_discriminator(union, first, schema)
}

/// Walks a union's discriminator path starting from `member`.
///
/// # Errors
/// Same as [`resolve_discriminator`].
pub fn walk_discriminator<'a>(
    union: &UnionStrict,
    member: &str,
    schema: &'a Schema,
) -> Result<&'a TypeDefinitionStrict, SchemaError> {
    let start = schema.require_type(member, &union.name)?;
    let mut cursor = Cursor::AwaitingStruct(start);
    let mut segments = union.discriminator.iter();

    loop {
        cursor = match cursor {
            Cursor::AwaitingStruct(current) => {
                let Some(segment) = segments.next() else {
                    break Ok(current);
                };
                let TypeDefinitionStrict::Struct(def) = current else {
                    return Err(SchemaError::discriminator(
                        &union.name,
                        format!(
                            "path segment '{segment}' requires a struct, found {} '{}'",
                            current.kind(),
                            current.name()
                        ),
                    ));
                };
                let field = def.field(segment).ok_or_else(|| {
                    SchemaError::discriminator(
                        &union.name,
                        format!("no field '{segment}' in struct '{}'", def.name),
                    )
                })?;
                Cursor::FoundField {
                    owner: &def.name,
                    field: &field.name,
                    type_name: &field.type_name,
                }
            }
            Cursor::FoundField {
                owner,
                field,
                type_name,
            } => {
                let next = schema.require_type(type_name, &format!("{owner}.{field}"))?;
                if segments.len() == 0 {
                    Cursor::Done(next)
                } else {
                    Cursor::AwaitingStruct(next)
                }
            }
            Cursor::Done(resolved) => break Ok(resolved),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::types::{Field, Kind, TypeDefinition};

    fn union_of(schema: &Schema, name: &str) -> UnionStrict {
        match schema.get_type(name) {
            Some(TypeDefinitionStrict::Union(u)) => u.clone(),
            other => panic!("expected union '{name}', got {other:?}"),
        }
    }

    fn nested_schema() -> Schema {
        normalize(&[
            TypeDefinition::primitive("u8", 1),
            TypeDefinition::primitive("u16", 2),
            TypeDefinition::enumeration("AnimalKind2", "u8", [("Zebra2", 1), ("Toucan2", 2)]),
            TypeDefinition::structure("Header", vec![Field::new("animalKind", "AnimalKind2")]),
            TypeDefinition::structure(
                "Zebra2",
                vec![Field::new("header", "Header"), Field::new("legs", "u8")],
            ),
            TypeDefinition::structure(
                "Toucan2",
                vec![Field::new("header", "Header"), Field::new("wingspan", "u16")],
            ),
            TypeDefinition::union("Animal2", ["header", "animalKind"], ["Zebra2", "Toucan2"]),
        ])
        .expect("Failed to normalize")
    }

    fn flat_schema() -> Schema {
        normalize(&[
            TypeDefinition::primitive("u8", 1),
            TypeDefinition::enumeration("AnimalKind", "u16", [("Zebra", 0x1001)]),
            TypeDefinition::structure(
                "Zebra",
                vec![Field::new("kind", "AnimalKind"), Field::new("legs", "u8")],
            ),
            TypeDefinition::union("Animal", ["kind"], ["Zebra"]),
        ])
        .expect("Failed to normalize")
    }

    #[test]
    fn test_nested_path_resolves_enum() {
        let schema = nested_schema();
        let union = union_of(&schema, "Animal2");

        let resolved = resolve_discriminator(&union, &schema).expect("resolves");
        assert_eq!(resolved.name(), "AnimalKind2");
        assert_eq!(resolved.kind(), Kind::Enum);
    }

    #[test]
    fn test_flat_path_resolves_enum() {
        let schema = flat_schema();
        let union = union_of(&schema, "Animal");

        let resolved = resolve_discriminator(&union, &schema).expect("resolves");
        assert_eq!(resolved.name(), "AnimalKind");
    }

    #[test]
    fn test_non_struct_intermediate_segment_fails() {
        let schema = nested_schema();
        let mut union = union_of(&schema, "Animal2");
        union.discriminator = vec!["legs".to_string(), "animalKind".to_string()];

        let err = resolve_discriminator(&union, &schema).expect_err("should fail");
        match err {
            SchemaError::DiscriminatorPath { union, message } => {
                assert_eq!(union, "Animal2");
                assert!(message.contains("requires a struct, found Primitive 'u8'"));
            }
            other => panic!("expected discriminator path error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_field_fails() {
        let schema = nested_schema();
        let mut union = union_of(&schema, "Animal2");
        union.discriminator = vec!["header".to_string(), "kind".to_string()];

        let err = resolve_discriminator(&union, &schema).expect_err("should fail");
        assert_eq!(
            err,
            SchemaError::discriminator("Animal2", "no field 'kind' in struct 'Header'")
        );
    }

    #[test]
    fn test_missing_member_is_unresolved() {
        let schema = flat_schema();
        let mut union = union_of(&schema, "Animal");
        union.members = vec!["Okapi".to_string()];

        assert_eq!(
            resolve_discriminator(&union, &schema).map(|t| t.name().to_string()),
            Err(SchemaError::unresolved("Okapi", "Animal"))
        );
    }

    #[test]
    fn test_dangling_field_type_is_unresolved() {
        let schema = normalize(&[
            TypeDefinition::structure("Zebra", vec![Field::new("kind", "Gone")]),
            TypeDefinition::union("Animal", ["kind"], ["Zebra"]),
        ])
        .expect("Failed to normalize");
        let union = union_of(&schema, "Animal");

        assert_eq!(
            resolve_discriminator(&union, &schema).map(|t| t.name().to_string()),
            Err(SchemaError::unresolved("Gone", "Zebra.kind"))
        );
    }

    #[test]
    fn test_walk_from_other_member() {
        let schema = nested_schema();
        let union = union_of(&schema, "Animal2");

        let resolved = walk_discriminator(&union, "Toucan2", &schema).expect("resolves");
        assert_eq!(resolved.name(), "AnimalKind2");
    }
}
