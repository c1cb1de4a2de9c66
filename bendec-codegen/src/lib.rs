//! # Bendec Codegen
//!
//! Rust code generation from Bendec type definitions.
//!
//! This crate provides:
//! - Layout-preserving Rust declarations for primitives, aliases, structs,
//!   enums and unions
//! - Hand-written `Serialize` dispatch for unions
//! - Type mapping and attribute options
//! - All-or-nothing file generation for build scripts

pub mod error;
pub mod generator;
pub mod options;
pub mod rust;

pub use error::CodegenError;
pub use generator::Generator;
pub use options::{GeneratorOptions, TypeMapper};

use bendec_schema::{TypeDefinition, normalize, validate_schema};
use std::io::Write;
use std::path::Path;

/// Generates Rust code from loose type definitions.
///
/// Runs normalization, validation and emission; nothing is returned unless
/// all three succeed.
///
/// # Arguments
/// * `types` - Loose type definitions, in output order
/// * `options` - Type mappings, attribute and validation settings
///
/// # Returns
/// Generated Rust code as a string.
///
/// # Errors
/// Returns `CodegenError` if normalization, validation or generation fails.
pub fn generate_string(
    types: &[TypeDefinition],
    options: &GeneratorOptions,
) -> Result<String, CodegenError> {
    let schema = normalize(types)?;
    validate_schema(&schema, &options.validation())?;
    Generator::new(&schema, options).generate()
}

/// Generates Rust code from loose type definitions and writes it to
/// `destination`.
///
/// The file is replaced atomically: output is rendered in memory, written
/// to a temporary file next to `destination` and renamed over it. On error
/// the destination is left untouched.
///
/// # Arguments
/// * `types` - Loose type definitions, in output order
/// * `destination` - Path of the generated Rust file
/// * `options` - Type mappings, attribute and validation settings
///
/// # Errors
/// Returns `CodegenError` if generation or writing fails.
pub fn generate(
    types: &[TypeDefinition],
    destination: &Path,
    options: &GeneratorOptions,
) -> Result<(), CodegenError> {
    let output = generate_string(types, options)?;
    write_atomic(destination, &output)?;
    tracing::info!("written: {}", destination.display());
    Ok(())
}

/// Generates Rust code from a JSON array of type definitions.
///
/// # Arguments
/// * `json` - JSON array of type definitions
/// * `options` - Type mappings, attribute and validation settings
///
/// # Returns
/// Generated Rust code as a string.
///
/// # Errors
/// Returns `CodegenError::Json` if the JSON does not describe type
/// definitions, or any error of [`generate_string`].
pub fn generate_from_json(json: &str, options: &GeneratorOptions) -> Result<String, CodegenError> {
    let types: Vec<TypeDefinition> = serde_json::from_str(json)?;
    generate_string(&types, options)
}

/// Generates Rust code from a JSON schema file.
///
/// # Arguments
/// * `path` - Path to the JSON schema file
/// * `options` - Type mappings, attribute and validation settings
///
/// # Returns
/// Generated Rust code as a string.
///
/// # Errors
/// Returns `CodegenError` if reading, decoding, or generation fails.
pub fn generate_from_file(
    path: &Path,
    options: &GeneratorOptions,
) -> Result<String, CodegenError> {
    let json = std::fs::read_to_string(path)?;
    generate_from_json(&json, options)
}

fn write_atomic(destination: &Path, contents: &str) -> std::io::Result<()> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(destination).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bendec_schema::{Field, SchemaError};

    const ANIMALS_JSON: &str = r#"[
        { "name": "u8", "kind": "Primitive", "size": 1 },
        { "name": "u16", "kind": "Primitive", "size": 2 },
        { "name": "AnimalKind", "kind": "Enum", "underlying": "u16",
          "variants": [["Zebra", 4097], ["Toucan", 4098]] },
        { "name": "Zebra", "kind": "Struct",
          "fields": [{ "name": "kind", "type": "AnimalKind" }, { "name": "legs", "type": "u8" }] },
        { "name": "Toucan", "kind": "Struct",
          "fields": [{ "name": "kind", "type": "AnimalKind" }, { "name": "wingspan", "type": "u16" }] },
        { "name": "Animal", "kind": "Union", "discriminator": ["kind"], "members": ["Zebra", "Toucan"] }
    ]"#;

    #[test]
    fn test_generate_from_json() {
        let output = generate_from_json(ANIMALS_JSON, &GeneratorOptions::default())
            .expect("Failed to generate");

        assert!(output.contains("    Zebra = 0x1001,\n    Toucan = 0x1002,\n"));
        assert!(output.contains("pub union Animal {"));
        assert!(output.contains("AnimalKind::Toucan => self.toucan.serialize(serializer),"));
    }

    #[test]
    fn test_generate_from_invalid_json() {
        let result = generate_from_json("{ not json", &GeneratorOptions::default());
        assert!(matches!(result, Err(CodegenError::Json(_))));
    }

    #[test]
    fn test_generate_from_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("animals.json");
        std::fs::write(&path, ANIMALS_JSON).expect("Failed to write schema");

        let output = generate_from_file(&path, &GeneratorOptions::default())
            .expect("Failed to generate");
        assert!(output.contains("pub struct Toucan {"));

        let missing =
            generate_from_file(&dir.path().join("nope.json"), &GeneratorOptions::default());
        assert!(matches!(missing, Err(CodegenError::Io(_))));
    }

    #[test]
    fn test_generate_writes_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("animals.rs");
        let types: Vec<TypeDefinition> =
            serde_json::from_str(ANIMALS_JSON).expect("Failed to parse");

        generate(&types, &path, &GeneratorOptions::default()).expect("Failed to generate");

        let written = std::fs::read_to_string(&path).expect("Failed to read output");
        assert_eq!(
            written,
            generate_string(&types, &GeneratorOptions::default()).expect("Failed to generate")
        );
        assert_eq!(std::fs::read_dir(dir.path()).expect("read dir").count(), 1);
    }

    #[test]
    fn test_duplicate_name_fails_before_emission() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("zebra.rs");
        let types = vec![
            TypeDefinition::primitive("u8", 1),
            TypeDefinition::structure("Zebra", vec![Field::new("legs", "u8")]),
            TypeDefinition::structure("Zebra", vec![Field::new("legs", "u8")]),
        ];

        let result = generate(&types, &path, &GeneratorOptions::default());
        assert!(matches!(
            result,
            Err(CodegenError::Schema(SchemaError::DuplicateName { ref name })) if name == "Zebra"
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_failure_keeps_existing_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("animals.rs");
        std::fs::write(&path, "// previous output\n").expect("Failed to write");

        let types = vec![
            TypeDefinition::structure("Zebra", vec![Field::new("kind", "AnimalKind")]),
            TypeDefinition::union("Animal", ["kind"], ["Zebra"]),
        ];
        let result = generate(&types, &path, &GeneratorOptions::default());

        assert!(matches!(
            result,
            Err(CodegenError::Schema(SchemaError::UnresolvedReference { .. }))
        ));
        assert_eq!(
            std::fs::read_to_string(&path).expect("Failed to read"),
            "// previous output\n"
        );
        assert_eq!(std::fs::read_dir(dir.path()).expect("read dir").count(), 1);
    }

    #[test]
    fn test_permissive_unions_only_check_first_member() {
        let types = vec![
            TypeDefinition::primitive("u8", 1),
            TypeDefinition::enumeration("Kind", "u8", [("A", 1), ("B", 2)]),
            TypeDefinition::structure("A", vec![Field::new("kind", "Kind")]),
            TypeDefinition::structure("B", vec![Field::new("other", "u8")]),
            TypeDefinition::union("AB", ["kind"], ["A", "B"]),
        ];

        let strict = generate_string(&types, &GeneratorOptions::default());
        assert!(matches!(
            strict,
            Err(CodegenError::Schema(SchemaError::DiscriminatorPath { .. }))
        ));

        let permissive = generate_string(&types, &GeneratorOptions::new().with_strict_unions(false))
            .expect("Failed to generate");
        assert!(permissive.contains("Kind::B => self.b.serialize(serializer),"));
    }
}
