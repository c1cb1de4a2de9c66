//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```ignore
//! use bendec::prelude::*;
//! ```

// Schema types
pub use bendec_schema::{
    Field, Kind, Schema, SchemaError, TypeDefinition, TypeDefinitionStrict, ValidationOptions,
    byte_length, normalize, resolve_discriminator, validate_schema,
};

// Code generation
pub use bendec_codegen::{
    CodegenError, Generator, GeneratorOptions, generate, generate_from_file, generate_from_json,
    generate_string,
};
