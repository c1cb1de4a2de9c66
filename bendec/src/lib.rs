//! # Bendec
//!
//! Generate layout-exact Rust types from Bendec binary schemas.
//!
//! A schema is a list of type definitions: primitives, aliases, packed
//! structs, integer-backed enums and tagged unions. The generated file keeps
//! struct field order as wire order, emits unions as overlapping storage and
//! tags enums with their wire width.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bendec::prelude::*;
//! use std::path::Path;
//!
//! let types = vec![
//!     TypeDefinition::primitive("u8", 1),
//!     TypeDefinition::primitive("u16", 2),
//!     TypeDefinition::enumeration("AnimalKind", "u16", [("Zebra", 0x1001), ("Toucan", 0x1002)]),
//!     TypeDefinition::structure(
//!         "Zebra",
//!         vec![Field::new("kind", "AnimalKind"), Field::new("legs", "u8")],
//!     ),
//!     TypeDefinition::structure(
//!         "Toucan",
//!         vec![Field::new("kind", "AnimalKind"), Field::new("wingspan", "u16")],
//!     ),
//!     TypeDefinition::union("Animal", ["kind"], ["Zebra", "Toucan"]),
//! ];
//!
//! let options = GeneratorOptions::new().with_attribute("#[derive(Clone, Copy)]");
//! bendec::generate(&types, Path::new("src/generated.rs"), &options)?;
//! # Ok::<(), CodegenError>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Type definitions, normalization, discriminator resolution
//! - [`codegen`] - Rust code generation and file output

pub mod prelude;

/// Type definitions, normalization and validation.
pub mod schema {
    pub use bendec_schema::*;
}

/// Rust code generation.
pub mod codegen {
    pub use bendec_codegen::*;
}

// Re-export commonly used items at the crate root
pub use bendec_codegen::{
    CodegenError, Generator, GeneratorOptions, generate, generate_from_file, generate_from_json,
    generate_string,
};
pub use bendec_schema::{Schema, SchemaError, TypeDefinition, normalize};
