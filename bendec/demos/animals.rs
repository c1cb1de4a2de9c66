//! Generates Rust types for a small tagged-union schema.
//!
//! Run with: `cargo run --example animals -- <output.rs>`
//! Set `RUST_LOG=debug` to trace each generated declaration.

use bendec::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn schema() -> Vec<TypeDefinition> {
    vec![
        TypeDefinition::primitive("u8", 1),
        TypeDefinition::primitive("u16", 2),
        TypeDefinition::primitive("char", 1),
        TypeDefinition::enumeration("AnimalKind", "u8", [("Zebra", 1), ("Toucan", 2)])
            .with_description("Which animal a record holds."),
        TypeDefinition::structure("Header", vec![Field::new("animalKind", "AnimalKind")]),
        TypeDefinition::structure(
            "Zebra",
            vec![
                Field::new("header", "Header"),
                Field::new("legs", "u8"),
                Field::array("name", "char", 64).with_description("NUL-padded name."),
            ],
        ),
        TypeDefinition::structure(
            "Toucan",
            vec![Field::new("header", "Header"), Field::new("wingspan", "u16")],
        ),
        TypeDefinition::union("Animal", ["header", "animalKind"], ["Zebra", "Toucan"]),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = GeneratorOptions::new()
        .with_attribute("#[derive(Clone, Copy)]")
        .with_layout_docs(true);

    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => generate(&schema(), &path, &options)?,
        None => print!("{}", generate_string(&schema(), &options)?),
    }

    Ok(())
}
