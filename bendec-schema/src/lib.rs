//! # Bendec Schema
//!
//! Type definitions and normalization for Bendec binary schemas.
//!
//! This crate provides:
//! - Loose type definitions as authored (serde-deserializable)
//! - Normalization into a strict, indexed model
//! - Union discriminator resolution
//! - Schema validation and packed layout sizes

pub mod discriminator;
pub mod error;
pub mod ir;
pub mod layout;
pub mod normalize;
pub mod types;
pub mod validation;

pub use discriminator::{resolve_discriminator, walk_discriminator};
pub use error::SchemaError;
pub use ir::{
    AliasStrict, EnumStrict, EnumVariant, FieldStrict, PrimitiveStrict, Schema, StructStrict,
    TypeDefinitionStrict, UnionStrict,
};
pub use layout::byte_length;
pub use normalize::normalize;
pub use types::{AliasTarget, Field, IntegerType, Kind, TypeDefinition, Variant};
pub use validation::{ValidationOptions, validate_schema};
