//! Error types for schema normalization and validation.

use thiserror::Error;

/// Error type for schema normalization, discriminator resolution and
/// validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two type definitions share a name.
    #[error("duplicate type definition: '{name}'")]
    DuplicateName {
        /// Name of the duplicate.
        name: String,
    },

    /// A loose definition does not have the shape of its kind.
    #[error("malformed definition '{name}': {message}")]
    MalformedDefinition {
        /// Type name.
        name: String,
        /// What is wrong with the definition.
        message: String,
    },

    /// A discriminator path does not lead through struct fields.
    #[error("invalid discriminator path for union '{union}': {message}")]
    DiscriminatorPath {
        /// Union name.
        union: String,
        /// Error message.
        message: String,
    },

    /// A type name refers to a type absent from the schema.
    #[error("unknown type '{name}' referenced by '{referenced_by}'")]
    UnresolvedReference {
        /// Missing type name.
        name: String,
        /// Type (or type.field) holding the reference.
        referenced_by: String,
    },

    /// Circular type reference.
    #[error("circular type reference detected: {path}")]
    CircularReference {
        /// Path of the circular reference.
        path: String,
    },

    /// Enum declares the same variant identifier twice.
    #[error("duplicate variant '{variant}' in enum '{enum_name}'")]
    DuplicateVariant {
        /// Enum name.
        enum_name: String,
        /// Variant identifier.
        variant: String,
    },

    /// Two fields of a struct, or two members of a union, render to the
    /// same Rust identifier.
    #[error("duplicate field '{field}' in '{struct_name}'")]
    DuplicateField {
        /// Struct or union name.
        struct_name: String,
        /// Rendered field identifier.
        field: String,
    },

    /// Enum value does not fit the underlying integer.
    #[error("value {value} of variant '{variant}' does not fit '{underlying}' in enum '{enum_name}'")]
    EnumValueOutOfRange {
        /// Enum name.
        enum_name: String,
        /// Variant identifier.
        variant: String,
        /// Offending value.
        value: i128,
        /// Underlying integer type.
        underlying: String,
    },

    /// Enum underlying type is not an integer primitive.
    #[error("enum '{enum_name}' has non-integer underlying type '{underlying}'")]
    InvalidUnderlying {
        /// Enum name.
        enum_name: String,
        /// Underlying type name.
        underlying: String,
    },

    /// Byte size of a type cannot be determined.
    #[error("size of type '{name}' is unknown")]
    UnknownSize {
        /// Type name.
        name: String,
    },

    /// Byte size of a type does not fit in `usize`.
    #[error("size of type '{name}' overflows")]
    SizeOverflow {
        /// Type name.
        name: String,
    },
}

impl SchemaError {
    /// Creates a malformed definition error.
    pub fn malformed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedDefinition {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a discriminator path error.
    pub fn discriminator(union: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DiscriminatorPath {
            union: union.into(),
            message: message.into(),
        }
    }

    /// Creates an unresolved reference error.
    pub fn unresolved(name: impl Into<String>, referenced_by: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            name: name.into(),
            referenced_by: referenced_by.into(),
        }
    }
}
