//! Loose schema definitions.
//!
//! This module contains the input side of the schema: type definitions as a
//! schema author writes them, with optional fields and an optional `kind`.
//! [`crate::normalize`] turns them into the strict model in [`crate::ir`].

use serde::{Deserialize, Serialize};

/// Kind of a type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    /// Built-in scalar.
    #[serde(alias = "primitive")]
    Primitive,
    /// New name for another type.
    #[serde(alias = "alias")]
    Alias,
    /// Fixed-layout struct.
    #[serde(alias = "struct")]
    Struct,
    /// Integer-backed enum.
    #[serde(alias = "enum")]
    Enum,
    /// Tagged union of structs.
    #[serde(alias = "union")]
    Union,
}

impl Kind {
    /// Returns the kind name used in messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primitive => "Primitive",
            Self::Alias => "Alias",
            Self::Struct => "Struct",
            Self::Enum => "Enum",
            Self::Union => "Union",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loose type definition.
///
/// Every kind-specific part is optional; which parts are present must match
/// `kind`, or determine it when `kind` is omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Unique type name.
    pub name: String,
    /// Declared kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Kind>,
    /// Byte width of a primitive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    /// Aliased type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<AliasTarget>,
    /// Struct fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Field>>,
    /// Enum storage type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlying: Option<String>,
    /// Enum variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<Variant>>,
    /// Path to the union tag inside each member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Vec<String>>,
    /// Union member structs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TypeDefinition {
    fn with_kind(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Creates a primitive definition with a byte width.
    #[must_use]
    pub fn primitive(name: impl Into<String>, size: usize) -> Self {
        Self {
            size: Some(size),
            ..Self::with_kind(name, Kind::Primitive)
        }
    }

    /// Creates an alias definition.
    #[must_use]
    pub fn alias(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            alias: Some(AliasTarget::Name(alias.into())),
            ..Self::with_kind(name, Kind::Alias)
        }
    }

    /// Creates a struct definition.
    #[must_use]
    pub fn structure(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            fields: Some(fields),
            ..Self::with_kind(name, Kind::Struct)
        }
    }

    /// Creates an enum definition from `(identifier, value)` pairs.
    #[must_use]
    pub fn enumeration<S: Into<String>>(
        name: impl Into<String>,
        underlying: impl Into<String>,
        variants: impl IntoIterator<Item = (S, i128)>,
    ) -> Self {
        Self {
            underlying: Some(underlying.into()),
            variants: Some(
                variants
                    .into_iter()
                    .map(|(id, value)| Variant::new(id, value))
                    .collect(),
            ),
            ..Self::with_kind(name, Kind::Enum)
        }
    }

    /// Creates a union definition.
    #[must_use]
    pub fn union<D, M>(
        name: impl Into<String>,
        discriminator: impl IntoIterator<Item = D>,
        members: impl IntoIterator<Item = M>,
    ) -> Self
    where
        D: Into<String>,
        M: Into<String>,
    {
        Self {
            discriminator: Some(discriminator.into_iter().map(Into::into).collect()),
            members: Some(members.into_iter().map(Into::into).collect()),
            ..Self::with_kind(name, Kind::Union)
        }
    }

    /// Attaches a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Target of an alias: a bare type name or a `{ "name": ... }` reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AliasTarget {
    /// Bare type name.
    Name(String),
    /// Reference object.
    Ref {
        /// Referenced type name.
        name: String,
    },
}

impl AliasTarget {
    /// Returns the referenced type name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Ref { name } => name,
        }
    }
}

/// Loose struct field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name as written in the schema.
    pub name: String,
    /// Referenced type name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Array arity; absent or zero for scalars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Field {
    /// Creates a scalar field.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            length: None,
            description: None,
        }
    }

    /// Creates a fixed-size array field.
    #[must_use]
    pub fn array(name: impl Into<String>, type_name: impl Into<String>, length: usize) -> Self {
        Self {
            length: Some(length),
            ..Self::new(name, type_name)
        }
    }

    /// Attaches a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Loose enum variant, written as `[identifier, value]` or
/// `[identifier, value, description]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// Variant identifier.
    pub name: String,
    /// Discriminant value.
    pub value: i128,
    /// Free-form description.
    pub description: Option<String>,
}

impl Variant {
    /// Creates a variant.
    #[must_use]
    pub fn new(name: impl Into<String>, value: i128) -> Self {
        Self {
            name: name.into(),
            value,
            description: None,
        }
    }
}

impl Serialize for Variant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeTuple;

        let len = if self.description.is_some() { 3 } else { 2 };
        let mut tuple = serializer.serialize_tuple(len)?;
        tuple.serialize_element(&self.name)?;
        tuple.serialize_element(&self.value)?;
        if let Some(description) = &self.description {
            tuple.serialize_element(description)?;
        }
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Variant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct VariantVisitor;

        impl<'de> serde::de::Visitor<'de> for VariantVisitor {
            type Value = Variant;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("an [identifier, value] or [identifier, value, description] array")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Variant, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                use serde::de::Error;

                let name: String = seq
                    .next_element()?
                    .ok_or_else(|| A::Error::invalid_length(0, &self))?;
                let value: i128 = seq
                    .next_element()?
                    .ok_or_else(|| A::Error::invalid_length(1, &self))?;
                let description: Option<String> = seq.next_element()?;
                if seq.next_element::<serde::de::IgnoredAny>()?.is_some() {
                    return Err(A::Error::invalid_length(4, &self));
                }
                Ok(Variant {
                    name,
                    value,
                    description,
                })
            }
        }

        deserializer.deserialize_seq(VariantVisitor)
    }
}

/// Integer types usable as enum storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegerType {
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer.
    U16,
    /// Unsigned 32-bit integer.
    U32,
    /// Unsigned 64-bit integer.
    U64,
    /// Signed 8-bit integer.
    I8,
    /// Signed 16-bit integer.
    I16,
    /// Signed 32-bit integer.
    I32,
    /// Signed 64-bit integer.
    I64,
}

impl IntegerType {
    /// Parses an integer type from its name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "u8" => Some(Self::U8),
            "u16" => Some(Self::U16),
            "u32" => Some(Self::U32),
            "u64" => Some(Self::U64),
            "i8" => Some(Self::I8),
            "i16" => Some(Self::I16),
            "i32" => Some(Self::I32),
            "i64" => Some(Self::I64),
            _ => None,
        }
    }

    /// Returns the Rust type name.
    #[must_use]
    pub const fn rust_type(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
        }
    }

    /// Returns the size in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 => 4,
            Self::U64 | Self::I64 => 8,
        }
    }

    /// Returns the smallest representable value.
    #[must_use]
    pub const fn min(&self) -> i128 {
        match self {
            Self::U8 | Self::U16 | Self::U32 | Self::U64 => 0,
            Self::I8 => i8::MIN as i128,
            Self::I16 => i16::MIN as i128,
            Self::I32 => i32::MIN as i128,
            Self::I64 => i64::MIN as i128,
        }
    }

    /// Returns the largest representable value.
    #[must_use]
    pub const fn max(&self) -> i128 {
        match self {
            Self::U8 => u8::MAX as i128,
            Self::U16 => u16::MAX as i128,
            Self::U32 => u32::MAX as i128,
            Self::U64 => u64::MAX as i128,
            Self::I8 => i8::MAX as i128,
            Self::I16 => i16::MAX as i128,
            Self::I32 => i32::MAX as i128,
            Self::I64 => i64::MAX as i128,
        }
    }

    /// Returns true if `value` fits this type.
    #[must_use]
    pub const fn contains(&self, value: i128) -> bool {
        value >= self.min() && value <= self.max()
    }
}

/// Returns the byte width of a scalar that needs no schema entry to size.
#[must_use]
pub fn builtin_size(name: &str) -> Option<usize> {
    match name {
        "u8" | "i8" | "char" | "bool" => Some(1),
        "u16" | "i16" => Some(2),
        "u32" | "i32" | "f32" => Some(4),
        "u64" | "i64" | "f64" => Some(8),
        "u128" | "i128" => Some(16),
        _ => None,
    }
}
