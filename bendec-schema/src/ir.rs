//! Strict intermediate representation for code generation.
//!
//! Every definition here is fully shaped: kind-specific data is present,
//! defaults are filled in and names are indexed. The code generator works
//! only on these types.

use crate::error::SchemaError;
use crate::types::{IntegerType, Kind};
use std::collections::HashMap;

/// Normalized type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDefinitionStrict {
    /// Built-in scalar.
    Primitive(PrimitiveStrict),
    /// Type alias.
    Alias(AliasStrict),
    /// Fixed-layout struct.
    Struct(StructStrict),
    /// Integer-backed enum.
    Enum(EnumStrict),
    /// Tagged union.
    Union(UnionStrict),
}

impl TypeDefinitionStrict {
    /// Returns the name of the type.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Primitive(p) => &p.name,
            Self::Alias(a) => &a.name,
            Self::Struct(s) => &s.name,
            Self::Enum(e) => &e.name,
            Self::Union(u) => &u.name,
        }
    }

    /// Returns the kind of the type.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Primitive(_) => Kind::Primitive,
            Self::Alias(_) => Kind::Alias,
            Self::Struct(_) => Kind::Struct,
            Self::Enum(_) => Kind::Enum,
            Self::Union(_) => Kind::Union,
        }
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Primitive(p) => p.description.as_deref(),
            Self::Alias(a) => a.description.as_deref(),
            Self::Struct(s) => s.description.as_deref(),
            Self::Enum(e) => e.description.as_deref(),
            Self::Union(u) => u.description.as_deref(),
        }
    }

    /// Returns the struct definition if this is a struct.
    #[must_use]
    pub const fn as_struct(&self) -> Option<&StructStrict> {
        match self {
            Self::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the enum definition if this is an enum.
    #[must_use]
    pub const fn as_enum(&self) -> Option<&EnumStrict> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }
}

/// Primitive definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveStrict {
    /// Type name.
    pub name: String,
    /// Declared byte width.
    pub size: Option<usize>,
    /// Description.
    pub description: Option<String>,
}

/// Alias definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasStrict {
    /// Type name.
    pub name: String,
    /// Aliased type name.
    pub alias: String,
    /// Description.
    pub description: Option<String>,
}

/// Struct definition. Field order is wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructStrict {
    /// Type name.
    pub name: String,
    /// Fields in layout order.
    pub fields: Vec<FieldStrict>,
    /// Description.
    pub description: Option<String>,
}

impl StructStrict {
    /// Finds a field by its schema name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldStrict> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStrict {
    /// Field name as written in the schema.
    pub name: String,
    /// Referenced type name.
    pub type_name: String,
    /// Array arity (None for scalar).
    pub length: Option<usize>,
    /// Description.
    pub description: Option<String>,
}

impl FieldStrict {
    /// Creates a scalar field.
    #[must_use]
    pub fn scalar(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            length: None,
            description: None,
        }
    }

    /// Returns true if this is an array field.
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.length.is_some()
    }

    /// Returns the number of elements stored (1 for scalars).
    #[must_use]
    pub fn arity(&self) -> usize {
        self.length.unwrap_or(1)
    }
}

/// Enum definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumStrict {
    /// Type name.
    pub name: String,
    /// Storage type name.
    pub underlying: String,
    /// Variants in declaration order.
    pub variants: Vec<EnumVariant>,
    /// Description.
    pub description: Option<String>,
}

impl EnumStrict {
    /// Returns the storage integer, if `underlying` names one.
    #[must_use]
    pub fn integer_type(&self) -> Option<IntegerType> {
        IntegerType::from_name(&self.underlying)
    }

    /// Finds a variant by identifier.
    #[must_use]
    pub fn variant(&self, name: &str) -> Option<&EnumVariant> {
        self.variants.iter().find(|v| v.name == name)
    }
}

/// Enum variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumVariant {
    /// Identifier.
    pub name: String,
    /// Discriminant value.
    pub value: i128,
    /// Description.
    pub description: Option<String>,
}

/// Union definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionStrict {
    /// Type name.
    pub name: String,
    /// Field path to the tag, walked from a member struct. Never empty.
    pub discriminator: Vec<String>,
    /// Member struct names. Never empty.
    pub members: Vec<String>,
    /// Description.
    pub description: Option<String>,
}

/// Normalized schema: strict definitions in input order plus a name index.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    types: Vec<TypeDefinitionStrict>,
    type_map: HashMap<String, usize>,
}

impl Schema {
    /// Builds a schema from strict definitions.
    ///
    /// # Errors
    /// Returns `SchemaError::DuplicateName` if two definitions share a name.
    pub fn new(types: Vec<TypeDefinitionStrict>) -> Result<Self, SchemaError> {
        let mut type_map = HashMap::with_capacity(types.len());
        for (idx, type_def) in types.iter().enumerate() {
            if type_map.insert(type_def.name().to_string(), idx).is_some() {
                return Err(SchemaError::DuplicateName {
                    name: type_def.name().to_string(),
                });
            }
        }
        Ok(Self { types, type_map })
    }

    /// Looks up a type by name.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeDefinitionStrict> {
        self.type_map.get(name).map(|&idx| &self.types[idx])
    }

    /// Looks up a type by name, failing with an unresolved reference.
    ///
    /// # Errors
    /// Returns `SchemaError::UnresolvedReference` naming `referenced_by`.
    pub fn require_type(
        &self,
        name: &str,
        referenced_by: &str,
    ) -> Result<&TypeDefinitionStrict, SchemaError> {
        self.get_type(name)
            .ok_or_else(|| SchemaError::unresolved(name, referenced_by))
    }

    /// Returns true if a type with the given name exists.
    #[must_use]
    pub fn has_type(&self, name: &str) -> bool {
        self.type_map.contains_key(name)
    }

    /// Follows aliases from `name` to the first non-alias definition.
    ///
    /// # Errors
    /// Returns `SchemaError::UnresolvedReference` for a dangling alias and
    /// `SchemaError::CircularReference` for an alias cycle.
    pub fn resolve_alias(&self, name: &str) -> Result<&TypeDefinitionStrict, SchemaError> {
        let mut path: Vec<&str> = Vec::new();
        let mut current = self.require_type(name, name)?;

        while let TypeDefinitionStrict::Alias(alias) = current {
            if path.contains(&alias.name.as_str()) {
                path.push(&alias.name);
                return Err(SchemaError::CircularReference {
                    path: path.join(" -> "),
                });
            }
            path.push(&alias.name);
            current = self.require_type(&alias.alias, &alias.name)?;
        }

        Ok(current)
    }

    /// Returns the definitions in input order.
    #[must_use]
    pub fn types(&self) -> &[TypeDefinitionStrict] {
        &self.types
    }

    /// Iterates over the definitions in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, TypeDefinitionStrict> {
        self.types.iter()
    }

    /// Returns the number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if the schema has no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Consumes the schema, returning the definitions.
    #[must_use]
    pub fn into_types(self) -> Vec<TypeDefinitionStrict> {
        self.types
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a TypeDefinitionStrict;
    type IntoIter = std::slice::Iter<'a, TypeDefinitionStrict>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter()
    }
}

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "static", "struct", "trait", "true", "type", "union", "unsafe",
    "use", "where", "while", "abstract", "become", "box", "do", "final", "gen", "macro",
    "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Converts a string to snake_case.
///
/// Acronyms stay together (`MDEntryPx` becomes `md_entry_px`) and digits
/// stick to the preceding word (`Zebra2` becomes `zebra2`).
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == ' ' || c == '_' {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            continue;
        }
        if c.is_uppercase() && i > 0 && !result.is_empty() && !result.ends_with('_') {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let starts_word = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if starts_word {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }

    result
}

/// Keywords that cannot be raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["self", "super", "crate"];

/// Converts a schema name to a Rust field identifier.
///
/// Keywords become raw identifiers (`type` becomes `r#type`), except those
/// Rust refuses as raw identifiers, which get a trailing underscore
/// (`self` becomes `self_`).
#[must_use]
pub fn to_field_ident(s: &str) -> String {
    let snake = to_snake_case(s);
    if NON_RAW_KEYWORDS.contains(&snake.as_str()) {
        format!("{snake}_")
    } else if RUST_KEYWORDS.contains(&snake.as_str()) {
        format!("r#{snake}")
    } else {
        snake
    }
}
