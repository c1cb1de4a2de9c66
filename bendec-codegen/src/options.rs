//! Generator configuration.

use bendec_schema::ValidationOptions;
use std::collections::HashMap;
use std::sync::Arc;

/// Renders a Rust type from an array length (0 for scalars and whole types).
pub type TypeMapper = Arc<dyn Fn(usize) -> String + Send + Sync>;

/// Options controlling code generation.
///
/// Type mappings are keyed by type name, or by type name followed by `[]`
/// for array fields of that type. The defaults map `char[]` to `[u8; N]`.
#[derive(Clone)]
pub struct GeneratorOptions {
    type_mapping: HashMap<String, TypeMapper>,
    attribute: String,
    layout_docs: bool,
    strict_unions: bool,
}

impl GeneratorOptions {
    /// Creates options with the default type mapping and no attribute.
    #[must_use]
    pub fn new() -> Self {
        let mut type_mapping: HashMap<String, TypeMapper> = HashMap::new();
        type_mapping.insert(
            "char[]".to_string(),
            Arc::new(|size: usize| format!("[u8; {size}]")),
        );

        Self {
            type_mapping,
            attribute: String::new(),
            layout_docs: false,
            strict_unions: true,
        }
    }

    /// Adds or replaces a type mapping.
    #[must_use]
    pub fn with_type_mapping<F>(mut self, key: impl Into<String>, mapper: F) -> Self
    where
        F: Fn(usize) -> String + Send + Sync + 'static,
    {
        self.type_mapping.insert(key.into(), Arc::new(mapper));
        self
    }

    /// Sets the text placed before every struct, enum and union.
    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    /// Enables `/// Byte length: N` docs on structs, enums and unions.
    #[must_use]
    pub fn with_layout_docs(mut self, enabled: bool) -> Self {
        self.layout_docs = enabled;
        self
    }

    /// Enables or disables checking every union member's discriminator.
    #[must_use]
    pub fn with_strict_unions(mut self, enabled: bool) -> Self {
        self.strict_unions = enabled;
        self
    }

    /// Returns the mapping registered for `key`.
    #[must_use]
    pub fn type_mapping(&self, key: &str) -> Option<&TypeMapper> {
        self.type_mapping.get(key)
    }

    /// Returns the attribute block, without a trailing newline.
    #[must_use]
    pub fn attribute(&self) -> &str {
        self.attribute.trim_end_matches('\n')
    }

    /// Returns true if layout docs are enabled.
    #[must_use]
    pub const fn layout_docs(&self) -> bool {
        self.layout_docs
    }

    /// Returns true if every union member is validated.
    #[must_use]
    pub const fn strict_unions(&self) -> bool {
        self.strict_unions
    }

    /// Returns the validation settings implied by these options.
    #[must_use]
    pub const fn validation(&self) -> ValidationOptions {
        ValidationOptions {
            strict_unions: self.strict_unions,
        }
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GeneratorOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&String> = self.type_mapping.keys().collect();
        keys.sort();
        f.debug_struct("GeneratorOptions")
            .field("type_mapping", &keys)
            .field("attribute", &self.attribute)
            .field("layout_docs", &self.layout_docs)
            .field("strict_unions", &self.strict_unions)
            .finish()
    }
}
