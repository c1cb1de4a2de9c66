//! Union code generation.
//!
//! A union is emitted as overlapping storage of its member structs plus a
//! hand-written `Serialize` impl, since derive cannot know which member is
//! live. The impl reads the discriminator through the first member and
//! dispatches to the member named by the tag.

use super::push_preamble;
use crate::error::CodegenError;
use crate::options::GeneratorOptions;
use bendec_schema::ir::to_field_ident;
use bendec_schema::{Schema, TypeDefinitionStrict, UnionStrict, resolve_discriminator};

/// Generator for unions and their serializers.
pub struct UnionGenerator<'a> {
    schema: &'a Schema,
    options: &'a GeneratorOptions,
}

impl<'a> UnionGenerator<'a> {
    /// Creates a new union generator.
    #[must_use]
    pub fn new(schema: &'a Schema, options: &'a GeneratorOptions) -> Self {
        Self { schema, options }
    }

    /// Generates the union declaration and its `Serialize` impl.
    ///
    /// # Errors
    /// Returns `CodegenError::Schema` if the discriminator cannot be
    /// resolved.
    pub fn generate(&self, def: &UnionStrict) -> Result<String, CodegenError> {
        let discriminant = resolve_discriminator(def, self.schema)?;
        tracing::debug!(
            "union {} discriminated by {}",
            def.name,
            discriminant.name()
        );

        let mut output = String::new();
        output.push_str(&self.generate_union(def)?);
        output.push_str("\n\n");
        output.push_str(&self.generate_serialize(def, discriminant));
        Ok(output)
    }

    /// Generates the overlapping-storage declaration.
    fn generate_union(&self, def: &UnionStrict) -> Result<String, CodegenError> {
        let mut output = String::new();

        push_preamble(
            &mut output,
            self.schema,
            self.options,
            &def.name,
            def.description.as_deref(),
        )?;
        output.push_str("#[repr(C, packed)]\n");
        output.push_str(&format!("pub union {} {{\n", def.name));
        for member in &def.members {
            output.push_str(&format!("    pub {}: {},\n", to_field_ident(member), member));
        }
        output.push('}');

        Ok(output)
    }

    /// Generates the `Serialize` impl dispatching on the discriminator.
    fn generate_serialize(&self, def: &UnionStrict, discriminant: &TypeDefinitionStrict) -> String {
        let first = to_field_ident(&def.members[0]);
        let path = def
            .discriminator
            .iter()
            .map(|segment| to_field_ident(segment))
            .collect::<Vec<_>>()
            .join(".");
        let tag = discriminant.name();

        let mut output = String::new();
        output.push_str(&format!("impl Serialize for {} {{\n", def.name));
        output.push_str(
            "    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>\n",
        );
        output.push_str("    where\n");
        output.push_str("        S: Serializer,\n");
        output.push_str("    {\n");
        output.push_str(
            "        // SAFETY: every member carries the discriminator at the same offset, so\n",
        );
        output.push_str(
            "        // it can be read through the first member before the live one is known.\n",
        );
        output.push_str("        unsafe {\n");
        output.push_str(&format!(
            "            match std::ptr::read_unaligned(std::ptr::addr_of!(self.{first}.{path})) {{\n"
        ));
        for member in &def.members {
            output.push_str(&format!(
                "                {}::{} => self.{}.serialize(serializer),\n",
                tag,
                member,
                to_field_ident(member)
            ));
        }
        if self.has_unmatched_variants(def, discriminant) {
            output.push_str(&format!(
                "                _ => Err(serde::ser::Error::custom(\"unknown {} discriminator\")),\n",
                def.name
            ));
        }
        output.push_str("            }\n");
        output.push_str("        }\n");
        output.push_str("    }\n");
        output.push('}');

        output
    }

    /// Returns true if the tag enum has variants no member is named after.
    fn has_unmatched_variants(
        &self,
        def: &UnionStrict,
        discriminant: &TypeDefinitionStrict,
    ) -> bool {
        match self.schema.resolve_alias(discriminant.name()) {
            Ok(TypeDefinitionStrict::Enum(tag)) => tag
                .variants
                .iter()
                .any(|variant| !def.members.contains(&variant.name)),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bendec_schema::{Field, SchemaError, TypeDefinition, normalize};

    fn animals(kinds: &[(&str, i128)]) -> Vec<TypeDefinition> {
        vec![
            TypeDefinition::primitive("u8", 1),
            TypeDefinition::primitive("u16", 2),
            TypeDefinition::enumeration("AnimalKind2", "u8", kinds.to_vec()),
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
        ]
    }

    fn generate(defs: &[TypeDefinition]) -> Result<String, CodegenError> {
        let schema = normalize(defs)?;
        let Some(TypeDefinitionStrict::Union(def)) = schema.get_type("Animal2") else {
            panic!("expected union");
        };
        UnionGenerator::new(&schema, &GeneratorOptions::default()).generate(def)
    }

    #[test]
    fn test_nested_discriminator_path() {
        let output =
            generate(&animals(&[("Zebra2", 1), ("Toucan2", 2)])).expect("Failed to generate");

        assert!(output.contains(
            "#[repr(C, packed)]\npub union Animal2 {\n    pub zebra2: Zebra2,\n    pub toucan2: Toucan2,\n}"
        ));
        assert!(output.contains("impl Serialize for Animal2 {"));
        assert!(output.contains(
            "match std::ptr::read_unaligned(std::ptr::addr_of!(self.zebra2.header.animal_kind)) {"
        ));
        assert!(output.contains("AnimalKind2::Zebra2 => self.zebra2.serialize(serializer),"));
        assert!(output.contains("AnimalKind2::Toucan2 => self.toucan2.serialize(serializer),"));
        assert!(!output.contains("_ =>"));
        assert_eq!(output.matches("unsafe {").count(), 1);
    }

    #[test]
    fn test_fallback_arm_for_extra_variants() {
        let output = generate(&animals(&[("Zebra2", 1), ("Toucan2", 2), ("Okapi", 3)]))
            .expect("Failed to generate");

        assert!(output.contains(
            "_ => Err(serde::ser::Error::custom(\"unknown Animal2 discriminator\")),"
        ));
    }

    #[test]
    fn test_unresolvable_discriminator_fails() {
        let mut defs = animals(&[("Zebra2", 1), ("Toucan2", 2)]);
        defs[6] = TypeDefinition::union("Animal2", ["legs", "animalKind"], ["Zebra2", "Toucan2"]);

        match generate(&defs) {
            Err(CodegenError::Schema(SchemaError::DiscriminatorPath { union, .. })) => {
                assert_eq!(union, "Animal2");
            }
            other => panic!("expected discriminator path error, got {other:?}"),
        }
    }
}
