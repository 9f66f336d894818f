//! Rust emitter.
//!
//! Every group becomes a `Copy` struct with `pub const` constants. Lookup
//! groups get a `<Group>_static_list` array, aliases indexing into it, a
//! fallible `try_get_<Group>` returning `LookupMiss`, and `get_<Group>`, which
//! panics on a miss.
//!
//! Symbol names keep the schema's spelling (`DW_TAG_array_type`,
//! `get_DW_FORM`), so the emitted items carry the matching `allow` lints.

use crate::emitter::Emitter;
use crate::generate::CodegenError;
use rhizome_constgen_schema::{ConstantGroup, Field, Schema, ValueEntry};
use std::fmt::{self, Write as FmtWrite};

/// Names that cannot be written as Rust identifiers, not even as `r#name`,
/// plus the error type declared by the prelude.
const RESERVED: &[&str] = &["self", "Self", "super", "crate", "_", "LookupMiss"];

/// Emits Rust constant definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustEmitter;

impl RustEmitter {
    /// Map portable and C fixed-width type names to Rust types; other names pass through.
    pub fn type_name(name: &str) -> &str {
        match name {
            "uint8" | "uint8_t" => "u8",
            "uint16" | "uint16_t" => "u16",
            "uint32" | "uint32_t" | "unsigned" => "u32",
            "uint64" | "uint64_t" => "u64",
            "int8" | "int8_t" => "i8",
            "int16" | "int16_t" => "i16",
            "int32" | "int32_t" | "int" => "i32",
            "int64" | "int64_t" => "i64",
            "float" => "f32",
            "double" => "f64",
            other => other,
        }
    }

    fn initializer(out: &mut String, group: &ConstantGroup, entry: &ValueEntry) -> fmt::Result {
        write!(out, "{} {{ ", escape_ident(&group.name))?;
        for (idx, (field, literal)) in entry.bindings(&group.format).enumerate() {
            if idx > 0 {
                write!(out, ", ")?;
            }
            write!(out, "{}: {}", escape_ident(&field.name), literal)?;
        }
        write!(out, " }}")
    }
}

impl Emitter for RustEmitter {
    fn check_names(&self, group: &ConstantGroup) -> Result<(), CodegenError> {
        let reserved = std::iter::once(&group.name)
            .chain(group.format.iter().map(|field| &field.name))
            .find(|name| RESERVED.contains(&name.as_str()));
        match reserved {
            Some(name) => Err(CodegenError::ReservedName {
                group: group.name.clone(),
                name: name.clone(),
                target: "Rust",
            }),
            None => Ok(()),
        }
    }

    fn prelude(&self, out: &mut String, schema: &Schema) -> fmt::Result {
        writeln!(out, "// Constants generated by constgen.")?;
        writeln!(out, "// Do not edit manually.")?;
        writeln!(out)?;

        if schema.groups.iter().any(|group| group.gen_create_from_value) {
            writeln!(out, "/// A raw value that is not part of a group's static list.")?;
            writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq)]")?;
            writeln!(out, "pub struct LookupMiss {{")?;
            writeln!(out, "    /// Static list that was searched.")?;
            writeln!(out, "    pub list: &'static str,")?;
            writeln!(out, "}}")?;
            writeln!(out)?;
            writeln!(out, "impl ::core::fmt::Display for LookupMiss {{")?;
            writeln!(
                out,
                "    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {{"
            )?;
            writeln!(out, "        write!(f, \"value was not part of {{}}\", self.list)")?;
            writeln!(out, "    }}")?;
            writeln!(out, "}}")?;
            writeln!(out)?;
            writeln!(out, "impl ::std::error::Error for LookupMiss {{}}")?;
            writeln!(out)?;
        }

        Ok(())
    }

    fn declare_type(&self, out: &mut String, group: &ConstantGroup) -> fmt::Result {
        writeln!(out, "#[allow(non_camel_case_types)]")?;
        writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq)]")?;
        writeln!(out, "pub struct {} {{", escape_ident(&group.name))?;
        for field in &group.format {
            writeln!(
                out,
                "    pub {}: {},",
                escape_ident(&field.name),
                Self::type_name(&field.type_name)
            )?;
        }
        writeln!(out, "}}")?;

        if let Some(value) = group.value_field() {
            let ty = escape_ident(&group.name);
            let value_type = Self::type_name(&value.type_name);
            writeln!(out)?;
            writeln!(out, "impl From<{ty}> for {value_type} {{")?;
            writeln!(out, "    fn from(constant: {ty}) -> Self {{")?;
            writeln!(out, "        constant.{}", escape_ident(&value.name))?;
            writeln!(out, "    }}")?;
            writeln!(out, "}}")?;
        }

        Ok(())
    }

    fn constant(
        &self,
        out: &mut String,
        group: &ConstantGroup,
        entry: &ValueEntry,
    ) -> fmt::Result {
        writeln!(out, "#[allow(non_upper_case_globals)]")?;
        write!(
            out,
            "pub const {}: {} = ",
            group.symbol_name(entry),
            escape_ident(&group.name)
        )?;
        Self::initializer(out, group, entry)?;
        writeln!(out, ";")
    }

    fn static_list(&self, out: &mut String, group: &ConstantGroup) -> fmt::Result {
        writeln!(out, "#[allow(non_upper_case_globals)]")?;
        writeln!(
            out,
            "pub const {}: [{}; {}] = [",
            group.static_list_name(),
            escape_ident(&group.name),
            group.values.len()
        )?;
        for entry in &group.values {
            write!(out, "    ")?;
            Self::initializer(out, group, entry)?;
            writeln!(out, ",")?;
        }
        writeln!(out, "];")
    }

    fn alias(
        &self,
        out: &mut String,
        group: &ConstantGroup,
        entry: &ValueEntry,
        index: usize,
    ) -> fmt::Result {
        writeln!(out, "#[allow(non_upper_case_globals)]")?;
        writeln!(
            out,
            "pub const {}: {} = {}[{}];",
            group.symbol_name(entry),
            escape_ident(&group.name),
            group.static_list_name(),
            index
        )
    }

    fn lookup_function(
        &self,
        out: &mut String,
        group: &ConstantGroup,
        value_field: &Field,
    ) -> fmt::Result {
        let ty = escape_ident(&group.name);
        let list = group.static_list_name();
        let lookup = group.lookup_name();
        let field = escape_ident(&value_field.name);
        let value_type = Self::type_name(&value_field.type_name);

        writeln!(
            out,
            "/// Find the `{}` constant whose `{}` equals `value`.",
            group.name, value_field.name
        )?;
        writeln!(out, "#[allow(non_snake_case)]")?;
        writeln!(
            out,
            "pub fn try_{lookup}(value: {value_type}) -> Result<{ty}, LookupMiss> {{"
        )?;
        writeln!(out, "    {list}")?;
        writeln!(out, "        .iter()")?;
        writeln!(out, "        .find(|entry| entry.{field} == value)")?;
        writeln!(out, "        .copied()")?;
        writeln!(out, "        .ok_or(LookupMiss {{ list: \"{list}\" }})")?;
        writeln!(out, "}}")?;
        writeln!(out)?;
        writeln!(
            out,
            "/// Like [`try_{lookup}`], but panics if `value` is not part of `{list}`."
        )?;
        writeln!(out, "#[allow(non_snake_case)]")?;
        writeln!(out, "pub fn {lookup}(value: {value_type}) -> {ty} {{")?;
        writeln!(out, "    match try_{lookup}(value) {{")?;
        writeln!(out, "        Ok(constant) => constant,")?;
        writeln!(out, "        Err(miss) => panic!(\"{{miss}} ({{value:?}})\"),")?;
        writeln!(out, "    }}")?;
        writeln!(out, "}}")
    }
}

/// Escape a group or field name if it's a Rust keyword.
fn escape_ident(name: &str) -> String {
    match name {
        // Rust keywords that need escaping
        "as" | "break" | "const" | "continue" | "else" | "enum" | "extern" | "false" | "fn"
        | "for" | "if" | "impl" | "in" | "let" | "loop" | "match" | "mod" | "move" | "mut"
        | "pub" | "ref" | "return" | "static" | "struct" | "trait" | "true" | "type"
        | "unsafe" | "use" | "where" | "while" | "async" | "await" | "dyn" | "gen" | "abstract"
        | "become" | "box" | "do" | "final" | "macro" | "override" | "priv" | "typeof"
        | "unsized" | "virtual" | "yield" | "try" => format!("r#{}", name),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhizome_constgen_schema::Literal;

    fn tag_group() -> ConstantGroup {
        ConstantGroup {
            name: "Tag".to_string(),
            format: vec![Field::new("value", "uint16")],
            values: vec![
                ValueEntry::new("Array", vec![Literal::new("1")]),
                ValueEntry::new("Pointer", vec![Literal::new("15")]),
            ],
            gen_create_from_value: true,
        }
    }

    #[test]
    fn test_type_mapping() {
        assert_eq!(RustEmitter::type_name("uint16"), "u16");
        assert_eq!(RustEmitter::type_name("uint8_t"), "u8");
        assert_eq!(RustEmitter::type_name("int"), "i32");
        assert_eq!(RustEmitter::type_name("bool"), "bool");
        assert_eq!(RustEmitter::type_name("DwarfType"), "DwarfType");
    }

    #[test]
    fn test_escape_ident() {
        assert_eq!(escape_ident("type"), "r#type");
        assert_eq!(escape_ident("gen"), "r#gen");
        assert_eq!(escape_ident("value"), "value");
        assert_eq!(escape_ident("major"), "major");
    }

    #[test]
    fn test_declare_type() {
        let mut out = String::new();
        RustEmitter.declare_type(&mut out, &tag_group()).unwrap();

        assert!(out.contains("pub struct Tag {\n    pub value: u16,\n}\n"));
        assert!(out.contains("impl From<Tag> for u16 {"));
        assert!(out.contains("        constant.value\n"));
    }

    #[test]
    fn test_keyword_fields() {
        let group = ConstantGroup {
            name: "Form".to_string(),
            format: vec![Field::new("value", "uint8"), Field::new("type", "DwarfType")],
            values: vec![ValueEntry::new(
                "strp",
                vec![Literal::new("0x0e"), Literal::new("DwarfType::StringPtr")],
            )],
            gen_create_from_value: false,
        };

        let mut out = String::new();
        RustEmitter.declare_type(&mut out, &group).unwrap();
        RustEmitter.constant(&mut out, &group, &group.values[0]).unwrap();

        assert!(out.contains("    pub r#type: DwarfType,\n"));
        assert!(out.contains(
            "pub const Form_strp: Form = Form { value: 0x0e, r#type: DwarfType::StringPtr };\n"
        ));
    }

    #[test]
    fn test_keyword_group() {
        let group = ConstantGroup {
            name: "type".to_string(),
            format: vec![Field::new("value", "uint8")],
            values: vec![ValueEntry::new("A", vec![Literal::new("1")])],
            gen_create_from_value: true,
        };

        let mut out = String::new();
        RustEmitter.declare_type(&mut out, &group).unwrap();
        RustEmitter.static_list(&mut out, &group).unwrap();
        RustEmitter.alias(&mut out, &group, &group.values[0], 0).unwrap();
        RustEmitter
            .lookup_function(&mut out, &group, group.value_field().unwrap())
            .unwrap();

        assert!(out.contains("pub struct r#type {"));
        assert!(out.contains("impl From<r#type> for u8 {"));
        assert!(out.contains("pub const type_static_list: [r#type; 1] = [\n    r#type { value: 1 },\n];"));
        assert!(out.contains("pub const type_A: r#type = type_static_list[0];"));
        assert!(out.contains("pub fn get_type(value: u8) -> r#type {"));
        assert!(RustEmitter.check_names(&group).is_ok());
    }

    #[test]
    fn test_reserved_names_are_rejected() {
        for field in ["self", "Self", "super", "crate", "_"] {
            let mut group = tag_group();
            group.format.push(Field::new(field, "u8"));

            let err = RustEmitter.check_names(&group).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("group `Tag`: `{field}` cannot be used as a Rust identifier")
            );
        }

        let mut group = tag_group();
        group.name = "LookupMiss".to_string();
        assert!(matches!(
            RustEmitter.check_names(&group),
            Err(CodegenError::ReservedName { .. })
        ));
        assert!(RustEmitter.check_names(&tag_group()).is_ok());
    }

    #[test]
    fn test_static_list_and_aliases() {
        let group = tag_group();
        let mut out = String::new();
        RustEmitter.static_list(&mut out, &group).unwrap();
        for (index, entry) in group.values.iter().enumerate() {
            RustEmitter.alias(&mut out, &group, entry, index).unwrap();
        }

        assert!(out.contains(
            "pub const Tag_static_list: [Tag; 2] = [\n    Tag { value: 1 },\n    Tag { value: 15 },\n];\n"
        ));
        assert!(out.contains("pub const Tag_Array: Tag = Tag_static_list[0];\n"));
        assert!(out.contains("pub const Tag_Pointer: Tag = Tag_static_list[1];\n"));
    }

    #[test]
    fn test_lookup_function() {
        let group = tag_group();
        let mut out = String::new();
        RustEmitter
            .lookup_function(&mut out, &group, group.value_field().unwrap())
            .unwrap();

        assert!(out.contains("pub fn try_get_Tag(value: u16) -> Result<Tag, LookupMiss> {"));
        assert!(out.contains("        .find(|entry| entry.value == value)\n"));
        assert!(out.contains(".ok_or(LookupMiss { list: \"Tag_static_list\" })"));
        assert!(out.contains("pub fn get_Tag(value: u16) -> Tag {"));
        assert!(out.contains("Err(miss) => panic!(\"{miss} ({value:?})\"),"));
    }

    #[test]
    fn test_prelude_only_declares_lookup_miss_when_needed() {
        let mut with_lookup = String::new();
        let schema = Schema {
            groups: vec![tag_group()],
        };
        RustEmitter.prelude(&mut with_lookup, &schema).unwrap();
        assert!(with_lookup.contains("pub struct LookupMiss {"));
        assert!(with_lookup.contains("impl ::std::error::Error for LookupMiss {}"));

        let mut without_lookup = String::new();
        let mut group = tag_group();
        group.gen_create_from_value = false;
        let schema = Schema {
            groups: vec![group],
        };
        RustEmitter.prelude(&mut without_lookup, &schema).unwrap();
        assert!(!without_lookup.contains("LookupMiss"));
    }
}
