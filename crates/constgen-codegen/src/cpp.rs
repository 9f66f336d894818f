//! C++ emitter.
//!
//! Produces a self-contained header: one `struct` per group with a
//! conversion operator to its `value` member, `constexpr` constants, and for
//! lookup groups a `std::array` static list plus a `constexpr` linear-scan
//! lookup that asserts and aborts on a miss.

use crate::emitter::Emitter;
use rhizome_constgen_schema::{ConstantGroup, Field, Schema, VALUE_FIELD, ValueEntry};
use std::fmt::{self, Write as FmtWrite};

/// Emits C++17 constant definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CppEmitter;

impl CppEmitter {
    /// Map portable type names to fixed-width C++ types; other names pass through.
    pub fn type_name(name: &str) -> &str {
        match name {
            "uint8" => "uint8_t",
            "uint16" => "uint16_t",
            "uint32" => "uint32_t",
            "uint64" => "uint64_t",
            "int8" => "int8_t",
            "int16" => "int16_t",
            "int32" => "int32_t",
            "int64" => "int64_t",
            other => other,
        }
    }

    fn arguments(entry: &ValueEntry) -> String {
        entry
            .literals
            .iter()
            .map(|literal| literal.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Emitter for CppEmitter {
    fn prelude(&self, out: &mut String, _schema: &Schema) -> fmt::Result {
        writeln!(out, "// Constants generated by constgen.")?;
        writeln!(out, "// Do not edit manually.")?;
        writeln!(out)?;
        writeln!(out, "#pragma once")?;
        writeln!(out)?;
        writeln!(out, "#include <array>")?;
        writeln!(out, "#include <cassert>")?;
        writeln!(out, "#include <cstdint>")?;
        writeln!(out, "#include <cstdlib>")?;
        writeln!(out)
    }

    fn declare_type(&self, out: &mut String, group: &ConstantGroup) -> fmt::Result {
        writeln!(out, "struct {} {{", group.name)?;
        for field in &group.format {
            writeln!(out, "  {} {};", Self::type_name(&field.type_name), field.name)?;
        }
        if group.value_field().is_some() {
            writeln!(
                out,
                "  constexpr operator decltype({VALUE_FIELD})() const {{ return {VALUE_FIELD}; }}"
            )?;
        }
        writeln!(out, "}};")
    }

    fn constant(
        &self,
        out: &mut String,
        group: &ConstantGroup,
        entry: &ValueEntry,
    ) -> fmt::Result {
        writeln!(
            out,
            "constexpr {} {}{{{}}};",
            group.name,
            group.symbol_name(entry),
            Self::arguments(entry)
        )
    }

    fn static_list(&self, out: &mut String, group: &ConstantGroup) -> fmt::Result {
        writeln!(
            out,
            "constexpr std::array<{}, {}> {}{{{{",
            group.name,
            group.values.len(),
            group.static_list_name()
        )?;
        for entry in &group.values {
            writeln!(out, "    {}{{{}}},", group.name, Self::arguments(entry))?;
        }
        writeln!(out, "}}}};")
    }

    fn alias(
        &self,
        out: &mut String,
        group: &ConstantGroup,
        entry: &ValueEntry,
        index: usize,
    ) -> fmt::Result {
        writeln!(
            out,
            "constexpr {} {} = {}[{}];",
            group.name,
            group.symbol_name(entry),
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
        let list = group.static_list_name();
        let value = &value_field.name;

        writeln!(
            out,
            "constexpr {} {}(decltype({}::{}) {}) {{",
            group.name,
            group.lookup_name(),
            group.name,
            value,
            value
        )?;
        writeln!(out, "  for (const auto &entry : {list})")?;
        writeln!(out, "    if (entry.{value} == {value})")?;
        writeln!(out, "      return entry;")?;
        writeln!(out, "  assert(0 && \"value was not part of {list}\");")?;
        writeln!(out, "  std::abort();")?;
        writeln!(out, "}}")
    }
}
