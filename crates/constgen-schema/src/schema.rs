//! Typed schema model.
//!
//! The loaded document is converted once into these types; emitters only ever
//! see a validated [`Schema`]. Loading ends with [`Schema::check`], so the
//! invariants below hold for any schema produced by the `from_*` constructors:
//!
//! - `format` has at least one field;
//! - every entry has exactly one literal per format field;
//! - groups with `gen_create_from_value` have a `value` field;
//! - no two emitted symbols share a name.

use crate::error::SchemaError;
use crate::validation;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File names probed, in order, when loading a schema from a directory.
pub const SCHEMA_FILE_NAMES: &[&str] = &[
    "constants.json", // Primary schema
    "constants.toml", // Same layout, TOML syntax
];

/// Name of the field used for comparisons and lookups.
pub const VALUE_FIELD: &str = "value";

/// A verbatim source token used to initialize one field.
///
/// Literals are never type-checked or escaped: `"0x01"` is emitted as `0x01`
/// and `"DWARFType::String"` as `DWARFType::String`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal(String);

impl Literal {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One member of a group's layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Member name
    pub name: String,
    /// Declared type name, as written in the schema
    pub type_name: String,
}

impl Field {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// One named constant within a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueEntry {
    /// Short name (e.g., "array_type")
    pub name: String,
    /// Literals, positionally matched to the group's format
    pub literals: Vec<Literal>,
}

impl ValueEntry {
    pub fn new(name: impl Into<String>, literals: Vec<Literal>) -> Self {
        Self {
            name: name.into(),
            literals,
        }
    }

    /// Pairs each format field with the literal that initializes it.
    pub fn bindings<'a>(
        &'a self,
        format: &'a [Field],
    ) -> impl Iterator<Item = (&'a Field, &'a Literal)> + 'a {
        format.iter().zip(&self.literals)
    }

    /// Returns the literal bound to the named field.
    pub fn literal_for<'a>(&'a self, format: &'a [Field], field: &str) -> Option<&'a Literal> {
        self.bindings(format)
            .find(|(f, _)| f.name == field)
            .map(|(_, literal)| literal)
    }
}

/// A named family of constants sharing one field layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantGroup {
    /// Group name, used as the prefix of every emitted symbol
    pub name: String,
    /// Ordered field layout
    pub format: Vec<Field>,
    /// Ordered entries
    pub values: Vec<ValueEntry>,
    /// Whether to emit the static list, aliases and lookup function
    pub gen_create_from_value: bool,
}

impl ConstantGroup {
    /// Find a format field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.format.iter().find(|field| field.name == name)
    }

    /// The `value` field, if the layout has one.
    pub fn value_field(&self) -> Option<&Field> {
        self.field(VALUE_FIELD)
    }

    /// The `value` field the lookup function is keyed on.
    pub fn lookup_field(&self) -> Result<&Field, SchemaError> {
        self.value_field().ok_or_else(|| {
            SchemaError::shape(
                &self.name,
                format!("`genCreateFromValue` requires a `{VALUE_FIELD}` field in `format`"),
            )
        })
    }

    /// Find an entry by its short name.
    pub fn entry(&self, name: &str) -> Option<&ValueEntry> {
        self.values.iter().find(|entry| entry.name == name)
    }

    /// Returns the emitted constant name (e.g., "Tag_Array").
    pub fn symbol_name(&self, entry: &ValueEntry) -> String {
        format!("{}_{}", self.name, entry.name)
    }

    /// Returns the name of the canonical array (e.g., "Tag_static_list").
    pub fn static_list_name(&self) -> String {
        format!("{}_static_list", self.name)
    }

    /// Returns the lookup function name (e.g., "get_Tag").
    pub fn lookup_name(&self) -> String {
        format!("get_{}", self.name)
    }

    /// Every symbol the group defines: its type, then the static list and
    /// lookup function if requested, then one constant per entry.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols = vec![self.name.clone()];
        if self.gen_create_from_value {
            symbols.push(self.static_list_name());
            symbols.push(self.lookup_name());
        }
        symbols.extend(self.values.iter().map(|entry| self.symbol_name(entry)));
        symbols
    }

    /// Check the model invariants.
    pub fn check(&self) -> Result<(), SchemaError> {
        if self.format.is_empty() {
            return Err(SchemaError::shape(
                &self.name,
                "`format` must contain at least one field",
            ));
        }

        let static_list = self.static_list_name();
        let mut names = HashSet::new();
        for entry in &self.values {
            if !names.insert(entry.name.as_str()) {
                return Err(SchemaError::entry_shape(
                    &self.name,
                    &entry.name,
                    "duplicate entry name",
                ));
            }

            if self.gen_create_from_value && self.symbol_name(entry) == static_list {
                return Err(SchemaError::entry_shape(
                    &self.name,
                    &entry.name,
                    format!("constant would redefine `{static_list}`"),
                ));
            }

            if entry.literals.len() != self.format.len() {
                return Err(SchemaError::ArityMismatch {
                    group: self.name.clone(),
                    entry: entry.name.clone(),
                    expected: self.format.len(),
                    got: entry.literals.len(),
                });
            }
        }

        if self.gen_create_from_value {
            self.lookup_field()?;
        }

        Ok(())
    }
}

/// Root schema containing all constant groups, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub groups: Vec<ConstantGroup>,
}

impl Schema {
    /// Load a schema file, picking the reader from the extension.
    ///
    /// `.toml` files are read as TOML, anything else as JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "loading schema");

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&contents),
            _ => Self::from_json_str(&contents),
        }
    }

    /// Load the schema from its conventional location inside `dir`.
    ///
    /// Probes [`SCHEMA_FILE_NAMES`] in order and loads the first that exists.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, SchemaError> {
        let dir = dir.as_ref();
        let path = Self::locate(dir).ok_or_else(|| SchemaError::NotFound {
            dir: dir.to_path_buf(),
        })?;
        Self::from_file(path)
    }

    /// Returns the first conventional schema file present in `dir`.
    pub fn locate(dir: &Path) -> Option<PathBuf> {
        SCHEMA_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Parse a JSON schema document.
    pub fn from_json_str(source: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(&value)
    }

    /// Parse a TOML schema document.
    pub fn from_toml_str(source: &str) -> Result<Self, SchemaError> {
        let value: Value = toml::from_str(source)?;
        Self::from_value(&value)
    }

    /// Convert an already-parsed document tree into the typed model.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        validation::parse_schema(value)
    }

    /// Check every group, then that no symbol is defined by two groups
    /// (`A` + `B_C` and `A_B` + `C` both emit `A_B_C`).
    pub fn check(&self) -> Result<(), SchemaError> {
        let mut owners: HashMap<String, &str> = HashMap::new();
        for group in &self.groups {
            group.check()?;
            for symbol in group.symbols() {
                if let Some(owner) = owners.insert(symbol.clone(), &group.name) {
                    return Err(SchemaError::shape(
                        &group.name,
                        format!("symbol `{symbol}` is also defined by group `{owner}`"),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Find a group by name.
    pub fn find(&self, name: &str) -> Option<&ConstantGroup> {
        self.groups.iter().find(|group| group.name == name)
    }

    /// Total number of entries across all groups.
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|group| group.values.len()).sum()
    }
}
