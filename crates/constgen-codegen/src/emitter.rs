//! Target-language emission interface.

use crate::generate::CodegenError;
use rhizome_constgen_schema::{ConstantGroup, Field, Schema, ValueEntry};
use std::fmt;

/// Renders schema elements as source text for one target language.
///
/// Every method appends to `out`. The schema walk in
/// [`generate`](crate::generate) decides which methods run and in which order:
///
/// 1. `prelude` once;
/// 2. per group, `check_names`, `declare_type`, then either `constant` for every entry or
///    `static_list`, `alias` for every entry and `lookup_function`;
/// 3. `epilogue` once.
pub trait Emitter {
    /// Reject group or field names the target cannot spell.
    fn check_names(&self, _group: &ConstantGroup) -> Result<(), CodegenError> {
        Ok(())
    }

    /// File header, written before the first group.
    fn prelude(&self, out: &mut String, schema: &Schema) -> fmt::Result;

    /// Aggregate type with one member per format field.
    fn declare_type(&self, out: &mut String, group: &ConstantGroup) -> fmt::Result;

    /// Standalone constant `<Group>_<Entry>`.
    fn constant(&self, out: &mut String, group: &ConstantGroup, entry: &ValueEntry)
    -> fmt::Result;

    /// Canonical array holding every entry of the group, in schema order.
    fn static_list(&self, out: &mut String, group: &ConstantGroup) -> fmt::Result;

    /// Constant `<Group>_<Entry>` aliasing element `index` of the static list.
    fn alias(
        &self,
        out: &mut String,
        group: &ConstantGroup,
        entry: &ValueEntry,
        index: usize,
    ) -> fmt::Result;

    /// Linear-scan lookup from a raw `value` to its constant.
    fn lookup_function(
        &self,
        out: &mut String,
        group: &ConstantGroup,
        value_field: &Field,
    ) -> fmt::Result;

    /// File trailer, written after the last group.
    fn epilogue(&self, _out: &mut String, _schema: &Schema) -> fmt::Result {
        Ok(())
    }
}
