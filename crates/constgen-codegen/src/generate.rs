//! Schema walk.

use crate::emitter::Emitter;
use rhizome_constgen_schema::{ConstantGroup, Schema, SchemaError};
use std::fmt::Write as FmtWrite;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during generation.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("group `{group}`: `{name}` cannot be used as a {target} identifier")]
    ReservedName {
        group: String,
        name: String,
        target: &'static str,
    },

    #[error("failed to format output: {0}")]
    Fmt(#[from] std::fmt::Error),
}

/// Generate source for every group of `schema`, in declaration order.
///
/// Groups are separated by a blank line. Nothing is returned unless every
/// group rendered, so a failing schema never yields a partial file.
pub fn generate(schema: &Schema, emitter: &dyn Emitter) -> Result<String, CodegenError> {
    schema.check()?;

    let mut output = String::new();
    emitter.prelude(&mut output, schema)?;

    for (idx, group) in schema.groups.iter().enumerate() {
        if idx > 0 {
            writeln!(&mut output)?;
        }
        output.push_str(&generate_group(group, emitter)?);
    }

    emitter.epilogue(&mut output, schema)?;

    info!(
        groups = schema.groups.len(),
        entries = schema.entry_count(),
        "generated constants"
    );

    Ok(output)
}

/// Generate the type declaration and value section of a single group.
pub fn generate_group(group: &ConstantGroup, emitter: &dyn Emitter) -> Result<String, CodegenError> {
    group.check()?;
    emitter.check_names(group)?;

    let mut buffer = String::new();
    emitter.declare_type(&mut buffer, group)?;
    writeln!(&mut buffer)?;

    if group.gen_create_from_value {
        let value_field = group.lookup_field()?;

        emitter.static_list(&mut buffer, group)?;
        for (index, entry) in group.values.iter().enumerate() {
            emitter.alias(&mut buffer, group, entry, index)?;
        }
        writeln!(&mut buffer)?;
        emitter.lookup_function(&mut buffer, group, value_field)?;
    } else {
        for entry in &group.values {
            emitter.constant(&mut buffer, group, entry)?;
        }
    }

    debug!(
        group = %group.name,
        entries = group.values.len(),
        static_list = group.gen_create_from_value,
        "emitted group"
    );

    Ok(buffer)
}
