//! Fold flat parser output back into the nested default structure.
//!
//! `(".train.batch_size", 16)` overwrites `base["train"]["batch_size"]`.
//! Unlike a sparse override table, `base` must already contain every
//! intermediate table: it is the serialized defaults of the same schema the
//! paths were derived from, so a missing table is a programming error.

use toml::{Table, Value};
use tracing::trace;

use crate::error::FlagfigError;
use crate::path;
use crate::types::ParsedResult;

/// Overwrite the leaves of `base` addressed by `parsed`.
///
/// All paths are checked before anything is written. On error `base` is
/// left exactly as it was.
pub fn assign(base: &mut Table, parsed: &ParsedResult) -> Result<(), FlagfigError> {
    for dest in parsed.keys() {
        let (parents, _) = path::split_dest(dest)?;
        descend(base, dest, &parents)?;
    }

    for (dest, value) in parsed {
        let (parents, leaf) = path::split_dest(dest)?;
        let table = descend_mut(base, dest, &parents)?;
        trace!(%dest, ?value, "assign");
        table.insert(leaf.to_string(), value.clone());
    }
    Ok(())
}

fn descend<'a>(
    mut table: &'a Table,
    dest: &str,
    parents: &[&str],
) -> Result<&'a Table, FlagfigError> {
    for segment in parents {
        table = table
            .get(*segment)
            .and_then(Value::as_table)
            .ok_or_else(|| violation(dest, segment))?;
    }
    Ok(table)
}

fn descend_mut<'a>(
    mut table: &'a mut Table,
    dest: &str,
    parents: &[&str],
) -> Result<&'a mut Table, FlagfigError> {
    for segment in parents {
        table = table
            .get_mut(*segment)
            .and_then(Value::as_table_mut)
            .ok_or_else(|| violation(dest, segment))?;
    }
    Ok(table)
}

fn violation(dest: &str, segment: &str) -> FlagfigError {
    FlagfigError::PathStructure {
        path: dest.to_string(),
        segment: segment.to_string(),
    }
}
