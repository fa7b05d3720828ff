//! Pair a schema's shape table with confique's metadata and serialized
//! defaults, yielding one [`FieldDescriptor`] per field.

use std::collections::HashSet;

use confique::meta::{FieldKind, Meta};
use toml::{Table, Value};

use crate::error::FlagfigError;
use crate::path::FieldPath;
use crate::schema::{FieldShape, NestedRef, TypeShape};

/// Everything known about one field of a schema node.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub shape: TypeShape,
    /// Serialized default, `None` for an unset optional field.
    pub default: Option<Value>,
    pub doc: &'static [&'static str],
    /// confique metadata of the sub-schema, for nested fields.
    pub nested_meta: Option<&'static Meta>,
}

impl FieldDescriptor {
    /// Doc comment as a single line, or `None` if the field is undocumented.
    pub fn help(&self) -> Option<String> {
        let text = self
            .doc
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        (!text.is_empty()).then_some(text)
    }
}

/// Describe the fields of one schema node.
///
/// `path` is the position of the node itself and is only used in errors.
/// Every table entry must name a field of `meta` with the same leaf/nested
/// kind, and every field of `meta` must appear in the table.
pub fn describe(
    table: Vec<FieldShape>,
    meta: &Meta,
    defaults: &Table,
    path: &FieldPath,
) -> Result<Vec<FieldDescriptor>, FlagfigError> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(table.len());

    for FieldShape { key, shape } in table {
        let child = path.child(key);
        let mismatch = |reason: &str| FlagfigError::SchemaMismatch {
            path: child.key_path().to_string(),
            reason: reason.to_string(),
        };

        if !seen.insert(key) {
            return Err(mismatch("declared twice in the shape table"));
        }

        let field = meta
            .fields
            .iter()
            .find(|f| f.name == key)
            .ok_or_else(|| mismatch("declared in the shape table but not in the config struct"))?;

        let nested_meta = match (&field.kind, &shape) {
            (FieldKind::Nested { meta, .. }, TypeShape::Nested(_)) => Some(*meta),
            (FieldKind::Leaf { .. }, TypeShape::Nested(_)) => {
                return Err(mismatch("declared nested but the config field is a leaf"));
            }
            (FieldKind::Nested { .. }, _) => {
                return Err(mismatch(
                    "the config field is nested but declared with a leaf shape",
                ));
            }
            (FieldKind::Leaf { .. }, _) => None,
        };

        out.push(FieldDescriptor {
            key,
            shape,
            default: defaults.get(key).cloned(),
            doc: field.doc,
            nested_meta,
        });
    }

    if let Some(missing) = meta.fields.iter().find(|f| !seen.contains(f.name)) {
        return Err(FlagfigError::SchemaMismatch {
            path: path.child(missing.name).key_path().to_string(),
            reason: "missing from the shape table".to_string(),
        });
    }

    Ok(out)
}

/// The confique metadata of a nested field, checked against the schema its
/// table entry points at.
///
/// `path` is the position of the nested field.
pub fn nested_meta(
    field: &FieldDescriptor,
    nested: &NestedRef,
    path: &FieldPath,
) -> Result<&'static Meta, FlagfigError> {
    let meta = field.nested_meta.ok_or_else(|| FlagfigError::SchemaMismatch {
        path: path.key_path().to_string(),
        reason: "nested field without confique metadata".to_string(),
    })?;
    if nested.meta != *meta {
        return Err(FlagfigError::SchemaMismatch {
            path: path.key_path().to_string(),
            reason: format!(
                "declared as nested {} but the config struct nests {}",
                nested.short_name(),
                meta.name
            ),
        });
    }
    Ok(meta)
}
