//! Turn a schema tree into a flat list of [`FlagSpec`]s.
//!
//! Nested fields are descended into with extended prefixes and never produce
//! a flag themselves. Leaves are classified as:
//!
//! | Shape                           | Flag kind            |
//! |---------------------------------|----------------------|
//! | `bool`, `Option<bool>`          | `Boolean`            |
//! | `str`/`int`/`float`, optional or not | `Typed(kind)`   |
//! | `choice`, optional or not       | `Choice(variants)`   |
//!
//! Anything else (optional nested, nested options, sequences) is rejected
//! with [`FlagfigError::UnsupportedFieldShape`]. The whole tree is walked
//! before any flag is registered, so a bad field fails fast.

use std::any::TypeId;
use std::collections::HashMap;

use confique::meta::Meta;
use toml::Table;
use tracing::debug;

use crate::error::FlagfigError;
use crate::extract::{self, FieldDescriptor};
use crate::path::{FieldPath, SEPARATOR};
use crate::schema::{FieldShape, NestedRef, Schema, TypeShape};
use crate::types::{FlagKind, FlagSpec};

/// Walk schema `C`, reading defaults from its serialized form.
pub fn walk_schema<C: Schema>(
    defaults: &Table,
    root: FieldPath,
) -> Result<Vec<FlagSpec>, FlagfigError> {
    let mut walker = Walker {
        stack: vec![TypeId::of::<C>()],
        out: Vec::new(),
    };
    walker.walk(C::fields(), &C::META, defaults, &root)?;
    check_unique_names(&walker.out)?;
    Ok(walker.out)
}

/// Long flags the argument parser adds to every command.
const RESERVED_LONGS: &[&str] = &["help"];

/// Hyphenation can map different keys to one flag (`a_b` and `a.b` both
/// become `--a-b`), and a boolean's `--no-` form can shadow another flag.
fn check_unique_names(specs: &[FlagSpec]) -> Result<(), FlagfigError> {
    let mut taken: HashMap<String, &str> = HashMap::new();
    for spec in specs {
        let mut longs = vec![spec.long().to_string()];
        if spec.kind == FlagKind::Boolean {
            longs.push(spec.negated_long());
        }
        for long in longs {
            if RESERVED_LONGS.contains(&long.as_str()) {
                return Err(FlagfigError::SchemaMismatch {
                    path: spec.dest.trim_start_matches(SEPARATOR).to_string(),
                    reason: format!("flag --{long} is reserved by the argument parser"),
                });
            }
            if let Some(other) = taken.insert(long.clone(), &spec.dest) {
                return Err(FlagfigError::SchemaMismatch {
                    path: spec.dest.trim_start_matches(SEPARATOR).to_string(),
                    reason: format!("flag --{long} is also produced by '{other}'"),
                });
            }
        }
    }
    Ok(())
}

struct Walker {
    /// Schemas currently being walked, outermost first.
    stack: Vec<TypeId>,
    out: Vec<FlagSpec>,
}

enum Class {
    Nested(NestedRef),
    Leaf(FlagKind),
}

impl Walker {
    fn walk(
        &mut self,
        table: Vec<FieldShape>,
        meta: &Meta,
        defaults: &Table,
        path: &FieldPath,
    ) -> Result<(), FlagfigError> {
        for field in extract::describe(table, meta, defaults, path)? {
            let child = path.child(field.key);
            debug!(name = %child.name, dest = %child.dest, shape = %field.shape, "schema field");

            match classify(&field.shape) {
                Some(Class::Nested(nested)) => self.descend(nested, &field, defaults, &child)?,
                Some(Class::Leaf(kind)) => {
                    debug!(name = %child.name, ?kind, default = ?field.default, "leaf flag");
                    self.out.push(FlagSpec {
                        name: child.name,
                        dest: child.dest,
                        kind,
                        help: field.help(),
                        default: field.default,
                    });
                }
                None => {
                    return Err(FlagfigError::UnsupportedFieldShape {
                        path: child.key_path().to_string(),
                        shape: field.shape.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn descend(
        &mut self,
        nested: NestedRef,
        field: &FieldDescriptor,
        defaults: &Table,
        child: &FieldPath,
    ) -> Result<(), FlagfigError> {
        if self.stack.contains(&nested.type_id) {
            return Err(FlagfigError::SchemaCycle {
                path: child.key_path().to_string(),
                schema: nested.short_name().to_string(),
            });
        }

        let meta = extract::nested_meta(field, &nested, child)?;
        let sub_defaults = defaults
            .get(field.key)
            .and_then(|v| v.as_table())
            .ok_or_else(|| FlagfigError::PathStructure {
                path: child.dest.clone(),
                segment: field.key.to_string(),
            })?;

        self.stack.push(nested.type_id);
        self.walk((nested.fields)(), meta, sub_defaults, child)?;
        self.stack.pop();
        Ok(())
    }
}

fn classify(shape: &TypeShape) -> Option<Class> {
    match shape {
        TypeShape::Nested(nested) => Some(Class::Nested(*nested)),
        TypeShape::Optional(inner) => match inner.as_ref() {
            TypeShape::Nested(_) | TypeShape::Optional(_) | TypeShape::Sequence(_) => None,
            leaf => classify_leaf(leaf),
        },
        leaf => classify_leaf(leaf),
    }
}

fn classify_leaf(shape: &TypeShape) -> Option<Class> {
    match shape {
        TypeShape::Boolean => Some(Class::Leaf(FlagKind::Boolean)),
        TypeShape::Primitive(kind) => Some(Class::Leaf(FlagKind::Typed(*kind))),
        TypeShape::Choice(variants) => Some(Class::Leaf(FlagKind::Choice(*variants))),
        TypeShape::Nested(_) | TypeShape::Optional(_) | TypeShape::Sequence(_) => None,
    }
}
