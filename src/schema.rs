//! Static field-shape tables for config structs.
//!
//! confique knows the names, docs and defaults of a struct's fields, but not
//! their Rust types. A [`Schema`] impl fills that gap with an explicit table,
//! one [`FieldShape`] per field in declaration order:
//!
//! ```ignore
//! impl Schema for Options {
//!     fn fields() -> Vec<FieldShape> {
//!         vec![
//!             FieldShape::of::<String>("optim"),
//!             FieldShape::of::<bool>("bool_value"),
//!             FieldShape::nested::<Train>("train"),
//!         ]
//!     }
//! }
//! ```
//!
//! The table is checked against confique's `Meta` when the flag surface is
//! built, so a field cannot be forgotten or misspelled without an error.

use std::any::TypeId;
use std::fmt;
use std::path::PathBuf;

use confique::Config;
use confique::meta::Meta;
use serde::Serialize;

/// A config struct whose fields can be turned into command-line flags.
pub trait Schema: Config + Serialize + 'static {
    /// The shape of every field, in declaration order.
    fn fields() -> Vec<FieldShape>;
}

/// Scalar kinds a typed flag can be parsed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Str,
    Int,
    Float,
}

impl PrimitiveKind {
    /// Placeholder shown in usage, e.g. `--port <INT>`.
    pub fn value_name(self) -> &'static str {
        match self {
            PrimitiveKind::Str => "STR",
            PrimitiveKind::Int => "INT",
            PrimitiveKind::Float => "FLOAT",
        }
    }
}

/// The declared type of one field.
#[derive(Debug, Clone)]
pub enum TypeShape {
    Primitive(PrimitiveKind),
    Boolean,
    /// A string restricted to a fixed set of values (unit-variant enums).
    Choice(&'static [&'static str]),
    Nested(NestedRef),
    Optional(Box<TypeShape>),
    Sequence(Box<TypeShape>),
}

impl TypeShape {
    pub fn nested<S: Schema>() -> Self {
        TypeShape::Nested(NestedRef::of::<S>())
    }

    pub fn optional(inner: TypeShape) -> Self {
        TypeShape::Optional(Box::new(inner))
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeShape::Primitive(PrimitiveKind::Str) => write!(f, "str"),
            TypeShape::Primitive(PrimitiveKind::Int) => write!(f, "int"),
            TypeShape::Primitive(PrimitiveKind::Float) => write!(f, "float"),
            TypeShape::Boolean => write!(f, "bool"),
            TypeShape::Choice(variants) => write!(f, "choice[{}]", variants.join("|")),
            TypeShape::Nested(nested) => write!(f, "nested {}", nested.short_name()),
            TypeShape::Optional(inner) => write!(f, "option<{inner}>"),
            TypeShape::Sequence(inner) => write!(f, "vec<{inner}>"),
        }
    }
}

/// Lazy reference to a sub-schema.
///
/// The sub-schema's table is only built when the walker descends into it,
/// which lets the walker reject a cyclic declaration instead of recursing
/// forever while building it. `meta` is compared against the metadata
/// confique records for the field, so a table cannot point at the wrong
/// struct.
#[derive(Clone, Copy)]
pub struct NestedRef {
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub meta: Meta,
    pub fields: fn() -> Vec<FieldShape>,
}

impl NestedRef {
    pub fn of<S: Schema>() -> Self {
        NestedRef {
            type_id: TypeId::of::<S>(),
            type_name: std::any::type_name::<S>(),
            meta: S::META,
            fields: S::fields,
        }
    }

    /// Type name without its module path.
    pub fn short_name(&self) -> &'static str {
        self.type_name.rsplit("::").next().unwrap_or(self.type_name)
    }
}

impl fmt::Debug for NestedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NestedRef").field(&self.type_name).finish()
    }
}

/// One entry of a schema's field table.
#[derive(Debug, Clone)]
pub struct FieldShape {
    pub key: &'static str,
    pub shape: TypeShape,
}

impl FieldShape {
    pub fn new(key: &'static str, shape: TypeShape) -> Self {
        FieldShape { key, shape }
    }

    /// A field whose shape follows from its Rust type.
    pub fn of<T: Shaped>(key: &'static str) -> Self {
        FieldShape::new(key, T::shape())
    }

    /// A `#[config(nested)]` field.
    pub fn nested<S: Schema>(key: &'static str) -> Self {
        FieldShape::new(key, TypeShape::nested::<S>())
    }

    /// A field backed by a unit-variant enum, serialized as one of `variants`.
    pub fn choice(key: &'static str, variants: &'static [&'static str]) -> Self {
        FieldShape::new(key, TypeShape::Choice(variants))
    }
}

/// Maps a Rust field type to its [`TypeShape`].
pub trait Shaped {
    fn shape() -> TypeShape;
}

macro_rules! shaped {
    ($shape:expr => $($ty:ty),+) => {
        $(
            impl Shaped for $ty {
                fn shape() -> TypeShape {
                    $shape
                }
            }
        )+
    };
}

shaped!(TypeShape::Primitive(PrimitiveKind::Str) => String, PathBuf, char);
shaped!(TypeShape::Primitive(PrimitiveKind::Int) =>
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
shaped!(TypeShape::Primitive(PrimitiveKind::Float) => f32, f64);
shaped!(TypeShape::Boolean => bool);

impl<T: Shaped> Shaped for Option<T> {
    fn shape() -> TypeShape {
        TypeShape::optional(T::shape())
    }
}

impl<T: Shaped> Shaped for Vec<T> {
    fn shape() -> TypeShape {
        TypeShape::Sequence(Box::new(T::shape()))
    }
}
