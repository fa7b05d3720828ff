//! Command-line flags derived from nested config structs.
//!
//! Flagfig walks a [confique](https://docs.rs/confique) config struct and
//! registers one flag per leaf field. After parsing, it folds the flat flag
//! values back into the nested defaults and hands you a validated struct.
//!
//! ```ignore
//! let options: Options = Flagfig::builder::<Options>()
//!     .build()?
//!     .parse_from(std::env::args_os());
//! ```
//!
//! # Flag surface
//!
//! Every leaf field gets a flag named after its position in the tree.
//! Underscores in keys become hyphens, and nesting levels are joined with `-`:
//!
//! | Field              | Type   | Flags                               |
//! |--------------------|--------|-------------------------------------|
//! | `optim`            | `String` | `--optim <STR>`                   |
//! | `bool_value`       | `bool` | `--bool-value`, `--no-bool-value`   |
//! | `train.batch_size` | `u32`  | `--train-batch-size <INT>`          |
//!
//! Flags that are not passed keep the struct's default. Booleans always get
//! both forms, and the last one on the command line wins. `Option<T>` fields
//! are exposed as plain `T` flags whose default may be "unset". Unit-variant
//! enums can be exposed as choice flags restricted to their serialized names.
//!
//! Each flag also has a destination path (`.train.batch_size`). Destination
//! paths key the flat parse result and address the leaf to overwrite when the
//! values are folded back. Both directions share one codec in the `path`
//! module.
//!
//! # Declaring a schema
//!
//! confique knows field names, docs and defaults but not field types, so each
//! config struct also implements [`Schema`] with a static shape table:
//!
//! ```ignore
//! #[derive(Config, Serialize, Deserialize)]
//! struct Options {
//!     /// Optimizer name.
//!     #[config(default = "sgd")]
//!     optim: String,
//!     #[config(nested)]
//!     train: Train,
//! }
//!
//! impl Schema for Options {
//!     fn fields() -> Vec<FieldShape> {
//!         vec![
//!             FieldShape::of::<String>("optim"),
//!             FieldShape::nested::<Train>("train"),
//!         ]
//!     }
//! }
//! ```
//!
//! When the surface is built, the table is checked against confique's
//! metadata. A field that is missing from the table, a key that is not in the
//! struct, and a leaf/nested disagreement are all errors, so no field is ever
//! skipped silently. Doc comments become the flags' help text.
//!
//! # Unsupported shapes
//!
//! Sequences, optional nested structs and nested options have no flag
//! representation. They fail [`build()`](FlagfigBuilder::build) with
//! [`FlagfigError::UnsupportedFieldShape`], naming the field. A shape table
//! that nests a struct inside itself fails with
//! [`FlagfigError::SchemaCycle`].
//!
//! # Pipeline
//!
//! ```text
//! defaults  ──serialize──▶  toml::Table (base)
//! schema    ──walk──────▶  [FlagSpec] ──register──▶ clap::Command
//! argv      ──clap──────▶  ArgMatches ──collect───▶ ParsedResult
//! base + ParsedResult ──assign──▶ toml::Table ──confique──▶ C
//! ```
//!
//! The last step re-validates the merged table through confique. A value the
//! parser accepted but the field cannot hold (`--port 70000` for a `u16`) is
//! therefore still rejected.
//!
//! # Clap adapter
//!
//! Registration and collection live in the `emit` module, behind the `clap`
//! Cargo feature (on by default). [`FlagSurface::augment`] adds the flags to
//! an existing `clap::Command`, and [`FlagSurface::from_matches`] resolves
//! the config from its matches. Without the feature you can still walk the
//! schema, build a [`ParsedResult`] any way you like, and call
//! [`FlagSurface::resolve`].
//!
//! # Error handling
//!
//! All fallible operations return [`FlagfigError`]. Schema errors surface
//! when the surface is built. A flag value that cannot be converted surfaces
//! while parsing, as [`FlagfigError::ValueConversion`] naming the flag. A
//! parse result that does not fit the defaults' structure surfaces while
//! resolving and aborts the whole resolution. See the [`error`] module.

pub mod error;
pub mod types;

mod assign;
mod builder;
#[cfg(feature = "clap")]
pub mod emit;
mod extract;
pub mod path;
mod resolve;
pub mod schema;
mod walk;

#[cfg(test)]
mod fixtures;

pub use assign::assign;
pub use builder::{FlagSurface, Flagfig, FlagfigBuilder};
pub use error::FlagfigError;
pub use resolve::{resolve, serialize_defaults};
pub use schema::{FieldShape, PrimitiveKind, Schema, Shaped, TypeShape};
pub use types::{FlagKind, FlagSpec, ParsedResult};
pub use walk::walk_schema;
