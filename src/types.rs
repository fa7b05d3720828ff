use std::collections::BTreeMap;

use toml::Value;

use crate::schema::PrimitiveKind;

/// Flat parser output: destination path → value.
pub type ParsedResult = BTreeMap<String, Value>;

/// How a leaf field is exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// `--name` / `--no-name`.
    Boolean,
    /// `--name <VALUE>`, parsed as the given kind.
    Typed(PrimitiveKind),
    /// `--name <VALUE>`, restricted to the listed strings.
    Choice(&'static [&'static str]),
}

/// One flag derived from a leaf field.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagSpec {
    /// Full flag name, e.g. `--train-batch-size`.
    pub name: String,
    /// Destination path, e.g. `.train.batch_size`.
    pub dest: String,
    pub kind: FlagKind,
    /// `None` when the field is optional and unset by default.
    pub default: Option<Value>,
    /// Field doc comment, joined into one line.
    pub help: Option<String>,
}

impl FlagSpec {
    /// Name without the leading `--`, as clap expects for `long`.
    pub fn long(&self) -> &str {
        self.name.strip_prefix("--").unwrap_or(&self.name)
    }

    /// Long name of the disabling form of a boolean flag.
    pub fn negated_long(&self) -> String {
        format!("no-{}", self.long())
    }
}

/// Format a leaf default for help text. Strings are shown unquoted.
#[cfg_attr(not(feature = "clap"), allow(dead_code))]
pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
