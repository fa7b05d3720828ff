//! Flag names and destination paths.
//!
//! Both sides of the mapping go through this module: the walker builds paths
//! with [`FieldPath::child`], the reverse assigner takes them apart with
//! [`split_dest`].
//!
//! | Field           | Flag name            | Destination         |
//! |-----------------|----------------------|---------------------|
//! | `optim`         | `--optim`            | `.optim`            |
//! | `train.batch_size` | `--train-batch-size` | `.train.batch_size` |
//!
//! A destination always starts with the separator because the root
//! destination prefix is empty. Keys are not escaped; they must not contain
//! `.` or spaces.

use crate::error::FlagfigError;

/// Separator between destination segments.
pub const SEPARATOR: char = '.';

/// Leading token of every flag name when no prefix is configured.
pub const ROOT_NAME: &str = "-";

/// Flag name and destination of a schema position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    pub name: String,
    pub dest: String,
}

impl FieldPath {
    /// The root position. With a prefix such as `"model"`, every flag name
    /// starts with `--model-`.
    pub fn root(prefix: Option<&str>) -> Self {
        let name = match prefix {
            Some(prefix) => format!("--{}", hyphenate(prefix)),
            None => ROOT_NAME.to_string(),
        };
        FieldPath {
            name,
            dest: String::new(),
        }
    }

    pub fn child(&self, key: &str) -> Self {
        FieldPath {
            name: format!("{}-{}", self.name, hyphenate(key)),
            dest: format!("{}{SEPARATOR}{key}", self.dest),
        }
    }

    /// Dotted key without the leading separator, e.g. `train.batch_size`.
    pub fn key_path(&self) -> &str {
        self.dest.trim_start_matches(SEPARATOR)
    }
}

/// Reject a flag prefix that would not produce a valid long flag name.
pub fn check_prefix(prefix: &str) -> Result<(), FlagfigError> {
    let reason = if prefix.is_empty() {
        "must not be empty"
    } else if prefix.starts_with('-') {
        "must not start with '-'"
    } else if prefix.chars().any(char::is_whitespace) {
        "must not contain whitespace"
    } else {
        return Ok(());
    };
    Err(FlagfigError::InvalidValue {
        key: "flag_prefix".to_string(),
        reason: format!("'{prefix}' {reason}"),
    })
}

pub fn hyphenate(key: &str) -> String {
    key.replace('_', "-")
}

/// Split a destination into its intermediate segments and its leaf.
///
/// The leading empty segment is dropped. A destination that does not start
/// with the separator, or has an empty segment, was not produced by
/// [`FieldPath::child`].
pub fn split_dest(dest: &str) -> Result<(Vec<&str>, &str), FlagfigError> {
    let invalid = |segment: &str| FlagfigError::PathStructure {
        path: dest.to_string(),
        segment: segment.to_string(),
    };

    let mut segments = dest.split(SEPARATOR);
    match segments.next() {
        Some("") => {}
        Some(first) => return Err(invalid(first)),
        None => return Err(invalid("")),
    }

    let mut parents: Vec<&str> = segments.collect();
    let leaf = parents.pop().ok_or_else(|| invalid(""))?;
    if leaf.is_empty() || parents.iter().any(|s| s.is_empty()) {
        return Err(invalid(""));
    }
    Ok((parents, leaf))
}
