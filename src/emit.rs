//! Clap adapter: register [`FlagSpec`]s on a `clap::Command` and collect the
//! parsed values back into a [`ParsedResult`].
//!
//! Compiled only with the `clap` Cargo feature (on by default). The walker
//! and the reverse assigner do not depend on clap, so another parser can be
//! plugged in by producing a [`ParsedResult`] some other way.
//!
//! Each flag's clap id is its destination path. Defaults are not handed to
//! clap: an absent flag simply has no match, and [`collect`] falls back to
//! the default stored in the spec. That keeps typed defaults exact instead of
//! round-tripping them through strings.

use std::any::Any;

use clap::builder::PossibleValuesParser;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use toml::Value;
use tracing::debug;

use crate::error::FlagfigError;
use crate::path::SEPARATOR;
use crate::schema::PrimitiveKind;
use crate::types::{FlagKind, FlagSpec, ParsedResult, format_value};

/// Suffix of the clap id of the disabling form of a boolean flag.
const NEGATED_ID_SUFFIX: &str = "#no";

fn negated_id(spec: &FlagSpec) -> String {
    format!("{}{NEGATED_ID_SUFFIX}", spec.dest)
}

/// Register every spec on `cmd`.
pub fn register(mut cmd: Command, specs: &[FlagSpec]) -> Command {
    for spec in specs {
        debug!(name = %spec.name, dest = %spec.dest, kind = ?spec.kind, "register flag");
        cmd = match spec.kind {
            FlagKind::Boolean => register_bool(cmd, spec),
            FlagKind::Typed(kind) => register_typed(cmd, spec, kind),
            FlagKind::Choice(variants) => register_choice(cmd, spec, variants),
        };
    }
    cmd
}

fn help_text(spec: &FlagSpec) -> String {
    let doc = spec.help.clone().unwrap_or_default();
    match &spec.default {
        Some(default) if doc.is_empty() => format!("[default: {}]", format_value(default)),
        Some(default) => format!("{doc} [default: {}]", format_value(default)),
        None => doc,
    }
}

fn register_bool(cmd: Command, spec: &FlagSpec) -> Command {
    let negated = negated_id(spec);
    cmd.arg(
        Arg::new(spec.dest.clone())
            .long(spec.long().to_string())
            .action(ArgAction::SetTrue)
            .overrides_with(negated.clone())
            .help(help_text(spec)),
    )
    .arg(
        Arg::new(negated)
            .long(spec.negated_long())
            .action(ArgAction::SetTrue)
            .overrides_with(spec.dest.clone())
            .help(format!("Disable {}", spec.name)),
    )
}

fn register_typed(cmd: Command, spec: &FlagSpec, kind: PrimitiveKind) -> Command {
    let arg = Arg::new(spec.dest.clone())
        .long(spec.long().to_string())
        .action(ArgAction::Set)
        .value_name(kind.value_name())
        .help(help_text(spec));
    let arg = match kind {
        PrimitiveKind::Str => arg.value_parser(value_parser!(String)),
        PrimitiveKind::Int => arg.value_parser(value_parser!(i64)),
        PrimitiveKind::Float => arg.value_parser(value_parser!(f64)),
    };
    cmd.arg(arg)
}

fn register_choice(cmd: Command, spec: &FlagSpec, variants: &'static [&'static str]) -> Command {
    cmd.arg(
        Arg::new(spec.dest.clone())
            .long(spec.long().to_string())
            .action(ArgAction::Set)
            .value_name("CHOICE")
            .value_parser(PossibleValuesParser::new(variants.iter().copied()))
            .help(help_text(spec)),
    )
}

/// Collect one value per registered leaf: the supplied one, else the default.
///
/// Leaves that were not supplied and have no default get no entry, so an
/// unset optional field stays unset. `matches` must come from a command the
/// specs were registered on; a missing or differently typed argument is a
/// [`FlagfigError::SchemaMismatch`].
pub fn collect(matches: &ArgMatches, specs: &[FlagSpec]) -> Result<ParsedResult, FlagfigError> {
    let mut parsed = ParsedResult::new();
    for spec in specs {
        let supplied = match spec.kind {
            FlagKind::Boolean => collect_bool(matches, spec)?,
            FlagKind::Typed(PrimitiveKind::Str) | FlagKind::Choice(_) => {
                get_one::<String>(matches, spec, &spec.dest)?.map(|v| Value::String(v.clone()))
            }
            FlagKind::Typed(PrimitiveKind::Int) => {
                get_one::<i64>(matches, spec, &spec.dest)?.map(|v| Value::Integer(*v))
            }
            FlagKind::Typed(PrimitiveKind::Float) => {
                get_one::<f64>(matches, spec, &spec.dest)?.map(|v| Value::Float(*v))
            }
        };
        if let Some(value) = supplied.or_else(|| spec.default.clone()) {
            parsed.insert(spec.dest.clone(), value);
        }
    }
    Ok(parsed)
}

fn get_one<'m, T: Any + Clone + Send + Sync + 'static>(
    matches: &'m ArgMatches,
    spec: &FlagSpec,
    id: &str,
) -> Result<Option<&'m T>, FlagfigError> {
    matches
        .try_get_one::<T>(id)
        .map_err(|e| FlagfigError::SchemaMismatch {
            path: spec.dest.trim_start_matches(SEPARATOR).to_string(),
            reason: format!("flag {} cannot be read from the matches: {e}", spec.name),
        })
}

fn collect_bool(matches: &ArgMatches, spec: &FlagSpec) -> Result<Option<Value>, FlagfigError> {
    let negated = negated_id(spec);
    let on = supplied_at(matches, spec, &spec.dest)?;
    let off = supplied_at(matches, spec, &negated)?;
    Ok(match (on, off) {
        (Some(on), Some(off)) => Some(Value::Boolean(on > off)),
        (Some(_), None) => Some(Value::Boolean(true)),
        (None, Some(_)) => Some(Value::Boolean(false)),
        (None, None) => None,
    })
}

/// Command-line index of a switch, if the user passed it.
fn supplied_at(
    matches: &ArgMatches,
    spec: &FlagSpec,
    id: &str,
) -> Result<Option<usize>, FlagfigError> {
    // Checks the id first: `value_source` and `index_of` panic on unknown ids.
    get_one::<bool>(matches, spec, id)?;
    Ok(match matches.value_source(id) {
        Some(ValueSource::CommandLine) => matches.index_of(id),
        _ => None,
    })
}

/// Map a clap error to [`FlagfigError`], naming the flag for conversion
/// failures.
pub fn map_parse_error(err: clap::Error, specs: &[FlagSpec]) -> FlagfigError {
    if !matches!(err.kind(), ErrorKind::ValueValidation | ErrorKind::InvalidValue) {
        return FlagfigError::Cli(err);
    }
    let flag = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => arg.clone(),
        _ => {
            let rendered = err.to_string();
            specs
                .iter()
                .filter(|s| rendered.contains(&s.name))
                .max_by_key(|s| s.name.len())
                .map(|s| s.name.clone())
                .unwrap_or_else(|| "<unknown flag>".to_string())
        }
    };
    FlagfigError::ValueConversion { flag, source: err }
}
