//! Resolution: fold parsed values into the defaults and produce a typed config.
//!
//! Operates on plain data with no parser involved, so the pipeline is testable
//! with synthetic parse results. Steps:
//!
//! 1. Reverse-assign the parsed values onto the serialized defaults
//! 2. Deserialize the merged table into `C::Layer`
//! 3. Let confique fill remaining defaults and validate required fields

use confique::Config;
use serde::{Deserialize, Serialize};
use toml::{Table, Value};

use crate::assign;
use crate::error::FlagfigError;
use crate::types::ParsedResult;

/// Serialize a config instance into the base structure for [`resolve`].
pub fn serialize_defaults<C: Config + Serialize>(config: &C) -> Result<Table, FlagfigError> {
    let value = Value::try_from(config).map_err(|e| FlagfigError::InvalidValue {
        key: "<defaults>".into(),
        reason: e.to_string(),
    })?;
    match value {
        Value::Table(table) => Ok(table),
        _ => Err(FlagfigError::InvalidValue {
            key: "<defaults>".into(),
            reason: "config did not serialize to a table".into(),
        }),
    }
}

/// Resolve a config from its serialized defaults and the parsed flag values.
pub fn resolve<C: Config>(mut base: Table, parsed: &ParsedResult) -> Result<C, FlagfigError>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    // 1: Parsed values on top of the defaults
    assign::assign(&mut base, parsed)?;

    // 2: Deserialize into C::Layer
    let layer: C::Layer = Value::Table(base)
        .try_into()
        .map_err(|e: toml::de::Error| FlagfigError::InvalidValue {
            key: "<merged>".into(),
            reason: e.to_string(),
        })?;

    // 3: confique fills defaults and validates required fields
    C::builder()
        .preloaded(layer)
        .load()
        .map_err(FlagfigError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{Options, TestConfig, defaults_of};

    fn parsed(pairs: &[(&str, Value)]) -> ParsedResult {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn defaults_only() {
        let config: Options = resolve(defaults_of::<Options>(), &ParsedResult::new()).unwrap();
        assert_eq!(config.optim, "sgd");
        assert!(config.bool_value);
        assert_eq!(config.train.batch_size, 4);
        assert_eq!(config.val.batch_size, 8);
    }

    #[test]
    fn selective_override() {
        let config: Options = resolve(
            defaults_of::<Options>(),
            &parsed(&[(".train.batch_size", Value::Integer(16))]),
        )
        .unwrap();
        assert_eq!(config.train.batch_size, 16);
        assert_eq!(config.val.batch_size, 8);
        assert_eq!(config.optim, "sgd");
        assert!(config.bool_value);
    }

    #[test]
    fn optional_field_set() {
        let config: TestConfig = resolve(
            defaults_of::<TestConfig>(),
            &parsed(&[
                (".database.url", Value::String("pg://".into())),
                (".database.verbose", Value::Boolean(true)),
            ]),
        )
        .unwrap();
        assert_eq!(config.database.url.as_deref(), Some("pg://"));
        assert_eq!(config.database.verbose, Some(true));
        assert_eq!(config.database.pool_size, 5);
    }

    #[test]
    fn out_of_range_is_rejected_by_revalidation() {
        let result: Result<TestConfig, _> = resolve(
            defaults_of::<TestConfig>(),
            &parsed(&[(".port", Value::Integer(70000))]),
        );
        assert!(matches!(result, Err(FlagfigError::InvalidValue { .. })));
    }

    #[test]
    fn wrong_type_is_rejected_by_revalidation() {
        let result: Result<Options, _> = resolve(
            defaults_of::<Options>(),
            &parsed(&[(".train.batch_size", Value::String("many".into()))]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn structural_violation_aborts() {
        let result: Result<Options, _> = resolve(
            defaults_of::<Options>(),
            &parsed(&[(".missing.batch_size", Value::Integer(1))]),
        );
        assert!(matches!(result, Err(FlagfigError::PathStructure { .. })));
    }

    #[test]
    fn serialize_defaults_mirrors_schema() {
        let config = Options::builder().load().unwrap();
        let table = serialize_defaults(&config).unwrap();
        assert_eq!(table["optim"].as_str(), Some("sgd"));
        assert_eq!(table["train"]["batch_size"].as_integer(), Some(4));
    }

    #[test]
    fn serialize_defaults_omits_unset_optionals() {
        let table = defaults_of::<TestConfig>();
        let db = table["database"].as_table().unwrap();
        assert!(!db.contains_key("url"));
        assert_eq!(db["pool_size"].as_integer(), Some(5));
    }
}
