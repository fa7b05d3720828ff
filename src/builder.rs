use std::marker::PhantomData;

#[cfg(feature = "clap")]
use std::ffi::OsString;

use serde::Deserialize;
use toml::Table;
use tracing::debug;

use crate::error::FlagfigError;
use crate::path::{self, FieldPath};
use crate::resolve;
use crate::schema::Schema;
use crate::types::{FlagSpec, ParsedResult};
use crate::walk;

/// Entry point for deriving a flag surface from a config struct.
pub struct Flagfig;

impl Flagfig {
    pub fn builder<C: Schema>() -> FlagfigBuilder<C> {
        FlagfigBuilder::new()
    }
}

/// Builder for a [`FlagSurface`].
pub struct FlagfigBuilder<C: Schema> {
    app_name: Option<String>,
    flag_prefix: Option<String>,
    defaults: Option<C>,
}

impl<C: Schema> FlagfigBuilder<C> {
    fn new() -> Self {
        Self {
            app_name: None,
            flag_prefix: None,
            defaults: None,
        }
    }

    /// Name of the command built by [`FlagSurface::command`] and used by
    /// [`FlagSurface::try_parse_from`] (default: `"app"`).
    pub fn app_name(mut self, name: &str) -> Self {
        self.app_name = Some(name.to_string());
        self
    }

    /// Put a prefix in front of every flag name: `"model"` turns `--optim`
    /// into `--model-optim`. Destination paths are unaffected.
    pub fn flag_prefix(mut self, prefix: &str) -> Self {
        self.flag_prefix = Some(prefix.to_string());
        self
    }

    /// Use `config` as the defaults instead of the struct's `#[config(default)]`
    /// values.
    pub fn defaults(mut self, config: C) -> Self {
        self.defaults = Some(config);
        self
    }

    /// Serialize the defaults and walk the schema.
    ///
    /// Every schema error (unsupported shapes, mismatched tables, cycles)
    /// surfaces here, before any flag is registered. So does a flag prefix
    /// that cannot start a long flag name.
    pub fn build(self) -> Result<FlagSurface<C>, FlagfigError> {
        if let Some(prefix) = &self.flag_prefix {
            path::check_prefix(prefix)?;
        }
        let config = match self.defaults {
            Some(config) => config,
            None => C::builder().load()?,
        };
        let base = resolve::serialize_defaults(&config)?;
        let root = FieldPath::root(self.flag_prefix.as_deref());
        let specs = walk::walk_schema::<C>(&base, root)?;
        debug!(flags = specs.len(), "flag surface built");

        Ok(FlagSurface {
            app_name: self.app_name.unwrap_or_else(|| "app".to_string()),
            specs,
            base,
            _phantom: PhantomData,
        })
    }
}

/// The flags derived from config struct `C`, plus its serialized defaults.
#[derive(Debug, Clone)]
pub struct FlagSurface<C> {
    app_name: String,
    specs: Vec<FlagSpec>,
    base: Table,
    _phantom: PhantomData<C>,
}

impl<C: Schema> FlagSurface<C>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    /// One spec per leaf field, in declaration order.
    pub fn specs(&self) -> &[FlagSpec] {
        &self.specs
    }

    /// The serialized defaults that parsed values are folded into.
    pub fn base(&self) -> &Table {
        &self.base
    }

    /// Fold parsed values onto a copy of the defaults and validate the result.
    pub fn resolve(&self, parsed: &ParsedResult) -> Result<C, FlagfigError> {
        resolve::resolve::<C>(self.base.clone(), parsed)
    }

    /// Register the flags on an existing command.
    #[cfg(feature = "clap")]
    pub fn augment(&self, cmd: clap::Command) -> clap::Command {
        crate::emit::register(cmd, &self.specs)
    }

    /// A command with nothing but the derived flags.
    #[cfg(feature = "clap")]
    pub fn command(&self) -> clap::Command {
        self.augment(clap::Command::new(self.app_name.clone()))
    }

    /// Collect the flag values from `matches` and resolve the config.
    ///
    /// `matches` must come from a command that went through
    /// [`augment`](Self::augment).
    #[cfg(feature = "clap")]
    pub fn from_matches(&self, matches: &clap::ArgMatches) -> Result<C, FlagfigError> {
        let parsed = crate::emit::collect(matches, &self.specs)?;
        self.resolve(&parsed)
    }

    /// Parse `args` (including the binary name) and resolve the config.
    #[cfg(feature = "clap")]
    pub fn try_parse_from<I, T>(&self, args: I) -> Result<C, FlagfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command()
            .try_get_matches_from(args)
            .map_err(|e| crate::emit::map_parse_error(e, &self.specs))?;
        self.from_matches(&matches)
    }

    /// Like [`try_parse_from`](Self::try_parse_from), but prints the error
    /// and exits the process on failure.
    #[cfg(feature = "clap")]
    pub fn parse_from<I, T>(&self, args: I) -> C
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.try_parse_from(args).unwrap_or_else(|e| e.exit())
    }
}
