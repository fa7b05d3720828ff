use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlagfigError {
    #[error("Unsupported shape '{shape}' for field '{path}'")]
    UnsupportedFieldShape { path: String, shape: String },

    #[error("Schema mismatch at '{path}': {reason}")]
    SchemaMismatch { path: String, reason: String },

    #[error("Schema cycle: '{path}' nests {schema}, which is already being walked")]
    SchemaCycle { path: String, schema: String },

    #[cfg(feature = "clap")]
    #[error("Invalid value for {flag}: {source}")]
    ValueConversion { flag: String, source: clap::Error },

    #[cfg(feature = "clap")]
    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("Destination path '{path}' does not match the base structure at segment '{segment}'")]
    PathStructure { path: String, segment: String },

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(#[from] confique::Error),
}

impl FlagfigError {
    /// Print the error and terminate the process.
    ///
    /// Parser errors go through clap so the user sees usage and the usual exit
    /// code. Everything else is printed to stderr with exit code 1.
    pub fn exit(self) -> ! {
        match self {
            #[cfg(feature = "clap")]
            FlagfigError::ValueConversion { source, .. } | FlagfigError::Cli(source) => {
                source.exit()
            }
            other => {
                eprintln!("error: {other}");
                std::process::exit(1)
            }
        }
    }
}
