use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for tspoet-codegen operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("conditional output '{name}' references itself ({})", .path.join(" -> "))]
    #[diagnostic(
        code(tspoet::conditional_cycle),
        help("a declaration body must not use the conditional output it declares")
    )]
    ConditionalCycle {
        /// Usage-site label of the node that closed the cycle.
        name: String,
        /// Reference chain, starting and ending at `name`.
        path: Vec<String>,
    },

    #[error("invalid import spec '{spec}': {reason}")]
    #[diagnostic(
        code(tspoet::invalid_import_spec),
        help("use 'Name@module', 'Name=module', 'Name*module' or '+module'")
    )]
    InvalidImportSpec { spec: String, reason: String },

    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse render configuration")]
    #[diagnostic(code(tspoet::config_parse))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    pub(crate) fn invalid_spec(spec: &str, reason: impl Into<String>) -> Box<Self> {
        Box::new(Self::InvalidImportSpec {
            spec: spec.to_string(),
            reason: reason.into(),
        })
    }

    pub(crate) fn cycle(name: impl Into<String>, path: Vec<String>) -> Box<Self> {
        Box::new(Self::ConditionalCycle {
            name: name.into(),
            path,
        })
    }

    /// Returns true if this error was raised by a conditional output cycle.
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::ConditionalCycle { .. })
    }
}
