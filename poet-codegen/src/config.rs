//! Render configuration.

use std::path::Path;

use miette::{NamedSource, SourceSpan};
use serde::Deserialize;

use crate::{
    builder::Indent,
    error::{Error, Result},
};

/// TypeScript reserved words that can never be used as binding names.
pub const TYPESCRIPT_RESERVED_WORDS: &[&str] = &[
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "new",
    "null",
    "return",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
];

/// Quote character used for module specifiers in import statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quote {
    #[default]
    Double,
    Single,
}

impl Quote {
    /// Wrap `text` in this quote character.
    pub fn wrap(&self, text: &str) -> String {
        match self {
            Quote::Double => format!("\"{text}\""),
            Quote::Single => format!("'{text}'"),
        }
    }
}

/// Settings for one render.
///
/// Every key is optional when loading from TOML:
///
/// ```toml
/// indent = 4
/// quote = "single"
/// module-path = "./models/user"
/// reserved-words = ["delete"]
/// trailing-newline = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RenderConfig {
    /// Spaces per indent level.
    pub indent: u8,
    /// Indent with tabs instead of spaces.
    pub tabs: bool,
    pub quote: Quote,
    /// Module path of the unit being rendered; symbols from it are not imported.
    pub module_path: Option<String>,
    /// Names that imports may never print unaliased.
    pub reserved_words: Vec<String>,
    pub trailing_newline: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            tabs: false,
            quote: Quote::Double,
            module_path: None,
            reserved_words: Vec::new(),
            trailing_newline: true,
        }
    }
}

impl RenderConfig {
    /// Default settings with the TypeScript reserved words preloaded.
    pub fn typescript() -> Self {
        Self {
            reserved_words: TYPESCRIPT_RESERVED_WORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
            ..Self::default()
        }
    }

    /// Parse settings from TOML source; `filename` is used in diagnostics.
    pub fn from_toml_str(src: &str, filename: &str) -> Result<Self> {
        toml::from_str(src).map_err(|source| {
            let span = source.span().map(SourceSpan::from);
            Box::new(Error::Parse {
                src: NamedSource::new(filename, src.to_string()),
                span,
                source,
            })
        })
    }

    /// Load settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;
        Self::from_toml_str(&src, &path.display().to_string())
    }

    /// Set the module path of the unit being rendered.
    pub fn with_module_path(mut self, path: impl Into<String>) -> Self {
        self.module_path = Some(path.into());
        self
    }

    /// The indentation unit these settings describe.
    pub fn indent(&self) -> Indent {
        Indent::from_settings(self.indent, self.tabs)
    }
}
