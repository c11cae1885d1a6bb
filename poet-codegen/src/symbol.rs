//! Symbols: names imported from another module or declared locally.

use std::{fmt, str::FromStr};

use crate::error::{Error, Result};

const MARKERS: [char; 4] = ['@', '=', '*', '+'];

/// How an imported symbol has to appear in the import block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportStyle {
    /// `import { Name } from "module"`
    Named,
    /// `import Name from "module"`
    Default,
    /// `import * as Name from "module"`
    Namespace,
    /// `import "module"`
    SideEffect,
}

/// Where a symbol is declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Origin {
    /// Declared in another module, identified by its module specifier.
    Module(String),
    /// Declared in the unit being rendered.
    Local,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Module(module) => f.write_str(module),
            Origin::Local => f.write_str("<local>"),
        }
    }
}

/// Identity of a symbol: two symbols are the same iff origin and name match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId {
    pub origin: Origin,
    pub name: String,
}

/// A name whose declaration lives outside the current unit, or one that is
/// explicitly declared inside it.
///
/// # Example
///
/// ```
/// use tspoet_codegen::{ImportStyle, Symbol};
///
/// let sym: Symbol = "Observable@rxjs".parse().unwrap();
/// assert_eq!(sym.value(), "Observable");
/// assert_eq!(sym.module(), Some("rxjs"));
/// assert_eq!(sym.style(), ImportStyle::Named);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    value: String,
    origin: Origin,
    style: ImportStyle,
    alias: Option<String>,
    type_only: bool,
    defined_in: Option<String>,
}

impl Symbol {
    fn imported(value: impl Into<String>, module: impl Into<String>, style: ImportStyle) -> Self {
        Self {
            value: value.into(),
            origin: Origin::Module(module.into()),
            style,
            alias: None,
            type_only: false,
            defined_in: None,
        }
    }

    /// A named import: `import { name } from "module"`.
    pub fn named(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self::imported(name, module, ImportStyle::Named)
    }

    /// A default import: `import name from "module"`.
    pub fn default_import(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self::imported(name, module, ImportStyle::Default)
    }

    /// A namespace import: `import * as name from "module"`.
    pub fn namespace(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self::imported(name, module, ImportStyle::Namespace)
    }

    /// A side-effect import: `import "module"`.
    pub fn side_effect(module: impl Into<String>) -> Self {
        Self::imported(String::new(), module, ImportStyle::SideEffect)
    }

    /// A name declared in the unit being rendered.
    ///
    /// Local names are claimed before any import, so an import with the same
    /// name is always the one that gets aliased.
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            value: name.into(),
            origin: Origin::Local,
            style: ImportStyle::Named,
            alias: None,
            type_only: false,
            defined_in: None,
        }
    }

    /// Parse a compact spec such as `Name@module`, `Name=module`,
    /// `Name*module`, `+module`, optionally prefixed with `t:` for a
    /// type-only import.
    pub fn parse(spec: &str) -> Result<Self> {
        let (type_only, rest) = match spec.strip_prefix("t:") {
            Some(rest) => (true, rest),
            None => (false, spec),
        };

        let Some(idx) = rest.find(MARKERS) else {
            return Err(Error::invalid_spec(spec, "missing import marker"));
        };
        let name = &rest[..idx];
        let marker = rest[idx..].chars().next().unwrap_or('@');
        let module = &rest[idx + marker.len_utf8()..];

        if module.is_empty() {
            return Err(Error::invalid_spec(spec, "missing module"));
        }
        // A dotted name imports its first segment, `rxjs.Observable*rxjs` → `rxjs`.
        let value = name.split('.').next().unwrap_or_default();
        if !value.is_empty() && !is_identifier(value) {
            return Err(Error::invalid_spec(spec, format!("'{value}' is not an identifier")));
        }

        let style = match marker {
            '=' => ImportStyle::Default,
            '*' => ImportStyle::Namespace,
            '+' => ImportStyle::SideEffect,
            _ => ImportStyle::Named,
        };
        if value.is_empty() && style != ImportStyle::SideEffect {
            return Err(Error::invalid_spec(spec, "missing symbol name"));
        }

        let mut symbol = Self::imported(value, module, style);
        symbol.type_only = type_only;
        Ok(symbol)
    }

    /// Request a specific alias for this symbol.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Mark this as a type-only import.
    pub fn type_only(mut self) -> Self {
        self.type_only = true;
        self
    }

    /// Record the module this symbol is really declared in, for re-exports.
    pub fn defined_in(mut self, module: impl Into<String>) -> Self {
        self.defined_in = Some(module.into());
        self
    }

    /// The canonical printed value.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// The module specifier for imported symbols.
    pub fn module(&self) -> Option<&str> {
        match &self.origin {
            Origin::Module(module) => Some(module),
            Origin::Local => None,
        }
    }

    pub fn style(&self) -> ImportStyle {
        self.style
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn is_type_only(&self) -> bool {
        self.type_only
    }

    pub fn declared_in(&self) -> Option<&str> {
        self.defined_in.as_deref()
    }

    pub fn is_local(&self) -> bool {
        self.origin == Origin::Local
    }

    pub fn id(&self) -> SymbolId {
        SymbolId {
            origin: self.origin.clone(),
            name: self.value.clone(),
        }
    }
}

impl FromStr for Symbol {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Creates an import from a spec string, see [`Symbol::parse`].
pub fn imp(spec: &str) -> Result<Symbol> {
    Symbol::parse(spec)
}

/// Defines `name` as declared in the rendered unit, to avoid import collisions.
pub fn def(name: impl Into<String>) -> Symbol {
    Symbol::local(name)
}

/// Check whether `name` is a valid TypeScript identifier (ASCII subset).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
