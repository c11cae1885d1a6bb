//! Composition and symbol resolution for generated TypeScript.
//!
//! Templates are built as [`Code`] trees of literal text and placeholders.
//! Rendering a tree resolves every symbol it contains to a collision-free
//! local name, emits each referenced [`ConditionalOutput`] exactly once at
//! its declaration site and produces the import block the body needs.
//!
//! # Module Organization
//!
//! - [`builder`] - Indentation-aware text writer (CodeWriter, Indent)
//! - [`Code`] - Templates, placeholders and the two-pass render
//! - [`Symbol`] - Importable and locally defined names, spec parsing
//! - [`ReferenceTracker`] - Alias assignment and recorded imports
//! - [`TypeName`] - TypeScript type expressions
//! - [`ConditionalOutput`] - Declarations emitted only when referenced
//! - [`RenderConfig`] - Indentation, quoting and module settings

pub mod builder;

mod code;
mod conditional;
mod config;
mod error;
mod imports;
mod symbol;
mod tracker;
mod types;

pub use code::{Code, List, Placeholder, RenderContext, Rendered};
pub use conditional::{
    ConditionalId, ConditionalOutput, ConditionalRegistry, OutputState, conditional_output,
};
pub use config::{Quote, RenderConfig, TYPESCRIPT_RESERVED_WORDS};
pub use error::{Error, Result};
pub use imports::ImportBlock;
pub use symbol::{ImportStyle, Origin, Symbol, SymbolId, def, imp, is_identifier};
pub use tracker::{ImportEntry, ReferenceTracker};
pub use types::{Bound, BoundModifier, Combiner, Member, TypeName, TypeVariable};
