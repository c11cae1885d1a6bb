//! Text building blocks for the composition engine.
//!
//! - [`CodeWriter`] - Line-aware writer that reapplies indentation per line
//! - [`Indent`] - Indentation configuration

mod indent;
mod writer;

pub use indent::Indent;
pub use writer::CodeWriter;
