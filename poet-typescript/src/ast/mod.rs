//! TypeScript declaration builders.
//!
//! Each builder only holds data. Rendering goes through [`Code`], so type
//! names inside a declaration are imported and aliased like any other
//! placeholder.

use tspoet_codegen::Code;

mod doc;
mod function;
mod interface;
mod modifier;
mod parameter;
mod property;

pub use function::{FunctionKind, FunctionSpec};
pub use interface::InterfaceSpec;
pub use modifier::Modifier;
pub use parameter::ParameterSpec;
pub use property::PropertySpec;

/// A declaration that can be turned into a [`Code`] template.
pub trait Renderable {
    fn to_code(&self) -> Code;

    /// Render as a complete unit with default settings.
    fn render(&self) -> eyre::Result<String> {
        Ok(self.to_code().to_file_string()?)
    }
}
