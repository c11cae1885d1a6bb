//! TypeScript declaration builders on top of `tspoet-codegen`.
//!
//! The builders here are thin: they hold a declaration's parts and turn them
//! into a [`Code`](tspoet_codegen::Code) template. Import resolution,
//! aliasing and indentation all happen in the composition engine.
//!
//! ```
//! use tspoet_codegen::TypeName;
//! use tspoet_typescript::{InterfaceSpec, Modifier, PropertySpec, Renderable};
//!
//! let user = InterfaceSpec::new("User")
//!     .modifier(Modifier::Export)
//!     .property(PropertySpec::new("createdAt", TypeName::any("Instant@@js-joda/core")));
//!
//! assert_eq!(
//!     user.render().unwrap(),
//!     "import { Instant } from \"@js-joda/core\";\n\nexport interface User {\n  createdAt: Instant;\n}\n"
//! );
//! ```

mod code_file;

pub mod ast;

pub use ast::{
    FunctionKind, FunctionSpec, InterfaceSpec, Modifier, ParameterSpec, PropertySpec, Renderable,
};
pub use code_file::CodeFile;
