//! A generated TypeScript source file.

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use tspoet_codegen::{Code, RenderConfig};

/// A named TypeScript module made of top-level members.
///
/// Members are separated by a blank line and share one import block, so a
/// symbol used by several members is imported once.
///
/// # Example
///
/// ```
/// use tspoet_typescript::{CodeFile, InterfaceSpec, Modifier};
///
/// let file = CodeFile::new("user")
///     .add(InterfaceSpec::new("User").modifier(Modifier::Export));
/// assert_eq!(file.render().unwrap(), "export interface User {\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeFile {
    name: String,
    config: RenderConfig,
    members: Vec<Code>,
}

impl CodeFile {
    /// Create an empty file; `name` is the path without the `.ts` extension.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: RenderConfig::typescript(),
            members: Vec::new(),
        }
    }

    /// Replace the render settings.
    pub fn config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a top-level member.
    #[allow(clippy::should_implement_trait)]
    pub fn add(mut self, member: impl Into<Code>) -> Self {
        self.members.push(member.into());
        self
    }

    /// Add multiple top-level members.
    pub fn add_all<C: Into<Code>>(mut self, members: impl IntoIterator<Item = C>) -> Self {
        self.members.extend(members.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The whole file as a single template.
    pub fn to_code(&self) -> Code {
        let mut code = Code::new();
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                code.append("\n\n");
            }
            code.append(member.clone());
        }
        code
    }

    /// Render the complete file: imports, a blank line, then the members.
    pub fn render(&self) -> Result<String> {
        Ok(self.to_code().to_file_string_with(&self.config)?)
    }

    /// Path of this file below `dir`.
    pub fn path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.ts", self.name))
    }

    /// Render and write to `<dir>/<name>.ts`, creating parent directories.
    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        let path = self.path(dir);
        let content = self.render()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, &content)
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
        Ok(path)
    }
}
