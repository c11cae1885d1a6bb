//! Indentation configuration for generated code.

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width.
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 2-space indentation, the TypeScript convention.
    pub const TWO_SPACES: Self = Self::Spaces(2);

    /// 4-space indentation.
    pub const FOUR_SPACES: Self = Self::Spaces(4);

    /// Build an indent from a configured width, falling back to tabs when asked.
    pub fn from_settings(width: u8, tabs: bool) -> Self {
        if tabs { Self::Tab } else { Self::Spaces(width) }
    }

    /// Write one indent level into `out`.
    pub fn write_to(&self, out: &mut String) {
        match self {
            Self::Spaces(width) => {
                for _ in 0..*width {
                    out.push(' ');
                }
            }
            Self::Tab => out.push('\t'),
        }
    }

    /// The string for one indent level.
    pub fn unit(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::TWO_SPACES
    }
}
