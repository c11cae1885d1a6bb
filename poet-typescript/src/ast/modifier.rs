//! Declaration modifiers.

use std::fmt;

/// A declaration keyword.
///
/// Variants are listed in the order they are emitted, so sorting a set of
/// modifiers yields valid TypeScript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Export,
    Declare,
    Default,
    Public,
    Protected,
    Private,
    Readonly,
    Abstract,
    Static,
    Async,
    Const,
}

impl Modifier {
    pub fn keyword(&self) -> &'static str {
        match self {
            Modifier::Export => "export",
            Modifier::Declare => "declare",
            Modifier::Default => "default",
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Readonly => "readonly",
            Modifier::Abstract => "abstract",
            Modifier::Static => "static",
            Modifier::Async => "async",
            Modifier::Const => "const",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Render `modifiers` in canonical order, each followed by a space.
///
/// Duplicates collapse and anything in `implicit` is left out.
pub(crate) fn emit_modifiers(modifiers: &[Modifier], implicit: &[Modifier]) -> String {
    let mut sorted: Vec<Modifier> = modifiers
        .iter()
        .copied()
        .filter(|m| !implicit.contains(m))
        .collect();
    sorted.sort();
    sorted.dedup();
    sorted.iter().map(|m| format!("{m} ")).collect()
}
