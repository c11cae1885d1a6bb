//! Declarations that are only emitted when something uses them.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, OnceLock},
};

use crate::{
    code::{Code, Placeholder, RenderContext},
    error::Result,
};

/// A declaration defined once at a declaration site and materialized there
/// only if some rendered node references it.
///
/// Clones share identity: every clone is the same conditional output, so
/// any number of references still produce a single declaration.
///
/// # Example
///
/// ```
/// use tspoet_codegen::{ConditionalOutput, code};
///
/// let helper = ConditionalOutput::new("toDate", code!["function toDate(s: string) { return new Date(s); }"]);
/// let file = code![helper.if_used(), "\n", "const when = ", helper.usage(), "(raw);"];
///
/// let out = file.render().unwrap();
/// assert_eq!(
///     out.body,
///     "function toDate(s: string) { return new Date(s); }\nconst when = toDate(raw);"
/// );
/// ```
#[derive(Clone)]
pub struct ConditionalOutput {
    inner: Arc<Inner>,
}

struct Inner {
    usage_site: String,
    declaration: OnceLock<Code>,
}

static EMPTY: Code = Code::new();

/// Identity of a [`ConditionalOutput`] within one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConditionalId(usize);

impl ConditionalOutput {
    /// Create a conditional output whose usage-site label is `usage_site`.
    pub fn new(usage_site: impl Into<String>, declaration: Code) -> Self {
        let output = Self::pending(usage_site);
        output.set_declaration(declaration);
        output
    }

    /// Create a conditional output whose declaration is supplied later with
    /// [`set_declaration`](Self::set_declaration), so the declaration can
    /// refer to other nodes built after this one.
    pub fn pending(usage_site: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                usage_site: usage_site.into(),
                declaration: OnceLock::new(),
            }),
        }
    }

    /// Supply the declaration. Returns false if one was already set.
    pub fn set_declaration(&self, declaration: Code) -> bool {
        self.inner.declaration.set(declaration).is_ok()
    }

    /// The label printed at usage sites, usually the declared name.
    pub fn usage_site(&self) -> &str {
        &self.inner.usage_site
    }

    /// The declaration body; empty while a pending declaration is unset.
    pub fn declaration(&self) -> &Code {
        self.inner.declaration.get().unwrap_or(&EMPTY)
    }

    pub fn id(&self) -> ConditionalId {
        ConditionalId(Arc::as_ptr(&self.inner) as usize)
    }

    /// Placeholder that records a use and prints nothing.
    pub fn reference(&self) -> Placeholder {
        Placeholder::Conditional(self.clone())
    }

    /// Placeholder that records a use and prints the usage-site label.
    pub fn usage(&self) -> Placeholder {
        Placeholder::Usage(self.clone())
    }

    /// Placeholder marking the declaration site.
    pub fn if_used(&self) -> Placeholder {
        Placeholder::IfUsed(self.clone())
    }

    /// Render the declaration if it has been referenced and not emitted yet.
    pub fn declare_if_used(&self, ctx: &mut RenderContext, level: usize) -> Result<Option<String>> {
        if !ctx.registry.begin_emit(self) {
            return Ok(None);
        }
        tracing::trace!(usage_site = self.usage_site(), "emitting conditional output");
        self.declaration().render_in(ctx, level).map(Some)
    }
}

impl PartialEq for ConditionalOutput {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ConditionalOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionalOutput")
            .field("usage_site", &self.inner.usage_site)
            .finish_non_exhaustive()
    }
}

/// Creates a conditionally-output declaration.
pub fn conditional_output(usage_site: impl Into<String>, declaration: Code) -> ConditionalOutput {
    ConditionalOutput::new(usage_site, declaration)
}

/// Lifecycle of a conditional output during one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputState {
    #[default]
    Unreferenced,
    Referenced,
    Emitted,
}

/// Per-render state of every conditional output seen so far.
#[derive(Debug, Clone, Default)]
pub struct ConditionalRegistry {
    states: HashMap<ConditionalId, OutputState>,
}

impl ConditionalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, output: &ConditionalOutput) -> OutputState {
        self.states.get(&output.id()).copied().unwrap_or_default()
    }

    /// Record a use. Returns true only for the first use.
    pub fn reference(&mut self, output: &ConditionalOutput) -> bool {
        let state = self.states.entry(output.id()).or_default();
        if *state == OutputState::Unreferenced {
            *state = OutputState::Referenced;
            true
        } else {
            false
        }
    }

    /// Move a referenced output to emitted. Returns false when it was never
    /// referenced or has already been emitted.
    pub fn begin_emit(&mut self, output: &ConditionalOutput) -> bool {
        match self.states.get_mut(&output.id()) {
            Some(state) if *state == OutputState::Referenced => {
                *state = OutputState::Emitted;
                true
            }
            _ => false,
        }
    }
}
