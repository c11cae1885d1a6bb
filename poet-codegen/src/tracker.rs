//! Per-render symbol tracking and alias assignment.

use std::collections::{HashMap, HashSet};

use indexmap::{IndexMap, IndexSet};

use crate::{
    config::RenderConfig,
    symbol::{ImportStyle, Origin, Symbol, SymbolId},
};

/// One import the rendered body depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    /// Module specifier the symbol is imported from.
    pub module: String,
    /// Canonical exported name.
    pub name: String,
    /// Name the body uses; equal to `name` unless the symbol was aliased.
    pub alias: String,
    pub style: ImportStyle,
    /// Cleared as soon as any registration needs the symbol as a value.
    pub type_only: bool,
}

impl ImportEntry {
    /// Whether the body refers to this symbol under a different name.
    pub fn is_aliased(&self) -> bool {
        self.alias != self.name
    }
}

/// Accumulates every symbol referenced during one render and assigns
/// collision-free printed names.
///
/// A tracker lives for exactly one top-level render. Registering the same
/// symbol again returns the alias it was first given; a different symbol
/// that would print identically is given a numbered alias (`Foo1`, `Foo2`,
/// ...) in order of first use.
///
/// # Example
///
/// ```
/// use tspoet_codegen::{ReferenceTracker, Symbol};
///
/// let mut tracker = ReferenceTracker::new();
/// let a = Symbol::named("Foo", "./a");
/// let b = Symbol::named("Foo", "./b");
///
/// assert_eq!(tracker.register(&a), "Foo");
/// assert_eq!(tracker.register(&b), "Foo1");
/// assert_eq!(tracker.register(&a), "Foo");
/// assert_eq!(tracker.imports().count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReferenceTracker {
    aliases: HashMap<SymbolId, String>,
    /// Printed name -> the symbol that owns it.
    claimed: HashMap<String, SymbolId>,
    imports: IndexMap<SymbolId, ImportEntry>,
    /// Modules in order of first use, side-effect imports included.
    modules: IndexSet<String>,
    reserved: HashSet<String>,
    module_path: Option<String>,
}

impl ReferenceTracker {
    /// Create an empty tracker with no reserved words.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker honoring the reserved words and module path of `config`.
    pub fn with_config(config: &RenderConfig) -> Self {
        Self {
            reserved: config.reserved_words.iter().cloned().collect(),
            module_path: config.module_path.clone(),
            ..Self::default()
        }
    }

    /// Claim `name` for a local declaration.
    ///
    /// Returns false when the name was already claimed by an import, which
    /// only happens if imports were registered before local names.
    pub fn define(&mut self, name: &str) -> bool {
        let id = SymbolId {
            origin: Origin::Local,
            name: name.to_string(),
        };
        match self.claimed.get(name) {
            Some(owner) => *owner == id,
            None => {
                tracing::trace!(name, "claimed local name");
                self.claimed.insert(name.to_string(), id.clone());
                self.aliases.insert(id, name.to_string());
                true
            }
        }
    }

    /// Register a symbol use and return the name the body must print.
    pub fn register(&mut self, symbol: &Symbol) -> String {
        if symbol.is_local() {
            self.define_local(symbol.value());
            return symbol.value().to_string();
        }
        let Some(module) = symbol.module() else {
            return symbol.value().to_string();
        };

        if symbol.style() == ImportStyle::SideEffect {
            self.modules.insert(module.to_string());
            return symbol.value().to_string();
        }

        if self.is_own_module(symbol) {
            self.define_local(symbol.value());
            return symbol.value().to_string();
        }

        let id = symbol.id();
        if let Some(alias) = self.aliases.get(&id).cloned() {
            if !symbol.is_type_only() {
                if let Some(entry) = self.imports.get_mut(&id) {
                    entry.type_only = false;
                }
            }
            return alias;
        }

        let preferred = symbol.alias().unwrap_or(symbol.value());
        let alias = self.claim(preferred, &id);
        if alias != symbol.value() {
            tracing::trace!(
                name = symbol.value(),
                module,
                alias = alias.as_str(),
                "aliased symbol"
            );
        }

        self.modules.insert(module.to_string());
        self.aliases.insert(id.clone(), alias.clone());
        self.imports.insert(
            id,
            ImportEntry {
                module: module.to_string(),
                name: symbol.value().to_string(),
                alias: alias.clone(),
                style: symbol.style(),
                type_only: symbol.is_type_only(),
            },
        );
        alias
    }

    /// The alias already assigned to `symbol`, if it was registered.
    pub fn alias_of(&self, symbol: &Symbol) -> Option<&str> {
        self.aliases.get(&symbol.id()).map(String::as_str)
    }

    /// Imports in order of first use.
    pub fn imports(&self) -> impl Iterator<Item = &ImportEntry> {
        self.imports.values()
    }

    /// Modules in order of first use, including side-effect-only modules.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(String::as_str)
    }

    /// Whether no import has been recorded.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Whether `symbol` is declared in the file being rendered, so it
    /// prints under its own name and is never imported.
    pub(crate) fn declares_locally(&self, symbol: &Symbol) -> bool {
        symbol.is_local()
            || (symbol.style() != ImportStyle::SideEffect && self.is_own_module(symbol))
    }

    fn define_local(&mut self, name: &str) {
        if !self.define(name) {
            tracing::warn!(name, "local declaration shadowed by an import claimed earlier");
        }
    }

    fn is_own_module(&self, symbol: &Symbol) -> bool {
        self.module_path.as_deref().is_some_and(|path| {
            symbol.module() == Some(path) || symbol.declared_in() == Some(path)
        })
    }

    fn is_free(&self, name: &str) -> bool {
        !self.claimed.contains_key(name) && !self.reserved.contains(name)
    }

    fn claim(&mut self, preferred: &str, id: &SymbolId) -> String {
        let alias = if self.is_free(preferred) {
            preferred.to_string()
        } else {
            (1..)
                .map(|n| format!("{preferred}{n}"))
                .find(|candidate| self.is_free(candidate))
                .unwrap_or_else(|| preferred.to_string())
        };
        self.claimed.insert(alias.clone(), id.clone());
        alias
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_symbol_registered_once() {
        let mut tracker = ReferenceTracker::new();
        let sym = Symbol::named("Foo", "./foo");
        for _ in 0..5 {
            assert_eq!(tracker.register(&sym), "Foo");
        }
        assert_eq!(tracker.imports().count(), 1);
    }

    #[test]
    fn test_collision_assigns_distinct_alias() {
        let mut tracker = ReferenceTracker::new();
        let a = Symbol::named("Foo", "./a");
        let b = Symbol::named("Foo", "./b");
        let c = Symbol::named("Foo", "./c");
        assert_eq!(tracker.register(&a), "Foo");
        assert_eq!(tracker.register(&b), "Foo1");
        assert_eq!(tracker.register(&c), "Foo2");
        assert_eq!(tracker.alias_of(&b), Some("Foo1"));

        let entries: Vec<_> = tracker.imports().collect();
        assert!(!entries[0].is_aliased());
        assert!(entries[1].is_aliased());
        assert_eq!(entries[2].module, "./c");
    }

    #[test]
    fn test_local_name_wins() {
        let mut tracker = ReferenceTracker::new();
        assert!(tracker.define("Foo"));
        assert_eq!(tracker.register(&Symbol::named("Foo", "./foo")), "Foo1");
        assert!(tracker.define("Foo"));
    }

    #[test]
    fn test_define_after_import_reports_conflict() {
        let mut tracker = ReferenceTracker::new();
        tracker.register(&Symbol::named("Foo", "./foo"));
        assert!(!tracker.define("Foo"));
    }

    #[test]
    fn test_requested_alias() {
        let mut tracker = ReferenceTracker::new();
        let sym = Symbol::named("Foo", "./foo").with_alias("Bar");
        assert_eq!(tracker.register(&sym), "Bar");
        let entry = tracker.imports().next().unwrap();
        assert_eq!(entry.name, "Foo");
        assert_eq!(entry.alias, "Bar");
    }

    #[test]
    fn test_reserved_words_are_aliased() {
        let config = RenderConfig {
            reserved_words: vec!["delete".into()],
            ..RenderConfig::default()
        };
        let mut tracker = ReferenceTracker::with_config(&config);
        assert_eq!(tracker.register(&Symbol::named("delete", "./api")), "delete1");
    }

    #[test]
    fn test_own_module_is_not_imported() {
        let config = RenderConfig {
            module_path: Some("./models".into()),
            ..RenderConfig::default()
        };
        let mut tracker = ReferenceTracker::with_config(&config);
        assert_eq!(tracker.register(&Symbol::named("User", "./models")), "User");
        let reexported = Symbol::named("Role", "./index").defined_in("./models");
        assert_eq!(tracker.register(&reexported), "Role");
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_declares_locally() {
        let config = RenderConfig {
            module_path: Some("./models".into()),
            ..RenderConfig::default()
        };
        let tracker = ReferenceTracker::with_config(&config);
        assert!(tracker.declares_locally(&Symbol::local("Node")));
        assert!(tracker.declares_locally(&Symbol::named("User", "./models")));
        assert!(!tracker.declares_locally(&Symbol::named("User", "./other")));
        assert!(!ReferenceTracker::new().declares_locally(&Symbol::named("User", "./models")));
    }

    #[test]
    fn test_side_effect_claims_no_name() {
        let mut tracker = ReferenceTracker::new();
        tracker.register(&Symbol::side_effect("./polyfill"));
        assert_eq!(tracker.imports().count(), 0);
        assert_eq!(tracker.modules().collect::<Vec<_>>(), vec!["./polyfill"]);
    }

    #[test]
    fn test_value_use_clears_type_only() {
        let mut tracker = ReferenceTracker::new();
        tracker.register(&Symbol::named("Foo", "./foo").type_only());
        assert!(tracker.imports().next().unwrap().type_only);
        tracker.register(&Symbol::named("Foo", "./foo"));
        assert!(!tracker.imports().next().unwrap().type_only);
    }

    #[test]
    fn test_fresh_trackers_agree() {
        let symbols = [
            Symbol::named("Foo", "./a"),
            Symbol::named("Foo", "./b"),
            Symbol::default_import("Foo", "./c"),
        ];
        let run = || {
            let mut tracker = ReferenceTracker::new();
            symbols.iter().map(|s| tracker.register(s)).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
