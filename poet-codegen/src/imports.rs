//! Import block construction.

use std::fmt;

use indexmap::IndexMap;

use crate::{
    config::Quote,
    symbol::ImportStyle,
    tracker::{ImportEntry, ReferenceTracker},
};

#[derive(Debug, Clone, Default, PartialEq)]
struct ModuleImports {
    namespaces: Vec<ImportEntry>,
    defaults: Vec<ImportEntry>,
    named: Vec<ImportEntry>,
}

/// The import statements a rendered body needs, grouped per module.
///
/// Modules keep the order in which the body first used them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportBlock {
    modules: IndexMap<String, ModuleImports>,
    quote: Quote,
}

impl ImportBlock {
    /// Collect the imports recorded by `tracker`.
    pub fn from_tracker(tracker: &ReferenceTracker, quote: Quote) -> Self {
        let mut modules: IndexMap<String, ModuleImports> = tracker
            .modules()
            .map(|module| (module.to_string(), ModuleImports::default()))
            .collect();

        for entry in tracker.imports() {
            let group = modules.entry(entry.module.clone()).or_default();
            match entry.style {
                ImportStyle::Namespace => group.namespaces.push(entry.clone()),
                ImportStyle::Default => group.defaults.push(entry.clone()),
                ImportStyle::Named => group.named.push(entry.clone()),
                ImportStyle::SideEffect => {}
            }
        }

        Self { modules, quote }
    }

    /// Every imported symbol, grouped by module.
    pub fn entries(&self) -> impl Iterator<Item = &ImportEntry> {
        self.modules
            .values()
            .flat_map(|m| m.namespaces.iter().chain(&m.defaults).chain(&m.named))
    }

    /// Modules in order of first use.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// Number of imported modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// One import statement per entry, without trailing newlines.
    pub fn statements(&self) -> Vec<String> {
        let mut statements = Vec::new();
        for (module, group) in &self.modules {
            let from = self.quote.wrap(module);
            let before = statements.len();

            for ns in &group.namespaces {
                let type_kw = if ns.type_only { "type " } else { "" };
                statements.push(format!("import {}* as {} from {};", type_kw, ns.alias, from));
            }

            let mut defaults = group.defaults.iter();
            let first_default = defaults.next();
            if first_default.is_some() || !group.named.is_empty() {
                statements.push(combined_statement(first_default, &group.named, &from));
            }
            for extra in defaults {
                statements.push(combined_statement(Some(extra), &[], &from));
            }

            if statements.len() == before {
                statements.push(format!("import {};", from));
            }
        }
        statements
    }
}

fn named_item(entry: &ImportEntry, inline_type: bool) -> String {
    let type_kw = if inline_type && entry.type_only { "type " } else { "" };
    if entry.is_aliased() {
        format!("{}{} as {}", type_kw, entry.name, entry.alias)
    } else {
        format!("{}{}", type_kw, entry.name)
    }
}

fn combined_statement(default: Option<&ImportEntry>, named: &[ImportEntry], from: &str) -> String {
    let all_type_only = !named.is_empty() && named.iter().all(|e| e.type_only);

    match default {
        Some(def) if named.is_empty() => {
            let type_kw = if def.type_only { "type " } else { "" };
            format!("import {}{} from {};", type_kw, def.alias, from)
        }
        Some(def) => {
            let items: Vec<_> = named.iter().map(|e| named_item(e, true)).collect();
            format!("import {}, {{ {} }} from {};", def.alias, items.join(", "), from)
        }
        None if all_type_only => {
            let items: Vec<_> = named.iter().map(|e| named_item(e, false)).collect();
            format!("import type {{ {} }} from {};", items.join(", "), from)
        }
        None => {
            let items: Vec<_> = named.iter().map(|e| named_item(e, true)).collect();
            format!("import {{ {} }} from {};", items.join(", "), from)
        }
    }
}

impl fmt::Display for ImportBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in self.statements() {
            writeln!(f, "{statement}")?;
        }
        Ok(())
    }
}
