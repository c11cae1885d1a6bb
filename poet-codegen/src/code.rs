//! Code templates and deep generation.
//!
//! A [`Code`] is an ordered list of literal text and placeholders. Rendering
//! walks it depth-first: nested code renders recursively, type names and
//! symbols resolve through the [`ReferenceTracker`], and conditional outputs
//! resolve through the [`ConditionalRegistry`]. Only what is actually written
//! ends up importing anything.
//!
//! Rendering runs in two passes over the same tree. The first pass finds
//! locally defined names and referenced conditional outputs (and rejects
//! reference cycles between them); the second writes the text. Local names
//! are claimed between the passes, so they always win over imports.

use std::fmt;

use crate::{
    builder::{CodeWriter, Indent},
    conditional::{ConditionalOutput, ConditionalRegistry, OutputState},
    config::RenderConfig,
    error::{Error, Result},
    imports::ImportBlock,
    symbol::Symbol,
    tracker::ReferenceTracker,
    types::{TypeName, TypeVariable},
};

/// Builds a [`Code`] from literal text and placeholders.
///
/// Every argument goes through `Into<Placeholder>`, so string literals become
/// text and nested code, type names, symbols and conditional outputs keep
/// their meaning.
///
/// ```
/// use tspoet_codegen::{Symbol, code};
///
/// let observable = Symbol::named("Observable", "rxjs");
/// let file = code!["const stream: ", observable, "<number> = source;"];
/// assert_eq!(
///     file.to_file_string().unwrap(),
///     "import { Observable } from \"rxjs\";\n\nconst stream: Observable<number> = source;\n"
/// );
/// ```
#[macro_export]
macro_rules! code {
    () => {
        $crate::Code::new()
    };
    ($($part:expr),+ $(,)?) => {
        $crate::Code::new()$(.push($part))+
    };
}

/// One element of a [`Code`] template.
#[derive(Debug, Clone, PartialEq)]
pub enum Placeholder {
    /// Literal text, copied as-is apart from indentation.
    Text(String),
    Code(Code),
    Type(TypeName),
    /// An imported or locally defined symbol; prints its resolved name.
    Symbol(Symbol),
    /// Records a use of a conditional output and prints nothing.
    Conditional(ConditionalOutput),
    /// Records a use of a conditional output and prints its usage-site label.
    Usage(ConditionalOutput),
    /// Declaration site of a conditional output.
    IfUsed(ConditionalOutput),
    List(List),
}

/// A list-valued placeholder whose items are joined with a separator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct List {
    items: Vec<Placeholder>,
    separator: String,
}

impl List {
    pub fn new<T: Into<Placeholder>>(items: impl IntoIterator<Item = T>, separator: impl Into<String>) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            separator: separator.into(),
        }
    }

    pub fn items(&self) -> &[Placeholder] {
        &self.items
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A code template.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Code {
    parts: Vec<Placeholder>,
}

/// Output of a top-level render.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub body: String,
    pub imports: ImportBlock,
    trailing_newline: bool,
}

impl Rendered {
    /// The complete unit: import block, a blank line, then the body.
    pub fn to_file_string(&self) -> String {
        let mut out = self.imports.to_string();
        if !out.is_empty() && !self.body.is_empty() {
            out.push('\n');
        }
        out.push_str(&self.body);
        if self.trailing_newline && !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}

/// State threaded through every nested render call of one top-level render.
#[derive(Debug)]
pub struct RenderContext {
    pub tracker: ReferenceTracker,
    pub registry: ConditionalRegistry,
    indent: Indent,
}

impl RenderContext {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            tracker: ReferenceTracker::with_config(config),
            registry: ConditionalRegistry::new(),
            indent: config.indent(),
        }
    }

    pub fn indent(&self) -> Indent {
        self.indent
    }

    /// First pass: record conditional output references and claim local
    /// names before anything is written.
    pub fn prepare(&mut self, code: &Code) -> Result<()> {
        let mut discovery = Discovery {
            tracker: &self.tracker,
            registry: &mut self.registry,
            locals: Vec::new(),
            sites: Vec::new(),
            found: Vec::new(),
            walked: Vec::new(),
        };
        discovery.run(code)?;
        let locals = discovery.locals;
        for name in locals {
            if !self.tracker.define(&name) {
                tracing::warn!(name = name.as_str(), "local name already claimed by an import");
            }
        }
        Ok(())
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

/// Finds what the second pass will write. A conditional output's
/// declaration counts as written only once the output is referenced and one
/// of its `if_used` sites is itself part of what gets written.
struct Discovery<'a> {
    tracker: &'a ReferenceTracker,
    registry: &'a mut ConditionalRegistry,
    locals: Vec<String>,
    /// Outputs with a reachable declaration site, in order of discovery.
    sites: Vec<ConditionalOutput>,
    /// Outputs referenced by the tree currently being visited.
    found: Vec<ConditionalOutput>,
    /// Walked declarations and the outputs each one references.
    walked: Vec<(ConditionalOutput, Vec<ConditionalOutput>)>,
}

impl Discovery<'_> {
    fn run(&mut self, root: &Code) -> Result<()> {
        self.visit_code(root);
        self.found.clear();
        while let Some(output) = self.next_live() {
            self.visit_code(output.declaration());
            let refs = std::mem::take(&mut self.found);
            self.walked.push((output, refs));
        }
        self.check_cycles()
    }

    /// The first referenced output with a reachable site whose declaration
    /// has not been walked yet.
    fn next_live(&self) -> Option<ConditionalOutput> {
        self.sites
            .iter()
            .find(|output| {
                self.registry.state(output) != OutputState::Unreferenced
                    && !self.walked.iter().any(|(o, _)| o == *output)
            })
            .cloned()
    }

    fn visit_code(&mut self, code: &Code) {
        for part in &code.parts {
            self.visit(part);
        }
    }

    fn visit(&mut self, part: &Placeholder) {
        match part {
            Placeholder::Text(_) => {}
            Placeholder::Code(code) => self.visit_code(code),
            Placeholder::Type(ty) => {
                let tracker = self.tracker;
                let locals = &mut self.locals;
                ty.visit_symbols(&mut |symbol| {
                    if tracker.declares_locally(symbol) {
                        locals.push(symbol.value().to_string());
                    }
                });
            }
            Placeholder::Symbol(symbol) => {
                if self.tracker.declares_locally(symbol) {
                    self.locals.push(symbol.value().to_string());
                }
            }
            Placeholder::Conditional(output) | Placeholder::Usage(output) => {
                self.registry.reference(output);
                self.found.push(output.clone());
            }
            Placeholder::IfUsed(output) => {
                if !self.sites.contains(output) {
                    self.sites.push(output.clone());
                }
            }
            Placeholder::List(list) => list.items.iter().for_each(|item| self.visit(item)),
        }
    }

    fn check_cycles(&self) -> Result<()> {
        let mut done = Vec::new();
        for (output, _) in &self.walked {
            self.check_from(output, &mut Vec::new(), &mut done)?;
        }
        Ok(())
    }

    fn check_from(
        &self,
        output: &ConditionalOutput,
        stack: &mut Vec<ConditionalOutput>,
        done: &mut Vec<ConditionalOutput>,
    ) -> Result<()> {
        if let Some(pos) = stack.iter().position(|o| o == output) {
            let mut path: Vec<String> = stack[pos..]
                .iter()
                .map(|o| o.usage_site().to_string())
                .collect();
            path.push(output.usage_site().to_string());
            return Err(Error::cycle(output.usage_site(), path));
        }
        if done.contains(output) {
            return Ok(());
        }
        let Some((_, refs)) = self.walked.iter().find(|(o, _)| o == output) else {
            return Ok(());
        };
        stack.push(output.clone());
        for next in refs {
            self.check_from(next, stack, done)?;
        }
        stack.pop();
        done.push(output.clone());
        Ok(())
    }
}

/// Splits `text` after its last line break.
fn split_trailing_indent(text: &str) -> (&str, &str) {
    match text.rfind('\n') {
        Some(pos) => text.split_at(pos + 1),
        None => (text, ""),
    }
}

/// Whether `text` ends by opening a bracket and breaking the line.
fn opens_block(text: &str) -> bool {
    text.trim_end_matches([' ', '\t'])
        .strip_suffix('\n')
        .is_some_and(|before| before.trim_end().ends_with(['{', '(', '[']))
}

impl Code {
    pub const fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Append literal text.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.push(Placeholder::Text(text.into()))
    }

    /// Append literal text followed by a newline.
    pub fn line(self, text: impl Into<String>) -> Self {
        let mut text = text.into();
        text.push('\n');
        self.text(text)
    }

    /// Append the display form of any value.
    pub fn display(self, value: impl fmt::Display) -> Self {
        self.text(value.to_string())
    }

    /// Append a placeholder.
    pub fn push(mut self, part: impl Into<Placeholder>) -> Self {
        self.append(part);
        self
    }

    /// Append a placeholder (mutable).
    pub fn append(&mut self, part: impl Into<Placeholder>) -> &mut Self {
        self.parts.push(part.into());
        self
    }

    /// A list placeholder joining `items` with `separator`.
    pub fn join<T: Into<Placeholder>>(items: impl IntoIterator<Item = T>, separator: &str) -> List {
        List::new(items, separator)
    }

    /// An array literal, `[a, b, c]`, with every element deeply generated.
    pub fn array_of<T: Into<Placeholder>>(items: impl IntoIterator<Item = T>) -> Self {
        code!["[", Self::join(items, ", "), "]"]
    }

    pub fn parts(&self) -> &[Placeholder] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Render with default settings.
    pub fn render(&self) -> Result<Rendered> {
        self.render_with_config(&RenderConfig::default())
    }

    /// Render with a fresh tracker and registry.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn render_with_config(&self, config: &RenderConfig) -> Result<Rendered> {
        let mut ctx = RenderContext::new(config);
        ctx.prepare(self)?;
        let body = self.render_in(&mut ctx, 0)?;
        let imports = ImportBlock::from_tracker(&ctx.tracker, config.quote);
        tracing::debug!(body_len = body.len(), imports = imports.len(), "rendered code");
        Ok(Rendered {
            body,
            imports,
            trailing_newline: config.trailing_newline,
        })
    }

    /// Render the complete unit with default settings.
    pub fn to_file_string(&self) -> Result<String> {
        Ok(self.render()?.to_file_string())
    }

    /// Render the complete unit with the given settings.
    pub fn to_file_string_with(&self, config: &RenderConfig) -> Result<String> {
        Ok(self.render_with_config(config)?.to_file_string())
    }

    /// Render inside an ongoing render, starting at indent `level`.
    ///
    /// `ctx` must have been prepared with the top-level tree.
    pub fn render_in(&self, ctx: &mut RenderContext, level: usize) -> Result<String> {
        let mut writer = CodeWriter::at_level(ctx.indent(), level);
        self.write_to(ctx, &mut writer)?;
        Ok(writer.build())
    }

    fn write_to(&self, ctx: &mut RenderContext, w: &mut CodeWriter) -> Result<()> {
        let mut after_opener = false;
        // Indentation trailing an opener, held back until the next part shows
        // whether it is nested code.
        let mut held = "";
        for part in &self.parts {
            let nested = matches!(
                part,
                Placeholder::Code(_) | Placeholder::List(_) | Placeholder::IfUsed(_)
            );
            if nested && after_opener && w.at_line_start() {
                held = "";
                w.push_indent();
                write_part(part, ctx, w)?;
                w.push_dedent();
            } else {
                w.write(std::mem::take(&mut held));
                match part {
                    Placeholder::Text(text) if opens_block(text) => {
                        let (line, indent) = split_trailing_indent(text);
                        w.write(line);
                        held = indent;
                    }
                    _ => write_part(part, ctx, w)?,
                }
            }
            after_opener = matches!(part, Placeholder::Text(text) if opens_block(text));
        }
        w.write(held);
        Ok(())
    }
}

fn write_part(part: &Placeholder, ctx: &mut RenderContext, w: &mut CodeWriter) -> Result<()> {
    match part {
        Placeholder::Text(text) => {
            w.write(text);
        }
        Placeholder::Code(code) => code.write_to(ctx, w)?,
        Placeholder::Type(ty) => {
            let text = ty.render(&mut ctx.tracker);
            w.write(&text);
        }
        Placeholder::Symbol(symbol) => {
            let name = ctx.tracker.register(symbol);
            w.write(&name);
        }
        Placeholder::Conditional(output) => {
            ctx.registry.reference(output);
        }
        Placeholder::Usage(output) => {
            ctx.registry.reference(output);
            w.write(output.usage_site());
        }
        Placeholder::IfUsed(output) => {
            if ctx.registry.begin_emit(output) {
                tracing::trace!(usage_site = output.usage_site(), "emitting conditional output");
                output.declaration().write_to(ctx, w)?;
            }
        }
        Placeholder::List(list) => {
            for (i, item) in list.items.iter().enumerate() {
                if i > 0 {
                    w.write(&list.separator);
                }
                write_part(item, ctx, w)?;
            }
        }
    }
    Ok(())
}

impl From<&str> for Placeholder {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Placeholder {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for Placeholder {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl From<char> for Placeholder {
    fn from(c: char) -> Self {
        Self::Text(c.to_string())
    }
}

macro_rules! impl_display_placeholder {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Placeholder {
                fn from(value: $ty) -> Self {
                    Self::Text(value.to_string())
                }
            }
        )*
    };
}

impl_display_placeholder!(bool, i32, i64, u32, u64, usize, f64);

impl From<Code> for Placeholder {
    fn from(code: Code) -> Self {
        Self::Code(code)
    }
}

impl From<&Code> for Placeholder {
    fn from(code: &Code) -> Self {
        Self::Code(code.clone())
    }
}

impl From<TypeName> for Placeholder {
    fn from(ty: TypeName) -> Self {
        Self::Type(ty)
    }
}

impl From<&TypeName> for Placeholder {
    fn from(ty: &TypeName) -> Self {
        Self::Type(ty.clone())
    }
}

impl From<TypeVariable> for Placeholder {
    fn from(var: TypeVariable) -> Self {
        Self::Type(TypeName::TypeVariable(var))
    }
}

impl From<Symbol> for Placeholder {
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<&Symbol> for Placeholder {
    fn from(symbol: &Symbol) -> Self {
        Self::Symbol(symbol.clone())
    }
}

impl From<ConditionalOutput> for Placeholder {
    fn from(output: ConditionalOutput) -> Self {
        Self::Conditional(output)
    }
}

impl From<&ConditionalOutput> for Placeholder {
    fn from(output: &ConditionalOutput) -> Self {
        Self::Conditional(output.clone())
    }
}

impl From<List> for Placeholder {
    fn from(list: List) -> Self {
        Self::List(list)
    }
}

impl<T: Into<Placeholder>> From<Vec<T>> for Placeholder {
    fn from(items: Vec<T>) -> Self {
        Self::List(List::new(items, ""))
    }
}

impl From<&str> for Code {
    fn from(text: &str) -> Self {
        Code::new().text(text)
    }
}

impl From<String> for Code {
    fn from(text: String) -> Self {
        Code::new().text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditional::OutputState;

    fn body(code: &Code) -> String {
        code.render().unwrap().body
    }

    #[test]
    fn test_literal_and_values() {
        let code = code!["const x = ", 42, ";", " // ", true];
        assert_eq!(body(&code), "const x = 42; // true");
    }

    #[test]
    fn test_nested_block_is_indented() {
        let inner = code!["return 1;\n", "return 2;"];
        let code = code!["function f() {\n", inner, "\n}"];
        assert_eq!(body(&code), "function f() {\n  return 1;\n  return 2;\n}");
    }

    #[test]
    fn test_nested_blocks_stack() {
        let innermost = code!["x();"];
        let middle = code!["if (a) {\n", innermost, "\n}"];
        let outer = code!["function f() {\n", middle, "\n}"];
        assert_eq!(body(&outer), "function f() {\n  if (a) {\n    x();\n  }\n}");
    }

    #[test]
    fn test_opener_with_trailing_indent() {
        let code = code!["if (x) {\n  ", code!["a();\n", "b();"], "\n}"];
        assert_eq!(body(&code), "if (x) {\n  a();\n  b();\n}");
    }

    #[test]
    fn test_trailing_indent_kept_before_text() {
        let code = code!["call(\n  ", "x", "\n)"];
        assert_eq!(body(&code), "call(\n  x\n)");
        assert_eq!(body(&code!["f(\n  "]), "f(\n  ");
    }

    #[test]
    fn test_inline_code_keeps_indent() {
        let value = code!["compute(", 1, ")"];
        let code = code!["const x = ", value, ";"];
        assert_eq!(body(&code), "const x = compute(1);");
    }

    #[test]
    fn test_top_level_composition_is_not_indented() {
        let a = code!["const a = 1;"];
        let b = code!["const b = 2;"];
        let code = code![a, "\n\n", b];
        assert_eq!(body(&code), "const a = 1;\n\nconst b = 2;");
    }

    #[test]
    fn test_list_placeholder() {
        let params = Code::join(
            [
                code!["a: ", TypeName::string()],
                code!["b: ", TypeName::number()],
            ],
            ", ",
        );
        let code = code!["function f(", params, ") {}"];
        assert_eq!(body(&code), "function f(a: string, b: number) {}");
    }

    #[test]
    fn test_list_without_separator() {
        let code = code![vec!["a", "b", "c"]];
        assert_eq!(body(&code), "abc");
    }

    #[test]
    fn test_multiline_list_in_block() {
        let members = Code::join(["a: number;", "b: string;"], "\n");
        let code = code!["type T = {\n", members, "\n};"];
        assert_eq!(body(&code), "type T = {\n  a: number;\n  b: string;\n};");
    }

    #[test]
    fn test_array_of() {
        let code = Code::array_of([
            Placeholder::from(1),
            Placeholder::from(Symbol::named("DEFAULT", "./defaults")),
            Placeholder::from("'x'"),
        ]);
        let rendered = code.render().unwrap();
        assert_eq!(rendered.body, "[1, DEFAULT, 'x']");
        assert_eq!(rendered.imports.len(), 1);
    }

    #[test]
    fn test_same_symbol_imported_once() {
        let sym = Symbol::named("Observable", "rxjs");
        let code = code![&sym, " ", &sym, " ", code![&sym]];
        let rendered = code.render().unwrap();
        assert_eq!(rendered.body, "Observable Observable Observable");
        assert_eq!(rendered.imports.entries().count(), 1);
    }

    #[test]
    fn test_collision_uses_each_alias_consistently() {
        let a = Symbol::named("Foo", "./a");
        let b = Symbol::named("Foo", "./b");
        let code = code![&a, " ", &b, " ", &a, " ", TypeName::from(b.clone())];
        let rendered = code.render().unwrap();
        assert_eq!(rendered.body, "Foo Foo1 Foo Foo1");

        let aliases: Vec<_> = rendered.imports.entries().map(|e| e.alias.as_str()).collect();
        assert_eq!(aliases, vec!["Foo", "Foo1"]);
    }

    #[test]
    fn test_local_definition_wins_even_when_declared_later() {
        let imported = Symbol::named("User", "./models");
        let code = code!["const u: ", &imported, " = x;\n", "class ", Symbol::local("User"), " {}"];
        let out = code.to_file_string().unwrap();
        assert_eq!(
            out,
            "import { User as User1 } from \"./models\";\n\nconst u: User1 = x;\nclass User {}\n"
        );
    }

    #[test]
    fn test_own_module_name_wins_over_earlier_import() {
        let config = RenderConfig::default().with_module_path("./models");
        let code = code![
            Symbol::named("User", "./other"),
            " ",
            Symbol::named("User", "./models")
        ];
        assert_eq!(
            code.to_file_string_with(&config).unwrap(),
            "import { User as User1 } from \"./other\";\n\nUser1 User\n"
        );
    }

    #[test]
    fn test_own_module_type_name_wins_over_earlier_import() {
        let config = RenderConfig::default().with_module_path("./models");
        let code = code![
            Symbol::named("User", "./other"),
            ": ",
            TypeName::array_of(TypeName::any("User@./models"))
        ];
        let rendered = code.render_with_config(&config).unwrap();
        assert_eq!(rendered.body, "User1: Array<User>");
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = Symbol::named("Foo", "./a");
        let b = Symbol::named("Foo", "./b");
        let helper = ConditionalOutput::new("helper", code!["function helper() {}"]);
        let tree = code![
            helper.if_used(),
            "\n",
            &b,
            " ",
            &a,
            " ",
            helper.usage(),
            "()"
        ];
        let first = tree.render().unwrap();
        let second = tree.render().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.body, "function helper() {}\nFoo Foo1 helper()");
    }

    #[test]
    fn test_conditional_output_emitted_once() {
        let helper = ConditionalOutput::new("helper", code!["function helper() {}"]);
        let a = code!["a(", helper.usage(), ");"];
        let b = code!["b(", helper.usage(), ");"];
        let c = code![helper.reference(), "c();"];
        let file = code![helper.if_used(), "\n", a, "\n", b, "\n", c, "\n", helper.if_used()];

        let out = body(&file);
        assert_eq!(out.matches("function helper() {}").count(), 1);
        assert!(out.starts_with("function helper() {}\n"));
        assert!(out.contains("a(helper);\nb(helper);\nc();"));
    }

    #[test]
    fn test_unreferenced_conditional_output_is_absent() {
        let helper = ConditionalOutput::new(
            "helper",
            code!["function helper(): ", Symbol::named("Result", "./result"), " {}"],
        );
        let file = code![helper.if_used(), "const x = 1;"];
        let rendered = file.render().unwrap();
        assert_eq!(rendered.body, "const x = 1;");
        assert!(rendered.imports.is_empty());
    }

    #[test]
    fn test_conditional_declaration_imports_only_when_emitted() {
        let helper = ConditionalOutput::new(
            "helper",
            code!["function helper(): ", Symbol::named("Result", "./result"), " {}"],
        );
        let file = code![helper.if_used(), "\n", helper.usage(), "();"];
        let out = file.to_file_string().unwrap();
        assert_eq!(
            out,
            "import { Result } from \"./result\";\n\nfunction helper(): Result {}\nhelper();\n"
        );
    }

    #[test]
    fn test_declare_if_used() {
        let helper = ConditionalOutput::new("helper", code!["function helper() {}"]);
        let mut ctx = RenderContext::default();
        assert_eq!(helper.declare_if_used(&mut ctx, 0).unwrap(), None);

        ctx.prepare(&code![helper.usage()]).unwrap();
        assert_eq!(ctx.registry.state(&helper), OutputState::Referenced);
        assert_eq!(
            helper.declare_if_used(&mut ctx, 1).unwrap().as_deref(),
            Some("  function helper() {}")
        );
        assert_eq!(helper.declare_if_used(&mut ctx, 0).unwrap(), None);
    }

    #[test]
    fn test_self_referencing_conditional_output_fails() {
        let fib = ConditionalOutput::pending("fib");
        fib.set_declaration(code!["function fib(n) { return ", fib.usage(), "(n - 1); }"]);

        let err = code![fib.if_used(), "\n", fib.usage(), "(3);"].render().unwrap_err();
        assert!(err.is_cycle());
        assert!(err.to_string().contains("fib -> fib"));
    }

    #[test]
    fn test_indirect_cycle_names_the_chain() {
        let a = ConditionalOutput::pending("a");
        let b = ConditionalOutput::new("b", code!["const b = ", a.usage(), ";"]);
        a.set_declaration(code!["const a = ", b.usage(), ";"]);

        let err = code![a.if_used(), b.if_used(), a.reference()].render().unwrap_err();
        match *err {
            Error::ConditionalCycle { name, path } => {
                assert_eq!(name, "a");
                assert_eq!(path, vec!["a", "b", "a"]);
            }
            other => panic!("expected a cycle error, got {other:?}"),
        }
    }

    #[test]
    fn test_cycle_through_unwritten_declaration_is_ignored() {
        let a = ConditionalOutput::pending("a");
        let b = ConditionalOutput::new("b", code!["const b = ", a.usage(), ";"]);
        a.set_declaration(code!["const a = ", b.usage(), ";"]);

        assert_eq!(body(&code![a.reference(), "x;"]), "x;");
    }

    #[test]
    fn test_declaration_without_site_references_nothing() {
        let b = ConditionalOutput::new("b", code!["const b = 1;"]);
        let a = ConditionalOutput::new("a", code!["const a = ", b.usage(), ";"]);
        let file = code![b.if_used(), a.reference(), "x;"];
        assert_eq!(body(&file), "x;");

        let mut ctx = RenderContext::default();
        ctx.prepare(&file).unwrap();
        assert_eq!(ctx.registry.state(&a), OutputState::Referenced);
        assert_eq!(ctx.registry.state(&b), OutputState::Unreferenced);
    }

    #[test]
    fn test_declaration_reached_through_written_declaration() {
        let b = ConditionalOutput::new("b", code!["const b = 1;"]);
        let a = ConditionalOutput::new("a", code!["const a = ", b.usage(), ";"]);
        let file = code![b.if_used(), "
", a.if_used(), "
", a.usage(), ";"];
        assert_eq!(body(&file), "const b = 1;
const a = b;
a;");
    }

    #[test]
    fn test_unwritten_declaration_claims_no_local_name() {
        let model = ConditionalOutput::new("model", code!["class ", Symbol::local("User"), " {}"]);
        let file = code![model.reference(), Symbol::named("User", "./other"), ";"];
        assert_eq!(
            file.to_file_string().unwrap(),
            "import { User } from \"./other\";\n\nUser;\n"
        );
    }

    #[test]
    fn test_shared_dependency_is_not_a_cycle() {
        let base = ConditionalOutput::new("base", code!["const base = 1;"]);
        let left = ConditionalOutput::new("left", code!["const left = ", base.usage(), ";"]);
        let right = ConditionalOutput::new("right", code!["const right = ", base.usage(), ";"]);
        let file = code![
            base.if_used(),
            "\n",
            left.if_used(),
            "\n",
            right.if_used(),
            "\n",
            left.usage(),
            right.usage()
        ];
        assert_eq!(
            body(&file),
            "const base = 1;\nconst left = base;\nconst right = base;\nleftright"
        );
    }

    #[test]
    fn test_writes_with_configured_indent() {
        let config = RenderConfig {
            indent: 4,
            ..RenderConfig::default()
        };
        let code = code!["{\n", code!["x;"], "\n}"];
        assert_eq!(code.render_with_config(&config).unwrap().body, "{\n    x;\n}");
    }

    #[test]
    fn test_trailing_newline_setting() {
        let code = code!["x;"];
        let config = RenderConfig {
            trailing_newline: false,
            ..RenderConfig::default()
        };
        assert_eq!(code.to_file_string_with(&config).unwrap(), "x;");
        assert_eq!(code.to_file_string().unwrap(), "x;\n");
    }

    #[test]
    fn test_opens_block() {
        assert!(opens_block("if (x) {\n"));
        assert!(opens_block("call(\n  "));
        assert!(!opens_block("x;\n"));
        assert!(!opens_block("{"));
    }
}
