//! TypeScript type names.
//!
//! A [`TypeName`] renders itself against a [`ReferenceTracker`], registering
//! every imported symbol it contains on the way. Rendering never changes the
//! type name itself.

use indexmap::IndexMap;

use crate::{code::Code, symbol::Symbol, tracker::ReferenceTracker};

/// How a bound is combined with the bounds before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combiner {
    #[default]
    Union,
    Intersect,
}

impl Combiner {
    pub fn token(&self) -> &'static str {
        match self {
            Combiner::Union => "|",
            Combiner::Intersect => "&",
        }
    }
}

/// Keyword applied to a bound's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundModifier {
    KeyOf,
}

impl BoundModifier {
    pub fn keyword(&self) -> &'static str {
        match self {
            BoundModifier::KeyOf => "keyof",
        }
    }
}

/// A constraint on a type variable, e.g. the `keyof T` in `K extends keyof T`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bound {
    pub ty: TypeName,
    pub combiner: Combiner,
    pub modifier: Option<BoundModifier>,
}

impl Bound {
    pub fn new(ty: impl Into<TypeName>, combiner: Combiner, modifier: Option<BoundModifier>) -> Self {
        Self {
            ty: ty.into(),
            combiner,
            modifier,
        }
    }

    /// A bound combined with `|`.
    pub fn union(ty: impl Into<TypeName>) -> Self {
        Self::new(ty, Combiner::Union, None)
    }

    /// A bound combined with `&`.
    pub fn intersect(ty: impl Into<TypeName>) -> Self {
        Self::new(ty, Combiner::Intersect, None)
    }

    /// Prefix the bound's type with `keyof`.
    pub fn key_of(mut self) -> Self {
        self.modifier = Some(BoundModifier::KeyOf);
        self
    }

    /// The bound without its combiner, e.g. `keyof Test6`.
    pub fn to_code(&self) -> Code {
        let mut code = Code::new();
        if let Some(modifier) = self.modifier {
            code = code.text(modifier.keyword()).text(" ");
        }
        code.push(self.ty.clone())
    }
}

/// A generic type variable and its bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeVariable {
    pub name: String,
    pub bounds: Vec<Bound>,
}

impl TypeVariable {
    pub fn new(name: impl Into<String>, bounds: impl IntoIterator<Item = Bound>) -> Self {
        Self {
            name: name.into(),
            bounds: bounds.into_iter().collect(),
        }
    }

    /// The declaration form, e.g. `Y extends Test3 & Test4`.
    ///
    /// The first bound's combiner is ignored; every later bound is joined
    /// with its own combiner's token.
    pub fn declaration(&self) -> Code {
        let mut code = Code::new().text(&self.name);
        for (i, bound) in self.bounds.iter().enumerate() {
            let joiner = if i == 0 {
                " extends ".to_string()
            } else {
                format!(" {} ", bound.combiner.token())
            };
            code = code.text(joiner).push(bound.to_code());
        }
        code
    }
}

/// A member of an anonymous object type.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    pub ty: TypeName,
    pub optional: bool,
}

impl Member {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Name of any type that can be referenced.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeName {
    /// A literal name, optionally backed by an imported symbol.
    Any {
        usage: String,
        symbol: Option<Symbol>,
    },
    /// A generic type applied to arguments.
    Parameterized {
        base: Box<TypeName>,
        args: Vec<TypeName>,
    },
    TypeVariable(TypeVariable),
    /// An object type such as `{ length: number, name?: string }`.
    Anonymous(Vec<Member>),
    Tuple(Vec<TypeName>),
    Intersection(Vec<TypeName>),
    Union(Vec<TypeName>),
    /// A function type; parameters print in insertion order.
    Lambda {
        params: IndexMap<String, TypeName>,
        returns: Box<TypeName>,
    },
}

impl TypeName {
    /// Any class/enum/primitive type name.
    ///
    /// A name containing an import marker is parsed as an import spec, so
    /// `any("Observable@rxjs")` is an imported type and `any("number")` is
    /// a literal. A dotted name keeps its full usage text:
    /// `any("rxjs.Observable*rxjs")` prints `rxjs.Observable` and imports the
    /// `rxjs` namespace.
    pub fn any(name: impl Into<String>) -> Self {
        let name = name.into();
        if let Some(idx) = name.find(['@', '*', '+']) {
            if let Ok(symbol) = Symbol::parse(&name) {
                let usage = name[..idx].strip_prefix("t:").unwrap_or(&name[..idx]);
                let usage = if usage.is_empty() {
                    symbol.value().to_string()
                } else {
                    usage.to_string()
                };
                return Self::Any {
                    usage,
                    symbol: Some(symbol),
                };
            }
        }
        Self::Any {
            usage: name,
            symbol: None,
        }
    }

    /// A type name imported through a spec string, see [`Symbol::parse`].
    pub fn imported(spec: &str) -> crate::Result<Self> {
        let symbol = Symbol::parse(spec)?;
        Ok(Self::from_symbol(symbol))
    }

    /// A type name printed as whatever name `symbol` resolves to.
    pub fn from_symbol(symbol: Symbol) -> Self {
        Self::Any {
            usage: symbol.value().to_string(),
            symbol: Some(symbol),
        }
    }

    pub fn parameterized(base: impl Into<TypeName>, args: impl IntoIterator<Item = TypeName>) -> Self {
        Self::Parameterized {
            base: Box::new(base.into()),
            args: args.into_iter().collect(),
        }
    }

    pub fn type_variable(name: impl Into<String>, bounds: impl IntoIterator<Item = Bound>) -> Self {
        Self::TypeVariable(TypeVariable::new(name, bounds))
    }

    pub fn anonymous(members: impl IntoIterator<Item = Member>) -> Self {
        Self::Anonymous(members.into_iter().collect())
    }

    pub fn tuple(members: impl IntoIterator<Item = TypeName>) -> Self {
        Self::Tuple(members.into_iter().collect())
    }

    pub fn intersection(members: impl IntoIterator<Item = TypeName>) -> Self {
        Self::Intersection(members.into_iter().collect())
    }

    pub fn union(members: impl IntoIterator<Item = TypeName>) -> Self {
        Self::Union(members.into_iter().collect())
    }

    /// A function type. A repeated parameter name keeps its first position
    /// and takes the last type given.
    pub fn lambda<K: Into<String>>(
        params: impl IntoIterator<Item = (K, TypeName)>,
        returns: impl Into<TypeName>,
    ) -> Self {
        Self::Lambda {
            params: params.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            returns: Box::new(returns.into()),
        }
    }

    pub fn null() -> Self {
        Self::any("null")
    }

    pub fn undefined() -> Self {
        Self::any("undefined")
    }

    pub fn never() -> Self {
        Self::any("never")
    }

    pub fn void() -> Self {
        Self::any("void")
    }

    pub fn any_type() -> Self {
        Self::any("any")
    }

    pub fn unknown() -> Self {
        Self::any("unknown")
    }

    pub fn boolean() -> Self {
        Self::any("boolean")
    }

    pub fn number() -> Self {
        Self::any("number")
    }

    pub fn string() -> Self {
        Self::any("string")
    }

    pub fn object() -> Self {
        Self::any("Object")
    }

    pub fn date() -> Self {
        Self::any("Date")
    }

    pub fn buffer() -> Self {
        Self::any("Buffer")
    }

    pub fn array_buffer() -> Self {
        Self::any("ArrayBuffer")
    }

    /// `Array<T>`
    pub fn array_of(element: TypeName) -> Self {
        Self::parameterized(Self::any("Array"), [element])
    }

    /// `Set<T>`
    pub fn set_of(element: TypeName) -> Self {
        Self::parameterized(Self::any("Set"), [element])
    }

    /// `Map<K, V>`
    pub fn map_of(key: TypeName, value: TypeName) -> Self {
        Self::parameterized(Self::any("Map"), [key, value])
    }

    /// Render to TypeScript syntax, registering every symbol with `tracker`.
    pub fn render(&self, tracker: &mut ReferenceTracker) -> String {
        match self {
            TypeName::Any { usage, symbol } => match symbol {
                Some(symbol) => {
                    let alias = tracker.register(symbol);
                    let rest = usage
                        .strip_prefix(symbol.value())
                        .filter(|rest| rest.is_empty() || rest.starts_with('.'));
                    match rest {
                        Some(rest) if !symbol.value().is_empty() => format!("{alias}{rest}"),
                        _ => usage.clone(),
                    }
                }
                None => usage.clone(),
            },
            TypeName::Parameterized { base, args } => {
                let base = base.render(tracker);
                if args.is_empty() {
                    return base;
                }
                let args: Vec<_> = args.iter().map(|a| a.render(tracker)).collect();
                format!("{}<{}>", base, args.join(", "))
            }
            TypeName::TypeVariable(var) => var.name.clone(),
            TypeName::Anonymous(members) => {
                if members.is_empty() {
                    return "{}".to_string();
                }
                let entries: Vec<_> = members
                    .iter()
                    .map(|m| {
                        let optional = if m.optional { "?" } else { "" };
                        format!("{}{}: {}", m.name, optional, m.ty.render(tracker))
                    })
                    .collect();
                format!("{{ {} }}", entries.join(", "))
            }
            TypeName::Tuple(members) => {
                let members: Vec<_> = members.iter().map(|m| m.render(tracker)).collect();
                format!("[{}]", members.join(", "))
            }
            TypeName::Intersection(members) => {
                if members.is_empty() {
                    return "unknown".to_string();
                }
                let members: Vec<_> = members
                    .iter()
                    .map(|m| {
                        let text = m.render(tracker);
                        if matches!(m, TypeName::Union(u) if u.len() > 1)
                            || matches!(m, TypeName::Lambda { .. })
                        {
                            format!("({text})")
                        } else {
                            text
                        }
                    })
                    .collect();
                members.join(" & ")
            }
            TypeName::Union(members) => {
                if members.is_empty() {
                    return "never".to_string();
                }
                let members: Vec<_> = members
                    .iter()
                    .map(|m| {
                        let text = m.render(tracker);
                        if matches!(m, TypeName::Lambda { .. }) {
                            format!("({text})")
                        } else {
                            text
                        }
                    })
                    .collect();
                members.join(" | ")
            }
            TypeName::Lambda { params, returns } => {
                let params: Vec<_> = params
                    .iter()
                    .map(|(name, ty)| format!("{}: {}", name, ty.render(tracker)))
                    .collect();
                format!("({}) => {}", params.join(", "), returns.render(tracker))
            }
        }
    }

    /// Calls `f` for every symbol anywhere in this type.
    pub(crate) fn visit_symbols(&self, f: &mut impl FnMut(&Symbol)) {
        match self {
            TypeName::Any {
                symbol: Some(symbol),
                ..
            } => f(symbol),
            TypeName::Any { .. } | TypeName::TypeVariable(_) => {}
            TypeName::Parameterized { base, args } => {
                base.visit_symbols(f);
                args.iter().for_each(|a| a.visit_symbols(f));
            }
            TypeName::Anonymous(members) => members.iter().for_each(|m| m.ty.visit_symbols(f)),
            TypeName::Tuple(members) | TypeName::Intersection(members) | TypeName::Union(members) => {
                members.iter().for_each(|m| m.visit_symbols(f))
            }
            TypeName::Lambda { params, returns } => {
                params.values().for_each(|p| p.visit_symbols(f));
                returns.visit_symbols(f);
            }
        }
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::any(name)
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self::any(name)
    }
}

impl From<Symbol> for TypeName {
    fn from(symbol: Symbol) -> Self {
        Self::from_symbol(symbol)
    }
}

impl From<TypeVariable> for TypeName {
    fn from(var: TypeVariable) -> Self {
        Self::TypeVariable(var)
    }
}
