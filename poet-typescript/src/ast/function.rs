//! Functions, methods and signature members.

use tspoet_codegen::{Code, List, TypeName, TypeVariable};

use super::{Modifier, ParameterSpec, Renderable, doc::jsdoc, modifier::emit_modifiers};

/// What kind of function a [`FunctionSpec`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FunctionKind {
    #[default]
    Normal,
    /// An index signature, `[key: K]: V`.
    Indexable,
    /// A call signature, `(a: A): R`.
    Callable,
    Constructor,
}

/// Builder for functions and function-like members.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSpec {
    pub name: String,
    pub kind: FunctionKind,
    pub doc: Option<String>,
    pub modifiers: Vec<Modifier>,
    pub type_variables: Vec<TypeVariable>,
    pub parameters: Vec<ParameterSpec>,
    pub returns: Option<TypeName>,
    pub body: Option<Code>,
}

impl FunctionSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_kind(name, FunctionKind::Normal)
    }

    pub fn indexable() -> Self {
        Self::with_kind("indexable()", FunctionKind::Indexable)
    }

    pub fn callable() -> Self {
        Self::with_kind("callable()", FunctionKind::Callable)
    }

    pub fn constructor() -> Self {
        Self::with_kind("constructor", FunctionKind::Constructor)
    }

    fn with_kind(name: impl Into<String>, kind: FunctionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            doc: None,
            modifiers: Vec::new(),
            type_variables: Vec::new(),
            parameters: Vec::new(),
            returns: None,
            body: None,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    pub fn type_variable(mut self, var: TypeVariable) -> Self {
        self.type_variables.push(var);
        self
    }

    /// Add a required parameter.
    pub fn parameter(self, name: impl Into<String>, ty: impl Into<TypeName>) -> Self {
        self.parameter_spec(ParameterSpec::new(name, ty))
    }

    pub fn parameter_spec(mut self, param: ParameterSpec) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn returns(mut self, ty: impl Into<TypeName>) -> Self {
        self.returns = Some(ty.into());
        self
    }

    /// Set the body. Its last line should not end with a newline.
    pub fn body(mut self, body: impl Into<Code>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// The member line inside an interface body, e.g. `name<T>(p: T): R;`.
    pub fn interface_member(&self) -> Code {
        let mut code = self.doc.as_deref().map(jsdoc).unwrap_or_default();
        code.append(emit_modifiers(&self.modifiers, &[Modifier::Public]));
        if self.kind == FunctionKind::Constructor {
            code.append("new");
        }
        code.append(self.signature());
        code.push(";\n")
    }

    /// Name, type variables, parameters and return type, without modifiers.
    fn signature(&self) -> Code {
        let params = List::new(self.parameters.iter().map(Renderable::to_code), ", ");
        let mut code = Code::new();
        match self.kind {
            FunctionKind::Indexable => {
                code.append("[").append(params).append("]");
            }
            FunctionKind::Normal => {
                code.append(self.name.as_str());
                self.append_type_variables(&mut code);
                code.append("(").append(params).append(")");
            }
            FunctionKind::Callable | FunctionKind::Constructor => {
                self.append_type_variables(&mut code);
                code.append("(").append(params).append(")");
            }
        }
        if let Some(returns) = &self.returns {
            code.append(": ").append(returns.clone());
        }
        code
    }

    fn append_type_variables(&self, code: &mut Code) {
        if self.type_variables.is_empty() {
            return;
        }
        let vars = List::new(self.type_variables.iter().map(TypeVariable::declaration), ", ");
        code.append("<").append(vars).append(">");
    }
}

impl Renderable for FunctionSpec {
    /// Standalone form: `function name(...) { ... }`, or `constructor(...) { ... }`.
    ///
    /// Index and call signatures only exist as members and render as such.
    fn to_code(&self) -> Code {
        let keyword = match self.kind {
            FunctionKind::Normal => "function ",
            FunctionKind::Constructor => "constructor",
            FunctionKind::Indexable | FunctionKind::Callable => return self.interface_member(),
        };
        let mut code = self.doc.as_deref().map(jsdoc).unwrap_or_default();
        code.append(emit_modifiers(&self.modifiers, &[])).append(keyword);
        code.append(self.signature());
        match self.body.as_ref().filter(|b| !b.is_empty()) {
            Some(body) => code.text(" {\n").push(body.clone()).text("\n}"),
            None => code.text(" {\n}"),
        }
    }
}
