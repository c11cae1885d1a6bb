//! Function parameters.

use tspoet_codegen::{Code, TypeName};

use super::{Modifier, Renderable, modifier::emit_modifiers};

/// A parameter of a function, method or constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub ty: TypeName,
    pub optional: bool,
    pub rest: bool,
    pub modifiers: Vec<Modifier>,
    pub default_value: Option<Code>,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            optional: false,
            rest: false,
            modifiers: Vec::new(),
            default_value: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Collect the remaining arguments, `...name: T`.
    pub fn rest(mut self) -> Self {
        self.rest = true;
        self
    }

    /// Add a modifier, e.g. `private` for a constructor parameter property.
    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn default_value(mut self, value: impl Into<Code>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

impl Renderable for ParameterSpec {
    fn to_code(&self) -> Code {
        let mut prefix = emit_modifiers(&self.modifiers, &[]);
        if self.rest {
            prefix.push_str("...");
        }
        prefix.push_str(&self.name);
        if self.optional {
            prefix.push('?');
        }
        prefix.push_str(": ");

        let code = Code::new().text(prefix).push(self.ty.clone());
        match &self.default_value {
            Some(value) => code.text(" = ").push(value.clone()),
            None => code,
        }
    }
}
