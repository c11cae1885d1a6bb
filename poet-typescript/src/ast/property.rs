//! Properties of interfaces and classes.

use tspoet_codegen::{Code, TypeName};

use super::{Modifier, Renderable, doc::jsdoc, modifier::emit_modifiers};

/// A named, typed property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySpec {
    pub name: String,
    pub ty: TypeName,
    pub optional: bool,
    pub modifiers: Vec<Modifier>,
    pub doc: Option<String>,
    pub initializer: Option<Code>,
}

impl PropertySpec {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            optional: false,
            modifiers: Vec::new(),
            doc: None,
            initializer: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
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

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn initializer(mut self, value: impl Into<Code>) -> Self {
        self.initializer = Some(value.into());
        self
    }

    /// The member line inside an interface body, `[mods ]name[?]: Type;`.
    ///
    /// `public` is implicit there and the initializer is never printed.
    pub fn interface_member(&self) -> Code {
        self.declaration(&[Modifier::Public], false)
    }

    fn declaration(&self, implicit: &[Modifier], with_initializer: bool) -> Code {
        let mut head = emit_modifiers(&self.modifiers, implicit);
        head.push_str(&self.name);
        if self.optional {
            head.push('?');
        }
        head.push_str(": ");

        let mut code = self.doc.as_deref().map(jsdoc).unwrap_or_default();
        code.append(head).append(self.ty.clone());
        if let Some(value) = self.initializer.as_ref().filter(|_| with_initializer) {
            code.append(" = ").append(value.clone());
        }
        code.push(";\n")
    }
}

impl Renderable for PropertySpec {
    /// Class property form, including the initializer.
    fn to_code(&self) -> Code {
        self.declaration(&[], true)
    }
}
