//! TypeScript interface builder.

use tspoet_codegen::{Code, List, TypeName, TypeVariable};

use super::{
    FunctionSpec, Modifier, PropertySpec, Renderable, doc::jsdoc, modifier::emit_modifiers,
};

/// Builder for TypeScript interfaces.
///
/// Members print in a fixed order: properties, index signatures, the call
/// signature, then methods. Each method is preceded by a blank line and the
/// last one is followed by one.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceSpec {
    pub name: String,
    pub doc: Option<String>,
    pub modifiers: Vec<Modifier>,
    pub type_variables: Vec<TypeVariable>,
    pub super_interfaces: Vec<TypeName>,
    pub properties: Vec<PropertySpec>,
    pub indexables: Vec<FunctionSpec>,
    pub callable: Option<FunctionSpec>,
    pub functions: Vec<FunctionSpec>,
}

impl InterfaceSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            modifiers: Vec::new(),
            type_variables: Vec::new(),
            super_interfaces: Vec::new(),
            properties: Vec::new(),
            indexables: Vec::new(),
            callable: None,
            functions: Vec::new(),
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

    pub fn type_variable(mut self, var: TypeVariable) -> Self {
        self.type_variables.push(var);
        self
    }

    pub fn super_interface(mut self, ty: impl Into<TypeName>) -> Self {
        self.super_interfaces.push(ty.into());
        self
    }

    pub fn property(mut self, property: PropertySpec) -> Self {
        self.properties.push(property);
        self
    }

    /// Add an index signature built with [`FunctionSpec::indexable`].
    pub fn indexable(mut self, indexable: FunctionSpec) -> Self {
        self.indexables.push(indexable);
        self
    }

    /// Set the call signature, replacing any previous one.
    pub fn callable(mut self, callable: FunctionSpec) -> Self {
        self.callable = Some(callable);
        self
    }

    pub fn function(mut self, function: FunctionSpec) -> Self {
        self.functions.push(function);
        self
    }

    fn header(&self) -> Code {
        let mut code = Code::new().text(format!(
            "{}interface {}",
            emit_modifiers(&self.modifiers, &[]),
            self.name
        ));
        if !self.type_variables.is_empty() {
            let vars = List::new(self.type_variables.iter().map(TypeVariable::declaration), ", ");
            code.append("<").append(vars).append(">");
        }
        if !self.super_interfaces.is_empty() {
            code.append(" extends ")
                .append(List::new(self.super_interfaces.iter().cloned(), ", "));
        }
        code
    }

    fn members(&self) -> Code {
        let mut body = Code::new();
        for property in &self.properties {
            body.append(property.interface_member());
        }
        for indexable in &self.indexables {
            body.append(indexable.interface_member());
        }
        if let Some(callable) = &self.callable {
            body.append(callable.interface_member());
        }
        if !self.functions.is_empty() {
            for function in &self.functions {
                body.append("\n").append(function.interface_member());
            }
            body.append("\n");
        }
        body
    }
}

impl Renderable for InterfaceSpec {
    fn to_code(&self) -> Code {
        let code = self.doc.as_deref().map(jsdoc).unwrap_or_default();
        code.push(self.header())
            .text(" {\n")
            .push(self.members())
            .text("}")
    }
}

impl From<InterfaceSpec> for Code {
    fn from(spec: InterfaceSpec) -> Self {
        spec.to_code()
    }
}
