//! Constructor metadata
//!
//! A [`ClassDefinition`] describes the ordered constructor parameters of one
//! type. Definitions come from a [`TypeIntrospector`]; this crate never
//! invents them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{DiError, DiResult};

/// Declared type of a parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum TypeHint {
    /// No declared type
    Untyped,
    /// A scalar or other built-in type such as `string` or `int`
    Builtin(String),
    /// A constructible or abstract object type
    Object(String),
}

impl TypeHint {
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin(_))
    }

    /// The object type name, if this parameter takes an object
    pub fn object_type(&self) -> Option<&str> {
        match self {
            Self::Object(name) => Some(name),
            _ => None,
        }
    }
}

/// One constructor parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub position: usize,
    pub type_hint: TypeHint,
    pub default: Option<Value>,
    pub required: bool,
}

impl Parameter {
    /// A required parameter; the position is assigned by [`ClassDefinition::new`]
    pub fn new(name: impl Into<String>, type_hint: TypeHint) -> Self {
        Self {
            name: name.into(),
            position: 0,
            type_hint,
            default: None,
            required: true,
        }
    }

    pub fn builtin(name: impl Into<String>, builtin: impl Into<String>) -> Self {
        Self::new(name, TypeHint::Builtin(builtin.into()))
    }

    pub fn object(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, TypeHint::Object(type_name.into()))
    }

    pub fn untyped(name: impl Into<String>) -> Self {
        Self::new(name, TypeHint::Untyped)
    }

    /// Attaches a default value; a parameter with a default is never required
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self.required = false;
        self
    }

    /// Marks the parameter optional without giving it a default
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn is_builtin(&self) -> bool {
        self.type_hint.is_builtin()
    }
}

/// Whether a type can be instantiated directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Concrete,
    /// Interfaces and abstract classes; only reachable through a preference
    Abstract,
}

/// Ordered parameter list for one type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    name: String,
    kind: TypeKind,
    parameters: Vec<Parameter>,
}

impl ClassDefinition {
    /// Creates a concrete definition, numbering parameters in declaration order
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>) -> DiResult<Self> {
        let name = name.into();
        let mut seen = std::collections::HashSet::new();
        let mut numbered = Vec::with_capacity(parameters.len());

        for (position, mut parameter) in parameters.into_iter().enumerate() {
            if !seen.insert(parameter.name.clone()) {
                return Err(DiError::configuration(format!(
                    "duplicate parameter '{}' on '{}'",
                    parameter.name, name
                )));
            }
            if parameter.default.is_some() {
                parameter.required = false;
            }
            parameter.position = position;
            numbered.push(parameter);
        }

        Ok(Self {
            name,
            kind: TypeKind::Concrete,
            parameters: numbered,
        })
    }

    /// An interface or abstract type with no constructor of its own
    pub fn abstract_type(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Abstract,
            parameters: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_instantiable(&self) -> bool {
        self.kind == TypeKind::Concrete
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// Source of raw constructor metadata
pub trait TypeIntrospector: Send + Sync {
    /// Whether the type is known at all
    fn exists(&self, type_name: &str) -> bool;

    /// Describes a known type; fails with [`DiError::NotFound`] otherwise
    fn describe(&self, type_name: &str) -> DiResult<ClassDefinition>;
}

impl<T: TypeIntrospector + ?Sized> TypeIntrospector for Arc<T> {
    fn exists(&self, type_name: &str) -> bool {
        (**self).exists(type_name)
    }

    fn describe(&self, type_name: &str) -> DiResult<ClassDefinition> {
        (**self).describe(type_name)
    }
}
