//! Values passed into constructors
//!
//! Constructor arguments are either plain data ([`serde_json::Value`]) or
//! already constructed instances. Call-time [`Options`] use the same
//! representation so that a caller can hand over an existing object for a
//! parameter as easily as a literal.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::{DiError, DiResult};

/// A type-erased constructed object
pub type Instance = Arc<dyn Any + Send + Sync>;

/// A single value handed to a constructor
#[derive(Clone)]
pub enum Argument {
    /// Plain data
    Value(Value),
    /// An already constructed object
    Instance(Instance),
}

impl Argument {
    /// Wrap a concrete object
    pub fn instance<T: Any + Send + Sync>(instance: Arc<T>) -> Self {
        Self::Instance(instance)
    }

    /// The `null` argument bound to optional parameters without a default
    pub fn null() -> Self {
        Self::Value(Value::Null)
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Instance(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Instance(_) => f.write_str("Instance(..)"),
        }
    }
}

impl PartialEq for Argument {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::Instance(a), Self::Instance(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl Serialize for Argument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Instance(_) => Err(serde::ser::Error::custom(
                "object instances cannot be serialized",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Argument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::Value)
    }
}

/// Call-time options, keyed by parameter name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    values: BTreeMap<String, Argument>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, argument: impl Into<Argument>) -> Self {
        self.insert(name, argument);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, argument: impl Into<Argument>) {
        self.values.insert(name.into(), argument.into());
    }

    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Returns the call-time value for `name`, or evaluates `fallback`.
    ///
    /// Generated factories use this so that call-time options win over
    /// whatever was decided at generation time.
    pub fn resolve_or<F>(&self, name: &str, fallback: F) -> DiResult<Argument>
    where
        F: FnOnce() -> DiResult<Argument>,
    {
        match self.values.get(name) {
            Some(argument) => Ok(argument.clone()),
            None => fallback(),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Argument)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, Argument)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Ordered, named arguments for one constructor invocation
#[derive(Debug, Clone)]
pub struct ConstructorArgs {
    type_name: String,
    args: Vec<(String, Argument)>,
}

impl ConstructorArgs {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            args: Vec::new(),
        }
    }

    /// Builder-style push
    pub fn with(mut self, name: impl Into<String>, argument: Argument) -> Self {
        self.push(name, argument);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, argument: Argument) {
        self.args.push((name.into(), argument));
    }

    /// The type being constructed
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Argument)> {
        self.args.iter().map(|(name, arg)| (name.as_str(), arg))
    }

    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.args
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, arg)| arg)
    }

    fn require(&self, name: &str) -> DiResult<&Argument> {
        self.get(name).ok_or_else(|| {
            DiError::construction(&self.type_name, format!("no argument named '{}'", name))
        })
    }

    /// Deserializes a data argument into `T`
    pub fn value<T: DeserializeOwned>(&self, name: &str) -> DiResult<T> {
        match self.require(name)? {
            Argument::Value(value) => serde_json::from_value(value.clone()).map_err(|e| {
                DiError::construction(&self.type_name, format!("argument '{}': {}", name, e))
            }),
            Argument::Instance(_) => Err(DiError::construction(
                &self.type_name,
                format!("argument '{}' is an object, expected data", name),
            )),
        }
    }

    /// Downcasts an object argument into `T`
    pub fn instance<T: Any + Send + Sync>(&self, name: &str) -> DiResult<Arc<T>> {
        match self.require(name)? {
            Argument::Instance(instance) => instance.clone().downcast::<T>().map_err(|_| {
                DiError::construction(
                    &self.type_name,
                    format!(
                        "argument '{}' is not a {}",
                        name,
                        std::any::type_name::<T>()
                    ),
                )
            }),
            Argument::Value(_) => Err(DiError::construction(
                &self.type_name,
                format!("argument '{}' is data, expected an object", name),
            )),
        }
    }

    /// Like [`Self::instance`] but maps a `null` argument to `None`
    pub fn optional_instance<T: Any + Send + Sync>(&self, name: &str) -> DiResult<Option<Arc<T>>> {
        if self.require(name)?.is_null() {
            return Ok(None);
        }
        self.instance(name).map(Some)
    }
}
