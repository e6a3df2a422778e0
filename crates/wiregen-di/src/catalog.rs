//! In-memory class catalog
//!
//! `ClassCatalog` is the simplest metadata source: every type is registered
//! up front with its parameter list and a constructor closure. It serves as
//! both the [`TypeIntrospector`] and the [`Instantiator`] of an injector.
//!
//! ```rust
//! use std::sync::Arc;
//! use wiregen_di::{ClassCatalog, Parameter};
//!
//! struct Greeter { greeting: String }
//!
//! let mut catalog = ClassCatalog::new();
//! catalog
//!     .class("Greeter", vec![Parameter::builtin("greeting", "string")], |args| {
//!         Ok(Arc::new(Greeter { greeting: args.value("greeting")? }))
//!     })
//!     .unwrap();
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::{
    ClassDefinition, ConstructorArgs, DiError, DiResult, Instance, Instantiator, Parameter,
    TypeIntrospector,
};

/// Constructor closure stored per type
pub type Constructor = Arc<dyn Fn(&ConstructorArgs) -> DiResult<Instance> + Send + Sync>;

struct CatalogEntry {
    definition: ClassDefinition,
    constructor: Option<Constructor>,
}

/// Registered types with their constructors
#[derive(Default)]
pub struct ClassCatalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl ClassCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a concrete type from an existing definition
    pub fn register<F>(&mut self, definition: ClassDefinition, constructor: F) -> &mut Self
    where
        F: Fn(&ConstructorArgs) -> DiResult<Instance> + Send + Sync + 'static,
    {
        debug!("Registered class: {}", definition.name());
        self.entries.insert(
            definition.name().to_string(),
            CatalogEntry {
                definition,
                constructor: Some(Arc::new(constructor)),
            },
        );
        self
    }

    /// Registers a concrete type from its parameter list
    pub fn class<F>(
        &mut self,
        name: impl Into<String>,
        parameters: Vec<Parameter>,
        constructor: F,
    ) -> DiResult<&mut Self>
    where
        F: Fn(&ConstructorArgs) -> DiResult<Instance> + Send + Sync + 'static,
    {
        let definition = ClassDefinition::new(name, parameters)?;
        Ok(self.register(definition, constructor))
    }

    /// Registers an interface or abstract type
    pub fn interface(&mut self, name: impl Into<String>) -> &mut Self {
        let definition = ClassDefinition::abstract_type(name);
        debug!("Registered abstract type: {}", definition.name());
        self.entries.insert(
            definition.name().to_string(),
            CatalogEntry {
                definition,
                constructor: None,
            },
        );
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl TypeIntrospector for ClassCatalog {
    fn exists(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    fn describe(&self, type_name: &str) -> DiResult<ClassDefinition> {
        self.entries
            .get(type_name)
            .map(|entry| entry.definition.clone())
            .ok_or_else(|| DiError::not_found(type_name))
    }
}

impl Instantiator for ClassCatalog {
    fn instantiate(&self, args: ConstructorArgs) -> DiResult<Instance> {
        let entry = self
            .entries
            .get(args.type_name())
            .ok_or_else(|| DiError::not_found(args.type_name()))?;

        let constructor = entry
            .constructor
            .as_ref()
            .ok_or_else(|| DiError::NotInstantiable {
                type_name: args.type_name().to_string(),
            })?;

        constructor(&args)
    }
}
