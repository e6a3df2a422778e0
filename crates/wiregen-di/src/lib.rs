//! Autowiring dependency injection
//!
//! This crate resolves, for any requested type name, which constructor
//! arguments to supply and where they come from. Inputs are constructor
//! metadata (from a [`TypeIntrospector`]) and a [`ConfigStore`] of aliases,
//! parameter overrides and type preferences.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use wiregen_di::{ClassCatalog, ConfigStore, Injector, InjectorBuilder, Options, Parameter};
//!
//! struct Mailer { host: String }
//!
//! let mut catalog = ClassCatalog::new();
//! catalog
//!     .class("Mailer", vec![Parameter::builtin("host", "string")], |args| {
//!         Ok(Arc::new(Mailer { host: args.value("host")? }))
//!     })
//!     .unwrap();
//!
//! let mut config = ConfigStore::new();
//! config.set_parameter("Mailer", "host", json!("smtp.local"));
//!
//! let injector = InjectorBuilder::from_catalog(catalog).config(config).build().unwrap();
//! let mailer = injector.create("Mailer", &Options::new()).unwrap();
//! assert_eq!(mailer.downcast::<Mailer>().unwrap().host, "smtp.local");
//! ```
//!
//! Plans can also be computed ahead of time and compiled into factories;
//! see the `wiregen-generation` crate.

pub mod argument;
pub mod catalog;
pub mod config;
pub mod container;
pub mod definition;
pub mod error;
pub mod executor;
pub mod injector;
pub mod plan;
pub mod registry;
pub mod resolver;
mod stack;

pub use argument::{Argument, ConstructorArgs, Instance, Options};
pub use catalog::{ClassCatalog, Constructor};
pub use config::{ConfigStore, InjectorSettings, TypeSettings};
pub use container::{
    AutowireFactory, ContainerStrategy, DefaultContainer, HostContainer, InjectorService,
    INJECTOR_SERVICE,
};
pub use definition::{ClassDefinition, Parameter, TypeHint, TypeIntrospector, TypeKind};
pub use error::{DiError, DiResult};
pub use executor::{InjectionContext, Instantiator};
pub use injector::{
    AutowiringInjector, Factory, FactorySource, Injector, InjectorBuilder, PlanFactory,
    RuntimeInjector,
};
pub use plan::{Binding, ConstructionPlan, ParameterBinding};
pub use registry::TypeRegistry;
pub use resolver::DependencyResolver;
