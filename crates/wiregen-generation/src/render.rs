//! Handlebars rendering of generated artifacts
//!
//! Templates only ever receive pre-encoded fragments: literals produced by
//! [`crate::literal`] and identifiers produced by [`crate::naming`].
//! Escaping is disabled since the output is Rust, not HTML.

use handlebars::{no_escape, Handlebars};
use serde::Serialize;

use crate::GenerationResult;

const FACTORY: &str = "factory";
const FACTORY_MAP: &str = "factory-map";
const INJECTOR: &str = "generated-injector";
const AUTOLOAD: &str = "autoload";

/// One constructor argument of a factory
#[derive(Debug, Clone, Serialize)]
pub struct ArgumentView {
    /// Parameter name as a string literal
    pub name: String,
    /// Expression producing the `Argument`
    pub expr: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FactoryView {
    pub type_literal: String,
    pub concrete_literal: String,
    pub struct_name: String,
    pub options_binding: &'static str,
    pub arguments: Vec<ArgumentView>,
}

/// A generated factory as listed in the factory map and module map
#[derive(Debug, Clone, Serialize)]
pub struct EntryView {
    pub type_literal: String,
    pub module: String,
    pub struct_name: String,
    pub path_literal: String,
}

#[derive(Serialize)]
struct EntriesView<'a> {
    entries: &'a [EntryView],
}

#[derive(Serialize)]
struct InjectorView<'a> {
    namespace: &'a str,
}

/// Renders the four artifact kinds
pub struct ArtifactRenderer {
    registry: Handlebars<'static>,
}

impl ArtifactRenderer {
    pub fn new() -> GenerationResult<Self> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(no_escape);
        registry.set_strict_mode(true);

        registry.register_template_string(FACTORY, include_str!("../../../templates/factory.rs"))?;
        registry.register_template_string(
            FACTORY_MAP,
            include_str!("../../../templates/factory-map.rs"),
        )?;
        registry.register_template_string(
            INJECTOR,
            include_str!("../../../templates/generated-injector.rs"),
        )?;
        registry
            .register_template_string(AUTOLOAD, include_str!("../../../templates/autoload.rs"))?;

        Ok(Self { registry })
    }

    pub fn factory(&self, view: &FactoryView) -> GenerationResult<String> {
        Ok(self.registry.render(FACTORY, view)?)
    }

    pub fn factory_map(&self, entries: &[EntryView]) -> GenerationResult<String> {
        Ok(self.registry.render(FACTORY_MAP, &EntriesView { entries })?)
    }

    /// The injector skeleton; constant apart from `namespace`
    pub fn injector(&self, namespace: &str) -> GenerationResult<String> {
        Ok(self.registry.render(INJECTOR, &InjectorView { namespace })?)
    }

    pub fn autoload(&self, entries: &[EntryView]) -> GenerationResult<String> {
        Ok(self.registry.render(AUTOLOAD, &EntriesView { entries })?)
    }
}
