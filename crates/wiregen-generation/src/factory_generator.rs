//! Factory generation for a single type
//!
//! A resolved [`ConstructionPlan`] becomes a Rust module holding one
//! [`wiregen_di::Factory`] implementation. Nested plans are inlined as
//! constructor calls and deferred lookups become container lookups, so the
//! emitted code executes the same plan a [`wiregen_di::PlanFactory`] would.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use wiregen_di::{Argument, Binding, ConstructionPlan, DependencyResolver, Options};

use crate::literal::{string_literal, value_expr};
use crate::naming::{artifact_id, artifact_path, factory_struct_name};
use crate::render::{ArgumentView, ArtifactRenderer, EntryView, FactoryView};
use crate::{GenerationError, GenerationResult};

/// Emitted source for one type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactoryArtifact {
    /// Requested type name the factory is registered under
    pub type_name: String,
    /// Module name, stable for a given type name
    pub artifact_id: String,
    /// Relative path of the source file
    pub path: String,
    pub struct_name: String,
    pub source: String,
    pub plan: ConstructionPlan,
}

impl FactoryArtifact {
    pub(crate) fn entry_view(&self) -> EntryView {
        EntryView {
            type_literal: string_literal(&self.type_name),
            module: self.artifact_id.clone(),
            struct_name: self.struct_name.clone(),
            path_literal: string_literal(&self.path),
        }
    }
}

/// Turns resolved plans into factory artifacts
pub struct FactoryGenerator {
    resolver: Arc<DependencyResolver>,
    renderer: Arc<ArtifactRenderer>,
}

impl FactoryGenerator {
    pub fn new(resolver: Arc<DependencyResolver>) -> GenerationResult<Self> {
        Ok(Self::with_renderer(resolver, Arc::new(ArtifactRenderer::new()?)))
    }

    pub fn with_renderer(resolver: Arc<DependencyResolver>, renderer: Arc<ArtifactRenderer>) -> Self {
        Self { resolver, renderer }
    }

    pub fn resolver(&self) -> &Arc<DependencyResolver> {
        &self.resolver
    }

    /// Generates the factory for `type_name`.
    ///
    /// Returns `Ok(None)` when the type cannot be built without caller
    /// input (a required parameter nothing supplies, or an abstract type
    /// with no preference); such types stay with the runtime path.
    pub fn generate(&self, type_name: &str) -> GenerationResult<Option<FactoryArtifact>> {
        match self.plan(type_name)? {
            Some(plan) => self.emit(plan).map(Some),
            None => Ok(None),
        }
    }

    /// Resolves the plan `generate` would emit, without emitting it
    pub fn plan(&self, type_name: &str) -> GenerationResult<Option<ConstructionPlan>> {
        match self.resolver.resolve(type_name, None, &Options::new()) {
            Ok(plan) => Ok(Some(plan)),
            Err(err) if err.requires_caller_input() => {
                debug!("No factory for '{}': {}", type_name, err);
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Emits the factory source for an already resolved plan
    pub fn emit(&self, plan: ConstructionPlan) -> GenerationResult<FactoryArtifact> {
        let artifact_id = artifact_id(&plan.requested);
        let struct_name = factory_struct_name(&plan.requested);

        let arguments = plan
            .bindings
            .iter()
            .map(|parameter| {
                Ok(ArgumentView {
                    name: string_literal(&parameter.name),
                    expr: argument_expr(&plan.type_name, &parameter.name, &parameter.binding)?,
                })
            })
            .collect::<GenerationResult<Vec<_>>>()?;

        let view = FactoryView {
            type_literal: string_literal(&plan.requested),
            concrete_literal: string_literal(&plan.type_name),
            struct_name: struct_name.clone(),
            options_binding: if arguments.is_empty() { "_options" } else { "options" },
            arguments,
        };
        let source = self.renderer.factory(&view)?;

        Ok(FactoryArtifact {
            type_name: plan.requested.clone(),
            path: artifact_path(&artifact_id),
            artifact_id,
            struct_name,
            source,
            plan,
        })
    }
}

/// Expression of type `Argument` for one binding; may use `?` on `DiResult`
fn argument_expr(type_name: &str, parameter: &str, binding: &Binding) -> GenerationResult<String> {
    match binding {
        Binding::Literal(Argument::Value(value)) => {
            Ok(format!("::wiregen_di::Argument::Value({})", value_expr(value)))
        }
        Binding::Literal(Argument::Instance(_)) => Err(GenerationError::UnrepresentableLiteral {
            type_name: type_name.to_string(),
            parameter: parameter.to_string(),
            reason: "object instances only exist at runtime".to_string(),
        }),
        Binding::DeferredLookup(dependency) => Ok(format!(
            "ctx.lookup({}).map(::wiregen_di::Argument::Instance)?",
            string_literal(dependency)
        )),
        Binding::NestedPlan(nested) => {
            let mut expr = format!(
                "ctx.instantiate(::wiregen_di::ConstructorArgs::new({})",
                string_literal(&nested.type_name)
            );
            for parameter in &nested.bindings {
                expr.push_str(&format!(
                    ".with({}, {})",
                    string_literal(&parameter.name),
                    argument_expr(&nested.type_name, &parameter.name, &parameter.binding)?
                ));
            }
            expr.push_str(").map(::wiregen_di::Argument::Instance)?");
            Ok(expr)
        }
    }
}
