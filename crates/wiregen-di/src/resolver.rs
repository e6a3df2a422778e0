//! Dependency resolution
//!
//! Turns a requested type name, an optional consuming context and call-time
//! options into a [`ConstructionPlan`]. Each parameter is bound by the first
//! rule that applies:
//!
//! 1. a call-time option with the parameter's name
//! 2. a configured parameter override
//! 3. a type preference for the parameter's object type, resolved as a nested plan
//! 4. the parameter's default value
//! 5. `null` for optional built-in or object parameters
//! 6. a container lookup for remaining object parameters of known types
//!
//! Overrides and context preferences are looked up per scope: first under
//! each alias the request went through, nearest first, then under the
//! concrete type. Anything unbound is a [`DiError::MissingParameter`], and
//! a lookup of a type the registry does not know is [`DiError::NotFound`].
//! Resolution is all-or-nothing: either every parameter is bound or an
//! error is returned.

use std::sync::Arc;

use tracing::debug;

use crate::{
    Argument, Binding, ClassDefinition, ConfigStore, ConstructionPlan, DiError, DiResult, Options,
    Parameter, ParameterBinding, TypeRegistry,
};

/// Resolves construction plans from registry metadata and configuration
pub struct DependencyResolver {
    registry: Arc<TypeRegistry>,
    config: Arc<ConfigStore>,
}

impl DependencyResolver {
    pub fn new(registry: Arc<TypeRegistry>, config: Arc<ConfigStore>) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &Arc<ConfigStore> {
        &self.config
    }

    /// Resolves a fresh plan for `requested`
    pub fn resolve(
        &self,
        requested: &str,
        context: Option<&str>,
        options: &Options,
    ) -> DiResult<ConstructionPlan> {
        let mut stack = Vec::new();
        self.resolve_with_stack(requested, context, options, &mut stack)
    }

    /// Whether `name` leads to something instantiable, without binding parameters
    pub fn can_resolve(&self, name: &str) -> bool {
        self.resolve_type(name, None).is_ok()
    }

    /// Follows aliases and, for abstract types, preferences until a concrete
    /// definition is reached
    pub fn resolve_type(
        &self,
        requested: &str,
        context: Option<&str>,
    ) -> DiResult<Arc<ClassDefinition>> {
        let mut chain: Vec<String> = Vec::new();
        let mut current = self.resolve_alias(requested)?;

        loop {
            let definition = self.registry.get_class_definition(&current)?;
            if definition.is_instantiable() {
                return Ok(definition);
            }

            let preferred = self
                .config
                .get_type_preference(&current, context)
                .ok_or_else(|| DiError::NotInstantiable {
                    type_name: current.clone(),
                })?;
            debug!("Preferring '{}' for abstract '{}'", preferred, current);

            chain.push(current);
            let next = self.resolve_alias(preferred)?;
            if chain.contains(&next) {
                chain.push(next);
                return Err(DiError::CircularAlias { chain });
            }
            current = next;
        }
    }

    /// Follows the alias chain of `name` to its end
    pub fn resolve_alias(&self, name: &str) -> DiResult<String> {
        let mut chain = self.alias_chain(name)?;
        Ok(chain.pop().unwrap_or_else(|| name.to_string()))
    }

    /// `name` followed by every alias target up to the final type
    pub fn alias_chain(&self, name: &str) -> DiResult<Vec<String>> {
        let mut chain = vec![name.to_string()];
        let mut current = name.to_string();

        while let Some(target) = self.config.get_class_for_alias(&current) {
            let revisits = chain.iter().any(|seen| seen == target);
            chain.push(target.to_string());
            if revisits {
                return Err(DiError::CircularAlias { chain });
            }
            debug!("Alias '{}' -> '{}'", current, target);
            current = target.to_string();
        }

        Ok(chain)
    }

    fn resolve_with_stack(
        &self,
        requested: &str,
        context: Option<&str>,
        options: &Options,
        stack: &mut Vec<String>,
    ) -> DiResult<ConstructionPlan> {
        let definition = self.resolve_type(requested, context)?;
        let type_name = definition.name().to_string();

        // Aliases passed on the way, nearest first, then the concrete type
        let mut scopes = self.alias_chain(requested)?;
        scopes.pop();
        scopes.push(type_name.clone());

        if stack.contains(&type_name) {
            let mut chain = stack.clone();
            chain.push(type_name);
            return Err(DiError::CircularDependency { chain });
        }

        stack.push(type_name.clone());
        let bindings = definition
            .parameters()
            .iter()
            .map(|parameter| {
                self.bind_parameter(&scopes, parameter, options, stack)
                    .map(|binding| ParameterBinding {
                        name: parameter.name.clone(),
                        position: parameter.position,
                        binding,
                    })
            })
            .collect::<DiResult<Vec<_>>>();
        stack.pop();

        Ok(ConstructionPlan {
            requested: requested.to_string(),
            type_name,
            bindings: bindings?,
        })
    }

    fn bind_parameter(
        &self,
        scopes: &[String],
        parameter: &Parameter,
        options: &Options,
        stack: &mut Vec<String>,
    ) -> DiResult<Binding> {
        // The last scope is always the concrete type.
        let type_name = scopes.last().map(String::as_str).unwrap_or_default();

        if let Some(argument) = options.get(&parameter.name) {
            return Ok(Binding::Literal(argument.clone()));
        }

        let configured = scopes
            .iter()
            .find_map(|scope| self.config.get_parameter(scope, &parameter.name));
        if let Some(value) = configured {
            return Ok(Binding::Literal(Argument::Value(value.clone())));
        }

        let object_type = parameter.type_hint.object_type();

        if let Some(declared) = object_type {
            let preferred = scopes
                .iter()
                .find_map(|scope| self.config.get_context_preference(declared, scope))
                .or_else(|| self.config.get_type_preference(declared, None));
            if let Some(preferred) = preferred {
                debug!(
                    "'{}::{}' uses preferred type '{}' for '{}'",
                    type_name, parameter.name, preferred, declared
                );
                let nested =
                    self.resolve_with_stack(preferred, Some(type_name), &Options::new(), stack)?;
                return Ok(Binding::NestedPlan(Box::new(nested)));
            }
        }

        if let Some(default) = &parameter.default {
            return Ok(Binding::Literal(Argument::Value(default.clone())));
        }

        if !parameter.required && (parameter.is_builtin() || object_type.is_some()) {
            return Ok(Binding::Literal(Argument::null()));
        }

        match object_type {
            Some(declared) if !self.registry.has_class(declared) => {
                Err(DiError::not_found(declared))
            }
            Some(declared) => Ok(Binding::DeferredLookup(declared.to_string())),
            None => Err(DiError::missing_parameter(type_name, &parameter.name)),
        }
    }
}
