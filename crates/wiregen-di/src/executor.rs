//! Plan execution

use crate::{
    Argument, Binding, ConstructionPlan, ConstructorArgs, DiResult, HostContainer, Instance,
    Options,
};

/// Builds instances from fully bound constructor arguments
pub trait Instantiator: Send + Sync {
    fn instantiate(&self, args: ConstructorArgs) -> DiResult<Instance>;
}

/// What a factory gets to work with: the container for deferred lookups and
/// the instantiator for constructor calls
#[derive(Clone, Copy)]
pub struct InjectionContext<'a> {
    container: &'a dyn HostContainer,
    instantiator: &'a dyn Instantiator,
}

impl<'a> InjectionContext<'a> {
    pub fn new(container: &'a dyn HostContainer, instantiator: &'a dyn Instantiator) -> Self {
        Self {
            container,
            instantiator,
        }
    }

    pub fn container(&self) -> &'a dyn HostContainer {
        self.container
    }

    /// Fetches a dependency from the host container
    pub fn lookup(&self, type_name: &str) -> DiResult<Instance> {
        self.container.get(type_name)
    }

    pub fn instantiate(&self, args: ConstructorArgs) -> DiResult<Instance> {
        self.instantiator.instantiate(args)
    }

    /// Executes `plan`; call-time `options` replace bindings of the same name
    pub fn execute(&self, plan: &ConstructionPlan, options: &Options) -> DiResult<Instance> {
        let mut args = ConstructorArgs::new(&plan.type_name);
        for parameter in &plan.bindings {
            let argument =
                options.resolve_or(&parameter.name, || self.realize(&parameter.binding))?;
            args.push(&parameter.name, argument);
        }
        self.instantiate(args)
    }

    fn realize(&self, binding: &Binding) -> DiResult<Argument> {
        match binding {
            Binding::Literal(argument) => Ok(argument.clone()),
            Binding::NestedPlan(plan) => self.execute(plan, &Options::new()).map(Argument::Instance),
            Binding::DeferredLookup(type_name) => self.lookup(type_name).map(Argument::Instance),
        }
    }
}
