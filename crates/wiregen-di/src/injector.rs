//! Injectors
//!
//! [`RuntimeInjector`] serves the types it holds factories for and hands
//! everything else to a fallback injector. The end of such a chain is
//! usually an [`AutowiringInjector`], which resolves and executes a plan on
//! every call.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::container::InjectorContainer;
use crate::stack::ActiveStack;
use crate::{
    ClassCatalog, ConfigStore, ConstructionPlan, ContainerStrategy, DependencyResolver, DiResult,
    HostContainer, InjectionContext, Instance, Instantiator, Options, TypeIntrospector,
    TypeRegistry,
};

/// Creates instances by type name
pub trait Injector: Send + Sync {
    /// Whether this injector, or one it delegates to, can create `name`
    fn can_create(&self, name: &str) -> bool;

    /// Creates a new instance; `options` take precedence over every other
    /// source for parameters of the same name
    fn create(&self, name: &str, options: &Options) -> DiResult<Instance>;
}

/// Creates instances of one type, typically generated ahead of time
pub trait Factory: Send + Sync {
    fn create(&self, ctx: &InjectionContext<'_>, options: &Options) -> DiResult<Instance>;
}

/// Where a [`RuntimeInjector`] gets a factory from
#[derive(Clone)]
pub enum FactorySource {
    /// A ready factory value
    Instance(Arc<dyn Factory>),
    /// Built on first use, then reused
    Constructor(fn() -> Arc<dyn Factory>),
}

impl FactorySource {
    pub fn instance<F: Factory + 'static>(factory: F) -> Self {
        Self::Instance(Arc::new(factory))
    }

    pub fn constructor(constructor: fn() -> Arc<dyn Factory>) -> Self {
        Self::Constructor(constructor)
    }

    fn materialize(&self) -> Arc<dyn Factory> {
        match self {
            Self::Instance(factory) => Arc::clone(factory),
            Self::Constructor(constructor) => constructor(),
        }
    }
}

impl std::fmt::Debug for FactorySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Instance(_) => f.write_str("Instance(..)"),
            Self::Constructor(_) => f.write_str("Constructor(..)"),
        }
    }
}

/// A factory that executes a stored construction plan
#[derive(Debug, Clone)]
pub struct PlanFactory {
    plan: ConstructionPlan,
}

impl PlanFactory {
    pub fn new(plan: ConstructionPlan) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> &ConstructionPlan {
        &self.plan
    }
}

impl Factory for PlanFactory {
    fn create(&self, ctx: &InjectionContext<'_>, options: &Options) -> DiResult<Instance> {
        ctx.execute(&self.plan, options)
    }
}

fn with_container<R>(
    strategy: &ContainerStrategy,
    injector: &dyn Injector,
    f: impl FnOnce(&dyn HostContainer) -> R,
) -> R {
    match strategy {
        ContainerStrategy::Host(container) => f(container.as_ref()),
        ContainerStrategy::SelfAsContainer => f(&InjectorContainer::new(injector)),
    }
}

/// Factory-backed injector with a fallback for unknown types.
///
/// Factories are materialized at most once and reused for the lifetime of
/// the injector.
pub struct RuntimeInjector {
    factories: BTreeMap<String, FactorySource>,
    instances: Mutex<HashMap<String, Arc<dyn Factory>>>,
    fallback: Arc<dyn Injector>,
    instantiator: Arc<dyn Instantiator>,
    container: ContainerStrategy,
    active: ActiveStack,
}

impl RuntimeInjector {
    pub fn new<I, S>(
        factories: I,
        fallback: Arc<dyn Injector>,
        instantiator: Arc<dyn Instantiator>,
        container: ContainerStrategy,
    ) -> Self
    where
        I: IntoIterator<Item = (S, FactorySource)>,
        S: Into<String>,
    {
        Self {
            factories: factories
                .into_iter()
                .map(|(name, source)| (name.into(), source))
                .collect(),
            instances: Mutex::new(HashMap::new()),
            fallback,
            instantiator,
            container,
            active: ActiveStack::default(),
        }
    }

    pub fn has_factory(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn factory_names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Number of factories built so far
    pub fn materialized_count(&self) -> usize {
        self.instances.lock().len()
    }

    fn factory(&self, name: &str) -> Option<Arc<dyn Factory>> {
        let source = self.factories.get(name)?;
        let mut instances = self.instances.lock();
        let factory = instances.entry(name.to_string()).or_insert_with(|| {
            debug!("Materializing factory for '{}'", name);
            source.materialize()
        });
        Some(Arc::clone(factory))
    }
}

impl Injector for RuntimeInjector {
    fn can_create(&self, name: &str) -> bool {
        self.has_factory(name) || self.fallback.can_create(name)
    }

    fn create(&self, name: &str, options: &Options) -> DiResult<Instance> {
        let Some(factory) = self.factory(name) else {
            return self.fallback.create(name, options);
        };

        let _guard = self.active.enter(name)?;
        with_container(&self.container, self, |container| {
            let ctx = InjectionContext::new(container, self.instantiator.as_ref());
            factory.create(&ctx, options)
        })
    }
}

/// Resolves and executes a plan on every call
pub struct AutowiringInjector {
    resolver: Arc<DependencyResolver>,
    instantiator: Arc<dyn Instantiator>,
    container: ContainerStrategy,
    active: ActiveStack,
}

impl AutowiringInjector {
    pub fn new(
        resolver: Arc<DependencyResolver>,
        instantiator: Arc<dyn Instantiator>,
        container: ContainerStrategy,
    ) -> Self {
        Self {
            resolver,
            instantiator,
            container,
            active: ActiveStack::default(),
        }
    }

    pub fn resolver(&self) -> &Arc<DependencyResolver> {
        &self.resolver
    }

    pub fn instantiator(&self) -> &Arc<dyn Instantiator> {
        &self.instantiator
    }
}

impl Injector for AutowiringInjector {
    fn can_create(&self, name: &str) -> bool {
        self.resolver.can_resolve(name)
    }

    fn create(&self, name: &str, options: &Options) -> DiResult<Instance> {
        let _guard = self.active.enter(name)?;
        let plan = self.resolver.resolve(name, None, options)?;
        with_container(&self.container, self, |container| {
            InjectionContext::new(container, self.instantiator.as_ref()).execute(&plan, options)
        })
    }
}

/// Builder for an [`AutowiringInjector`] over a single metadata source
pub struct InjectorBuilder {
    introspector: Arc<dyn TypeIntrospector>,
    instantiator: Arc<dyn Instantiator>,
    config: ConfigStore,
    explicit_classes: Vec<String>,
    container: ContainerStrategy,
}

impl InjectorBuilder {
    /// Uses `source` both for metadata and for instantiation
    pub fn new<T>(source: Arc<T>) -> Self
    where
        T: TypeIntrospector + Instantiator + 'static,
    {
        Self {
            introspector: source.clone(),
            instantiator: source,
            config: ConfigStore::new(),
            explicit_classes: Vec::new(),
            container: ContainerStrategy::SelfAsContainer,
        }
    }

    pub fn from_catalog(catalog: ClassCatalog) -> Self {
        Self::new(Arc::new(catalog))
    }

    pub fn config(mut self, config: ConfigStore) -> Self {
        self.config = config;
        self
    }

    pub fn explicit_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.explicit_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn container(mut self, container: ContainerStrategy) -> Self {
        self.container = container;
        self
    }

    /// The resolver this builder would wire into the injector
    pub fn build_resolver(&self) -> DiResult<Arc<DependencyResolver>> {
        let registry = TypeRegistry::with_explicit_classes(
            Arc::clone(&self.introspector),
            self.explicit_classes.iter().cloned(),
        )?;
        Ok(Arc::new(DependencyResolver::new(
            Arc::new(registry),
            Arc::new(self.config.clone()),
        )))
    }

    pub fn build(self) -> DiResult<AutowiringInjector> {
        let resolver = self.build_resolver()?;
        Ok(AutowiringInjector::new(
            resolver,
            self.instantiator,
            self.container,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Argument, DiError, Parameter};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct Engine {
        power: i64,
    }

    struct Car {
        engine: Arc<Engine>,
    }

    fn catalog() -> ClassCatalog {
        let mut catalog = ClassCatalog::new();
        catalog
            .class(
                "Engine",
                vec![Parameter::builtin("power", "int").with_default(json!(100))],
                |args| Ok(Arc::new(Engine { power: args.value("power")? })),
            )
            .unwrap()
            .class("Car", vec![Parameter::object("engine", "Engine")], |args| {
                Ok(Arc::new(Car {
                    engine: args.instance("engine")?,
                }))
            })
            .unwrap();
        catalog
    }

    static BUILT: AtomicUsize = AtomicUsize::new(0);

    struct FixedEngineFactory;

    impl Factory for FixedEngineFactory {
        fn create(&self, ctx: &InjectionContext<'_>, options: &Options) -> DiResult<Instance> {
            let power = options.resolve_or("power", || Ok(json!(7).into()))?;
            ctx.instantiate(crate::ConstructorArgs::new("Engine").with("power", power))
        }
    }

    fn build_fixed_engine() -> Arc<dyn Factory> {
        BUILT.fetch_add(1, Ordering::SeqCst);
        Arc::new(FixedEngineFactory)
    }

    #[test]
    fn test_autowiring_resolves_lookups_through_itself() {
        let injector = InjectorBuilder::from_catalog(catalog()).build().unwrap();

        let car = injector
            .create("Car", &Options::new())
            .unwrap()
            .downcast::<Car>()
            .unwrap();
        assert_eq!(car.engine.power, 100);
    }

    #[test]
    fn test_runtime_injector_memoizes_and_falls_back() {
        let catalog = Arc::new(catalog());
        let fallback = Arc::new(InjectorBuilder::new(catalog.clone()).build().unwrap());
        let injector = RuntimeInjector::new(
            [("Engine", FactorySource::constructor(build_fixed_engine))],
            fallback,
            catalog,
            ContainerStrategy::SelfAsContainer,
        );

        assert!(injector.can_create("Engine"));
        assert!(injector.can_create("Car"));
        assert!(!injector.can_create("Boat"));

        for _ in 0..3 {
            let engine = injector
                .create("Engine", &Options::new())
                .unwrap()
                .downcast::<Engine>()
                .unwrap();
            assert_eq!(engine.power, 7);
        }
        assert_eq!(BUILT.load(Ordering::SeqCst), 1);
        assert_eq!(injector.materialized_count(), 1);

        // Car comes from the fallback; its engine lookup is answered by the
        // fallback's own container.
        let car = injector
            .create("Car", &Options::new())
            .unwrap()
            .downcast::<Car>()
            .unwrap();
        assert_eq!(car.engine.power, 100);

        let custom = injector
            .create("Engine", &Options::new().with("power", json!(9)))
            .unwrap()
            .downcast::<Engine>()
            .unwrap();
        assert_eq!(custom.power, 9);
    }

    #[test]
    fn test_plan_factory_applies_call_time_options() {
        let catalog = Arc::new(catalog());
        let resolver = InjectorBuilder::new(catalog.clone()).build_resolver().unwrap();
        let plan = resolver.resolve("Engine", None, &Options::new()).unwrap();
        let fallback = Arc::new(InjectorBuilder::new(catalog.clone()).build().unwrap());

        let injector = RuntimeInjector::new(
            [("Engine", FactorySource::instance(PlanFactory::new(plan)))],
            fallback,
            catalog,
            ContainerStrategy::SelfAsContainer,
        );

        let engine = injector
            .create("Engine", &Options::new().with("power", Argument::Value(json!(42))))
            .unwrap()
            .downcast::<Engine>()
            .unwrap();
        assert_eq!(engine.power, 42);
    }

    #[test]
    fn test_runtime_lookup_cycle_detected() {
        let mut catalog = ClassCatalog::new();
        catalog
            .class("Chicken", vec![Parameter::object("egg", "Egg")], |_| {
                Ok(Arc::new(()))
            })
            .unwrap()
            .class("Egg", vec![Parameter::object("chicken", "Chicken")], |_| {
                Ok(Arc::new(()))
            })
            .unwrap();

        let injector = InjectorBuilder::from_catalog(catalog).build().unwrap();
        let err = injector.create("Chicken", &Options::new()).err().unwrap();
        assert_eq!(
            err,
            DiError::CircularDependency {
                chain: vec!["Chicken".into(), "Egg".into(), "Chicken".into()]
            }
        );
    }
}
