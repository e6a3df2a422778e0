//! Host container boundary
//!
//! Injectors hand deferred lookups to a [`HostContainer`]. When no external
//! container is involved, [`ContainerStrategy::SelfAsContainer`] routes the
//! lookups back through the injector itself.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::{DiError, DiResult, Injector, Instance, Options};

/// Service id under which [`DefaultContainer`] exposes its injector
pub const INJECTOR_SERVICE: &str = "wiregen.injector";

/// Minimal service container interface
pub trait HostContainer: Send + Sync {
    fn get(&self, id: &str) -> DiResult<Instance>;
    fn has(&self, id: &str) -> bool;
}

/// Which container an injector hands deferred lookups to
#[derive(Clone)]
pub enum ContainerStrategy {
    /// An external container
    Host(Arc<dyn HostContainer>),
    /// The injector answers its own lookups
    SelfAsContainer,
}

impl std::fmt::Debug for ContainerStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Host(_) => f.write_str("Host(..)"),
            Self::SelfAsContainer => f.write_str("SelfAsContainer"),
        }
    }
}

/// Adapts an injector into a container for the duration of one call
pub(crate) struct InjectorContainer<'a> {
    injector: &'a dyn Injector,
}

impl<'a> InjectorContainer<'a> {
    pub(crate) fn new(injector: &'a dyn Injector) -> Self {
        Self { injector }
    }
}

impl HostContainer for InjectorContainer<'_> {
    fn get(&self, id: &str) -> DiResult<Instance> {
        self.injector.create(id, &Options::new())
    }

    fn has(&self, id: &str) -> bool {
        self.injector.can_create(id)
    }
}

/// Handle stored in a container so that [`AutowireFactory`] can find the injector
pub struct InjectorService(pub Arc<dyn Injector>);

/// A container that creates services through an injector and shares them.
///
/// Every id is created at most once; later `get` calls return the same
/// instance.
pub struct DefaultContainer {
    injector: Arc<dyn Injector>,
    services: Mutex<HashMap<String, Instance>>,
}

impl DefaultContainer {
    pub fn new(injector: Arc<dyn Injector>) -> Self {
        let mut services: HashMap<String, Instance> = HashMap::new();
        services.insert(
            INJECTOR_SERVICE.to_string(),
            Arc::new(InjectorService(Arc::clone(&injector))),
        );
        Self {
            injector,
            services: Mutex::new(services),
        }
    }

    /// Registers a ready-made service
    pub fn set_instance(&self, id: impl Into<String>, instance: Instance) {
        self.services.lock().insert(id.into(), instance);
    }

    pub fn injector(&self) -> &Arc<dyn Injector> {
        &self.injector
    }
}

impl HostContainer for DefaultContainer {
    fn get(&self, id: &str) -> DiResult<Instance> {
        if let Some(instance) = self.services.lock().get(id) {
            return Ok(Arc::clone(instance));
        }

        // The lock is not held while creating; construction may call back in.
        let instance = self.injector.create(id, &Options::new())?;
        debug!("Created shared service '{}'", id);

        let mut services = self.services.lock();
        Ok(Arc::clone(
            services.entry(id.to_string()).or_insert(instance),
        ))
    }

    fn has(&self, id: &str) -> bool {
        self.services.lock().contains_key(id) || self.injector.can_create(id)
    }
}

/// Creates services for a host container by delegating to the injector the
/// container exposes under [`INJECTOR_SERVICE`]
#[derive(Debug, Default, Clone, Copy)]
pub struct AutowireFactory;

impl AutowireFactory {
    pub fn can_create(&self, container: &dyn HostContainer, requested: &str) -> bool {
        if !container.has(INJECTOR_SERVICE) {
            return false;
        }
        match Self::injector(container) {
            Ok(injector) => injector.can_create(requested),
            Err(_) => false,
        }
    }

    pub fn create(
        &self,
        container: &dyn HostContainer,
        requested: &str,
        options: Option<&Options>,
    ) -> DiResult<Instance> {
        let injector = Self::injector(container)?;
        match options {
            Some(options) => injector.create(requested, options),
            None => injector.create(requested, &Options::new()),
        }
    }

    fn injector(container: &dyn HostContainer) -> DiResult<Arc<dyn Injector>> {
        container
            .get(INJECTOR_SERVICE)?
            .downcast::<InjectorService>()
            .map(|service| Arc::clone(&service.0))
            .map_err(|_| {
                DiError::configuration("could not get a dependency injector from the container")
            })
    }
}
