//! Type registry with a memoizing definition cache

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::{ClassDefinition, DiError, DiResult, TypeIntrospector};

/// Definitions are stored once in an arena and looked up by index
#[derive(Default)]
struct DefinitionCache {
    arena: Vec<Arc<ClassDefinition>>,
    index: HashMap<String, usize>,
}

impl DefinitionCache {
    fn get(&self, type_name: &str) -> Option<Arc<ClassDefinition>> {
        self.index
            .get(type_name)
            .map(|&slot| Arc::clone(&self.arena[slot]))
    }

    fn insert(&mut self, type_name: &str, definition: ClassDefinition) -> Arc<ClassDefinition> {
        if let Some(existing) = self.get(type_name) {
            return existing;
        }
        let definition = Arc::new(definition);
        self.index.insert(type_name.to_string(), self.arena.len());
        self.arena.push(Arc::clone(&definition));
        definition
    }
}

/// Exposes constructor metadata for types, loading lazily from a
/// [`TypeIntrospector`].
///
/// Cached definitions live as long as the registry.
pub struct TypeRegistry {
    introspector: Arc<dyn TypeIntrospector>,
    cache: RwLock<DefinitionCache>,
    explicit: BTreeSet<String>,
}

impl TypeRegistry {
    pub fn new(introspector: Arc<dyn TypeIntrospector>) -> Self {
        Self {
            introspector,
            cache: RwLock::new(DefinitionCache::default()),
            explicit: BTreeSet::new(),
        }
    }

    /// Creates a registry that reports `classes` even before they are loaded
    pub fn with_explicit_classes<I, S>(
        introspector: Arc<dyn TypeIntrospector>,
        classes: I,
    ) -> DiResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new(introspector);
        registry.set_explicit_classes(classes)?;
        Ok(registry)
    }

    /// All explicitly registered and already loaded types, sorted
    pub fn get_classes(&self) -> BTreeSet<String> {
        let cache = self.cache.read();
        self.explicit
            .iter()
            .cloned()
            .chain(cache.index.keys().cloned())
            .collect()
    }

    pub fn has_class(&self, type_name: &str) -> bool {
        self.introspector.exists(type_name)
    }

    /// Loads and caches the definition on first access
    pub fn get_class_definition(&self, type_name: &str) -> DiResult<Arc<ClassDefinition>> {
        if let Some(definition) = self.cache.read().get(type_name) {
            return Ok(definition);
        }

        self.ensure_class_exists(type_name)?;
        let definition = self.introspector.describe(type_name)?;
        debug!(
            "Loaded definition for '{}' ({} parameters)",
            type_name,
            definition.parameters().len()
        );
        Ok(self.cache.write().insert(type_name, definition))
    }

    /// Replaces the explicit class list, validating each entry
    pub fn set_explicit_classes<I, S>(&mut self, classes: I) -> DiResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut explicit = BTreeSet::new();
        for class in classes {
            let class = class.into();
            self.ensure_class_exists(&class)?;
            explicit.insert(class);
        }
        self.explicit = explicit;
        Ok(self)
    }

    /// Reports `type_name` from [`Self::get_classes`] without loading it
    pub fn add_explicit_class(&mut self, type_name: impl Into<String>) -> DiResult<&mut Self> {
        let type_name = type_name.into();
        self.ensure_class_exists(&type_name)?;
        self.explicit.insert(type_name);
        Ok(self)
    }

    fn ensure_class_exists(&self, type_name: &str) -> DiResult<()> {
        if self.has_class(type_name) {
            Ok(())
        } else {
            Err(DiError::not_found(type_name))
        }
    }
}
