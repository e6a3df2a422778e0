//! Lookup table of a generation run
//!
//! `manifest.json` records, for every generated type, its artifact and the
//! plan the artifact was emitted from. It is enough to rebuild an injector
//! with the same behavior as the compiled factories, without compiling them.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use wiregen_di::{
    ConstructionPlan, ContainerStrategy, FactorySource, Injector, Instantiator, PlanFactory,
    RuntimeInjector,
};

use crate::{FactoryArtifact, GenerationResult};

/// File name of the manifest inside the output directory
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub artifact_id: String,
    pub path: String,
    pub plan: ConstructionPlan,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationManifest {
    pub namespace: String,
    pub entries: BTreeMap<String, ManifestEntry>,
}

impl GenerationManifest {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn record(&mut self, artifact: &FactoryArtifact) {
        self.entries.insert(
            artifact.type_name.clone(),
            ManifestEntry {
                artifact_id: artifact.artifact_id.clone(),
                path: artifact.path.clone(),
                plan: artifact.plan.clone(),
            },
        );
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    /// Type whose factory already uses `artifact_id`
    pub fn owner_of(&self, artifact_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.artifact_id == artifact_id)
            .map(|(type_name, _)| type_name.as_str())
    }

    pub fn artifact_ids(&self) -> BTreeSet<String> {
        self.entries
            .values()
            .map(|entry| entry.artifact_id.clone())
            .collect()
    }

    pub fn to_json(&self) -> GenerationResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> GenerationResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> GenerationResult<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Builds an injector serving every recorded type from its plan and
    /// everything else from `fallback`
    pub fn into_injector(
        self,
        fallback: Arc<dyn Injector>,
        instantiator: Arc<dyn Instantiator>,
        container: ContainerStrategy,
    ) -> RuntimeInjector {
        let factories = self.entries.into_iter().map(|(type_name, entry)| {
            (type_name, FactorySource::instance(PlanFactory::new(entry.plan)))
        });
        RuntimeInjector::new(factories, fallback, instantiator, container)
    }
}
