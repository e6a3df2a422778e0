//! Batch generation of factories plus the injector skeleton
//!
//! [`InjectorGenerator::generate`] works through the requested types and
//! every configured type. A failure for one type is logged and recorded in
//! the [`GenerationReport`]; it never aborts the batch. Failing to store
//! the aggregate artifacts does abort, since the output would be unusable.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::info;
use wiregen_di::{ConfigStore, DependencyResolver};

use crate::logger::{GenerationLogger, TracingLogger};
use crate::manifest::{GenerationManifest, MANIFEST_FILE};
use crate::naming::{validate_namespace, DEFAULT_NAMESPACE};
use crate::render::{ArtifactRenderer, EntryView};
use crate::{
    ArtifactSink, FactoryArtifact, FactoryGenerator, GenerationError, GenerationResult,
    GeneratorSettings,
};

/// Relative path of the factory map
pub const FACTORY_MAP_FILE: &str = "factories.rs";
/// Relative path of the injector skeleton
pub const INJECTOR_FILE: &str = "generated_injector.rs";
/// Relative path of the module map
pub const AUTOLOAD_FILE: &str = "mod.rs";

type Outcome = (String, GenerationResult<Option<FactoryArtifact>>);

/// A type that could not be generated
#[derive(Debug)]
pub struct GenerationFailure {
    pub type_name: String,
    pub error: GenerationError,
}

/// Outcome of one generation run
#[derive(Debug)]
pub struct GenerationReport {
    /// Generated factories, in generation order
    pub artifacts: Vec<FactoryArtifact>,
    pub failures: Vec<GenerationFailure>,
    /// Types left to the runtime path because they need caller input
    pub skipped: Vec<String>,
    pub manifest: GenerationManifest,
}

impl GenerationReport {
    pub fn artifact_ids(&self) -> BTreeSet<String> {
        self.artifacts
            .iter()
            .map(|artifact| artifact.artifact_id.clone())
            .collect()
    }

    pub fn generated_types(&self) -> Vec<&str> {
        self.artifacts
            .iter()
            .map(|artifact| artifact.type_name.as_str())
            .collect()
    }

    pub fn failed_types(&self) -> Vec<&str> {
        self.failures
            .iter()
            .map(|failure| failure.type_name.as_str())
            .collect()
    }
}

/// Generates factories for a batch of types
pub struct InjectorGenerator {
    generator: FactoryGenerator,
    config: Arc<ConfigStore>,
    renderer: Arc<ArtifactRenderer>,
    namespace: String,
    logger: Arc<dyn GenerationLogger>,
    parallel: bool,
}

impl InjectorGenerator {
    pub fn new(resolver: Arc<DependencyResolver>) -> GenerationResult<Self> {
        let renderer = Arc::new(ArtifactRenderer::new()?);
        let config = Arc::clone(resolver.config());
        Ok(Self {
            generator: FactoryGenerator::with_renderer(resolver, Arc::clone(&renderer)),
            config,
            renderer,
            namespace: DEFAULT_NAMESPACE.to_string(),
            logger: Arc::new(TracingLogger),
            parallel: false,
        })
    }

    /// Applies the namespace and parallel flag of `settings`
    pub fn with_settings(self, settings: &GeneratorSettings) -> GenerationResult<Self> {
        Ok(self
            .with_namespace(settings.namespace.clone())?
            .with_parallel(settings.parallel))
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> GenerationResult<Self> {
        let namespace = namespace.into();
        validate_namespace(&namespace)?;
        self.namespace = namespace;
        Ok(self)
    }

    pub fn with_logger(mut self, logger: Arc<dyn GenerationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Requested types in the given order, then configured types in sorted
    /// order, without duplicates
    pub fn candidates<S: AsRef<str>>(&self, requested: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        requested
            .iter()
            .map(|name| name.as_ref().to_string())
            .chain(self.config.get_configured_type_names())
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }

    /// Generates every candidate type and writes the artifacts to `sink`
    pub fn generate<S: AsRef<str>>(
        &self,
        requested: &[S],
        sink: &mut dyn ArtifactSink,
    ) -> GenerationResult<GenerationReport> {
        let candidates = self.candidates(requested);

        let generate_one = |name: String| {
            self.logger.debug(&format!("Generating factory for {}", name));
            let outcome = self.generator.generate(&name);
            (name, outcome)
        };

        // Sequential runs generate lazily, one type per loop iteration.
        let outcomes: Box<dyn Iterator<Item = Outcome> + '_> = if self.parallel {
            let planned: Vec<_> = candidates.into_par_iter().map(generate_one).collect();
            Box::new(planned.into_iter())
        } else {
            Box::new(candidates.into_iter().map(generate_one))
        };

        let mut report = GenerationReport {
            artifacts: Vec::new(),
            failures: Vec::new(),
            skipped: Vec::new(),
            manifest: GenerationManifest::new(&self.namespace),
        };

        for (type_name, outcome) in outcomes {
            let stored = outcome.and_then(|artifact| match artifact {
                Some(artifact) => self
                    .store(&report, &artifact, &mut *sink)
                    .map(|_| Some(artifact)),
                None => Ok(None),
            });

            match stored {
                Ok(Some(artifact)) => {
                    report.manifest.record(&artifact);
                    report.artifacts.push(artifact);
                }
                Ok(None) => report.skipped.push(type_name),
                Err(error) => {
                    self.logger.error(&format!(
                        "Could not create factory for {}: {}",
                        type_name, error
                    ));
                    report.failures.push(GenerationFailure { type_name, error });
                }
            }
        }

        self.write_aggregates(&report, sink)?;

        info!(
            "Generated {} factories ({} skipped, {} failed) under {}",
            report.artifacts.len(),
            report.skipped.len(),
            report.failures.len(),
            self.namespace
        );
        Ok(report)
    }

    /// Writes one factory unless its module name is already taken
    fn store(
        &self,
        report: &GenerationReport,
        artifact: &FactoryArtifact,
        sink: &mut dyn ArtifactSink,
    ) -> GenerationResult<()> {
        if let Some(owner) = report.manifest.owner_of(&artifact.artifact_id) {
            return Err(GenerationError::DuplicateArtifact {
                artifact_id: artifact.artifact_id.clone(),
                owner: owner.to_string(),
            });
        }
        sink.write(&artifact.path, &artifact.source)
    }

    fn write_aggregates(
        &self,
        report: &GenerationReport,
        sink: &mut dyn ArtifactSink,
    ) -> GenerationResult<()> {
        let entries: Vec<EntryView> = report
            .artifacts
            .iter()
            .map(FactoryArtifact::entry_view)
            .collect();

        sink.write(FACTORY_MAP_FILE, &self.renderer.factory_map(&entries)?)?;
        sink.write(INJECTOR_FILE, &self.renderer.injector(&self.namespace)?)?;
        sink.write(AUTOLOAD_FILE, &self.renderer.autoload(&entries)?)?;
        sink.write(MANIFEST_FILE, &report.manifest.to_json()?)?;
        Ok(())
    }
}
