//! Ahead-of-time factory generation for `wiregen-di`
//!
//! Resolves construction plans once, at build time, and emits them as Rust
//! source: one factory module per type, a factory map, an injector
//! skeleton, a module map and a JSON manifest.
//!
//! ```no_run
//! use std::sync::Arc;
//! use wiregen_di::{ClassCatalog, ConfigStore, InjectorBuilder};
//! use wiregen_generation::{DirectorySink, GeneratorSettings, InjectorGenerator};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = GeneratorSettings::load(Some("wiregen.toml".as_ref()))?;
//! let resolver = InjectorBuilder::from_catalog(ClassCatalog::new())
//!     .config(ConfigStore::load("injector.toml")?)
//!     .build_resolver()?;
//!
//! let generator = InjectorGenerator::new(resolver)?.with_settings(&settings)?;
//! let mut sink = DirectorySink::new(&settings.output_dir);
//! let report = generator.generate(&settings.classes, &mut sink)?;
//! println!("{} factories", report.artifacts.len());
//! # Ok(())
//! # }
//! ```
//!
//! The emitted code depends on `wiregen-di` and `serde_json`.

pub mod error;
pub mod factory_generator;
pub mod injector_generator;
pub mod literal;
pub mod logger;
pub mod manifest;
pub mod naming;
pub mod render;
pub mod settings;
pub mod sink;

pub use error::{GenerationError, GenerationResult};
pub use factory_generator::{FactoryArtifact, FactoryGenerator};
pub use injector_generator::{
    GenerationFailure, GenerationReport, InjectorGenerator, AUTOLOAD_FILE, FACTORY_MAP_FILE,
    INJECTOR_FILE,
};
pub use logger::{GenerationLogger, LogEvent, LogLevel, NullLogger, RecordingLogger, TracingLogger};
pub use manifest::{GenerationManifest, ManifestEntry, MANIFEST_FILE};
pub use settings::GeneratorSettings;
pub use sink::{ArtifactSink, DirectorySink, MemorySink};
