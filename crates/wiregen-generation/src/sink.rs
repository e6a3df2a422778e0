//! Artifact storage
//!
//! The generator hands every artifact to an [`ArtifactSink`] under a
//! relative, `/`-separated path such as `factory/clock_1a2b3c4d.rs`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{GenerationError, GenerationResult};

/// Destination for generated artifacts
pub trait ArtifactSink {
    fn write(&mut self, path: &str, contents: &str) -> GenerationResult<()>;
}

/// Keeps artifacts in memory, ordered by path
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    files: BTreeMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ArtifactSink for MemorySink {
    fn write(&mut self, path: &str, contents: &str) -> GenerationResult<()> {
        self.files.insert(path.to_string(), contents.to_string());
        Ok(())
    }
}

/// Writes artifacts below an output directory, creating parents as needed
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn target(&self, path: &str) -> GenerationResult<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative.is_absolute()
            || relative
                .components()
                .any(|c| !matches!(c, std::path::Component::Normal(_)));
        if escapes {
            return Err(GenerationError::Storage {
                path: path.to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "artifact path must stay inside the output directory",
                ),
            });
        }
        Ok(self.root.join(relative))
    }
}

impl ArtifactSink for DirectorySink {
    fn write(&mut self, path: &str, contents: &str) -> GenerationResult<()> {
        let target = self.target(path)?;
        let storage = |source| GenerationError::Storage {
            path: path.to_string(),
            source,
        };

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(storage)?;
        }
        fs::write(&target, contents).map_err(storage)?;
        debug!("Wrote {}", target.display());
        Ok(())
    }
}
