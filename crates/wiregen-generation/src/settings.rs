//! Generator settings

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::naming::{validate_namespace, DEFAULT_NAMESPACE};
use crate::GenerationResult;

/// Environment prefix for generator settings, e.g. `WIREGEN_GENERATOR_NAMESPACE`
pub const ENV_PREFIX: &str = "WIREGEN_GENERATOR";

/// Where and how a generation run emits its artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Directory receiving the artifacts
    pub output_dir: PathBuf,
    /// Module path under which the generated code is mounted
    pub namespace: String,
    /// Types to generate in addition to every configured type
    pub classes: Vec<String>,
    /// Compute plans on the rayon thread pool
    pub parallel: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("generated"),
            namespace: DEFAULT_NAMESPACE.to_string(),
            classes: Vec::new(),
            parallel: false,
        }
    }
}

impl GeneratorSettings {
    /// Loads settings from an optional file, then the environment.
    ///
    /// A missing file is not an error; environment variables override
    /// values from the file. `classes` may be given in the environment as a
    /// comma-separated list.
    pub fn load(path: Option<&Path>) -> GenerationResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path.to_path_buf()).required(false));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("classes"),
        );

        let settings: GeneratorSettings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> GenerationResult<()> {
        validate_namespace(&self.namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GenerationError;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = GeneratorSettings::default();
        assert_eq!(settings.namespace, "crate::generated");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wiregen.toml");
        std::fs::write(
            &path,
            r#"
output_dir = "src/di"
namespace = "crate::di"
classes = ["Mailer", "Clock"]
"#,
        )
        .unwrap();

        let settings = GeneratorSettings::load(Some(&path)).unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("src/di"));
        assert_eq!(settings.namespace, "crate::di");
        assert_eq!(settings.classes, vec!["Mailer", "Clock"]);
        assert!(!settings.parallel);
    }

    #[test]
    fn test_invalid_namespace_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wiregen.toml");
        std::fs::write(&path, "namespace = \"crate::fn\"\n").unwrap();

        assert!(matches!(
            GeneratorSettings::load(Some(&path)),
            Err(GenerationError::InvalidNamespace(_))
        ));
    }
}
