//! Injector configuration: aliases, parameter overrides and type preferences

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{DiError, DiResult};

/// Serializable configuration document
///
/// ```toml
/// [preferences]
/// Logger = "FileLogger"
///
/// [types.Consumer.preferences]
/// Logger = "ConsoleLogger"
///
/// [types.Consumer.parameters]
/// retries = 3
///
/// [types."app.mailer"]
/// type_of = "SmtpMailer"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InjectorSettings {
    /// Global preferences, requested type to preferred type
    #[serde(default)]
    pub preferences: BTreeMap<String, String>,
    /// Per-type configuration
    #[serde(default)]
    pub types: BTreeMap<String, TypeSettings>,
}

/// Configuration for a single type name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeSettings {
    /// Makes this name an alias of another type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_of: Option<String>,
    /// Preferences that apply when this type is the consumer
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub preferences: BTreeMap<String, String>,
    /// Parameter overrides
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, Value>,
}

/// Holds aliases, parameter overrides and preferences.
///
/// The store is shared read-only with the resolver and the generators once
/// built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigStore {
    aliases: BTreeMap<String, String>,
    parameters: BTreeMap<String, BTreeMap<String, Value>>,
    global_preferences: BTreeMap<String, String>,
    context_preferences: BTreeMap<String, BTreeMap<String, String>>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: InjectorSettings) -> Self {
        let mut store = Self::new();
        store.global_preferences = settings.preferences;

        for (name, type_settings) in settings.types {
            if let Some(target) = type_settings.type_of {
                store.aliases.insert(name.clone(), target);
            }
            if !type_settings.parameters.is_empty() {
                store.parameters.insert(name.clone(), type_settings.parameters);
            }
            if !type_settings.preferences.is_empty() {
                store
                    .context_preferences
                    .insert(name, type_settings.preferences);
            }
        }

        store
    }

    /// Reads a TOML, YAML or JSON configuration file, picked by extension
    pub fn load(path: impl AsRef<Path>) -> DiResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DiError::configuration(format!("cannot read {}: {}", path.display(), e))
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("toml");
        let settings = Self::parse(&contents, extension).map_err(|message| {
            DiError::configuration(format!("{}: {}", path.display(), message))
        })?;

        debug!("Loaded injector configuration from {}", path.display());
        Ok(Self::from_settings(settings))
    }

    fn parse(contents: &str, format: &str) -> Result<InjectorSettings, String> {
        match format {
            "toml" => toml::from_str(contents).map_err(|e| e.to_string()),
            "yaml" | "yml" => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
            "json" => serde_json::from_str(contents).map_err(|e| e.to_string()),
            other => Err(format!("unsupported configuration format '{}'", other)),
        }
    }

    /// Converts back into the serializable document
    pub fn to_settings(&self) -> InjectorSettings {
        let mut types: BTreeMap<String, TypeSettings> = BTreeMap::new();

        for (name, target) in &self.aliases {
            types.entry(name.clone()).or_default().type_of = Some(target.clone());
        }
        for (name, params) in &self.parameters {
            types.entry(name.clone()).or_default().parameters = params.clone();
        }
        for (name, prefs) in &self.context_preferences {
            types.entry(name.clone()).or_default().preferences = prefs.clone();
        }

        InjectorSettings {
            preferences: self.global_preferences.clone(),
            types,
        }
    }

    pub fn is_alias(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
    }

    pub fn get_class_for_alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    pub fn set_alias(&mut self, name: impl Into<String>, target: impl Into<String>) -> &mut Self {
        self.aliases.insert(name.into(), target.into());
        self
    }

    /// Every type name that carries an alias, override or context preference
    pub fn get_configured_type_names(&self) -> BTreeSet<String> {
        self.aliases
            .keys()
            .chain(self.parameters.keys())
            .chain(self.context_preferences.keys())
            .cloned()
            .collect()
    }

    /// Configured parameter overrides for `type_name`
    pub fn get_parameters(&self, type_name: &str) -> BTreeMap<String, Value> {
        self.parameters.get(type_name).cloned().unwrap_or_default()
    }

    pub fn get_parameter(&self, type_name: &str, parameter: &str) -> Option<&Value> {
        self.parameters.get(type_name)?.get(parameter)
    }

    pub fn set_parameters(
        &mut self,
        type_name: impl Into<String>,
        parameters: BTreeMap<String, Value>,
    ) -> &mut Self {
        self.parameters.insert(type_name.into(), parameters);
        self
    }

    pub fn set_parameter(
        &mut self,
        type_name: impl Into<String>,
        parameter: impl Into<String>,
        value: Value,
    ) -> &mut Self {
        self.parameters
            .entry(type_name.into())
            .or_default()
            .insert(parameter.into(), value);
        self
    }

    /// The preference for `type_name` as seen from `context`.
    ///
    /// A preference registered for the consuming context wins over the
    /// global one.
    pub fn get_type_preference(&self, type_name: &str, context: Option<&str>) -> Option<&str> {
        context
            .and_then(|ctx| self.context_preferences.get(ctx))
            .and_then(|prefs| prefs.get(type_name))
            .or_else(|| self.global_preferences.get(type_name))
            .map(String::as_str)
    }

    /// The preference registered for `type_name` under `context` only,
    /// ignoring global preferences
    pub fn get_context_preference(&self, type_name: &str, context: &str) -> Option<&str> {
        self.context_preferences
            .get(context)?
            .get(type_name)
            .map(String::as_str)
    }

    /// Registers a preference, globally when `context` is `None`
    pub fn set_type_preference(
        &mut self,
        type_name: impl Into<String>,
        preferred: impl Into<String>,
        context: Option<&str>,
    ) -> &mut Self {
        match context {
            Some(ctx) => {
                self.context_preferences
                    .entry(ctx.to_string())
                    .or_default()
                    .insert(type_name.into(), preferred.into());
            }
            None => {
                self.global_preferences
                    .insert(type_name.into(), preferred.into());
            }
        }
        self
    }
}
