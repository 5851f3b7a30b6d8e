//! Configuration loaded from YAML

use crate::driver::DriverConfig;
use crate::graph::{Prefixes, Vocabulary, DEFAULT_PRINCIPAL_ALIAS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub vocabulary: Vocabulary,
    /// Extra prefixes, layered over the built-in ones
    pub prefixes: Prefixes,
    /// Alias that names the session principal in schemas
    pub principal_alias: String,
    pub driver: DriverConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            prefixes: Prefixes::empty(),
            principal_alias: DEFAULT_PRINCIPAL_ALIAS.to_string(),
            driver: DriverConfig::default(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(source: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(source) => Self::from_yaml_str(&source),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Built-in prefixes with the configured ones on top
    pub fn effective_prefixes(&self) -> Prefixes {
        let mut prefixes = Prefixes::default();
        prefixes.merge(&self.prefixes);
        prefixes
    }

    /// The configured vocabulary with compact IRIs expanded
    pub fn effective_vocabulary(&self) -> Vocabulary {
        let prefixes = self.effective_prefixes();
        Vocabulary {
            public_type_index: prefixes.expand(&self.vocabulary.public_type_index),
            for_class: prefixes.expand(&self.vocabulary.for_class),
            instance: prefixes.expand(&self.vocabulary.instance),
        }
    }
}

/// Default config location (~/.config/solid-populate/config.yaml)
pub fn default_config_path() -> PathBuf {
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".config"));
    config_dir.join("solid-populate").join("config.yaml")
}
