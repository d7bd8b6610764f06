//! Loading [`EditorConfig`] from YAML files.

use std::path::{Path, PathBuf};

use cmdex_core::{EditorConfig, InvalidConfig};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Invalid(#[from] InvalidConfig),
}

/// Read and validate a YAML config file. Missing fields take their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EditorConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
        _ => ConfigError::Io(e),
    })?;
    parse_config(&content)
}

/// Parse and validate YAML config text.
pub fn parse_config(content: &str) -> Result<EditorConfig, ConfigError> {
    // An empty document deserializes as null rather than an empty mapping.
    let config: EditorConfig = if content.trim().is_empty() {
        EditorConfig::default()
    } else {
        serde_yaml::from_str(content)?
    };
    config.validate()?;
    log::debug!("Loaded config with {} custom bindings", config.bindings.len());
    Ok(config)
}
