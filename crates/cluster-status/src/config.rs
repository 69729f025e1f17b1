//! Status probe configuration
//!
//! Loaded from a mounted YAML file; every field has a default so an empty
//! file is a valid configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

fn default_client_service_suffix() -> String {
    "-rabbitmq-client".to_string()
}

fn default_namespace() -> String {
    "default".to_string()
}

fn default_field_manager() -> String {
    "cluster-status".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusConfig {
    /// Appended to the cluster name to form the client service name
    #[serde(default = "default_client_service_suffix")]
    pub client_service_suffix: String,

    /// Namespace used when none is given on the command line
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Field manager recorded on status patches
    #[serde(default = "default_field_manager")]
    pub field_manager: String,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            client_service_suffix: default_client_service_suffix(),
            namespace: default_namespace(),
            field_manager: default_field_manager(),
        }
    }
}

impl StatusConfig {
    /// Reject empty names
    pub fn validate(&self) -> Result<()> {
        if self.client_service_suffix.is_empty() {
            return Err(Error::ConfigError(
                "clientServiceSuffix must not be empty".to_string(),
            ));
        }
        if self.namespace.is_empty() {
            return Err(Error::ConfigError("namespace must not be empty".to_string()));
        }
        if self.field_manager.is_empty() {
            return Err(Error::ConfigError(
                "fieldManager must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate configuration from a mounted YAML file
    pub fn from_mounted_file(config_path: &str) -> Result<Self> {
        let config_str = std::fs::read_to_string(config_path)?;
        Self::from_yaml(&config_str)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(config_str: &str) -> Result<Self> {
        // serde_yaml maps an empty document to unit, not to a defaulted struct
        let config: StatusConfig = if config_str.trim().is_empty() {
            StatusConfig::default()
        } else {
            serde_yaml::from_str(config_str)?
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = StatusConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.client_service_suffix, "-rabbitmq-client");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = StatusConfig::from_yaml("namespace: rabbitmq-system\n").unwrap();
        assert_eq!(config.namespace, "rabbitmq-system");
        assert_eq!(config.field_manager, "cluster-status");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        assert_eq!(StatusConfig::from_yaml("").unwrap(), StatusConfig::default());
    }

    #[test]
    fn test_empty_suffix_is_rejected() {
        let result = StatusConfig::from_yaml("clientServiceSuffix: \"\"\n");
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_from_mounted_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "clientServiceSuffix: -ingress\n").unwrap();

        let config = StatusConfig::from_mounted_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.client_service_suffix, "-ingress");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = StatusConfig::from_mounted_file("/nonexistent/config.yaml");
        assert!(matches!(result, Err(Error::IoError(_))));
    }
}
