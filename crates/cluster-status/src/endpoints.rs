//! Lookup of the Endpoints backing a cluster's client service

use crate::error::Result;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Endpoints;
use kube::{Api, Client};
use std::path::Path;
use tracing::{debug, instrument, warn};

/// Name of the client service for a cluster
#[must_use]
pub fn child_service_name(cluster_name: &str, suffix: &str) -> String {
    format!("{cluster_name}{suffix}")
}

/// Source of Endpoints snapshots.
///
/// `Ok(None)` means the Endpoints object does not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EndpointsSource: Send + Sync {
    /// Endpoints named `name` in `namespace`
    async fn endpoints(&self, namespace: &str, name: &str) -> Result<Option<Endpoints>>;
}

/// Reads Endpoints from the Kubernetes API
#[derive(Clone)]
pub struct KubeEndpointsSource {
    client: Client,
}

impl KubeEndpointsSource {
    /// Source backed by `client`
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EndpointsSource for KubeEndpointsSource {
    #[instrument(skip(self))]
    async fn endpoints(&self, namespace: &str, name: &str) -> Result<Option<Endpoints>> {
        let api: Api<Endpoints> = Api::namespaced(self.client.clone(), namespace);
        let endpoints = api.get_opt(name).await?;
        if endpoints.is_none() {
            debug!("Endpoints {}/{} not found", namespace, name);
        }
        Ok(endpoints)
    }
}

/// Collapse a lookup result into the snapshot the condition manager takes.
///
/// Lookup failures and missing objects both become `None`.
pub fn snapshot_or_absent(result: Result<Option<Endpoints>>) -> Option<Endpoints> {
    match result {
        Ok(endpoints) => endpoints,
        Err(e) => {
            warn!(error = %e, "Failed to fetch service endpoints");
            None
        }
    }
}

/// Read an Endpoints manifest (YAML or JSON) from disk.
///
/// A missing file is an absent snapshot; an unreadable or malformed file is an error.
pub fn load_endpoints_file(path: &Path) -> Result<Option<Endpoints>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(serde_yaml::from_str(&contents)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Endpoints file {} not found, treating as absent", path.display());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_child_service_name() {
        assert_eq!(
            child_service_name("hello", "-rabbitmq-client"),
            "hello-rabbitmq-client"
        );
    }

    #[test]
    fn test_lookup_error_becomes_absent() {
        let result = Err(Error::ConfigError("boom".to_string()));
        assert!(snapshot_or_absent(result).is_none());
    }

    #[test]
    fn test_found_endpoints_pass_through() {
        let snapshot = snapshot_or_absent(Ok(Some(Endpoints::default())));
        assert!(snapshot.is_some());
        assert!(snapshot_or_absent(Ok(None)).is_none());
    }

    #[test]
    fn test_missing_endpoints_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_endpoints_file(&dir.path().join("endpoints.yaml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_endpoints_file_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("endpoints.yaml");
        std::fs::write(
            &yaml_path,
            "apiVersion: v1\nkind: Endpoints\nmetadata:\n  name: hello-rabbitmq-client\nsubsets:\n  - addresses:\n      - ip: 1.2.3.4\n",
        )
        .unwrap();
        let endpoints = load_endpoints_file(&yaml_path).unwrap().unwrap();
        assert_eq!(endpoints.subsets.unwrap()[0].addresses.as_ref().unwrap()[0].ip, "1.2.3.4");

        let json_path = dir.path().join("endpoints.json");
        std::fs::write(
            &json_path,
            r#"{"apiVersion":"v1","kind":"Endpoints","metadata":{"name":"hello-rabbitmq-client"},"subsets":[]}"#,
        )
        .unwrap();
        let endpoints = load_endpoints_file(&json_path).unwrap().unwrap();
        assert_eq!(endpoints.subsets, Some(vec![]));
    }

    #[test]
    fn test_malformed_endpoints_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("endpoints.yaml");
        std::fs::write(&path, "subsets: [unclosed\n").unwrap();

        let result = load_endpoints_file(&path);
        assert!(matches!(result, Err(Error::YamlError(_))));
    }
}
