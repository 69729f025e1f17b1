//! `RabbitmqCluster` Custom Resource Definition

use crate::status::{RabbitmqClusterCondition, RabbitmqClusterConditionType};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `RabbitmqCluster` CRD for a managed RabbitMQ cluster
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[kube(group = "rabbitmq.pivotal.io", version = "v1beta1", kind = "RabbitmqCluster")]
#[kube(namespaced)]
#[kube(status = "RabbitmqClusterStatus")]
#[kube(shortname = "rmq")]
#[serde(rename_all = "camelCase")]
pub struct RabbitmqClusterSpec {
    /// Number of RabbitMQ nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,

    /// RabbitMQ container image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Status of the `RabbitmqCluster`
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RabbitmqClusterStatus {
    /// Conditions for the `RabbitmqCluster`, at most one per type
    #[serde(default)]
    pub conditions: Vec<RabbitmqClusterCondition>,
}

impl RabbitmqClusterStatus {
    /// Replace the condition of the same type, or append it
    pub fn set_condition(&mut self, condition: RabbitmqClusterCondition) {
        match self
            .conditions
            .iter_mut()
            .find(|c| c.condition_type == condition.condition_type)
        {
            Some(existing) => *existing = condition,
            None => self.conditions.push(condition),
        }
    }

    /// Condition of the given type, if present
    #[must_use]
    pub fn condition(
        &self,
        condition_type: RabbitmqClusterConditionType,
    ) -> Option<&RabbitmqClusterCondition> {
        self.conditions
            .iter()
            .find(|c| c.condition_type == condition_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::ClusterAvailableConditionManager;
    use chrono::{TimeZone, Utc};
    use k8s_openapi::api::core::v1::Endpoints;
    use kube::CustomResourceExt;

    #[test]
    fn test_set_condition_replaces_same_type() {
        let mut status = RabbitmqClusterStatus::default();
        let earlier = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 1, 1, 0, 5, 0).unwrap();

        status.set_condition(ClusterAvailableConditionManager::new(None).condition_at(earlier));
        let endpoints = Endpoints::default();
        status.set_condition(
            ClusterAvailableConditionManager::new(Some(&endpoints)).condition_at(later),
        );

        assert_eq!(status.conditions.len(), 1);
        let current = status
            .condition(RabbitmqClusterConditionType::ClusterAvailable)
            .unwrap();
        assert_eq!(current.reason, "NoServiceEndpointsAvailable");
        assert_eq!(current.last_probe_time.0, later);
    }

    #[test]
    fn test_crd_metadata() {
        let crd = RabbitmqCluster::crd();
        assert_eq!(crd.spec.group, "rabbitmq.pivotal.io");
        assert_eq!(crd.spec.names.kind, "RabbitmqCluster");
        assert_eq!(crd.spec.versions[0].name, "v1beta1");
    }
}
