//! Publishes the `ClusterAvailable` condition onto a `RabbitmqCluster` status

use crate::config::StatusConfig;
use crate::crds::{RabbitmqCluster, RabbitmqClusterStatus};
use crate::endpoints::{child_service_name, snapshot_or_absent, EndpointsSource};
use crate::error::{Error, Result};
use crate::status::{ClusterAvailableConditionManager, RabbitmqClusterCondition};
use kube::api::{Patch, PatchParams};
use kube::{Api, Client, ResourceExt};
use serde_json::{json, Value};
use tracing::{info, instrument};

/// Fetch the client service Endpoints and derive the condition.
///
/// Never fails: a failed lookup is reported through the condition itself.
#[instrument(skip(source, config))]
pub async fn evaluate_cluster_available<S>(
    source: &S,
    namespace: &str,
    cluster_name: &str,
    config: &StatusConfig,
) -> RabbitmqClusterCondition
where
    S: EndpointsSource + ?Sized,
{
    let service_name = child_service_name(cluster_name, &config.client_service_suffix);
    let snapshot = snapshot_or_absent(source.endpoints(namespace, &service_name).await);

    ClusterAvailableConditionManager::new(snapshot.as_ref()).condition()
}

/// JSON merge patch for the status subresource
pub fn condition_status_patch(status: &RabbitmqClusterStatus) -> Result<Value> {
    Ok(json!({ "status": serde_json::to_value(status)? }))
}

/// Evaluate the condition for `cluster` and patch it into the cluster's status
#[instrument(skip(client, source, cluster, config), fields(cluster = %cluster.name_any()))]
pub async fn report_cluster_available<S>(
    client: &Client,
    source: &S,
    cluster: &RabbitmqCluster,
    config: &StatusConfig,
) -> Result<RabbitmqClusterCondition>
where
    S: EndpointsSource + ?Sized,
{
    let namespace = cluster.namespace().ok_or(Error::MissingObjectKey)?;
    let name = cluster.name_any();

    let condition = evaluate_cluster_available(source, &namespace, &name, config).await;

    let mut status = cluster.status.clone().unwrap_or_default();
    status.set_condition(condition.clone());
    let patch = condition_status_patch(&status)?;

    let clusters: Api<RabbitmqCluster> = Api::namespaced(client.clone(), &namespace);
    let params = PatchParams {
        field_manager: Some(config.field_manager.clone()),
        ..PatchParams::default()
    };
    clusters
        .patch_status(&name, &params, &Patch::Merge(&patch))
        .await?;

    info!(
        "Published {} condition: status={}, reason={}",
        condition.condition_type, condition.status, condition.reason
    );
    Ok(condition)
}
