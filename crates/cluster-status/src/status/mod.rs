//! Status conditions published on the `RabbitmqCluster` status block

use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod cluster_available;

pub use cluster_available::{ClusterAvailableConditionManager, ClusterAvailableReason};

/// Condition types reported on a `RabbitmqCluster`
#[derive(Deserialize, Serialize, Clone, Copy, Debug, JsonSchema, PartialEq, Eq, Hash)]
pub enum RabbitmqClusterConditionType {
    /// At least one node behind the client service is reachable
    ClusterAvailable,
}

impl RabbitmqClusterConditionType {
    /// Condition type as written to the status block
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClusterAvailable => "ClusterAvailable",
        }
    }
}

impl fmt::Display for RabbitmqClusterConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a condition (True, False, or Unknown)
#[derive(Deserialize, Serialize, Clone, Copy, Debug, JsonSchema, PartialEq, Eq)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl ConditionStatus {
    /// Kubernetes string form of the status
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::True => "True",
            Self::False => "False",
            Self::Unknown => "Unknown",
        }
    }
}

impl From<bool> for ConditionStatus {
    fn from(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Condition for the `RabbitmqCluster`
///
/// The reason is kept as a plain string because every condition type shares
/// this record; each type defines its own closed set of reason codes.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RabbitmqClusterCondition {
    /// Type of condition
    #[serde(rename = "type")]
    pub condition_type: RabbitmqClusterConditionType,

    pub status: ConditionStatus,

    /// Machine-readable reason code
    pub reason: String,

    /// Human-readable message, empty when the condition is healthy
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// Time at which the condition was evaluated
    pub last_probe_time: Time,
}
