//! `ClusterAvailable` condition derived from the client service's Endpoints

use super::{ConditionStatus, RabbitmqClusterCondition, RabbitmqClusterConditionType};
use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::Endpoints;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use std::fmt;
use tracing::debug;

const COULD_NOT_ACCESS_MESSAGE: &str =
    "Could not retrieve endpoint information for the cluster's client service";
const NO_ENDPOINTS_MESSAGE: &str = "The cluster's client service has 0 registered endpoints";

/// Reason codes for the `ClusterAvailable` condition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClusterAvailableReason {
    AtLeastOneNodeAvailable,
    NoServiceEndpointsAvailable,
    CouldNotAccessServiceEndpoints,
}

impl ClusterAvailableReason {
    /// Reason code as written to the condition
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AtLeastOneNodeAvailable => "AtLeastOneNodeAvailable",
            Self::NoServiceEndpointsAvailable => "NoServiceEndpointsAvailable",
            Self::CouldNotAccessServiceEndpoints => "CouldNotAccessServiceEndpoints",
        }
    }

    fn status(self) -> ConditionStatus {
        ConditionStatus::from(self == Self::AtLeastOneNodeAvailable)
    }

    fn message(self) -> &'static str {
        match self {
            Self::AtLeastOneNodeAvailable => "",
            Self::NoServiceEndpointsAvailable => NO_ENDPOINTS_MESSAGE,
            Self::CouldNotAccessServiceEndpoints => COULD_NOT_ACCESS_MESSAGE,
        }
    }
}

impl fmt::Display for ClusterAvailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derives the `ClusterAvailable` condition from one Endpoints snapshot.
///
/// `None` means the Endpoints could not be found or fetched; an Endpoints
/// object with no addresses is a different outcome. The manager holds no
/// state besides the borrowed snapshot, and the probe time is sampled on
/// every call to [`condition`](Self::condition).
#[derive(Clone, Copy, Debug)]
pub struct ClusterAvailableConditionManager<'a> {
    endpoints: Option<&'a Endpoints>,
}

impl<'a> ClusterAvailableConditionManager<'a> {
    /// Manager for one snapshot; `None` when the Endpoints could not be obtained
    #[must_use]
    pub fn new(endpoints: Option<&'a Endpoints>) -> Self {
        Self { endpoints }
    }

    /// Reason code selected for the held snapshot
    #[must_use]
    pub fn reason(&self) -> ClusterAvailableReason {
        match self.endpoints {
            None => ClusterAvailableReason::CouldNotAccessServiceEndpoints,
            Some(endpoints) if has_ready_address(endpoints) => {
                ClusterAvailableReason::AtLeastOneNodeAvailable
            }
            Some(_) => ClusterAvailableReason::NoServiceEndpointsAvailable,
        }
    }

    /// Whether any subset has a ready address
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.reason() == ClusterAvailableReason::AtLeastOneNodeAvailable
    }

    /// Evaluate the condition, stamped with the current time
    #[must_use]
    pub fn condition(&self) -> RabbitmqClusterCondition {
        self.condition_at(Utc::now())
    }

    /// Evaluate the condition, stamped with `probe_time`
    #[must_use]
    pub fn condition_at(&self, probe_time: DateTime<Utc>) -> RabbitmqClusterCondition {
        let reason = self.reason();
        let status = reason.status();

        debug!(%reason, %status, "Evaluated ClusterAvailable condition");

        RabbitmqClusterCondition {
            condition_type: RabbitmqClusterConditionType::ClusterAvailable,
            status,
            reason: reason.as_str().to_string(),
            message: reason.message().to_string(),
            last_probe_time: Time(probe_time),
        }
    }
}

// Any address in any subset counts; notReadyAddresses do not.
fn has_ready_address(endpoints: &Endpoints) -> bool {
    endpoints
        .subsets
        .iter()
        .flatten()
        .any(|subset| subset.addresses.as_ref().is_some_and(|a| !a.is_empty()))
}
