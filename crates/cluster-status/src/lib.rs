/*
 * 5D Labs Agent Platform - RabbitMQ Cluster Status
 * Copyright (C) 2025 5D Labs
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */

#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc, clippy::doc_markdown)]

//! Cluster status library
//!
//! Derives the `ClusterAvailable` condition of a `RabbitmqCluster` from the
//! Endpoints of its client service, and publishes it on the cluster's status.

pub mod config;
pub mod crds;
pub mod endpoints;
pub mod error;
pub mod reporter;
pub mod status;

// Re-export commonly used types
pub use config::StatusConfig;
pub use crds::{RabbitmqCluster, RabbitmqClusterSpec, RabbitmqClusterStatus};
pub use endpoints::{EndpointsSource, KubeEndpointsSource};
pub use error::{Error, Result};
pub use reporter::{evaluate_cluster_available, report_cluster_available};
pub use status::{
    ClusterAvailableConditionManager, ClusterAvailableReason, ConditionStatus,
    RabbitmqClusterCondition, RabbitmqClusterConditionType,
};
