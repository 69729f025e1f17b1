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

//! Cluster status CLI - evaluate or publish the `ClusterAvailable` condition

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cluster_status::endpoints::load_endpoints_file;
use cluster_status::{
    evaluate_cluster_available, report_cluster_available, ClusterAvailableConditionManager,
    KubeEndpointsSource, RabbitmqCluster, RabbitmqClusterCondition, StatusConfig,
};
use kube::Api;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "cluster-status")]
#[command(about = "ClusterAvailable condition for RabbitmqCluster resources")]
#[command(version)]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the condition from an Endpoints manifest on disk
    Evaluate {
        /// YAML or JSON Endpoints manifest; a missing file counts as absent
        #[arg(long)]
        endpoints_file: PathBuf,
    },

    /// Evaluate the condition against a live cluster
    Probe {
        /// RabbitmqCluster name
        #[arg(long)]
        cluster: String,

        /// Namespace of the RabbitmqCluster (defaults to the configured namespace)
        #[arg(long, env = "CLUSTER_STATUS_NAMESPACE")]
        namespace: Option<String>,

        /// Path to the YAML configuration file
        #[arg(long, env = "CLUSTER_STATUS_CONFIG")]
        config: Option<PathBuf>,

        /// Patch the condition into the RabbitmqCluster status
        #[arg(long)]
        publish: bool,
    },
}

fn init_tracing(json_logs: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(json_logs.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json_logs).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<StatusConfig> {
    let Some(path) = path else {
        return Ok(StatusConfig::default());
    };
    let path_str = path
        .to_str()
        .with_context(|| format!("Config path is not valid UTF-8: {}", path.display()))?;
    StatusConfig::from_mounted_file(path_str)
        .with_context(|| format!("Failed to load configuration from {path_str}"))
}

fn print_condition(condition: &RabbitmqClusterCondition) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(condition)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match cli.command {
        Commands::Evaluate { endpoints_file } => {
            let endpoints = load_endpoints_file(&endpoints_file).with_context(|| {
                format!("Failed to load Endpoints from {}", endpoints_file.display())
            })?;
            let condition = ClusterAvailableConditionManager::new(endpoints.as_ref()).condition();
            print_condition(&condition)?;
        }
        Commands::Probe {
            cluster,
            namespace,
            config,
            publish,
        } => {
            let config = load_config(config.as_deref())?;
            let namespace = namespace.unwrap_or_else(|| config.namespace.clone());

            let client = kube::Client::try_default().await?;
            info!("Connected to Kubernetes cluster");
            let source = KubeEndpointsSource::new(client.clone());

            let condition = if publish {
                let clusters: Api<RabbitmqCluster> = Api::namespaced(client.clone(), &namespace);
                let rabbitmq_cluster = clusters
                    .get(&cluster)
                    .await
                    .with_context(|| format!("Failed to get RabbitmqCluster {namespace}/{cluster}"))?;
                report_cluster_available(&client, &source, &rabbitmq_cluster, &config).await?
            } else {
                evaluate_cluster_available(&source, &namespace, &cluster, &config).await
            };
            print_condition(&condition)?;
        }
    }

    Ok(())
}
