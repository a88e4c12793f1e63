//! Create command - provision the registry and wire the cluster to it
//!
//! 1. Resolve the cluster's nodes (fails before any mutation if there are
//!    none)
//! 2. Start the registry/proxy container on the kind network
//! 3. Wait until it answers from inside the cluster
//! 4. Configure every node per the chosen strategy and restart containerd

use clap::Args;

use super::{check_prerequisite, DOCKER_HINT, KIND_HINT};
use crate::provider::Provider;
use crate::registry::{self, Strategy};
use crate::runtime::Runtime;
use crate::{mirror, Result, DEFAULT_CLUSTER_NAME};

/// Create a container registry for the specified kind cluster
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// The cluster context name
    #[arg(long, default_value = DEFAULT_CLUSTER_NAME)]
    pub name: String,

    /// Keep the registry container if provisioning fails
    #[arg(long)]
    pub retain: bool,

    /// How cluster nodes are pointed at the registry
    #[arg(long, value_enum, default_value = "mirror")]
    pub strategy: Strategy,
}

pub async fn run(args: CreateArgs) -> Result<()> {
    check_prerequisite("docker", DOCKER_HINT).await?;
    check_prerequisite("kind", KIND_HINT).await?;

    let runtime = Runtime::new();
    let provider = Provider::new(runtime.clone());

    let nodes = provider.list_nodes(&args.name).await?;

    let container =
        registry::create_container(&runtime, &args.name, args.strategy, args.retain).await?;
    println!("Created registry container '{container}'");

    registry::wait_until_ready(&nodes[0], &container, args.strategy).await?;

    match args.strategy {
        Strategy::Mirror => mirror::apply_mirror(&nodes, &container).await?,
        Strategy::Proxy => mirror::apply_proxy(&nodes, &container).await?,
    }

    println!(
        "Configured {} node(s) of cluster '{}'",
        nodes.len(),
        args.name
    );
    Ok(())
}
