//! Cluster command - (re-)apply mirror configuration to an existing cluster
//!
//! Useful when nodes joined after the registry was created, or when a node
//! was recreated and lost its containerd configuration. Does not create a
//! container; the registry is expected to exist already.

use clap::Args;

use super::{check_prerequisite, DOCKER_HINT, KIND_HINT};
use crate::provider::Provider;
use crate::runtime::Runtime;
use crate::{mirror, registry, Result, DEFAULT_CLUSTER_NAME};

/// Configure a kind cluster to use the local registry
#[derive(Args, Debug)]
pub struct ClusterArgs {
    /// The cluster context name
    #[arg(long, default_value = DEFAULT_CLUSTER_NAME)]
    pub name: String,
}

pub async fn run(args: ClusterArgs) -> Result<()> {
    check_prerequisite("docker", DOCKER_HINT).await?;
    check_prerequisite("kind", KIND_HINT).await?;

    let runtime = Runtime::new();
    let provider = Provider::new(runtime);

    let nodes = provider.list_nodes(&args.name).await?;

    let registry_name = registry::container_name(&args.name);
    mirror::apply_mirror(&nodes, &registry_name).await?;

    println!(
        "Configured {} node(s) to mirror through '{}'",
        nodes.len(),
        registry_name
    );
    Ok(())
}
