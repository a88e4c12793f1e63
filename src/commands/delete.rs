//! Delete command - remove the registry container for a cluster

use clap::Args;

use super::{check_prerequisite, DOCKER_HINT};
use crate::runtime::Runtime;
use crate::{registry, Result, DEFAULT_CLUSTER_NAME};

/// Delete the container registry for the specified kind cluster
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// The cluster context name
    #[arg(long, default_value = DEFAULT_CLUSTER_NAME)]
    pub name: String,
}

pub async fn run(args: DeleteArgs) -> Result<()> {
    check_prerequisite("docker", DOCKER_HINT).await?;

    let runtime = Runtime::new();
    registry::delete_container(&runtime, &args.name).await?;

    println!(
        "Deleted registry container '{}'",
        registry::container_name(&args.name)
    );
    Ok(())
}
