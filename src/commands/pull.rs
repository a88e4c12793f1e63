//! Pull command - relocate an image into the local registry
//!
//! Pulls the image, retags it under the local registry's address, and
//! pushes it there. The local tag is left behind on failure.

use clap::Args;

use super::{check_prerequisite, DOCKER_HINT};
use crate::reference::split_repos_name;
use crate::runtime::Runtime;
use crate::{Result, LOCAL_REGISTRY};

/// Pull a container image and store it in the local registry
#[derive(Args, Debug)]
pub struct PullArgs {
    /// Image reference to pull
    pub image: String,
}

pub async fn run(args: PullArgs) -> Result<()> {
    check_prerequisite("docker", DOCKER_HINT).await?;

    let runtime = Runtime::new();

    runtime.pull(&args.image).await?;

    let (_, remote_name) = split_repos_name(&args.image);
    let local_image = format!("{LOCAL_REGISTRY}/{remote_name}");

    runtime.tag(&args.image, &local_image).await?;
    runtime.push(&local_image).await?;

    println!("Pushed '{}' to '{local_image}'", args.image);
    Ok(())
}
