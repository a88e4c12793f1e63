//! kind-registry - local registry tooling for kind clusters
//!
//! Runs a container registry (or a pull-through caching proxy) on the kind
//! Docker network and configures every node of a kind cluster to pull
//! through it. Cluster lifecycle stays with the `kind` binary and container
//! lifecycle with the `docker` binary; this tool only glues the two
//! together.
//!
//! # Modules
//!
//! - [`commands`] - CLI sub-command implementations
//! - [`runtime`] - container runtime invocation
//! - [`provider`] - kind node enumeration and node command execution
//! - [`registry`] - registry/proxy container lifecycle
//! - [`mirror`] - node-side mirror and proxy configuration
//! - [`reference`] - image reference splitting for retagging
//! - [`poll`] - bounded polling utilities
//! - [`error`] - error types

pub mod commands;
pub mod error;
pub mod mirror;
pub mod poll;
pub mod provider;
pub mod reference;
pub mod registry;
pub mod runtime;

pub use error::{Error, Result};

use clap::{Parser, Subcommand};

/// kind-registry - local registry for kind clusters
#[derive(Parser, Debug)]
#[command(name = "kind-registry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the registry container and configure cluster nodes to use it
    Create(commands::create::CreateArgs),
    /// Remove the registry container for a cluster
    Delete(commands::delete::DeleteArgs),
    /// (Re-)apply the mirror configuration to an existing cluster's nodes
    Cluster(commands::cluster::ClusterArgs),
    /// Pull an image and store it in the local registry
    Pull(commands::pull::PullArgs),
    /// Create a kind cluster emulating availability zones
    #[command(subcommand)]
    Zones(commands::zones::ZonesCommand),
}

impl Cli {
    /// Run the CLI command
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Create(args) => commands::create::run(args).await,
            Commands::Delete(args) => commands::delete::run(args).await,
            Commands::Cluster(args) => commands::cluster::run(args).await,
            Commands::Pull(args) => commands::pull::run(args).await,
            Commands::Zones(cmd) => commands::zones::run(cmd).await,
        }
    }
}

// =============================================================================
// Default Configuration Constants
// =============================================================================
// Shared by the commands, the container lifecycle, and the node
// configuration fragments. Centralizing them keeps create and delete
// agreeing on names and ports.

/// Default kind cluster context name
pub const DEFAULT_CLUSTER_NAME: &str = "kind";

/// Docker network kind attaches its node containers to
pub const KIND_NETWORK: &str = "kind";

/// Label applied to the registry container, same key kind uses to associate
/// auxiliary containers with a cluster
pub const CLUSTER_LABEL_KEY: &str = "io.x-k8s.kind.extension.cluster";

/// Registry image run by the mirror strategy
pub const REGISTRY_IMAGE: &str = "registry:2";

/// Pull-through caching proxy image run by the proxy strategy
///
/// <https://github.com/rpardini/docker-registry-proxy#simple-no-auth-all-cache>
pub const PROXY_IMAGE: &str = "rpardini/docker-registry-proxy:0.6.3";

/// Port the registry serves on inside the kind network
pub const REGISTRY_PORT: u16 = 5000;

/// Port the caching proxy serves on inside the kind network
pub const PROXY_PORT: u16 = 3128;

/// Host-side address of the local registry, used when retagging pulled images
pub const LOCAL_REGISTRY: &str = "localhost:5000";
