//! Registry container lifecycle
//!
//! Creates, waits for, and removes the per-cluster registry (or caching
//! proxy) container on the kind network. The container name is a pure
//! function of the cluster name, which is what lets `delete` find what
//! `create` made.

use std::time::Duration;

use clap::ValueEnum;
use tracing::warn;

use crate::poll::wait_with_timeout;
use crate::provider::NodeHandle;
use crate::runtime::Runtime;
use crate::{
    Result, CLUSTER_LABEL_KEY, KIND_NETWORK, PROXY_IMAGE, PROXY_PORT, REGISTRY_IMAGE, REGISTRY_PORT,
};

/// How cluster nodes are pointed at the local registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Run a plain registry and configure containerd to mirror through it
    Mirror,
    /// Run a caching proxy and route containerd's HTTP(S) traffic through it
    Proxy,
}

impl Strategy {
    /// Image the strategy's container runs
    pub fn image(self) -> &'static str {
        match self {
            Strategy::Mirror => REGISTRY_IMAGE,
            Strategy::Proxy => PROXY_IMAGE,
        }
    }

    /// Port the container serves on inside the kind network
    pub fn port(self) -> u16 {
        match self {
            Strategy::Mirror => REGISTRY_PORT,
            Strategy::Proxy => PROXY_PORT,
        }
    }

    /// HTTP path probed to decide the container is ready for node
    /// configuration. The proxy issues its CA shortly after start, so its
    /// certificate endpoint is the readiness signal; the registry is ready
    /// once the v2 API answers.
    fn readiness_path(self) -> &'static str {
        match self {
            Strategy::Mirror => "/v2/",
            Strategy::Proxy => "/ca.crt",
        }
    }
}

/// Derive the registry container name for a cluster.
pub fn container_name(cluster: &str) -> String {
    format!("kind-registry-{cluster}")
}

/// How long to wait for a freshly started container to serve requests
const READY_TIMEOUT: Duration = Duration::from_secs(60);

/// Interval between readiness probes
const READY_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Start the registry/proxy container for `cluster` and return its name.
///
/// The container is detached, attached to the kind network under its
/// well-known name, labeled with the cluster it belongs to, and restarted
/// on failure the same way kind restarts its own node containers.
///
/// On failure with `retain` unset, the partial container is force-removed;
/// a cleanup failure is logged and the original error returned.
pub async fn create_container(
    runtime: &Runtime,
    cluster: &str,
    strategy: Strategy,
    retain: bool,
) -> Result<String> {
    let name = container_name(cluster);
    let args = run_args(&name, cluster, strategy);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    if let Err(err) = runtime.output(&args).await {
        if !retain {
            if let Err(cleanup) = runtime.remove(&name).await {
                warn!("failed to clean up container {}: {}", name, cleanup);
            }
        }
        return Err(err);
    }

    Ok(name)
}

/// Build the `docker run` argument list for the strategy's container
fn run_args(name: &str, cluster: &str, strategy: Strategy) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "run".into(),
        "-d".into(),
        "--net".into(),
        KIND_NETWORK.into(),
        "--name".into(),
        name.into(),
        "--label".into(),
        format!("{CLUSTER_LABEL_KEY}={cluster}"),
        "--restart=on-failure:1".into(),
    ];

    if strategy == Strategy::Proxy {
        // manifest caching plus the common public registries; see the proxy
        // image docs for the full knob list
        args.extend([
            "-e".into(),
            "ENABLE_MANIFEST_CACHE=true".into(),
            "-e".into(),
            "REGISTRIES=k8s.gcr.io gcr.io quay.io".into(),
        ]);
    }

    args.push(strategy.image().into());
    args
}

/// Wait until `container` answers HTTP from inside the cluster.
///
/// Probes from `node` because the kind network is not generally reachable
/// from the host. Polls rather than sleeping: the proxy needs a moment
/// after start before `/ca.crt` exists.
pub async fn wait_until_ready<N: NodeHandle + Sync>(
    node: &N,
    container: &str,
    strategy: Strategy,
) -> Result<()> {
    let url = format!(
        "http://{}:{}{}",
        container,
        strategy.port(),
        strategy.readiness_path()
    );

    wait_with_timeout(
        READY_TIMEOUT,
        READY_POLL_INTERVAL,
        &format!("{url} to respond"),
        || {
            let url = url.clone();
            async move {
                match node
                    .command("curl", &["-fsS", "-o", "/dev/null", &url])
                    .await
                {
                    Ok(_) => Ok(Some(())),
                    Err(_) => Ok(None),
                }
            }
        },
    )
    .await
}

/// Remove the registry container for `cluster`.
///
/// Force-remove; an error from the runtime (including "no such container")
/// surfaces unchanged.
pub async fn delete_container(runtime: &Runtime, cluster: &str) -> Result<()> {
    runtime.remove(&container_name(cluster)).await
}
