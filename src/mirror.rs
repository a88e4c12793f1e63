//! Node-side registry configuration
//!
//! Renders the containerd mirror stanza or the systemd proxy fragment and
//! applies it to every node, restarting containerd so the change takes
//! effect. The loop over nodes is strictly sequential and aborts on the
//! first failing node; nodes configured before the failure are left as-is.

use tracing::info;

use crate::provider::NodeHandle;
use crate::{Error, Result, PROXY_PORT, REGISTRY_PORT};

/// containerd configuration file on kind nodes
pub const CONTAINERD_CONFIG_PATH: &str = "/etc/containerd/config.toml";

/// systemd drop-in that routes containerd through the proxy
pub const PROXY_DROPIN_PATH: &str = "/etc/systemd/system/containerd.service.d/http-proxy.conf";

/// Where the proxy CA lands on the node. update-ca-certificates implicitly
/// trusts every `.crt` below /usr/local/share/ca-certificates.
pub const NODE_CA_CERT_PATH: &str = "/usr/local/share/ca-certificates/kind_registry_proxy.crt";

/// Render the containerd stanza mirroring all registries through `registry`.
///
/// Appended verbatim to the node's existing configuration. The wildcard
/// mirror redirects unqualified pulls; TLS verification is disabled for it
/// because the registry serves plain HTTP inside the kind network.
pub fn mirror_stanza(registry: &str) -> String {
    let endpoint = format!("http://{registry}:{REGISTRY_PORT}");
    format!(
        r#"
[plugins."io.containerd.grpc.v1.cri".registry]
  [plugins."io.containerd.grpc.v1.cri".registry.mirrors]
    [plugins."io.containerd.grpc.v1.cri".registry.mirrors."*"]
      endpoint = ["{endpoint}"]
  [plugins."io.containerd.grpc.v1.cri".registry.configs]
    [plugins."io.containerd.grpc.v1.cri".registry.configs."*".tls]
      insecure_skip_verify = true
"#
    )
}

/// Base URL of the caching proxy inside the kind network
pub fn proxy_url(proxy: &str) -> String {
    format!("http://{proxy}:{PROXY_PORT}/")
}

/// Render the systemd drop-in pointing containerd's HTTP(S) traffic at `proxy`
pub fn proxy_dropin(proxy: &str) -> String {
    let url = proxy_url(proxy);
    format!("[Service]\nEnvironment=\"HTTP_PROXY={url}\"\nEnvironment=\"HTTPS_PROXY={url}\"\n")
}

/// Configure every node to mirror image pulls through `registry`.
pub async fn apply_mirror<N: NodeHandle + Sync>(nodes: &[N], registry: &str) -> Result<()> {
    let stanza = mirror_stanza(registry);

    for node in nodes {
        info!("configuring mirror on node {}", node.name());

        let mut config = node
            .command("cat", &[CONTAINERD_CONFIG_PATH])
            .await
            .map_err(|e| step_error(node.name(), "read containerd config", e))?;

        // TODO: patch instead of append when the stanza is already present
        config.push_str(&stanza);

        node.write_file(CONTAINERD_CONFIG_PATH, &config)
            .await
            .map_err(|e| step_error(node.name(), "write containerd config", e))?;

        node.command("systemctl", &["restart", "containerd"])
            .await
            .map_err(|e| step_error(node.name(), "restart containerd", e))?;
    }

    Ok(())
}

/// Configure every node to route containerd through the caching proxy and
/// trust its CA certificate.
pub async fn apply_proxy<N: NodeHandle + Sync>(nodes: &[N], proxy: &str) -> Result<()> {
    let dropin = proxy_dropin(proxy);
    let ca_url = format!("{}ca.crt", proxy_url(proxy));

    for node in nodes {
        info!("configuring proxy on node {}", node.name());

        node.write_file(PROXY_DROPIN_PATH, &dropin)
            .await
            .map_err(|e| step_error(node.name(), "write proxy config", e))?;

        node.command("curl", &["-o", NODE_CA_CERT_PATH, &ca_url])
            .await
            .map_err(|e| step_error(node.name(), "fetch proxy certificate", e))?;

        node.command("update-ca-certificates", &[])
            .await
            .map_err(|e| step_error(node.name(), "update CA certificates", e))?;

        node.command("systemctl", &["daemon-reload"])
            .await
            .map_err(|e| step_error(node.name(), "reload systemd units", e))?;

        node.command("systemctl", &["restart", "containerd"])
            .await
            .map_err(|e| step_error(node.name(), "restart containerd", e))?;
    }

    Ok(())
}

fn step_error(node: &str, step: &str, err: Error) -> Error {
    Error::node_step(node, step, err.to_string())
}
