//! Cluster node access
//!
//! Nodes are enumerated with the `kind` binary and addressed by their node
//! container name. Commands run on a node through `docker exec`; file
//! writes stream through stdin to `cp /dev/stdin <path>` inside the node.
//! Nothing is cached - the node set is resolved fresh per invocation.

use async_trait::async_trait;
use tokio::process::Command;

use crate::runtime::Runtime;
use crate::{Error, Result};

/// One addressable cluster node.
///
/// This trait is the seam between the node-configuration loops and the real
/// docker-exec transport, so the loops can be exercised against fakes.
#[async_trait]
pub trait NodeHandle {
    /// Node container name
    fn name(&self) -> &str;

    /// Run a command inside the node and capture its stdout
    async fn command(&self, program: &str, args: &[&str]) -> Result<String>;

    /// Write a file inside the node, creating parent directories as needed
    async fn write_file(&self, path: &str, content: &str) -> Result<()>;
}

/// A kind node backed by `docker exec`
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    runtime: Runtime,
}

impl Node {
    /// Node handle for the given node container name
    pub fn new(name: impl Into<String>, runtime: Runtime) -> Self {
        Self {
            name: name.into(),
            runtime,
        }
    }
}

#[async_trait]
impl NodeHandle for Node {
    fn name(&self) -> &str {
        &self.name
    }

    async fn command(&self, program: &str, args: &[&str]) -> Result<String> {
        let mut exec_args = vec!["exec", self.name.as_str(), program];
        exec_args.extend_from_slice(args);
        self.runtime.output(&exec_args).await
    }

    async fn write_file(&self, path: &str, content: &str) -> Result<()> {
        if let Some((dir, _)) = path.rsplit_once('/') {
            if !dir.is_empty() {
                self.command("mkdir", &["-p", dir]).await?;
            }
        }
        let args = ["exec", "-i", self.name.as_str(), "cp", "/dev/stdin", path];
        self.runtime
            .output_with_stdin(&args, content.as_bytes())
            .await
            .map(drop)
    }
}

/// Enumerates the nodes of a kind cluster.
#[derive(Debug, Clone, Default)]
pub struct Provider {
    runtime: Runtime,
}

impl Provider {
    /// Provider handing out nodes backed by `runtime`
    pub fn new(runtime: Runtime) -> Self {
        Self { runtime }
    }

    /// List the node containers of `cluster`.
    ///
    /// Fails with [`Error::NoNodesFound`] when the cluster resolves to no
    /// nodes, before anything has been mutated. `kind get nodes` reports a
    /// missing cluster as empty output, so both cases land here.
    pub async fn list_nodes(&self, cluster: &str) -> Result<Vec<Node>> {
        let output = Command::new("kind")
            .args(["get", "nodes", "--name", cluster])
            .output()
            .await?;

        if !output.status.success() {
            return Err(Error::command_failed(
                format!("kind get nodes --name {cluster}"),
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let names = parse_node_names(&String::from_utf8_lossy(&output.stdout));
        if names.is_empty() {
            return Err(Error::NoNodesFound {
                cluster: cluster.to_string(),
            });
        }

        Ok(names
            .into_iter()
            .map(|name| Node::new(name, self.runtime.clone()))
            .collect())
    }
}

/// Parse `kind get nodes` output into node names, one per non-empty line
fn parse_node_names(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_node_per_line() {
        let names = parse_node_names("kind-control-plane\nkind-worker\nkind-worker2\n");
        assert_eq!(
            names,
            vec!["kind-control-plane", "kind-worker", "kind-worker2"]
        );
    }

    #[test]
    fn empty_output_means_no_nodes() {
        assert!(parse_node_names("").is_empty());
        assert!(parse_node_names("\n\n").is_empty());
    }

    #[test]
    fn whitespace_is_trimmed() {
        let names = parse_node_names("  kind-control-plane  \n");
        assert_eq!(names, vec!["kind-control-plane"]);
    }
}
