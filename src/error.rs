//! Error types for the CLI

use std::time::Duration;

/// CLI Result type
pub type Result<T> = std::result::Result<T, Error>;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prerequisite not found: {tool} - {hint}")]
    PrerequisiteNotFound { tool: String, hint: String },

    #[error("command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    #[error("no nodes found for cluster {cluster:?}")]
    NoNodesFound { cluster: String },

    #[error("failed to {step} on node {node}: {message}")]
    NodeStep {
        node: String,
        step: String,
        message: String,
    },

    #[error("timed out after {waited:?} waiting for {what}")]
    Timeout { what: String, waited: Duration },
}

impl Error {
    pub fn command_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        Error::CommandFailed {
            command: command.into(),
            message: message.into(),
        }
    }

    pub fn node_step(
        node: impl Into<String>,
        step: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::NodeStep {
            node: node.into(),
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn timeout(what: impl Into<String>, waited: Duration) -> Self {
        Error::Timeout {
            what: what.into(),
            waited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::PrerequisiteNotFound {
            tool: "kind".to_string(),
            hint: "install it".to_string(),
        };
        assert!(err.to_string().contains("kind"));

        let err = Error::command_failed("docker run", "no such image");
        assert!(err.to_string().contains("docker run"));
        assert!(err.to_string().contains("no such image"));

        let err = Error::NoNodesFound {
            cluster: "kind".to_string(),
        };
        assert!(err.to_string().contains("no nodes found"));
        assert!(err.to_string().contains("\"kind\""));

        let err = Error::node_step("kind-worker", "restart containerd", "exit status 1");
        assert!(err.to_string().contains("kind-worker"));
        assert!(err.to_string().contains("restart containerd"));

        let err = Error::timeout("registry to respond", Duration::from_secs(60));
        assert!(err.to_string().contains("60"));
        assert!(err.to_string().contains("registry to respond"));
    }
}
