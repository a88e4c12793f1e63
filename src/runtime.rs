//! Container runtime invocation
//!
//! Thin wrapper over the `docker` binary. Every call is an awaited
//! subprocess; failures carry the full command line and the runtime's
//! stderr.

use std::process::Stdio;

use tokio::process::Command;

use crate::{Error, Result};

/// Invokes the external container runtime CLI.
#[derive(Debug, Clone)]
pub struct Runtime {
    program: String,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// Runtime using the `docker` binary from PATH
    pub fn new() -> Self {
        Self {
            program: "docker".to_string(),
        }
    }

    /// Runtime using a specific binary (e.g. podman)
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run a runtime subcommand and capture stdout
    pub async fn output(&self, args: &[&str]) -> Result<String> {
        let output = Command::new(&self.program).args(args).output().await?;

        if !output.status.success() {
            return Err(Error::command_failed(
                format!("{} {}", self.program, args.join(" ")),
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Run a runtime subcommand with bytes piped to its stdin
    pub async fn output_with_stdin(&self, args: &[&str], stdin: &[u8]) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut pipe) = child.stdin.take() {
            use tokio::io::AsyncWriteExt;
            pipe.write_all(stdin).await?;
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(Error::command_failed(
                format!("{} {}", self.program, args.join(" ")),
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Pull an image
    pub async fn pull(&self, image: &str) -> Result<()> {
        self.output(&["pull", image]).await.map(drop)
    }

    /// Tag `image` as `target`
    pub async fn tag(&self, image: &str, target: &str) -> Result<()> {
        self.output(&["tag", image, target]).await.map(drop)
    }

    /// Push an image
    pub async fn push(&self, image: &str) -> Result<()> {
        self.output(&["push", image]).await.map(drop)
    }

    /// Force-remove a container
    pub async fn remove(&self, container: &str) -> Result<()> {
        self.output(&["rm", "-f", container]).await.map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_runtime_uses_docker() {
        assert_eq!(Runtime::new().program, "docker");
        assert_eq!(Runtime::default().program, "docker");
    }

    #[test]
    fn custom_program_can_be_configured() {
        let runtime = Runtime::with_program("podman");
        assert_eq!(runtime.program, "podman");
    }

    /// A failing invocation reports the full command line, not just the
    /// binary name.
    #[tokio::test]
    async fn failed_command_reports_command_line() {
        // `false` exits non-zero regardless of arguments
        let runtime = Runtime::with_program("false");
        let err = runtime.output(&["rm", "-f", "nope"]).await.unwrap_err();
        match err {
            Error::CommandFailed { command, .. } => {
                assert_eq!(command, "false rm -f nope");
            }
            other => panic!("expected CommandFailed, got {other}"),
        }
    }

    #[tokio::test]
    async fn missing_binary_surfaces_io_error() {
        let runtime = Runtime::with_program("definitely-not-a-real-binary");
        let err = runtime.output(&["ps"]).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
