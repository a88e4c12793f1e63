//! CLI commands

use tokio::process::Command;

use crate::{Error, Result};

pub mod cluster;
pub mod create;
pub mod delete;
pub mod pull;
pub mod zones;

/// Installation hint shown when docker is missing
pub const DOCKER_HINT: &str = "Install Docker: https://docs.docker.com/get-docker/";

/// Installation hint shown when kind is missing
pub const KIND_HINT: &str =
    "Install kind: https://kind.sigs.k8s.io/docs/user/quick-start/#installation";

/// Verify that `tool` is on PATH before shelling out to it.
///
/// Checked up front so a missing binary fails with an installation hint
/// instead of a mid-operation exec error.
pub async fn check_prerequisite(tool: &str, hint: &str) -> Result<()> {
    let result = Command::new("which").arg(tool).output().await?;
    if !result.status.success() {
        return Err(Error::PrerequisiteNotFound {
            tool: tool.to_string(),
            hint: hint.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn present_tool_passes_the_check() {
        // `sh` exists on any platform these tests run on
        check_prerequisite("sh", "install a shell").await.unwrap();
    }

    #[tokio::test]
    async fn missing_tool_fails_with_its_hint() {
        let err = check_prerequisite("definitely-not-a-real-binary", "see docs")
            .await
            .unwrap_err();
        match err {
            Error::PrerequisiteNotFound { tool, hint } => {
                assert_eq!(tool, "definitely-not-a-real-binary");
                assert_eq!(hint, "see docs");
            }
            other => panic!("expected PrerequisiteNotFound, got {other}"),
        }
    }
}
