//! Zones command - create a kind cluster emulating availability zones
//!
//! Delegates entirely to `kind create cluster`; everything after `create`
//! passes through verbatim, so any kind flag (`--config`, `--image`, ...)
//! works unchanged.

use std::process::Stdio;

use clap::{Args, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use super::{check_prerequisite, KIND_HINT};
use crate::{Error, Result};

#[derive(Subcommand, Debug)]
pub enum ZonesCommand {
    /// Create the cluster via `kind create cluster`
    Create(ZonesCreateArgs),
}

#[derive(Args, Debug)]
pub struct ZonesCreateArgs {
    /// Arguments passed through to `kind create cluster`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

pub async fn run(cmd: ZonesCommand) -> Result<()> {
    match cmd {
        ZonesCommand::Create(args) => create(args).await,
    }
}

async fn create(args: ZonesCreateArgs) -> Result<()> {
    check_prerequisite("kind", KIND_HINT).await?;

    let mut kind_args = vec!["create".to_string(), "cluster".to_string()];
    kind_args.extend(args.args);

    // kind draws its progress on stderr; let it through untouched
    let mut child = Command::new("kind")
        .args(&kind_args)
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()?;

    if let Some(stdout) = child.stdout.take() {
        let reader = BufReader::new(stdout);
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            println!("{line}");
        }
    }

    let status = child.wait().await?;
    if !status.success() {
        return Err(Error::command_failed(
            format!("kind {}", kind_args.join(" ")),
            format!("exited with {status}"),
        ));
    }

    Ok(())
}
