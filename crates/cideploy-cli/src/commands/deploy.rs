//! `cideploy deploy` — Unpack a package and upload it to S3.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use cideploy_common::types::S3Location;
use cideploy_runtime::backend::aws_cli::AwsCliBackend;
use cideploy_runtime::engine::{DeployPackageRequest, Engine};

use super::AwsArgs;
use crate::output::{BOLD, GREEN, RESET, format_elapsed};

/// Arguments for the `deploy` subcommand.
#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Path to the package archive (.zip, .tar, .tar.gz, .tgz).
    pub package: PathBuf,

    /// Destination bucket.
    #[arg(long)]
    pub bucket: String,

    /// Destination key prefix inside the bucket.
    #[arg(long, default_value = "")]
    pub key_prefix: String,

    /// Credential and region flags.
    #[command(flatten)]
    pub aws: AwsArgs,
}

/// Executes the `deploy` command.
///
/// # Errors
///
/// Returns an error if the package is missing, cannot be extracted, or
/// the upload fails.
pub async fn execute(args: DeployArgs) -> anyhow::Result<()> {
    let started = Instant::now();
    if !args.package.exists() {
        anyhow::bail!("package not found: {}", args.package.display());
    }

    let request = DeployPackageRequest {
        package: args.package,
        location: S3Location::new(args.bucket, &args.key_prefix),
    };
    tracing::info!(package = %request.package.display(), destination = %request.location, "deploying package");

    let engine = Engine::new(AwsCliBackend::new(args.aws.into_config()));
    let destination = engine.deploy_package(&request).await?;

    eprintln!(
        "  {GREEN}{BOLD}Deployed{RESET} {} -> {destination} in {}",
        request.package.display(),
        format_elapsed(started.elapsed())
    );
    println!("{destination}");
    Ok(())
}
