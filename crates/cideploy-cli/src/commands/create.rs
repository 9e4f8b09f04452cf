//! `cideploy create` — Resolve parameters and create a stack.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use cideploy_common::types::S3Location;
use cideploy_runtime::backend::aws_cli::AwsCliBackend;
use cideploy_runtime::engine::{CreateStackRequest, Engine};

use super::AwsArgs;
use crate::output::{BOLD, DIM, GREEN, RESET, format_elapsed, format_parameters};

/// Arguments for the `create` subcommand.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Bucket holding the template.
    pub bucket: String,

    /// Key prefix of the deployment inside the bucket.
    pub key_prefix: String,

    /// Template object key, relative to the key prefix.
    pub template: String,

    /// Local parameter document (JSON array of ParameterKey/ParameterValue).
    #[arg(long)]
    pub param_file: PathBuf,

    /// Override specification: space-separated `Name=<key>,Value=<value>` tokens.
    #[arg(long = "override", default_value = "")]
    pub overrides: String,

    /// EC2 key pair name, available to `$[cd_overridden]` as KeyPairName.
    #[arg(long)]
    pub ssh_key: Option<String>,

    /// Print the resolved parameter file without creating the stack.
    #[arg(long)]
    pub dry_run: bool,

    /// Roll back the stack if creation fails.
    #[arg(long)]
    pub enable_rollback: bool,

    /// Credential and region flags.
    #[command(flatten)]
    pub aws: AwsArgs,
}

/// Executes the `create` command.
///
/// # Errors
///
/// Returns an error if the parameter document is missing or any stage of
/// the create-stack pipeline fails.
pub async fn execute(args: CreateArgs) -> anyhow::Result<()> {
    let started = Instant::now();
    if !args.param_file.exists() {
        anyhow::bail!("parameter file not found: {}", args.param_file.display());
    }

    let request = CreateStackRequest {
        location: S3Location::new(args.bucket, &args.key_prefix),
        template_key: args.template,
        parameter_file: args.param_file,
        overrides: args.overrides,
        ssh_key: args.ssh_key,
        disable_rollback: !args.enable_rollback,
        dry_run: args.dry_run,
    };
    tracing::info!(
        template = %request.location.object_uri(&request.template_key),
        dry_run = request.dry_run,
        "creating stack"
    );

    let engine = Engine::new(AwsCliBackend::new(args.aws.into_config()));
    let creation = engine.create_stack(&request).await?;

    if request.dry_run {
        println!("{}", creation.parameter_file);
        return Ok(());
    }

    eprintln!();
    eprintln!(
        "  {GREEN}{BOLD}Created{RESET} stack {BOLD}{}{RESET} in {}",
        creation.stack_name,
        format_elapsed(started.elapsed())
    );
    eprintln!("  {DIM}Template: {}{RESET}", creation.template_url);
    eprint!("{}", format_parameters(&creation.parameters));
    if let Some(output) = creation.output {
        println!("{}", output.trim_end());
    }
    Ok(())
}
