//! CLI command definitions and dispatch.

pub mod create;
pub mod deploy;

use clap::{Args, Parser, Subcommand};
use cideploy_common::config::AwsConfig;
use cideploy_common::constants::{AWS_CLI_BINARY, DEFAULT_REGION};

/// cideploy — package upload and parameterized stack creation.
#[derive(Parser, Debug)]
#[command(name = "cideploy", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Unpack a package archive and upload its contents to S3.
    Deploy(deploy::DeployArgs),
    /// Resolve a parameter document and create a stack from a template.
    Create(create::CreateArgs),
}

/// Credential and region flags shared by every subcommand.
#[derive(Args, Debug)]
pub struct AwsArgs {
    /// AWS access key ID.
    #[arg(long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    pub access_key_id: Option<String>,

    /// AWS secret access key.
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_access_key: Option<String>,

    /// AWS region for every call.
    #[arg(long, env = "AWS_DEFAULT_REGION", default_value = DEFAULT_REGION)]
    pub aws_region: String,

    /// Name or path of the AWS CLI executable.
    #[arg(long, default_value = AWS_CLI_BINARY)]
    pub aws_cli: String,
}

impl AwsArgs {
    /// Builds the configuration threaded into every AWS CLI call.
    #[must_use]
    pub fn into_config(self) -> AwsConfig {
        AwsConfig {
            cli_binary: self.aws_cli,
            ..AwsConfig::new(self.aws_region)
        }
        .with_credentials(self.access_key_id, self.secret_access_key)
    }
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Deploy(args) => deploy::execute(args).await,
        Command::Create(args) => create::execute(args).await,
    }
}
