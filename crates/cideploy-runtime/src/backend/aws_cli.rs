//! Backend that shells out to the AWS CLI.
//!
//! Credentials and region from [`AwsConfig`] are set on each child process
//! only; the current process environment is never modified.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use cideploy_common::config::AwsConfig;
use cideploy_common::error::{DeployError, Result};
use cideploy_common::types::S3Location;
use cideploy_params::zones::ZoneLister;
use serde::Deserialize;
use tokio::process::Command;

use super::{PackageUploader, StackCreator, StackSpec, TemplateSource};

/// AWS CLI implementation of every cloud collaborator.
#[derive(Debug, Clone)]
pub struct AwsCliBackend {
    config: AwsConfig,
}

impl AwsCliBackend {
    /// Creates a backend using the given configuration.
    #[must_use]
    pub const fn new(config: AwsConfig) -> Self {
        Self { config }
    }

    fn locate_cli(&self) -> Result<PathBuf> {
        which::which(&self.config.cli_binary).map_err(|_| DeployError::NotFound {
            kind: "AWS CLI",
            id: format!(
                "{} (install the AWS CLI or pass its path)",
                self.config.cli_binary
            ),
        })
    }

    /// Runs the CLI with `args` and returns its stdout.
    async fn run(&self, args: &[String]) -> Result<String> {
        let binary = self.locate_cli()?;
        tracing::debug!(binary = %binary.display(), ?args, "invoking AWS CLI");

        let output = Command::new(&binary)
            .args(args)
            .envs(self.config.child_env())
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| DeployError::io(&binary, e))?;

        if !output.status.success() {
            return Err(DeployError::ExternalTool {
                tool: format!("aws {}", args.iter().take(2).cloned().collect::<Vec<_>>().join(" ")),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl TemplateSource for AwsCliBackend {
    async fn fetch_template(
        &self,
        location: &S3Location,
        template_key: &str,
    ) -> Result<serde_json::Value> {
        tracing::info!(uri = %location.object_uri(template_key), "fetching template");
        let body = self.run(&fetch_template_args(location, template_key)).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ZoneLister for AwsCliBackend {
    fn region(&self) -> &str {
        &self.config.region
    }

    async fn list_zones(&self) -> Result<Vec<String>> {
        let body = self.run(&list_zones_args(&self.config.region)).await?;
        let zones = parse_zone_listing(&body)?;
        tracing::debug!(region = %self.config.region, count = zones.len(), "listed availability zones");
        Ok(zones)
    }
}

#[async_trait]
impl StackCreator for AwsCliBackend {
    async fn create_stack(&self, spec: &StackSpec) -> Result<String> {
        tracing::info!(stack = %spec.stack_name, template = %spec.template_url, "creating stack");
        self.run(&create_stack_args(spec, &self.config.region)).await
    }
}

#[async_trait]
impl PackageUploader for AwsCliBackend {
    async fn sync_directory(&self, dir: &Path, location: &S3Location) -> Result<String> {
        tracing::info!(source = %dir.display(), destination = %location, "syncing package");
        let _ = self.run(&sync_args(dir, location)).await?;
        Ok(location.to_string())
    }
}

/// Arguments that stream a template object to stdout.
#[must_use]
pub fn fetch_template_args(location: &S3Location, template_key: &str) -> Vec<String> {
    vec![
        "s3".into(),
        "cp".into(),
        location.object_uri(template_key),
        "-".into(),
    ]
}

/// Arguments that list the available zones of `region` as JSON.
#[must_use]
pub fn list_zones_args(region: &str) -> Vec<String> {
    vec![
        "ec2".into(),
        "describe-availability-zones".into(),
        "--region".into(),
        region.into(),
        "--filters".into(),
        "Name=state,Values=available".into(),
        "--output".into(),
        "json".into(),
    ]
}

/// Arguments for `cloudformation create-stack`.
#[must_use]
pub fn create_stack_args(spec: &StackSpec, region: &str) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "cloudformation".into(),
        "create-stack".into(),
        "--region".into(),
        region.into(),
        "--stack-name".into(),
        spec.stack_name.clone(),
        "--template-url".into(),
        spec.template_url.clone(),
        "--parameters".into(),
        format!("file://{}", spec.parameter_file.display()),
    ];
    if !spec.capabilities.is_empty() {
        args.push("--capabilities".into());
        args.extend(spec.capabilities.iter().cloned());
    }
    if spec.disable_rollback {
        args.push("--disable-rollback".into());
    }
    args.extend(["--output".into(), "json".into()]);
    args
}

/// Arguments that mirror `dir` into `location`.
#[must_use]
pub fn sync_args(dir: &Path, location: &S3Location) -> Vec<String> {
    vec![
        "s3".into(),
        "sync".into(),
        dir.display().to_string(),
        location.to_string(),
    ]
}

#[derive(Debug, Deserialize)]
struct ZoneListing {
    #[serde(rename = "AvailabilityZones", default)]
    zones: Vec<ZoneRecord>,
}

#[derive(Debug, Deserialize)]
struct ZoneRecord {
    #[serde(rename = "ZoneName")]
    name: String,
    #[serde(rename = "State", default)]
    state: Option<String>,
}

/// Extracts available zone names from `describe-availability-zones` output,
/// keeping the order the CLI reported.
///
/// # Errors
///
/// Returns an error if the output is not the expected JSON shape.
pub fn parse_zone_listing(body: &str) -> Result<Vec<String>> {
    let listing: ZoneListing = serde_json::from_str(body)?;
    Ok(listing
        .zones
        .into_iter()
        .filter(|z| z.state.as_deref().is_none_or(|s| s == "available"))
        .map(|z| z.name)
        .collect())
}
