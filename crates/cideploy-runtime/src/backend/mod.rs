//! Cloud collaborator abstraction.
//!
//! The engine only talks to the cloud through these traits. The shipped
//! implementation shells out to the AWS CLI; tests substitute in-memory
//! fakes.

pub mod aws_cli;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cideploy_common::error::Result;
use cideploy_common::types::S3Location;
use cideploy_params::zones::ZoneLister;

/// Everything the stack creator needs for one `create-stack` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackSpec {
    /// Name of the stack to create.
    pub stack_name: String,
    /// HTTPS URL of the template in object storage.
    pub template_url: String,
    /// Local path of the resolved parameter file.
    pub parameter_file: PathBuf,
    /// Leave a failed stack in place instead of rolling it back.
    pub disable_rollback: bool,
    /// Capabilities acknowledged for the stack.
    pub capabilities: Vec<String>,
}

/// Fetches stack templates from object storage.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Downloads and parses the template `template_key` under `location`.
    ///
    /// # Errors
    ///
    /// Returns an error if the download fails or the template is not JSON.
    async fn fetch_template(
        &self,
        location: &S3Location,
        template_key: &str,
    ) -> Result<serde_json::Value>;
}

/// Creates infrastructure stacks.
#[async_trait]
pub trait StackCreator: Send + Sync {
    /// Creates the stack and returns the tool's output.
    ///
    /// # Errors
    ///
    /// Returns an error carrying the tool's raw error text on failure.
    async fn create_stack(&self, spec: &StackSpec) -> Result<String>;
}

/// Uploads directory trees to object storage.
#[async_trait]
pub trait PackageUploader: Send + Sync {
    /// Syncs the contents of `dir` to `location` and returns the destination URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails.
    async fn sync_directory(&self, dir: &Path, location: &S3Location) -> Result<String>;
}

/// Full set of collaborators the engine depends on.
pub trait CloudBackend: TemplateSource + ZoneLister + StackCreator + PackageUploader {}

impl<T> CloudBackend for T where T: TemplateSource + ZoneLister + StackCreator + PackageUploader {}
