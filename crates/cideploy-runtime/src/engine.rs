//! Deployment engine that sequences the create-stack and deploy-package
//! pipelines.

use std::path::PathBuf;

use cideploy_common::constants::{
    PARAMETER_FILE_SUFFIX, SSH_KEY_OVERRIDE_KEY, STACK_CAPABILITIES, STACK_NAME_PREFIX,
};
use cideploy_common::error::{DeployError, Result};
use cideploy_common::types::{ParameterEntry, S3Location};
use cideploy_params::document;
use cideploy_params::overrides::OverrideTable;
use cideploy_params::resolver::{self, ResolveContext};
use cideploy_params::schema::TemplateSchema;
use cideploy_params::zones::ZoneLister;

use crate::archive;
use crate::backend::{CloudBackend, StackSpec};

/// Inputs of the create-stack pipeline.
#[derive(Debug, Clone)]
pub struct CreateStackRequest {
    /// Bucket and prefix holding the template.
    pub location: S3Location,
    /// Template object key relative to the prefix.
    pub template_key: String,
    /// Local parameter document.
    pub parameter_file: PathBuf,
    /// Raw `Name=<key>,Value=<value>` override specification.
    pub overrides: String,
    /// Key pair name injected as the `KeyPairName` override.
    pub ssh_key: Option<String>,
    /// Leave a failed stack in place instead of rolling it back.
    pub disable_rollback: bool,
    /// Resolve and render parameters without creating the stack.
    pub dry_run: bool,
}

impl CreateStackRequest {
    /// Creates a request with rollback disabled and no overrides.
    #[must_use]
    pub fn new(
        location: S3Location,
        template_key: impl Into<String>,
        parameter_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            location,
            template_key: template_key.into(),
            parameter_file: parameter_file.into(),
            overrides: String::new(),
            ssh_key: None,
            disable_rollback: true,
            dry_run: false,
        }
    }
}

/// Result of the create-stack pipeline.
#[derive(Debug, Clone)]
pub struct StackCreation {
    /// Generated stack name.
    pub stack_name: String,
    /// HTTPS URL of the template the stack was created from.
    pub template_url: String,
    /// Resolved parameters in document order.
    pub parameters: Vec<ParameterEntry>,
    /// Contents of the parameter file handed to stack creation.
    pub parameter_file: String,
    /// Output of the stack creator; `None` for a dry run.
    pub output: Option<String>,
}

/// Inputs of the deploy-package pipeline.
#[derive(Debug, Clone)]
pub struct DeployPackageRequest {
    /// Local package archive.
    pub package: PathBuf,
    /// Destination bucket and prefix.
    pub location: S3Location,
}

/// Coordinates the resolver with the cloud backend.
#[derive(Debug)]
pub struct Engine<B> {
    backend: B,
}

impl<B: CloudBackend> Engine<B> {
    /// Creates an engine on top of `backend`.
    #[must_use]
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns the backend.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Fetches the template and resolves the parameter document against it.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be fetched, the document
    /// cannot be loaded, or any parameter fails to resolve.
    pub async fn resolve_parameters(
        &self,
        request: &CreateStackRequest,
    ) -> Result<Vec<ParameterEntry>> {
        let template = self
            .backend
            .fetch_template(&request.location, &request.template_key)
            .await?;
        let schema = TemplateSchema::from_template(&template)?;
        tracing::info!(parameters = schema.len(), "template schema loaded");

        let overrides = build_overrides(request);
        tracing::debug!(overrides = overrides.len(), "override table built");
        let entries = document::load_document(&request.parameter_file)?;

        let zones: &dyn ZoneLister = &self.backend;
        let ctx = ResolveContext::new(&schema, &overrides, zones);
        resolver::resolve_all(entries, &ctx).await
    }

    /// Runs the create-stack pipeline.
    ///
    /// The parameter file lives in a temporary file that is removed once
    /// stack creation returns.
    ///
    /// # Errors
    ///
    /// Returns an error if any stage fails; later stages are not run.
    pub async fn create_stack(&self, request: &CreateStackRequest) -> Result<StackCreation> {
        let parameters = self.resolve_parameters(request).await?;
        let rendered = document::render_parameter_file(&parameters)?;

        let stack_name = generate_stack_name();
        let template_url = request
            .location
            .https_url(self.backend.region(), &request.template_key);

        if request.dry_run {
            tracing::info!(stack = %stack_name, "dry run, skipping stack creation");
            return Ok(StackCreation {
                stack_name,
                template_url,
                parameters,
                parameter_file: rendered,
                output: None,
            });
        }

        let file = tempfile::Builder::new()
            .prefix("cideploy-params-")
            .suffix(PARAMETER_FILE_SUFFIX)
            .tempfile()
            .map_err(|e| DeployError::io(std::env::temp_dir(), e))?;
        document::write_parameter_file(&parameters, file.path())?;

        let spec = StackSpec {
            stack_name: stack_name.clone(),
            template_url: template_url.clone(),
            parameter_file: file.path().to_path_buf(),
            disable_rollback: request.disable_rollback,
            capabilities: STACK_CAPABILITIES.iter().map(|c| (*c).to_string()).collect(),
        };
        let output = self.backend.create_stack(&spec).await?;
        tracing::info!(stack = %stack_name, "stack creation submitted");

        Ok(StackCreation {
            stack_name,
            template_url,
            parameters,
            parameter_file: rendered,
            output: Some(output),
        })
    }

    /// Runs the deploy-package pipeline and returns the destination URI.
    ///
    /// # Errors
    ///
    /// Returns an error if extraction or upload fails.
    pub async fn deploy_package(&self, request: &DeployPackageRequest) -> Result<String> {
        let package = request.package.clone();
        let extracted = tokio::task::spawn_blocking(move || archive::extract_package(&package))
            .await
            .map_err(|e| DeployError::Archive {
                path: request.package.clone(),
                message: format!("extraction task failed: {e}"),
            })??;

        let destination = self
            .backend
            .sync_directory(extracted.path(), &request.location)
            .await?;
        tracing::info!(destination = %destination, "package deployed");
        Ok(destination)
    }
}

/// Builds the override table for a request.
///
/// The user specification is parsed first, then the SSH key entry, then
/// the synthetic bucket and prefix entries, so later layers win.
#[must_use]
pub fn build_overrides(request: &CreateStackRequest) -> OverrideTable {
    let mut table = OverrideTable::parse(&request.overrides);
    if let Some(key) = &request.ssh_key {
        table = table.with_entry(SSH_KEY_OVERRIDE_KEY, key.clone());
    }
    table.with_synthetic(&request.location)
}

/// Returns a stack name of the form `FortiGate-Autoscale-CI-<unix millis>`.
#[must_use]
pub fn generate_stack_name() -> String {
    format!(
        "{STACK_NAME_PREFIX}-{}",
        chrono::Utc::now().timestamp_millis()
    )
}
