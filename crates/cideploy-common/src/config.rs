//! Cloud CLI configuration threaded into every external-tool call.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Credentials and region for the AWS CLI.
///
/// The values are applied to each spawned child process individually and
/// never written into the current process environment.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsConfig {
    /// Access key ID, if not inherited from the ambient CLI profile.
    pub access_key_id: Option<String>,
    /// Secret access key, if not inherited from the ambient CLI profile.
    pub secret_access_key: Option<String>,
    /// Region every call targets.
    pub region: String,
    /// Name or path of the AWS CLI executable.
    pub cli_binary: String,
}

impl AwsConfig {
    /// Creates a configuration for the given region with ambient credentials.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Self::default()
        }
    }

    /// Sets explicit credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        access_key_id: Option<String>,
        secret_access_key: Option<String>,
    ) -> Self {
        self.access_key_id = access_key_id;
        self.secret_access_key = secret_access_key;
        self
    }

    /// Environment variables to set on a spawned CLI process.
    #[must_use]
    pub fn child_env(&self) -> Vec<(&'static str, String)> {
        let mut env = vec![
            ("AWS_DEFAULT_REGION", self.region.clone()),
            ("AWS_REGION", self.region.clone()),
        ];
        if let Some(id) = &self.access_key_id {
            env.push(("AWS_ACCESS_KEY_ID", id.clone()));
        }
        if let Some(secret) = &self.secret_access_key {
            env.push(("AWS_SECRET_ACCESS_KEY", secret.clone()));
        }
        env
    }
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            access_key_id: None,
            secret_access_key: None,
            region: crate::constants::DEFAULT_REGION.to_string(),
            cli_binary: crate::constants::AWS_CLI_BINARY.to_string(),
        }
    }
}

impl fmt::Debug for AwsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsConfig")
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("region", &self.region)
            .field("cli_binary", &self.cli_binary)
            .finish()
    }
}
