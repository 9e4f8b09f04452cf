//! System-wide constants and well-known names.

/// Name of the AWS command-line tool every backend call shells out to.
pub const AWS_CLI_BINARY: &str = "aws";

/// Region used when neither a flag nor the environment provides one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Prefix of generated stack names; a millisecond timestamp is appended.
pub const STACK_NAME_PREFIX: &str = "FortiGate-Autoscale-CI";

/// Override key always populated with the deployment bucket name.
pub const BUCKET_OVERRIDE_KEY: &str = "S3BucketName";

/// Override key always populated with the key prefix (trailing slash included).
pub const KEY_PREFIX_OVERRIDE_KEY: &str = "S3KeyPrefix";

/// Override key populated from the `--ssh-key` flag.
pub const SSH_KEY_OVERRIDE_KEY: &str = "KeyPairName";

/// Symbols mixed into strong passwords.
pub const STRONG_PASSWORD_SYMBOLS: &str = "!@#$%^&*+-";

/// Tracing target for values an operator may need to retrieve later.
pub const AUDIT_TARGET: &str = "cideploy::audit";

/// Suffix of the temporary parameter file handed to stack creation.
pub const PARAMETER_FILE_SUFFIX: &str = ".json";

/// Stack capabilities requested so IAM-creating templates are accepted.
pub const STACK_CAPABILITIES: [&str; 2] = ["CAPABILITY_IAM", "CAPABILITY_NAMED_IAM"];
