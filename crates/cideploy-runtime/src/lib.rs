//! # cideploy-runtime
//!
//! Deployment orchestration on top of the parameter resolver.
//!
//! Handles:
//! - **Backend**: Collaborator traits for template fetch, zone listing,
//!   stack creation, and uploads, plus the AWS CLI implementation.
//! - **Archive**: Unpacking deployment packages into temporary directories.
//! - **Engine**: The create-stack and deploy-package pipelines.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

pub mod archive;
pub mod backend;
pub mod engine;
