//! # cideploy-params
//!
//! Resolution of stack parameter documents into concrete values.
//!
//! Handles:
//! - **Directive**: Parsing `$[cd_*]` markers into a tagged [`directive::Directive`].
//! - **Generate**: Random strings, passwords, and availability-zone subsets.
//! - **Overrides**: The `Name=<key>,Value=<value>` override table.
//! - **Schema**: Template parameter defaults.
//! - **Document**: Loading parameter documents and rendering parameter files.
//! - **Resolver**: Concurrent, all-or-nothing resolution of a parameter set.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

pub mod directive;
pub mod document;
pub mod generate;
pub mod overrides;
pub mod resolver;
pub mod schema;
pub mod zones;
