//! Shared library for cross-cutting concerns in the workload-identity samples.
//!
//! This crate provides centralized implementations for:
//! - Error types for configuration and input problems
//! - Environment variable lookup with empty-string defaults
//! - HTTP client configuration and building
//! - Tracing subscriber initialization

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod env;
pub mod error;
pub mod http;
pub mod tracing_config;

pub use env::{parse_env, process_env, require_non_empty, var_or_empty};
pub use error::PlatformError;
pub use http::{HttpConfig, build_http_client};
pub use tracing_config::{TracingConfig, init_tracing};
