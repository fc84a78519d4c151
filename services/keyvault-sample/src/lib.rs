//! Key Vault secret fetch using Azure AD workload identity.
//!
//! Reads its configuration from the environment, builds a credential from
//! the projected service account token, and prints the requested secret.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod flow;

pub use config::{CredentialKind, SampleConfig};
pub use error::{SampleError, SampleResult};
pub use flow::{build_credential, render, run};
