//! CLI error types.

use docnav_config::ConfigError;
use docnav_site::{GenerateError, RegistryError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Registry(#[from] RegistryError),

    #[error("{0}")]
    Generate(#[from] GenerateError),

    #[error("build finished with {0} error(s)")]
    BuildErrors(usize),
}
