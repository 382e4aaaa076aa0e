//! Process-wide configuration.
//!
//! Set once at startup, read everywhere afterwards. Installing the same
//! configuration again is accepted; installing a different one is not.

use std::path::PathBuf;

use once_cell::sync::OnceCell;

use crate::config::ResolutionConfig;
use crate::error::ConfigurationError;

static CONFIG: OnceCell<ResolutionConfig> = OnceCell::new();

pub fn configure(
    target_namespace: impl Into<String>,
    base_namespace: impl Into<String>,
    override_root: impl Into<PathBuf>,
) -> Result<&'static ResolutionConfig, ConfigurationError> {
    install(ResolutionConfig::new(
        target_namespace,
        base_namespace,
        override_root,
    )?)
}

pub fn install(config: ResolutionConfig) -> Result<&'static ResolutionConfig, ConfigurationError> {
    let installed = CONFIG.get_or_init(|| config.clone());
    if *installed != config {
        return Err(ConfigurationError::AlreadyConfigured);
    }
    tracing::debug!(
        target_ns = installed.target_namespace(),
        base_ns = installed.base_namespace(),
        root = %installed.override_root().display(),
        "resolution configured"
    );
    Ok(installed)
}

pub fn config() -> Result<&'static ResolutionConfig, ConfigurationError> {
    CONFIG.get().ok_or(ConfigurationError::NotConfigured)
}
