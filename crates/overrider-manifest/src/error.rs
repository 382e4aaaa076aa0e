//! Error types for manifest loading.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("symbol '{0}' is not exported")]
    UnknownSymbol(String),

    #[error("entry '{0}' has an empty name")]
    EmptyName(String),
}

pub type Result<T> = std::result::Result<T, ManifestError>;
