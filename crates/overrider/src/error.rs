//! Error types for override resolution.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("{0} is not defined")]
    Missing(&'static str),

    #[error("overrides directory '{}' does not exist", .0.display())]
    RootNotFound(PathBuf),

    #[error("overrides directory '{}' is not valid UTF-8", .0.display())]
    NonUtf8Root(PathBuf),

    #[error("resolution is not configured")]
    NotConfigured,

    #[error("resolution is already configured with different values")]
    AlreadyConfigured,

    #[error("failed to read configuration: {0}")]
    Source(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigurationError {
    fn from(e: figment::Error) -> Self { ConfigurationError::Source(Box::new(e)) }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("type '{0}' is already defined")]
    AlreadyDefined(String),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read override unit '{}': {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to load override unit '{}': {source}", .path.display())]
    Unit {
        path:   PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl LoadError {
    pub fn unit<E>(path: impl Into<PathBuf>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        LoadError::Unit {
            path:   path.into(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("type '{0}' is not defined")]
    UnknownType(String),

    #[error("override unit '{}' does not define '{name}'", .unit.display())]
    Undefined { name: String, unit: PathBuf },

    #[error("missing constructor argument at position {index}")]
    MissingArgument { index: usize },

    #[error("constructor argument at position {index} is not a {expected}")]
    ArgumentType {
        index:    usize,
        expected: &'static str,
    },

    #[error("construction rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub type Result<T> = std::result::Result<T, Error>;
