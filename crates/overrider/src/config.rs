//! Resolution configuration.
//!
//! A [`ResolutionConfig`] names the base namespace being overridden, the
//! target namespace overrides are registered under, and the directory that
//! holds override units. It is validated once when built and is read-only
//! afterwards; only the existence of the override root is re-checked per
//! resolution.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::Deserialize;

use crate::error::ConfigurationError;

pub const ENV_PREFIX: &str = "CLASSOVERRIDER_";
pub const DEFAULT_SEPARATOR: &str = "\\";
pub const DEFAULT_EXTENSION: &str = "toml";

const TARGET_KEY: &str = "target namespace CLASSOVERRIDER_NS";
const BASE_KEY: &str = "base namespace CLASSOVERRIDER_BASE_NS";
const ROOT_KEY: &str = "overrides directory CLASSOVERRIDER_PATH";
const SEPARATOR_KEY: &str = "namespace separator CLASSOVERRIDER_SEPARATOR";
const EXTENSION_KEY: &str = "unit extension CLASSOVERRIDER_EXTENSION";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolutionConfig {
    target_namespace:    String,
    base_namespace:      String,
    override_root:       String,
    namespace_separator: String,
    extension:           String,
}

/// Raw settings as read from a file or the environment. Every key is
/// optional here so that absence is reported by validation, not by serde.
#[derive(Debug, Default, Deserialize)]
struct Settings {
    ns:        Option<String>,
    base_ns:   Option<String>,
    path:      Option<PathBuf>,
    separator: Option<String>,
    extension: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ResolutionConfigBuilder {
    target_namespace:    Option<String>,
    base_namespace:      Option<String>,
    override_root:       Option<PathBuf>,
    namespace_separator: Option<String>,
    extension:           Option<String>,
}

impl ResolutionConfigBuilder {
    pub fn target_namespace(mut self, ns: impl Into<String>) -> Self {
        self.target_namespace = Some(ns.into());
        self
    }

    pub fn base_namespace(mut self, ns: impl Into<String>) -> Self {
        self.base_namespace = Some(ns.into());
        self
    }

    pub fn override_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.override_root = Some(root.into());
        self
    }

    pub fn namespace_separator(mut self, separator: impl Into<String>) -> Self {
        self.namespace_separator = Some(separator.into());
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn build(self) -> Result<ResolutionConfig, ConfigurationError> {
        let target_namespace = required(self.target_namespace, TARGET_KEY)?;
        let base_namespace = required(self.base_namespace, BASE_KEY)?;
        let root = self
            .override_root
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ConfigurationError::Missing(ROOT_KEY))?;
        let namespace_separator = match self.namespace_separator {
            Some(s) => required(Some(s), SEPARATOR_KEY)?,
            None => DEFAULT_SEPARATOR.to_string(),
        };
        let extension = match self.extension {
            Some(e) => required(Some(e.trim_start_matches('.').to_string()), EXTENSION_KEY)?,
            None => DEFAULT_EXTENSION.to_string(),
        };

        if !root.is_dir() {
            return Err(ConfigurationError::RootNotFound(root));
        }
        let override_root = match root.to_str() {
            Some(s) => normalize_root(s),
            None => return Err(ConfigurationError::NonUtf8Root(root)),
        };

        Ok(ResolutionConfig {
            target_namespace,
            base_namespace,
            override_root,
            namespace_separator,
            extension,
        })
    }
}

fn required(value: Option<String>, key: &'static str) -> Result<String, ConfigurationError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ConfigurationError::Missing(key))
}

/// Make sure the root ends with exactly one separator. Adds `/` only when
/// neither `/` nor the platform separator already terminates it.
pub(crate) fn normalize_root(root: &str) -> String {
    if root.ends_with('/') || root.ends_with(MAIN_SEPARATOR) {
        root.to_string()
    } else {
        format!("{root}/")
    }
}

impl ResolutionConfig {
    pub fn new(
        target_namespace: impl Into<String>,
        base_namespace: impl Into<String>,
        override_root: impl Into<PathBuf>,
    ) -> Result<Self, ConfigurationError> {
        Self::builder()
            .target_namespace(target_namespace)
            .base_namespace(base_namespace)
            .override_root(override_root)
            .build()
    }

    pub fn builder() -> ResolutionConfigBuilder { ResolutionConfigBuilder::default() }

    /// Read `CLASSOVERRIDER_*` variables from the environment.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_figment(Figment::new().merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Read settings from a TOML file using the lower-cased, unprefixed keys.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        Self::from_figment(Figment::new().merge(Toml::file(path.as_ref())))
    }

    /// Read an optional TOML file, then let the environment override it.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigurationError> {
        let mut figment = Figment::new();
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        Self::from_figment(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigurationError> {
        let settings: Settings = figment.extract()?;

        let mut builder = Self::builder();
        if let Some(ns) = settings.ns {
            builder = builder.target_namespace(ns);
        }
        if let Some(base) = settings.base_ns {
            builder = builder.base_namespace(base);
        }
        if let Some(path) = settings.path {
            builder = builder.override_root(path);
        }
        if let Some(separator) = settings.separator {
            builder = builder.namespace_separator(separator);
        }
        if let Some(extension) = settings.extension {
            builder = builder.extension(extension);
        }
        builder.build()
    }

    pub fn target_namespace(&self) -> &str { &self.target_namespace }

    pub fn base_namespace(&self) -> &str { &self.base_namespace }

    /// The override root, always terminated by a separator.
    pub fn override_root(&self) -> &Path { Path::new(&self.override_root) }

    pub fn namespace_separator(&self) -> &str { &self.namespace_separator }

    pub fn extension(&self) -> &str { &self.extension }

    /// Re-check that the override root still resolves to a directory.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let root = self.override_root();
        if !root.is_dir() {
            return Err(ConfigurationError::RootNotFound(root.to_path_buf()));
        }
        Ok(())
    }

    /// Map a qualified name to the file its override would live in.
    pub fn candidate_path(&self, qualified: &str) -> PathBuf {
        let mut mapped = crate::name::substitute(
            qualified,
            &self.base_namespace,
            &self.override_root,
            &self.namespace_separator,
        );
        mapped.push('.');
        mapped.push_str(&self.extension);
        PathBuf::from(mapped)
    }

    /// Swap every occurrence of the base namespace for the target namespace.
    pub fn resolved_name(&self, qualified: &str) -> String {
        qualified.replace(&self.base_namespace, &self.target_namespace)
    }
}
