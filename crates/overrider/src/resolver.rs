//! Override-aware construction.
//!
//! # Architecture
//!
//! ```text
//! resolve(name, args)
//!   -> validate config
//!   -> map name to candidate unit path
//!   -> probe filesystem
//!        absent:  construct `name`
//!        present: load unit once, construct the target-namespace name
//! ```
//!
//! Loading is serialized: the load-once map stays locked across the
//! "already loaded?" check, the load and the registration of its
//! definitions, so concurrent resolutions of the same override observe a
//! single load.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::args::Args;
use crate::config::ResolutionConfig;
use crate::error::{ConstructionError, LoadError, RegistryError, Result};
use crate::global;
use crate::loader::UnitLoader;
use crate::registry::{Definition, TypeRegistry};

/// How a qualified name was resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// No override unit exists; the original type is used.
    Original(String),
    /// An override unit exists at `unit`; `name` is the target-namespace type.
    Override { name: String, unit: PathBuf },
}

impl Resolution {
    pub fn name(&self) -> &str {
        match self {
            Resolution::Original(name) => name,
            Resolution::Override { name, .. } => name,
        }
    }

    pub fn is_override(&self) -> bool { matches!(self, Resolution::Override { .. }) }
}

pub struct Resolver<T> {
    config:   ResolutionConfig,
    registry: TypeRegistry<T>,
    loader:   Box<dyn UnitLoader<T>>,
    loaded:   Mutex<HashMap<PathBuf, HashSet<String>>>,
}

impl<T> Resolver<T> {
    pub fn new<L>(config: ResolutionConfig, loader: L) -> Self
    where
        L: UnitLoader<T> + 'static,
    {
        Self {
            config,
            registry: TypeRegistry::new(),
            loader: Box::new(loader),
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Build a resolver from the process-wide configuration.
    pub fn from_global<L>(loader: L) -> Result<Self>
    where
        L: UnitLoader<T> + 'static,
    {
        let config = global::config()?;
        Ok(Self::new(config.clone(), loader))
    }

    pub fn config(&self) -> &ResolutionConfig { &self.config }

    pub fn registry(&self) -> &TypeRegistry<T> { &self.registry }

    /// Register an original (non-override) type.
    pub fn define<F>(
        &self,
        name: impl Into<String>,
        factory: F,
    ) -> std::result::Result<(), RegistryError>
    where
        F: Fn(Args) -> std::result::Result<T, ConstructionError> + Send + Sync + 'static,
    {
        self.registry.define(Definition::new(name, factory))
    }

    pub fn candidate_path(&self, qualified: &str) -> PathBuf {
        self.config.candidate_path(qualified)
    }

    pub fn is_loaded(&self, unit: &Path) -> bool {
        self.loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(unit)
    }

    /// Whether the unit at `unit` was loaded and defined `name` itself.
    pub fn unit_defines(&self, unit: &Path, name: &str) -> bool {
        self.loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(unit)
            .is_some_and(|names| names.contains(name))
    }

    /// Decide between the original and the override for `qualified`,
    /// loading the override unit if needed, without constructing anything.
    pub fn lookup(&self, qualified: &str) -> Result<Resolution> {
        self.config.validate()?;

        let unit = self.config.candidate_path(qualified);
        tracing::trace!(name = qualified, unit = %unit.display(), "override candidate");

        let exists = unit.try_exists().map_err(|source| LoadError::Io {
            path: unit.clone(),
            source,
        })?;

        if !exists {
            tracing::debug!(name = qualified, "no override, using original");
            return Ok(Resolution::Original(qualified.to_string()));
        }

        self.load_once(&unit)?;
        let name = self.config.resolved_name(qualified);
        tracing::debug!(name = qualified, resolved = %name, "override found");
        Ok(Resolution::Override { name, unit })
    }

    /// Construct `qualified`, or its override when one exists, forwarding
    /// `args` unchanged.
    pub fn resolve(&self, qualified: &str, args: Args) -> Result<T> {
        match self.lookup(qualified)? {
            Resolution::Original(name) => Ok(self.registry.construct(&name, args)?),
            Resolution::Override { name, unit } => {
                if !self.unit_defines(&unit, &name) {
                    return Err(ConstructionError::Undefined { name, unit }.into());
                }
                Ok(self.registry.construct(&name, args)?)
            }
        }
    }

    pub fn resolve_default(&self, qualified: &str) -> Result<T> {
        self.resolve(qualified, Args::new())
    }

    fn load_once(&self, unit: &Path) -> std::result::Result<(), LoadError> {
        let mut loaded = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);
        if loaded.contains_key(unit) {
            return Ok(());
        }

        let definitions = self.loader.load(unit).inspect_err(|e| {
            tracing::warn!(unit = %unit.display(), error = %e, "override unit failed to load");
        })?;
        tracing::debug!(
            unit = %unit.display(),
            count = definitions.len(),
            "override unit loaded"
        );

        let names = definitions.iter().map(|d| d.name.clone()).collect();
        self.registry.define_all(definitions)?;
        loaded.insert(unit.to_path_buf(), names);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigurationError, Error};
    use crate::loader::NoopLoader;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::{TempDir, tempdir};

    fn setup() -> (TempDir, ResolutionConfig) {
        let dir = tempdir().unwrap();
        let config = ResolutionConfig::new("App\\Overrides", "App", dir.path()).unwrap();
        (dir, config)
    }

    fn counting_loader(
        count: Arc<AtomicUsize>,
    ) -> impl Fn(&Path) -> std::result::Result<Vec<Definition<String>>, LoadError> + Send + Sync
    {
        move |_unit: &Path| {
            count.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Definition::new("App\\Overrides\\Mailer", |_| {
                Ok("override".to_string())
            })])
        }
    }

    #[test]
    fn test_original_when_no_unit() {
        let (_dir, config) = setup();
        let resolver = Resolver::new(config, NoopLoader);
        resolver.define("App\\Mailer", |_| Ok("original".to_string())).unwrap();

        assert_eq!(
            resolver.lookup("App\\Mailer").unwrap(),
            Resolution::Original("App\\Mailer".into())
        );
        assert_eq!(resolver.resolve_default("App\\Mailer").unwrap(), "original");
    }

    #[test]
    fn test_override_when_unit_exists() {
        let (dir, config) = setup();
        std::fs::write(dir.path().join("Mailer.toml"), "").unwrap();

        let count = Arc::new(AtomicUsize::new(0));
        let resolver = Resolver::new(config, counting_loader(count.clone()));
        resolver.define("App\\Mailer", |_| Ok("original".to_string())).unwrap();

        let resolution = resolver.lookup("App\\Mailer").unwrap();
        assert!(resolution.is_override());
        assert_eq!(resolution.name(), "App\\Overrides\\Mailer");
        assert_eq!(resolver.resolve_default("App\\Mailer").unwrap(), "override");
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unit_loaded_once() {
        let (dir, config) = setup();
        let unit = dir.path().join("Mailer.toml");
        std::fs::write(&unit, "").unwrap();

        let count = Arc::new(AtomicUsize::new(0));
        let resolver = Resolver::new(config, counting_loader(count.clone()));

        for _ in 0..3 {
            assert_eq!(resolver.resolve_default("App\\Mailer").unwrap(), "override");
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(resolver.is_loaded(&resolver.candidate_path("App\\Mailer")));
    }

    #[test]
    fn test_unit_without_definition_is_undefined() {
        let (dir, config) = setup();
        std::fs::write(dir.path().join("Mailer.toml"), "").unwrap();

        let resolver: Resolver<String> = Resolver::new(config, NoopLoader);
        resolver.define("App\\Mailer", |_| Ok("original".to_string())).unwrap();

        let err = resolver.resolve_default("App\\Mailer").unwrap_err();
        assert!(matches!(
            err,
            Error::Construction(ConstructionError::Undefined { ref name, .. })
                if name == "App\\Overrides\\Mailer"
        ));
    }

    #[test]
    fn test_override_must_come_from_its_own_unit() {
        let (dir, config) = setup();
        std::fs::write(dir.path().join("Other.toml"), "").unwrap();
        std::fs::write(dir.path().join("Mailer.toml"), "").unwrap();

        let resolver = Resolver::new(config, |unit: &Path| {
            if unit.ends_with("Other.toml") {
                Ok::<_, LoadError>(vec![
                    Definition::new("App\\Overrides\\Other", |_| Ok("other".to_string())),
                    Definition::new("App\\Overrides\\Mailer", |_| {
                        Ok("from Other.toml".to_string())
                    }),
                ])
            } else {
                Ok(Vec::new())
            }
        });

        assert_eq!(resolver.resolve_default("App\\Other").unwrap(), "other");
        assert!(resolver.registry().contains("App\\Overrides\\Mailer"));

        let err = resolver.resolve_default("App\\Mailer").unwrap_err();
        assert!(matches!(
            err,
            Error::Construction(ConstructionError::Undefined { ref unit, .. })
                if unit.ends_with("Mailer.toml")
        ));
    }

    #[test]
    fn test_failed_load_does_not_fall_back() {
        let (dir, config) = setup();
        std::fs::write(dir.path().join("Mailer.toml"), "").unwrap();

        let resolver = Resolver::new(config, |unit: &Path| {
            Err::<Vec<Definition<String>>, _>(LoadError::unit(unit, "broken unit"))
        });
        resolver.define("App\\Mailer", |_| Ok("original".to_string())).unwrap();

        let err = resolver.resolve_default("App\\Mailer").unwrap_err();
        assert!(matches!(err, Error::Load(LoadError::Unit { .. })));
        assert!(!resolver.is_loaded(&resolver.candidate_path("App\\Mailer")));
    }

    #[test]
    fn test_unknown_original() {
        let (_dir, config) = setup();
        let resolver: Resolver<String> = Resolver::new(config, NoopLoader);

        let err = resolver.resolve_default("App\\Missing").unwrap_err();
        assert!(matches!(
            err,
            Error::Construction(ConstructionError::UnknownType(_))
        ));
    }

    #[test]
    fn test_removed_root_fails_resolution() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("overrides");
        std::fs::create_dir(&root).unwrap();
        let config = ResolutionConfig::new("App\\Overrides", "App", &root).unwrap();

        let resolver: Resolver<String> = Resolver::new(config, NoopLoader);
        resolver.define("App\\Mailer", |_| Ok("original".to_string())).unwrap();
        std::fs::remove_dir(&root).unwrap();

        let err = resolver.resolve_default("App\\Mailer").unwrap_err();
        assert!(matches!(
            err,
            Error::Configuration(ConfigurationError::RootNotFound(_))
        ));
    }
}
