use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use overrider::{Args, ConstructionError, Definition, Factory, LoadError, UnitLoader};

use crate::error::ManifestError;
use crate::manifest::Manifest;

/// Loads TOML manifests and binds each declared type to a factory the host
/// exported under the entry's symbol.
pub struct ManifestLoader<T> {
    symbols: HashMap<String, Factory<T>>,
}

impl<T> Default for ManifestLoader<T> {
    fn default() -> Self {
        Self {
            symbols: HashMap::new(),
        }
    }
}

impl<T> ManifestLoader<T> {
    pub fn new() -> Self { Self::default() }

    /// Export `factory` under `symbol`. A later export of the same symbol
    /// replaces the earlier one.
    pub fn export<F>(mut self, symbol: impl Into<String>, factory: F) -> Self
    where
        F: Fn(Args) -> Result<T, ConstructionError> + Send + Sync + 'static,
    {
        self.symbols.insert(symbol.into(), Arc::new(factory));
        self
    }

    pub fn is_exported(&self, symbol: &str) -> bool { self.symbols.contains_key(symbol) }

    /// Bind every entry of `manifest` to its exported factory.
    pub fn bind(&self, manifest: &Manifest) -> Result<Vec<Definition<T>>, ManifestError> {
        manifest
            .define
            .iter()
            .map(|entry| {
                self.symbols
                    .get(&entry.symbol)
                    .map(|f| Definition::from_factory(entry.name.clone(), Arc::clone(f)))
                    .ok_or_else(|| ManifestError::UnknownSymbol(entry.symbol.clone()))
            })
            .collect()
    }
}

impl<T> fmt::Debug for ManifestLoader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut symbols: Vec<_> = self.symbols.keys().collect();
        symbols.sort();
        f.debug_struct("ManifestLoader")
            .field("symbols", &symbols)
            .finish()
    }
}

impl<T> UnitLoader<T> for ManifestLoader<T> {
    fn load(&self, unit: &Path) -> Result<Vec<Definition<T>>, LoadError> {
        let source = std::fs::read_to_string(unit).map_err(|source| LoadError::Io {
            path: unit.to_path_buf(),
            source,
        })?;

        let definitions = Manifest::parse(&source)
            .and_then(|manifest| self.bind(&manifest))
            .map_err(|e| LoadError::unit(unit, e))?;

        let names: Vec<&str> = definitions.iter().map(|d| d.name.as_str()).collect();
        tracing::debug!(unit = %unit.display(), types = ?names, "manifest bound");
        Ok(definitions)
    }
}
