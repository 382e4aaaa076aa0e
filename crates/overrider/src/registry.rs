//! Name to factory registry.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::args::Args;
use crate::error::{ConstructionError, RegistryError};

/// Constructor of one named type.
pub type Factory<T> = Arc<dyn Fn(Args) -> Result<T, ConstructionError> + Send + Sync>;

/// A named factory, as produced by loading an override unit.
pub struct Definition<T> {
    pub name:    String,
    pub factory: Factory<T>,
}

impl<T> Definition<T> {
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(Args) -> Result<T, ConstructionError> + Send + Sync + 'static,
    {
        Self {
            name:    name.into(),
            factory: Arc::new(factory),
        }
    }

    pub fn from_factory(name: impl Into<String>, factory: Factory<T>) -> Self {
        Self {
            name: name.into(),
            factory,
        }
    }
}

impl<T> Clone for Definition<T> {
    fn clone(&self) -> Self {
        Self {
            name:    self.name.clone(),
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<T> fmt::Debug for Definition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition").field("name", &self.name).finish()
    }
}

/// Every name is defined at most once; definitions are never removed.
pub struct TypeRegistry<T> {
    factories: RwLock<HashMap<String, Factory<T>>>,
}

impl<T> Default for TypeRegistry<T> {
    fn default() -> Self {
        Self {
            factories: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> TypeRegistry<T> {
    pub fn new() -> Self { Self::default() }

    pub fn define(&self, definition: Definition<T>) -> Result<(), RegistryError> {
        self.define_all(std::iter::once(definition))
    }

    /// Register a batch of definitions. Nothing is registered if any name is
    /// already known or repeated within the batch.
    pub fn define_all<I>(&self, definitions: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = Definition<T>>,
    {
        let definitions: Vec<_> = definitions.into_iter().collect();
        let mut factories = self
            .factories
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let mut batch = HashSet::with_capacity(definitions.len());
        for def in &definitions {
            if factories.contains_key(&def.name) || !batch.insert(def.name.as_str()) {
                return Err(RegistryError::AlreadyDefined(def.name.clone()));
            }
        }

        for def in definitions {
            tracing::debug!(name = %def.name, "type defined");
            factories.insert(def.name, def.factory);
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Look up `name` and call its factory with `args`. The factory runs
    /// outside the registry lock.
    pub fn construct(&self, name: &str, args: Args) -> Result<T, ConstructionError> {
        let factory = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| ConstructionError::UnknownType(name.to_string()))?;

        factory(args)
    }
}
