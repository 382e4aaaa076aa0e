//! Override unit loading contract.
//!
//! The resolver only decides *whether* a unit exists and *when* to load it.
//! Turning the file into type definitions is the job of a [`UnitLoader`].

use std::path::Path;

use crate::error::LoadError;
use crate::registry::Definition;

pub trait UnitLoader<T>: Send + Sync {
    /// Load the unit at `unit` and return the types it defines.
    fn load(&self, unit: &Path) -> Result<Vec<Definition<T>>, LoadError>;
}

impl<T, F> UnitLoader<T> for F
where
    F: Fn(&Path) -> Result<Vec<Definition<T>>, LoadError> + Send + Sync,
{
    fn load(&self, unit: &Path) -> Result<Vec<Definition<T>>, LoadError> { self(unit) }
}

/// A loader that defines nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLoader;

impl<T> UnitLoader<T> for NoopLoader {
    fn load(&self, _unit: &Path) -> Result<Vec<Definition<T>>, LoadError> { Ok(Vec::new()) }
}
