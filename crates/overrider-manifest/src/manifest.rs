use serde::Deserialize;

use crate::error::{ManifestError, Result};

/// The contents of one override unit.
///
/// ```toml
/// [[define]]
/// name = "App\\Overrides\\Services\\Mailer"
/// symbol = "acme_mailer"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub define: Vec<ManifestEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ManifestEntry {
    /// Fully qualified name the type is registered under.
    pub name:   String,
    /// Factory exported by the host application.
    pub symbol: String,
}

impl Manifest {
    pub fn parse(source: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(source)?;
        if let Some(entry) = manifest.define.iter().find(|e| e.name.is_empty()) {
            return Err(ManifestError::EmptyName(entry.symbol.clone()));
        }
        Ok(manifest)
    }

    pub fn is_empty(&self) -> bool { self.define.is_empty() }
}
