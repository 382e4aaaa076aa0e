//! TOML override manifests.
//!
//! An override unit found by [`overrider::Resolver`] is a small TOML file
//! declaring which types it provides and which host-exported factory builds
//! each of them. [`ManifestLoader`] reads such units and turns them into
//! registry definitions.
//!
//! # Example
//!
//! ```
//! use overrider::{ResolutionConfig, Resolver};
//! use overrider_manifest::ManifestLoader;
//!
//! let root = tempfile::tempdir().unwrap();
//! std::fs::create_dir(root.path().join("Services")).unwrap();
//! std::fs::write(
//!     root.path().join("Services/Mailer.toml"),
//!     "[[define]]\nname = 'App\\Overrides\\Services\\Mailer'\nsymbol = 'acme_mailer'\n",
//! )
//! .unwrap();
//!
//! let loader = ManifestLoader::new().export("acme_mailer", |_| Ok("acme mailer".to_string()));
//! let config = ResolutionConfig::new("App\\Overrides", "App", root.path()).unwrap();
//! let resolver = Resolver::new(config, loader);
//! resolver
//!     .define("App\\Services\\Mailer", |_| Ok("stock mailer".to_string()))
//!     .unwrap();
//!
//! assert_eq!(
//!     resolver.resolve_default("App\\Services\\Mailer").unwrap(),
//!     "acme mailer"
//! );
//! ```

pub use error::{ManifestError, Result};
pub use loader::ManifestLoader;
pub use manifest::{Manifest, ManifestEntry};

mod error;
mod loader;
mod manifest;
