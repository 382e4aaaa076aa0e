//! Construct named types through an external override directory.
//!
//! # Architecture
//!
//! A [`Resolver`] is asked to build a type by its qualified name, for example
//! `App\Services\Mailer`. It maps the name onto the override root
//! (`<root>/Services/Mailer.toml`) and, when that unit exists, loads it once
//! through a [`UnitLoader`] and builds `App\Overrides\Services\Mailer`
//! instead. Otherwise the original is built. Callers never see which one
//! they got.
//!
//! - `config.rs` - configuration, validation and path mapping
//! - `registry.rs` - write-once name to factory registry
//! - `loader.rs` - unit loading contract
//! - `resolver.rs` - the resolution pipeline
//! - `global.rs` - process-wide configuration
//!
//! # Example
//!
//! ```
//! use overrider::{NoopLoader, ResolutionConfig, Resolver, args};
//!
//! let root = tempfile::tempdir().unwrap();
//! let config = ResolutionConfig::new("App\\Overrides", "App", root.path()).unwrap();
//!
//! let resolver = Resolver::new(config, NoopLoader);
//! resolver
//!     .define("App\\Services\\Mailer", |args| {
//!         let host = args.get::<&str>(0)?;
//!         Ok(format!("mailer via {host}"))
//!     })
//!     .unwrap();
//!
//! let mailer = resolver
//!     .resolve("App\\Services\\Mailer", args!["smtp.example.com"])
//!     .unwrap();
//! assert_eq!(mailer, "mailer via smtp.example.com");
//! ```

pub use args::Args;
pub use config::{
    DEFAULT_EXTENSION, DEFAULT_SEPARATOR, ENV_PREFIX, ResolutionConfig, ResolutionConfigBuilder,
};
pub use error::{ConfigurationError, ConstructionError, Error, LoadError, RegistryError, Result};
pub use loader::{NoopLoader, UnitLoader};
pub use registry::{Definition, Factory, TypeRegistry};
pub use resolver::{Resolution, Resolver};

mod args;
mod config;
mod error;
pub mod global;
mod loader;
mod name;
mod registry;
mod resolver;
