//! Projconf - resolve build-project configuration files into a typed view.
//!
//! This library provides the core functionality for projconf, including:
//! - Config file parsing and `extra_configs` merging
//! - Per-environment option resolution with `[env]` inheritance
//! - `${section.option}` and `${sysenv.NAME}` interpolation
//! - Environment-variable overrides and legacy option migration
//!
//! # Example
//!
//! ```no_run
//! use projconf::ConfigRegistry;
//!
//! let mut registry = ConfigRegistry::new();
//! let config = registry.get_instance("platformio.ini").unwrap();
//!
//! for env in config.envs() {
//!     let flags = config.get(&format!("env:{env}"), "build_flags").unwrap();
//!     println!("{env}: {flags:?}");
//! }
//! ```

pub mod config;
pub mod error;
pub mod options;
pub mod registry;

pub use config::{ConfigValue, ProjectConfig, ValidationWarning};
pub use error::{ProjConfError, Result};
pub use registry::ConfigRegistry;
