//! Project configuration loading and resolution.
//!
//! This module handles:
//! - Parsing and writing section-delimited config files
//! - Merging files pulled in through `extra_configs`
//! - Scope inheritance, `${section.option}` references and environment overrides
//! - Validation of environments and option names

pub mod cascade;
pub mod interpolate;
pub mod multi;
pub mod overrides;
pub mod parser;
pub mod project;
pub mod types;
pub mod validate;

pub use interpolate::Interpolator;
pub use multi::parse_multi_values;
pub use parser::{parse_config_file, parse_config_str, write_config};
pub use project::{CONFIG_HEADER, LoadOptions, ProjectConfig};
pub use types::{ConfigValue, RawDocument};
pub use validate::ValidationWarning;
