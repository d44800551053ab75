use crate::config::interpolate::{Interpolator, lookup_declared};
use crate::config::multi::parse_multi_values;
use crate::config::overrides::apply_env_overrides;
use crate::config::parser::write_config;
use crate::config::types::{ConfigValue, RawDocument};
use crate::error::{ProjConfError, Result};
use crate::options::{self, section_scope};
use indexmap::{IndexMap, IndexSet};
use std::path::{Path, PathBuf};

/// Header written at the top of every saved project file.
pub const CONFIG_HEADER: &str = ";PlatformIO Project Configuration File
;
;   Build options: build flags, source filter
;   Upload options: custom upload port, speed and extra flags
;   Library options: dependencies, extra library storages
;   Advanced options: extra scripting
;
; Please visit documentation for the other options and examples
; https://docs.platformio.org/page/projectconf.html

";

/// Construction-time flags for [`ProjectConfig`].
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
	/// Follow `extra_configs` glob patterns.
	pub parse_extra: bool,

	/// Expand `${section.option}` references on read.
	pub expand_interpolations: bool,
}

impl Default for LoadOptions {
	fn default() -> Self {
		Self {
			parse_extra: true,
			expand_interpolations: true,
		}
	}
}

/// A project's merged configuration with typed, per-environment lookups.
///
/// Raw values are kept as read. Every [`get`](Self::get) re-resolves
/// references, multi-value parsing and environment overrides, so changes to
/// the process environment are visible on the next read.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
	pub(crate) path: PathBuf,
	pub(crate) doc: RawDocument,
	pub(crate) parsed: IndexSet<PathBuf>,
	pub(crate) expand_interpolations: bool,
}

impl ProjectConfig {
	/// Load the project file at `path`, following `extra_configs`.
	///
	/// A missing file yields an empty configuration.
	pub fn new(path: impl AsRef<Path>) -> Result<Self> {
		Self::with_options(path, LoadOptions::default())
	}

	pub fn with_options(path: impl AsRef<Path>, load: LoadOptions) -> Result<Self> {
		let mut config = Self {
			path: path.as_ref().to_path_buf(),
			doc: RawDocument::new(),
			parsed: IndexSet::new(),
			expand_interpolations: load.expand_interpolations,
		};
		if config.path.is_file() {
			let root = config.path.clone();
			config.read(&root, load.parse_extra)?;
		}
		Ok(config)
	}

	/// Path of the root project file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// The merged raw document.
	pub fn document(&self) -> &RawDocument {
		&self.doc
	}

	/// Files merged so far, in merge order.
	pub fn parsed_files(&self) -> impl Iterator<Item = &Path> {
		self.parsed.iter().map(PathBuf::as_path)
	}

	pub fn sections(&self) -> impl Iterator<Item = &str> {
		self.doc.sections()
	}

	pub fn has_section(&self, section: &str) -> bool {
		self.doc.has_section(section)
	}

	/// Option names visible in `section`.
	///
	/// Declared options come first, then options inherited from `[env]` for
	/// environment sections, then catalog options of the section's scope
	/// whose bound environment variable is currently set.
	pub fn options(&self, section: &str) -> Result<Vec<String>> {
		let declared = self.doc.section(section).ok_or_else(|| ProjConfError::NoSection {
			section: section.to_string(),
		})?;
		let mut names: IndexSet<String> = declared.keys().cloned().collect();

		if section.starts_with("env:")
			&& let Some(base) = self.doc.section("env")
		{
			names.extend(base.keys().cloned());
		}

		for meta in options::in_scope(section_scope(section)) {
			if names.contains(meta.name) {
				continue;
			}
			if let Some(var) = meta.sysenvvar
				&& std::env::var_os(var).is_some()
			{
				names.insert(meta.name.to_string());
			}
		}

		Ok(names.into_iter().collect())
	}

	/// Option names visible in `[env:<env>]`.
	pub fn env_options(&self, env: &str) -> Result<Vec<String>> {
		self.options(&env_section(env))
	}

	pub fn has_option(&self, section: &str, option: &str) -> bool {
		let option = option.to_lowercase();
		self.doc.has_option(section, &option)
			|| (section.starts_with("env:") && self.doc.has_option("env", &option))
	}

	/// Stored value with references expanded, without typing or overrides.
	pub fn getraw(&self, section: &str, option: &str) -> Result<String> {
		if !self.expand_interpolations {
			return lookup_declared(&self.doc, section, &option.to_lowercase()).map(String::from);
		}
		Interpolator::new(&self.doc).resolve(section, option)
	}

	/// Resolved value of `section.option`, or `None` when neither the files
	/// nor the environment provide one.
	///
	/// Missing sections and options are not errors here. Other failures, such
	/// as a cyclic reference, are.
	pub fn get(&self, section: &str, option: &str) -> Result<Option<ConfigValue>> {
		let raw = match self.getraw(section, option) {
			Ok(raw) => Some(raw),
			Err(err) if err.is_missing() => None,
			Err(err) => return Err(err),
		};

		let Some(meta) = options::lookup(section_scope(section), &option.to_lowercase()) else {
			return Ok(raw.map(ConfigValue::Single));
		};

		let value = raw.map(|raw| {
			if meta.multiple {
				ConfigValue::Multiple(parse_multi_values(&raw))
			} else {
				ConfigValue::Single(raw)
			}
		});

		Ok(apply_env_overrides(value, meta))
	}

	/// Like [`get`](Self::get), substituting `default` for a missing value.
	pub fn get_or(
		&self,
		section: &str,
		option: &str,
		default: impl Into<ConfigValue>,
	) -> Result<ConfigValue> {
		Ok(self.get(section, option)?.unwrap_or_else(|| default.into()))
	}

	/// Every option name from [`options`](Self::options) with its resolved
	/// value. Options that resolve to nothing, such as a reference to a
	/// missing option, map to `None`.
	pub fn items(&self, section: &str) -> Result<IndexMap<String, Option<ConfigValue>>> {
		let mut items = IndexMap::new();
		for option in self.options(section)? {
			let value = self.get(section, &option)?;
			items.insert(option, value);
		}
		Ok(items)
	}

	pub fn env_items(&self, env: &str) -> Result<IndexMap<String, Option<ConfigValue>>> {
		self.items(&env_section(env))
	}

	/// Store a value. Lists are written one item per line.
	pub fn set(&mut self, section: &str, option: &str, value: impl Into<ConfigValue>) {
		self.doc
			.set(section, &option.to_lowercase(), value.into().to_raw());
	}

	/// Declared environment names, in declaration order.
	pub fn envs(&self) -> Vec<String> {
		self.doc
			.sections()
			.filter_map(|section| section.strip_prefix("env:"))
			.map(String::from)
			.collect()
	}

	/// Environments listed in `[platformio] env_default`.
	pub fn default_envs(&self) -> Result<Vec<String>> {
		Ok(self
			.get("platformio", "env_default")?
			.map(ConfigValue::into_list)
			.unwrap_or_default())
	}

	/// JSON object of every section's resolved items. Unresolved options are
	/// `null`.
	pub fn to_json(&self) -> Result<String> {
		let mut result = IndexMap::new();
		for section in self.doc.sections() {
			result.insert(section, self.items(section)?);
		}
		serde_json::to_string(&result).map_err(|source| ProjConfError::Json { source })
	}

	/// Write the document back to disk, prefixed with [`CONFIG_HEADER`].
	///
	/// Writes to the root project file unless `path` is given.
	pub fn save(&self, path: Option<&Path>) -> Result<()> {
		let target = path.unwrap_or(&self.path);
		let mut content = String::from(CONFIG_HEADER);
		content.push_str(&write_config(&self.doc));
		std::fs::write(target, content).map_err(|source| ProjConfError::ConfigWriteError {
			path: target.to_path_buf(),
			source,
		})
	}
}

fn env_section(env: &str) -> String {
	format!("env:{env}")
}
