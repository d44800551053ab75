//! Registry of loaded project configurations, keyed by absolute path.
//!
//! Repeated requests for the same path return the same instance until the
//! registry is [`reset`](ConfigRegistry::reset). The registry is owned by the
//! caller and passed where it is needed; it is not a global.

use crate::config::ProjectConfig;
use crate::config::cascade::absolute_path;
use crate::error::Result;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct ConfigRegistry {
	instances: HashMap<PathBuf, ProjectConfig>,
}

impl ConfigRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// The configuration for `path`, loading it on first request.
	pub fn get_instance(&mut self, path: impl AsRef<Path>) -> Result<&mut ProjectConfig> {
		let key = absolute_path(path.as_ref())?;
		match self.instances.entry(key) {
			Entry::Occupied(entry) => Ok(entry.into_mut()),
			Entry::Vacant(entry) => {
				let config = ProjectConfig::new(entry.key())?;
				Ok(entry.insert(config))
			}
		}
	}

	pub fn contains(&self, path: impl AsRef<Path>) -> bool {
		absolute_path(path.as_ref()).is_ok_and(|key| self.instances.contains_key(&key))
	}

	/// Drop every loaded configuration.
	pub fn reset(&mut self) {
		self.instances.clear();
	}

	pub fn len(&self) -> usize {
		self.instances.len()
	}

	pub fn is_empty(&self) -> bool {
		self.instances.is_empty()
	}
}
