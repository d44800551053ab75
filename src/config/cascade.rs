use crate::config::parser::parse_config_file;
use crate::config::project::ProjectConfig;
use crate::config::types::ConfigValue;
use crate::error::{ProjConfError, Result};
use std::path::{Path, PathBuf};

/// Absolute form of `path`, without touching symlinks.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
	std::path::absolute(path).map_err(|source| ProjConfError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})
}

impl ProjectConfig {
	/// Merge the file at `path` into this configuration.
	///
	/// Each file is merged at most once. When `parse_extra` is set, every
	/// file matched by the `[platformio] extra_configs` patterns is merged
	/// too, recursively, in pattern order and then match order.
	pub fn read(&mut self, path: &Path, parse_extra: bool) -> Result<()> {
		let path = absolute_path(path)?;
		if !self.parsed.insert(path.clone()) {
			tracing::debug!(path = %path.display(), "config file already merged");
			return Ok(());
		}

		let doc = parse_config_file(&path)?;
		tracing::debug!(path = %path.display(), "merging config file");
		self.doc.merge(doc);

		if !parse_extra {
			return Ok(());
		}

		let patterns = self
			.get("platformio", "extra_configs")?
			.map(ConfigValue::into_list)
			.unwrap_or_default();

		for pattern in patterns {
			let pattern = self.anchor_pattern(&pattern);
			let matches = glob::glob(&pattern).map_err(|source| ProjConfError::InvalidGlob {
				pattern: pattern.clone(),
				source,
			})?;

			for entry in matches {
				match entry {
					Ok(extra) => self.read(&extra, true)?,
					Err(err) => {
						tracing::warn!(%pattern, error = %err, "skipping unreadable extra config");
					}
				}
			}
		}

		Ok(())
	}

	/// Resolve a relative pattern against the root project file's directory.
	fn anchor_pattern(&self, pattern: &str) -> String {
		if Path::new(pattern).is_absolute() {
			return pattern.to_string();
		}
		match self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
			Some(dir) => {
				let dir = glob::Pattern::escape(&dir.to_string_lossy());
				format!("{}/{}", dir.trim_end_matches('/'), pattern)
			}
			None => pattern.to_string(),
		}
	}
}
