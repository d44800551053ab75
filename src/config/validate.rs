use crate::config::project::ProjectConfig;
use crate::error::{ProjConfError, Result};
use crate::options::{self, section_scope};
use indexmap::IndexSet;
use std::collections::BTreeSet;
use std::fmt;

/// A non-fatal problem found while validating a project configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValidationWarning {
	/// `lib_extra_dirs` was declared in `[platformio]` and moved to `[env]`.
	LegacyLibExtraDirs,

	/// A deprecated option name was renamed to its replacement.
	DeprecatedOption {
		section: String,
		option: String,
		replacement: String,
	},

	/// An option the catalog does not know about.
	UnknownOption { section: String, option: String },
}

impl fmt::Display for ValidationWarning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::LegacyLibExtraDirs => write!(
				f,
				"`lib_extra_dirs` option is deprecated in section [platformio]! \
				 Please move it to global `env` section"
			),
			Self::DeprecatedOption {
				section,
				option,
				replacement,
			} => write!(
				f,
				"`{option}` option in section `[{section}]` is deprecated and will be \
				 removed in the next release! Please use `{replacement}` instead"
			),
			Self::UnknownOption { section, option } => {
				write!(f, "Ignore unknown option `{option}` in section `[{section}]`")
			}
		}
	}
}

impl ProjectConfig {
	/// Check that the project exists and that every requested environment,
	/// plus every default environment, is declared.
	///
	/// With `validate_options`, also migrates legacy options and returns the
	/// warnings from [`validate_options`](Self::validate_options).
	pub fn validate<S: AsRef<str>>(
		&mut self,
		envs: &[S],
		validate_options: bool,
	) -> Result<Vec<ValidationWarning>> {
		if !self.path.is_file() {
			return Err(ProjConfError::NotProjectDir {
				path: self.path.clone(),
			});
		}

		let known = self.envs();
		if known.is_empty() {
			return Err(ProjConfError::NoEnvironments);
		}

		let unknown: BTreeSet<String> = envs
			.iter()
			.map(|env| env.as_ref().to_string())
			.chain(self.default_envs()?)
			.filter(|env| !known.contains(env))
			.collect();
		if !unknown.is_empty() {
			return Err(ProjConfError::UnknownEnvNames {
				unknown: unknown.into_iter().collect::<Vec<_>>().join(", "),
				known: known.join(", "),
			});
		}

		if !validate_options {
			return Ok(Vec::new());
		}
		Ok(self.validate_options())
	}

	/// Migrate legacy options in place and report unknown ones.
	///
	/// Each distinct warning is reported once, in the order first found.
	pub fn validate_options(&mut self) -> Vec<ValidationWarning> {
		let mut warnings = IndexSet::new();

		if let Some(value) = self.doc.remove_option("platformio", "lib_extra_dirs") {
			self.doc.set("env", "lib_extra_dirs", value);
			warnings.insert(ValidationWarning::LegacyLibExtraDirs);
		}

		let sections: Vec<String> = self.doc.sections().map(String::from).collect();
		for section in sections {
			let names: Vec<String> = self
				.doc
				.section(&section)
				.map(|options| options.keys().cloned().collect())
				.unwrap_or_default();

			for option in names {
				if let Some(replacement) = options::renamed_to(&option) {
					self.doc.rename_option(&section, &option, replacement);
					warnings.insert(ValidationWarning::DeprecatedOption {
						section: section.clone(),
						option,
						replacement: replacement.to_string(),
					});
					continue;
				}

				let scope = section_scope(&section);
				let free_form =
					scope == "env" && (option.starts_with("custom_") || option.starts_with("board_"));
				if options::lookup(scope, &option).is_none() && !free_form {
					warnings.insert(ValidationWarning::UnknownOption {
						section: section.clone(),
						option,
					});
				}
			}
		}

		tracing::debug!(count = warnings.len(), "validated project options");
		warnings.into_iter().collect()
	}
}
