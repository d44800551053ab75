use crate::config::multi::parse_multi_values;
use crate::config::types::ConfigValue;
use crate::options::OptionMeta;

/// Read an environment variable, returning None if unset or empty.
pub fn env_var_or_none(key: &str) -> Option<String> {
	std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Value supplied by the environment for an option, if any.
///
/// The bound variable is checked first, then the legacy variable of each
/// deprecated name in declared order. Options without a bound variable never
/// read the environment.
pub fn env_override(meta: &OptionMeta) -> Option<(String, String)> {
	let bound = meta.sysenvvar?;
	if let Some(value) = env_var_or_none(bound) {
		return Some((bound.to_string(), value));
	}
	meta.legacy_env_vars()
		.find_map(|var| env_var_or_none(&var).map(|value| (var, value)))
}

/// Combine a file-derived value with its environment override.
///
/// Multi-valued options are extended: environment tokens are appended after
/// the file tokens. Single-valued options only take the environment value
/// when the file supplies nothing.
pub fn apply_env_overrides(value: Option<ConfigValue>, meta: &OptionMeta) -> Option<ConfigValue> {
	let Some((var, env_value)) = env_override(meta) else {
		return value;
	};
	tracing::debug!(option = %meta.id(), %var, "environment variable supplies option value");

	if meta.multiple {
		let mut values = match value {
			Some(ConfigValue::Multiple(values)) => values,
			Some(ConfigValue::Single(raw)) => parse_multi_values(&raw),
			None => Vec::new(),
		};
		values.extend(parse_multi_values(&env_value));
		return Some(ConfigValue::Multiple(values));
	}

	match value {
		Some(value) if !value.is_empty() => Some(value),
		_ => Some(ConfigValue::Single(env_value)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::options::lookup;
	use serial_test::serial;

	#[test]
	#[serial]
	fn test_multiple_is_extended() {
		let meta = lookup("env", "build_flags").unwrap();
		temp_env::with_var("PLATFORMIO_BUILD_FLAGS", Some("-DB"), || {
			let value = apply_env_overrides(Some(vec!["-DA"].into()), meta);
			assert_eq!(value, Some(vec!["-DA", "-DB"].into()));
		});
	}

	#[test]
	#[serial]
	fn test_multiple_duplicates_kept() {
		let meta = lookup("env", "build_flags").unwrap();
		temp_env::with_var("PLATFORMIO_BUILD_FLAGS", Some("-DA, -DC"), || {
			let value = apply_env_overrides(Some(vec!["-DA"].into()), meta);
			assert_eq!(value, Some(vec!["-DA", "-DA", "-DC"].into()));
		});
	}

	#[test]
	#[serial]
	fn test_multiple_from_env_only() {
		let meta = lookup("env", "build_flags").unwrap();
		temp_env::with_var("PLATFORMIO_BUILD_FLAGS", Some("-DB"), || {
			assert_eq!(apply_env_overrides(None, meta), Some(vec!["-DB"].into()));
		});
	}

	#[test]
	#[serial]
	fn test_single_file_value_wins() {
		let meta = lookup("env", "upload_port").unwrap();
		temp_env::with_var("PLATFORMIO_UPLOAD_PORT", Some("/dev/env"), || {
			let value = apply_env_overrides(Some("/dev/file".into()), meta);
			assert_eq!(value, Some("/dev/file".into()));
		});
	}

	#[test]
	#[serial]
	fn test_single_env_fills_missing_or_empty() {
		let meta = lookup("env", "upload_port").unwrap();
		temp_env::with_var("PLATFORMIO_UPLOAD_PORT", Some("/dev/env"), || {
			assert_eq!(apply_env_overrides(None, meta), Some("/dev/env".into()));
			assert_eq!(
				apply_env_overrides(Some("".into()), meta),
				Some("/dev/env".into())
			);
		});
	}

	#[test]
	#[serial]
	fn test_legacy_env_var_fallback() {
		let meta = lookup("platformio", "core_dir").unwrap();
		temp_env::with_vars(
			[
				("PLATFORMIO_CORE_DIR", None),
				("PLATFORMIO_HOME_DIR", Some("/opt/pio")),
			],
			|| {
				assert_eq!(apply_env_overrides(None, meta), Some("/opt/pio".into()));
			},
		);
	}

	#[test]
	#[serial]
	fn test_bound_var_preferred_over_legacy() {
		let meta = lookup("platformio", "core_dir").unwrap();
		temp_env::with_vars(
			[
				("PLATFORMIO_CORE_DIR", Some("/new")),
				("PLATFORMIO_HOME_DIR", Some("/old")),
			],
			|| {
				let (var, value) = env_override(meta).unwrap();
				assert_eq!(var, "PLATFORMIO_CORE_DIR");
				assert_eq!(value, "/new");
			},
		);
	}

	#[test]
	#[serial]
	fn test_empty_env_var_ignored() {
		let meta = lookup("env", "upload_port").unwrap();
		temp_env::with_var("PLATFORMIO_UPLOAD_PORT", Some(""), || {
			assert_eq!(apply_env_overrides(None, meta), None);
		});
	}

	#[test]
	fn test_option_without_binding_is_untouched() {
		let meta = lookup("env", "board").unwrap();
		assert_eq!(apply_env_overrides(None, meta), None);
		assert_eq!(
			apply_env_overrides(Some("uno".into()), meta),
			Some("uno".into())
		);
	}
}
