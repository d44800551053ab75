use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Options of one section, in declaration order.
pub type Section = IndexMap<String, String>;

/// Raw, un-interpreted contents of one or more merged config files.
///
/// Values are stored exactly as read; typing happens at lookup time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDocument {
	sections: IndexMap<String, Section>,
}

impl RawDocument {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn sections(&self) -> impl Iterator<Item = &str> {
		self.sections.keys().map(String::as_str)
	}

	pub fn has_section(&self, section: &str) -> bool {
		self.sections.contains_key(section)
	}

	pub fn section(&self, section: &str) -> Option<&Section> {
		self.sections.get(section)
	}

	pub fn section_mut(&mut self, section: &str) -> Option<&mut Section> {
		self.sections.get_mut(section)
	}

	/// Add an empty section. Returns false if it already existed.
	pub fn add_section(&mut self, section: &str) -> bool {
		if self.sections.contains_key(section) {
			return false;
		}
		self.sections.insert(section.to_string(), Section::new());
		true
	}

	pub fn has_option(&self, section: &str, option: &str) -> bool {
		self.get(section, option).is_some()
	}

	pub fn get(&self, section: &str, option: &str) -> Option<&str> {
		self.sections
			.get(section)
			.and_then(|options| options.get(option))
			.map(String::as_str)
	}

	/// Set an option, creating the section if needed.
	pub fn set(&mut self, section: &str, option: &str, value: impl Into<String>) {
		self.sections
			.entry(section.to_string())
			.or_default()
			.insert(option.to_string(), value.into());
	}

	/// Remove an option, returning its value.
	pub fn remove_option(&mut self, section: &str, option: &str) -> Option<String> {
		self.sections
			.get_mut(section)
			.and_then(|options| options.shift_remove(option))
	}

	/// Rename an option in place, keeping its position in the section.
	///
	/// If `to` already exists it takes the value of `from`.
	pub fn rename_option(&mut self, section: &str, from: &str, to: &str) -> bool {
		let Some(options) = self.sections.get_mut(section) else {
			return false;
		};
		let Some((index, _, value)) = options.shift_remove_full(from) else {
			return false;
		};
		if let Some(existing) = options.get_mut(to) {
			*existing = value;
		} else {
			options.shift_insert(index, to.to_string(), value);
		}
		true
	}

	/// Merge another document into this one. Later values win.
	pub fn merge(&mut self, other: RawDocument) {
		for (name, options) in other.sections {
			let target = self.sections.entry(name).or_default();
			for (key, value) in options {
				target.insert(key, value);
			}
		}
	}
}

/// A resolved option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
	/// Opaque scalar, as written.
	Single(String),

	/// Tokens of a multi-valued option.
	Multiple(Vec<String>),
}

impl ConfigValue {
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Single(value) => Some(value),
			Self::Multiple(_) => None,
		}
	}

	pub fn as_list(&self) -> Option<&[String]> {
		match self {
			Self::Single(_) => None,
			Self::Multiple(values) => Some(values),
		}
	}

	/// Tokens of the value. A non-empty scalar becomes a single token.
	pub fn into_list(self) -> Vec<String> {
		match self {
			Self::Single(value) if value.is_empty() => Vec::new(),
			Self::Single(value) => vec![value],
			Self::Multiple(values) => values,
		}
	}

	/// Empty string or empty list.
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Single(value) => value.is_empty(),
			Self::Multiple(values) => values.is_empty(),
		}
	}

	/// Stored representation, as `set` writes it.
	pub fn to_raw(&self) -> String {
		match self {
			Self::Single(value) => value.clone(),
			Self::Multiple(values) if values.is_empty() => String::new(),
			Self::Multiple(values) => format!("\n{}", values.join("\n")),
		}
	}
}

impl fmt::Display for ConfigValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Single(value) => f.write_str(value),
			Self::Multiple(values) => f.write_str(&values.join(", ")),
		}
	}
}

impl From<&str> for ConfigValue {
	fn from(value: &str) -> Self {
		Self::Single(value.to_string())
	}
}

impl From<String> for ConfigValue {
	fn from(value: String) -> Self {
		Self::Single(value)
	}
}

impl From<Vec<String>> for ConfigValue {
	fn from(values: Vec<String>) -> Self {
		Self::Multiple(values)
	}
}

impl From<Vec<&str>> for ConfigValue {
	fn from(values: Vec<&str>) -> Self {
		Self::Multiple(values.into_iter().map(String::from).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_merge_later_wins_and_keeps_order() {
		let mut base = RawDocument::new();
		base.set("env", "a", "1");
		base.set("env", "b", "2");

		let mut other = RawDocument::new();
		other.set("env", "a", "override");
		other.set("env:uno", "board", "uno");

		base.merge(other);

		assert_eq!(base.get("env", "a"), Some("override"));
		assert_eq!(base.get("env", "b"), Some("2"));
		assert_eq!(base.sections().collect::<Vec<_>>(), vec!["env", "env:uno"]);
		let keys: Vec<_> = base.section("env").unwrap().keys().collect();
		assert_eq!(keys, vec!["a", "b"]);
	}

	#[test]
	fn test_rename_option_keeps_position() {
		let mut doc = RawDocument::new();
		doc.set("env:uno", "board", "uno");
		doc.set("env:uno", "lib_use", "Foo");
		doc.set("env:uno", "framework", "arduino");

		assert!(doc.rename_option("env:uno", "lib_use", "lib_deps"));

		let keys: Vec<_> = doc.section("env:uno").unwrap().keys().collect();
		assert_eq!(keys, vec!["board", "lib_deps", "framework"]);
		assert_eq!(doc.get("env:uno", "lib_deps"), Some("Foo"));
	}

	#[test]
	fn test_rename_missing_option() {
		let mut doc = RawDocument::new();
		doc.add_section("env");
		assert!(!doc.rename_option("env", "lib_use", "lib_deps"));
		assert!(!doc.rename_option("missing", "lib_use", "lib_deps"));
	}

	#[test]
	fn test_config_value_to_raw() {
		assert_eq!(ConfigValue::from("x").to_raw(), "x");
		assert_eq!(ConfigValue::from(vec!["a", "b"]).to_raw(), "\na\nb");
		assert_eq!(ConfigValue::Multiple(Vec::new()).to_raw(), "");
	}

	#[test]
	fn test_config_value_serializes_untagged() {
		let single = serde_json::to_string(&ConfigValue::from("uno")).unwrap();
		let multi = serde_json::to_string(&ConfigValue::from(vec!["-DA", "-DB"])).unwrap();
		assert_eq!(single, "\"uno\"");
		assert_eq!(multi, "[\"-DA\",\"-DB\"]");
	}
}
