//! Catalog of known project options.
//!
//! Each option is identified by `scope.name` (for example `env.build_flags`)
//! and carries its multiplicity, the system environment variable it is bound
//! to, and the legacy names it replaced.

mod catalog;

use std::collections::HashMap;
use std::sync::LazyLock;

pub use catalog::OPTIONS;

/// Prefix used to build environment variable names for legacy option names.
pub const LEGACY_ENV_PREFIX: &str = "PLATFORMIO_";

/// Static metadata describing one known option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionMeta {
	/// Section scope the option belongs to (`platformio` or `env`).
	pub scope: &'static str,

	/// Canonical option name.
	pub name: &'static str,

	/// Whether the raw value is a list of tokens.
	pub multiple: bool,

	/// Environment variable that can supply or extend the value.
	pub sysenvvar: Option<&'static str>,

	/// Deprecated names, in the order they are checked.
	pub oldnames: &'static [&'static str],
}

impl OptionMeta {
	/// The `scope.name` key this option is registered under.
	pub fn id(&self) -> String {
		format!("{}.{}", self.scope, self.name)
	}

	/// Environment variable names derived from `oldnames`, in declared order.
	pub fn legacy_env_vars(&self) -> impl Iterator<Item = String> + '_ {
		self.oldnames
			.iter()
			.map(|old| format!("{}{}", LEGACY_ENV_PREFIX, old.to_uppercase()))
	}
}

static INDEX: LazyLock<HashMap<String, &'static OptionMeta>> =
	LazyLock::new(|| OPTIONS.iter().map(|meta| (meta.id(), meta)).collect());

static RENAMED: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
	OPTIONS
		.iter()
		.flat_map(|meta| meta.oldnames.iter().map(move |old| (*old, meta.name)))
		.collect()
});

/// Look up an option by scope and name.
pub fn lookup(scope: &str, name: &str) -> Option<&'static OptionMeta> {
	INDEX.get(&format!("{scope}.{name}")).copied()
}

/// Canonical name for a deprecated option name, in any scope.
pub fn renamed_to(oldname: &str) -> Option<&'static str> {
	RENAMED.get(oldname).copied()
}

/// All options declared for the given scope, in catalog order.
pub fn in_scope(scope: &str) -> impl Iterator<Item = &'static OptionMeta> + '_ {
	OPTIONS.iter().filter(move |meta| meta.scope == scope)
}

/// Scope of a section name: the text before the first `:`.
pub fn section_scope(section: &str) -> &str {
	section.split_once(':').map_or(section, |(scope, _)| scope)
}
