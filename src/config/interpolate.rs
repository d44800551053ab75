//! `${section.option}` and `${sysenv.NAME}` reference expansion.
//!
//! References are expanded lazily on every read. A referenced value may
//! itself contain references; the chain is followed until plain text remains.
//! A reference that leads back to an option already being expanded is
//! reported as [`ProjConfError::CyclicReference`].

use crate::config::types::RawDocument;
use crate::error::{ProjConfError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Section name that maps references onto process environment variables.
pub const SYSENV_SECTION: &str = "sysenv";

static VARTPL_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\$\{([^.}]+)\.([^}]+)\}").expect("reference regex is valid")
});

/// Raw stored value of an option.
///
/// Environment sections (`env:*`) fall back to the shared `[env]` section
/// when the option (or the section itself) is missing.
pub fn lookup_raw<'a>(doc: &'a RawDocument, section: &str, option: &str) -> Result<&'a str> {
	let option = option.to_lowercase();
	match lookup_declared(doc, section, &option) {
		Err(err) if err.is_missing() && section.starts_with("env:") => {
			lookup_declared(doc, "env", &option)
		}
		other => other,
	}
}

/// Raw stored value of an option, without any fallback.
pub fn lookup_declared<'a>(doc: &'a RawDocument, section: &str, option: &str) -> Result<&'a str> {
	let options = doc.section(section).ok_or_else(|| ProjConfError::NoSection {
		section: section.to_string(),
	})?;
	options
		.get(option)
		.map(String::as_str)
		.ok_or_else(|| ProjConfError::NoOption {
			section: section.to_string(),
			option: option.to_string(),
		})
}

/// Expands references against one document.
#[derive(Debug, Clone, Copy)]
pub struct Interpolator<'a> {
	doc: &'a RawDocument,
}

impl<'a> Interpolator<'a> {
	pub fn new(doc: &'a RawDocument) -> Self {
		Self { doc }
	}

	/// Fully expanded value of `section.option`.
	pub fn resolve(&self, section: &str, option: &str) -> Result<String> {
		let mut stack = Vec::new();
		self.resolve_option(section, option, &mut stack)
	}

	/// Expand every reference in a free-standing value.
	pub fn expand(&self, value: &str) -> Result<String> {
		let mut stack = Vec::new();
		self.expand_value(value, &mut stack)
	}

	fn resolve_option(
		&self,
		section: &str,
		option: &str,
		stack: &mut Vec<String>,
	) -> Result<String> {
		let key = format!("{section}.{}", option.to_lowercase());
		if stack.contains(&key) {
			let mut chain = stack.join(" -> ");
			chain.push_str(" -> ");
			chain.push_str(&key);
			return Err(ProjConfError::CyclicReference { chain });
		}

		let raw = lookup_raw(self.doc, section, option)?;
		stack.push(key);
		let expanded = self.expand_value(raw, stack);
		stack.pop();
		expanded
	}

	fn expand_value(&self, raw: &str, stack: &mut Vec<String>) -> Result<String> {
		if !raw.contains("${") || !raw.contains('}') {
			return Ok(raw.to_string());
		}

		let mut out = String::with_capacity(raw.len());
		let mut last = 0;
		for caps in VARTPL_RE.captures_iter(raw) {
			let (Some(whole), Some(section), Some(option)) = (caps.get(0), caps.get(1), caps.get(2))
			else {
				continue;
			};
			out.push_str(&raw[last..whole.start()]);

			let replacement = if section.as_str() == SYSENV_SECTION {
				// Unset variables expand to nothing.
				std::env::var(option.as_str()).unwrap_or_default()
			} else {
				self.resolve_option(section.as_str(), option.as_str(), stack)?
			};
			tracing::trace!(reference = whole.as_str(), %replacement, "expanded reference");

			out.push_str(&replacement);
			last = whole.end();
		}
		out.push_str(&raw[last..]);

		Ok(out)
	}
}
