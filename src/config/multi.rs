use regex::Regex;
use std::sync::LazyLock;

static INLINE_COMMENT_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\s+;.*$").expect("inline comment regex is valid"));

/// Split a multi-valued option into its tokens.
///
/// A value containing a newline is split per line, otherwise on `", "`.
/// Blank tokens and tokens starting with `;` or `#` are dropped, and a
/// trailing ` ; comment` is stripped. Order and duplicates are kept.
pub fn parse_multi_values(raw: &str) -> Vec<String> {
	let separator = if raw.contains('\n') { "\n" } else { ", " };

	raw.split(separator)
		.map(str::trim)
		.filter(|item| !item.is_empty() && !item.starts_with([';', '#']))
		.map(|item| {
			if item.contains(';') {
				INLINE_COMMENT_RE.replace(item, "").trim().to_string()
			} else {
				item.to_string()
			}
		})
		.collect()
}
