use crate::config::types::RawDocument;
use crate::error::{ProjConfError, Result};
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<RawDocument> {
	let content = std::fs::read_to_string(path).map_err(|source| ProjConfError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
///
/// `path` is only used for error reporting.
pub fn parse_config_str(content: &str, path: &Path) -> Result<RawDocument> {
	let invalid = |lineno: usize, message: String| ProjConfError::InvalidProjectConf {
		path: path.to_path_buf(),
		message: format!("line {lineno}: {message}"),
	};

	let mut doc = RawDocument::new();
	let mut section: Option<String> = None;
	// Option currently accepting continuation lines, with its collected lines.
	let mut pending: Option<Pending> = None;

	for (index, line) in content.lines().enumerate() {
		let lineno = index + 1;
		let trimmed = line.trim();

		if trimmed.starts_with(';') || trimmed.starts_with('#') {
			continue;
		}

		if trimmed.is_empty() {
			if let Some(pending) = pending.as_mut() {
				pending.lines.push(String::new());
			}
			continue;
		}

		// Only lines indented deeper than their option line continue it.
		let indent = line.len() - line.trim_start().len();
		if let Some(pending) = pending.as_mut()
			&& indent > pending.indent
		{
			pending.lines.push(trimmed.to_string());
			continue;
		}

		if let Some(current) = section.as_deref() {
			flush_option(&mut doc, current, pending.take());
		}

		if let Some(header) = trimmed.strip_prefix('[') {
			let name = section_name(header)
				.ok_or_else(|| invalid(lineno, format!("malformed section header: {trimmed}")))?;
			if !doc.add_section(name) {
				return Err(invalid(lineno, format!("section [{name}] already exists")));
			}
			section = Some(name.to_string());
			continue;
		}

		let Some(current) = section.as_deref() else {
			return Err(invalid(
				lineno,
				format!("option outside of any section: {trimmed}"),
			));
		};

		let Some(delim) = trimmed.find(['=', ':']) else {
			return Err(invalid(lineno, format!("expected 'key = value': {trimmed}")));
		};
		let key = trimmed[..delim].trim().to_lowercase();
		if key.is_empty() {
			return Err(invalid(lineno, format!("empty option name: {trimmed}")));
		}
		if doc.has_option(current, &key) {
			return Err(invalid(
				lineno,
				format!("option '{key}' in section [{current}] already exists"),
			));
		}
		let value = trimmed[delim + 1..].trim().to_string();
		// Reserve the slot so duplicates are detected and order is kept.
		doc.set(current, &key, "");
		pending = Some(Pending {
			key,
			indent,
			lines: vec![value],
		});
	}

	if let Some(current) = section.as_deref() {
		flush_option(&mut doc, current, pending.take());
	}

	Ok(doc)
}

struct Pending {
	key: String,
	indent: usize,
	lines: Vec<String>,
}

/// Name of a section from the text after its opening `[`.
///
/// The name ends at the first `]` followed by nothing but whitespace or a
/// `;`/`#` comment.
fn section_name(header: &str) -> Option<&str> {
	header
		.match_indices(']')
		.map(|(end, _)| (&header[..end], header[end + 1..].trim_start()))
		.find(|(_, rest)| rest.is_empty() || rest.starts_with(';') || rest.starts_with('#'))
		.map(|(name, _)| name.trim())
		.filter(|name| !name.is_empty())
}

fn flush_option(doc: &mut RawDocument, section: &str, pending: Option<Pending>) {
	if let Some(Pending { key, lines, .. }) = pending {
		let value = lines.join("\n").trim_end().to_string();
		doc.set(section, &key, value);
	}
}

/// Serialize a document back to the config file format.
pub fn write_config(doc: &RawDocument) -> String {
	let mut out = String::new();
	for name in doc.sections() {
		out.push_str(&format!("[{name}]\n"));
		if let Some(options) = doc.section(name) {
			for (key, value) in options {
				let value = value.replace('\n', "\n\t");
				out.push_str(&format!("{key} = {value}\n"));
			}
		}
		out.push('\n');
	}
	out
}
