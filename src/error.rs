use std::path::PathBuf;

/// Library-level structured errors for projconf.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum ProjConfError {
	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write config file: {path}")]
	ConfigWriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Invalid project configuration: {path}\n{message}")]
	InvalidProjectConf { path: PathBuf, message: String },

	#[error("Not a project directory, configuration file not found: {path}")]
	NotProjectDir { path: PathBuf },

	#[error("No environments are declared in the project configuration")]
	NoEnvironments,

	#[error("Unknown environment names '{unknown}'. Valid names are '{known}'")]
	UnknownEnvNames { unknown: String, known: String },

	#[error("No section: [{section}]")]
	NoSection { section: String },

	#[error("No option '{option}' in section: [{section}]")]
	NoOption { section: String, option: String },

	#[error("Cyclic reference detected while resolving: {chain}")]
	CyclicReference { chain: String },

	#[error("Invalid glob pattern in extra_configs: {pattern}")]
	InvalidGlob {
		pattern: String,
		#[source]
		source: glob::PatternError,
	},

	#[error("Failed to serialize configuration to JSON")]
	Json {
		#[source]
		source: serde_json::Error,
	},
}

impl ProjConfError {
	/// True for lookups that `get` treats as "use the default".
	pub fn is_missing(&self) -> bool {
		matches!(self, Self::NoSection { .. } | Self::NoOption { .. })
	}
}

/// Result type alias using ProjConfError.
pub type Result<T> = std::result::Result<T, ProjConfError>;
