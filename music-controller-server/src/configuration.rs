use serde::Deserialize;
use std::fs::read_to_string;
use std::path::Path;
use thiserror::Error;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Configuration {
	pub log_filters: String,
	#[serde(default = "default_code_generation_attempts")]
	pub code_generation_attempts: usize,
	pub database: DatabaseConfiguration,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct DatabaseConfiguration {
	pub backend: DatabaseBackend,
	/// A sqlx connection URL for `sqlite`, a file path (or `:memory:`) for `libsql`.
	pub url: String,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
	Sqlite,
	LibSql,
}

fn default_code_generation_attempts() -> usize {
	16
}

impl Configuration {
	pub fn from_file(path: impl AsRef<Path>) -> Result<Configuration, ConfigurationError> {
		let text = read_to_string(path)?;
		Configuration::try_from(text.as_str())
	}
}

impl TryFrom<&str> for Configuration {
	type Error = ConfigurationError;

	fn try_from(text: &str) -> Result<Self, Self::Error> {
		let configuration: Configuration = toml::from_str(text)?;
		if configuration.code_generation_attempts == 0 {
			return Err(ConfigurationError::NoCodeGenerationAttempts);
		}

		Ok(configuration)
	}
}

#[derive(Error, Debug)]
pub enum ConfigurationError {
	#[error("Failed to deserialize with error: {0}")]
	DeserializationError(#[from] toml::de::Error),
	#[error("IO operation failed: {0}")]
	IoError(#[from] std::io::Error),
	#[error("code_generation_attempts must be at least 1")]
	NoCodeGenerationAttempts,
}
