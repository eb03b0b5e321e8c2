// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: files, environment, CLI, defaults.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, trace};

use crate::env::load_secret_with;
use crate::layer::ConfigLayer;
use crate::paths::PathsConfig;
use crate::ConfigError;

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	SystemFile = 20,
	UserFile = 30,
	ExplicitFile = 40,
	Environment = 50,
	Cli = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	/// Name for logging
	fn name(&self) -> &'static str;

	/// Precedence level
	fn precedence(&self) -> Precedence;

	/// Whether a failure to load aborts configuration loading.
	fn required(&self) -> bool {
		false
	}

	/// Load configuration layer from this source
	fn load(&self) -> Result<ConfigLayer, ConfigError>;
}

/// Built-in defaults source.
///
/// Returns an empty layer; defaults are applied when the merged layer is
/// resolved into a [`crate::LecternConfig`].
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		Ok(ConfigLayer::default())
	}
}

/// File-based configuration source (TOML).
pub struct FileSource {
	path: PathBuf,
	precedence: Precedence,
	name: &'static str,
	required: bool,
}

impl FileSource {
	/// System config: /etc/lectern/config.toml
	pub fn system(paths: &PathsConfig) -> Self {
		Self {
			path: paths.system_config_file.clone(),
			precedence: Precedence::SystemFile,
			name: "system-config",
			required: false,
		}
	}

	/// User config: ~/.config/lectern/config.toml
	pub fn user(paths: &PathsConfig) -> Self {
		Self {
			path: paths.user_config_file.clone(),
			precedence: Precedence::UserFile,
			name: "user-config",
			required: false,
		}
	}

	/// A file named on the command line. It must exist and parse.
	pub fn explicit(path: PathBuf) -> Self {
		Self {
			path,
			precedence: Precedence::ExplicitFile,
			name: "explicit-config",
			required: true,
		}
	}
}

impl ConfigSource for FileSource {
	fn name(&self) -> &'static str {
		self.name
	}

	fn precedence(&self) -> Precedence {
		self.precedence
	}

	fn required(&self) -> bool {
		self.required
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.path.exists() {
			if self.required {
				return Err(ConfigError::FileNotFound(self.path.clone()));
			}
			debug!(path = %self.path.display(), source = self.name, "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), source = self.name, "loading config file");

		let content = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
			path: self.path.clone(),
			source,
		})?;
		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!(source = self.name, "parsed config layer");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Reads `LECTERN_*` variables. The secret supports `LECTERN_SECRET_FILE`.
pub struct EnvSource {
	vars: HashMap<String, String>,
}

impl EnvSource {
	/// Snapshot the current process environment.
	pub fn process() -> Self {
		Self::from_vars(std::env::vars())
	}

	pub fn from_vars<I>(vars: I) -> Self
	where
		I: IntoIterator<Item = (String, String)>,
	{
		Self {
			vars: vars
				.into_iter()
				.filter(|(key, _)| key.starts_with("LECTERN_"))
				.collect(),
		}
	}

	fn get(&self, key: &str) -> Option<String> {
		self
			.vars
			.get(key)
			.map(|v| v.trim().to_string())
			.filter(|v| !v.is_empty())
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn required(&self) -> bool {
		true
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading environment variables");
		let mut layer = ConfigLayer::default();

		if let Some(secret) = load_secret_with("LECTERN_SECRET", |name| self.vars.get(name).cloned())? {
			trace!("loaded credential secret from environment");
			layer.credential_mut().secret = Some(secret);
		}

		if let Some(value) = self.get("LECTERN_BASE_URL") {
			layer.server_mut().base_url = Some(value);
		}
		if let Some(value) = self.get("LECTERN_TIMEOUT_SECS") {
			let secs = value.parse().map_err(|_| {
				ConfigError::invalid_value("LECTERN_TIMEOUT_SECS", format!("'{value}' is not a number"))
			})?;
			layer.server_mut().timeout_secs = Some(secs);
		}
		if let Some(value) = self.get("LECTERN_IDENTIFIER") {
			layer.credential_mut().identifier = Some(value);
		}
		if let Some(value) = self.get("LECTERN_RETRY_MAX_ATTEMPTS") {
			let attempts = value.parse().map_err(|_| {
				ConfigError::invalid_value(
					"LECTERN_RETRY_MAX_ATTEMPTS",
					format!("'{value}' is not a number"),
				)
			})?;
			layer.retry_mut().max_attempts = Some(attempts);
		}
		if let Some(value) = self.get("LECTERN_LOG_LEVEL") {
			layer.logging_mut().level = Some(value);
		}
		if let Some(value) = self.get("LECTERN_LOG_FORMAT") {
			layer.logging_mut().format = Some(value);
		}

		Ok(layer)
	}
}

/// CLI argument overrides.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub config_file: Option<PathBuf>,
	pub base_url: Option<String>,
	pub identifier: Option<String>,
	pub folder_name: Option<String>,
	pub group_name: Option<String>,
	pub role: Option<String>,
	pub user_key: Option<String>,
	pub first_name: Option<String>,
	pub last_name: Option<String>,
	pub email: Option<String>,
	pub external_provider_id: Option<String>,
	pub external_group_id: Option<String>,
	pub log_level: Option<String>,
	pub log_format: Option<String>,
}

/// CLI override source.
pub struct CliSource {
	overrides: CliOverrides,
}

impl CliSource {
	pub fn new(overrides: CliOverrides) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading CLI overrides");
		let o = self.overrides.clone();
		let mut layer = ConfigLayer::default();

		if o.base_url.is_some() {
			layer.server_mut().base_url = o.base_url;
		}
		if o.identifier.is_some() {
			layer.credential_mut().identifier = o.identifier;
		}
		if o.log_level.is_some() {
			layer.logging_mut().level = o.log_level;
		}
		if o.log_format.is_some() {
			layer.logging_mut().format = o.log_format;
		}

		let plan = layer.plan_mut();
		plan.folder_name = o.folder_name;
		plan.group_name = o.group_name;
		plan.role = o.role;

		if o.user_key.is_some() || o.first_name.is_some() || o.last_name.is_some() || o.email.is_some() {
			let user = plan.user.get_or_insert_with(Default::default);
			user.key = o.user_key;
			user.first_name = o.first_name;
			user.last_name = o.last_name;
			user.email = o.email;
		}

		if o.external_provider_id.is_some() || o.external_group_id.is_some() {
			let external = plan.external.get_or_insert_with(Default::default);
			external.provider_id = o.external_provider_id;
			external.group_id = o.external_group_id;
		}

		Ok(layer)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn precedence_ordering() {
		assert!(Precedence::Cli > Precedence::Environment);
		assert!(Precedence::Environment > Precedence::ExplicitFile);
		assert!(Precedence::ExplicitFile > Precedence::UserFile);
		assert!(Precedence::UserFile > Precedence::SystemFile);
		assert!(Precedence::SystemFile > Precedence::Defaults);
	}

	#[test]
	fn missing_optional_file_is_empty() {
		let source = FileSource::user(&PathsConfig {
			user_config_file: PathBuf::from("/nonexistent/lectern/config.toml"),
			system_config_file: PathBuf::from("/nonexistent/etc/config.toml"),
		});
		let layer = source.load().unwrap();
		assert!(layer.server.is_none());
	}

	#[test]
	fn missing_explicit_file_is_an_error() {
		let source = FileSource::explicit(PathBuf::from("/nonexistent/lectern.toml"));
		assert!(source.required());
		assert!(matches!(source.load(), Err(ConfigError::FileNotFound(_))));
	}

	#[test]
	fn malformed_file_reports_path() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[server\nbase_url = 1").unwrap();

		let err = FileSource::explicit(file.path().to_path_buf())
			.load()
			.unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }));
	}

	#[test]
	fn env_source_reads_lectern_vars() {
		let source = EnvSource::from_vars([
			("LECTERN_BASE_URL".to_string(), "https://media.example.com".to_string()),
			("LECTERN_IDENTIFIER".to_string(), "admin".to_string()),
			("LECTERN_SECRET".to_string(), "pw".to_string()),
			("LECTERN_TIMEOUT_SECS".to_string(), "12".to_string()),
			("LECTERN_LOG_FORMAT".to_string(), "json".to_string()),
			("HOME".to_string(), "/root".to_string()),
		]);

		let layer = source.load().unwrap();
		let server = layer.server.unwrap();
		assert_eq!(server.base_url.as_deref(), Some("https://media.example.com"));
		assert_eq!(server.timeout_secs, Some(12));

		let credential = layer.credential.unwrap();
		assert_eq!(credential.identifier.as_deref(), Some("admin"));
		assert_eq!(credential.secret.unwrap().expose(), "pw");
		assert_eq!(layer.logging.unwrap().format.as_deref(), Some("json"));
	}

	#[test]
	fn env_source_rejects_bad_timeout() {
		let source = EnvSource::from_vars([(
			"LECTERN_TIMEOUT_SECS".to_string(),
			"soon".to_string(),
		)]);
		assert!(matches!(
			source.load(),
			Err(ConfigError::InvalidValue { .. })
		));
	}

	#[test]
	fn env_source_reads_retry_attempts() {
		let source = EnvSource::from_vars([(
			"LECTERN_RETRY_MAX_ATTEMPTS".to_string(),
			"5".to_string(),
		)]);
		assert_eq!(source.load().unwrap().retry.unwrap().max_attempts, Some(5));
	}

	#[test]
	fn env_source_rejects_bad_retry_attempts() {
		let source = EnvSource::from_vars([(
			"LECTERN_RETRY_MAX_ATTEMPTS".to_string(),
			"many".to_string(),
		)]);
		assert!(matches!(
			source.load(),
			Err(ConfigError::InvalidValue { field, .. }) if field == "LECTERN_RETRY_MAX_ATTEMPTS"
		));
	}

	#[test]
	fn env_source_ignores_blank_values() {
		let source = EnvSource::from_vars([("LECTERN_BASE_URL".to_string(), "  ".to_string())]);
		assert!(source.load().unwrap().server.is_none());
	}

	#[test]
	fn cli_source_sets_plan_fields() {
		let source = CliSource::new(CliOverrides {
			folder_name: Some("MyFolderName".to_string()),
			user_key: Some("UserKey".to_string()),
			external_group_id: Some("externalFolderId".to_string()),
			..Default::default()
		});

		let plan = source.load().unwrap().plan.unwrap();
		assert_eq!(plan.folder_name.as_deref(), Some("MyFolderName"));
		assert_eq!(plan.user.unwrap().key.as_deref(), Some("UserKey"));
		let external = plan.external.unwrap();
		assert!(external.provider_id.is_none());
		assert_eq!(external.group_id.as_deref(), Some("externalFolderId"));
	}
}
