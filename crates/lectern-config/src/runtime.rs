// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Runtime configuration types with resolved defaults.

use std::str::FromStr;
use std::time::Duration;

use lectern_api::{AccessRole, Credential};
use lectern_common_http::RetryConfig;

use crate::layer::*;
use crate::paths::PathsConfig;
use crate::ConfigError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_ROLE: AccessRole = AccessRole::Creator;

/// The final, validated configuration for a provisioning run.
#[derive(Debug, Clone)]
pub struct LecternConfig {
	pub server: ServerConfig,
	pub credential: Credential,
	pub retry: RetryConfig,
	pub logging: LoggingConfig,
	pub plan: PlanConfig,
	pub paths: PathsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
	pub base_url: String,
	pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
	#[default]
	Pretty,
	Json,
}

impl FromStr for LogFormat {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"pretty" | "text" => Ok(LogFormat::Pretty),
			"json" => Ok(LogFormat::Json),
			other => Err(ConfigError::invalid_value(
				"logging.format",
				format!("'{other}' is not one of: pretty, json"),
			)),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
	pub level: String,
	pub format: LogFormat,
}

/// What to provision. Empty strings are passed through untouched; the
/// provisioners decide what an empty value means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanConfig {
	pub folder_name: String,
	pub group_name: String,
	pub role: AccessRole,
	pub user: UserPlan,
	pub external: Option<ExternalPlan>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPlan {
	pub key: String,
	pub first_name: String,
	pub last_name: String,
	pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalPlan {
	pub provider_id: String,
	pub group_id: String,
}

impl LecternConfig {
	/// Resolve a merged layer, filling defaults and checking required fields.
	pub fn from_layer(layer: ConfigLayer, paths: PathsConfig) -> Result<Self, ConfigError> {
		let server_layer = layer.server.unwrap_or_default();
		let base_url = server_layer
			.base_url
			.filter(|url| !url.trim().is_empty())
			.ok_or_else(|| ConfigError::missing_field("server.base_url"))?;
		let server = ServerConfig {
			base_url,
			timeout: Duration::from_secs(server_layer.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
		};

		let credential_layer = layer.credential.unwrap_or_default();
		let identifier = credential_layer
			.identifier
			.ok_or_else(|| ConfigError::missing_field("credential.identifier"))?;
		let secret = credential_layer
			.secret
			.ok_or_else(|| ConfigError::missing_field("credential.secret"))?;
		let credential = Credential::new(identifier, secret)
			.map_err(|e| ConfigError::invalid_value("credential", e.to_string()))?;

		let retry_layer = layer.retry.unwrap_or_default();
		let defaults = RetryConfig::default();
		let retry = RetryConfig {
			max_attempts: retry_layer.max_attempts.unwrap_or(defaults.max_attempts),
			base_delay: retry_layer
				.base_delay_ms
				.map(Duration::from_millis)
				.unwrap_or(defaults.base_delay),
			max_delay: retry_layer
				.max_delay_ms
				.map(Duration::from_millis)
				.unwrap_or(defaults.max_delay),
			..defaults
		};

		let logging_layer = layer.logging.unwrap_or_default();
		let logging = LoggingConfig {
			level: logging_layer
				.level
				.map(|level| level.trim().to_ascii_lowercase())
				.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
			format: logging_layer
				.format
				.as_deref()
				.map(LogFormat::from_str)
				.transpose()?
				.unwrap_or_default(),
		};

		let plan = PlanConfig::from_layer(layer.plan.unwrap_or_default())?;

		Ok(Self {
			server,
			credential,
			retry,
			logging,
			plan,
			paths,
		})
	}
}

impl PlanConfig {
	fn from_layer(layer: PlanLayer) -> Result<Self, ConfigError> {
		let role = match layer.role.as_deref() {
			Some(raw) => AccessRole::from_str(raw)
				.map_err(|e| ConfigError::invalid_value("plan.role", e.to_string()))?,
			None => DEFAULT_ROLE,
		};

		let user = layer
			.user
			.map(|u| UserPlan {
				key: u.key.unwrap_or_default(),
				first_name: u.first_name.unwrap_or_default(),
				last_name: u.last_name.unwrap_or_default(),
				email: u.email.unwrap_or_default(),
			})
			.unwrap_or_default();

		let external = layer
			.external
			.map(|e| ExternalPlan {
				provider_id: e.provider_id.unwrap_or_default(),
				group_id: e.group_id.unwrap_or_default(),
			})
			.filter(|e| !e.provider_id.is_empty() || !e.group_id.is_empty());

		Ok(Self {
			folder_name: layer.folder_name.unwrap_or_default(),
			group_name: layer.group_name.unwrap_or_default(),
			role,
			user,
			external,
		})
	}
}
