// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration validation rules.

use tracing::warn;
use url::Url;

use crate::runtime::LecternConfig;
use crate::ConfigError;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Validate the configuration.
///
/// Plan values are deliberately not checked here: an empty folder name is
/// a legitimate "do nothing" run.
pub fn validate_config(config: &LecternConfig) -> Result<(), ConfigError> {
	validate_server(config)?;
	validate_retry(config)?;
	validate_logging(config)?;

	Ok(())
}

fn validate_server(config: &LecternConfig) -> Result<(), ConfigError> {
	let url = Url::parse(&config.server.base_url)
		.map_err(|e| ConfigError::invalid_value("server.base_url", e.to_string()))?;

	match url.scheme() {
		"https" => {}
		"http" => warn!(base_url = %url, "media service base URL is not using https"),
		other => {
			return Err(ConfigError::invalid_value(
				"server.base_url",
				format!("unsupported scheme '{other}'"),
			))
		}
	}

	if config.server.timeout.is_zero() {
		return Err(ConfigError::invalid_value(
			"server.timeout_secs",
			"must be greater than zero",
		));
	}

	Ok(())
}

fn validate_retry(config: &LecternConfig) -> Result<(), ConfigError> {
	if config.retry.max_attempts == 0 {
		return Err(ConfigError::invalid_value(
			"retry.max_attempts",
			"must be at least 1",
		));
	}

	if config.retry.base_delay > config.retry.max_delay {
		return Err(ConfigError::invalid_value(
			"retry.base_delay_ms",
			"must not exceed retry.max_delay_ms",
		));
	}

	Ok(())
}

fn validate_logging(config: &LecternConfig) -> Result<(), ConfigError> {
	if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
		return Err(ConfigError::invalid_value(
			"logging.level",
			format!(
				"'{}' is not one of: {}",
				config.logging.level,
				LOG_LEVELS.join(", ")
			),
		));
	}

	Ok(())
}
