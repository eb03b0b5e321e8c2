// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use crate::env::SecretEnvError;

/// Failure while loading, resolving or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("cannot read {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("malformed config {}: {source}", path.display())]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	/// Only raised for files named with `--config`.
	#[error("config file {} does not exist", .0.display())]
	FileNotFound(PathBuf),

	#[error(transparent)]
	SecretEnv(#[from] SecretEnvError),

	#[error("{0} is required but was not set by any config source")]
	MissingField(String),

	#[error("{field}: {message}")]
	InvalidValue { field: String, message: String },

	#[error("no home directory and XDG_CONFIG_HOME is unset")]
	HomeDirNotFound,
}

impl ConfigError {
	pub fn missing_field(field: impl Into<String>) -> Self {
		Self::MissingField(field.into())
	}

	pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidValue {
			field: field.into(),
			message: message.into(),
		}
	}
}
