// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! XDG Base Directory compliant path resolution.

use std::path::PathBuf;

use crate::ConfigError;

const SYSTEM_CONFIG_FILE: &str = "/etc/lectern/config.toml";

/// Resolved config file locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
	/// User config file: ~/.config/lectern/config.toml
	pub user_config_file: PathBuf,
	/// System config file: /etc/lectern/config.toml
	pub system_config_file: PathBuf,
}

impl Default for PathsConfig {
	fn default() -> Self {
		Self {
			user_config_file: PathBuf::from("~/.config/lectern/config.toml"),
			system_config_file: PathBuf::from(SYSTEM_CONFIG_FILE),
		}
	}
}

/// Resolve config paths, honouring `XDG_CONFIG_HOME` when set.
pub fn resolve_xdg_paths() -> Result<PathsConfig, ConfigError> {
	let config_home = match std::env::var_os("XDG_CONFIG_HOME") {
		Some(dir) if !dir.is_empty() => PathBuf::from(dir),
		_ => dirs::home_dir()
			.ok_or(ConfigError::HomeDirNotFound)?
			.join(".config"),
	};

	tracing::debug!(config_home = %config_home.display(), "resolved XDG config home");

	Ok(PathsConfig {
		user_config_file: config_home.join("lectern/config.toml"),
		system_config_file: PathBuf::from(SYSTEM_CONFIG_FILE),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolved_paths_live_under_lectern() {
		let paths = resolve_xdg_paths().unwrap();
		assert!(paths.user_config_file.ends_with("lectern/config.toml"));
		assert_eq!(
			paths.system_config_file,
			PathBuf::from("/etc/lectern/config.toml")
		);
	}
}
