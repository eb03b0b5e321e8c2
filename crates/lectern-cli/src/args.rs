// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use clap::Parser;
use lectern_config::CliOverrides;

/// Create a folder, ensure a user and group exist, and grant the group
/// access to the folder.
#[derive(Parser, Debug)]
#[command(name = "lectern-provision", version, about, long_about = None)]
pub struct Args {
	/// Config file layered over the system and user files
	#[arg(short, long, env = "LECTERN_CONFIG")]
	pub config: Option<PathBuf>,

	/// Media service root URL
	#[arg(long)]
	pub base_url: Option<String>,

	/// Administrator account identifier
	#[arg(long)]
	pub identifier: Option<String>,

	/// Name of the folder to create
	#[arg(long, env = "LECTERN_FOLDER")]
	pub folder: Option<String>,

	/// Name of the group to find or create
	#[arg(long, env = "LECTERN_GROUP")]
	pub group: Option<String>,

	/// Role granted to the group: viewer, creator, publisher
	#[arg(long, env = "LECTERN_ROLE")]
	pub role: Option<String>,

	#[arg(long, env = "LECTERN_USER_KEY")]
	pub user_key: Option<String>,

	#[arg(long, env = "LECTERN_FIRST_NAME")]
	pub first_name: Option<String>,

	#[arg(long, env = "LECTERN_LAST_NAME")]
	pub last_name: Option<String>,

	#[arg(long, env = "LECTERN_EMAIL")]
	pub email: Option<String>,

	/// External identity provider id, recorded in logs
	#[arg(long)]
	pub external_provider_id: Option<String>,

	/// External group id, recorded in logs
	#[arg(long)]
	pub external_group_id: Option<String>,

	/// Log level: error, warn, info, debug, trace
	#[arg(long)]
	pub log_level: Option<String>,

	/// Emit logs as JSON
	#[arg(long)]
	pub log_json: bool,

	/// Exit with status 1 unless every step succeeded
	#[arg(long)]
	pub strict: bool,

	/// Print a documented default config file and exit
	#[arg(long)]
	pub print_default_config: bool,
}

impl Args {
	pub fn overrides(&self) -> CliOverrides {
		CliOverrides {
			config_file: self.config.clone(),
			base_url: self.base_url.clone(),
			identifier: self.identifier.clone(),
			folder_name: self.folder.clone(),
			group_name: self.group.clone(),
			role: self.role.clone(),
			user_key: self.user_key.clone(),
			first_name: self.first_name.clone(),
			last_name: self.last_name.clone(),
			email: self.email.clone(),
			external_provider_id: self.external_provider_id.clone(),
			external_group_id: self.external_group_id.clone(),
			log_level: self.log_level.clone(),
			log_format: self.log_json.then(|| "json".to_string()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn command_is_well_formed() {
		Args::command().debug_assert();
	}

	#[test]
	fn flags_map_to_overrides() {
		let args = Args::try_parse_from([
			"lectern-provision",
			"--config",
			"/tmp/lectern.toml",
			"--base-url",
			"https://media.example.com",
			"--folder",
			"MyFolderName",
			"--group",
			"MyGroupName",
			"--role",
			"viewer",
			"--user-key",
			"UserKey",
			"--email",
			"user@mail.com",
			"--external-group-id",
			"externalFolderId",
			"--log-json",
			"--strict",
		])
		.unwrap();

		assert!(args.strict);
		let overrides = args.overrides();
		assert_eq!(overrides.config_file, Some(PathBuf::from("/tmp/lectern.toml")));
		assert_eq!(overrides.base_url.as_deref(), Some("https://media.example.com"));
		assert_eq!(overrides.folder_name.as_deref(), Some("MyFolderName"));
		assert_eq!(overrides.group_name.as_deref(), Some("MyGroupName"));
		assert_eq!(overrides.role.as_deref(), Some("viewer"));
		assert_eq!(overrides.user_key.as_deref(), Some("UserKey"));
		assert_eq!(overrides.email.as_deref(), Some("user@mail.com"));
		assert_eq!(overrides.external_group_id.as_deref(), Some("externalFolderId"));
		assert_eq!(overrides.log_format.as_deref(), Some("json"));
	}

	#[test]
	fn log_format_untouched_without_flag() {
		let args = Args::try_parse_from(["lectern-provision", "--log-level", "debug"]).unwrap();
		let overrides = args.overrides();
		assert_eq!(overrides.log_level.as_deref(), Some("debug"));
		assert!(overrides.log_format.is_none());
		assert!(!args.print_default_config);
	}
}
