// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layer for merging from multiple sources.

use lectern_common_secret::SecretString;
use serde::Deserialize;

/// Partial configuration layer - all fields are Option for merging.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
	#[serde(default)]
	pub server: Option<ServerLayer>,
	#[serde(default)]
	pub credential: Option<CredentialLayer>,
	#[serde(default)]
	pub retry: Option<RetryLayer>,
	#[serde(default)]
	pub logging: Option<LoggingLayer>,
	#[serde(default)]
	pub plan: Option<PlanLayer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerLayer {
	#[serde(default)]
	pub base_url: Option<String>,
	#[serde(default)]
	pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialLayer {
	#[serde(default)]
	pub identifier: Option<String>,
	#[serde(default)]
	pub secret: Option<SecretString>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetryLayer {
	#[serde(default)]
	pub max_attempts: Option<u32>,
	#[serde(default)]
	pub base_delay_ms: Option<u64>,
	#[serde(default)]
	pub max_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingLayer {
	#[serde(default)]
	pub level: Option<String>,
	#[serde(default)]
	pub format: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanLayer {
	#[serde(default)]
	pub folder_name: Option<String>,
	#[serde(default)]
	pub group_name: Option<String>,
	#[serde(default)]
	pub role: Option<String>,
	#[serde(default)]
	pub user: Option<UserPlanLayer>,
	#[serde(default)]
	pub external: Option<ExternalPlanLayer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPlanLayer {
	#[serde(default)]
	pub key: Option<String>,
	#[serde(default)]
	pub first_name: Option<String>,
	#[serde(default)]
	pub last_name: Option<String>,
	#[serde(default)]
	pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalPlanLayer {
	#[serde(default)]
	pub provider_id: Option<String>,
	#[serde(default)]
	pub group_id: Option<String>,
}

impl ConfigLayer {
	/// Merge `other` on top of `self`; fields set in `other` win.
	pub fn merge(&mut self, other: ConfigLayer) {
		merge_option(&mut self.server, other.server, ServerLayer::merge);
		merge_option(&mut self.credential, other.credential, CredentialLayer::merge);
		merge_option(&mut self.retry, other.retry, RetryLayer::merge);
		merge_option(&mut self.logging, other.logging, LoggingLayer::merge);
		merge_option(&mut self.plan, other.plan, PlanLayer::merge);
	}

	pub(crate) fn server_mut(&mut self) -> &mut ServerLayer {
		self.server.get_or_insert_with(ServerLayer::default)
	}

	pub(crate) fn credential_mut(&mut self) -> &mut CredentialLayer {
		self.credential.get_or_insert_with(CredentialLayer::default)
	}

	pub(crate) fn logging_mut(&mut self) -> &mut LoggingLayer {
		self.logging.get_or_insert_with(LoggingLayer::default)
	}

	pub(crate) fn retry_mut(&mut self) -> &mut RetryLayer {
		self.retry.get_or_insert_with(RetryLayer::default)
	}

	pub(crate) fn plan_mut(&mut self) -> &mut PlanLayer {
		self.plan.get_or_insert_with(PlanLayer::default)
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}

fn overwrite<T>(target: &mut Option<T>, source: Option<T>) {
	if source.is_some() {
		*target = source;
	}
}

impl ServerLayer {
	fn merge(&mut self, other: ServerLayer) {
		overwrite(&mut self.base_url, other.base_url);
		overwrite(&mut self.timeout_secs, other.timeout_secs);
	}
}

impl CredentialLayer {
	fn merge(&mut self, other: CredentialLayer) {
		overwrite(&mut self.identifier, other.identifier);
		overwrite(&mut self.secret, other.secret);
	}
}

impl RetryLayer {
	fn merge(&mut self, other: RetryLayer) {
		overwrite(&mut self.max_attempts, other.max_attempts);
		overwrite(&mut self.base_delay_ms, other.base_delay_ms);
		overwrite(&mut self.max_delay_ms, other.max_delay_ms);
	}
}

impl LoggingLayer {
	fn merge(&mut self, other: LoggingLayer) {
		overwrite(&mut self.level, other.level);
		overwrite(&mut self.format, other.format);
	}
}

impl PlanLayer {
	fn merge(&mut self, other: PlanLayer) {
		overwrite(&mut self.folder_name, other.folder_name);
		overwrite(&mut self.group_name, other.group_name);
		overwrite(&mut self.role, other.role);
		merge_option(&mut self.user, other.user, |t, s| {
			overwrite(&mut t.key, s.key);
			overwrite(&mut t.first_name, s.first_name);
			overwrite(&mut t.last_name, s.last_name);
			overwrite(&mut t.email, s.email);
		});
		merge_option(&mut self.external, other.external, |t, s| {
			overwrite(&mut t.provider_id, s.provider_id);
			overwrite(&mut t.group_id, s.group_id);
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(toml_str: &str) -> ConfigLayer {
		toml::from_str(toml_str).unwrap()
	}

	#[test]
	fn parses_full_layer() {
		let layer = parse(
			r#"
			[server]
			base_url = "https://media.example.com"
			timeout_secs = 10

			[credential]
			identifier = "admin"
			secret = "pw"

			[plan]
			folder_name = "MyFolderName"
			role = "viewer"

			[plan.user]
			key = "UserKey"
			email = "user@mail.com"

			[plan.external]
			provider_id = "PanoptoExternalProviderId"
			"#,
		);

		assert_eq!(layer.server.unwrap().timeout_secs, Some(10));
		assert_eq!(layer.credential.unwrap().secret.unwrap().expose(), "pw");
		let plan = layer.plan.unwrap();
		assert_eq!(plan.user.unwrap().key.as_deref(), Some("UserKey"));
		assert!(plan.external.unwrap().group_id.is_none());
	}

	#[test]
	fn unknown_section_is_rejected() {
		assert!(toml::from_str::<ConfigLayer>("[providers]\nx = 1\n").is_err());
	}

	#[test]
	fn merge_overrides_only_set_fields() {
		let mut base = parse(
			r#"
			[server]
			base_url = "https://a.example.com"
			timeout_secs = 10

			[plan.user]
			key = "UserKey"
			first_name = "First"
			"#,
		);
		let top = parse(
			r#"
			[server]
			base_url = "https://b.example.com"

			[plan.user]
			first_name = "Override"
			"#,
		);

		base.merge(top);

		let server = base.server.unwrap();
		assert_eq!(server.base_url.as_deref(), Some("https://b.example.com"));
		assert_eq!(server.timeout_secs, Some(10));

		let user = base.plan.unwrap().user.unwrap();
		assert_eq!(user.key.as_deref(), Some("UserKey"));
		assert_eq!(user.first_name.as_deref(), Some("Override"));
	}

	#[test]
	fn merge_into_empty_takes_source() {
		let mut base = ConfigLayer::default();
		base.merge(parse("[logging]\nlevel = \"debug\"\n"));
		assert_eq!(base.logging.unwrap().level.as_deref(), Some("debug"));
	}
}
