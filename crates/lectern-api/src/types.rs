// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire and domain types shared by all facets.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use lectern_common_secret::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::CredentialError;
use crate::ids::{FolderId, GroupId, UserId};

/// Authority presented on every remote call.
///
/// The service authenticates the identifier (a user key) and secret (its
/// password) on each request; nothing is cached locally.
#[derive(Debug, Clone)]
pub struct Credential {
	identifier: String,
	secret: SecretString,
}

impl Credential {
	/// Build a credential. Both parts must be non-blank.
	pub fn new(
		identifier: impl Into<String>,
		secret: impl Into<SecretString>,
	) -> Result<Self, CredentialError> {
		let identifier = identifier.into();
		let secret = secret.into();

		if identifier.trim().is_empty() {
			return Err(CredentialError::MissingIdentifier);
		}
		if secret.is_blank() {
			return Err(CredentialError::MissingSecret);
		}

		Ok(Self { identifier, secret })
	}

	pub fn identifier(&self) -> &str {
		&self.identifier
	}

	pub fn secret(&self) -> &SecretString {
		&self.secret
	}
}

/// Snapshot of a folder as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderRef {
	pub id: FolderId,
	pub name: String,
	#[serde(default)]
	pub parent_id: Option<FolderId>,
	#[serde(default)]
	pub is_public: bool,
}

/// Service-wide role of a user account, independent of folder access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SystemRole {
	#[default]
	None,
	Videographer,
	Admin,
}

/// A user account known to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
	pub id: UserId,
	pub key: String,
	#[serde(default)]
	pub first_name: String,
	#[serde(default)]
	pub last_name: String,
	#[serde(default)]
	pub email: String,
	#[serde(default)]
	pub system_role: SystemRole,
	#[serde(default)]
	pub bio: String,
	#[serde(default)]
	pub email_session_notifications: bool,
}

/// Payload for creating a user. The service assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
	pub key: String,
	pub first_name: String,
	pub last_name: String,
	pub email: String,
	pub system_role: SystemRole,
	pub bio: String,
	pub email_session_notifications: bool,
}

impl NewUser {
	/// A plain account: no system role, empty bio, notifications off.
	pub fn basic(
		key: impl Into<String>,
		first_name: impl Into<String>,
		last_name: impl Into<String>,
		email: impl Into<String>,
	) -> Self {
		Self {
			key: key.into(),
			first_name: first_name.into(),
			last_name: last_name.into(),
			email: email.into(),
			system_role: SystemRole::None,
			bio: String::new(),
			email_session_notifications: false,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GroupType {
	/// Membership managed by the service itself.
	#[default]
	Internal,
	/// Membership synchronised from an external identity provider.
	External,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
	pub id: GroupId,
	pub name: String,
	#[serde(default)]
	pub member_ids: BTreeSet<UserId>,
	#[serde(default)]
	pub group_type: GroupType,
}

/// Access level a group can hold on a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessRole {
	Viewer,
	Creator,
	Publisher,
}

impl AccessRole {
	pub const ALL: [AccessRole; 3] = [AccessRole::Viewer, AccessRole::Creator, AccessRole::Publisher];

	pub fn as_str(&self) -> &'static str {
		match self {
			AccessRole::Viewer => "Viewer",
			AccessRole::Creator => "Creator",
			AccessRole::Publisher => "Publisher",
		}
	}
}

impl fmt::Display for AccessRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown access role '{0}', expected one of: viewer, creator, publisher")]
pub struct ParseRoleError(pub String);

impl FromStr for AccessRole {
	type Err = ParseRoleError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		AccessRole::ALL
			.into_iter()
			.find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
			.ok_or_else(|| ParseRoleError(s.to_string()))
	}
}

/// A role binding that was accepted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessGrant {
	pub folder_id: FolderId,
	pub group_id: GroupId,
	pub role: AccessRole,
}

impl fmt::Display for AccessGrant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"group {} is {} of folder {}",
			self.group_id, self.role, self.folder_id
		)
	}
}
