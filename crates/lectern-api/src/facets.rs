// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! One trait per facet of the media service.

use async_trait::async_trait;

use crate::error::MediaApiError;
use crate::ids::{FolderId, GroupId, UserId};
use crate::types::{AccessRole, Credential, FolderRef, Group, NewUser, UserProfile};

#[async_trait]
pub trait FolderApi: Send + Sync {
	/// Create a folder. The service never deduplicates by name.
	async fn add_folder(
		&self,
		credential: &Credential,
		name: &str,
		parent_id: Option<FolderId>,
		is_public: bool,
	) -> Result<FolderRef, MediaApiError>;
}

#[async_trait]
pub trait UserApi: Send + Sync {
	/// Returns `Ok(None)` when no account has this key.
	async fn get_user_by_key(
		&self,
		credential: &Credential,
		key: &str,
	) -> Result<Option<UserProfile>, MediaApiError>;

	/// Create an account and return its service-assigned id.
	async fn create_user(
		&self,
		credential: &Credential,
		user: &NewUser,
		initial_password: &str,
	) -> Result<UserId, MediaApiError>;
}

#[async_trait]
pub trait GroupApi: Send + Sync {
	/// All groups whose name equals `name` exactly, in service order.
	async fn get_groups_by_name(
		&self,
		credential: &Credential,
		name: &str,
	) -> Result<Vec<Group>, MediaApiError>;

	/// Resolve user ids. Unknown ids are silently absent from the result.
	async fn get_users_by_ids(
		&self,
		credential: &Credential,
		ids: &[UserId],
	) -> Result<Vec<UserProfile>, MediaApiError>;

	async fn create_internal_group(
		&self,
		credential: &Credential,
		name: &str,
		member_ids: &[UserId],
	) -> Result<Group, MediaApiError>;
}

#[async_trait]
pub trait AccessApi: Send + Sync {
	async fn grant_group_access_to_folder(
		&self,
		credential: &Credential,
		folder_id: FolderId,
		group_id: GroupId,
		role: AccessRole,
	) -> Result<(), MediaApiError>;
}
