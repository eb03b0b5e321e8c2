// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory media service that records every call.

use std::collections::BTreeSet;
use std::sync::Mutex;

use async_trait::async_trait;
use lectern_api::{
	AccessApi, AccessRole, Credential, FolderApi, FolderId, FolderRef, Group, GroupApi, GroupId,
	GroupType, MediaApiError, NewUser, SystemRole, UserApi, UserId, UserProfile,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
	AddFolder { name: String },
	GetUserByKey { key: String },
	CreateUser { user: NewUser, initial_password: String },
	GetGroupsByName { name: String },
	GetUsersByIds { ids: Vec<UserId> },
	CreateInternalGroup { name: String, member_ids: Vec<UserId> },
	Grant { folder_id: FolderId, group_id: GroupId, role: AccessRole },
}

#[derive(Default)]
struct State {
	users: Vec<UserProfile>,
	groups: Vec<Group>,
	calls: Vec<Call>,
	failing: Vec<&'static str>,
}

#[derive(Default)]
pub struct FakeMediaService {
	state: Mutex<State>,
}

impl FakeMediaService {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn credential() -> Credential {
		Credential::new("admin", "secret").unwrap()
	}

	pub fn with_user(self, key: &str) -> (Self, UserId) {
		let id = UserId::generate();
		self.state.lock().unwrap().users.push(UserProfile {
			id,
			key: key.to_string(),
			first_name: "Existing".to_string(),
			last_name: "User".to_string(),
			email: format!("{key}@example.com"),
			system_role: SystemRole::None,
			bio: String::new(),
			email_session_notifications: false,
		});
		(self, id)
	}

	pub fn with_group(self, name: &str, members: &[UserId]) -> (Self, Group) {
		let group = Group {
			id: GroupId::generate(),
			name: name.to_string(),
			member_ids: members.iter().copied().collect(),
			group_type: GroupType::Internal,
		};
		self.state.lock().unwrap().groups.push(group.clone());
		(self, group)
	}

	/// Make every call to `operation` fail with a 500.
	pub fn failing(self, operation: &'static str) -> Self {
		self.state.lock().unwrap().failing.push(operation);
		self
	}

	pub fn calls(&self) -> Vec<Call> {
		self.state.lock().unwrap().calls.clone()
	}

	pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
		self.calls().iter().filter(|c| matches(c)).count()
	}

	fn record(&self, operation: &'static str, call: Call) -> Result<(), MediaApiError> {
		let mut state = self.state.lock().unwrap();
		state.calls.push(call);
		if state.failing.contains(&operation) {
			return Err(MediaApiError::api(500, format!("{operation} is down")));
		}
		Ok(())
	}
}

#[async_trait]
impl FolderApi for FakeMediaService {
	async fn add_folder(
		&self,
		_credential: &Credential,
		name: &str,
		parent_id: Option<FolderId>,
		is_public: bool,
	) -> Result<FolderRef, MediaApiError> {
		self.record("add_folder", Call::AddFolder { name: name.to_string() })?;
		Ok(FolderRef {
			id: FolderId::generate(),
			name: name.to_string(),
			parent_id,
			is_public,
		})
	}
}

#[async_trait]
impl UserApi for FakeMediaService {
	async fn get_user_by_key(
		&self,
		_credential: &Credential,
		key: &str,
	) -> Result<Option<UserProfile>, MediaApiError> {
		self.record("get_user_by_key", Call::GetUserByKey { key: key.to_string() })?;
		let state = self.state.lock().unwrap();
		Ok(state.users.iter().find(|u| u.key == key).cloned())
	}

	async fn create_user(
		&self,
		_credential: &Credential,
		user: &NewUser,
		initial_password: &str,
	) -> Result<UserId, MediaApiError> {
		self.record(
			"create_user",
			Call::CreateUser {
				user: user.clone(),
				initial_password: initial_password.to_string(),
			},
		)?;
		let id = UserId::generate();
		self.state.lock().unwrap().users.push(UserProfile {
			id,
			key: user.key.clone(),
			first_name: user.first_name.clone(),
			last_name: user.last_name.clone(),
			email: user.email.clone(),
			system_role: user.system_role,
			bio: user.bio.clone(),
			email_session_notifications: user.email_session_notifications,
		});
		Ok(id)
	}
}

#[async_trait]
impl GroupApi for FakeMediaService {
	async fn get_groups_by_name(
		&self,
		_credential: &Credential,
		name: &str,
	) -> Result<Vec<Group>, MediaApiError> {
		self.record("get_groups_by_name", Call::GetGroupsByName { name: name.to_string() })?;
		let state = self.state.lock().unwrap();
		Ok(state.groups.iter().filter(|g| g.name == name).cloned().collect())
	}

	async fn get_users_by_ids(
		&self,
		_credential: &Credential,
		ids: &[UserId],
	) -> Result<Vec<UserProfile>, MediaApiError> {
		self.record("get_users_by_ids", Call::GetUsersByIds { ids: ids.to_vec() })?;
		let state = self.state.lock().unwrap();
		Ok(state
			.users
			.iter()
			.filter(|u| ids.contains(&u.id))
			.cloned()
			.collect())
	}

	async fn create_internal_group(
		&self,
		_credential: &Credential,
		name: &str,
		member_ids: &[UserId],
	) -> Result<Group, MediaApiError> {
		self.record(
			"create_internal_group",
			Call::CreateInternalGroup {
				name: name.to_string(),
				member_ids: member_ids.to_vec(),
			},
		)?;
		let group = Group {
			id: GroupId::generate(),
			name: name.to_string(),
			member_ids: member_ids.iter().copied().collect::<BTreeSet<_>>(),
			group_type: GroupType::Internal,
		};
		self.state.lock().unwrap().groups.push(group.clone());
		Ok(group)
	}
}

#[async_trait]
impl AccessApi for FakeMediaService {
	async fn grant_group_access_to_folder(
		&self,
		_credential: &Credential,
		folder_id: FolderId,
		group_id: GroupId,
		role: AccessRole,
	) -> Result<(), MediaApiError> {
		self.record(
			"grant_group_access_to_folder",
			Call::Grant {
				folder_id,
				group_id,
				role,
			},
		)
	}
}
