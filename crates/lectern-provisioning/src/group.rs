// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use lectern_api::{Credential, Group, GroupApi, MediaApiError, UserId};
use tracing::{debug, error, info, instrument, warn, Span};

use crate::{ProvisionError, Provisioned};

/// Reference to a group managed by an external identity provider.
///
/// Carried through for diagnostics only; group resolution is always by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalGroupRef {
	pub provider_id: String,
	pub external_group_id: String,
}

/// Finds a group by name, creating an internal group around a single member
/// when none exists.
pub struct GroupProvisioner {
	api: Arc<dyn GroupApi>,
}

impl GroupProvisioner {
	pub fn new(api: Arc<dyn GroupApi>) -> Self {
		Self { api }
	}

	/// Ensure a group called `group_name` exists.
	///
	/// When several groups share the name, the first one the service returns
	/// wins. An existing group is returned unchanged: `user_id` is not added
	/// to it.
	#[instrument(
		skip(self, credential, external),
		fields(
			identifier = %credential.identifier(),
			external_provider = tracing::field::Empty,
			external_group = tracing::field::Empty,
			member_key = tracing::field::Empty,
		)
	)]
	pub async fn ensure_group_with_member(
		&self,
		credential: &Credential,
		group_name: &str,
		user_id: UserId,
		external: Option<&ExternalGroupRef>,
	) -> Result<Provisioned<Group>, ProvisionError> {
		if let Some(external) = external {
			let span = Span::current();
			span.record("external_provider", external.provider_id.as_str());
			span.record("external_group", external.external_group_id.as_str());
		}

		if group_name.trim().is_empty() {
			warn!("group name is empty");
			return Err(ProvisionError::invalid("group_name", "must not be empty"));
		}
		if user_id.is_nil() {
			warn!("member id is nil");
			return Err(ProvisionError::invalid("user_id", "must not be nil"));
		}

		let mut matches = self
			.api
			.get_groups_by_name(credential, group_name)
			.await
			.map_err(|e| {
				error!(error = %e, "group lookup failed");
				ProvisionError::remote("get_groups_by_name", e)
			})?;

		self.describe_member(credential, user_id).await;

		if !matches.is_empty() {
			if matches.len() > 1 {
				warn!(count = matches.len(), "several groups share this name, using the first");
			}
			let group = matches.swap_remove(0);
			info!(group_id = %group.id, "group already exists");
			return Ok(Provisioned::Existing(group));
		}

		let group = self
			.api
			.create_internal_group(credential, group_name, &[user_id])
			.await
			.and_then(|group| {
				if group.id.is_nil() {
					Err(MediaApiError::InvalidResponse(
						"created group has a nil id".to_string(),
					))
				} else {
					Ok(group)
				}
			})
			.map_err(|e| {
				error!(error = %e, "failed to create group");
				ProvisionError::remote("create_internal_group", e)
			})?;

		info!(group_id = %group.id, "created internal group");
		Ok(Provisioned::Created(group))
	}

	/// Resolve the member for the log context. Never fails the step.
	async fn describe_member(&self, credential: &Credential, user_id: UserId) {
		match self.api.get_users_by_ids(credential, &[user_id]).await {
			Ok(users) => match users.into_iter().find(|u| u.id == user_id) {
				Some(user) => {
					Span::current().record("member_key", user.key.as_str());
					debug!("resolved group member");
				}
				None => warn!(%user_id, "group member not found by id"),
			},
			Err(e) => warn!(%user_id, error = %e, "could not resolve group member"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{Call, FakeMediaService};
	use lectern_api::GroupType;

	fn is_create(call: &Call) -> bool {
		matches!(call, Call::CreateInternalGroup { .. })
	}

	#[tokio::test]
	async fn existing_group_is_returned_unchanged() {
		let (fake, other_member) = FakeMediaService::new().with_user("someone");
		let (fake, existing) = fake.with_group("MyGroupName", &[other_member]);
		let (fake, _) = fake.with_group("MyGroupName", &[]);
		let fake = Arc::new(fake);
		let provisioner = GroupProvisioner::new(fake.clone());

		let outcome = provisioner
			.ensure_group_with_member(
				&FakeMediaService::credential(),
				"MyGroupName",
				UserId::generate(),
				None,
			)
			.await
			.unwrap();

		assert_eq!(outcome, Provisioned::Existing(existing));
		assert_eq!(fake.count(is_create), 0);
	}

	#[tokio::test]
	async fn missing_group_is_created_with_exactly_the_member() {
		let (fake, user_id) = FakeMediaService::new().with_user("UserKey");
		let fake = Arc::new(fake);
		let provisioner = GroupProvisioner::new(fake.clone());

		let outcome = provisioner
			.ensure_group_with_member(
				&FakeMediaService::credential(),
				"MyGroupName",
				user_id,
				None,
			)
			.await
			.unwrap();

		assert!(outcome.is_created());
		let group = outcome.into_inner();
		assert_eq!(group.name, "MyGroupName");
		assert_eq!(group.group_type, GroupType::Internal);
		assert_eq!(group.member_ids.into_iter().collect::<Vec<_>>(), vec![user_id]);
		assert!(fake.calls().contains(&Call::CreateInternalGroup {
			name: "MyGroupName".to_string(),
			member_ids: vec![user_id],
		}));
	}

	#[tokio::test]
	async fn looks_up_group_before_member() {
		let (fake, user_id) = FakeMediaService::new().with_user("UserKey");
		let fake = Arc::new(fake);
		let provisioner = GroupProvisioner::new(fake.clone());

		provisioner
			.ensure_group_with_member(
				&FakeMediaService::credential(),
				"MyGroupName",
				user_id,
				None,
			)
			.await
			.unwrap();

		let calls = fake.calls();
		assert!(matches!(calls[0], Call::GetGroupsByName { .. }));
		assert!(matches!(calls[1], Call::GetUsersByIds { .. }));
		assert!(matches!(calls[2], Call::CreateInternalGroup { .. }));
		assert_eq!(calls.len(), 3);
	}

	#[tokio::test]
	async fn member_lookup_failure_is_not_fatal() {
		let fake = Arc::new(FakeMediaService::new().failing("get_users_by_ids"));
		let provisioner = GroupProvisioner::new(fake.clone());
		let external = ExternalGroupRef {
			provider_id: "PanoptoExternalProviderId".to_string(),
			external_group_id: "externalFolderId".to_string(),
		};

		let outcome = provisioner
			.ensure_group_with_member(
				&FakeMediaService::credential(),
				"MyGroupName",
				UserId::generate(),
				Some(&external),
			)
			.await
			.unwrap();

		assert!(outcome.is_created());
		assert_eq!(fake.count(|c| matches!(c, Call::GetUsersByIds { .. })), 1);
	}

	#[tokio::test]
	async fn lookup_failure_does_not_create() {
		let fake = Arc::new(FakeMediaService::new().failing("get_groups_by_name"));
		let provisioner = GroupProvisioner::new(fake.clone());

		let err = provisioner
			.ensure_group_with_member(
				&FakeMediaService::credential(),
				"MyGroupName",
				UserId::generate(),
				None,
			)
			.await
			.unwrap_err();

		assert!(matches!(err, ProvisionError::Remote { operation: "get_groups_by_name", .. }));
		assert_eq!(fake.count(is_create), 0);
	}

	#[tokio::test]
	async fn nil_member_makes_no_call() {
		let fake = Arc::new(FakeMediaService::new());
		let provisioner = GroupProvisioner::new(fake.clone());

		let err = provisioner
			.ensure_group_with_member(
				&FakeMediaService::credential(),
				"MyGroupName",
				"00000000-0000-0000-0000-000000000000".parse().unwrap(),
				None,
			)
			.await
			.unwrap_err();

		assert!(err.is_local());
		assert!(fake.calls().is_empty());
	}
}
