// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use lectern_api::{AccessApi, AccessGrant, AccessRole, Credential, FolderId, GroupId};
use tracing::{error, info, instrument, warn};

use crate::ProvisionError;

/// Grants a group a role on a folder.
pub struct AccessGrantor {
	api: Arc<dyn AccessApi>,
}

impl AccessGrantor {
	pub fn new(api: Arc<dyn AccessApi>) -> Self {
		Self { api }
	}

	/// Issue exactly one grant call. Not retried; earlier steps are not
	/// undone on failure.
	#[instrument(skip(self, credential), fields(identifier = %credential.identifier()))]
	pub async fn grant_folder_access(
		&self,
		credential: &Credential,
		folder_id: FolderId,
		group_id: GroupId,
		role: AccessRole,
	) -> Result<AccessGrant, ProvisionError> {
		if folder_id.is_nil() {
			warn!("folder id is nil, not granting access");
			return Err(ProvisionError::invalid("folder_id", "must not be nil"));
		}
		if group_id.is_nil() {
			warn!("group id is nil, not granting access");
			return Err(ProvisionError::invalid("group_id", "must not be nil"));
		}

		match self
			.api
			.grant_group_access_to_folder(credential, folder_id, group_id, role)
			.await
		{
			Ok(()) => {
				let grant = AccessGrant {
					folder_id,
					group_id,
					role,
				};
				info!(%grant, "granted folder access");
				Ok(grant)
			}
			Err(e) => {
				error!(error = %e, "failed to grant folder access");
				Err(ProvisionError::remote("grant_group_access_to_folder", e))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{Call, FakeMediaService};

	const NIL: &str = "00000000-0000-0000-0000-000000000000";

	#[tokio::test]
	async fn grants_once() {
		let fake = Arc::new(FakeMediaService::new());
		let grantor = AccessGrantor::new(fake.clone());
		let folder_id = FolderId::generate();
		let group_id = GroupId::generate();

		let grant = grantor
			.grant_folder_access(
				&FakeMediaService::credential(),
				folder_id,
				group_id,
				AccessRole::Creator,
			)
			.await
			.unwrap();

		assert_eq!(grant.role, AccessRole::Creator);
		assert_eq!(
			fake.calls(),
			vec![Call::Grant {
				folder_id,
				group_id,
				role: AccessRole::Creator,
			}]
		);
	}

	#[tokio::test]
	async fn nil_ids_make_no_call() {
		let fake = Arc::new(FakeMediaService::new());
		let grantor = AccessGrantor::new(fake.clone());
		let credential = FakeMediaService::credential();

		let err = grantor
			.grant_folder_access(
				&credential,
				NIL.parse().unwrap(),
				GroupId::generate(),
				AccessRole::Viewer,
			)
			.await
			.unwrap_err();
		assert!(matches!(err, ProvisionError::Invalid { field: "folder_id", .. }));

		let err = grantor
			.grant_folder_access(
				&credential,
				FolderId::generate(),
				NIL.parse().unwrap(),
				AccessRole::Viewer,
			)
			.await
			.unwrap_err();
		assert!(matches!(err, ProvisionError::Invalid { field: "group_id", .. }));

		assert!(fake.calls().is_empty());
	}

	#[tokio::test]
	async fn failure_is_not_retried() {
		let fake = Arc::new(FakeMediaService::new().failing("grant_group_access_to_folder"));
		let grantor = AccessGrantor::new(fake.clone());

		let err = grantor
			.grant_folder_access(
				&FakeMediaService::credential(),
				FolderId::generate(),
				GroupId::generate(),
				AccessRole::Publisher,
			)
			.await
			.unwrap_err();

		assert!(matches!(err, ProvisionError::Remote { .. }));
		assert_eq!(fake.calls().len(), 1);
	}
}
