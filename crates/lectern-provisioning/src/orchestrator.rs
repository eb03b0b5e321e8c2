// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use lectern_api::{AccessApi, AccessRole, Credential, FolderApi, GroupApi, UserApi};
use tracing::{info, instrument, warn};

use crate::report::{ProvisioningReport, Step};
use crate::{AccessGrantor, ExternalGroupRef, FolderProvisioner, GroupProvisioner, UserProvisioner};

/// Account to find or create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlannedUser {
	pub key: String,
	pub first_name: String,
	pub last_name: String,
	pub email: String,
}

/// Everything one run provisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningPlan {
	pub folder_name: String,
	pub user: PlannedUser,
	pub group_name: String,
	pub role: AccessRole,
	pub external: Option<ExternalGroupRef>,
}

/// Runs folder, user, group and access provisioning in order.
pub struct Orchestrator {
	credential: Credential,
	folders: FolderProvisioner,
	users: UserProvisioner,
	groups: GroupProvisioner,
	access: AccessGrantor,
}

impl Orchestrator {
	/// Wire every component to the same client and credential.
	pub fn new<C>(client: Arc<C>, credential: Credential) -> Self
	where
		C: FolderApi + UserApi + GroupApi + AccessApi + 'static,
	{
		Self {
			credential,
			folders: FolderProvisioner::new(client.clone()),
			users: UserProvisioner::new(client.clone()),
			groups: GroupProvisioner::new(client.clone()),
			access: AccessGrantor::new(client),
		}
	}

	/// Run the plan once. Never fails: every outcome lands in the report.
	#[instrument(skip_all, fields(folder = %plan.folder_name, group = %plan.group_name, role = %plan.role))]
	pub async fn run(&self, plan: &ProvisioningPlan) -> ProvisioningReport {
		let mut report = ProvisioningReport::new();
		let credential = &self.credential;

		let folder = match self.folders.ensure_folder(credential, &plan.folder_name).await {
			Ok(folder) => {
				report.completed(Step::Folder, folder.value().id, folder.is_created());
				folder.into_inner()
			}
			Err(e) => {
				warn!(error = %e, "folder step failed, skipping the rest");
				report.failed(Step::Folder, e);
				return report;
			}
		};

		let user_id = match self
			.users
			.ensure_user(
				credential,
				&plan.user.key,
				&plan.user.first_name,
				&plan.user.last_name,
				&plan.user.email,
			)
			.await
		{
			Ok(user) => {
				report.completed(Step::User, user.value(), user.is_created());
				user.into_inner()
			}
			Err(e) => {
				warn!(error = %e, "user step failed, skipping the rest");
				report.failed(Step::User, e);
				return report;
			}
		};

		let group = match self
			.groups
			.ensure_group_with_member(credential, &plan.group_name, user_id, plan.external.as_ref())
			.await
		{
			Ok(group) => {
				report.completed(Step::Group, group.value().id, group.is_created());
				group.into_inner()
			}
			Err(e) => {
				warn!(error = %e, "group step failed, skipping the rest");
				report.failed(Step::Group, e);
				return report;
			}
		};

		match self
			.access
			.grant_folder_access(credential, folder.id, group.id, plan.role)
			.await
		{
			Ok(grant) => report.completed(Step::Access, grant, true),
			Err(e) => {
				warn!(error = %e, "access step failed");
				report.failed(Step::Access, e);
				return report;
			}
		}

		info!("provisioning complete");
		report
	}
}
