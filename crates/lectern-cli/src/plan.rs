// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use lectern_config::PlanConfig;
use lectern_provisioning::{ExternalGroupRef, ProvisioningPlan, PlannedUser};

pub fn from_config(plan: &PlanConfig) -> ProvisioningPlan {
	ProvisioningPlan {
		folder_name: plan.folder_name.clone(),
		user: PlannedUser {
			key: plan.user.key.clone(),
			first_name: plan.user.first_name.clone(),
			last_name: plan.user.last_name.clone(),
			email: plan.user.email.clone(),
		},
		group_name: plan.group_name.clone(),
		role: plan.role,
		external: plan.external.as_ref().map(|e| ExternalGroupRef {
			provider_id: e.provider_id.clone(),
			external_group_id: e.group_id.clone(),
		}),
	}
}
