// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use lectern_api::{Credential, NewUser, UserApi, UserId};
use tracing::{error, info, instrument, warn};

use crate::{ProvisionError, Provisioned};

/// Finds a user by key, creating the account when it does not exist.
pub struct UserProvisioner {
	api: Arc<dyn UserApi>,
}

impl UserProvisioner {
	pub fn new(api: Arc<dyn UserApi>) -> Self {
		Self { api }
	}

	/// Ensure an account with `key` exists.
	///
	/// An existing account is returned as-is; its names and email are not
	/// compared or updated. New accounts get no system role, an empty bio,
	/// notifications off and an empty initial password.
	#[instrument(skip(self, credential, first_name, last_name, email), fields(identifier = %credential.identifier()))]
	pub async fn ensure_user(
		&self,
		credential: &Credential,
		key: &str,
		first_name: &str,
		last_name: &str,
		email: &str,
	) -> Result<Provisioned<UserId>, ProvisionError> {
		if key.trim().is_empty() {
			warn!("user key is empty");
			return Err(ProvisionError::invalid("user_key", "must not be empty"));
		}

		let existing = self.api.get_user_by_key(credential, key).await.map_err(|e| {
			error!(error = %e, "user lookup failed");
			ProvisionError::remote("get_user_by_key", e)
		})?;

		if let Some(user) = existing.filter(|u| !u.id.is_nil()) {
			info!(user_id = %user.id, "user already exists");
			return Ok(Provisioned::Existing(user.id));
		}

		for (field, value) in [
			("first_name", first_name),
			("last_name", last_name),
			("email", email),
		] {
			if value.is_empty() {
				warn!(field, "cannot create user with missing field");
				return Err(ProvisionError::invalid(field, "required to create a new user"));
			}
		}

		let new_user = NewUser::basic(key, first_name, last_name, email);
		match self.api.create_user(credential, &new_user, "").await {
			Ok(id) => {
				info!(user_id = %id, "created user");
				Ok(Provisioned::Created(id))
			}
			Err(e) => {
				error!(error = %e, "failed to create user");
				Err(ProvisionError::remote("create_user", e))
			}
		}
	}
}
