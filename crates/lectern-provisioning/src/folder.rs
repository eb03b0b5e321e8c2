// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use lectern_api::{Credential, FolderApi, FolderRef};
use tracing::{error, info, instrument, warn};

use crate::{ProvisionError, Provisioned};

/// Creates top-level, non-public folders.
pub struct FolderProvisioner {
	api: Arc<dyn FolderApi>,
}

impl FolderProvisioner {
	pub fn new(api: Arc<dyn FolderApi>) -> Self {
		Self { api }
	}

	/// Create a folder named `name`.
	///
	/// There is no lookup first, so the result is always
	/// [`Provisioned::Created`] and calling this twice with the same name
	/// produces two folders.
	#[instrument(skip(self, credential), fields(identifier = %credential.identifier()))]
	pub async fn ensure_folder(
		&self,
		credential: &Credential,
		name: &str,
	) -> Result<Provisioned<FolderRef>, ProvisionError> {
		if name.trim().is_empty() {
			warn!("folder name is empty, not creating a folder");
			return Err(ProvisionError::invalid("folder_name", "must not be empty"));
		}

		match self.api.add_folder(credential, name, None, false).await {
			Ok(folder) => {
				info!(folder_id = %folder.id, "created folder");
				Ok(Provisioned::Created(folder))
			}
			Err(e) => {
				error!(error = %e, "failed to create folder");
				Err(ProvisionError::remote("add_folder", e))
			}
		}
	}
}
