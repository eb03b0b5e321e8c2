// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use lectern_api::MediaApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisionError {
	/// Rejected locally; no remote call was made.
	#[error("invalid {field}: {reason}")]
	Invalid { field: &'static str, reason: String },

	#[error("{operation} failed: {source}")]
	Remote {
		operation: &'static str,
		#[source]
		source: MediaApiError,
	},
}

impl ProvisionError {
	pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
		Self::Invalid {
			field,
			reason: reason.into(),
		}
	}

	pub fn remote(operation: &'static str, source: MediaApiError) -> Self {
		Self::Remote { operation, source }
	}

	/// True when the failure happened before anything was sent.
	pub fn is_local(&self) -> bool {
		matches!(self, Self::Invalid { .. })
	}
}
