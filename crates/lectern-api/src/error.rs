// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the media service client.

use lectern_common_http::RetryableError;
use thiserror::Error;

/// Errors that can occur when calling the media service.
#[derive(Debug, Error)]
pub enum MediaApiError {
	/// Network-level error during HTTP communication.
	#[error("Network error: {0}")]
	Network(#[from] reqwest::Error),

	/// Request timed out.
	#[error("Request timed out")]
	Timeout,

	/// Credential rejected by the service.
	#[error("Unauthorized: credential rejected")]
	Unauthorized,

	/// Credential valid but lacks the permission for this operation.
	#[error("Forbidden: insufficient permissions")]
	Forbidden,

	/// The addressed entity does not exist.
	#[error("Not found")]
	NotFound,

	/// Rate limit exceeded.
	#[error("Rate limit exceeded")]
	RateLimited,

	/// The service returned another non-success status.
	#[error("Media service error: {status} - {message}")]
	Api { status: u16, message: String },

	/// Invalid or unparseable response body.
	#[error("Invalid response from media service: {0}")]
	InvalidResponse(String),

	/// The configured base URL cannot be used.
	#[error("Invalid base URL: {0}")]
	InvalidUrl(String),
}

impl MediaApiError {
	pub fn api(status: u16, message: impl Into<String>) -> Self {
		Self::Api {
			status,
			message: message.into(),
		}
	}

	pub(crate) fn from_status(status: u16, body: String) -> Self {
		match status {
			401 => Self::Unauthorized,
			403 => Self::Forbidden,
			404 => Self::NotFound,
			429 => Self::RateLimited,
			_ => Self::api(status, body),
		}
	}
}

impl RetryableError for MediaApiError {
	fn is_retryable(&self) -> bool {
		match self {
			MediaApiError::Network(e) => e.is_retryable(),
			MediaApiError::Timeout => true,
			MediaApiError::RateLimited => true,
			MediaApiError::Api { status, .. } => *status >= 500,
			_ => false,
		}
	}
}

/// A credential could not be built from the supplied parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
	#[error("credential identifier is empty")]
	MissingIdentifier,

	#[error("credential secret is empty")]
	MissingSecret,
}
