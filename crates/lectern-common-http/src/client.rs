// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent header.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

/// Creates a client builder carrying the Lectern User-Agent.
///
/// Use this when the caller needs more than a timeout (proxies, custom
/// roots, ...).
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Creates a client whose every request is bounded by `timeout`.
pub fn client_with_timeout(timeout: Duration) -> Result<Client, reqwest::Error> {
	builder().timeout(timeout).build()
}

/// Returns the Lectern User-Agent string.
///
/// Format: `lectern/{version} ({os}-{arch})`
pub fn user_agent() -> String {
	format!(
		"lectern/{} ({}-{})",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}
