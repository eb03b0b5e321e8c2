// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Typed client for the media service.
//!
//! The remote service is split into four facets, each modelled as a trait so
//! callers can depend on the narrow capability they need:
//!
//! - [`FolderApi`]: folder creation
//! - [`UserApi`]: user lookup and creation
//! - [`GroupApi`]: group lookup, member resolution and creation
//! - [`AccessApi`]: folder access grants
//!
//! [`MediaClient`] implements all four over HTTP. Every call takes the same
//! [`Credential`].
//!
//! # Example
//!
//! ```ignore
//! use lectern_api::{Credential, FolderApi, MediaClient};
//!
//! let client = MediaClient::new("https://media.example.com")?;
//! let credential = Credential::new("admin", "password")?;
//! let folder = client.add_folder(&credential, "Lectures", None, false).await?;
//! println!("created folder {}", folder.id);
//! ```

mod client;
mod error;
mod facets;
mod ids;
mod types;

pub use client::MediaClient;
pub use error::{CredentialError, MediaApiError};
pub use facets::{AccessApi, FolderApi, GroupApi, UserApi};
pub use ids::{FolderId, GroupId, UserId};
pub use lectern_common_http::RetryConfig;
pub use types::{
	AccessGrant, AccessRole, Credential, FolderRef, Group, GroupType, NewUser, ParseRoleError,
	SystemRole, UserProfile,
};
