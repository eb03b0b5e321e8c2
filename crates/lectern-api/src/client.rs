// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP implementation of every media service facet.

use std::time::Duration;

use async_trait::async_trait;
use lectern_common_http::{retry, RetryConfig};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, trace};
use url::Url;

use crate::error::MediaApiError;
use crate::facets::{AccessApi, FolderApi, GroupApi, UserApi};
use crate::ids::{FolderId, GroupId, UserId};
use crate::types::{AccessRole, Credential, FolderRef, Group, NewUser, UserProfile};

const API_PREFIX: [&str; 2] = ["api", "v1"];
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the media service REST API.
///
/// Lookups are retried on transient failures according to the configured
/// [`RetryConfig`]. Creates and grants are sent exactly once so a lost
/// response can never produce a duplicate entity.
#[derive(Debug, Clone)]
pub struct MediaClient {
	http_client: Client,
	base_url: Url,
	retry_config: RetryConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddFolderRequest<'a> {
	name: &'a str,
	parent_id: Option<FolderId>,
	is_public: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateUserRequest<'a> {
	user: &'a NewUser,
	initial_password: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateUserResponse {
	id: UserId,
}

#[derive(Debug, Deserialize)]
struct GroupsResponse {
	#[serde(default)]
	groups: Vec<Group>,
}

#[derive(Debug, Serialize)]
struct UsersLookupRequest<'a> {
	ids: &'a [UserId],
}

#[derive(Debug, Deserialize)]
struct UsersResponse {
	#[serde(default)]
	users: Vec<UserProfile>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateGroupRequest<'a> {
	name: &'a str,
	member_ids: &'a [UserId],
}

#[derive(Debug, Serialize)]
struct GrantAccessRequest {
	role: AccessRole,
}

impl MediaClient {
	/// Creates a client for the service rooted at `base_url` with the
	/// default request timeout.
	pub fn new(base_url: &str) -> Result<Self, MediaApiError> {
		Self::with_timeout(base_url, DEFAULT_TIMEOUT)
	}

	/// Creates a client whose requests each give up after `timeout`.
	pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, MediaApiError> {
		let base_url = parse_base_url(base_url)?;
		let http_client = lectern_common_http::client_with_timeout(timeout)?;

		Ok(Self {
			http_client,
			base_url,
			retry_config: RetryConfig::default(),
		})
	}

	/// Sets the retry policy used for lookups.
	pub fn with_retry_config(mut self, config: RetryConfig) -> Self {
		self.retry_config = config;
		self
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	fn endpoint(&self, segments: &[&str]) -> Result<Url, MediaApiError> {
		let mut url = self.base_url.clone();
		url
			.path_segments_mut()
			.map_err(|_| MediaApiError::InvalidUrl(self.base_url.to_string()))?
			.pop_if_empty()
			.extend(API_PREFIX)
			.extend(segments);
		Ok(url)
	}

	async fn send(
		&self,
		request: RequestBuilder,
		credential: &Credential,
	) -> Result<Response, MediaApiError> {
		request
			.basic_auth(credential.identifier(), Some(credential.secret().expose()))
			.send()
			.await
			.map_err(|e| {
				if e.is_timeout() {
					error!("Request timed out");
					return MediaApiError::Timeout;
				}
				error!(error = %e, "Network error during media service request");
				MediaApiError::Network(e)
			})
	}

	async fn get_user_by_key_once(
		&self,
		credential: &Credential,
		key: &str,
	) -> Result<Option<UserProfile>, MediaApiError> {
		let url = self.endpoint(&["users", "by-key", key])?;
		debug!(url = %url, "Looking up user by key");

		let response = self.send(self.http_client.get(url), credential).await?;
		if response.status() == StatusCode::NOT_FOUND {
			return Ok(None);
		}

		let user: UserProfile = read_json(response).await?;
		if user.id.is_nil() {
			debug!(key, "Service returned an empty user record");
			return Ok(None);
		}
		Ok(Some(user))
	}

	async fn get_groups_by_name_once(
		&self,
		credential: &Credential,
		name: &str,
	) -> Result<Vec<Group>, MediaApiError> {
		let mut url = self.endpoint(&["groups"])?;
		url.query_pairs_mut().append_pair("name", name);
		debug!(url = %url, "Looking up groups by name");

		let response = self.send(self.http_client.get(url), credential).await?;
		if response.status() == StatusCode::NOT_FOUND {
			return Ok(Vec::new());
		}

		let body: GroupsResponse = read_json(response).await?;
		Ok(body
			.groups
			.into_iter()
			.filter(|group| !group.id.is_nil() && group.name == name)
			.collect())
	}

	async fn get_users_by_ids_once(
		&self,
		credential: &Credential,
		ids: &[UserId],
	) -> Result<Vec<UserProfile>, MediaApiError> {
		let url = self.endpoint(&["users", "lookup"])?;
		debug!(url = %url, count = ids.len(), "Resolving user ids");

		let request = self
			.http_client
			.post(url)
			.json(&UsersLookupRequest { ids });
		let response = self.send(request, credential).await?;

		let body: UsersResponse = read_json(response).await?;
		Ok(body.users)
	}
}

#[async_trait]
impl FolderApi for MediaClient {
	#[instrument(skip(self, credential), fields(identifier = %credential.identifier()))]
	async fn add_folder(
		&self,
		credential: &Credential,
		name: &str,
		parent_id: Option<FolderId>,
		is_public: bool,
	) -> Result<FolderRef, MediaApiError> {
		let url = self.endpoint(&["folders"])?;
		debug!(url = %url, "Creating folder");

		let request = self.http_client.post(url).json(&AddFolderRequest {
			name,
			parent_id,
			is_public,
		});
		let response = self.send(request, credential).await?;

		let folder: FolderRef = read_json(response).await?;
		if folder.id.is_nil() {
			return Err(MediaApiError::InvalidResponse(
				"created folder has an empty id".to_string(),
			));
		}
		Ok(folder)
	}
}

#[async_trait]
impl UserApi for MediaClient {
	#[instrument(skip(self, credential), fields(identifier = %credential.identifier()))]
	async fn get_user_by_key(
		&self,
		credential: &Credential,
		key: &str,
	) -> Result<Option<UserProfile>, MediaApiError> {
		retry(&self.retry_config, || {
			self.get_user_by_key_once(credential, key)
		})
		.await
	}

	#[instrument(skip(self, credential, user, initial_password), fields(identifier = %credential.identifier(), key = %user.key))]
	async fn create_user(
		&self,
		credential: &Credential,
		user: &NewUser,
		initial_password: &str,
	) -> Result<UserId, MediaApiError> {
		let url = self.endpoint(&["users"])?;
		debug!(url = %url, "Creating user");

		let request = self.http_client.post(url).json(&CreateUserRequest {
			user,
			initial_password,
		});
		let response = self.send(request, credential).await?;

		let body: CreateUserResponse = read_json(response).await?;
		if body.id.is_nil() {
			return Err(MediaApiError::InvalidResponse(
				"created user has an empty id".to_string(),
			));
		}
		Ok(body.id)
	}
}

#[async_trait]
impl GroupApi for MediaClient {
	#[instrument(skip(self, credential), fields(identifier = %credential.identifier()))]
	async fn get_groups_by_name(
		&self,
		credential: &Credential,
		name: &str,
	) -> Result<Vec<Group>, MediaApiError> {
		retry(&self.retry_config, || {
			self.get_groups_by_name_once(credential, name)
		})
		.await
	}

	#[instrument(skip(self, credential, ids), fields(identifier = %credential.identifier(), count = ids.len()))]
	async fn get_users_by_ids(
		&self,
		credential: &Credential,
		ids: &[UserId],
	) -> Result<Vec<UserProfile>, MediaApiError> {
		if ids.is_empty() {
			return Ok(Vec::new());
		}
		retry(&self.retry_config, || {
			self.get_users_by_ids_once(credential, ids)
		})
		.await
	}

	#[instrument(skip(self, credential, member_ids), fields(identifier = %credential.identifier(), members = member_ids.len()))]
	async fn create_internal_group(
		&self,
		credential: &Credential,
		name: &str,
		member_ids: &[UserId],
	) -> Result<Group, MediaApiError> {
		let url = self.endpoint(&["groups", "internal"])?;
		debug!(url = %url, "Creating internal group");

		let request = self
			.http_client
			.post(url)
			.json(&CreateGroupRequest { name, member_ids });
		let response = self.send(request, credential).await?;

		let group: Group = read_json(response).await?;
		if group.id.is_nil() {
			return Err(MediaApiError::InvalidResponse(
				"created group has an empty id".to_string(),
			));
		}
		Ok(group)
	}
}

#[async_trait]
impl AccessApi for MediaClient {
	#[instrument(skip(self, credential), fields(identifier = %credential.identifier()))]
	async fn grant_group_access_to_folder(
		&self,
		credential: &Credential,
		folder_id: FolderId,
		group_id: GroupId,
		role: AccessRole,
	) -> Result<(), MediaApiError> {
		let folder = folder_id.to_string();
		let group = group_id.to_string();
		let url = self.endpoint(&["folders", &folder, "access", "groups", &group])?;
		debug!(url = %url, %role, "Granting folder access");

		let request = self.http_client.put(url).json(&GrantAccessRequest { role });
		let response = self.send(request, credential).await?;
		ensure_success(response).await?;
		Ok(())
	}
}

fn parse_base_url(raw: &str) -> Result<Url, MediaApiError> {
	let url =
		Url::parse(raw.trim()).map_err(|e| MediaApiError::InvalidUrl(format!("'{raw}': {e}")))?;

	if url.scheme() != "https" && url.scheme() != "http" {
		return Err(MediaApiError::InvalidUrl(format!(
			"'{raw}': scheme must be http or https"
		)));
	}
	if url.cannot_be_a_base() || url.host_str().is_none() {
		return Err(MediaApiError::InvalidUrl(format!(
			"'{raw}': must include a host"
		)));
	}

	Ok(url)
}

async fn ensure_success(response: Response) -> Result<Response, MediaApiError> {
	let status = response.status();
	debug!(status = %status, "Received response from media service");

	if status.is_success() {
		return Ok(response);
	}

	let body = response.text().await.unwrap_or_default();
	let err = MediaApiError::from_status(status.as_u16(), body);
	error!(status = status.as_u16(), error = %err, "Media service rejected request");
	Err(err)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, MediaApiError> {
	let response = ensure_success(response).await?;

	let body = response.text().await.map_err(|e| {
		error!(error = %e, "Failed to read response body");
		MediaApiError::Network(e)
	})?;
	trace!(body = %body, "Response body");

	serde_json::from_str(&body).map_err(|e| {
		error!(error = %e, "Failed to parse media service response");
		MediaApiError::InvalidResponse(format!("JSON parse error: {e}"))
	})
}
