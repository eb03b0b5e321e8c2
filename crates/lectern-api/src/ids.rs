// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identifier newtypes assigned by the media service.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a random id. Only the service assigns real ids; this
			/// exists for fakes and fixtures.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			pub fn as_uuid(&self) -> &Uuid {
				&self.0
			}

			/// The service answers with the nil UUID when an entity does not
			/// exist.
			pub fn is_nil(&self) -> bool {
				self.0.is_nil()
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl std::str::FromStr for $name {
			type Err = uuid::Error;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Ok(Self(Uuid::parse_str(s)?))
			}
		}
	};
}

define_id_type!(FolderId, "Identifier of a folder.");
define_id_type!(UserId, "Identifier of a user account.");
define_id_type!(GroupId, "Identifier of a user group.");
