// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Result of an ensure-style step: either a new entity or one that was
/// already there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provisioned<T> {
	Created(T),
	Existing(T),
}

impl<T> Provisioned<T> {
	pub fn is_created(&self) -> bool {
		matches!(self, Provisioned::Created(_))
	}

	pub fn value(&self) -> &T {
		match self {
			Provisioned::Created(v) | Provisioned::Existing(v) => v,
		}
	}

	pub fn into_inner(self) -> T {
		match self {
			Provisioned::Created(v) | Provisioned::Existing(v) => v,
		}
	}

	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Provisioned<U> {
		match self {
			Provisioned::Created(v) => Provisioned::Created(f(v)),
			Provisioned::Existing(v) => Provisioned::Existing(f(v)),
		}
	}
}
