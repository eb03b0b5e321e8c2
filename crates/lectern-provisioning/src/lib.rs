// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Provisioning workflow for the media service.
//!
//! Four single-purpose components, each wrapping one facet of the remote API:
//!
//! - [`FolderProvisioner`] creates the target folder
//! - [`UserProvisioner`] finds or creates the user account
//! - [`GroupProvisioner`] finds or creates the group, seeded with the user
//! - [`AccessGrantor`] grants the group a role on the folder
//!
//! [`Orchestrator`] runs them strictly in that order. A step that fails stops
//! the flow; later steps are reported as skipped and nothing is rolled back.

mod access;
mod error;
mod folder;
mod group;
mod orchestrator;
mod outcome;
mod report;
mod user;

#[cfg(test)]
mod testing;

pub use access::AccessGrantor;
pub use error::ProvisionError;
pub use folder::FolderProvisioner;
pub use group::{ExternalGroupRef, GroupProvisioner};
pub use orchestrator::{Orchestrator, PlannedUser, ProvisioningPlan};
pub use outcome::Provisioned;
pub use report::{ProvisioningReport, Step, StepReport, StepStatus};
pub use user::UserProvisioner;
