// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
	Folder,
	User,
	Group,
	Access,
}

impl Step {
	pub const ORDER: [Step; 4] = [Step::Folder, Step::User, Step::Group, Step::Access];

	pub fn as_str(&self) -> &'static str {
		match self {
			Step::Folder => "folder",
			Step::User => "user",
			Step::Group => "group",
			Step::Access => "access",
		}
	}
}

impl fmt::Display for Step {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.pad(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
	/// `id` is the entity id, or the grant description for [`Step::Access`].
	Completed { id: String, created: bool },
	Failed { reason: String },
	/// Not attempted because an earlier step failed.
	Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
	pub step: Step,
	pub status: StepStatus,
}

/// Per-step outcome of one orchestrator run, always in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningReport {
	steps: Vec<StepReport>,
}

impl ProvisioningReport {
	pub(crate) fn new() -> Self {
		Self {
			steps: Vec::with_capacity(Step::ORDER.len()),
		}
	}

	pub(crate) fn completed(&mut self, step: Step, id: impl ToString, created: bool) {
		self.push(
			step,
			StepStatus::Completed {
				id: id.to_string(),
				created,
			},
		);
	}

	/// Record `step` as failed and every step after it as skipped.
	pub(crate) fn failed(&mut self, step: Step, reason: impl ToString) {
		self.push(
			step,
			StepStatus::Failed {
				reason: reason.to_string(),
			},
		);
		for later in Step::ORDER.iter().skip_while(|s| **s != step).skip(1) {
			self.push(*later, StepStatus::Skipped);
		}
	}

	fn push(&mut self, step: Step, status: StepStatus) {
		self.steps.push(StepReport { step, status });
	}

	pub fn steps(&self) -> &[StepReport] {
		&self.steps
	}

	pub fn status(&self, step: Step) -> Option<&StepStatus> {
		self.steps.iter().find(|r| r.step == step).map(|r| &r.status)
	}

	pub fn all_succeeded(&self) -> bool {
		self.steps.len() == Step::ORDER.len()
			&& self
				.steps
				.iter()
				.all(|r| matches!(r.status, StepStatus::Completed { .. }))
	}
}

impl fmt::Display for ProvisioningReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for report in &self.steps {
			match &report.status {
				StepStatus::Completed { id, created } => {
					let how = if *created { "created" } else { "existing" };
					writeln!(f, "{:<8} ok       {id} ({how})", report.step)?;
				}
				StepStatus::Failed { reason } => {
					writeln!(f, "{:<8} FAILED   {reason}", report.step)?;
				}
				StepStatus::Skipped => writeln!(f, "{:<8} skipped", report.step)?,
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn failure_skips_later_steps() {
		let mut report = ProvisioningReport::new();
		report.completed(Step::Folder, "f-1", true);
		report.failed(Step::User, "invalid email: must not be empty");

		let steps: Vec<_> = report.steps().iter().map(|r| r.step).collect();
		assert_eq!(steps, Step::ORDER.to_vec());
		assert_eq!(report.status(Step::Group), Some(&StepStatus::Skipped));
		assert_eq!(report.status(Step::Access), Some(&StepStatus::Skipped));
		assert!(!report.all_succeeded());
	}

	#[test]
	fn display_lists_every_step() {
		let mut report = ProvisioningReport::new();
		report.completed(Step::Folder, "f-1", true);
		report.completed(Step::User, "u-1", false);
		report.completed(Step::Group, "g-1", true);
		report.completed(Step::Access, "Creator on f-1 for g-1", true);
		assert!(report.all_succeeded());

		let text = report.to_string();
		assert_eq!(text.lines().count(), 4);
		assert!(text.contains("user     ok       u-1 (existing)"));
	}

	#[test]
	fn failed_last_step_adds_nothing() {
		let mut report = ProvisioningReport::new();
		report.failed(Step::Access, "boom");
		assert_eq!(report.steps().len(), 1);
		assert!(report.to_string().starts_with("access   FAILED   boom"));
	}
}
