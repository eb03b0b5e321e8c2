// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration management for Lectern provisioning runs.
//!
//! This crate provides:
//! - XDG Base Directory compliant path resolution
//! - Layered configuration from multiple sources
//! - TOML configuration file parsing
//! - Environment variable overrides, including `_FILE` secrets
//! - Configuration validation

pub mod defaults;
pub mod env;
pub mod error;
pub mod layer;
pub mod paths;
pub mod registry;
pub mod runtime;
pub mod sources;
pub mod validation;

pub use defaults::DEFAULT_CONFIG_TEMPLATE;
pub use env::{load_secret_env, SecretEnvError};
pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use paths::PathsConfig;
pub use registry::ConfigRegistry;
pub use runtime::{
	ExternalPlan, LecternConfig, LogFormat, LoggingConfig, PlanConfig, ServerConfig, UserPlan,
};
pub use sources::{CliOverrides, ConfigSource, Precedence};

/// Load configuration from all sources with CLI overrides on top.
pub fn load_config(cli: CliOverrides) -> Result<LecternConfig, ConfigError> {
	let paths = paths::resolve_xdg_paths()?;

	let mut registry = ConfigRegistry::new();

	registry.register(Box::new(sources::DefaultsSource));
	registry.register(Box::new(sources::FileSource::system(&paths)));
	registry.register(Box::new(sources::FileSource::user(&paths)));
	if let Some(path) = cli.config_file.clone() {
		registry.register(Box::new(sources::FileSource::explicit(path)));
	}
	registry.register(Box::new(sources::EnvSource::process()));
	registry.register(Box::new(sources::CliSource::new(cli)));

	registry.load(paths)
}
