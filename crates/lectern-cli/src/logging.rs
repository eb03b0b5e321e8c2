// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use lectern_config::{LogFormat, LoggingConfig};
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const BOOTSTRAP_DIRECTIVES: &str = "warn";

/// Filter for the bootstrap subscriber: `RUST_LOG`, else warnings only.
pub fn bootstrap_filter() -> EnvFilter {
	EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(BOOTSTRAP_DIRECTIVES))
}

/// Subscriber active while configuration loads, before the configured level
/// and format are known.
pub fn bootstrap_subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync
where
	W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
	tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().with_writer(writer))
}

/// Filter used when `RUST_LOG` is unset: our crates at the configured level,
/// everything else at warn.
pub fn default_directives(level: &str) -> String {
	format!("warn,lectern={level}")
}

/// Install the global subscriber. Logs go to stderr so stdout carries only
/// the report.
pub fn init(logging: &LoggingConfig) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_directives(&logging.level)));

	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().with_writer(std::io::stderr))
				.init();
		}
	}
}
