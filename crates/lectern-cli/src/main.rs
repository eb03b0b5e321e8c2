// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod args;
mod logging;
mod plan;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use lectern_api::MediaClient;
use lectern_config::{load_config, DEFAULT_CONFIG_TEMPLATE};
use lectern_provisioning::Orchestrator;
use tracing::{info, warn};

use args::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	if args.print_default_config {
		print!("{DEFAULT_CONFIG_TEMPLATE}");
		return Ok(());
	}

	let bootstrap = logging::bootstrap_subscriber(logging::bootstrap_filter(), std::io::stderr);
	let config = tracing::subscriber::with_default(bootstrap, || load_config(args.overrides()))
		.context("failed to load configuration")?;
	logging::init(&config.logging);

	let client = MediaClient::with_timeout(&config.server.base_url, config.server.timeout)
		.context("failed to build media service client")?
		.with_retry_config(config.retry.clone());

	info!(
		base_url = %client.base_url(),
		timeout_secs = config.server.timeout.as_secs(),
		"starting provisioning run"
	);

	let orchestrator = Orchestrator::new(Arc::new(client), config.credential.clone());
	let report = orchestrator.run(&plan::from_config(&config.plan)).await;

	print!("{report}");

	if !report.all_succeeded() {
		warn!("provisioning did not complete");
		if args.strict {
			std::process::exit(1);
		}
	}

	Ok(())
}
