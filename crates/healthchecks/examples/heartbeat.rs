// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Example: wrap a job in start and exit-code signals.
//!
//! Run with:
//!   HEALTHCHECKS_UUID=... cargo run --example heartbeat -p healthchecks
//!
//! Set `RUST_LOG=healthchecks=debug` to see the requests.

use std::process::Command;

use healthchecks::PingClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(filter).init();

	let uuid = std::env::var("HEALTHCHECKS_UUID")
		.expect("HEALTHCHECKS_UUID environment variable required");
	let host = std::env::var("HEALTHCHECKS_PING_HOST")
		.unwrap_or_else(|_| healthchecks::DEFAULT_PING_HOST.to_string());

	let pings = PingClient::builder().host(host).uuid(uuid).build()?;
	println!("Pinging {}", pings.check_url());

	// Fire and forget; the request runs while the job does.
	let started = pings.start(None);

	let output = Command::new("uname").arg("-a").output()?;
	let code = output.status.code().unwrap_or(1);
	let log = String::from_utf8_lossy(&output.stdout);

	started.await?;
	let response = pings.exit_code(code, Some(&log))?.await?;
	println!("Reported exit code {} ({})", code, response.status());

	Ok(())
}
