// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent header.

use healthchecks_common_version::BuildInfo;
use reqwest::{Client, ClientBuilder};

/// Creates a new HTTP client builder with the User-Agent derived from `info`.
///
/// # Example
/// ```ignore
/// let client = healthchecks_common_http::builder(&BuildInfo::current())
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder(info: &BuildInfo) -> ClientBuilder {
	builder_with_user_agent(user_agent(info))
}

/// Creates a new HTTP client builder with a custom User-Agent header.
pub fn builder_with_user_agent(user_agent: impl Into<String>) -> ClientBuilder {
	Client::builder().user_agent(user_agent.into())
}

/// Returns the User-Agent string for the given build.
///
/// Format: `{name}/{version}`
/// Example: `healthchecks-rust/0.1.0`
pub fn user_agent(info: &BuildInfo) -> String {
	format!("{}/{}", info.name, info.version)
}
