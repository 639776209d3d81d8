// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use healthchecks_common_version::BuildInfo;
use reqwest::Client;

use crate::error::Result;

/// Settings shared by the pinging and management clients.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
	/// Identifies this library (or the embedding application) in the
	/// `User-Agent` header.
	pub build_info: BuildInfo,
	/// Use this client instead of building one. Its own User-Agent and
	/// timeouts then apply.
	pub http_client: Option<Client>,
}

impl ClientConfig {
	pub(crate) fn http_client(&self) -> Result<Client> {
		match &self.http_client {
			Some(client) => Ok(client.clone()),
			None => Ok(healthchecks_common_http::builder(&self.build_info).build()?),
		}
	}
}
