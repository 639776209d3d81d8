// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Heartbeat client for a single check.

use std::fmt;
use std::sync::Arc;

use healthchecks_common_http::RequestSpec;
use healthchecks_common_version::BuildInfo;
use healthchecks_core::Check;
use reqwest::{Client, Response};
use tracing::{debug, info, Instrument};

use crate::config::ClientConfig;
use crate::error::{HealthchecksError, Result};
use crate::response;
use crate::ResponseFuture;

/// Public ping endpoint.
pub const DEFAULT_PING_HOST: &str = "https://hc-ping.com/";

/// Builder for constructing a [`PingClient`].
pub struct PingClientBuilder {
	host: Option<String>,
	uuid: Option<String>,
	config: ClientConfig,
}

impl PingClientBuilder {
	/// Creates a new builder with default settings.
	pub fn new() -> Self {
		Self {
			host: None,
			uuid: None,
			config: ClientConfig::default(),
		}
	}

	/// Sets the UUID of the check to ping.
	pub fn uuid(mut self, uuid: impl Into<String>) -> Self {
		self.uuid = Some(uuid.into());
		self
	}

	/// Sets a self-hosted ping endpoint.
	///
	/// Example: `https://hc.example.com/ping`
	pub fn host(mut self, host: impl Into<String>) -> Self {
		self.host = Some(host.into());
		self
	}

	/// Sets the build information reported in the `User-Agent`.
	pub fn build_info(mut self, info: BuildInfo) -> Self {
		self.config.build_info = info;
		self
	}

	/// Replaces the whole shared configuration.
	pub fn config(mut self, config: ClientConfig) -> Self {
		self.config = config;
		self
	}

	/// Uses an existing HTTP client.
	pub fn http_client(mut self, client: Client) -> Self {
		self.config.http_client = Some(client);
		self
	}

	/// Builds the PingClient.
	pub fn build(self) -> Result<PingClient> {
		let uuid = self
			.uuid
			.map(|uuid| uuid.trim().to_string())
			.filter(|uuid| !uuid.is_empty())
			.ok_or_else(|| HealthchecksError::InvalidArgument("a check UUID is required".into()))?;

		let host = match self.host.as_deref().map(str::trim) {
			None | Some(DEFAULT_PING_HOST) => DEFAULT_PING_HOST.to_string(),
			Some(custom) => crate::url::normalize(custom)?,
		};
		let check_url = format!("{}/{}", host.trim_end_matches('/'), uuid);
		let http_client = self.config.http_client()?;

		info!(host = %host, "Ping client initialized");

		Ok(PingClient {
			inner: Arc::new(PingClientInner {
				host,
				uuid,
				check_url,
				http_client,
			}),
		})
	}
}

impl Default for PingClientBuilder {
	fn default() -> Self {
		Self::new()
	}
}

struct PingClientInner {
	host: String,
	uuid: String,
	check_url: String,
	http_client: Client,
}

/// Sends start, success, fail and exit-code signals for one check.
///
/// Every call returns at once with a [`ResponseFuture`]; the request is
/// already on its way. The raw HTTP response is handed back unexamined.
///
/// # Example
///
/// ```ignore
/// use healthchecks::PingClient;
///
/// let pings = PingClient::new("662ebe36-ecab-48db-afe3-e20029cb71e6")?;
///
/// pings.start(None).await?;
/// let outcome = run_backup();
/// pings.exit_code(outcome.code(), Some(&outcome.log()))?.await?;
/// ```
#[derive(Clone)]
pub struct PingClient {
	inner: Arc<PingClientInner>,
}

impl PingClient {
	/// Creates a new builder for constructing a PingClient.
	pub fn builder() -> PingClientBuilder {
		PingClientBuilder::new()
	}

	/// Pings `uuid` on the public endpoint.
	pub fn new(uuid: impl Into<String>) -> Result<Self> {
		Self::builder().uuid(uuid).build()
	}

	/// Pings the check through its server-issued ping URL.
	///
	/// Read-only checks have no ping URL and are refused.
	pub fn for_check(check: &Check) -> Result<Self> {
		if check.is_read_only() {
			return Err(HealthchecksError::Unauthorized);
		}
		let ping_url = check.ping_url.as_deref().ok_or(HealthchecksError::Unauthorized)?;
		let (host, uuid) = ping_url
			.trim_end_matches('/')
			.rsplit_once('/')
			.ok_or_else(|| HealthchecksError::InvalidHost {
				url: ping_url.to_string(),
				reason: "ping URL has no path".into(),
			})?;

		Self::builder().host(host).uuid(uuid).build()
	}

	pub fn uuid(&self) -> &str {
		&self.inner.uuid
	}

	pub fn host(&self) -> &str {
		&self.inner.host
	}

	/// URL of the success signal; other signals append to it.
	pub fn check_url(&self) -> &str {
		&self.inner.check_url
	}

	/// Signals that the job has started.
	pub fn start(&self, body: Option<&str>) -> ResponseFuture<Response> {
		self.signal(Signal::Start, body)
	}

	/// Signals that the job finished successfully.
	pub fn success(&self, body: Option<&str>) -> ResponseFuture<Response> {
		self.signal(Signal::Success, body)
	}

	/// Signals that the job failed.
	pub fn fail(&self, body: Option<&str>) -> ResponseFuture<Response> {
		self.signal(Signal::Fail, body)
	}

	/// Reports a process exit code; zero is success, anything else failure.
	///
	/// Fails before sending anything when `code` is outside `0..=255`.
	pub fn exit_code(&self, code: i32, body: Option<&str>) -> Result<ResponseFuture<Response>> {
		let code = u8::try_from(code).map_err(|_| {
			HealthchecksError::InvalidArgument(format!(
				"only values from 0 to 255 are valid exit codes, got {code}"
			))
		})?;
		Ok(self.signal(Signal::ExitCode(code), body))
	}

	/// Describes the request a signal would send, without sending it.
	pub(crate) fn request_spec(&self, signal: Signal, body: Option<&str>) -> RequestSpec {
		let spec = RequestSpec::new(self.inner.check_url.as_str(), signal.path());
		match body.filter(|body| !body.is_empty()) {
			Some(body) => spec.text_body(body),
			None => spec,
		}
	}

	fn signal(&self, signal: Signal, body: Option<&str>) -> ResponseFuture<Response> {
		let spec = self.request_spec(signal, body);
		debug!(
			signal = %signal,
			host = %self.inner.host,
			has_body = spec.body().is_some(),
			"Sending signal"
		);

		let request = spec.into_request(&self.inner.http_client);
		let span = tracing::debug_span!("healthchecks_ping", signal = %signal);
		ResponseFuture::spawn(async move { response::send(request).await }.instrument(span))
	}
}

impl fmt::Debug for PingClient {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PingClient")
			.field("host", &self.inner.host)
			.field("uuid", &self.inner.uuid)
			.finish()
	}
}

/// A heartbeat kind and its path below the check URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Signal {
	Success,
	Fail,
	Start,
	ExitCode(u8),
}

impl Signal {
	pub(crate) fn path(&self) -> String {
		match self {
			Self::Success => String::new(),
			Self::Fail => "/fail".to_string(),
			Self::Start => "/start".to_string(),
			Self::ExitCode(code) => format!("/{code}"),
		}
	}
}

impl fmt::Display for Signal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Success => write!(f, "success"),
			Self::Fail => write!(f, "fail"),
			Self::Start => write!(f, "start"),
			Self::ExitCode(code) => write!(f, "exit-code {code}"),
		}
	}
}
