// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Management API client.

use std::fmt;
use std::sync::Arc;

use healthchecks_common_http::RequestSpec;
use healthchecks_common_version::BuildInfo;
use healthchecks_core::{Check, FlipWindow, Integration, Ping, StatusFlip};
use reqwest::{Client, Method, StatusCode};
use tracing::{debug, error, info, Instrument};

use crate::config::ClientConfig;
use crate::error::{HealthchecksError, Result};
use crate::response;
use crate::ResponseFuture;

/// Hosted management API.
pub const DEFAULT_MANAGEMENT_HOST: &str = "https://healthchecks.io";

const API_PATH: &str = "api/v1";

/// Builder for constructing a [`ManagementClient`].
pub struct ManagementClientBuilder {
	api_key: Option<String>,
	host: Option<String>,
	config: ClientConfig,
}

impl ManagementClientBuilder {
	/// Creates a new builder with default settings.
	pub fn new() -> Self {
		Self {
			api_key: None,
			host: None,
			config: ClientConfig::default(),
		}
	}

	/// Sets the project API key, full-access or read-only.
	pub fn api_key(mut self, key: impl Into<String>) -> Self {
		self.api_key = Some(key.into());
		self
	}

	/// Sets a self-hosted instance.
	///
	/// Example: `https://hc.example.com`
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

	/// Builds the ManagementClient.
	pub fn build(self) -> Result<ManagementClient> {
		let api_key = self
			.api_key
			.filter(|key| !key.trim().is_empty())
			.ok_or_else(|| HealthchecksError::InvalidArgument("an API key is required".into()))?;

		let host = match self.host.as_deref().map(str::trim) {
			None | Some(DEFAULT_MANAGEMENT_HOST) => DEFAULT_MANAGEMENT_HOST.to_string(),
			Some(custom) => crate::url::normalize(custom)?,
		};
		let separator = if host.ends_with('/') { "" } else { "/" };
		let base_url = format!("{host}{separator}{API_PATH}");
		let http_client = self.config.http_client()?;

		info!(base_url = %base_url, "Management client initialized");

		Ok(ManagementClient {
			inner: Arc::new(ManagementClientInner {
				api_key,
				base_url,
				http_client,
			}),
		})
	}
}

impl Default for ManagementClientBuilder {
	fn default() -> Self {
		Self::new()
	}
}

struct ManagementClientInner {
	api_key: String,
	base_url: String,
	http_client: Client,
}

/// Client for the management API (`/api/v1`).
///
/// Operations return a [`ResponseFuture`] that is already running. Those that
/// need write access to a [`Check`] also check locally that it was not
/// fetched with a read-only key and fail with
/// [`HealthchecksError::Unauthorized`] before sending anything.
///
/// # Example
///
/// ```ignore
/// use healthchecks::{Check, ManagementClient};
///
/// let api = ManagementClient::new("your_api_key")?;
///
/// let created = api.create_check(&Check::with_interval("backup", 86_400, 3_600))?.await?;
/// let prod = api.get_existing_checks(["prod", "db"]).await?;
/// api.pause_check_for(&created)?.await?;
/// ```
#[derive(Clone)]
pub struct ManagementClient {
	inner: Arc<ManagementClientInner>,
}

impl ManagementClient {
	/// Creates a new builder for constructing a ManagementClient.
	pub fn builder() -> ManagementClientBuilder {
		ManagementClientBuilder::new()
	}

	/// Uses `api_key` against the hosted service.
	pub fn new(api_key: impl Into<String>) -> Result<Self> {
		Self::builder().api_key(api_key).build()
	}

	/// `{host}/api/v1`
	pub fn base_url(&self) -> &str {
		&self.inner.base_url
	}

	/// Fetches one check by UUID or, with a read-only key, by unique key.
	pub fn get_check(&self, key: &str) -> ResponseFuture<Check> {
		self.call("get_check", self.api(format!("/checks/{key}")), response::decode)
	}

	/// Re-fetches `check` using whichever identifier it carries.
	pub fn get_check_for(&self, check: &Check) -> Result<ResponseFuture<Check>> {
		Ok(self.get_check(any_key(check)?))
	}

	/// Finds a check by exact name.
	///
	/// There is no server-side filter; this lists every check and scans it.
	pub fn get_check_by_name(&self, name: &str) -> ResponseFuture<Option<Check>> {
		let name = name.to_string();
		self.call(
			"get_check_by_name",
			self.list_checks_spec(Vec::<String>::new()),
			move |body| {
				let checks: Vec<Check> = response::decode_enveloped(body)?;
				Ok(checks
					.into_iter()
					.find(|check| check.name.as_deref() == Some(name.as_str())))
			},
		)
	}

	/// Lists checks carrying every one of `tags`.
	pub fn get_existing_checks<I, S>(&self, tags: I) -> ResponseFuture<Vec<Check>>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.call(
			"get_existing_checks",
			self.list_checks_spec(tags),
			response::decode_enveloped,
		)
	}

	/// Creates a check and returns it with its server-assigned UUID and URLs.
	///
	/// Anything but `201 Created` is reported as
	/// [`HealthchecksError::InvalidArgument`].
	pub fn create_check(&self, check: &Check) -> Result<ResponseFuture<Check>> {
		self.post_new_check("create_check", check, &[StatusCode::CREATED])
	}

	/// Creates a check unless one matching its `unique` fields exists, and
	/// returns whichever the server settled on.
	///
	/// `201 Created` and `200 OK` (existing match) both succeed. Fails
	/// locally with [`HealthchecksError::InvalidArgument`] when `unique` is
	/// unset or empty.
	pub fn upsert_check(&self, check: &Check) -> Result<ResponseFuture<Check>> {
		if !check.unique.as_ref().is_some_and(|fields| !fields.is_empty()) {
			return Err(HealthchecksError::InvalidArgument(
				"upsert needs at least one field in `unique`".into(),
			));
		}
		self.post_new_check("upsert_check", check, &[StatusCode::CREATED, StatusCode::OK])
	}

	fn post_new_check(
		&self,
		operation: &'static str,
		check: &Check,
		accepted: &'static [StatusCode],
	) -> Result<ResponseFuture<Check>> {
		if check.is_read_only() {
			return Err(HealthchecksError::Unauthorized);
		}
		let spec = self.api("/checks/").json_body(serde_json::to_string(check)?);
		let request = spec.into_request(&self.inner.http_client);

		let work = async move {
			let reply = response::send(request).await?;
			let status = reply.status();
			if response::is_denied(status) {
				error!(status = status.as_u16(), "Request denied");
				return Err(HealthchecksError::Unauthorized);
			}
			if !accepted.contains(&status) {
				let message = response::failure_message(reply).await;
				error!(status = status.as_u16(), message = %message, "Check was not created");
				return Err(HealthchecksError::InvalidArgument(format!(
					"healthchecks.io did not create the check ({}): {}",
					status.as_u16(),
					message
				)));
			}
			let body = response::read_body(reply).await?;
			response::decode(&body)
		};
		Ok(ResponseFuture::spawn(
			work.instrument(tracing::debug_span!("healthchecks_api", operation)),
		))
	}

	/// Sends the writable fields of `check` to the server.
	pub fn update_check(&self, check: &Check) -> Result<ResponseFuture<Check>> {
		let uuid = writable_uuid(check)?;
		let spec = self
			.api(format!("/checks/{uuid}"))
			.json_body(serde_json::to_string(check)?);
		Ok(self.call("update_check", spec, response::decode))
	}

	/// Pauses monitoring until the next ping.
	pub fn pause_check(&self, uuid: &str) -> ResponseFuture<Check> {
		self.call(
			"pause_check",
			self.api(format!("/checks/{uuid}/pause")).text_body(""),
			response::decode,
		)
	}

	pub fn pause_check_for(&self, check: &Check) -> Result<ResponseFuture<Check>> {
		Ok(self.pause_check(writable_uuid(check)?))
	}

	/// Deletes a check and returns its last state.
	pub fn delete_check(&self, uuid: &str) -> ResponseFuture<Check> {
		self.call(
			"delete_check",
			self.api(format!("/checks/{uuid}")).method(Method::DELETE),
			response::decode,
		)
	}

	pub fn delete_check_for(&self, check: &Check) -> Result<ResponseFuture<Check>> {
		Ok(self.delete_check(writable_uuid(check)?))
	}

	/// Lists the pings the server logged for a check.
	pub fn get_pings(&self, uuid: &str) -> ResponseFuture<Vec<Ping>> {
		self.call(
			"get_pings",
			self.api(format!("/checks/{uuid}/pings")),
			response::decode_enveloped,
		)
	}

	pub fn get_pings_for(&self, check: &Check) -> Result<ResponseFuture<Vec<Ping>>> {
		Ok(self.get_pings(writable_uuid(check)?))
	}

	/// Lists up/down transitions within `window`.
	pub fn get_flips(&self, key: &str, window: FlipWindow) -> ResponseFuture<Vec<StatusFlip>> {
		let spec = self
			.api(format!("/checks/{key}/flips"))
			.query_pairs(window.query_pairs());
		self.call("get_flips", spec, response::decode_enveloped)
	}

	pub fn get_flips_for(
		&self,
		check: &Check,
		window: FlipWindow,
	) -> Result<ResponseFuture<Vec<StatusFlip>>> {
		Ok(self.get_flips(any_key(check)?, window))
	}

	/// Lists notification channels. Not available to read-only keys.
	pub fn get_channels(&self) -> ResponseFuture<Vec<Integration>> {
		self.call("get_channels", self.api("/channels"), response::decode_enveloped)
	}

	/// Request against the API root carrying the key.
	pub(crate) fn api(&self, path: impl Into<String>) -> RequestSpec {
		RequestSpec::new(self.inner.base_url.as_str(), path).api_key(self.inner.api_key.as_str())
	}

	pub(crate) fn list_checks_spec<I, S>(&self, tags: I) -> RequestSpec
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self
			.api("/checks")
			.query_pairs(tags.into_iter().map(|tag| ("tag", tag)))
	}

	/// Sends `spec`, verifies the status and decodes the body with `decode`.
	fn call<T, D>(&self, operation: &'static str, spec: RequestSpec, decode: D) -> ResponseFuture<T>
	where
		T: Send + 'static,
		D: FnOnce(&str) -> Result<T> + Send + 'static,
	{
		let request = spec.into_request(&self.inner.http_client);
		let span = tracing::debug_span!("healthchecks_api", operation);
		ResponseFuture::spawn(
			async move {
				let body = response::send_verified(request).await?;
				decode(&body)
			}
			.instrument(span),
		)
	}
}

impl fmt::Debug for ManagementClient {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ManagementClient")
			.field("base_url", &self.inner.base_url)
			.field("api_key", &"[REDACTED]")
			.finish()
	}
}

/// The UUID of a check that may be written to.
fn writable_uuid(check: &Check) -> Result<&str> {
	match check.uuid() {
		Some(uuid) if !check.is_read_only() => Ok(uuid),
		_ => {
			debug!(name = ?check.name, "Refusing write access to a read-only check");
			Err(HealthchecksError::Unauthorized)
		}
	}
}

/// Whichever identifier the check carries.
fn any_key(check: &Check) -> Result<&str> {
	check.uuid_or_unique_key().ok_or_else(|| {
		HealthchecksError::InvalidArgument("check has neither a UUID nor a unique key".into())
	})
}
