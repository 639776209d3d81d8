// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Transport-independent description of an outgoing request.
//!
//! A [`RequestSpec`] is plain data: building one never touches the network.
//! [`RequestSpec::into_request`] turns it into a `reqwest` request builder
//! bound to a client.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder};
use tracing::debug;
use url::form_urlencoded;

/// Header carrying the management API key.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Content type for heartbeat bodies and other free-form text.
pub const TEXT_PLAIN: &str = "text/plain";

/// Content type for serialized resources.
pub const APPLICATION_JSON: &str = "application/json";

/// Request payload together with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
	Text(String),
	Json(String),
}

impl RequestBody {
	pub fn content_type(&self) -> &'static str {
		match self {
			Self::Text(_) => TEXT_PLAIN,
			Self::Json(_) => APPLICATION_JSON,
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			Self::Text(body) | Self::Json(body) => body,
		}
	}
}

/// A fully specified request: method, URL, headers and optional body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
	base_url: String,
	path: String,
	api_key: Option<String>,
	query: Vec<(String, String)>,
	body: Option<RequestBody>,
	method: Option<Method>,
}

impl RequestSpec {
	/// Starts a request for `path` relative to `base_url`.
	///
	/// The two parts are concatenated as-is; callers own the slashes.
	pub fn new(base_url: impl Into<String>, path: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			path: path.into(),
			api_key: None,
			query: Vec::new(),
			body: None,
			method: None,
		}
	}

	/// Attaches the `X-Api-Key` header.
	pub fn api_key(mut self, key: impl Into<String>) -> Self {
		self.api_key = Some(key.into());
		self
	}

	/// Appends one query parameter. Order of calls is preserved.
	pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((key.into(), value.into()));
		self
	}

	/// Appends several query parameters in iteration order.
	pub fn query_pairs<I, K, V>(mut self, pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self
			.query
			.extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
		self
	}

	/// Attaches a `text/plain` body. An empty string still counts as a body.
	pub fn text_body(mut self, body: impl Into<String>) -> Self {
		self.body = Some(RequestBody::Text(body.into()));
		self
	}

	/// Attaches an `application/json` body that has already been serialized.
	pub fn json_body(mut self, body: impl Into<String>) -> Self {
		self.body = Some(RequestBody::Json(body.into()));
		self
	}

	/// Overrides the method that would otherwise follow from the body.
	pub fn method(mut self, method: Method) -> Self {
		self.method = Some(method);
		self
	}

	/// GET without a body, POST with one, unless overridden.
	pub fn http_method(&self) -> Method {
		match (&self.method, &self.body) {
			(Some(method), _) => method.clone(),
			(None, Some(_)) => Method::POST,
			(None, None) => Method::GET,
		}
	}

	/// Full URL including the query string.
	pub fn url(&self) -> String {
		let mut url = format!("{}{}", self.base_url, self.path);
		if self.query.is_empty() {
			return url;
		}

		if !url.ends_with('?') {
			url.push('?');
		}
		let query = self
			.query
			.iter()
			.map(|(key, value)| format!("{}={}", encode(key), encode(value)))
			.collect::<Vec<_>>()
			.join("&");
		url.push_str(&query);
		url
	}

	pub fn api_key_value(&self) -> Option<&str> {
		self.api_key.as_deref()
	}

	pub fn body(&self) -> Option<&RequestBody> {
		self.body.as_ref()
	}

	/// Binds this description to `client`, ready to be sent.
	pub fn into_request(self, client: &Client) -> RequestBuilder {
		let method = self.http_method();
		let url = self.url();

		debug!(
			url = %url,
			method = %method,
			has_body = self.body.is_some(),
			"Sending request"
		);

		let mut request = client.request(method, url);
		if let Some(key) = self.api_key {
			request = request.header(API_KEY_HEADER, key);
		}
		if let Some(body) = self.body {
			request = request.header(CONTENT_TYPE, body.content_type());
			request = match body {
				RequestBody::Text(text) | RequestBody::Json(text) => request.body(text),
			};
		}
		request
	}
}

fn encode(value: &str) -> String {
	form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	const BASE: &str = "https://healthchecks.io/api/v1";

	#[test]
	fn get_without_body() {
		let spec = RequestSpec::new(BASE, "/checks");
		assert_eq!(spec.http_method(), Method::GET);
		assert_eq!(spec.url(), "https://healthchecks.io/api/v1/checks");
		assert!(spec.body().is_none());
	}

	#[test]
	fn post_with_body() {
		let spec = RequestSpec::new(BASE, "/checks/abc/pause").text_body("");
		assert_eq!(spec.http_method(), Method::POST);
		assert_eq!(spec.body(), Some(&RequestBody::Text(String::new())));
	}

	#[test]
	fn method_override_wins() {
		let spec = RequestSpec::new(BASE, "/checks/abc").method(Method::DELETE);
		assert_eq!(spec.http_method(), Method::DELETE);
	}

	#[test]
	fn query_parameters_keep_order() {
		let spec = RequestSpec::new(BASE, "/checks")
			.query("tag", "prod")
			.query("tag", "db");
		assert_eq!(spec.url(), format!("{BASE}/checks?tag=prod&tag=db"));
	}

	#[test]
	fn single_question_mark_when_path_ends_with_one() {
		let spec = RequestSpec::new(BASE, "/checks/abc/flips?").query_pairs([
			("start", "1600000000"),
			("end", "1600003600"),
		]);
		assert_eq!(
			spec.url(),
			format!("{BASE}/checks/abc/flips?start=1600000000&end=1600003600")
		);
	}

	#[test]
	fn query_values_are_encoded() {
		let spec = RequestSpec::new(BASE, "/checks").query("tag", "a&b c");
		assert_eq!(spec.url(), format!("{BASE}/checks?tag=a%26b+c"));
	}

	#[test]
	fn api_key_is_optional() {
		assert_eq!(RequestSpec::new(BASE, "").api_key_value(), None);
		assert_eq!(
			RequestSpec::new(BASE, "").api_key("secret").api_key_value(),
			Some("secret")
		);
	}

	#[test]
	fn body_content_types() {
		assert_eq!(RequestBody::Text("x".into()).content_type(), TEXT_PLAIN);
		assert_eq!(RequestBody::Json("{}".into()).content_type(), APPLICATION_JSON);
	}

	#[test]
	fn into_request_sets_headers_and_body() {
		let client = Client::new();
		let request = RequestSpec::new(BASE, "/checks/")
			.api_key("secret")
			.json_body(r#"{"name":"backup"}"#)
			.into_request(&client)
			.build()
			.unwrap();

		assert_eq!(request.method(), Method::POST);
		assert_eq!(request.url().as_str(), "https://healthchecks.io/api/v1/checks/");
		assert_eq!(request.headers()[API_KEY_HEADER], "secret");
		assert_eq!(request.headers()[CONTENT_TYPE], APPLICATION_JSON);
		let body = request.body().and_then(|b| b.as_bytes()).unwrap();
		assert_eq!(body, br#"{"name":"backup"}"#);
	}

	#[test]
	fn into_request_without_key_has_no_key_header() {
		let client = Client::new();
		let request = RequestSpec::new("https://hc-ping.com/", "abc/fail")
			.into_request(&client)
			.build()
			.unwrap();

		assert_eq!(request.method(), Method::GET);
		assert!(request.headers().get(API_KEY_HEADER).is_none());
		assert!(request.body().is_none());
	}

	proptest! {
		#[test]
		fn no_query_means_no_question_mark(path in "/[a-z]{0,12}") {
			let spec = RequestSpec::new(BASE, path.clone());
			prop_assert_eq!(spec.url(), format!("{BASE}{path}"));
		}

		#[test]
		fn every_pair_appears_once(values in proptest::collection::vec("[a-z0-9]{1,8}", 1..6)) {
			let spec = RequestSpec::new(BASE, "/checks")
				.query_pairs(values.iter().map(|v| ("tag", v.as_str())));
			let url = spec.url();
			prop_assert_eq!(url.matches('?').count(), 1);
			let query = url.split_once('?').unwrap().1;
			let expected: Vec<String> = values.iter().map(|v| format!("tag={v}")).collect();
			prop_assert_eq!(query, expected.join("&"));
		}
	}
}
