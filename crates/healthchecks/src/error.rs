// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the healthchecks.io client.

use healthchecks_common_http::RequestAborted;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, HealthchecksError>;

/// Errors that can occur when talking to healthchecks.io.
///
/// Nothing is retried by this crate; match on the variant to decide.
#[derive(Debug, Error)]
pub enum HealthchecksError {
	/// The base URL could not be parsed or names no host.
	#[error("invalid host URL {url:?}: {reason}")]
	InvalidHost {
		/// The URL as given.
		url: String,
		/// Why it was rejected.
		reason: String,
	},

	/// An argument was out of range, or the server refused to create a check.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// The API key may not perform this operation, or the check was fetched
	/// with a read-only key.
	#[error("healthchecks.io denied the request; is the API key invalid or read-only?")]
	Unauthorized,

	/// The server answered with a non-success status.
	#[error("request failed (status {status}): {message}")]
	RequestFailed {
		/// HTTP status code.
		status: u16,
		/// Response body, or the status reason when the body was empty.
		message: String,
	},

	/// Connection, timeout or body-read failure.
	#[error("HTTP request failed: {0}")]
	Io(#[from] reqwest::Error),

	/// The response body was not the expected JSON.
	#[error("failed to parse response: {0}")]
	Parse(#[from] serde_json::Error),

	/// The task driving the request went away without a result.
	#[error(transparent)]
	Aborted(#[from] RequestAborted),
}

impl HealthchecksError {
	pub fn is_unauthorized(&self) -> bool {
		matches!(self, Self::Unauthorized)
	}

	/// HTTP status of a failed request, if the server answered at all.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::RequestFailed { status, .. } => Some(*status),
			Self::Io(e) => e.status().map(|s| s.as_u16()),
			_ => None,
		}
	}
}
