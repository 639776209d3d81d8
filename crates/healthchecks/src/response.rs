// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Response verification and decoding shared by the management operations.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;
use tracing::{debug, error, trace};

use crate::error::{HealthchecksError, Result};

/// Sends `request` and returns the body of a successful response.
pub(crate) async fn send_verified(request: RequestBuilder) -> Result<String> {
	let response = send(request).await?;
	let response = verify(response).await?;
	read_body(response).await
}

pub(crate) async fn send(request: RequestBuilder) -> Result<Response> {
	let response = request.send().await.map_err(|e| {
		debug!(error = %e, "Failed to contact healthchecks.io");
		HealthchecksError::Io(e)
	})?;
	debug!(status = %response.status(), url = %response.url(), "Received response");
	Ok(response)
}

/// 401/403 become `Unauthorized`, any other non-2xx `RequestFailed`.
pub(crate) async fn verify(response: Response) -> Result<Response> {
	let status = response.status();
	if is_denied(status) {
		error!(status = status.as_u16(), "Request denied");
		return Err(HealthchecksError::Unauthorized);
	}
	if !status.is_success() {
		let message = failure_message(response).await;
		error!(status = status.as_u16(), message = %message, "Request was not successful");
		return Err(HealthchecksError::RequestFailed {
			status: status.as_u16(),
			message,
		});
	}
	Ok(response)
}

pub(crate) fn is_denied(status: StatusCode) -> bool {
	status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

/// Response body, or the status reason when the body is empty or unreadable.
pub(crate) async fn failure_message(response: Response) -> String {
	let status = response.status();
	let body = response.text().await.unwrap_or_default();
	if body.trim().is_empty() {
		status.canonical_reason().unwrap_or_default().to_string()
	} else {
		body
	}
}

pub(crate) async fn read_body(response: Response) -> Result<String> {
	let body = response.text().await.map_err(|e| {
		error!(error = %e, "Failed to read response body");
		HealthchecksError::Io(e)
	})?;
	trace!(body = %body, "Response body");
	Ok(body)
}

pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
	serde_json::from_str(body).map_err(|e| {
		error!(error = %e, "Failed to parse response");
		HealthchecksError::Parse(e)
	})
}

/// Decodes a list response.
///
/// The server wraps lists in an object, e.g. `{"checks": [...]}`. The first
/// field of that object, in document order, holds the list. A bare array is
/// accepted too.
pub(crate) fn decode_enveloped<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
	let list = match decode::<Value>(body)? {
		Value::Object(fields) => fields.into_iter().next().map(|(_, list)| list).ok_or_else(|| {
			serde_json::Error::custom("response envelope has no fields")
		})?,
		list @ Value::Array(_) => list,
		other => {
			return Err(HealthchecksError::Parse(serde_json::Error::custom(format!(
				"expected a JSON object or array, got {other}"
			))))
		}
	};
	serde_json::from_value(list).map_err(|e| {
		error!(error = %e, "Failed to parse response list");
		HealthchecksError::Parse(e)
	})
}
