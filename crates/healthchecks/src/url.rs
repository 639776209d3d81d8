// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Validation of user-supplied host URLs.

use url::Url;

use crate::error::{HealthchecksError, Result};

/// Validates `raw` and rebuilds it as `scheme://host[:port]path`.
///
/// Surrounding whitespace is ignored. Port and path are kept exactly as
/// written, including a default port such as `:443` and dot segments. Query
/// and fragment are dropped.
///
/// # Examples
/// - `http://localhost` -> `http://localhost`
/// - `https://some.domain.com:8080/healthchecks` -> unchanged
/// - `http://` and `""` -> [`HealthchecksError::InvalidHost`]
pub fn normalize(raw: &str) -> Result<String> {
	let trimmed = raw.trim();
	let url = Url::parse(trimmed).map_err(|e| invalid(raw, e.to_string()))?;

	let host = url
		.host_str()
		.filter(|host| !host.is_empty())
		.ok_or_else(|| invalid(raw, "no host specified"))?;

	let (authority, path) = split_authority(trimmed);
	let port = if names_port(authority) {
		url.port_or_known_default()
	} else {
		None
	};

	Ok(match port {
		Some(port) => format!("{}://{}:{}{}", url.scheme(), host, port, path),
		None => format!("{}://{}{}", url.scheme(), host, path),
	})
}

fn invalid(raw: &str, reason: impl Into<String>) -> HealthchecksError {
	HealthchecksError::InvalidHost {
		url: raw.to_string(),
		reason: reason.into(),
	}
}

/// Splits the input after the scheme into its authority and its path as
/// written. The path is empty when the input names none.
fn split_authority(raw: &str) -> (&str, &str) {
	let rest = raw.split_once("://").map_or(raw, |(_, rest)| rest);
	let authority_end = rest
		.find(|c| matches!(c, '/' | '?' | '#'))
		.unwrap_or(rest.len());
	let (authority, tail) = rest.split_at(authority_end);
	let path_end = tail.find(|c| matches!(c, '?' | '#')).unwrap_or(tail.len());
	(authority, &tail[..path_end])
}

/// True when the authority ends in `:<digits>`, ignoring IPv6 brackets.
fn names_port(authority: &str) -> bool {
	let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
	let after_host = host_port.rsplit_once(']').map_or(host_port, |(_, tail)| tail);
	after_host
		.rsplit_once(':')
		.is_some_and(|(_, port)| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
}
