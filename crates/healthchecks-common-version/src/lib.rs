// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Build and version information for the healthchecks.io client crates.
//!
//! [`BuildInfo`] is a plain value. Clients receive it through their
//! configuration instead of reading it from a process-wide lookup, so tests
//! and embedding applications can substitute their own.

shadow_rs::shadow!(build);

#[cfg(feature = "serde")]
use serde::Serialize;

/// SDK name reported to the server in the `User-Agent` header.
pub const SDK_NAME: &str = "healthchecks-rust";

/// Project home, reported alongside the version.
pub const REPOSITORY: &str = env!("CARGO_PKG_REPOSITORY");

/// Placeholder for values the build did not provide.
pub const UNKNOWN: &str = "unknown";

/// Platform string in `{os}-{arch}` format, e.g. "linux-x86_64".
///
/// Derived at compile time from target configuration.
pub const PLATFORM: &str = env!("HEALTHCHECKS_PLATFORM");

/// Build information attached to every outgoing request.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
	pub name: &'static str,
	pub version: &'static str,
	pub git_sha: &'static str,
	pub build_timestamp: &'static str,
	pub platform: &'static str,
	pub repository: &'static str,
}

impl BuildInfo {
	/// Get the current build information (compile-time constants).
	#[allow(clippy::const_is_empty)]
	pub const fn current() -> Self {
		Self {
			name: SDK_NAME,
			version: or_unknown(build::PKG_VERSION),
			git_sha: or_unknown(build::SHORT_COMMIT),
			build_timestamp: or_unknown(build::BUILD_TIME),
			platform: PLATFORM,
			repository: REPOSITORY,
		}
	}

	/// Replaces the SDK name, for applications that wrap this library and
	/// want their own product name in server logs.
	pub const fn with_name(mut self, name: &'static str) -> Self {
		self.name = name;
		self
	}

	/// Returns true when every field was filled in by the build.
	pub fn is_complete(&self) -> bool {
		[
			self.name,
			self.version,
			self.git_sha,
			self.build_timestamp,
			self.platform,
			self.repository,
		]
		.iter()
		.all(|value| *value != UNKNOWN)
	}
}

impl Default for BuildInfo {
	fn default() -> Self {
		Self::current()
	}
}

#[allow(clippy::const_is_empty)]
const fn or_unknown(value: &'static str) -> &'static str {
	if value.is_empty() {
		UNKNOWN
	} else {
		value
	}
}
