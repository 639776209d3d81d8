// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Check types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::wire::timestamp;
use crate::Integration;

/// A monitored job, identified by a UUID (full access) or by a unique key
/// (read-only access).
///
/// Fields marked "server" are filled in by healthchecks.io and are never
/// sent back on create or update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Check {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,

	/// Space-delimited tags.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tags: Option<String>,

	#[serde(rename = "desc", default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,

	/// Grace period in seconds. Zero means "server default" and is not sent.
	#[serde(default, skip_serializing_if = "is_zero")]
	pub grace: u32,

	/// Server: duration of the last start-to-success run, in seconds.
	#[serde(default, skip_serializing)]
	pub last_duration: Option<u32>,

	/// Server
	#[serde(rename = "n_pings", default, skip_serializing)]
	pub ping_count: u64,

	/// Server
	#[serde(default, skip_serializing)]
	pub status: Option<CheckStatus>,

	/// Server
	#[serde(default, deserialize_with = "timestamp::deserialize", skip_serializing)]
	pub last_ping: Option<DateTime<Utc>>,

	/// Server
	#[serde(default, deserialize_with = "timestamp::deserialize", skip_serializing)]
	pub next_ping: Option<DateTime<Utc>>,

	#[serde(default)]
	pub manual_resume: bool,

	/// Allowed ping methods: `""` for any, `"POST"` for POST only.
	#[serde(default)]
	pub methods: String,

	/// Server
	#[serde(default, skip_serializing)]
	pub ping_url: Option<String>,

	/// Server
	#[serde(default, skip_serializing)]
	pub update_url: Option<String>,

	/// Server
	#[serde(default, skip_serializing)]
	pub pause_url: Option<String>,

	/// Comma-delimited integration ids, or `"*"` for all.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub channels: Option<String>,

	/// Cron expression. Mutually exclusive with `timeout` by contract.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub schedule: Option<String>,

	/// IANA timezone for `schedule`.
	#[serde(rename = "tz", default, skip_serializing_if = "Option::is_none")]
	pub timezone: Option<String>,

	/// Expected period in seconds. Zero means unset and is not sent.
	#[serde(default, skip_serializing_if = "is_zero")]
	pub timeout: u32,

	/// Server: identifier handed out to read-only API keys instead of the UUID.
	#[serde(default, skip_serializing)]
	pub unique_key: Option<String>,

	/// Field names the server uses to find an existing check on create
	/// instead of creating a duplicate.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub unique: Option<Vec<String>>,
}

fn is_zero(value: &u32) -> bool {
	*value == 0
}

impl Check {
	/// A check expected every `timeout` seconds.
	pub fn with_interval(name: impl Into<String>, timeout: u32, grace: u32) -> Self {
		Self {
			name: Some(name.into()),
			timeout,
			grace,
			..Default::default()
		}
	}

	/// A check following a cron expression in `timezone`.
	pub fn with_cron(
		name: impl Into<String>,
		schedule: impl Into<String>,
		timezone: impl Into<String>,
		grace: u32,
	) -> Self {
		Self {
			name: Some(name.into()),
			schedule: Some(schedule.into()),
			timezone: Some(timezone.into()),
			grace,
			..Default::default()
		}
	}

	/// True when scheduled by cron expression rather than fixed interval.
	pub fn uses_cron_schedule(&self) -> bool {
		self.schedule.is_some()
	}

	/// True when this check was fetched with a read-only API key.
	pub fn is_read_only(&self) -> bool {
		self.unique_key.is_some() && self.ping_url.is_none()
	}

	/// The UUID, taken from the last segment of the ping URL.
	///
	/// `None` for read-only checks and for checks not yet created.
	pub fn uuid(&self) -> Option<&str> {
		self
			.ping_url
			.as_deref()
			.and_then(|url| url.trim_end_matches('/').rsplit('/').next())
			.filter(|segment| !segment.is_empty())
	}

	/// The unique key when read-only, otherwise the UUID.
	pub fn uuid_or_unique_key(&self) -> Option<&str> {
		if self.is_read_only() {
			self.unique_key.as_deref()
		} else {
			self.uuid()
		}
	}

	/// Tags as a list.
	pub fn tag_list(&self) -> Vec<&str> {
		self
			.tags
			.as_deref()
			.map(|tags| tags.split_whitespace().collect())
			.unwrap_or_default()
	}

	/// True when the integration with `id` is enabled for this check.
	pub fn has_integration(&self, id: &str) -> bool {
		self
			.channels
			.as_deref()
			.map(|channels| channels.split(',').any(|channel| channel.trim() == id))
			.unwrap_or(false)
	}

	/// Same as [`Check::has_integration`], for a listed integration.
	pub fn has_integration_of(&self, integration: &Integration) -> bool {
		self.has_integration(&integration.id)
	}
}

/// Current state of a check as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
	/// Created, never pinged
	New,
	Up,
	/// Late, inside the grace period
	Grace,
	Down,
	Paused,
	/// Received a start signal, waiting for success or failure
	Started,
	/// A state this client does not know about.
	#[serde(other)]
	Unknown,
}

impl fmt::Display for CheckStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::New => write!(f, "new"),
			Self::Up => write!(f, "up"),
			Self::Grace => write!(f, "grace"),
			Self::Down => write!(f, "down"),
			Self::Paused => write!(f, "paused"),
			Self::Started => write!(f, "started"),
			Self::Unknown => write!(f, "unknown"),
		}
	}
}

impl FromStr for CheckStatus {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"new" => Ok(Self::New),
			"up" => Ok(Self::Up),
			"grace" => Ok(Self::Grace),
			"down" => Ok(Self::Down),
			"paused" => Ok(Self::Paused),
			"started" => Ok(Self::Started),
			_ => Err(format!("unknown check status: {}", s)),
		}
	}
}
