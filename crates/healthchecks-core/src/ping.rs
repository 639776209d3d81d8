// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ping records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::wire::timestamp;

/// One heartbeat as logged by the server. Only visible with a full-access key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ping {
	#[serde(rename = "type")]
	pub kind: PingKind,

	/// Millisecond precision.
	#[serde(rename = "date", default, deserialize_with = "timestamp::deserialize")]
	pub timestamp: Option<DateTime<Utc>>,

	/// Sequence number of this ping for its check.
	#[serde(rename = "n", default)]
	pub index: u64,

	/// "http", "https" or "email".
	#[serde(default)]
	pub scheme: String,

	#[serde(rename = "remote_addr", default)]
	pub remote_address: String,

	#[serde(default)]
	pub method: String,

	#[serde(rename = "ua", default)]
	pub user_agent: String,

	/// Seconds since the matching start signal, when there was one.
	#[serde(default)]
	pub duration: Option<f64>,
}

/// Kind of signal a ping carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PingKind {
	Start,
	Success,
	Fail,
	Log,
	/// Ignored by the server, e.g. a disallowed method.
	Ign,
	#[serde(other)]
	Unknown,
}

impl fmt::Display for PingKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Start => write!(f, "start"),
			Self::Success => write!(f, "success"),
			Self::Fail => write!(f, "fail"),
			Self::Log => write!(f, "log"),
			Self::Ign => write!(f, "ign"),
			Self::Unknown => write!(f, "unknown"),
		}
	}
}
