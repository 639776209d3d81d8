// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Status flips and the time window used to list them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wire::{timestamp, zero_one};

/// `seconds` value meaning "no lower bound".
pub const UNBOUNDED_SECONDS: u64 = i64::MAX as u64;

/// One year in seconds.
pub const ONE_YEAR_SECONDS: u64 = 365 * 24 * 60 * 60;

/// A check going up or down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFlip {
	#[serde(default, deserialize_with = "timestamp::deserialize")]
	pub timestamp: Option<DateTime<Utc>>,

	/// Sent as `0`/`1`.
	#[serde(with = "zero_one")]
	pub up: bool,
}

/// Which flips to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlipWindow {
	/// Every flip the server still has.
	#[default]
	All,
	/// Flips within the last `n` seconds.
	Seconds(u64),
	/// Flips between two UNIX timestamps.
	Range { start: i64, end: i64 },
}

impl FlipWindow {
	pub fn last_year() -> Self {
		Self::Seconds(ONE_YEAR_SECONDS)
	}

	pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
		Self::Range {
			start: start.timestamp(),
			end: end.timestamp(),
		}
	}

	/// Query parameters for the flips endpoint, in order.
	pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
		match *self {
			Self::All => vec![("seconds", UNBOUNDED_SECONDS.to_string())],
			Self::Seconds(seconds) => vec![("seconds", seconds.to_string())],
			Self::Range { start, end } => {
				vec![("start", start.to_string()), ("end", end.to_string())]
			}
		}
	}
}
