// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Serde adapters for the server's less regular field encodings.

use chrono::{DateTime, Utc};

/// Accepted layout when the offset has no colon (`+0200`).
const COMPACT_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Parses an ISO-8601 timestamp carrying an offset, in either `+HH:MM` or
/// `+HHMM` form, with optional fractional seconds.
///
/// Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
	let raw = raw.trim();
	DateTime::parse_from_rfc3339(raw)
		.or_else(|_| DateTime::parse_from_str(raw, COMPACT_OFFSET_FORMAT))
		.ok()
		.map(|ts| ts.with_timezone(&Utc))
}

/// Lenient timestamp field: unparseable values decode to `None`.
pub mod timestamp {
	use std::fmt;

	use chrono::{DateTime, Utc};
	use serde::de::{self, Deserializer, Visitor};

	use super::parse_timestamp;

	pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_any(TimestampVisitor)
	}

	struct TimestampVisitor;

	impl<'de> Visitor<'de> for TimestampVisitor {
		type Value = Option<DateTime<Utc>>;

		fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
			f.write_str("a timestamp string or null")
		}

		fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
			Ok(parse_timestamp(v))
		}

		fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
			Ok(None)
		}

		fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
			Ok(None)
		}

		fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
			d.deserialize_any(self)
		}

		fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
			Ok(None)
		}

		fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
			Ok(None)
		}

		fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
			Ok(None)
		}

		fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
			Ok(None)
		}
	}
}

/// Booleans sent as integers: `0` is false, anything else is true.
pub mod zero_one {
	use std::fmt;

	use serde::de::{self, Deserializer, Visitor};
	use serde::Serializer;

	pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_any(ZeroOneVisitor)
	}

	pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_u8(u8::from(*value))
	}

	struct ZeroOneVisitor;

	impl<'de> Visitor<'de> for ZeroOneVisitor {
		type Value = bool;

		fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
			f.write_str("an integer or a boolean")
		}

		fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
			Ok(v != 0)
		}

		fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
			Ok(v != 0)
		}

		fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
			Ok(v)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;
	use proptest::prelude::*;
	use serde::Deserialize;

	#[derive(Debug, Deserialize)]
	struct Stamped {
		#[serde(default, deserialize_with = "timestamp::deserialize")]
		at: Option<DateTime<Utc>>,
	}

	#[derive(Debug, Deserialize)]
	struct Flag {
		#[serde(deserialize_with = "zero_one::deserialize")]
		up: bool,
	}

	#[test]
	fn colon_and_compact_offsets_agree() {
		let with_colon = parse_timestamp("2020-12-24T15:12:24+02:00").unwrap();
		let compact = parse_timestamp("2020-12-24T15:12:24+0200").unwrap();
		assert_eq!(with_colon, compact);
		assert_eq!(with_colon, Utc.with_ymd_and_hms(2020, 12, 24, 13, 12, 24).unwrap());
	}

	#[test]
	fn fractional_seconds_are_kept() {
		let ts = parse_timestamp("2020-12-24T15:12:24.123+00:00").unwrap();
		assert_eq!(ts.timestamp_subsec_millis(), 123);
	}

	#[test]
	fn garbage_is_none() {
		assert_eq!(parse_timestamp(""), None);
		assert_eq!(parse_timestamp("yesterday"), None);
		assert_eq!(parse_timestamp("2020-12-24T15:12:24"), None);
	}

	#[test]
	fn timestamp_field_is_lenient() {
		let ok: Stamped = serde_json::from_str(r#"{"at":"2020-12-24T15:12:24+02:00"}"#).unwrap();
		assert!(ok.at.is_some());

		let bad: Stamped = serde_json::from_str(r#"{"at":"not a date"}"#).unwrap();
		assert_eq!(bad.at, None);

		let null: Stamped = serde_json::from_str(r#"{"at":null}"#).unwrap();
		assert_eq!(null.at, None);

		let missing: Stamped = serde_json::from_str("{}").unwrap();
		assert_eq!(missing.at, None);

		let number: Stamped = serde_json::from_str(r#"{"at":1608815544}"#).unwrap();
		assert_eq!(number.at, None);
	}

	#[test]
	fn zero_one_decoding() {
		let down: Flag = serde_json::from_str(r#"{"up":0}"#).unwrap();
		assert!(!down.up);
		let up: Flag = serde_json::from_str(r#"{"up":1}"#).unwrap();
		assert!(up.up);
		let other: Flag = serde_json::from_str(r#"{"up":-3}"#).unwrap();
		assert!(other.up);
		let boolean: Flag = serde_json::from_str(r#"{"up":false}"#).unwrap();
		assert!(!boolean.up);
	}

	proptest! {
		#[test]
		fn any_nonzero_integer_is_true(v in any::<i64>()) {
			let flag: Flag = serde_json::from_str(&format!(r#"{{"up":{v}}}"#)).unwrap();
			prop_assert_eq!(flag.up, v != 0);
		}

		#[test]
		fn offset_forms_agree(secs in 0i64..4_000_000_000, offset_min in -720i32..=840) {
			let offset = chrono::FixedOffset::east_opt(offset_min * 60).unwrap();
			let local = Utc.timestamp_opt(secs, 0).unwrap().with_timezone(&offset);
			let with_colon = local.format("%Y-%m-%dT%H:%M:%S%:z").to_string();
			let compact = local.format("%Y-%m-%dT%H:%M:%S%z").to_string();
			prop_assert_eq!(parse_timestamp(&with_colon), parse_timestamp(&compact));
			prop_assert_eq!(parse_timestamp(&with_colon).map(|t| t.timestamp()), Some(secs));
		}
	}
}
