// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

/// A notification channel. Only listed for full-access keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Integration {
	pub id: String,
	/// Display name, e.g. "Private Email".
	pub name: String,
	/// Channel type, e.g. "email", "sms", "telegram".
	pub kind: String,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Check;

	#[test]
	fn decodes_and_matches_check_channels() {
		let integration: Integration = serde_json::from_str(
			r#"{"id": "4ec5a071-2d08-4baa-898a-eb4eb3cd6941", "name": "My Work Email", "kind": "email"}"#,
		)
		.unwrap();
		assert_eq!(integration.kind, "email");

		let check = Check {
			channels: Some("4ec5a071-2d08-4baa-898a-eb4eb3cd6941".to_string()),
			..Default::default()
		};
		assert!(check.has_integration_of(&integration));
	}
}
