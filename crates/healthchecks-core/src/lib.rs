// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the healthchecks.io client.
//!
//! These mirror the JSON documents of the management API. Decoding is lenient
//! where the server is irregular: timestamps that fail to parse become `None`
//! and status flips carry their `up` flag as an integer.

mod check;
mod flip;
mod integration;
mod ping;
pub mod wire;

pub use check::{Check, CheckStatus};
pub use flip::{FlipWindow, StatusFlip, ONE_YEAR_SECONDS, UNBOUNDED_SECONDS};
pub use integration::Integration;
pub use ping::{Ping, PingKind};
pub use wire::parse_timestamp;
