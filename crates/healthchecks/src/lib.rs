// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client for [healthchecks.io](https://healthchecks.io) and self-hosted
//! instances.
//!
//! Two clients are provided:
//!
//! - [`PingClient`] sends start, success, fail and exit-code signals for a
//!   single check. No API key is needed.
//! - [`ManagementClient`] lists, creates, updates, pauses and deletes checks
//!   and reads their pings, status flips and the project's channels.
//!
//! Every network operation returns a [`ResponseFuture`] immediately, with the
//! request already running in the background; awaiting the future collects
//! the result. Requests run on the caller's tokio runtime, or on a small
//! runtime owned by this crate when there is none, so the future can be
//! awaited from any executor.
//!
//! # Example
//!
//! ```ignore
//! use healthchecks::{Check, ManagementClient, PingClient};
//!
//! #[tokio::main]
//! async fn main() -> healthchecks::Result<()> {
//!     let api = ManagementClient::new(std::env::var("HEALTHCHECKS_API_KEY").unwrap())?;
//!     let check = api
//!         .create_check(&Check::with_cron("nightly", "0 3 * * *", "UTC", 600))?
//!         .await?;
//!
//!     let pings = PingClient::for_check(&check)?;
//!     pings.start(None).await?;
//!     pings.success(Some("backup complete")).await?;
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod management;
mod pinging;
mod response;
pub mod url;

pub use config::ClientConfig;
pub use error::{HealthchecksError, Result};
pub use management::{ManagementClient, ManagementClientBuilder, DEFAULT_MANAGEMENT_HOST};
pub use pinging::{PingClient, PingClientBuilder, DEFAULT_PING_HOST};

pub use healthchecks_common_http::RequestAborted;
pub use healthchecks_common_version::BuildInfo;
pub use healthchecks_core::{
	Check, CheckStatus, FlipWindow, Integration, Ping, PingKind, StatusFlip, ONE_YEAR_SECONDS,
	UNBOUNDED_SECONDS,
};

/// Handle to an in-flight request.
pub type ResponseFuture<T> = healthchecks_common_http::ResponseFuture<T, HealthchecksError>;
