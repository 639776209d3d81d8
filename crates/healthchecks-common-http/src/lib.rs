// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for the healthchecks.io client.
//!
//! This crate provides:
//! - A pre-configured HTTP client builder with a consistent User-Agent header
//! - [`RequestSpec`], a pure description of an outgoing request
//! - [`ResponseFuture`], a single-resolution handle for an in-flight request

mod client;
mod future;
mod request;

pub use client::{builder, builder_with_user_agent, user_agent};
pub use future::{RequestAborted, ResponseFuture};
pub use request::{RequestBody, RequestSpec, API_KEY_HEADER, APPLICATION_JSON, TEXT_PLAIN};
