// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Single-resolution handle for an in-flight request.
//!
//! Rust futures are lazy, but a heartbeat should leave as soon as the caller
//! asks for it, whether or not anyone awaits the result. [`ResponseFuture`]
//! spawns the work onto a tokio runtime immediately and hands back the
//! receiving half of a one-shot channel. The sender is consumed by its single
//! `send`, so the handle can resolve at most once.
//!
//! The caller's runtime is used when there is one. Otherwise the work runs on
//! a small runtime owned by this crate, so the handle can be awaited from any
//! executor (or `futures::executor::block_on`).

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::OnceLock;
use std::task::{Context, Poll};

use thiserror::Error;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::oneshot;
use tracing::{debug, error, trace};

static FALLBACK_RUNTIME: OnceLock<Option<Runtime>> = OnceLock::new();

/// Handle of the crate-owned runtime, built on first use.
fn fallback_handle() -> Option<Handle> {
	FALLBACK_RUNTIME
		.get_or_init(|| {
			debug!("No async runtime available, starting background runtime");
			Builder::new_multi_thread()
				.worker_threads(1)
				.thread_name("healthchecks-io")
				.enable_all()
				.build()
				.map_err(|e| error!(error = %e, "Failed to start background runtime"))
				.ok()
		})
		.as_ref()
		.map(|runtime| runtime.handle().clone())
}

/// The task driving a request ended without producing a result, typically
/// because its runtime shut down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("request was aborted before it completed")]
pub struct RequestAborted;

/// Handle to the eventual result of one request.
///
/// Dropping the handle does not cancel a request that has already been
/// spawned.
#[must_use = "the request runs regardless, but its outcome is only observable by awaiting"]
pub struct ResponseFuture<T, E> {
	state: State<T, E>,
	on_caller_runtime: bool,
}

enum State<T, E> {
	/// Running on a runtime worker.
	Spawned(oneshot::Receiver<Result<T, E>>),
	Done,
}

impl<T, E> ResponseFuture<T, E>
where
	T: Send + 'static,
	E: From<RequestAborted> + Send + 'static,
{
	/// Starts `work` now on the current tokio runtime, or on the crate-owned
	/// runtime when called outside one.
	pub fn spawn<F>(work: F) -> Self
	where
		F: Future<Output = Result<T, E>> + Send + 'static,
	{
		let current = Handle::try_current().ok();
		let on_caller_runtime = current.is_some();
		let (tx, rx) = oneshot::channel();

		// Without any runtime the sender is dropped here and the handle
		// resolves to `RequestAborted`.
		if let Some(handle) = current.or_else(fallback_handle) {
			handle.spawn(async move {
				// Err means the caller dropped the handle; nothing to deliver.
				if tx.send(work.await).is_err() {
					trace!("Response handle dropped before completion");
				}
			});
		}

		Self {
			state: State::Spawned(rx),
			on_caller_runtime,
		}
	}

	/// Returns true if the request runs on the caller's own runtime rather
	/// than the crate-owned one.
	pub fn is_on_caller_runtime(&self) -> bool {
		self.on_caller_runtime
	}
}

impl<T, E> Unpin for ResponseFuture<T, E> {}

impl<T, E> Future for ResponseFuture<T, E>
where
	E: From<RequestAborted>,
{
	type Output = Result<T, E>;

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		let this = self.get_mut();
		let output = match &mut this.state {
			State::Spawned(rx) => match Pin::new(rx).poll(cx) {
				Poll::Ready(Ok(result)) => result,
				Poll::Ready(Err(_)) => Err(E::from(RequestAborted)),
				Poll::Pending => return Poll::Pending,
			},
			State::Done => panic!("ResponseFuture polled after completion"),
		};
		this.state = State::Done;
		Poll::Ready(output)
	}
}

impl<T, E> fmt::Debug for ResponseFuture<T, E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = match self.state {
			State::Spawned(_) => "spawned",
			State::Done => "done",
		};
		f.debug_struct("ResponseFuture")
			.field("state", &state)
			.field("on_caller_runtime", &self.on_caller_runtime)
			.finish()
	}
}
