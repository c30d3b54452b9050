//! Bulk job state (§3 "Job state", §4.H, §5): the `{total, completed, active,
//! cancelRequested}` tuple a caller polls while a seed/export/render job
//! runs, plus the cancellation token the enumeration loop checks before
//! issuing each new tile task.

use std::sync::atomic::{AtomicU64, Ordering};
use tokio_util::sync::CancellationToken;

/// A point-in-time read of a running job's counters (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobState {
	pub total: u64,
	pub completed: u64,
	pub active: u64,
	pub cancel_requested: bool,
}

/// Shared handle a job's driver mutates and a caller (CLI, cron, HTTP
/// surface) polls or cancels. `active` never exceeds the job's concurrency
/// limit; `completed` only ever increases, even across cancellation (§3:
/// "On cancellation `active` drains but `completed` and existing writes are
/// preserved").
#[derive(Debug)]
pub struct JobHandle {
	total: AtomicU64,
	completed: AtomicU64,
	active: AtomicU64,
	cancel: CancellationToken,
}

impl JobHandle {
	#[must_use]
	pub fn new(total: u64) -> JobHandle {
		JobHandle {
			total: AtomicU64::new(total),
			completed: AtomicU64::new(0),
			active: AtomicU64::new(0),
			cancel: CancellationToken::new(),
		}
	}

	/// Sets the total once a job driver has finished normalizing its
	/// coverages (§4.H step 1). Jobs construct their handle with a
	/// placeholder total of `0` and correct it here as soon as the real
	/// count is known.
	pub fn set_total(&self, total: u64) {
		self.total.store(total, Ordering::Relaxed);
	}

	#[must_use]
	pub fn snapshot(&self) -> JobState {
		JobState {
			total: self.total.load(Ordering::Relaxed),
			completed: self.completed.load(Ordering::Relaxed),
			active: self.active.load(Ordering::Relaxed),
			cancel_requested: self.cancel.is_cancelled(),
		}
	}

	/// Requests cancellation (§4.H "Cancellation"): the enumeration loop stops
	/// issuing new tasks; already-issued tasks still run to completion.
	pub fn cancel(&self) {
		self.cancel.cancel();
	}

	#[must_use]
	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}

	/// Runs `fut` as one tile task: bumps `active` for its duration, then
	/// bumps `completed` once it settles, regardless of whether it succeeded
	/// (a logged-and-swallowed per-tile error still "completes", E5).
	pub async fn track<Fut, T>(&self, fut: Fut) -> T
	where
		Fut: Future<Output = T>,
	{
		self.active.fetch_add(1, Ordering::Relaxed);
		let result = fut.await;
		self.active.fetch_sub(1, Ordering::Relaxed);
		self.completed.fetch_add(1, Ordering::Relaxed);
		result
	}
}

use std::future::Future;
