//! The bounded worker pool every bulk job (seed/export/render) drives its
//! per-tile tasks through (§4.H step 5, §5 "Bulk jobs use a bounded pool of
//! cooperative tasks"). Grounded on `TileStream::for_each_parallel_async_try`
//! in `versatiles_core`, which drives the same `for_each_concurrent` shape
//! over a different item type; the job engine needs its own copy because it
//! also has to stop *issuing* new tasks on cancellation (`take_while`, which
//! `TileStream`'s helper doesn't need).

use super::{coverage::TileRange, handle::JobHandle};
use futures::{StreamExt, future::ready, stream};
use std::future::Future;
use versatiles_core::TileCoord;

/// Enumerates `ranges` and runs `task` for each coordinate with at most
/// `concurrency` tasks in flight at once. Stops issuing new tasks as soon as
/// `handle` is cancelled (§4.H "Cancellation": "the enumeration loop checks
/// it before launching new work"); tasks already issued still run to
/// completion, which is what makes the outer wait a true drain.
pub async fn drive<F, Fut>(ranges: &[TileRange], concurrency: usize, handle: &JobHandle, task: F)
where
	F: Fn(TileCoord) -> Fut,
	Fut: Future<Output = ()>,
{
	stream::iter(super::coverage::enumerate(ranges))
		.take_while(|_| ready(!handle.is_cancelled()))
		.for_each_concurrent(concurrency.max(1), |coord| handle.track(task(coord)))
		.await;
}
