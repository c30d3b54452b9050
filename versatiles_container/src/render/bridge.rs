//! Bridges the rasterizer's synchronous request callback to the async
//! renderer router (§9 "Coroutines / callbacks"). A native rasterizer calls
//! its request hook from inside foreign code mid-render — necessarily
//! synchronously — while `render::resolve` needs an async runtime to reach
//! a `TileStore`/`AssetCache`. `render_with_resolver` is the one place that
//! reconciles the two: it leases a renderer, runs the (blocking) `render`
//! call on a blocking-pool thread, and lets that thread's resolver closure
//! call back into the async router via the handle it was spawned from.

use super::{RendererPool, RenderFormat, resolve_with_fallback};
use crate::Repository;
use image::DynamicImage;
use std::sync::Arc;
use tokio::runtime::Handle;
use versatiles_core::StoreError;

/// Renders one tile, bridging every sub-resource request the rasterizer
/// issues back through `repository` (§4.F) with fallback-on-failure for
/// tile-scheme lookups (§4.F). The renderer lease is dropped as soon as
/// `render` returns, ahead of the caller's `finalize` encode (§9).
pub async fn render_with_resolver(
	pool: &RendererPool,
	repository: Arc<Repository>,
	fallback_format: RenderFormat,
	zoom: u8,
	x: u32,
	y: u32,
	width: u32,
	height: u32,
) -> Result<DynamicImage, StoreError> {
	let mut renderer = pool.acquire().await?;
	let runtime = Handle::current();

	tokio::task::spawn_blocking(move || {
		let resolve = |url: &str| -> Result<Vec<u8>, StoreError> {
			runtime.block_on(resolve_with_fallback(&repository, url, fallback_format))
		};
		renderer.render(zoom, x, y, width, height, &resolve)
	})
	.await
	.map_err(|e| StoreError::Other(anyhow::anyhow!("renderer task panicked: {e}")))?
}
