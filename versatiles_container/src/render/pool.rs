//! The native rasterizer pool (§4.G): acquiring a rasterizer instance,
//! resolving a tile coordinate into the zoom/size pair the rasterizer
//! actually paints at, and releasing the instance back to the pool as soon
//! as rendering completes (§9 — the pool releases on render-complete, ahead
//! of `finalize`, since encoding never touches the native renderer).
//!
//! Grounded directly on the GDAL dataset pool used elsewhere in this
//! workspace: a `deadpool::managed::Manager` wraps a boxed factory closure
//! so callers aren't coupled to one concrete rasterizer implementation.

use anyhow::Result;
use deadpool::managed::{Manager, Object, Pool, RecycleResult};
use image::DynamicImage;
use std::sync::Arc;
use versatiles_core::StoreError;

/// A style sub-resource request the rasterizer issues mid-render — the
/// shape `render::resolve` answers (§4.F).
#[derive(Debug, Clone)]
pub struct AssetRequest {
	pub url: String,
}

/// The synchronous face of the request callback (§4.F, §9 "Coroutines /
/// callbacks"): a rasterizer calls this once per sub-resource URL it needs
/// while painting. The native rasterizer's own request hook is necessarily
/// synchronous (it's invoked from inside foreign code mid-render), so
/// [`super::bridge::render_with_resolver`] is what actually bridges this
/// closure to the async `render::resolve` over a pooled store/asset cache.
pub type RequestResolver<'a> = dyn Fn(&str) -> Result<Vec<u8>, StoreError> + 'a;

/// One native rasterizer instance. Implementations are expected to be
/// expensive to create (loading a style, compiling shaders, ...) and cheap
/// to reuse across renders, which is exactly what pooling buys.
pub trait Rasterizer: Send {
	/// Paints `width`×`height` pixels for `(zoom, x, y)`, calling `resolve`
	/// for every sub-resource URL the style references.
	fn render(&mut self, zoom: u8, x: u32, y: u32, width: u32, height: u32, resolve: &RequestResolver) -> Result<DynamicImage>;
}

/// A `Rasterizer` that paints a flat color, used in tests and as a
/// placeholder until a concrete native backend is wired in. Issues one
/// request per render (to exercise the resolver bridge) and discards it.
pub struct NullRasterizer {
	pub created: u32,
	pub probe_url: Option<String>,
}

impl Rasterizer for NullRasterizer {
	fn render(&mut self, _zoom: u8, _x: u32, _y: u32, width: u32, height: u32, resolve: &RequestResolver) -> Result<DynamicImage> {
		if let Some(url) = &self.probe_url {
			let _ = resolve(url);
		}
		Ok(DynamicImage::new_rgba8(width, height))
	}
}

struct RasterizerManager {
	factory: Arc<dyn Fn() -> Result<Box<dyn Rasterizer>> + Send + Sync>,
}

impl Manager for RasterizerManager {
	type Type = Box<dyn Rasterizer>;
	type Error = anyhow::Error;

	async fn create(&self) -> Result<Self::Type, Self::Error> {
		(self.factory)()
	}

	async fn recycle(&self, _obj: &mut Self::Type, _metrics: &deadpool::managed::Metrics) -> RecycleResult<Self::Error> {
		Ok(())
	}
}

/// A bounded pool of rasterizer instances (§4.G).
pub struct RendererPool {
	pool: Pool<RasterizerManager>,
}

/// A leased rasterizer. Returned to the pool when dropped; callers should
/// let it drop as soon as `render` returns so the release happens before
/// the (potentially slow) `finalize` encode (§9).
pub struct RendererManager(Object<RasterizerManager>);

impl RendererPool {
	pub fn new(
		factory: Arc<dyn Fn() -> Result<Box<dyn Rasterizer>> + Send + Sync>,
		concurrency_limit: usize,
	) -> Result<Self> {
		let manager = RasterizerManager { factory };
		let pool = Pool::builder(manager).max_size(concurrency_limit.max(1)).build()?;
		Ok(RendererPool { pool })
	}

	pub async fn acquire(&self) -> Result<RendererManager, StoreError> {
		self
			.pool
			.get()
			.await
			.map(RendererManager)
			.map_err(|e| StoreError::Other(anyhow::anyhow!("failed to acquire rasterizer: {e}")))
	}
}

impl RendererManager {
	pub fn render(
		&mut self,
		zoom: u8,
		x: u32,
		y: u32,
		width: u32,
		height: u32,
		resolve: &RequestResolver,
	) -> Result<DynamicImage, StoreError> {
		self.0.render(zoom, x, y, width, height, resolve).map_err(StoreError::Other)
	}
}

/// Resolves a requested `(zoom, tile_size)` into the zoom/size pair the
/// rasterizer is actually invoked with, plus the downscale factor
/// `finalize` must apply afterwards (§4.G E6).
///
/// Only zoom 0 with a 256px tile size gets the hack: a level-0, 256px
/// render is indistinguishable from a 512px render one level down,
/// downsampled by 2, and no native rasterizer is expected to paint
/// meaningfully below zoom 0.
#[must_use]
pub fn resolve_render_params(zoom: u8, tile_size: u32, scale: u32) -> (u8, u32, Option<u32>) {
	if zoom == 0 && tile_size == 256 {
		(0, 512 * scale, Some(2))
	} else {
		(zoom.saturating_sub(u8::from(tile_size == 256)), tile_size * scale, None)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn zoom_zero_256_tile_uses_the_512_hack() {
		assert_eq!(resolve_render_params(0, 256, 1), (0, 512, Some(2)));
	}

	#[test]
	fn higher_zoom_256_tile_shifts_down_one_level() {
		assert_eq!(resolve_render_params(5, 256, 1), (4, 256, None));
	}

	#[test]
	fn tile_512_never_shifts_zoom() {
		assert_eq!(resolve_render_params(5, 512, 1), (5, 512, None));
		assert_eq!(resolve_render_params(0, 512, 1), (0, 512, None));
	}

	#[test]
	fn scale_multiplies_target_size() {
		assert_eq!(resolve_render_params(5, 256, 2), (4, 512, None));
	}

	#[tokio::test]
	async fn pool_round_trips_an_instance() {
		let factory: Arc<dyn Fn() -> Result<Box<dyn Rasterizer>> + Send + Sync> =
			Arc::new(|| Ok(Box::new(NullRasterizer { created: 1, probe_url: None }) as Box<dyn Rasterizer>));
		let pool = RendererPool::new(factory, 2).unwrap();
		let mut leased = pool.acquire().await.unwrap();
		let image = leased.render(0, 0, 0, 4, 4, &|_url| Ok(Vec::new())).unwrap();
		assert_eq!((image.width(), image.height()), (4, 4));
	}

	#[tokio::test]
	async fn resolver_is_reachable_from_inside_render() {
		let factory: Arc<dyn Fn() -> Result<Box<dyn Rasterizer>> + Send + Sync> = Arc::new(|| {
			Ok(Box::new(NullRasterizer {
				created: 1,
				probe_url: Some("http://example.com/probe".to_string()),
			}) as Box<dyn Rasterizer>)
		});
		let pool = RendererPool::new(factory, 1).unwrap();
		let mut leased = pool.acquire().await.unwrap();
		let seen = std::cell::RefCell::new(None);
		leased
			.render(0, 0, 0, 4, 4, &|url| {
				*seen.borrow_mut() = Some(url.to_string());
				Ok(Vec::new())
			})
			.unwrap();
		assert_eq!(seen.into_inner().as_deref(), Some("http://example.com/probe"));
	}
}
