//! The render job (§4.H): rasterizes a style into a chosen backend, one
//! pooled renderer lease per tile (§4.G), skipping tiles the refresh
//! predicate judges still fresh — for a hash predicate, only after already
//! having rendered, since the candidate hash isn't known beforehand.

use super::{
	coverage::{Coverage, normalize_coverages, total_tiles},
	drive::drive,
	handle::{JobHandle, JobState},
	post::run_post_pass,
	refresh::RefreshPredicate,
	snapshot::ExtraInfoSnapshot,
};
use crate::{
	Repository,
	render::{RenderFormat, RendererPool, finalize, render_with_resolver, resolve_render_params},
	store::TileMetadata,
};
use std::sync::Arc;
use versatiles_core::{StoreError, TileCoord, md5_hex};

pub struct RenderConfig {
	pub pool: Arc<RendererPool>,
	/// Resolves the style's sub-resource requests (sprites, fonts, source
	/// tiles) mid-render (§4.F); passed through to every render call.
	pub repository: Arc<Repository>,
	pub destination: Arc<crate::store::TileStore>,
	pub coverages: Vec<Coverage>,
	pub refresh: RefreshPredicate,
	pub concurrency: usize,
	pub tile_size: u32,
	pub scale: u32,
	pub format: RenderFormat,
	pub store_transparent: bool,
	pub metadata_patch: Option<TileMetadata>,
}

/// Runs a render job to completion (or until cancelled), returning the
/// final job state. Per §4.H step 3, a single-z job's metadata patch gets
/// `minzoom`/`maxzoom` both forced to that zoom — the caller is expected to
/// have already folded that into `metadata_patch` before calling this, since
/// deciding "single-z" is a property of the coverages the caller assembled.
pub async fn run_render(config: RenderConfig, handle: Arc<JobHandle>) -> Result<JobState, StoreError> {
	let ranges = normalize_coverages(&config.coverages)?;
	handle.set_total(total_tiles(&ranges));

	if let Some(patch) = &config.metadata_patch {
		config.destination.update_metadata(patch).await?;
	}

	let snapshot = if config.refresh.needs_snapshot() {
		ExtraInfoSnapshot::take(&config.destination, &ranges, config.refresh.snapshot_by_created()).await?
	} else {
		ExtraInfoSnapshot::default()
	};

	drive(&ranges, config.concurrency, &handle, |coord| render_one(&config, &snapshot, coord)).await;
	run_post_pass(&config.destination, &ranges).await?;

	Ok(handle.snapshot())
}

async fn render_one(config: &RenderConfig, snapshot: &ExtraInfoSnapshot, coord: TileCoord) {
	if let Err(e) = render_one_inner(config, snapshot, coord).await {
		log::warn!("render: tile {coord:?} failed: {e}");
	}
}

async fn render_one_inner(config: &RenderConfig, snapshot: &ExtraInfoSnapshot, coord: TileCoord) -> Result<(), StoreError> {
	if matches!(config.refresh, RefreshPredicate::Before(_)) && !config.refresh.should_refresh(snapshot.created(coord), None, None) {
		return Ok(());
	}

	let (zoom, size, downscale) = resolve_render_params(coord.level, config.tile_size, config.scale);
	// The lease lives only across `render_with_resolver`'s call into the
	// rasterizer; it's released before the (potentially slow) encode in
	// `finalize` runs (§9).
	let image = render_with_resolver(&config.pool, config.repository.clone(), config.format, zoom, coord.x, coord.y, size, size).await?;
	let blob = finalize(&image, config.format, downscale)?;
	let data = blob.into_vec();

	if matches!(config.refresh, RefreshPredicate::HashDiffers) {
		let candidate = md5_hex(&data);
		if !config.refresh.should_refresh(None, snapshot.hash(coord), Some(&candidate)) {
			return Ok(());
		}
	}

	config.destination.put_tile(coord, data, config.store_transparent).await
}
