//! The seed job (§4.H): populates a destination store from an HTTP origin,
//! one coverage range at a time, skipping tiles the refresh predicate
//! judges still fresh.

use super::{
	coverage::{Coverage, TileRange, normalize_coverages, total_tiles},
	drive::drive,
	handle::{JobHandle, JobState},
	post::run_post_pass,
	refresh::RefreshPredicate,
	snapshot::ExtraInfoSnapshot,
};
use crate::{read_pipeline::substitute_url, store::TileMetadata};
use std::{sync::Arc, time::Duration};
use versatiles_core::{StoreError, TileCoord, TileScheme, io::http_get, md5_hex};

/// Everything the seed job needs that isn't carried in `JobHandle`.
pub struct SeedConfig {
	pub destination: Arc<crate::store::TileStore>,
	/// Origin URL template containing literal `{z}/{x}/{y}` placeholders.
	pub source_url: String,
	/// Row-numbering convention the origin expects (§4.E `tmpY`).
	pub source_scheme: TileScheme,
	pub coverages: Vec<Coverage>,
	pub refresh: RefreshPredicate,
	pub concurrency: usize,
	pub max_try: u32,
	pub timeout: Duration,
	pub store_transparent: bool,
	pub metadata_patch: Option<TileMetadata>,
}

/// Runs a seed job to completion (or until cancelled), returning the final
/// job state. Store-level errors (metadata update, extra-info snapshot)
/// propagate; per-tile errors are logged and swallowed (§7).
pub async fn run_seed(config: SeedConfig, handle: Arc<JobHandle>) -> Result<JobState, StoreError> {
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

	drive(&ranges, config.concurrency, &handle, |coord| seed_one(&config, &snapshot, coord)).await;
	run_post_pass(&config.destination, &ranges).await?;

	Ok(handle.snapshot())
}

async fn seed_one(config: &SeedConfig, snapshot: &ExtraInfoSnapshot, coord: TileCoord) {
	if let Err(e) = seed_one_inner(config, snapshot, coord).await {
		log::warn!("seed: tile {coord:?} failed: {e}");
	}
}

async fn seed_one_inner(config: &SeedConfig, snapshot: &ExtraInfoSnapshot, coord: TileCoord) -> Result<(), StoreError> {
	// Timestamp/age predicates decide purely from the snapshot, without a
	// fetch; hash predicates need the freshly fetched bytes to compare
	// against, so they fall through to `fetch_tile` below (§4.H step 5).
	if matches!(config.refresh, RefreshPredicate::Before(_)) && !config.refresh.should_refresh(snapshot.created(coord), None, None) {
		return Ok(());
	}

	let Some(data) = fetch_tile(config, coord).await? else {
		// 204/404: sentinel "absent at origin" — the task still completes, no
		// write happens, the store stays as it was (§7, E5).
		return Ok(());
	};

	if matches!(config.refresh, RefreshPredicate::HashDiffers) {
		let candidate = md5_hex(&data);
		if !config.refresh.should_refresh(None, snapshot.hash(coord), Some(&candidate)) {
			return Ok(());
		}
	}

	config.destination.put_tile(coord, data, config.store_transparent).await
}

/// Fetches one tile from the origin, flipping its row for the origin's
/// scheme and retrying up to `max_try` times — except on `204`/`404`, which
/// are sentinel "absent" statuses that are never retried (§4.C, §7).
async fn fetch_tile(config: &SeedConfig, coord: TileCoord) -> Result<Option<Vec<u8>>, StoreError> {
	let y = config.source_scheme.flip_y(coord.level, coord.y);
	let url = substitute_url(&config.source_url, coord.level, coord.x, y);

	let mut attempt = 0;
	loop {
		attempt += 1;
		match http_get(&url, config.timeout).await {
			Ok(data) => return Ok(Some(data)),
			Err(StoreError::RemoteStatus(204 | 404)) => return Ok(None),
			Err(e) if attempt >= config.max_try => return Err(e),
			Err(_) => tokio::time::sleep(Duration::from_millis(200)).await,
		}
	}
}
