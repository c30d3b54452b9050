//! The export job (§4.H): copies an existing configured data entry into a
//! new store of a chosen backend, through the same read pipeline (§4.E) the
//! request path uses — so an export transparently forwards to origin for
//! any tile the source store doesn't have locally yet.

use super::{
	coverage::{Coverage, normalize_coverages, total_tiles},
	drive::drive,
	handle::{JobHandle, JobState},
	post::run_post_pass,
	refresh::RefreshPredicate,
	snapshot::ExtraInfoSnapshot,
};
use crate::{read_pipeline::TileReadPipeline, store::TileMetadata};
use std::sync::Arc;
use versatiles_core::{StoreError, TileCoord, md5_hex};

pub struct ExportConfig {
	pub source: Arc<TileReadPipeline>,
	pub destination: Arc<crate::store::TileStore>,
	pub coverages: Vec<Coverage>,
	pub refresh: RefreshPredicate,
	pub concurrency: usize,
	pub store_transparent: bool,
	pub metadata_patch: Option<TileMetadata>,
}

/// Runs an export job to completion (or until cancelled), returning the
/// final job state.
pub async fn run_export(config: ExportConfig, handle: Arc<JobHandle>) -> Result<JobState, StoreError> {
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

	drive(&ranges, config.concurrency, &handle, |coord| export_one(&config, &snapshot, coord)).await;
	run_post_pass(&config.destination, &ranges).await?;

	Ok(handle.snapshot())
}

async fn export_one(config: &ExportConfig, snapshot: &ExtraInfoSnapshot, coord: TileCoord) {
	if let Err(e) = export_one_inner(config, snapshot, coord).await {
		log::warn!("export: tile {coord:?} failed: {e}");
	}
}

async fn export_one_inner(config: &ExportConfig, snapshot: &ExtraInfoSnapshot, coord: TileCoord) -> Result<(), StoreError> {
	if matches!(config.refresh, RefreshPredicate::Before(_)) && !config.refresh.should_refresh(snapshot.created(coord), None, None) {
		return Ok(());
	}

	let data = match config.source.read_tile(coord).await {
		Ok(data) => data,
		Err(StoreError::NotFound) => return Ok(()),
		Err(e) => return Err(e),
	};

	if matches!(config.refresh, RefreshPredicate::HashDiffers) {
		let candidate = md5_hex(&data);
		if !config.refresh.should_refresh(None, snapshot.hash(coord), Some(&candidate)) {
			return Ok(());
		}
	}

	config.destination.put_tile(coord, data, config.store_transparent).await
}
