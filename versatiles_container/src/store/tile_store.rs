//! The tile store contract (§4.D): one capability set — `open`/`close`,
//! `get_tile`/`put_tile`, `get_created`, `get_metadata`/`update_metadata`,
//! `tile_extra_info`, `download_tile` — shared by three backends that differ
//! only in how they persist rows (directory + sidecar database, single-file
//! archive, relational database). Callers (the read pipeline, the bulk job
//! engine, the renderer router) match on the backend only when opening a
//! store; every other operation goes through `TileStore` itself.

use super::{DirectorySidecarStore, ExtraInfoMap, FileArchiveStore, RelationalStore, TileMetadata, TileRecord};
use std::time::Duration;
use versatiles_core::{StoreError, TileBBox, TileCoord};

/// Deadline applied to SQL statements and HTTP requests issued by a store
/// when the caller doesn't provide one (§4.C).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Deadline applied to scoped file-lock acquisition (§4.C).
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(10);

/// One of the three tile store backends (§9 Design Note: closed variant set
/// behind a single capability set rather than an open-ended trait object —
/// the backend count is fixed by the contract, not by what a caller plugs in).
#[derive(Debug)]
pub enum TileStore {
	DirectorySidecar(DirectorySidecarStore),
	FileArchive(FileArchiveStore),
	Relational(RelationalStore),
}

impl TileStore {
	/// Closes the store, releasing pooled connections. A store handle is
	/// exclusively owned (§3); callers must not use it after `close`.
	pub async fn close(self) -> Result<(), StoreError> {
		match self {
			TileStore::DirectorySidecar(s) => s.close().await,
			TileStore::FileArchive(s) => s.close().await,
			TileStore::Relational(s) => s.close().await,
		}
	}

	pub async fn get_tile(&self, coord: TileCoord) -> Result<TileRecord, StoreError> {
		match self {
			TileStore::DirectorySidecar(s) => s.get_tile(coord).await,
			TileStore::FileArchive(s) => s.get_tile(coord).await,
			TileStore::Relational(s) => s.get_tile(coord).await,
		}
	}

	/// Writes `data` at `coord`. No-ops when `store_transparent` is `false`
	/// and `data` sniffs as a fully transparent PNG (§4.D).
	pub async fn put_tile(&self, coord: TileCoord, data: Vec<u8>, store_transparent: bool) -> Result<(), StoreError> {
		if !store_transparent && super::transparency::is_fully_transparent_png(&data) {
			return Ok(());
		}
		match self {
			TileStore::DirectorySidecar(s) => s.put_tile(coord, data).await,
			TileStore::FileArchive(s) => s.put_tile(coord, data).await,
			TileStore::Relational(s) => s.put_tile(coord, data).await,
		}
	}

	pub async fn get_created(&self, coord: TileCoord) -> Result<i64, StoreError> {
		match self {
			TileStore::DirectorySidecar(s) => s.get_created(coord).await,
			TileStore::FileArchive(s) => s.get_created(coord).await,
			TileStore::Relational(s) => s.get_created(coord).await,
		}
	}

	pub async fn get_metadata(&self) -> Result<TileMetadata, StoreError> {
		match self {
			TileStore::DirectorySidecar(s) => s.get_metadata().await,
			TileStore::FileArchive(s) => s.get_metadata().await,
			TileStore::Relational(s) => s.get_metadata().await,
		}
	}

	/// Merges `patch` on top of the store's current metadata (last-writer-wins
	/// per key, §4.D) and persists the result.
	pub async fn update_metadata(&self, patch: &TileMetadata) -> Result<(), StoreError> {
		match self {
			TileStore::DirectorySidecar(s) => s.update_metadata(patch).await,
			TileStore::FileArchive(s) => s.update_metadata(patch).await,
			TileStore::Relational(s) => s.update_metadata(patch).await,
		}
	}

	/// Reports a hash or a created-timestamp per tile within `range` (never
	/// both), the snapshot a hash/age-based refresh predicate is built from
	/// (§4.H step 4).
	pub async fn tile_extra_info(&self, level: u8, range: &TileBBox, by_created: bool) -> Result<ExtraInfoMap, StoreError> {
		match self {
			TileStore::DirectorySidecar(s) => s.tile_extra_info(level, range, by_created).await,
			TileStore::FileArchive(s) => s.tile_extra_info(level, range, by_created).await,
			TileStore::Relational(s) => s.tile_extra_info(level, range, by_created).await,
		}
	}

	/// Convenience: fetches `url` and writes the result via `put_tile` (§4.D,
	/// used by the seed job, §4.H).
	pub async fn download_tile(
		&self,
		url: &str,
		coord: TileCoord,
		max_try: u32,
		timeout: Duration,
		store_transparent: bool,
	) -> Result<(), StoreError> {
		let data = versatiles_core::utils::retry_async(max_try, Duration::from_millis(200), || {
			versatiles_core::io::http_get(url, timeout)
		})
		.await?;
		self.put_tile(coord, data, store_transparent).await
	}
}
